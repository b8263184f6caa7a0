pub fn split_byte(byte: u8) -> (u8, u8, u8) {
    (byte >> 5, (byte >> 2) & 0b111, byte & 0b11)
}

// 输入超出 3/3/2 bit 宽度时结果无意义；调用方负责先用掩码截断。
pub fn merge_bits(first: u8, mid: u8, last: u8) -> u8 {
    (((first << 3) | mid) << 2) | last
}
