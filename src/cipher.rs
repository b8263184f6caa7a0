//! # 流加密模块
//!
//! 以循环重复的口令字节对数据做对称 XOR 变换，
//! 同一口令应用两次即还原输入。这不是密码学意义上的强加密，
//! 目的只是让没有口令的人读不出头部。

/// 就地加密或解密 `data`。口令必须非空，流水线入口已做校验。
pub fn crypt(data: &mut [u8], key: &[u8]) {
    debug_assert!(!key.is_empty(), "cipher key must not be empty");
    for (i, byte) in data.iter_mut().enumerate() {
        *byte ^= key[i % key.len()];
    }
}
