/// 元数据头的总长度 (字节)。
/// 由 10 字节的文件大小字段和 20 字节的文件名字段组成，
/// 始终占据图像的前 30 个像素。
pub const HEADER_LEN: usize = 30;

/// 元数据头中十进制文件大小字段的长度 (字节)。
/// 10 位十进制数最大可表示 9,999,999,999 字节。
pub const SIZE_FIELD_LEN: usize = 10;

/// 元数据头中文件名字段的长度 (字节)。
/// 较短的文件名右侧补满填充符，较长的文件名截取末尾 20 字节。
pub const NAME_FIELD_LEN: usize = 20;

/// 头部字段的填充符。
/// 大小字段在左侧填充，文件名字段在右侧填充；
/// 因此写入头部的文件名本身不得包含该字符。
pub const FILLER: u8 = b'*';

/// 大小字段能表示的最大载荷字节数 (10 位十进制数的上限)。
pub const MAX_PAYLOAD_BYTES: u64 = 9_999_999_999;

/// 红色通道低位掩码：每像素在红色通道存储 3 bits。
pub const RED_LSB_MASK: u8 = 0b0000_0111;

/// 绿色通道低位掩码：每像素在绿色通道存储 3 bits。
pub const GREEN_LSB_MASK: u8 = 0b0000_0111;

/// 蓝色通道低位掩码：每像素在蓝色通道存储 2 bits。
/// 3 + 3 + 2 = 8 bits，即每个像素恰好承载一个字节。
pub const BLUE_LSB_MASK: u8 = 0b0000_0011;

/// 提取出的文件统一加上的文件名前缀。
pub const EXTRACTED_PREFIX: &str = "extracted_";

/// 未指定输出路径时，隐写结果图像文件名的默认前缀。
pub const STEGO_PREFIX: &str = "stego_";

/// 缩小过大图像载荷时依次尝试的缩放比例。
/// 从 0.9 开始按 0.1 递减，到 0.1 之前 (不含) 为止，取第一个放得下的结果。
pub const SHRINK_SCALES: [f64; 8] = [0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2];

/// 缩小载荷时重新编码 JPEG 所用的质量参数。
pub const SHRINK_JPEG_QUALITY: u8 = 95;

/// 嵌入输出允许的无损图像格式扩展名。
/// 有损重编码会改写像素低位，直接毁掉藏在其中的数据。
pub const LOSSLESS_EXTENSIONS: [&str; 6] = ["png", "bmp", "tiff", "tif", "webp", "qoi"];
