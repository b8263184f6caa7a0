//! # 元数据头编解码模块
//!
//! 头部固定 30 字节，记录载荷大小与文件名，使提取过程自描述：
//!
//! ```text
//! [10 字节] 载荷大小，十进制 ASCII，右对齐，左侧以 '*' 填充
//! [20 字节] 文件名，左对齐，右侧以 '*' 填充；过长时截取末尾 20 字节
//! ```
//!
//! 解析侧做严格校验：大小字段去掉前导填充后必须全为数字，
//! 文件名必须是非空的合法 UTF-8 且不含路径分隔符。
//! 口令错误时解密出的头部几乎必然通不过这些校验。

use crate::constants::{FILLER, HEADER_LEN, MAX_PAYLOAD_BYTES, NAME_FIELD_LEN, SIZE_FIELD_LEN};
use crate::error::{Result, StegoError};

/// 构建 30 字节头部。
///
/// 超过 20 字节的文件名只保留末尾 20 字节，
/// 且始终在 UTF-8 字符边界上截断。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回 [`StegoError::Header`]：
/// * `size` 超出 10 位十进制数的表示范围。
/// * 截断后的文件名为空。
/// * 截断后的文件名包含填充符 `*`、路径分隔符或 NUL。
pub fn build(size: u64, name: &str) -> Result<[u8; HEADER_LEN]> {
    if size > MAX_PAYLOAD_BYTES {
        return Err(StegoError::Header(format!(
            "payload size {size} exceeds the {SIZE_FIELD_LEN}-digit size field"
        )));
    }

    let stored = trailing_fit(name);
    if stored.is_empty() {
        return Err(StegoError::Header("payload file name is empty".into()));
    }
    if stored.as_bytes().contains(&FILLER) {
        return Err(StegoError::Header(format!(
            "file name '{stored}' contains the reserved filler character '{}'",
            FILLER as char
        )));
    }
    // 构建侧与解析侧采用同一条规则，否则嵌入出的头部自己就通不过提取。
    if stored.contains(['/', '\\', '\0']) {
        return Err(StegoError::Header(format!(
            "file name '{stored}' contains a path separator"
        )));
    }

    let mut header = [FILLER; HEADER_LEN];
    let digits = size.to_string();
    header[SIZE_FIELD_LEN - digits.len()..SIZE_FIELD_LEN].copy_from_slice(digits.as_bytes());
    header[SIZE_FIELD_LEN..SIZE_FIELD_LEN + stored.len()].copy_from_slice(stored.as_bytes());

    Ok(header)
}

/// 解析解密后的 30 字节头部，返回载荷大小与文件名。
///
/// # Errors
///
/// 任何偏离构建格式的输入都会返回 [`StegoError::HeaderParse`]；
/// 这是提取流程检测口令错误的主要手段。
pub fn parse(bytes: &[u8]) -> Result<(u64, String)> {
    if bytes.len() != HEADER_LEN {
        return Err(StegoError::HeaderParse(format!(
            "expected {HEADER_LEN} header bytes, got {}",
            bytes.len()
        )));
    }

    let size_field = &bytes[..SIZE_FIELD_LEN];
    let padding = size_field.iter().take_while(|&&b| b == FILLER).count();
    let digits = &size_field[padding..];
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(StegoError::HeaderParse(
            "size field is not a decimal number".into(),
        ));
    }
    // 最多 10 位十进制数，折叠累加不会溢出 u64。
    let size = digits
        .iter()
        .fold(0u64, |acc, &d| acc * 10 + u64::from(d - b'0'));

    let name_field = &bytes[SIZE_FIELD_LEN..];
    let end = name_field
        .iter()
        .position(|&b| b == FILLER)
        .unwrap_or(NAME_FIELD_LEN);
    let name = std::str::from_utf8(&name_field[..end])
        .map_err(|_| StegoError::HeaderParse("file name is not valid UTF-8".into()))?;
    if name.is_empty() {
        return Err(StegoError::HeaderParse("file name is empty".into()));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(StegoError::HeaderParse(
            "file name contains a path separator".into(),
        ));
    }

    Ok((size, name.to_owned()))
}

/// 取 `name` 中字节数不超过文件名字段宽度的最长 UTF-8 后缀。
fn trailing_fit(name: &str) -> &str {
    let mut tail = name;
    while tail.len() > NAME_FIELD_LEN {
        let mut chars = tail.chars();
        chars.next();
        tail = chars.as_str();
    }
    tail
}
