//! # 错误类型模块
//!
//! 定义隐写核心流水线所有可能的失败类型。
//! 处理层 (`handler`) 会在这些错误之上用 `anyhow` 补充面向用户的上下文。

use std::path::PathBuf;
use thiserror::Error;

/// 隐写核心流水线的错误类型。
#[derive(Error, Debug)]
pub enum StegoError {
    /// 载体或隐写图像无法读取或解码。
    #[error("failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    /// 图像无法编码或写入，包括隐写结果保存与载荷缩小重编码两处。
    #[error("failed to write image: {0}")]
    ImageWrite(image::ImageError),

    /// 待嵌入文件无法读取。
    #[error("failed to read payload file: {0}")]
    FileRead(std::io::Error),

    /// 恢复出的文件无法写入。
    #[error("failed to write recovered file: {0}")]
    FileWrite(std::io::Error),

    /// 头部与载荷的总字节数超出图像的像素容量。
    #[error("payload needs {required} bytes (header included) but the image holds only {available}")]
    PayloadTooLarge { required: u64, available: u64 },

    /// 所有缩放比例都试过之后，载荷仍然放不下。
    #[error("payload could not be shrunk to fit: smallest attempt was {smallest} bytes, only {available} are free")]
    ShrinkExhausted { smallest: u64, available: u64 },

    /// 载荷的大小或文件名无法编码进 30 字节头部。
    #[error("invalid header: {0}")]
    Header(String),

    /// 解密后的头部未通过校验，多半意味着口令错误。
    #[error("could not parse header: {0}")]
    HeaderParse(String),

    /// 输出文件已存在且未允许覆盖。
    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// 口令为空。
    #[error("passcode must not be empty")]
    EmptyPasscode,
}

/// 隐写核心流水线的 `Result` 别名。
pub type Result<T> = std::result::Result<T, StegoError>;
