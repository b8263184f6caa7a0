//! # 容量管理模块
//!
//! 图像容量 = 宽 × 高，每个像素承载一个字节，前 30 字节留给头部。
//! 待嵌入文件放不下时按图像处理：按固定比例序列逐级缩小并重编码为 JPEG，
//! 全程在内存中进行，取第一个放得下的编码结果。
//! 非图像文件放不下则没有补救手段。

use std::fs;
use std::path::Path;

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::constants::{HEADER_LEN, MAX_PAYLOAD_BYTES, SHRINK_JPEG_QUALITY, SHRINK_SCALES};
use crate::error::{Result, StegoError};

/// 适配到图像容量之后的载荷。
#[derive(Debug)]
pub struct Payload {
    /// 实际写入像素的字节。
    pub data: Vec<u8>,
    /// 记入头部的文件名。
    pub name: String,
    /// 若经过缩小，为所用的缩放比例。
    pub scale: Option<f64>,
}

/// 图像能承载的字节总数 (含头部)。
pub fn pixel_capacity(image: &image::RgbImage) -> u64 {
    u64::from(image.width()) * u64::from(image.height())
}

/// 读取待嵌入文件并保证其放得进给定容量。
///
/// 放得下的文件原样读入；放不下的文件按图像逐级缩小重编码。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 文件无法读取 ([`StegoError::FileRead`])。
/// * 文件大小超出头部大小字段的表示范围 ([`StegoError::Header`])。
/// * 文件放不下且不是图像 ([`StegoError::PayloadTooLarge`])。
/// * 所有缩放比例都试过仍放不下 ([`StegoError::ShrinkExhausted`])。
pub fn fit_payload(path: &Path, capacity: u64) -> Result<Payload> {
    let size = fs::metadata(path).map_err(StegoError::FileRead)?.len();
    if size > MAX_PAYLOAD_BYTES {
        return Err(StegoError::Header(format!(
            "payload size {size} exceeds the 10-digit size field"
        )));
    }

    let budget = capacity.saturating_sub(HEADER_LEN as u64);
    if size <= budget {
        let data = fs::read(path).map_err(StegoError::FileRead)?;
        return Ok(Payload {
            data,
            name: file_name_of(path),
            scale: None,
        });
    }

    shrink_to_fit(path, size, budget, capacity)
}

/// 把过大的图像载荷逐级缩小重编码，直到放得进 `budget`。
fn shrink_to_fit(path: &Path, size: u64, budget: u64, capacity: u64) -> Result<Payload> {
    // 非图像文件放不下时没有补救手段。
    let Ok(opened) = image::open(path) else {
        return Err(StegoError::PayloadTooLarge {
            required: HEADER_LEN as u64 + size,
            available: capacity,
        });
    };

    // JPEG 编码器不接受带 alpha 的像素，先统一摊平成 RGB。
    let source = opened.to_rgb8();
    let (width, height) = (source.width(), source.height());
    let source = DynamicImage::ImageRgb8(source);

    let mut smallest = u64::MAX;
    for &scale in &SHRINK_SCALES {
        let new_width = ((f64::from(width) * scale).round() as u32).max(1);
        let new_height = ((f64::from(height) * scale).round() as u32).max(1);
        let resized = source.resize_exact(new_width, new_height, FilterType::Triangle);

        let mut encoded = Vec::new();
        resized
            .write_with_encoder(JpegEncoder::new_with_quality(
                &mut encoded,
                SHRINK_JPEG_QUALITY,
            ))
            .map_err(StegoError::ImageWrite)?;

        smallest = smallest.min(encoded.len() as u64);
        if encoded.len() as u64 <= budget {
            return Ok(Payload {
                data: encoded,
                name: shrunk_name(path),
                scale: Some(scale),
            });
        }
    }

    Err(StegoError::ShrinkExhausted {
        smallest,
        available: budget,
    })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 缩小过的载荷已被重编码为 JPEG，命名时同时标明来源与真实格式。
fn shrunk_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("resized_{stem}.jpg")
}
