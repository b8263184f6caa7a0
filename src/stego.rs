//! # 嵌入与提取流水线模块
//!
//! 嵌入：载体图像 → 容量检查 (必要时缩小载荷) → 构建并加密头部 →
//! 头部与载荷拼成一条字节流 → 逐字节拆成 3/3/2 bits 写入像素低位 → 无损保存。
//! 提取按相反顺序进行。两侧都从像素 0 开始按行优先顺序遍历，
//! 因此只要隐写图像的像素未被改动，读写就天然对齐。

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::bits::{merge_bits, split_byte};
use crate::capacity::{fit_payload, pixel_capacity};
use crate::cipher::crypt;
use crate::constants::{
    BLUE_LSB_MASK, EXTRACTED_PREFIX, GREEN_LSB_MASK, HEADER_LEN, RED_LSB_MASK,
};
use crate::error::{Result, StegoError};
use crate::header;

/// 一次嵌入操作的结果摘要。
#[derive(Debug)]
pub struct EmbedReport {
    /// 隐写图像的保存路径。
    pub dest: PathBuf,
    /// 载体图像的像素容量 (字节)。
    pub capacity: u64,
    /// 实际嵌入的载荷字节数 (不含头部)。
    pub payload_len: usize,
    /// 载荷若经过缩小，为所用的缩放比例。
    pub shrink_scale: Option<f64>,
}

/// 一次提取操作的结果摘要。
#[derive(Debug)]
pub struct ExtractReport {
    /// 恢复出的文件路径。
    pub path: PathBuf,
    /// 头部记录的文件名。
    pub name: String,
    /// 恢复出的字节数。
    pub payload_len: usize,
}

/// 把 `secret` 文件嵌入载体图像 `vessel`，结果无损保存到 `dest`。
///
/// 只有头部经过口令加密，载荷本身按原样写入像素。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 口令为空 ([`StegoError::EmptyPasscode`])。
/// * 载体图像或待嵌入文件无法读取。
/// * 载荷 (含缩小后) 超出图像容量。
/// * 结果图像无法保存 ([`StegoError::ImageWrite`])。
pub fn embed_file(
    vessel: &Path,
    dest: &Path,
    secret: &Path,
    passcode: &str,
) -> Result<EmbedReport> {
    if passcode.is_empty() {
        return Err(StegoError::EmptyPasscode);
    }

    let mut picture = image::open(vessel)?.to_rgb8();
    let capacity = pixel_capacity(&picture);

    let payload = fit_payload(secret, capacity)?;

    let mut header = header::build(payload.data.len() as u64, &payload.name)?;
    crypt(&mut header, passcode.as_bytes());

    // 容量检查已在 fit_payload 做过，这里按最终字节数复核一次，
    // 防止文件在检查与读取之间被改动。
    let required = (HEADER_LEN + payload.data.len()) as u64;
    if required > capacity {
        return Err(StegoError::PayloadTooLarge {
            required,
            available: capacity,
        });
    }

    write_stream(&mut picture, header.iter().chain(&payload.data).copied());
    picture.save(dest).map_err(StegoError::ImageWrite)?;

    Ok(EmbedReport {
        dest: dest.to_owned(),
        capacity,
        payload_len: payload.data.len(),
        shrink_scale: payload.scale,
    })
}

/// 从隐写图像中恢复隐藏文件，写入 `out_dir` 下的 `extracted_<文件名>`。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 口令为空 ([`StegoError::EmptyPasscode`])。
/// * 图像无法读取，或头部通不过校验 (多半是口令错误)。
/// * 输出文件已存在且 `overwrite` 为假 ([`StegoError::OutputExists`])。
/// * 恢复出的文件无法写入 ([`StegoError::FileWrite`])。
pub fn extract_file(
    stego: &Path,
    out_dir: &Path,
    passcode: &str,
    overwrite: bool,
) -> Result<ExtractReport> {
    if passcode.is_empty() {
        return Err(StegoError::EmptyPasscode);
    }

    let picture = image::open(stego)?.to_rgb8();
    let capacity = pixel_capacity(&picture);
    if capacity < HEADER_LEN as u64 {
        return Err(StegoError::HeaderParse(format!(
            "image of {capacity} pixels cannot hold a {HEADER_LEN}-byte header"
        )));
    }

    let mut header_bytes = read_stream(&picture, 0, HEADER_LEN);
    crypt(&mut header_bytes, passcode.as_bytes());
    let (size, name) = header::parse(&header_bytes)?;

    if HEADER_LEN as u64 + size > capacity {
        return Err(StegoError::HeaderParse(format!(
            "declared payload of {size} bytes exceeds the image capacity of {capacity}"
        )));
    }

    let data = read_stream(&picture, HEADER_LEN, size as usize);

    let path = out_dir.join(format!("{EXTRACTED_PREFIX}{name}"));
    if !overwrite && path.exists() {
        return Err(StegoError::OutputExists(path));
    }
    fs::write(&path, &data).map_err(StegoError::FileWrite)?;

    Ok(ExtractReport {
        path,
        name,
        payload_len: data.len(),
    })
}

fn write_stream(picture: &mut RgbImage, bytes: impl Iterator<Item = u8>) {
    for (pixel, byte) in picture.pixels_mut().zip(bytes) {
        let (first, mid, last) = split_byte(byte);
        pixel[0] = (pixel[0] & !RED_LSB_MASK) | first;
        pixel[1] = (pixel[1] & !GREEN_LSB_MASK) | mid;
        pixel[2] = (pixel[2] & !BLUE_LSB_MASK) | last;
    }
}

fn read_stream(picture: &RgbImage, start: usize, len: usize) -> Vec<u8> {
    picture
        .pixels()
        .skip(start)
        .take(len)
        .map(|pixel| {
            merge_bits(
                pixel[0] & RED_LSB_MASK,
                pixel[1] & GREEN_LSB_MASK,
                pixel[2] & BLUE_LSB_MASK,
            )
        })
        .collect()
}
