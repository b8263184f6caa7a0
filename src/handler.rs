//! # 命令处理逻辑模块
//!
//! 包含处理 `embed` 和 `extract` 子命令的高级业务逻辑。
//! 本模块负责推导默认路径、做前置校验、调用核心隐写流水线，
//! 以及向用户报告结果。

use crate::cli::{EmbedArgs, ExtractArgs};
use crate::constants::{LOSSLESS_EXTENSIONS, STEGO_PREFIX};
use crate::error::StegoError;
use crate::stego::{embed_file, extract_file};
use anyhow::{Context, Result};
use colored::Colorize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// 处理 'Embed' 命令的执行逻辑。
///
/// 负责推导默认输出路径、确认输出是无损格式且不会意外覆盖已有文件，
/// 再调用嵌入流水线完成容量检查、头部加密与像素写入，
/// 最后向用户报告载荷大小与保存位置。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与口令的 `EmbedArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 口令为空，或输出路径不是无损图像格式。
/// * 输出文件已存在且未指定 `--force`。
/// * 载体图像或待嵌入文件无法读取。
/// * 载荷经缩小后仍超出图像容量。
/// * 结果图像无法保存。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    anyhow::ensure!(!args.passcode.is_empty(), "The passcode must not be empty.");

    let dest = args.dest.unwrap_or_else(|| default_dest(&args.image));

    ensure_lossless(&dest)?;

    if !args.force {
        anyhow::ensure!(
            !dest.exists(),
            "Output file already exists: {}. \nPass --force to overwrite it.",
            dest.to_string_lossy().red().bold()
        );
    }

    let report = embed_file(&args.image, &dest, &args.file, &args.passcode).with_context(|| {
        format!(
            "Unable to embed {} into {}",
            args.file.to_string_lossy().red().bold(),
            args.image.to_string_lossy().red().bold()
        )
    })?;

    if let Some(scale) = report.shrink_scale {
        println!(
            "The payload image was too large to fit and was scaled down by a factor of {} first.",
            format!("{scale:.1}").yellow().bold()
        );
    }

    println!(
        "Embedded {} payload bytes into a vessel holding {} bytes.",
        report.payload_len.to_string().green().bold(),
        report.capacity.to_string().green()
    );
    println!(
        "The file has been successfully hidden and saved: {}",
        report.dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 负责推导输出目录、调用提取流水线读取并解密头部、按头部记录的
/// 大小与文件名恢复隐藏文件，最后向用户报告保存位置。
///
/// # Arguments
///
/// * `args` - 包含图像路径、输出目录与口令的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 口令为空。
/// * 图像无法读取，或其中没有可解析的头部 (多半是口令错误)。
/// * 恢复出的文件已存在且未指定 `--force`。
/// * 恢复出的文件无法写入。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    anyhow::ensure!(!args.passcode.is_empty(), "The passcode must not be empty.");

    let out_dir = args.output.unwrap_or_else(|| default_out_dir(&args.image));

    let report = match extract_file(&args.image, &out_dir, &args.passcode, args.force) {
        Ok(report) => report,
        // 覆盖保护是前置条件失败，不归因于口令。
        Err(err @ StegoError::OutputExists(_)) => {
            return Err(anyhow::Error::new(err)
                .context("Pass --force to overwrite the existing file."));
        }
        Err(err) => {
            return Err(anyhow::Error::new(err).context(format!(
                "Unable to extract a hidden file from {}. \nThe passcode may be wrong or the image may carry no hidden data.",
                args.image.to_string_lossy().red().bold()
            )));
        }
    };

    println!(
        "Recovered {} bytes hidden under the name {}.",
        report.payload_len.to_string().green().bold(),
        report.name.green()
    );
    println!(
        "The hidden file has been successfully recovered and saved: {}",
        report.path.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 未指定输出路径时，在载体同目录下生成 stego_<载体名>.png。
fn default_dest(vessel: &Path) -> PathBuf {
    let stem = vessel
        .file_stem()
        .unwrap_or_else(|| OsStr::new("image"))
        .to_string_lossy();
    vessel.with_file_name(format!("{STEGO_PREFIX}{stem}.png"))
}

/// 未指定输出目录时，默认使用隐写图像所在目录。
fn default_out_dir(stego: &Path) -> PathBuf {
    match stego.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// 确认输出扩展名属于无损格式；有损重编码会抹掉像素低位中的数据。
fn ensure_lossless(dest: &Path) -> Result<()> {
    let ext = dest
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    anyhow::ensure!(
        LOSSLESS_EXTENSIONS.contains(&ext.as_str()),
        "Output must use a lossless image format ({}), got: {}",
        LOSSLESS_EXTENSIONS.join(", "),
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}
