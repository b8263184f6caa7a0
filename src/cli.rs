//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于把任意文件藏进无损格式图像 (如 PNG, BMP) 或凭口令恢复。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于把任意文件藏进无损格式图像 (如 PNG, BMP)，之后凭同一口令恢复。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (嵌入) 和 extract (提取)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 把一个文件嵌入无损格式图像 (如 PNG, BMP) 的像素低位中。
    Embed(EmbedArgs),

    /// 凭口令从隐写图像中恢复隐藏的文件。
    Extract(ExtractArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 用作载体的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文件路径，类型不限。
    #[arg(short, long)]
    pub file: PathBuf,

    /// 隐写完成后保存结果图像的输出路径，必须是无损格式。
    /// 省略时默认保存为载体同目录下的 stego_<载体名>.png。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 用于加密头部的口令，提取时必须提供相同口令。
    #[arg(short, long)]
    pub passcode: String,

    /// 输出文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已嵌入隐藏文件的隐写图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复出的文件要写入的目录。
    /// 省略时默认使用隐写图像所在目录。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 嵌入时所用的口令。
    #[arg(short, long)]
    pub passcode: String,

    /// 同名文件已存在时强制覆盖。
    #[arg(long)]
    pub force: bool,
}
