//! # lsb_stash 库
//!
//! 本库包含把任意文件藏进图像像素低位、再凭口令恢复的
//! LSB 隐写工具核心逻辑。

// 声明库包含的所有模块。

pub mod bits;
pub mod capacity;
pub mod cipher;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod header;
pub mod stego;
