//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//! 输入输出路径固定为工作目录下的 `EIGENVAL` 与 `output.band`，不可配置。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: convert

pub mod convert;

use clap::{Parser, Subcommand};

/// eig2band - VASP EIGENVAL 到 CASTEP .band 转换工具
#[derive(Parser)]
#[command(name = "eig2band")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Convert VASP EIGENVAL band energies into CASTEP .band format", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Convert ./EIGENVAL into ./output.band
    Convert(convert::ConvertArgs),
}
