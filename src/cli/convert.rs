//! # convert 子命令 CLI 定义
//!
//! EIGENVAL -> .band 转换的开关参数
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use clap::Args;

/// convert 子命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Treat incomplete k-point lines as fatal instead of skipping them
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Re-read the written .band file and check it against the parsed data
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    /// Print a per-k-point summary table
    #[arg(short, long, default_value_t = false)]
    pub summary: bool,

    /// Suppress banner, spinner and summary output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}
