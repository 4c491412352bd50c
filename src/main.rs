//! # eig2band - VASP EIGENVAL 到 CASTEP .band 转换工具
//!
//! 读取工作目录下的 `EIGENVAL`，写出 `output.band`。
//!
//! ## 子命令
//! - `convert` - EIGENVAL -> .band 转换
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/          (命令行参数定义)
//!   ├── commands/     (命令执行逻辑)
//!   │     ├── parsers/   (EIGENVAL 读取、.band 读写)
//!   │     └── models/    (数据模型)
//!   ├── diagnostics.rs (非致命诊断上报)
//!   ├── utils/        (工具函数)
//!   └── error.rs      (错误处理)
//! ```

mod cli;
mod commands;
mod diagnostics;
mod error;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

/// 日志过滤环境变量及其默认级别
const LOG_ENV: &str = "EIG2BAND_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    env_logger::init_from_env(env_logger::Env::new().filter_or(LOG_ENV, DEFAULT_LOG_FILTER));

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        let mut msg = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            msg.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        utils::output::print_error(&msg);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_is_info() {
        assert_eq!(LOG_ENV, "EIG2BAND_LOG");
        assert_eq!(DEFAULT_LOG_FILTER, "info");
    }
}
