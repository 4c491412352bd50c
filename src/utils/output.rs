//! # 终端输出工具
//!
//! 带颜色标签的状态行：`[*]` 信息、`[WARN]` 警告、`[ERR]` 错误、`[DONE]` 完成。
//! 警告与错误写到 stderr。
//!
//! ## 依赖关系
//! - 被 `commands/`, `diagnostics.rs`, `main.rs` 使用
//! - 使用 `colored` crate

use colored::{Color, Colorize};

/// 组装 "标签 消息" 一行
fn tagged(tag: &str, color: Color, msg: &str) -> String {
    format!("{} {}", tag.color(color).bold(), msg)
}

pub fn print_info(msg: &str) {
    println!("{}", tagged("[*]", Color::Blue, msg));
}

pub fn print_warning(msg: &str) {
    eprintln!("{}", tagged("[WARN]", Color::Yellow, msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", tagged("[ERR]", Color::Red, msg));
}

/// 转换完成：`[DONE] from -> to (detail)`
pub fn print_done(from: &str, to: &str, detail: &str) {
    println!("{}", done_line(from, to, detail));
}

fn done_line(from: &str, to: &str, detail: &str) -> String {
    let body = format!("{} {} {} ({})", from.dimmed(), "->".cyan(), to, detail);
    tagged("[DONE]", Color::Green, &body)
}

/// 标题栏
pub fn print_header(title: &str) {
    let rule = "─".repeat(60);
    println!("\n{}\n  {}\n{}\n", rule.dimmed(), title.bold(), rule.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_without_color() {
        colored::control::set_override(false);

        assert_eq!(tagged("[WARN]", Color::Yellow, "k-point skipped"), "[WARN] k-point skipped");
        assert_eq!(
            done_line("EIGENVAL", "output.band", "2 k-point(s) x 1 band(s)"),
            "[DONE] EIGENVAL -> output.band (2 k-point(s) x 1 band(s))"
        );

        colored::control::unset_override();
    }
}
