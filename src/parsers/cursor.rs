//! # 单向行游标
//!
//! 按文档顺序逐行消费文本，只进不退。所有行号从 1 开始。
//!
//! ## 依赖关系
//! - 被 `parsers/eigenval.rs`, `parsers/castep_band.rs` 使用

use crate::error::{Eig2BandError, Result};
use std::str::Lines;

pub struct LineCursor<'a> {
    lines: Lines<'a>,
    consumed: usize,
    expected_lines: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(content: &'a str) -> Self {
        LineCursor {
            lines: content.lines(),
            consumed: 0,
            expected_lines: 0,
        }
    }

    /// 设置文件应有的最少行数，仅用于截断错误信息
    pub fn expect_lines(&mut self, expected_lines: usize) {
        self.expected_lines = expected_lines;
    }

    /// 取下一行，返回 (行号, 内容)
    pub fn next_line(&mut self) -> Result<(usize, &'a str)> {
        let line_no = self.consumed + 1;
        match self.lines.next() {
            Some(text) => {
                self.consumed += 1;
                Ok((line_no, text))
            }
            None => Err(Eig2BandError::TruncatedInput {
                line: line_no,
                expected_lines: self.expected_lines.max(line_no),
            }),
        }
    }

    /// 跳过 n 行（不解析）
    pub fn skip(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.next_line()?;
        }
        Ok(())
    }

    /// 已消费的行数
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_numbers_are_one_based() {
        let mut cursor = LineCursor::new("a\nb\nc\n");
        assert_eq!(cursor.next_line().unwrap(), (1, "a"));
        cursor.skip(1).unwrap();
        assert_eq!(cursor.next_line().unwrap(), (3, "c"));
        assert_eq!(cursor.consumed(), 3);
    }

    #[test]
    fn test_truncation_reports_next_line() {
        let mut cursor = LineCursor::new("only\n");
        cursor.expect_lines(7);
        cursor.next_line().unwrap();
        match cursor.next_line() {
            Err(Eig2BandError::TruncatedInput {
                line,
                expected_lines,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(expected_lines, 7);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(cursor.consumed(), 1);
    }

    #[test]
    fn test_crlf_lines() {
        let mut cursor = LineCursor::new("1 2\r\n3 4\r\n");
        assert_eq!(cursor.next_line().unwrap().1, "1 2");
        assert_eq!(cursor.next_line().unwrap().1, "3 4");
    }
}
