//! # 统一错误处理模块
//!
//! 定义 eig2band 的所有错误类型，使用 `thiserror` 派生。
//! 行号一律从 1 开始计数，字段索引从 0 开始。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// eig2band 统一错误类型
#[derive(Error, Debug)]
pub enum Eig2BandError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid header at line {line}: {reason}")]
    InvalidHeader { line: usize, reason: String },

    #[error("Premature end of input at line {line} (header requires {expected_lines} lines)")]
    TruncatedInput { line: usize, expected_lines: usize },

    #[error("Band line {line} is incomplete: expected at least 2 fields, found {fields:?}")]
    MalformedBandLine { line: usize, fields: Vec<String> },

    #[error("K-point line {line} is incomplete: expected at least 3 fields, found {fields:?}")]
    MalformedKpointLine { line: usize, fields: Vec<String> },

    #[error("Cannot parse field {field} at line {line} as a finite number: '{token}'")]
    NumericParse {
        line: usize,
        field: usize,
        token: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 数据一致性错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid band table: {0}")]
    InvalidTable(String),

    #[error("Verification of written output failed: {0}")]
    VerificationFailed(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, Eig2BandError>;
