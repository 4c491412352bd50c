//! # 诊断信息模块
//!
//! 解析过程中的非致命问题通过注入的 [`Diagnostics`] 上报，
//! 解析器本身从不直接写终端。
//!
//! ## 依赖关系
//! - 被 `parsers/eigenval.rs` 使用
//! - `TerminalDiagnostics` 使用 `utils/output.rs`

use crate::utils::output;
use indicatif::ProgressBar;
use std::fmt;

/// 非致命诊断事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// k 点行字段不足 3 个，该 k 点被跳过
    MalformedKpoint { line: usize, fields: Vec<String> },

    /// 被跳过 k 点所属的能带行（未解析，仅消费）
    SkippedBands { first_line: usize, count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedKpoint { line, fields } => write!(
                f,
                "k-point line {} is incomplete: {:?}; skipping this k-point",
                line, fields
            ),
            Diagnostic::SkippedBands { first_line, count } => write!(
                f,
                "skipped {} band line(s) starting at line {}",
                count, first_line
            ),
        }
    }
}

/// 诊断信息接收端
pub trait Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// 收集到内存，便于测试
impl Diagnostics for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// 以 `[WARN]` 形式打印到终端
#[derive(Default)]
pub struct TerminalDiagnostics {
    spinner: Option<ProgressBar>,
    count: usize,
}

impl TerminalDiagnostics {
    pub fn new() -> Self {
        TerminalDiagnostics::default()
    }

    /// 打印时暂停 spinner，避免输出交错
    pub fn with_spinner(mut self, spinner: ProgressBar) -> Self {
        self.spinner = Some(spinner);
        self
    }

    /// 已上报的诊断数量
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Diagnostics for TerminalDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        let msg = diagnostic.to_string();
        match &self.spinner {
            Some(pb) => pb.suspend(|| output::print_warning(&msg)),
            None => output::print_warning(&msg),
        }
    }
}
