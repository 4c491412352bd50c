//! # VASP EIGENVAL 格式解析器
//!
//! 解析 EIGENVAL 文件，得到 k 点及每个 k 点上的能带能量。
//!
//! ## EIGENVAL 格式说明
//! ```text
//! NKPTS NBANDS ...       # 第 1 行：k 点数、能带数，其余字段忽略
//! ...                    # 第 2-7 行：元数据，直接跳过
//! kx ky kz [weight]      # k 点行，取前 3 个字段
//! 1  E1 [occ]            # NBANDS 行能带，取第 2 个字段为能量
//! 2  E2 [occ]
//! ...                    # 以上 k 点块重复 NKPTS 次
//! ```
//!
//! ## 错误策略
//! - k 点行字段不足 3 个：非致命，上报诊断并连同其后 NBANDS 行能带一起跳过，
//!   游标保持对齐；`strict` 模式下视为致命错误
//! - 能带行字段不足 2 个：致命
//! - 数值无法解析或非有限值：致命
//! - 行数不足：致命
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `models/band.rs`, `parsers/cursor.rs`, `diagnostics.rs`

use super::cursor::LineCursor;
use super::{parse_counts, parse_finite};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{Eig2BandError, Result};
use crate::models::{BandTable, KPoint};
use log::{debug, trace};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 第 1 行之后需要跳过的元数据行数
pub const METADATA_LINES: usize = 6;

/// 首个 k 点块之前的总行数
pub const HEADER_LINES: usize = 1 + METADATA_LINES;

/// EIGENVAL 读取器，持有注入的诊断接收端
pub struct EigenvalReader<'d> {
    diagnostics: &'d mut dyn Diagnostics,
    strict: bool,
}

impl<'d> EigenvalReader<'d> {
    pub fn new(diagnostics: &'d mut dyn Diagnostics) -> Self {
        EigenvalReader {
            diagnostics,
            strict: false,
        }
    }

    /// 严格模式：不完整的 k 点行也视为致命错误
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 从文件路径读取，I/O 错误附带路径
    pub fn read_file(&mut self, path: &Path) -> Result<BandTable> {
        let file = File::open(path).map_err(|e| Eig2BandError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        self.read(BufReader::new(file)).map_err(|e| match e {
            Eig2BandError::Io(source) => Eig2BandError::FileReadError {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// 从任意可读文本源读取
    pub fn read<R: Read>(&mut self, mut input: R) -> Result<BandTable> {
        let mut content = String::new();
        input.read_to_string(&mut content)?;
        self.parse_str(&content)
    }

    /// 从字符串内容解析
    pub fn parse_str(&mut self, content: &str) -> Result<BandTable> {
        let mut cursor = LineCursor::new(content);
        self.parse_lines(&mut cursor)
    }

    fn parse_lines(&mut self, cursor: &mut LineCursor<'_>) -> Result<BandTable> {
        cursor.expect_lines(HEADER_LINES);

        let (line_no, header) = cursor.next_line()?;
        let (num_kpoints, num_bands) = parse_counts(line_no, header)?;
        cursor.expect_lines(
            num_kpoints
                .saturating_mul(num_bands.saturating_add(1))
                .saturating_add(HEADER_LINES),
        );
        debug!(
            "EIGENVAL header: {} k-points, {} bands",
            num_kpoints, num_bands
        );

        cursor.skip(METADATA_LINES)?;

        let mut table = BandTable::new();

        for k in 0..num_kpoints {
            let (line_no, text) = cursor.next_line()?;
            let fields: Vec<&str> = text.split_whitespace().collect();

            if fields.len() < 3 {
                let fields: Vec<String> = fields.iter().map(|s| s.to_string()).collect();
                if self.strict {
                    return Err(Eig2BandError::MalformedKpointLine {
                        line: line_no,
                        fields,
                    });
                }
                self.diagnostics.report(Diagnostic::MalformedKpoint {
                    line: line_no,
                    fields,
                });

                cursor.skip(num_bands)?;
                if num_bands > 0 {
                    self.diagnostics.report(Diagnostic::SkippedBands {
                        first_line: line_no + 1,
                        count: num_bands,
                    });
                }
                continue;
            }

            let kpoint = KPoint::new(
                parse_finite(&fields, 0, line_no)?,
                parse_finite(&fields, 1, line_no)?,
                parse_finite(&fields, 2, line_no)?,
            );
            debug!("k-point {} at line {}: {:?}", k + 1, line_no, kpoint.coords());

            let mut energies = Vec::new();
            for _ in 0..num_bands {
                let (line_no, text) = cursor.next_line()?;
                let fields: Vec<&str> = text.split_whitespace().collect();

                if fields.len() < 2 {
                    return Err(Eig2BandError::MalformedBandLine {
                        line: line_no,
                        fields: fields.iter().map(|s| s.to_string()).collect(),
                    });
                }

                let energy = parse_finite(&fields, 1, line_no)?;
                trace!("line {}: band energy {}", line_no, energy);
                energies.push(energy);
            }

            table.push(kpoint, energies);
        }

        debug!(
            "Read {} of {} k-points ({} lines consumed)",
            table.num_kpoints(),
            num_kpoints,
            cursor.consumed()
        );

        Ok(table)
    }
}
