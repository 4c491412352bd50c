//! # CASTEP .band 格式读写
//!
//! 将能带表写为 .band 格式，并提供反向解析用于写出后的校验。
//!
//! ## .band 格式说明
//! ```text
//! NKPTS NBANDS               # k 点数、能带数
//! kx ky kz                   # 每个 k 点：坐标一行
//! E1 E2 ... E_NBANDS         #            能量一行
//! ...
//! ```
//! 所有数值均为定点小数，小数点后固定 8 位，不使用科学计数法。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 使用
//! - 使用 `models/band.rs`, `parsers/cursor.rs`

use super::cursor::LineCursor;
use super::{parse_counts, parse_finite};
use crate::error::{Eig2BandError, Result};
use crate::models::{BandTable, KPoint};
use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// 读回校验允许的绝对误差
pub const ROUND_TRIP_TOLERANCE: f64 = 1e-8;

/// .band 格式渲染器
pub struct BandFormat<'a>(pub &'a BandTable);

impl fmt::Display for BandFormat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.0;
        writeln!(f, "{} {}", table.num_kpoints(), table.num_bands())?;

        for (kpoint, energies) in table.iter() {
            write_fixed_row(f, &kpoint.coords())?;
            write_fixed_row(f, energies)?;
        }
        Ok(())
    }
}

/// 一行空格分隔的 8 位小数
fn write_fixed_row(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{:.8}", v)?;
    }
    f.write_str("\n")
}

/// 将能带表写入任意输出
pub fn write_band<W: Write>(table: &BandTable, mut output: W) -> io::Result<()> {
    write!(output, "{}", BandFormat(table))?;
    output.flush()
}

/// 原子写入：先写入同目录下的临时文件，再重命名覆盖目标
pub fn write_band_file(table: &BandTable, path: &Path) -> Result<()> {
    let tmp = temp_path_for(path);

    if let Err(e) = write_and_sync(table, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(Eig2BandError::FileWriteError {
            path: tmp.display().to_string(),
            source: e,
        });
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        Eig2BandError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        }
    })
}

fn write_and_sync(table: &BandTable, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_band(table, &mut writer)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output.band"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// 解析 .band 格式字符串
pub fn parse_band_content(content: &str) -> Result<BandTable> {
    let mut cursor = LineCursor::new(content);
    cursor.expect_lines(1);

    let (line_no, header) = cursor.next_line()?;
    let (num_kpoints, num_bands) = parse_counts(line_no, header)?;
    cursor.expect_lines(num_kpoints.saturating_mul(2).saturating_add(1));

    let mut kpoints = Vec::new();
    let mut bands = Vec::new();

    for _ in 0..num_kpoints {
        let (line_no, text) = cursor.next_line()?;
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(Eig2BandError::MalformedKpointLine {
                line: line_no,
                fields: fields.iter().map(|s| s.to_string()).collect(),
            });
        }
        kpoints.push(KPoint::new(
            parse_finite(&fields, 0, line_no)?,
            parse_finite(&fields, 1, line_no)?,
            parse_finite(&fields, 2, line_no)?,
        ));

        let (line_no, text) = cursor.next_line()?;
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() < num_bands {
            return Err(Eig2BandError::MalformedBandLine {
                line: line_no,
                fields: fields.iter().map(|s| s.to_string()).collect(),
            });
        }
        bands.push(
            (0..num_bands)
                .map(|i| parse_finite(&fields, i, line_no))
                .collect::<Result<Vec<f64>>>()?,
        );
    }

    BandTable::from_parts(kpoints, bands)
}

/// 校验读回的 .band 内容与原表一致（误差在 1e-8 以内）
pub fn verify_round_trip(expected: &BandTable, content: &str) -> Result<()> {
    let actual = parse_band_content(content)?;

    if actual.num_kpoints() != expected.num_kpoints() || actual.num_bands() != expected.num_bands()
    {
        return Err(Eig2BandError::VerificationFailed(format!(
            "shape {}x{} differs from expected {}x{}",
            actual.num_kpoints(),
            actual.num_bands(),
            expected.num_kpoints(),
            expected.num_bands()
        )));
    }

    for (k, ((ka, ea), (ke, ee))) in actual.iter().zip(expected.iter()).enumerate() {
        let coords_ok = ka
            .coords()
            .iter()
            .zip(ke.coords().iter())
            .all(|(a, b)| (a - b).abs() <= ROUND_TRIP_TOLERANCE);
        if !coords_ok {
            return Err(Eig2BandError::VerificationFailed(format!(
                "k-point {} coordinates {:?} differ from {:?}",
                k + 1,
                ka.coords(),
                ke.coords()
            )));
        }

        if let Some((b, (a, e))) = ea
            .iter()
            .zip(ee.iter())
            .enumerate()
            .find(|(_, (a, e))| (*a - *e).abs() > ROUND_TRIP_TOLERANCE)
        {
            return Err(Eig2BandError::VerificationFailed(format!(
                "k-point {} band {}: {} differs from {}",
                k + 1,
                b + 1,
                a,
                e
            )));
        }
    }

    Ok(())
}
