//! # convert 命令实现
//!
//! 将 VASP EIGENVAL 转换为 CASTEP .band。
//!
//! ## 功能
//! - 读取工作目录下固定的 `EIGENVAL`
//! - 原子写入固定的 `output.band`
//! - 可选读回校验、k 点汇总表
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `parsers/`, `models/`, `diagnostics.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::convert::ConvertArgs;
use crate::diagnostics::{Diagnostics, TerminalDiagnostics};
use crate::error::{Eig2BandError, Result};
use crate::models::BandTable;
use crate::parsers::castep_band::{verify_round_trip, write_band_file};
use crate::parsers::eigenval::EigenvalReader;
use crate::utils::{output, progress};

use log::info;
use std::fs;
use std::path::Path;
use tabled::{Table, Tabled};

/// 输入文件（工作目录下）
pub const EIGENVAL_PATH: &str = "EIGENVAL";

/// 输出文件（工作目录下）
pub const BAND_PATH: &str = "output.band";

/// k 点汇总行
#[derive(Debug, Clone, Tabled)]
struct KpointRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "kx")]
    kx: String,
    #[tabled(rename = "ky")]
    ky: String,
    #[tabled(rename = "kz")]
    kz: String,
    #[tabled(rename = "E_min (eV)")]
    e_min: String,
    #[tabled(rename = "E_max (eV)")]
    e_max: String,
}

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    let input = Path::new(EIGENVAL_PATH);
    let output_path = Path::new(BAND_PATH);

    if !args.quiet {
        output::print_header("Converting EIGENVAL to CASTEP .band");
    }

    let spinner = (!args.quiet).then(|| progress::create_spinner("Converting"));
    let mut diagnostics = match &spinner {
        Some(pb) => TerminalDiagnostics::new().with_spinner(pb.clone()),
        None => TerminalDiagnostics::new(),
    };

    let result = convert_eigenval_to_band(input, output_path, &mut diagnostics, args.strict);
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let table = result?;

    if table.is_empty() {
        output::print_warning(&format!("No k-points read from '{}'", input.display()));
    }

    if args.verify {
        verify_written(&table, output_path)?;
        if !args.quiet {
            output::print_info(&format!("Verified '{}'", output_path.display()));
        }
    }

    if args.summary && !args.quiet {
        print_summary(&table);
    }

    if diagnostics.count() > 0 {
        output::print_warning(&format!(
            "{} diagnostic(s) reported while reading '{}'",
            diagnostics.count(),
            input.display()
        ));
    }

    if !args.quiet {
        output::print_done(
            &input.display().to_string(),
            &output_path.display().to_string(),
            &format!(
                "{} k-point(s) x {} band(s)",
                table.num_kpoints(),
                table.num_bands()
            ),
        );
    }

    Ok(())
}

/// 读取 EIGENVAL 并写出 .band；任何失败原样向上传递
pub fn convert_eigenval_to_band(
    input: &Path,
    output_path: &Path,
    diagnostics: &mut dyn Diagnostics,
    strict: bool,
) -> Result<BandTable> {
    let table = EigenvalReader::new(diagnostics)
        .strict(strict)
        .read_file(input)?;
    info!(
        "Read {} k-points x {} bands from {:?}",
        table.num_kpoints(),
        table.num_bands(),
        input
    );

    write_band_file(&table, output_path)?;
    info!("Wrote {:?}", output_path);

    Ok(table)
}

/// 读回已写出的文件并与内存中的表比对
fn verify_written(table: &BandTable, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| Eig2BandError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    verify_round_trip(table, &content)
}

fn print_summary(table: &BandTable) {
    let rows: Vec<KpointRow> = table
        .iter()
        .enumerate()
        .map(|(i, (kpoint, energies))| {
            let [kx, ky, kz] = kpoint.coords();
            let e_min = energies.iter().copied().fold(f64::INFINITY, f64::min);
            let e_max = energies.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let fmt_energy = |e: f64| {
                if e.is_finite() {
                    format!("{:.4}", e)
                } else {
                    "-".to_string()
                }
            };
            KpointRow {
                index: i + 1,
                kx: format!("{:.6}", kx),
                ky: format!("{:.6}", ky),
                kz: format!("{:.6}", kz),
                e_min: fmt_energy(e_min),
                e_max: fmt_energy(e_max),
            }
        })
        .collect();

    println!("{}", Table::new(&rows));

    if let Some((lo, hi)) = table.energy_range() {
        output::print_info(&format!("Energy range: {:.4} .. {:.4} eV", lo, hi));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use crate::parsers::castep_band::BandFormat;
    use tempdir::TempDir;

    const EIGENVAL: &str = "2 1
meta 1
meta 2
meta 3
meta 4
meta 5
meta 6
0.0 0.0 0.0
1     -5.123456
0.5 0.0 0.0
1     -4.987654
";

    #[test]
    fn test_convert_writes_band_file() {
        let tmpdir = TempDir::new("eig2band_test").unwrap();
        let input = tmpdir.path().join("EIGENVAL");
        let output_path = tmpdir.path().join("output.band");
        fs::write(&input, EIGENVAL).unwrap();

        let mut diags: Vec<Diagnostic> = Vec::new();
        let table = convert_eigenval_to_band(&input, &output_path, &mut diags, false).unwrap();

        assert!(diags.is_empty());
        assert_eq!(table.num_kpoints(), 2);
        assert_eq!(
            fs::read_to_string(&output_path).unwrap(),
            "2 1\n\
             0.00000000 0.00000000 0.00000000\n\
             -5.12345600\n\
             0.50000000 0.00000000 0.00000000\n\
             -4.98765400\n"
        );
        verify_written(&table, &output_path).unwrap();
    }

    #[test]
    fn test_convert_propagates_read_errors() {
        let tmpdir = TempDir::new("eig2band_test").unwrap();
        let input = tmpdir.path().join("EIGENVAL");
        let output_path = tmpdir.path().join("output.band");
        fs::write(&input, EIGENVAL.replace("1     -4.987654", "-4.987654")).unwrap();

        let mut diags: Vec<Diagnostic> = Vec::new();
        let result = convert_eigenval_to_band(&input, &output_path, &mut diags, false);

        assert!(matches!(
            result,
            Err(Eig2BandError::MalformedBandLine { line: 11, .. })
        ));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_convert_missing_input() {
        let tmpdir = TempDir::new("eig2band_test").unwrap();
        let mut diags: Vec<Diagnostic> = Vec::new();
        let result = convert_eigenval_to_band(
            &tmpdir.path().join("EIGENVAL"),
            &tmpdir.path().join("output.band"),
            &mut diags,
            false,
        );
        assert!(matches!(result, Err(Eig2BandError::FileReadError { .. })));
    }

    #[test]
    fn test_convert_skips_malformed_kpoint() {
        let tmpdir = TempDir::new("eig2band_test").unwrap();
        let input = tmpdir.path().join("EIGENVAL");
        let output_path = tmpdir.path().join("output.band");
        fs::write(&input, EIGENVAL.replace("0.0 0.0 0.0\n", "0.0 0.0\n")).unwrap();

        let mut diags: Vec<Diagnostic> = Vec::new();
        let table = convert_eigenval_to_band(&input, &output_path, &mut diags, false).unwrap();

        assert_eq!(diags.len(), 2);
        assert_eq!(table.num_kpoints(), 1);
        assert_eq!(
            fs::read_to_string(&output_path).unwrap(),
            BandFormat(&table).to_string()
        );

        let strict = convert_eigenval_to_band(&input, &output_path, &mut diags, true);
        assert!(matches!(
            strict,
            Err(Eig2BandError::MalformedKpointLine { line: 8, .. })
        ));
    }
}
