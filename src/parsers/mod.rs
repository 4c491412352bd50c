//! # 解析器模块
//!
//! 提供 VASP EIGENVAL 读取与 CASTEP .band 读写。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: cursor, eigenval, castep_band

pub mod castep_band;
pub mod cursor;
pub mod eigenval;

use crate::error::{Eig2BandError, Result};

/// 解析首行的 "k 点数 能带数"，多余字段忽略
pub(crate) fn parse_counts(line_no: usize, text: &str) -> Result<(usize, usize)> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(Eig2BandError::InvalidHeader {
            line: line_no,
            reason: format!("expected at least 2 integer fields, found {}", fields.len()),
        });
    }

    let count = |idx: usize, what: &str| -> Result<usize> {
        fields[idx]
            .parse::<usize>()
            .map_err(|_| Eig2BandError::InvalidHeader {
                line: line_no,
                reason: format!("'{}' is not a valid {} count", fields[idx], what),
            })
    };

    Ok((count(0, "k-point")?, count(1, "band")?))
}

/// 将第 idx 个字段解析为有限浮点数
pub(crate) fn parse_finite(fields: &[&str], idx: usize, line_no: usize) -> Result<f64> {
    let token = fields[idx];
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Eig2BandError::NumericParse {
            line: line_no,
            field: idx,
            token: token.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counts_ignores_extra_fields() {
        assert_eq!(parse_counts(1, "  12  40  7 2 ").unwrap(), (12, 40));
    }

    #[test]
    fn test_parse_counts_rejects_negative() {
        assert!(matches!(
            parse_counts(1, "-1 4"),
            Err(Eig2BandError::InvalidHeader { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_finite() {
        let fields = ["1", "-2.5E+01", "inf"];
        assert_eq!(parse_finite(&fields, 1, 3).unwrap(), -25.0);
        assert!(matches!(
            parse_finite(&fields, 2, 3),
            Err(Eig2BandError::NumericParse { line: 3, field: 2, .. })
        ));
    }
}
