//! # 能带数据模型
//!
//! k 点与每个 k 点上的能带能量表。`kpoints[i]` 与 `bands[i]` 按下标一一对应，
//! 且所有能量序列长度相同。
//!
//! ## 依赖关系
//! - 被 `parsers/eigenval.rs`, `parsers/castep_band.rs` 使用
//! - 被 `commands/convert.rs` 使用

use crate::error::{Eig2BandError, Result};

/// 倒空间中的一个 k 点（通常为分数坐标）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KPoint(pub [f64; 3]);

impl KPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        KPoint([x, y, z])
    }

    pub fn coords(&self) -> [f64; 3] {
        self.0
    }
}

/// 完整的能带表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandTable {
    /// k 点列表
    pub kpoints: Vec<KPoint>,

    /// 每个 k 点的能带能量 (eV)
    pub bands: Vec<Vec<f64>>,
}

impl BandTable {
    pub fn new() -> Self {
        BandTable::default()
    }

    /// 从已有数据构造，并检查 k 点数与能量序列一致
    pub fn from_parts(kpoints: Vec<KPoint>, bands: Vec<Vec<f64>>) -> Result<Self> {
        if kpoints.len() != bands.len() {
            return Err(Eig2BandError::InvalidTable(format!(
                "{} k-points but {} band sets",
                kpoints.len(),
                bands.len()
            )));
        }

        if let Some(first) = bands.first() {
            let expected = first.len();
            if let Some((i, set)) = bands
                .iter()
                .enumerate()
                .find(|(_, set)| set.len() != expected)
            {
                return Err(Eig2BandError::InvalidTable(format!(
                    "k-point {} has {} bands, expected {}",
                    i + 1,
                    set.len(),
                    expected
                )));
            }
        }

        Ok(BandTable { kpoints, bands })
    }

    /// 追加一个 k 点及其能量
    pub fn push(&mut self, kpoint: KPoint, energies: Vec<f64>) {
        self.kpoints.push(kpoint);
        self.bands.push(energies);
    }

    pub fn num_kpoints(&self) -> usize {
        self.kpoints.len()
    }

    /// 能带数取自第一个 k 点；空表为 0
    pub fn num_bands(&self) -> usize {
        self.bands.first().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.kpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KPoint, &[f64])> {
        self.kpoints
            .iter()
            .zip(self.bands.iter().map(|b| b.as_slice()))
    }

    /// 全表能量范围 (min, max)
    pub fn energy_range(&self) -> Option<(f64, f64)> {
        self.bands
            .iter()
            .flatten()
            .fold(None, |acc, &e| match acc {
                None => Some((e, e)),
                Some((lo, hi)) => Some((lo.min(e), hi.max(e))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = BandTable::new();
        assert!(table.is_empty());
        assert_eq!(table.num_kpoints(), 0);
        assert_eq!(table.num_bands(), 0);
        assert!(table.energy_range().is_none());
    }

    #[test]
    fn test_push_keeps_parallel_sequences() {
        let mut table = BandTable::new();
        table.push(KPoint::new(0.0, 0.0, 0.0), vec![-5.0, 1.0]);
        table.push(KPoint::new(0.5, 0.0, 0.0), vec![-4.0, 2.5]);

        assert_eq!(table.num_kpoints(), 2);
        assert_eq!(table.num_bands(), 2);

        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs[1].0.coords(), [0.5, 0.0, 0.0]);
        assert_eq!(pairs[1].1, &[-4.0, 2.5]);
    }

    #[test]
    fn test_energy_range() {
        let table = BandTable::from_parts(
            vec![KPoint::new(0.0, 0.0, 0.0), KPoint::new(0.5, 0.5, 0.5)],
            vec![vec![-3.0, 4.0], vec![-7.5, 0.25]],
        )
        .unwrap();

        let (lo, hi) = table.energy_range().unwrap();
        assert!((lo + 7.5).abs() < 1e-12);
        assert!((hi - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_parts_rejects_length_mismatch() {
        let result = BandTable::from_parts(vec![KPoint::new(0.0, 0.0, 0.0)], vec![]);
        assert!(matches!(result, Err(Eig2BandError::InvalidTable(_))));
    }

    #[test]
    fn test_from_parts_rejects_ragged_bands() {
        let result = BandTable::from_parts(
            vec![KPoint::new(0.0, 0.0, 0.0), KPoint::new(0.5, 0.0, 0.0)],
            vec![vec![1.0, 2.0], vec![1.0]],
        );
        assert!(matches!(result, Err(Eig2BandError::InvalidTable(_))));
    }
}
