//! # 数据模型模块
//!
//! 定义 k 点与能带能量表的统一数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/` 和 `commands/` 使用
//! - 子模块: band

pub mod band;

pub use band::{BandTable, KPoint};
