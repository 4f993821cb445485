//! # 拟合模块
//!
//! 多项式最小二乘拟合与晶胞参数温度导数计算。
//!
//! ## 子模块
//! - `least_squares`: 单条序列的 QR 多项式拟合与 R²
//! - `pipeline`: 六参数拟合 + 求导
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `report/` 使用
//! - 使用 `models/`

pub mod least_squares;
pub mod pipeline;

pub use pipeline::{derive, linear_expansion, Derivatives, UnitCellFunctions};
