//! # 数据模型模块
//!
//! 定义晶格参数、数据序列、多项式、晶系与变温晶胞数据。
//!
//! ## 依赖关系
//! - 被 `fit/`, `parsers/`, `report/` 和 `commands/` 使用
//! - 子模块: lattice, series, polynomial, symmetry, unit_cell

pub mod lattice;
pub mod polynomial;
pub mod series;
pub mod symmetry;
pub mod unit_cell;

pub use lattice::{Degrees, LatticeParameter};
pub use polynomial::Polynomial;
pub use series::SampleSeries;
pub use symmetry::Symmetry;
pub use unit_cell::UnitCellData;
