//! # 结果输出模块
//!
//! 将拟合结果渲染为终端表格、CSV 数据和图表。
//!
//! ## 子模块
//! - `table`: 终端表格
//! - `export`: 逐温度 CSV 导出
//! - `plot`: 拟合曲线图
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `fit/` 和 `models/`

pub mod export;
pub mod plot;
pub mod table;

pub use export::{derivative_rows, temperature_grid, thermal_rows, write_csv};
