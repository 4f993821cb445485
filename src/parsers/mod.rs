//! # 解析器模块
//!
//! 读取变温晶胞参数数据表。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: table

pub mod table;

pub use table::{read_unit_cell_file, TableOptions};
