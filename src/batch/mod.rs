//! # 批量拟合模块
//!
//! 一次处理目录下的多个变温数据文件，每个文件独立拟合、独立导出。
//!
//! ## 子模块
//! - `collector`: 按 glob 模式收集数据文件
//! - `runner`: 在专用线程池上并行执行并汇总结果
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 使用
//! - 使用 `walkdir`, `glob`, `rayon`, `indicatif`

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, ProcessResult};
