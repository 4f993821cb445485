//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `parsers/`, `fit/`, `report/`, `utils/`
//! - 子模块: fit, expand, batch

pub mod batch;
pub mod expand;
pub mod fit;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Fit(args) => fit::execute(args),
        Commands::Expand(args) => expand::execute(args),
        Commands::Batch(args) => batch::execute(args),
    }
}
