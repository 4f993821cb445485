//! # batch 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use crate::models::Symmetry;
use crate::parsers::TableOptions;

use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Input directory containing data files
    pub input: PathBuf,

    /// Crystal system shared by every file
    #[arg(short, long, value_enum)]
    pub symmetry: Symmetry,

    /// Polynomial degrees for a, b, c, alpha, beta, gamma
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = [2, 2, 1, 1, 1, 1],
        allow_negative_numbers = true
    )]
    pub degrees: Vec<i64>,

    /// Secondary separator applied inside each comma-separated field
    #[arg(long, default_value = ";")]
    pub separator: String,

    /// Skip the first record of each file as a header line
    #[arg(long, default_value_t = false)]
    pub header: bool,

    /// Output directory for the <stem>_derivatives.csv files
    #[arg(short, long, default_value = "cellfit_output")]
    pub output: PathBuf,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (e.g., "*.csv,*.dat")
    #[arg(long, default_value = "*.csv")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Write only T and the six derivatives instead of the full thermal table
    #[arg(long, default_value_t = false)]
    pub derivatives_only: bool,
}

impl BatchArgs {
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            separator: self.separator.clone(),
            has_header: self.header,
        }
    }
}
