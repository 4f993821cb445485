//! # fit / expand 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/fit.rs`, `commands/expand.rs`

use crate::models::Symmetry;
use crate::parsers::TableOptions;

use clap::Args;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────
// 共享输入参数
// ─────────────────────────────────────────────────────────────

/// 数据文件输入参数
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Input data file: comma-separated records, first column is temperature
    pub file: PathBuf,

    /// Crystal system of the sample
    #[arg(short, long, value_enum)]
    pub symmetry: Symmetry,

    /// Secondary separator applied inside each comma-separated field
    #[arg(long, default_value = ";")]
    pub separator: String,

    /// Skip the first record as a header line
    #[arg(long, default_value_t = false)]
    pub header: bool,
}

impl InputArgs {
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            separator: self.separator.clone(),
            has_header: self.header,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// fit 子命令
// ─────────────────────────────────────────────────────────────

/// fit 子命令参数
#[derive(Args, Debug)]
pub struct FitArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Polynomial degrees for a, b, c, alpha, beta, gamma
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = [2, 2, 1, 1, 1, 1],
        allow_negative_numbers = true
    )]
    pub degrees: Vec<i64>,

    /// Export fitted values, derivatives and expansion coefficients to CSV
    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    /// Evaluate the CSV export on N evenly spaced temperatures instead of the measured ones
    #[arg(long)]
    pub points: Option<usize>,

    /// Plot data and fitted curves (PNG, or SVG by extension)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Figure width in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 1500)]
    pub width: u32,

    /// Figure height in pixels (for PNG) or points (for SVG)
    #[arg(long, default_value_t = 900)]
    pub height: u32,
}

// ─────────────────────────────────────────────────────────────
// expand 子命令
// ─────────────────────────────────────────────────────────────

/// expand 子命令参数
#[derive(Args, Debug)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub input: InputArgs,
}
