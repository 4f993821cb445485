//! # cellfit - 晶胞参数温度依赖拟合工具
//!
//! 对变温衍射得到的晶胞参数 (a, b, c, α, β, γ) 做多项式最小二乘拟合，
//! 解析求出各参数对温度的导数，用于热膨胀分析。
//!
//! ## 子命令
//! - `fit`    - 拟合单个数据文件，打印拟合函数与导数，可导出 CSV 和绘图
//! - `expand` - 按晶系展开数据并打印完整晶胞表
//! - `batch`  - 并行拟合目录中的全部数据文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (数据表读取)
//!   │     ├── fit/       (最小二乘拟合与求导)
//!   │     ├── report/    (表格、CSV、绘图)
//!   │     ├── batch/     (批量处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod fit;
mod models;
mod parsers;
mod report;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error_chain(&e);
        std::process::exit(1);
    }
}
