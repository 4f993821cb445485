//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `fit`: 拟合单个数据文件并输出导数
//! - `expand`: 显示按晶系展开后的晶胞数据
//! - `batch`: 批量拟合目录中的数据文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: fit, batch

pub mod batch;
pub mod fit;

use clap::{Parser, Subcommand};

/// cellfit - 晶胞参数温度依赖拟合工具
#[derive(Parser)]
#[command(name = "cellfit")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Fit temperature-dependent unit-cell parameters and their derivatives", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Fit polynomials to every lattice parameter and report dp/dT
    Fit(fit::FitArgs),

    /// Show the unit-cell table expanded by crystal-system symmetry
    Expand(fit::ExpandArgs),

    /// Fit every matching data file in a directory
    Batch(batch::BatchArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Symmetry;

    #[test]
    fn test_parse_fit_command() {
        let cli = Cli::try_parse_from([
            "cellfit", "fit", "data.csv", "-s", "hexagonal", "-d", "3,3,2,1,1,1", "--header",
        ])
        .unwrap();
        match cli.command {
            Commands::Fit(args) => {
                assert_eq!(args.input.symmetry, Symmetry::Hexagonal);
                assert_eq!(args.degrees, vec![3, 3, 2, 1, 1, 1]);
                assert!(args.input.header);
                assert_eq!(args.input.separator, ";");
            }
            _ => panic!("expected fit command"),
        }
    }

    #[test]
    fn test_default_degrees() {
        let cli = Cli::try_parse_from(["cellfit", "fit", "data.csv", "-s", "cubic"]).unwrap();
        match cli.command {
            Commands::Fit(args) => assert_eq!(args.degrees, vec![2, 2, 1, 1, 1, 1]),
            _ => panic!("expected fit command"),
        }
    }

    #[test]
    fn test_negative_degree_reaches_validation() {
        let cli =
            Cli::try_parse_from(["cellfit", "fit", "data.csv", "-s", "cubic", "-d", "2,-1,1,1,1,1"])
                .unwrap();
        match cli.command {
            Commands::Fit(args) => assert_eq!(args.degrees[1], -1),
            _ => panic!("expected fit command"),
        }
    }

    #[test]
    fn test_unknown_symmetry_rejected() {
        assert!(Cli::try_parse_from(["cellfit", "expand", "data.csv", "-s", "trigonal"]).is_err());
    }
}
