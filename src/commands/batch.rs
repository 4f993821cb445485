//! # batch 子命令实现
//!
//! 对目录中所有匹配的数据文件并行拟合，每个文件输出 `<stem>_derivatives.csv`。
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的 BatchArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `parsers/`, `fit/`, `report/export.rs`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::BatchArgs;
use crate::error::{CellfitError, Result};
use crate::fit::{self, Derivatives, UnitCellFunctions};
use crate::models::{Degrees, Symmetry};
use crate::parsers::{self, TableOptions};
use crate::report;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 批量处理配置
struct BatchFitConfig {
    output_dir: PathBuf,
    symmetry: Symmetry,
    degrees: Degrees,
    options: TableOptions,
    overwrite: bool,
    derivatives_only: bool,
}

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch Unit-Cell Thermal Fit");

    if !args.input.exists() {
        return Err(CellfitError::FileNotFound {
            path: args.input.display().to_string(),
        });
    }

    // 阶数对所有文件相同，提前校验一次
    let degrees = Degrees::new(&args.degrees)?;

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} data files", files.len()));
    output::print_info(&format!("Symmetry: {}, degrees: {}", args.symmetry, degrees));

    // 确保输出目录存在
    fs::create_dir_all(&args.output).map_err(|e| CellfitError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let config = BatchFitConfig {
        output_dir: args.output.clone(),
        symmetry: args.symmetry,
        degrees,
        options: args.table_options(),
        overwrite: args.overwrite,
        derivatives_only: args.derivatives_only,
    };

    // 并行处理
    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| process_batch_file(file, &config))?;

    // 打印统计
    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed ({} total)",
        result.success,
        result.skipped,
        result.failed,
        result.total()
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 处理批量模式中的单个文件
fn process_batch_file(input: &PathBuf, config: &BatchFitConfig) -> ProcessResult {
    let output_file = output_path_for(input, &config.output_dir);

    // 检查是否已存在
    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match fit_file(input, &output_file, config) {
        Ok(()) => {
            ProcessResult::Success(format!("{} -> {}", input.display(), output_file.display()))
        }
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 输出文件名：`<stem>_derivatives.csv`
fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    output_dir.join(format!("{}_derivatives.csv", stem))
}

/// 拟合单个文件并在测量温度点上导出
fn fit_file(input: &Path, output: &Path, config: &BatchFitConfig) -> Result<()> {
    let data = parsers::read_unit_cell_file(input, config.symmetry, &config.options)?;

    if config.derivatives_only {
        let derivatives = fit::derive(&data, &config.degrees)?;
        let rows = report::derivative_rows(&derivatives, data.temperatures());
        return report::write_csv(&rows, output);
    }

    let functions = UnitCellFunctions::fit(&data, &config.degrees)?;
    let derivatives = Derivatives::from_functions(&functions);
    let rows = report::thermal_rows(&functions, &derivatives, data.temperatures());
    report::write_csv(&rows, output)
}
