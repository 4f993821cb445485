//! # fit 子命令实现
//!
//! 读取单个数据文件，拟合六个晶格参数并给出温度导数。
//!
//! ## 流程
//! 1. 读取并按晶系展开数据
//! 2. 校验多项式阶数
//! 3. 拟合 + 求导，打印表格
//! 4. 可选：导出 CSV、绘图
//!
//! ## 依赖关系
//! - 使用 `cli/fit.rs` 定义的 FitArgs
//! - 使用 `parsers/`, `fit/`, `report/`

use crate::cli::fit::FitArgs;
use crate::error::{CellfitError, Result};
use crate::fit::{Derivatives, UnitCellFunctions};
use crate::models::Degrees;
use crate::parsers;
use crate::report::{self, plot, table};
use crate::utils::output;

/// 执行 fit 命令
pub fn execute(args: FitArgs) -> Result<()> {
    output::print_header("Unit-Cell Thermal Fit");

    let data = parsers::read_unit_cell_file(
        &args.input.file,
        args.input.symmetry,
        &args.input.table_options(),
    )?;
    let (t_min, t_max) = data
        .temperature_range()
        .ok_or_else(|| CellfitError::EmptyData(args.input.file.display().to_string()))?;

    output::print_info(&format!(
        "Loaded {} points from '{}' ({}), T = {} .. {}",
        data.len(),
        args.input.file.display(),
        data.symmetry(),
        t_min,
        t_max
    ));

    let degrees = Degrees::new(&args.degrees)?;
    output::print_info(&format!("Degrees: {}", degrees));

    let functions = UnitCellFunctions::fit(&data, &degrees)?;
    let derivatives = Derivatives::from_functions(&functions);

    output::print_success("Fitted functions:");
    println!("{}", table::functions_table(&functions, &degrees));
    output::print_success("Derivatives:");
    println!("{}", table::derivatives_table(&derivatives, (t_min, t_max)));

    // 导出 CSV
    if let Some(ref csv_path) = args.output_csv {
        let temperatures = match args.points {
            Some(n) => report::temperature_grid(t_min, t_max, n),
            None => data.temperatures().to_vec(),
        };
        let rows = report::thermal_rows(&functions, &derivatives, &temperatures);
        report::write_csv(&rows, csv_path)?;
        output::print_success(&format!(
            "Wrote {} rows to '{}'",
            rows.len(),
            csv_path.display()
        ));
    }

    // 绘图
    if let Some(ref plot_path) = args.plot {
        let title = args
            .input
            .file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("cellfit");
        plot::generate_fit_plot(&data, &functions, plot_path, title, args.width, args.height)?;
        output::print_success(&format!("Saved plot to '{}'", plot_path.display()));
    }

    output::print_done("Fit complete");
    Ok(())
}
