//! # expand 子命令实现
//!
//! 读取数据文件，按晶系展开为完整的六参数表并打印（角度以度显示）。
//!
//! ## 依赖关系
//! - 使用 `cli/fit.rs` 定义的 ExpandArgs
//! - 使用 `parsers/table.rs`, `report/table.rs`

use crate::cli::fit::ExpandArgs;
use crate::error::Result;
use crate::parsers;
use crate::report::table;
use crate::utils::output;

/// 执行 expand 命令
pub fn execute(args: ExpandArgs) -> Result<()> {
    output::print_header("Unit-Cell Expansion");

    let data = parsers::read_unit_cell_file(
        &args.input.file,
        args.input.symmetry,
        &args.input.table_options(),
    )?;

    output::print_info(&format!(
        "{} temperature points from '{}' ({}: {} independent series)",
        data.len(),
        args.input.file.display(),
        data.symmetry(),
        data.symmetry().required_parameters().len()
    ));

    println!("{}", table::unit_cell_table(&data));

    Ok(())
}
