//! # 终端表格
//!
//! 使用 `tabled` 将拟合结果、导数和展开后的晶胞数据渲染为终端表格。
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs`, `commands/expand.rs` 调用
//! - 使用 `fit/` 和 `models/`

use crate::fit::{Derivatives, UnitCellFunctions};
use crate::models::{Degrees, LatticeParameter, UnitCellData};

use tabled::{Table, Tabled};

/// 拟合结果行
#[derive(Debug, Clone, Tabled)]
struct FitRow {
    #[tabled(rename = "Param")]
    parameter: String,
    #[tabled(rename = "Degree")]
    degree: usize,
    #[tabled(rename = "f(T)")]
    function: String,
    #[tabled(rename = "R²")]
    r_squared: String,
}

/// 导数行
#[derive(Debug, Clone, Tabled)]
struct DerivativeRow {
    #[tabled(rename = "Param")]
    parameter: String,
    #[tabled(rename = "d/dT")]
    derivative: String,
    #[tabled(rename = "at T_min")]
    at_min: String,
    #[tabled(rename = "at T_max")]
    at_max: String,
}

/// 晶胞数据行（角度以度显示）
#[derive(Debug, Clone, Tabled)]
struct CellRow {
    #[tabled(rename = "T")]
    temperature: String,
    #[tabled(rename = "a")]
    a: String,
    #[tabled(rename = "b")]
    b: String,
    #[tabled(rename = "c")]
    c: String,
    #[tabled(rename = "α (°)")]
    alpha: String,
    #[tabled(rename = "β (°)")]
    beta: String,
    #[tabled(rename = "γ (°)")]
    gamma: String,
}

/// 拟合函数表
pub fn functions_table(functions: &UnitCellFunctions, degrees: &Degrees) -> String {
    let rows: Vec<FitRow> = functions
        .iter()
        .map(|(param, fit)| FitRow {
            parameter: param.symbol().to_string(),
            degree: degrees.get(param),
            function: fit.polynomial.to_string(),
            r_squared: format!("{:.5}", fit.r_squared),
        })
        .collect();
    Table::new(&rows).to_string()
}

/// 导数表，附温度范围两端的导数值
pub fn derivatives_table(derivatives: &Derivatives, t_range: (f64, f64)) -> String {
    let (t_min, t_max) = t_range;
    let rows: Vec<DerivativeRow> = derivatives
        .iter()
        .map(|(param, curve)| DerivativeRow {
            parameter: format!("d{}/dT", param.symbol()),
            derivative: curve.to_string(),
            at_min: format!("{:.4e}", curve.evaluate(t_min)),
            at_max: format!("{:.4e}", curve.evaluate(t_max)),
        })
        .collect();
    Table::new(&rows).to_string()
}

/// 展开后的晶胞数据表
pub fn unit_cell_table(data: &UnitCellData) -> String {
    let value = |param: LatticeParameter, i: usize| {
        let v = data.series(param)[i];
        if param.is_angle() {
            format!("{:.4}", v.to_degrees())
        } else {
            format!("{:.5}", v)
        }
    };

    let rows: Vec<CellRow> = data
        .temperatures()
        .iter()
        .enumerate()
        .map(|(i, t)| CellRow {
            temperature: format!("{}", t),
            a: value(LatticeParameter::A, i),
            b: value(LatticeParameter::B, i),
            c: value(LatticeParameter::C, i),
            alpha: value(LatticeParameter::Alpha, i),
            beta: value(LatticeParameter::Beta, i),
            gamma: value(LatticeParameter::Gamma, i),
        })
        .collect();
    Table::new(&rows).to_string()
}
