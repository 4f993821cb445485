//! # 导出逐温度结果
//!
//! 在一组温度点上计算拟合值、导数与线膨胀系数并写入 CSV。
//!
//! ## 列说明
//! - `T`
//! - 每个参数 p：`p`（拟合值）与 `dp/dT`，角度参数单位为弧度
//! - `alpha_a`, `alpha_b`, `alpha_c`：线膨胀系数 (1/L)·dL/dT
//!
//! 仅导数模式（[`DerivativeRow`]）只有 `T` 和六个 `dp/dT` 列。
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs`, `commands/batch.rs` 调用
//! - 使用 `fit/pipeline.rs`
//! - 使用 `csv` + `serde` 写入

use crate::error::{CellfitError, Result};
use crate::fit::{linear_expansion, Derivatives, UnitCellFunctions};
use crate::models::LatticeParameter;

use serde::Serialize;
use std::path::Path;

/// 单个温度点的导出记录
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ThermalRow {
    #[serde(rename = "T")]
    pub temperature: f64,
    pub a: f64,
    #[serde(rename = "da/dT")]
    pub da_dt: f64,
    pub b: f64,
    #[serde(rename = "db/dT")]
    pub db_dt: f64,
    pub c: f64,
    #[serde(rename = "dc/dT")]
    pub dc_dt: f64,
    pub alpha: f64,
    #[serde(rename = "dalpha/dT")]
    pub dalpha_dt: f64,
    pub beta: f64,
    #[serde(rename = "dbeta/dT")]
    pub dbeta_dt: f64,
    pub gamma: f64,
    #[serde(rename = "dgamma/dT")]
    pub dgamma_dt: f64,
    pub alpha_a: f64,
    pub alpha_b: f64,
    pub alpha_c: f64,
}

/// 仅含导数的导出记录
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DerivativeRow {
    #[serde(rename = "T")]
    pub temperature: f64,
    #[serde(rename = "da/dT")]
    pub da_dt: f64,
    #[serde(rename = "db/dT")]
    pub db_dt: f64,
    #[serde(rename = "dc/dT")]
    pub dc_dt: f64,
    #[serde(rename = "dalpha/dT")]
    pub dalpha_dt: f64,
    #[serde(rename = "dbeta/dT")]
    pub dbeta_dt: f64,
    #[serde(rename = "dgamma/dT")]
    pub dgamma_dt: f64,
}

/// 在给定温度点上计算导出记录
pub fn thermal_rows(
    functions: &UnitCellFunctions,
    derivatives: &Derivatives,
    temperatures: &[f64],
) -> Vec<ThermalRow> {
    temperatures
        .iter()
        .map(|&t| {
            let v = functions.evaluate(t);
            let d = derivatives.evaluate(t);
            let expansion = |p| linear_expansion(functions, derivatives, p, t);
            ThermalRow {
                temperature: t,
                a: v[0],
                da_dt: d[0],
                b: v[1],
                db_dt: d[1],
                c: v[2],
                dc_dt: d[2],
                alpha: v[3],
                dalpha_dt: d[3],
                beta: v[4],
                dbeta_dt: d[4],
                gamma: v[5],
                dgamma_dt: d[5],
                alpha_a: expansion(LatticeParameter::A),
                alpha_b: expansion(LatticeParameter::B),
                alpha_c: expansion(LatticeParameter::C),
            }
        })
        .collect()
}

/// 在给定温度点上计算导数记录
pub fn derivative_rows(derivatives: &Derivatives, temperatures: &[f64]) -> Vec<DerivativeRow> {
    temperatures
        .iter()
        .map(|&t| {
            let [da_dt, db_dt, dc_dt, dalpha_dt, dbeta_dt, dgamma_dt] = derivatives.evaluate(t);
            DerivativeRow {
                temperature: t,
                da_dt,
                db_dt,
                dc_dt,
                dalpha_dt,
                dbeta_dt,
                dgamma_dt,
            }
        })
        .collect()
}

/// 在 [t_min, t_max] 上等间距取 n 个温度点（n >= 2）
pub fn temperature_grid(t_min: f64, t_max: f64, n: usize) -> Vec<f64> {
    let n = n.max(2);
    let step = (t_max - t_min) / (n - 1) as f64;
    (0..n).map(|i| t_min + step * i as f64).collect()
}

/// 写入 CSV，表头取自记录的字段名
pub fn write_csv<T: Serialize>(rows: &[T], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(CellfitError::CsvError)?;

    for row in rows {
        wtr.serialize(row).map_err(CellfitError::CsvError)?;
    }

    wtr.flush().map_err(|e| CellfitError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Degrees, Symmetry, UnitCellData};

    fn cubic_fit() -> (UnitCellFunctions, Derivatives) {
        let t = [0.0, 1.0, 2.0];
        let data = UnitCellData::expand(Symmetry::Cubic, &t, &[1.0, 3.0, 5.0], &[]).unwrap();
        let degrees = Degrees::new(&[1, 1, 1, 1, 1, 1]).unwrap();
        let functions = UnitCellFunctions::fit(&data, &degrees).unwrap();
        let derivatives = Derivatives::from_functions(&functions);
        (functions, derivatives)
    }

    #[test]
    fn test_temperature_grid() {
        assert_eq!(temperature_grid(100.0, 300.0, 3), vec![100.0, 200.0, 300.0]);
        assert_eq!(temperature_grid(5.0, 6.0, 0), vec![5.0, 6.0]);
    }

    #[test]
    fn test_thermal_rows() {
        let (functions, derivatives) = cubic_fit();
        let rows = thermal_rows(&functions, &derivatives, &[1.0]);
        let row = &rows[0];
        assert!((row.a - 3.0).abs() < 1e-9);
        assert!((row.da_dt - 2.0).abs() < 1e-9);
        assert!((row.alpha_a - 2.0 / 3.0).abs() < 1e-9);
        assert!(row.dgamma_dt.abs() < 1e-12);
    }

    #[test]
    fn test_write_thermal_csv() {
        let (functions, derivatives) = cubic_fit();
        let rows = thermal_rows(&functions, &derivatives, &[0.0, 2.0]);
        let path = std::env::temp_dir().join(format!("cellfit_export_{}.csv", std::process::id()));
        write_csv(&rows, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let header = text.lines().next().unwrap();
        assert!(header.starts_with("T,a,da/dT,b,db/dT"));
        assert!(header.ends_with("alpha_a,alpha_b,alpha_c"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_derivative_rows() {
        let (_, derivatives) = cubic_fit();
        let rows = derivative_rows(&derivatives, &[0.0, 2.0]);
        assert_eq!(rows.len(), 2);
        assert!((rows[1].da_dt - 2.0).abs() < 1e-9);
        assert!((rows[1].dc_dt - 2.0).abs() < 1e-9);
        assert!(rows[0].dbeta_dt.abs() < 1e-12);

        let path = std::env::temp_dir().join(format!("cellfit_deriv_{}.csv", std::process::id()));
        write_csv(&rows, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(
            text.lines().next().unwrap(),
            "T,da/dT,db/dT,dc/dT,dalpha/dT,dbeta/dT,dgamma/dT"
        );
    }
}
