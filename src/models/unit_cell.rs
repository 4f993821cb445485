//! # 变温晶胞数据
//!
//! 将最小独立参数集按晶系规则展开为完整的六参数序列，并把角度由度转换为弧度。
//!
//! ## 约束
//! - 七个序列 (T, a, b, c, α, β, γ) 长度相同
//! - 角度以弧度存储，仅转换一次
//! - 派生序列（如立方晶系的 b = a）为独立拷贝
//!
//! ## 依赖关系
//! - 被 `parsers/table.rs`, `fit/pipeline.rs` 和 `commands/` 使用
//! - 使用 `models/symmetry.rs`, `models/lattice.rs`

use super::lattice::LatticeParameter;
use super::symmetry::{SeriesSource, Symmetry};
use crate::error::{CellfitError, Result};

use std::f64::consts::PI;
use std::fmt;

/// 展开后的变温晶胞数据
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCellData {
    symmetry: Symmetry,
    temperatures: Vec<f64>,
    /// a, b, c（长度）与 alpha, beta, gamma（弧度），按规范顺序
    params: [Vec<f64>; 6],
}

impl UnitCellData {
    /// 按晶系展开
    ///
    /// `extras` 的顺序与 [`Symmetry::required_parameters`] 一致，角度单位为度。
    pub fn expand(
        symmetry: Symmetry,
        temperatures: &[f64],
        a: &[f64],
        extras: &[&[f64]],
    ) -> Result<Self> {
        let rule = symmetry.rule();
        if extras.len() != rule.required.len() {
            let names: Vec<&str> = rule.required.iter().map(|p| p.label()).collect();
            return Err(CellfitError::ParameterCount {
                symmetry: symmetry.to_string(),
                expected: rule.required.len(),
                found: extras.len(),
                names: if names.is_empty() {
                    "none".to_string()
                } else {
                    names.join(", ")
                },
            });
        }

        let n = temperatures.len();
        let mut params: [Vec<f64>; 6] = Default::default();
        params[LatticeParameter::A.index()] = a.to_vec();

        for (param, source) in LatticeParameter::ALL[1..].iter().zip(rule.derived.iter()) {
            let series = match *source {
                SeriesSource::Given(i) => extras[i].to_vec(),
                SeriesSource::SameAs(other) => params[other.index()].clone(),
                SeriesSource::FixedAngle(deg) => vec![deg; n],
            };
            params[param.index()] = series;
        }

        for param in LatticeParameter::ALL {
            let found = params[param.index()].len();
            if found != n {
                return Err(CellfitError::DimensionMismatch {
                    parameter: param.label().to_string(),
                    expected: n,
                    found,
                });
            }
        }

        for param in LatticeParameter::ALL.into_iter().filter(|p| p.is_angle()) {
            params[param.index()] = degrees_to_radians(&params[param.index()]);
        }

        Ok(UnitCellData {
            symmetry,
            temperatures: temperatures.to_vec(),
            params,
        })
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// 某个参数的序列（角度为弧度）
    pub fn series(&self, param: LatticeParameter) -> &[f64] {
        &self.params[param.index()]
    }

    /// 温度点个数
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    /// 温度范围 (min, max)；空数据返回 None
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        if self.temperatures.is_empty() {
            return None;
        }
        let min = self
            .temperatures
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let max = self
            .temperatures
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

impl fmt::Display for UnitCellData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symmetry: {}", self.symmetry)?;
        write!(f, "T: {:?}", self.temperatures)?;
        for param in LatticeParameter::ALL {
            write!(f, "\n{}: {:?}", param.label(), self.series(param))?;
        }
        Ok(())
    }
}

/// 角度转弧度（乘以 π/180）
fn degrees_to_radians(data: &[f64]) -> Vec<f64> {
    data.iter().map(|d| d * (PI / 180.0)).collect()
}
