//! # 晶格参数与拟合阶数
//!
//! 定义六个晶格参数 (a, b, c, α, β, γ) 的统一索引，以及每个参数的多项式阶数配置。
//!
//! ## 依赖关系
//! - 被 `models/unit_cell.rs`, `fit/` 和 `report/` 使用
//! - 使用 `error.rs`

use crate::error::{CellfitError, Result};

use serde::{Deserialize, Serialize};
use std::fmt;

/// 晶格参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LatticeParameter {
    A,
    B,
    C,
    Alpha,
    Beta,
    Gamma,
}

impl LatticeParameter {
    /// 规范顺序
    pub const ALL: [LatticeParameter; 6] = [
        LatticeParameter::A,
        LatticeParameter::B,
        LatticeParameter::C,
        LatticeParameter::Alpha,
        LatticeParameter::Beta,
        LatticeParameter::Gamma,
    ];

    /// 在规范顺序中的位置
    pub fn index(self) -> usize {
        match self {
            LatticeParameter::A => 0,
            LatticeParameter::B => 1,
            LatticeParameter::C => 2,
            LatticeParameter::Alpha => 3,
            LatticeParameter::Beta => 4,
            LatticeParameter::Gamma => 5,
        }
    }

    /// ASCII 名称（用于 CSV 列名和错误信息）
    pub fn label(self) -> &'static str {
        match self {
            LatticeParameter::A => "a",
            LatticeParameter::B => "b",
            LatticeParameter::C => "c",
            LatticeParameter::Alpha => "alpha",
            LatticeParameter::Beta => "beta",
            LatticeParameter::Gamma => "gamma",
        }
    }

    /// 希腊字母符号（用于终端表格和图表）
    pub fn symbol(self) -> &'static str {
        match self {
            LatticeParameter::A => "a",
            LatticeParameter::B => "b",
            LatticeParameter::C => "c",
            LatticeParameter::Alpha => "α",
            LatticeParameter::Beta => "β",
            LatticeParameter::Gamma => "γ",
        }
    }

    /// 是否为角度参数
    pub fn is_angle(self) -> bool {
        matches!(
            self,
            LatticeParameter::Alpha | LatticeParameter::Beta | LatticeParameter::Gamma
        )
    }
}

impl fmt::Display for LatticeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 拟合阶数下限
pub const MIN_DEGREE: usize = 1;

/// 每个晶格参数的多项式阶数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degrees {
    values: [usize; 6],
}

impl Degrees {
    /// 从 6 个整数创建，顺序为 a, b, c, alpha, beta, gamma
    ///
    /// 个数不为 6 或任一值小于 1 时返回错误。上限 9 由拟合器检查。
    pub fn new(values: &[i64]) -> Result<Self> {
        if values.len() != LatticeParameter::ALL.len() {
            return Err(CellfitError::DegreeCount(values.len()));
        }

        let mut out = [0usize; 6];
        for (param, &value) in LatticeParameter::ALL.iter().zip(values) {
            if value < MIN_DEGREE as i64 {
                return Err(CellfitError::DegreeNotPositive {
                    parameter: param.label().to_string(),
                    value,
                });
            }
            out[param.index()] = value as usize;
        }

        Ok(Degrees { values: out })
    }

    /// 获取某个参数的阶数
    pub fn get(&self, param: LatticeParameter) -> usize {
        self.values[param.index()]
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = LatticeParameter::ALL
            .iter()
            .map(|p| format!("{}={}", p.symbol(), self.get(*p)))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
