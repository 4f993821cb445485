//! # 多项式
//!
//! 升幂系数表示的一元多项式，支持 Horner 求值和解析求导。
//!
//! ## 依赖关系
//! - 被 `fit/` 和 `report/` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::fmt;

/// 多项式，`coeffs[i]` 为 xⁱ 的系数；空系数表示零函数
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<f64>) -> Self {
        Polynomial { coeffs }
    }

    #[cfg(test)]
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// 在 x 处求值（Horner 法）
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coeffs
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }

    /// 解析求导，返回新多项式
    pub fn derivative(&self) -> Polynomial {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| i as f64 * c)
            .collect();
        Polynomial { coeffs }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        for (i, &coeff) in self.coeffs.iter().enumerate().rev() {
            if coeff == 0.0 {
                continue;
            }

            let abs = coeff.abs();
            let sign = match (coeff < 0.0, out.is_empty()) {
                (true, true) => "-",
                (true, false) => " - ",
                (false, true) => "",
                (false, false) => " + ",
            };

            let term = match i {
                0 => format!("{:.5}", abs),
                1 if abs == 1.0 => "x".to_string(),
                1 => format!("{:.4e}*x", abs),
                _ if abs == 1.0 => format!("x^{}", i),
                _ => format!("{:.4e}*x^{}", abs, i),
            };

            out.push_str(sign);
            out.push_str(&term);
        }

        if out.is_empty() {
            write!(f, "0")
        } else {
            write!(f, "{}", out)
        }
    }
}
