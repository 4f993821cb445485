//! # 多项式最小二乘拟合
//!
//! 用 Vandermonde 设计矩阵的 QR 分解求解多项式系数，并计算决定系数 R²。
//!
//! ## 算法
//! 1. 构造 n × (degree+1) 矩阵 `M[i][j] = x_i^j`
//! 2. QR 分解 `M = Q·R`
//! 3. 回代求解 `R·c = Qᵀ·y`
//! 4. 在每个 `x_i` 处求值，计算 `R² = 1 - SS_res / SS_tot`
//!
//! 不使用正规方程 `MᵀM·c = Mᵀy`：其条件数是 M 的平方，温度量级约 10³ 时高阶拟合误差明显放大。
//!
//! ## 依赖关系
//! - 被 `fit/pipeline.rs` 使用
//! - 使用 `models/series.rs`, `models/polynomial.rs`
//! - 使用 `nalgebra` 进行 QR 分解

use crate::error::{CellfitError, Result};
use crate::models::{Polynomial, SampleSeries};

use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use std::fmt;

/// 允许的最低阶数
pub const LOWER_DEGREE: usize = 1;

/// 允许的最高阶数（防止小数据集上的病态高阶拟合）
pub const UPPER_DEGREE: usize = 9;

/// R 对角元相对阈值，低于此值视为秩亏
const RANK_TOL: f64 = 1e-12;

/// 常数序列时残差可忽略的相对阈值
const CONSTANT_FIT_TOL: f64 = 1e-9;

/// 拟合结果：多项式及其 R²
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    pub polynomial: Polynomial,
    pub r_squared: f64,
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(x) = {} with R^2={:.5}", self.polynomial, self.r_squared)
    }
}

/// 以给定阶数拟合数据序列
pub fn poly_fit(series: &SampleSeries, degree: usize) -> Result<FitResult> {
    if !(LOWER_DEGREE..=UPPER_DEGREE).contains(&degree) {
        return Err(CellfitError::DegreeOutOfRange {
            degree,
            min: LOWER_DEGREE,
            max: UPPER_DEGREE,
        });
    }
    if series.len() < degree + 1 {
        return Err(CellfitError::NotEnoughPoints {
            degree,
            required: degree + 1,
            found: series.len(),
        });
    }

    let polynomial = qr_fit(series.x(), series.y(), degree)?;

    let predicted: Vec<f64> = series.x().iter().map(|&x| polynomial.evaluate(x)).collect();
    let r_squared = r_squared(series.y(), &predicted);

    Ok(FitResult {
        polynomial,
        r_squared,
    })
}

/// Vandermonde 矩阵
fn vandermonde(x: &[f64], degree: usize) -> DMatrix<f64> {
    DMatrix::from_fn(x.len(), degree + 1, |i, j| x[i].powi(j as i32))
}

/// QR 分解求解超定线性方程组
fn qr_fit(x: &[f64], y: &[f64], degree: usize) -> Result<Polynomial> {
    let m = vandermonde(x, degree);
    let rhs = DVector::from_column_slice(y);

    // n >= degree+1，瘦 QR：q 为 n×p，r 为 p×p
    let qr = m.qr();
    let q = qr.q();
    let r = qr.r();

    let diag_max = r.diagonal().iter().map(|v| v.abs()).fold(0.0, f64::max);
    let tol = RANK_TOL * diag_max.max(f64::MIN_POSITIVE);
    if r.diagonal().iter().any(|v| v.abs() <= tol) {
        return Err(CellfitError::SingularSystem);
    }

    let qty = q.transpose() * rhs;
    let coeffs = r
        .solve_upper_triangular(&qty)
        .ok_or(CellfitError::SingularSystem)?;

    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(CellfitError::SingularSystem);
    }

    Ok(Polynomial::new(coeffs.iter().copied().collect()))
}

/// 决定系数 R² = 1 - SS_res / SS_tot
///
/// 因变量为常数时 SS_tot = 0：残差可忽略则为 1，否则为 0。
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len();
    if n == 0 {
        return 0.0;
    }
    let mean = actual.iter().sum::<f64>() / n as f64;

    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(y, y_hat)| (y - y_hat).powi(2))
        .sum();
    let ss_tot: f64 = actual.iter().map(|y| (y - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        let scale = actual.iter().map(|y| y.abs()).fold(1.0, f64::max);
        let tol = CONSTANT_FIT_TOL * scale * (n as f64).sqrt();
        return if ss_res.sqrt() <= tol { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(x: &[f64], y: &[f64]) -> SampleSeries {
        SampleSeries::new(x.to_vec(), y.to_vec()).unwrap()
    }

    #[test]
    fn test_linear_exact_fit() {
        let fit = poly_fit(&series(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]), 1).unwrap();
        let c = fit.polynomial.coeffs();
        assert_eq!(c.len(), 2);
        assert!((c[0] - 1.0).abs() < 1e-9);
        assert!((c[1] - 2.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);

        let d = fit.polynomial.derivative();
        assert_eq!(d.coeffs().len(), 1);
        assert!((d.coeffs()[0] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolation_when_degree_is_n_minus_one() {
        let x = [1.0, 2.0, 3.5, 4.0, 6.0];
        let y = [2.0, -1.0, 0.5, 3.0, 1.0];
        let fit = poly_fit(&series(&x, &y), 4).unwrap();
        for (xi, yi) in x.iter().zip(&y) {
            assert!((fit.polynomial.evaluate(*xi) - yi).abs() < 1e-8);
        }
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_quadratic_on_temperature_scale() {
        // a(T) = 3.9 + 2e-5 T + 1e-8 T²，温度量级 10²~10³
        let x: Vec<f64> = (0..12).map(|i| 100.0 + 75.0 * i as f64).collect();
        let y: Vec<f64> = x.iter().map(|t| 3.9 + 2e-5 * t + 1e-8 * t * t).collect();
        let fit = poly_fit(&series(&x, &y), 2).unwrap();
        let c = fit.polynomial.coeffs();
        assert!((c[0] - 3.9).abs() < 1e-8);
        assert!((c[1] - 2e-5).abs() < 1e-10);
        assert!((c[2] - 1e-8).abs() < 1e-13);
    }

    #[test]
    fn test_degree_out_of_range() {
        let s = series(&[0.0; 12], &[0.0; 12]);
        assert!(matches!(
            poly_fit(&s, 0),
            Err(CellfitError::DegreeOutOfRange { degree: 0, .. })
        ));
        assert!(matches!(
            poly_fit(&s, 10),
            Err(CellfitError::DegreeOutOfRange { degree: 10, .. })
        ));
    }

    #[test]
    fn test_not_enough_points() {
        let s = series(&[0.0, 1.0, 2.0], &[1.0, 2.0, 0.0]);
        assert!(matches!(
            poly_fit(&s, 3),
            Err(CellfitError::NotEnoughPoints {
                required: 4,
                found: 3,
                ..
            })
        ));

        let empty = series(&[], &[]);
        assert!(poly_fit(&empty, 1).is_err());
    }

    #[test]
    fn test_success_bounds_for_every_degree() {
        let x: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        let s = series(&x, &y);
        for degree in 1..=9 {
            assert_eq!(poly_fit(&s, degree).is_ok(), degree + 1 <= 6, "degree {degree}");
        }
    }

    #[test]
    fn test_repeated_x_is_singular() {
        let s = series(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]);
        assert!(matches!(poly_fit(&s, 1), Err(CellfitError::SingularSystem)));
    }

    #[test]
    fn test_constant_series_r_squared() {
        let fit = poly_fit(&series(&[0.0, 1.0, 2.0, 3.0], &[1.5; 4]), 2).unwrap();
        assert_eq!(fit.r_squared, 1.0);
        assert!(r_squared(&[2.0, 2.0], &[2.0, 3.0]) == 0.0);
    }

    #[test]
    fn test_r_squared_is_reproducible() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [0.1, 0.9, 4.2, 8.8, 16.1, 25.3];
        let fit = poly_fit(&series(&x, &y), 1).unwrap();
        let predicted: Vec<f64> = x.iter().map(|&v| fit.polynomial.evaluate(v)).collect();
        assert_eq!(r_squared(&y, &predicted), fit.r_squared);
        assert!(fit.r_squared < 1.0);
    }

    #[test]
    fn test_fit_result_display() {
        let fit = FitResult {
            polynomial: Polynomial::new(vec![1.0, 2.0]),
            r_squared: 1.0,
        };
        assert_eq!(fit.to_string(), "f(x) = 2.0000e0*x + 1.00000 with R^2=1.00000");
    }
}
