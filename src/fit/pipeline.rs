//! # 温度导数计算流程
//!
//! 对六个晶格参数分别做多项式拟合，再对拟合多项式解析求导。
//!
//! ## 流程
//! ```text
//! UnitCellData + Degrees
//!   ├── (T, a)     -> poly_fit -> d/dT
//!   ├── (T, b)     -> poly_fit -> d/dT
//!   ├── ...              (rayon 并行)
//!   └── (T, gamma) -> poly_fit -> d/dT
//! ```
//!
//! 任一参数拟合失败则整个流程失败，不返回部分结果。
//! 多个参数同时失败时，报告规范顺序 (a, b, c, α, β, γ) 中的第一个。
//! 已知有更靠前的参数失败时，排在其后、尚未开始的拟合直接跳过；
//! 排在其前的拟合照常完成，因此报告的错误与线程调度无关。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `fit/least_squares.rs`, `models/`
//! - 使用 `rayon` 并行拟合

use super::least_squares::{poly_fit, FitResult};
use crate::error::{CellfitError, Result};
use crate::models::{Degrees, LatticeParameter, Polynomial, SampleSeries, UnitCellData};

use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 六个晶格参数随温度变化的拟合函数
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCellFunctions {
    fits: [FitResult; 6],
}

impl UnitCellFunctions {
    /// 对每个参数做多项式拟合
    pub fn fit(data: &UnitCellData, degrees: &Degrees) -> Result<Self> {
        // 目前已知的最靠前的失败参数下标
        let first_failure = AtomicUsize::new(usize::MAX);

        let results: Vec<Option<Result<FitResult>>> = LatticeParameter::ALL[..]
            .par_iter()
            .enumerate()
            .map(|(i, &param)| {
                if i > first_failure.load(Ordering::Relaxed) {
                    return None;
                }
                let result = fit_parameter(data, param, degrees.get(param));
                if result.is_err() {
                    first_failure.fetch_min(i, Ordering::Relaxed);
                }
                Some(result)
            })
            .collect();

        // 被跳过的拟合一定排在某个已记录的失败之后，按顺序收集时先遇到该失败
        let fits: Vec<FitResult> = results.into_iter().flatten().collect::<Result<_>>()?;
        let fits: [FitResult; 6] = fits
            .try_into()
            .map_err(|_| CellfitError::Other("expected six lattice fits".to_string()))?;

        Ok(UnitCellFunctions { fits })
    }

    pub fn get(&self, param: LatticeParameter) -> &FitResult {
        &self.fits[param.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (LatticeParameter, &FitResult)> {
        LatticeParameter::ALL.into_iter().zip(self.fits.iter())
    }

    /// 在温度 T 处的六个拟合值（角度为弧度）
    pub fn evaluate(&self, t: f64) -> [f64; 6] {
        std::array::from_fn(|i| self.fits[i].polynomial.evaluate(t))
    }
}

impl fmt::Display for UnitCellFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .iter()
            .map(|(param, fit)| format!("{}: {}", param.label(), fit))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// 六个拟合函数对温度的导数
#[derive(Debug, Clone, PartialEq)]
pub struct Derivatives {
    curves: [Polynomial; 6],
}

impl Derivatives {
    /// 对拟合多项式逐个求导
    pub fn from_functions(functions: &UnitCellFunctions) -> Self {
        Derivatives {
            curves: std::array::from_fn(|i| functions.fits[i].polynomial.derivative()),
        }
    }

    pub fn get(&self, param: LatticeParameter) -> &Polynomial {
        &self.curves[param.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (LatticeParameter, &Polynomial)> {
        LatticeParameter::ALL.into_iter().zip(self.curves.iter())
    }

    /// 在温度 T 处的六个导数值
    pub fn evaluate(&self, t: f64) -> [f64; 6] {
        std::array::from_fn(|i| self.curves[i].evaluate(t))
    }
}

impl fmt::Display for Derivatives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .iter()
            .map(|(param, curve)| format!("d{}/dT: {}", param.label(), curve))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// 拟合并求导，只返回导数
pub fn derive(data: &UnitCellData, degrees: &Degrees) -> Result<Derivatives> {
    let functions = UnitCellFunctions::fit(data, degrees)?;
    Ok(Derivatives::from_functions(&functions))
}

/// 线膨胀系数 (1/p)·dp/dT
pub fn linear_expansion(
    functions: &UnitCellFunctions,
    derivatives: &Derivatives,
    param: LatticeParameter,
    t: f64,
) -> f64 {
    derivatives.get(param).evaluate(t) / functions.get(param).polynomial.evaluate(t)
}

fn fit_parameter(data: &UnitCellData, param: LatticeParameter, degree: usize) -> Result<FitResult> {
    let series = SampleSeries::new(data.temperatures().to_vec(), data.series(param).to_vec())?;
    poly_fit(&series, degree).map_err(|e| CellfitError::ParameterFit {
        parameter: param.label().to_string(),
        cause: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Symmetry;

    fn orthorhombic() -> UnitCellData {
        let t: Vec<f64> = (0..6).map(|i| 100.0 + 50.0 * i as f64).collect();
        let a: Vec<f64> = t.iter().map(|t| 5.4 + 1e-5 * t + 2e-9 * t * t).collect();
        let b: Vec<f64> = t.iter().map(|t| 5.5 + 2e-5 * t).collect();
        let c: Vec<f64> = t.iter().map(|t| 25.0 + 1e-4 * t).collect();
        UnitCellData::expand(Symmetry::Orthorhombic, &t, &a, &[&b, &c]).unwrap()
    }

    #[test]
    fn test_pipeline_recovers_derivatives() {
        let data = orthorhombic();
        let degrees = Degrees::new(&[2, 2, 1, 1, 1, 1]).unwrap();
        let functions = UnitCellFunctions::fit(&data, &degrees).unwrap();
        let derivatives = Derivatives::from_functions(&functions);

        let t = 250.0;
        let d = derivatives.evaluate(t);
        assert!((d[0] - (1e-5 + 4e-9 * t)).abs() < 1e-10);
        assert!((d[1] - 2e-5).abs() < 1e-10);
        assert!((d[2] - 1e-4).abs() < 1e-10);
        // 固定 90° 的角度，导数为 0
        for v in &d[3..] {
            assert!(v.abs() < 1e-12);
        }

        for (_, fit) in functions.iter() {
            assert!((fit.r_squared - 1.0).abs() < 1e-9);
        }
        assert_eq!(derivatives.get(LatticeParameter::C).coeffs().len(), 1);
    }

    #[test]
    fn test_derive_matches_two_step_pipeline() {
        let data = orthorhombic();
        let degrees = Degrees::new(&[2, 2, 1, 1, 1, 1]).unwrap();
        let direct = derive(&data, &degrees).unwrap();
        let functions = UnitCellFunctions::fit(&data, &degrees).unwrap();
        assert_eq!(direct, Derivatives::from_functions(&functions));
    }

    #[test]
    fn test_first_failing_parameter_is_reported() {
        let data = orthorhombic();
        // 6 个点：b 需要 10 个点，gamma 超出上限
        let degrees = Degrees::new(&[1, 9, 1, 1, 1, 12]).unwrap();
        let err = UnitCellFunctions::fit(&data, &degrees).unwrap_err();
        match err {
            CellfitError::ParameterFit { parameter, cause } => {
                assert_eq!(parameter, "b");
                assert!(matches!(*cause, CellfitError::NotEnoughPoints { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(derive(&data, &degrees).is_err());
    }

    #[test]
    fn test_all_parameters_failing_reports_a() {
        let data = orthorhombic();
        // 6 个点，阶数 9 对每个参数都需要 10 个点
        let degrees = Degrees::new(&[9, 9, 9, 9, 9, 9]).unwrap();
        for _ in 0..20 {
            match UnitCellFunctions::fit(&data, &degrees) {
                Err(CellfitError::ParameterFit { parameter, .. }) => assert_eq!(parameter, "a"),
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_linear_expansion() {
        let data = orthorhombic();
        let degrees = Degrees::new(&[2, 1, 1, 1, 1, 1]).unwrap();
        let functions = UnitCellFunctions::fit(&data, &degrees).unwrap();
        let derivatives = Derivatives::from_functions(&functions);

        let t = 300.0;
        let expected = 2e-5 / (5.5 + 2e-5 * t);
        let got = linear_expansion(&functions, &derivatives, LatticeParameter::B, t);
        assert!((got - expected).abs() < 1e-12);
    }
}
