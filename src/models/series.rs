//! # 二维数据序列
//!
//! 自变量 x 与因变量 y 的等长序列对，是最小二乘拟合的输入。
//!
//! ## 依赖关系
//! - 被 `fit/` 使用
//! - 使用 `error.rs`

use crate::error::{CellfitError, Result};

use std::fmt;

/// 等长的 (x, y) 数据序列，构造后不可变
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleSeries {
    /// 创建序列，x 与 y 长度不一致时返回错误
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(CellfitError::SeriesLengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(SampleSeries { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// 数据点个数
    pub fn len(&self) -> usize {
        self.x.len()
    }
}

impl fmt::Display for SampleSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .x
            .iter()
            .zip(&self.y)
            .enumerate()
            .map(|(i, (x, y))| format!("{}: x={}, y={}", i + 1, x, y))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_length_mismatch() {
        let err = SampleSeries::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            CellfitError::SeriesLengthMismatch { x_len: 2, y_len: 1 }
        ));
    }

    #[test]
    fn test_empty_series_is_allowed() {
        let series = SampleSeries::new(vec![], vec![]).unwrap();
        assert_eq!(series.len(), 0);
    }

    #[test]
    fn test_series_display() {
        let series = SampleSeries::new(vec![1.0, 2.0], vec![3.0, 4.5]).unwrap();
        assert_eq!(series.to_string(), "1: x=1, y=3\n2: x=2, y=4.5");
    }
}
