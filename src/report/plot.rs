//! # 拟合曲线图
//!
//! 使用 `plotters` 绘制 2×3 子图：每个晶格参数的实验点与拟合曲线。角度以度显示。
//!
//! ## 依赖关系
//! - 被 `commands/fit.rs` 调用
//! - 使用 `fit/pipeline.rs` 与 `models/unit_cell.rs`
//! - 使用 `plotters` 渲染 PNG / SVG

use crate::error::{CellfitError, Result};
use crate::fit::UnitCellFunctions;
use crate::models::{LatticeParameter, UnitCellData};
use crate::report::export::temperature_grid;

use plotters::prelude::*;
use std::path::Path;

/// 每条拟合曲线的采样点数
const CURVE_POINTS: usize = 200;

/// 生成拟合图，扩展名为 `.svg` 时输出 SVG，否则输出 PNG
pub fn generate_fit_plot(
    data: &UnitCellData,
    functions: &UnitCellFunctions,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
) -> Result<()> {
    let use_svg = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_fit_grid(&root, data, functions, title)?;
        root.present()
            .map_err(|e| CellfitError::Other(format!("{:?}", e)))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_fit_grid(&root, data, functions, title)?;
        root.present()
            .map_err(|e| CellfitError::Other(format!("{:?}", e)))?;
    }
    Ok(())
}

fn draw_fit_grid<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    data: &UnitCellData,
    functions: &UnitCellFunctions,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| CellfitError::Other(format!("{:?}", e)))?;

    let (t_min, t_max) = data
        .temperature_range()
        .ok_or_else(|| CellfitError::EmptyData("nothing to plot".to_string()))?;
    let (t_lo, t_hi) = padded_range(t_min, t_max);

    let root = root
        .titled(title, ("sans-serif", 28))
        .map_err(|e| CellfitError::Other(format!("{:?}", e)))?;
    let panels = root.split_evenly((2, 3));

    let grid = temperature_grid(t_min, t_max, CURVE_POINTS);

    for (panel, param) in panels.iter().zip(LatticeParameter::ALL) {
        let to_display = |v: f64| if param.is_angle() { v.to_degrees() } else { v };
        let polynomial = &functions.get(param).polynomial;

        let points: Vec<(f64, f64)> = data
            .temperatures()
            .iter()
            .zip(data.series(param))
            .map(|(&t, &v)| (t, to_display(v)))
            .collect();
        let curve: Vec<(f64, f64)> = grid
            .iter()
            .map(|&t| (t, to_display(polynomial.evaluate(t))))
            .collect();

        let (y_min, y_max) = points
            .iter()
            .chain(curve.iter())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
                (lo.min(y), hi.max(y))
            });
        let (y_lo, y_hi) = padded_range(y_min, y_max);

        let y_desc = if param.is_angle() {
            format!("{} (°)", param.symbol())
        } else {
            param.symbol().to_string()
        };

        let mut chart = ChartBuilder::on(panel)
            .caption(param.symbol(), ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(70)
            .build_cartesian_2d(t_lo..t_hi, y_lo..y_hi)
            .map_err(|e| CellfitError::Other(format!("{:?}", e)))?;

        chart
            .configure_mesh()
            .x_desc("T")
            .y_desc(y_desc)
            .y_label_formatter(&|y| format!("{:.4}", y))
            .draw()
            .map_err(|e| CellfitError::Other(format!("{:?}", e)))?;

        chart
            .draw_series(LineSeries::new(curve, BLUE.stroke_width(2)))
            .map_err(|e| CellfitError::Other(format!("{:?}", e)))?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, RED.filled())),
            )
            .map_err(|e| CellfitError::Other(format!("{:?}", e)))?;
    }

    Ok(())
}

/// 为坐标轴范围留出 5% 边距；范围为零时按量级展开
fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (lo.abs() * 1e-3).max(1e-3)
    };
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range(0.0, 100.0);
        assert!((lo + 5.0).abs() < 1e-12);
        assert!((hi - 105.0).abs() < 1e-12);

        let (lo, hi) = padded_range(90.0, 90.0);
        assert!(lo < 90.0 && hi > 90.0);
    }
}
