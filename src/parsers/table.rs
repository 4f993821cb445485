//! # 变温晶胞数据表解析器
//!
//! 读取 CSV 数据表：每行一个温度点，列依次为 T, a 以及晶系要求的额外参数。
//!
//! ## 格式说明
//! - 记录先按逗号切分（`csv` crate，无表头，允许变长记录）
//! - 每个字段再按用户分隔符切分，空子串丢弃，所有子串展开到该行
//!
//! 因此默认分隔符 `;` 下 `100;5.1;5.2` 与 `100,5.1,5.2` 都得到 3 列。
//!
//! ```text
//! 100;5.4101;5.5200;25.010
//! 150;5.4106;5.5210;25.015
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/unit_cell.rs`
//! - 使用 `csv` 库读取记录

use crate::error::{CellfitError, Result};
use crate::models::{Symmetry, UnitCellData};

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 读取选项
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// 字段内二次切分使用的分隔符
    pub separator: String,
    /// 是否跳过第一行
    pub has_header: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            separator: ";".to_string(),
            has_header: false,
        }
    }
}

/// 从文件读取并展开为晶胞数据
pub fn read_unit_cell_file(
    path: &Path,
    symmetry: Symmetry,
    options: &TableOptions,
) -> Result<UnitCellData> {
    if !path.exists() {
        return Err(CellfitError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path).map_err(|e| CellfitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let rows = parse_rows(file, options, &path.display().to_string())?;
    rows_to_unit_cell(&rows, symmetry, &path.display().to_string())
}

/// 一行数据及其在源文件中的行号（从 1 开始）
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub line: usize,
    pub values: Vec<f64>,
}

/// 解析所有记录为浮点数行
pub fn parse_rows<R: Read>(mut reader: R, options: &TableOptions, source: &str) -> Result<Vec<TableRow>> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| CellfitError::FileReadError {
            path: source.to_string(),
            source: e,
        })?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|pos| record_line(&bytes, pos))
            .unwrap_or(i + 1 + usize::from(options.has_header));

        let mut values = Vec::new();
        for field in record.iter() {
            for token in split_field(field, &options.separator) {
                let value: f64 = token.parse().map_err(|_| CellfitError::NumberParse {
                    path: source.to_string(),
                    row: line,
                    token: token.to_string(),
                })?;
                values.push(value);
            }
        }

        // 空行不算数据点
        if !values.is_empty() {
            rows.push(TableRow { line, values });
        }
    }

    Ok(rows)
}

/// 记录实际所在行号
///
/// `csv` 在跳过空行之前记下位置，记录前的换行符需要补计。
fn record_line(bytes: &[u8], pos: &csv::Position) -> usize {
    let start = (pos.byte() as usize).min(bytes.len());
    let skipped = bytes[start..]
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .filter(|&&b| b == b'\n')
        .count();
    pos.line() as usize + skipped
}

/// 按分隔符切分字段，丢弃空子串
fn split_field<'a>(field: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    let parts: Box<dyn Iterator<Item = &'a str> + 'a> = if separator.is_empty() {
        Box::new(std::iter::once(field))
    } else {
        Box::new(field.split(separator))
    };
    parts.map(str::trim).filter(|s| !s.is_empty())
}

/// 行列转置（行 = 温度点 -> 列 = 参数序列）
pub fn pivot(rows: &[TableRow]) -> Result<Vec<Vec<f64>>> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let cols = first.values.len();

    let mut pivoted = vec![Vec::with_capacity(rows.len()); cols];
    for row in rows {
        if row.values.len() != cols {
            return Err(CellfitError::RaggedRow {
                row: row.line,
                expected: cols,
                found: row.values.len(),
            });
        }
        for (column, value) in pivoted.iter_mut().zip(&row.values) {
            column.push(*value);
        }
    }

    Ok(pivoted)
}

/// 将数据行转换为晶胞数据：第 0 列为温度，第 1 列为 a，其余为额外参数
pub fn rows_to_unit_cell(rows: &[TableRow], symmetry: Symmetry, source: &str) -> Result<UnitCellData> {
    let columns = pivot(rows)?;
    if columns.len() < 2 {
        return Err(CellfitError::EmptyData(format!(
            "{}: need at least temperature and 'a' columns, found {}",
            source,
            columns.len()
        )));
    }

    let extras: Vec<&[f64]> = columns[2..].iter().map(Vec::as_slice).collect();
    UnitCellData::expand(symmetry, &columns[0], &columns[1], &extras)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LatticeParameter;

    fn parse(text: &str, options: &TableOptions) -> Result<Vec<Vec<f64>>> {
        parse_rows(text.as_bytes(), options, "test")
            .map(|rows| rows.into_iter().map(|r| r.values).collect())
    }

    fn rows(values: Vec<Vec<f64>>) -> Vec<TableRow> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, values)| TableRow { line: i + 1, values })
            .collect()
    }

    #[test]
    fn test_semicolon_and_comma_rows() {
        let rows = parse("100;5.1;5.2\n200,5.3,5.4\n300;5.5,5.6\n", &TableOptions::default()).unwrap();
        assert_eq!(
            rows,
            vec![
                vec![100.0, 5.1, 5.2],
                vec![200.0, 5.3, 5.4],
                vec![300.0, 5.5, 5.6]
            ]
        );
    }

    #[test]
    fn test_empty_tokens_are_dropped() {
        let rows = parse("100;;5.1;\n", &TableOptions::default()).unwrap();
        assert_eq!(rows, vec![vec![100.0, 5.1]]);
    }

    #[test]
    fn test_header_is_skipped() {
        let options = TableOptions {
            separator: ";".to_string(),
            has_header: true,
        };
        let rows = parse("T;a\n100;5.1\n200;5.2\n", &options).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_invalid_number() {
        let err = parse("100;5.1\n200;abc\n", &TableOptions::default()).unwrap_err();
        match err {
            CellfitError::NumberParse { row, token, .. } => {
                assert_eq!(row, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pivot() {
        let rows = rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let cols = pivot(&rows).unwrap();
        assert_eq!(cols, vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
        assert!(pivot(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]]);
        assert!(matches!(
            pivot(&rows),
            Err(CellfitError::RaggedRow {
                row: 2,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_ragged_row_reports_file_line() {
        let options = TableOptions {
            separator: ";".to_string(),
            has_header: true,
        };
        // 表头占第 1 行，空行占第 3 行，不齐的记录位于第 5 行
        let text = "T;a;c\n100;3.9;7.8\n\n200;3.91;7.82\n300;3.92\n";
        let rows = parse_rows(text.as_bytes(), &options, "test").unwrap();
        assert_eq!(rows.iter().map(|r| r.line).collect::<Vec<_>>(), vec![2, 4, 5]);
        assert!(matches!(
            pivot(&rows),
            Err(CellfitError::RaggedRow {
                row: 5,
                expected: 3,
                found: 2
            })
        ));

        let err = parse_rows("T;a\n\n100;x\n".as_bytes(), &options, "test").unwrap_err();
        assert!(matches!(err, CellfitError::NumberParse { row: 3, .. }));

        let crlf = "100;3.9\r\n\r\n200;3.91\r\n";
        let rows = parse_rows(crlf.as_bytes(), &TableOptions::default(), "test").unwrap();
        assert_eq!(rows.iter().map(|r| r.line).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_rows_to_orthorhombic() {
        let rows = parse_rows(
            "100;5.41;5.52;25.01\n150;5.42;5.53;25.02\n200;5.43;5.54;25.03\n".as_bytes(),
            &TableOptions::default(),
            "test",
        )
        .unwrap();
        let data = rows_to_unit_cell(&rows, Symmetry::Orthorhombic, "test").unwrap();
        assert_eq!(data.temperatures(), &[100.0, 150.0, 200.0]);
        assert_eq!(data.series(LatticeParameter::C), &[25.01, 25.02, 25.03]);

        // 列数与晶系不符
        assert!(rows_to_unit_cell(&rows, Symmetry::Cubic, "test").is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let path = std::env::temp_dir().join("cellfit_missing_table_file.csv");
        let err = read_unit_cell_file(&path, Symmetry::Cubic, &TableOptions::default()).unwrap_err();
        assert!(matches!(err, CellfitError::FileNotFound { .. }));
    }

    #[test]
    fn test_read_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("cellfit_table_{}.csv", std::process::id()));
        std::fs::write(&path, "10;3.00\n20;3.01\n30;3.02\n").unwrap();
        let data = read_unit_cell_file(&path, Symmetry::Cubic, &TableOptions::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(data.len(), 3);
        assert_eq!(data.series(LatticeParameter::B), &[3.00, 3.01, 3.02]);
    }
}
