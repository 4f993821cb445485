//! # 统一错误处理模块
//!
//! 定义 cellfit 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 形状错误：序列长度不一致、对称性参数个数不符、阶数表不是 6 项
//! - 范围错误：拟合阶数超出 [1, 9]、样本点不足
//! - 数值错误：设计矩阵秩亏
//! - I/O 与解析错误：文件读取、CSV、数值解析
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// cellfit 统一错误类型
#[derive(Error, Debug)]
pub enum CellfitError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {path} (row {row}): invalid number '{token}'")]
    NumberParse {
        path: String,
        row: usize,
        token: String,
    },

    #[error("Empty dataset: {0}")]
    EmptyData(String),

    // ─────────────────────────────────────────────────────────────
    // 形状错误
    // ─────────────────────────────────────────────────────────────
    #[error("x and y lengths are mismatched: x has {x_len} points, y has {y_len}")]
    SeriesLengthMismatch { x_len: usize, y_len: usize },

    #[error("{symmetry} requires {expected} additional series ({names}), got {found}")]
    ParameterCount {
        symmetry: String,
        expected: usize,
        found: usize,
        names: String,
    },

    #[error("Series '{parameter}' has {found} points, while it should have {expected}")]
    DimensionMismatch {
        parameter: String,
        expected: usize,
        found: usize,
    },

    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("There should be 6 polynomial degrees, got {0}")]
    DegreeCount(usize),

    #[error("Polynomial degree for {parameter} must be >= 1, got {value}")]
    DegreeNotPositive { parameter: String, value: i64 },

    // ─────────────────────────────────────────────────────────────
    // 拟合错误
    // ─────────────────────────────────────────────────────────────
    #[error("Polynomial degree should lie inside [{min}:{max}], got {degree}")]
    DegreeOutOfRange { degree: usize, min: usize, max: usize },

    #[error("Need at least {required} points for degree {degree} polynomial, got {found}")]
    NotEnoughPoints {
        degree: usize,
        required: usize,
        found: usize,
    },

    #[error("Design matrix is rank deficient, least-squares system cannot be solved")]
    SingularSystem,

    #[error("Fit of '{parameter}' failed: {cause}")]
    ParameterFit {
        parameter: String,
        cause: Box<CellfitError>,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, CellfitError>;
