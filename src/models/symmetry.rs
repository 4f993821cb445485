//! # 晶系对称性
//!
//! 七大晶系及其晶胞参数约束。每个晶系对应一条展开规则：
//! 需要提供哪些独立参数序列，其余参数如何由已知序列或固定角度得到。
//!
//! | 晶系 | 额外参数 | b | c | α | β | γ |
//! |---|---|---|---|---|---|---|
//! | Triclinic | b, c, α, β, γ | 给定 | 给定 | 给定 | 给定 | 给定 |
//! | Monoclinic | b, c, β | 给定 | 给定 | 90° | 给定 | 90° |
//! | Rhombohedral | α | = a | = a | 给定 | = α | = α |
//! | Hexagonal | c | = a | 给定 | 90° | 90° | 120° |
//! | Orthorhombic | b, c | 给定 | 给定 | 90° | 90° | 90° |
//! | Tetragonal | c | = a | 给定 | 90° | 90° | 90° |
//! | Cubic | 无 | = a | = a | 90° | 90° | 90° |
//!
//! ## 依赖关系
//! - 被 `models/unit_cell.rs` 和 `cli/` 使用
//! - 使用 `models/lattice.rs`

use super::lattice::LatticeParameter;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 晶系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Symmetry {
    Triclinic,
    Monoclinic,
    Rhombohedral,
    Hexagonal,
    Orthorhombic,
    Tetragonal,
    Cubic,
}

/// 非 a 参数序列的来源
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesSource {
    /// 调用方提供的第 n 个额外序列
    Given(usize),
    /// 复制已确定的另一个参数序列
    SameAs(LatticeParameter),
    /// 固定角度（度）
    FixedAngle(f64),
}

/// 一个晶系的展开规则
#[derive(Debug, Clone, Copy)]
pub struct ExpansionRule {
    /// 调用方需要提供的额外序列（按顺序）
    pub required: &'static [LatticeParameter],
    /// b, c, alpha, beta, gamma 的来源
    pub derived: [SeriesSource; 5],
}

use LatticeParameter::{Alpha, A, B, Beta, C, Gamma};
use SeriesSource::{FixedAngle, Given, SameAs};

const TRICLINIC: ExpansionRule = ExpansionRule {
    required: &[B, C, Alpha, Beta, Gamma],
    derived: [Given(0), Given(1), Given(2), Given(3), Given(4)],
};

const MONOCLINIC: ExpansionRule = ExpansionRule {
    required: &[B, C, Beta],
    derived: [Given(0), Given(1), FixedAngle(90.0), Given(2), FixedAngle(90.0)],
};

const RHOMBOHEDRAL: ExpansionRule = ExpansionRule {
    required: &[Alpha],
    derived: [SameAs(A), SameAs(A), Given(0), SameAs(Alpha), SameAs(Alpha)],
};

const HEXAGONAL: ExpansionRule = ExpansionRule {
    required: &[C],
    derived: [
        SameAs(A),
        Given(0),
        FixedAngle(90.0),
        FixedAngle(90.0),
        FixedAngle(120.0),
    ],
};

const ORTHORHOMBIC: ExpansionRule = ExpansionRule {
    required: &[B, C],
    derived: [
        Given(0),
        Given(1),
        FixedAngle(90.0),
        FixedAngle(90.0),
        FixedAngle(90.0),
    ],
};

const TETRAGONAL: ExpansionRule = ExpansionRule {
    required: &[C],
    derived: [
        SameAs(A),
        Given(0),
        FixedAngle(90.0),
        FixedAngle(90.0),
        FixedAngle(90.0),
    ],
};

const CUBIC: ExpansionRule = ExpansionRule {
    required: &[],
    derived: [
        SameAs(A),
        SameAs(A),
        FixedAngle(90.0),
        FixedAngle(90.0),
        FixedAngle(90.0),
    ],
};

impl Symmetry {
    #[cfg(test)]
    pub const ALL: [Symmetry; 7] = [
        Symmetry::Triclinic,
        Symmetry::Monoclinic,
        Symmetry::Rhombohedral,
        Symmetry::Hexagonal,
        Symmetry::Orthorhombic,
        Symmetry::Tetragonal,
        Symmetry::Cubic,
    ];

    /// 展开规则
    pub fn rule(self) -> &'static ExpansionRule {
        match self {
            Symmetry::Triclinic => &TRICLINIC,
            Symmetry::Monoclinic => &MONOCLINIC,
            Symmetry::Rhombohedral => &RHOMBOHEDRAL,
            Symmetry::Hexagonal => &HEXAGONAL,
            Symmetry::Orthorhombic => &ORTHORHOMBIC,
            Symmetry::Tetragonal => &TETRAGONAL,
            Symmetry::Cubic => &CUBIC,
        }
    }

    /// 需要的额外序列
    pub fn required_parameters(self) -> &'static [LatticeParameter] {
        self.rule().required
    }

    pub fn name(self) -> &'static str {
        match self {
            Symmetry::Triclinic => "Triclinic",
            Symmetry::Monoclinic => "Monoclinic",
            Symmetry::Rhombohedral => "Rhombohedral",
            Symmetry::Hexagonal => "Hexagonal",
            Symmetry::Orthorhombic => "Orthorhombic",
            Symmetry::Tetragonal => "Tetragonal",
            Symmetry::Cubic => "Cubic",
        }
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
