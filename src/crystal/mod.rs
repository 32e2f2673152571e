//! # 晶体通用接口
//!
//! 定义 `Crystal` trait：任何实现了 `e_i` / `f_i` 的晶体都自动获得
//! `ε_i`, `φ_i`, 权、算子串、最高权判定与遍历能力。
//!
//! 算子作用到晶体之外时返回 `None`，这是晶体理论的标准约定，不是错误。
//!
//! ## 依赖关系
//! - 被 `crystals/`, `affinization/`, `commands/` 使用
//! - 使用 `root_system/`
//! - 子模块: traversal

pub mod traversal;

pub use traversal::{CrystalGraph, Direction};

use crate::error::Result;
use crate::root_system::{CartanType, Weight, WeightLattice};

use std::fmt;
use std::hash::Hash;

/// 晶体的基数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Finite(usize),
    Infinite,
}

impl Cardinality {
    pub fn is_finite(&self) -> bool {
        matches!(self, Cardinality::Finite(_))
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Finite(n) => write!(f, "{}", n),
            Cardinality::Infinite => write!(f, "+Infinity"),
        }
    }
}

/// 正则晶体
pub trait Crystal {
    /// 晶体元素
    type Element: Clone + Eq + Ord + Hash + fmt::Display;

    fn cartan_type(&self) -> CartanType;

    /// 生成元（模生成元）
    fn module_generators(&self) -> Vec<Self::Element>;

    fn cardinality(&self) -> Cardinality;

    /// 提升算子 `e_i`
    fn e(&self, b: &Self::Element, i: usize) -> Option<Self::Element>;

    /// 下降算子 `f_i`
    fn f(&self, b: &Self::Element, i: usize) -> Option<Self::Element>;

    fn index_set(&self) -> Vec<usize> {
        self.cartan_type().index_set()
    }

    /// `ε_i(b)`：`e_i` 可连续作用的次数
    fn epsilon(&self, b: &Self::Element, i: usize) -> i64 {
        let mut count = 0;
        let mut x = b.clone();
        while let Some(y) = self.e(&x, i) {
            x = y;
            count += 1;
        }
        count
    }

    /// `φ_i(b)`：`f_i` 可连续作用的次数
    fn phi(&self, b: &Self::Element, i: usize) -> i64 {
        let mut count = 0;
        let mut x = b.clone();
        while let Some(y) = self.f(&x, i) {
            x = y;
            count += 1;
        }
        count
    }

    /// 权 `Σ (φ_i − ε_i) Λ_i`
    fn weight(&self, b: &Self::Element) -> Weight {
        Weight::from_coefficients(
            self.index_set()
                .into_iter()
                .map(|i| (i, self.phi(b, i) - self.epsilon(b, i))),
        )
    }

    /// 依次作用 `e_{i_1}, e_{i_2}, ...`，任一步无定义即返回 `None`
    fn e_string(&self, b: &Self::Element, list: &[usize]) -> Option<Self::Element> {
        list.iter().try_fold(b.clone(), |x, &i| self.e(&x, i))
    }

    /// 依次作用 `f_{i_1}, f_{i_2}, ...`，任一步无定义即返回 `None`
    fn f_string(&self, b: &Self::Element, list: &[usize]) -> Option<Self::Element> {
        list.iter().try_fold(b.clone(), |x, &i| self.f(&x, i))
    }

    /// 对给定指标集（默认全部）所有 `e_i(b)` 均无定义
    fn is_highest_weight(&self, b: &Self::Element, index_set: Option<&[usize]>) -> bool {
        match index_set {
            Some(set) => set.iter().all(|&i| self.e(b, i).is_none()),
            None => self.index_set().into_iter().all(|i| self.e(b, i).is_none()),
        }
    }

    /// 对给定指标集（默认全部）所有 `f_i(b)` 均无定义
    fn is_lowest_weight(&self, b: &Self::Element, index_set: Option<&[usize]>) -> bool {
        match index_set {
            Some(set) => set.iter().all(|&i| self.f(b, i).is_none()),
            None => self.index_set().into_iter().all(|i| self.f(b, i).is_none()),
        }
    }

    /// LaTeX 表示，默认与 Display 相同
    fn latex(&self, b: &Self::Element) -> String {
        b.to_string()
    }

    fn weight_lattice_realization(&self) -> WeightLattice {
        WeightLattice::new(self.cartan_type())
    }

    /// 列出全部元素（仅限有限晶体）
    fn list(&self) -> Result<Vec<Self::Element>> {
        traversal::subcrystal(self, None, None, None, Direction::Both)
    }
}
