//! # Cartan 类型
//!
//! 描述 Kac-Moody 代数的分类数据：字母、秩，以及是否为（非扭）仿射类型。
//!
//! ## 支持的书写格式
//! - 紧凑形式：`A2`, `A2~`, `A2^(1)`, `A2^1`
//! - 列表形式：`['A', 2, 1]`, `['A',2]`, `A,2,1`
//!
//! ## 依赖关系
//! - 被 `root_system/weight.rs`, `crystal/`, `crystals/` 使用
//! - 使用 `regex` 解析字符串

use crate::error::{CrystalError, Result};

use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Cartan 类型字母
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CartanLetter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl CartanLetter {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(CartanLetter::A),
            'B' => Some(CartanLetter::B),
            'C' => Some(CartanLetter::C),
            'D' => Some(CartanLetter::D),
            'E' => Some(CartanLetter::E),
            'F' => Some(CartanLetter::F),
            'G' => Some(CartanLetter::G),
            _ => None,
        }
    }

    /// 该字母允许的秩
    fn accepts_rank(&self, rank: usize) -> bool {
        match self {
            CartanLetter::A => rank >= 1,
            CartanLetter::B | CartanLetter::C => rank >= 2,
            CartanLetter::D => rank >= 3,
            CartanLetter::E => (6..=8).contains(&rank),
            CartanLetter::F => rank == 4,
            CartanLetter::G => rank == 2,
        }
    }
}

impl fmt::Display for CartanLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            CartanLetter::A => "A",
            CartanLetter::B => "B",
            CartanLetter::C => "C",
            CartanLetter::D => "D",
            CartanLetter::E => "E",
            CartanLetter::F => "F",
            CartanLetter::G => "G",
        };
        write!(f, "{}", c)
    }
}

/// Cartan 类型（有限型或非扭仿射型）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartanType {
    letter: CartanLetter,
    rank: usize,
    affine: bool,
}

impl CartanType {
    /// 非扭仿射型 `X_n^(1)`
    pub fn affine(letter: CartanLetter, rank: usize) -> Result<Self> {
        Self::build(letter, rank, true)
    }

    fn build(letter: CartanLetter, rank: usize, affine: bool) -> Result<Self> {
        if !letter.accepts_rank(rank) {
            return Err(CrystalError::InvalidCartanType(format!(
                "type {} does not exist in rank {}",
                letter, rank
            )));
        }
        Ok(CartanType {
            letter,
            rank,
            affine,
        })
    }

    pub fn letter(&self) -> CartanLetter {
        self.letter
    }

    /// 经典部分的秩 n
    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn is_affine(&self) -> bool {
        self.affine
    }

    pub fn is_finite(&self) -> bool {
        !self.affine
    }

    /// 指标集：仿射型为 `0..=n`，有限型为 `1..=n`
    pub fn index_set(&self) -> Vec<usize> {
        let start = if self.affine { 0 } else { 1 };
        (start..=self.rank).collect()
    }

    /// 经典指标集 `1..=n`
    pub fn classical_index_set(&self) -> Vec<usize> {
        (1..=self.rank).collect()
    }

    pub fn contains_index(&self, i: usize) -> bool {
        i <= self.rank && (self.affine || i >= 1)
    }

    /// 仿射型的经典部分
    pub fn classical(&self) -> CartanType {
        CartanType {
            affine: false,
            ..*self
        }
    }

    /// 检查指标是否合法
    pub fn check_index(&self, i: usize) -> Result<()> {
        if self.contains_index(i) {
            Ok(())
        } else {
            Err(CrystalError::InvalidIndex {
                index: i,
                cartan: self.to_string(),
            })
        }
    }
}

impl fmt::Display for CartanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.affine {
            write!(f, "['{}', {}, 1]", self.letter, self.rank)
        } else {
            write!(f, "['{}', {}]", self.letter, self.rank)
        }
    }
}

impl FromStr for CartanType {
    type Err = CrystalError;

    fn from_str(s: &str) -> Result<Self> {
        let compact = Regex::new(r"^([A-Ga-g])\s*(\d+)\s*(~|\^\s*\(?\s*1\s*\)?)?$").unwrap();
        let list =
            Regex::new(r"^\[?\s*'?([A-Ga-g])'?\s*,\s*(\d+)\s*(,\s*(\d+)\s*)?\]?$").unwrap();

        let text = s.trim();
        let (letter, rank, affine) = if let Some(caps) = compact.captures(text) {
            (caps[1].to_string(), caps[2].to_string(), caps.get(3).is_some())
        } else if let Some(caps) = list.captures(text) {
            let affine = match caps.get(4).map(|m| m.as_str()) {
                None => false,
                Some("1") => true,
                Some(twist) => {
                    return Err(CrystalError::InvalidCartanType(format!(
                        "'{}': twisted types (twist {}) are not supported",
                        s, twist
                    )))
                }
            };
            (caps[1].to_string(), caps[2].to_string(), affine)
        } else {
            return Err(CrystalError::InvalidCartanType(format!(
                "cannot parse '{}' (expected e.g. A2, A2^(1) or ['A', 2, 1])",
                s
            )));
        };

        let letter = letter
            .chars()
            .next()
            .and_then(CartanLetter::from_char)
            .ok_or_else(|| CrystalError::InvalidCartanType(s.to_string()))?;
        let rank: usize = rank
            .parse()
            .map_err(|_| CrystalError::InvalidCartanType(format!("invalid rank in '{}'", s)))?;

        Self::build(letter, rank, affine)
    }
}
