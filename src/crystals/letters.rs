//! # 字母晶体
//!
//! 经典型 A_n 与 C_n 向量表示的晶体。
//!
//! ## 晶体图
//! - A_n: `1 -1-> 2 -2-> ... -n-> n+1`
//! - C_n: `1 -1-> 2 ... n -n-> -n ... -2 -1-> -1`
//!
//! ## 依赖关系
//! - 被 `crystals/kirillov_reshetikhin.rs` 复用
//! - 实现 `crystal::Crystal`

use crate::crystal::{Cardinality, Crystal};
use crate::error::{CrystalError, Result};
use crate::root_system::{CartanLetter, CartanType};

use std::cmp::Ordering;
use std::fmt;

/// 字母；负数表示带横线的字母 `\bar{k}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Letter(pub i32);

impl Letter {
    pub fn is_barred(&self) -> bool {
        self.0 < 0
    }

    pub fn latex(&self) -> String {
        if self.is_barred() {
            format!("\\overline{{{}}}", -self.0)
        } else {
            self.0.to_string()
        }
    }
}

impl Ord for Letter {
    /// `1 < 2 < ... < n < -n < ... < -1`
    fn cmp(&self, other: &Self) -> Ordering {
        (self.is_barred(), self.0).cmp(&(other.is_barred(), other.0))
    }
}

impl PartialOrd for Letter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 检查字母型是否受支持（只有 A 与 C），返回可用 `Letter` 表示的秩
pub(crate) fn check_letter_type(cartan: &CartanType) -> Result<i32> {
    match cartan.letter() {
        CartanLetter::A | CartanLetter::C => {}
        other => {
            return Err(CrystalError::InvalidInput(format!(
                "letter crystals are only implemented for types A and C, got type {}",
                other
            )))
        }
    }
    // 类型 A 需要字母 n+1
    i32::try_from(cartan.rank())
        .ok()
        .filter(|&n| n < i32::MAX)
        .ok_or_else(|| {
            CrystalError::InvalidCartanType(format!(
                "rank {} of {} is too large for a crystal of letters",
                cartan.rank(),
                cartan
            ))
        })
}

/// 字母个数：A_n 为 n+1，C_n 为 2n
pub(crate) fn letter_count(letter: CartanLetter, n: i32) -> usize {
    let n = n as usize;
    match letter {
        CartanLetter::C => 2 * n,
        _ => n + 1,
    }
}

/// 全部字母，按晶体序
pub(crate) fn all_letters(letter: CartanLetter, n: i32) -> Vec<Letter> {
    match letter {
        CartanLetter::C => (1..=n).chain(-n..=-1).map(Letter).collect(),
        _ => (1..=n + 1).map(Letter).collect(),
    }
}

/// 经典指标 `1 <= i <= n`，否则 `None`
fn classical_index(n: i32, i: usize) -> Option<i32> {
    i32::try_from(i).ok().filter(|&i| i >= 1 && i <= n)
}

/// 经典 `f_i`，`1 <= i <= n`
pub(crate) fn classical_f(letter: CartanLetter, n: i32, b: Letter, i: usize) -> Option<Letter> {
    let i = classical_index(n, i)?;
    match letter {
        CartanLetter::C => {
            if i == n {
                (b.0 == n).then_some(Letter(-n))
            } else if b.0 == i {
                Some(Letter(i + 1))
            } else if b.0 == -(i + 1) {
                Some(Letter(-i))
            } else {
                None
            }
        }
        _ => (b.0 == i).then_some(Letter(i + 1)),
    }
}

/// 经典 `e_i`，`1 <= i <= n`
pub(crate) fn classical_e(letter: CartanLetter, n: i32, b: Letter, i: usize) -> Option<Letter> {
    let i = classical_index(n, i)?;
    match letter {
        CartanLetter::C => {
            if i == n {
                (b.0 == -n).then_some(Letter(n))
            } else if b.0 == i + 1 {
                Some(Letter(i))
            } else if b.0 == -i {
                Some(Letter(-(i + 1)))
            } else {
                None
            }
        }
        _ => (b.0 == i + 1).then_some(Letter(i)),
    }
}

/// 经典字母晶体
#[derive(Debug, Clone)]
pub struct Letters {
    cartan: CartanType,
    n: i32,
}

impl Letters {
    pub fn new(cartan: CartanType) -> Result<Self> {
        if cartan.is_affine() {
            return Err(CrystalError::InvalidInput(format!(
                "the crystal of letters needs a finite type, got {}",
                cartan
            )));
        }
        let n = check_letter_type(&cartan)?;
        Ok(Letters { cartan, n })
    }
}

impl fmt::Display for Letters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The crystal of letters for type {}", self.cartan)
    }
}

impl Crystal for Letters {
    type Element = Letter;

    fn cartan_type(&self) -> CartanType {
        self.cartan
    }

    fn module_generators(&self) -> Vec<Letter> {
        vec![Letter(1)]
    }

    fn cardinality(&self) -> Cardinality {
        Cardinality::Finite(letter_count(self.cartan.letter(), self.n))
    }

    fn e(&self, b: &Letter, i: usize) -> Option<Letter> {
        classical_e(self.cartan.letter(), self.n, *b, i)
    }

    fn f(&self, b: &Letter, i: usize) -> Option<Letter> {
        classical_f(self.cartan.letter(), self.n, *b, i)
    }

    fn latex(&self, b: &Letter) -> String {
        b.latex()
    }

    fn list(&self) -> Result<Vec<Letter>> {
        Ok(all_letters(self.cartan.letter(), self.n))
    }
}
