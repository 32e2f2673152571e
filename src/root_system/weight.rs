//! # 权格实现
//!
//! 以基本权 `Λ_i` 与零根 `δ` 为基表示权：`Σ c_i Λ_i + d·δ`。
//!
//! ## 显示格式
//! `-2*Lambda[0] + 2*Lambda[2] + delta`，零权显示为 `0`。
//!
//! ## 依赖关系
//! - 被 `crystal/`, `affinization/` 使用
//! - 使用 `root_system/cartan.rs`

use crate::error::{CrystalError, Result};
use crate::root_system::CartanType;

use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// 权格中的元素
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Weight {
    /// 基本权系数，只保存非零项
    lambda: BTreeMap<usize, i64>,
    /// 零根系数
    delta: i64,
}

impl Weight {
    pub fn zero() -> Self {
        Self::default()
    }

    /// 基本权 `Λ_i`
    pub fn fundamental(i: usize) -> Self {
        let mut lambda = BTreeMap::new();
        lambda.insert(i, 1);
        Weight { lambda, delta: 0 }
    }

    /// 零根 `δ`
    pub fn delta() -> Self {
        Weight {
            lambda: BTreeMap::new(),
            delta: 1,
        }
    }

    /// 从 `(i, c_i)` 列表构造
    pub fn from_coefficients<I>(coeffs: I) -> Self
    where
        I: IntoIterator<Item = (usize, i64)>,
    {
        let mut w = Weight::zero();
        for (i, c) in coeffs {
            w.add_lambda(i, c);
        }
        w
    }

    /// `Λ_i` 的系数
    pub fn coefficient(&self, i: usize) -> i64 {
        self.lambda.get(&i).copied().unwrap_or(0)
    }

    /// `δ` 的系数
    pub fn delta_coefficient(&self) -> i64 {
        self.delta
    }

    /// 非零的 `(i, c_i)` 项，按 i 升序
    pub fn terms(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.lambda.iter().map(|(&i, &c)| (i, c))
    }

    /// 水平（level）：基本权系数之和
    pub fn level(&self) -> i64 {
        self.lambda.values().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.lambda.is_empty() && self.delta == 0
    }

    fn add_lambda(&mut self, i: usize, c: i64) {
        if c == 0 {
            return;
        }
        let entry = self.lambda.entry(i).or_insert(0);
        *entry += c;
        if *entry == 0 {
            self.lambda.remove(&i);
        }
    }
}

impl AddAssign<&Weight> for Weight {
    fn add_assign(&mut self, rhs: &Weight) {
        for (&i, &c) in &rhs.lambda {
            self.add_lambda(i, c);
        }
        self.delta += rhs.delta;
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(mut self, rhs: Weight) -> Weight {
        self += &rhs;
        self
    }
}

impl Neg for Weight {
    type Output = Weight;

    fn neg(self) -> Weight {
        Weight {
            lambda: self.lambda.into_iter().map(|(i, c)| (i, -c)).collect(),
            delta: -self.delta,
        }
    }
}

impl Sub for Weight {
    type Output = Weight;

    fn sub(self, rhs: Weight) -> Weight {
        self + (-rhs)
    }
}

impl Mul<Weight> for i64 {
    type Output = Weight;

    fn mul(self, rhs: Weight) -> Weight {
        if self == 0 {
            return Weight::zero();
        }
        Weight {
            lambda: rhs.lambda.into_iter().map(|(i, c)| (i, self * c)).collect(),
            delta: self * rhs.delta,
        }
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Weight {
        iter.fold(Weight::zero(), |acc, w| acc + w)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let terms = self
            .lambda
            .iter()
            .map(|(i, &c)| (format!("Lambda[{}]", i), c))
            .chain((self.delta != 0).then(|| ("delta".to_string(), self.delta)));

        for (k, (name, c)) in terms.enumerate() {
            let sign = match (k, c < 0) {
                (0, true) => "-",
                (0, false) => "",
                (_, true) => " - ",
                (_, false) => " + ",
            };
            if c.abs() == 1 {
                write!(f, "{}{}", sign, name)?;
            } else {
                write!(f, "{}{}*{}", sign, c.abs(), name)?;
            }
        }
        Ok(())
    }
}

/// 权格（可选扩展：包含 `δ` 方向）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightLattice {
    cartan: CartanType,
    extended: bool,
}

impl WeightLattice {
    /// 普通权格
    pub fn new(cartan: CartanType) -> Self {
        WeightLattice {
            cartan,
            extended: false,
        }
    }

    /// 扩展权格，只对仿射类型有定义
    pub fn extended(cartan: CartanType) -> Result<Self> {
        if !cartan.is_affine() {
            return Err(CrystalError::InvalidInput(format!(
                "the extended weight lattice requires an affine type, got {}",
                cartan
            )));
        }
        Ok(WeightLattice {
            cartan,
            extended: true,
        })
    }

    /// 基本权 `Λ_i`
    pub fn fundamental_weight(&self, i: usize) -> Result<Weight> {
        self.cartan.check_index(i)?;
        Ok(Weight::fundamental(i))
    }

    /// 全部基本权，按指标集顺序
    pub fn fundamental_weights(&self) -> Vec<(usize, Weight)> {
        self.cartan
            .index_set()
            .into_iter()
            .map(|i| (i, Weight::fundamental(i)))
            .collect()
    }

    /// 零根 `δ`
    pub fn null_root(&self) -> Result<Weight> {
        if !self.extended {
            return Err(CrystalError::InvalidInput(format!(
                "the null root lives in the extended weight lattice, not in {}",
                self
            )));
        }
        Ok(Weight::delta())
    }

    /// 求和
    pub fn sum<I>(&self, weights: I) -> Weight
    where
        I: IntoIterator<Item = Weight>,
    {
        weights.into_iter().sum()
    }
}

impl fmt::Display for WeightLattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extended {
            write!(
                f,
                "Extended weight lattice of the Root system of type {}",
                self.cartan
            )
        } else {
            write!(f, "Weight lattice of the Root system of type {}", self.cartan)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a2_affine() -> CartanType {
        "A2^(1)".parse().unwrap()
    }

    #[test]
    fn test_weight_display() {
        let w = Weight::from_coefficients([(0, -2), (2, 2)]);
        assert_eq!(w.to_string(), "-2*Lambda[0] + 2*Lambda[2]");

        let w = Weight::from_coefficients([(1, -1), (2, 1)]) + Weight::delta();
        assert_eq!(w.to_string(), "-Lambda[1] + Lambda[2] + delta");

        let w = Weight::from_coefficients([(0, 2), (1, -2)]) + 2 * Weight::delta();
        assert_eq!(w.to_string(), "2*Lambda[0] - 2*Lambda[1] + 2*delta");

        assert_eq!(Weight::zero().to_string(), "0");
        assert_eq!((-1 * Weight::delta()).to_string(), "-delta");
    }

    #[test]
    fn test_weight_arithmetic_cancels() {
        let a = Weight::from_coefficients([(1, 1), (0, -1)]);
        let b = Weight::from_coefficients([(1, 1)]);
        let diff = a.clone() - b;
        assert_eq!(diff, Weight::from_coefficients([(0, -1)]));
        assert_eq!(diff.coefficient(1), 0);
        assert!((a.clone() - a).is_zero());
    }

    #[test]
    fn test_weight_level() {
        let w = Weight::from_coefficients([(0, -1), (1, 1)]) + 3 * Weight::delta();
        assert_eq!(w.level(), 0);
        assert_eq!(w.delta_coefficient(), 3);
    }

    #[test]
    fn test_extended_lattice_requires_affine() {
        let finite = a2_affine().classical();
        assert!(WeightLattice::extended(finite).is_err());
        assert!(WeightLattice::new(finite).null_root().is_err());

        let lattice = WeightLattice::extended(a2_affine()).unwrap();
        assert_eq!(lattice.null_root().unwrap(), Weight::delta());
        assert_eq!(
            lattice.to_string(),
            "Extended weight lattice of the Root system of type ['A', 2, 1]"
        );
    }

    #[test]
    fn test_fundamental_weights() {
        let lattice = WeightLattice::extended(a2_affine()).unwrap();
        let la: Vec<usize> = lattice.fundamental_weights().into_iter().map(|(i, _)| i).collect();
        assert_eq!(la, vec![0, 1, 2]);
        assert!(lattice.fundamental_weight(3).is_err());

        let w = lattice.sum([
            2 * lattice.fundamental_weight(2).unwrap(),
            -2 * lattice.fundamental_weight(0).unwrap(),
        ]);
        assert_eq!(w.to_string(), "-2*Lambda[0] + 2*Lambda[2]");
    }
}
