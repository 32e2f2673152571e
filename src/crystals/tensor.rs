//! # 晶体张量积
//!
//! 两个同类型晶体的张量积 `B1 ⊗ B2`，采用 Kashiwara 约定的符号规则：
//! - `f_i(b1 ⊗ b2) = f_i b1 ⊗ b2`  若 `φ_i(b1) > ε_i(b2)`，否则 `b1 ⊗ f_i b2`
//! - `e_i(b1 ⊗ b2) = e_i b1 ⊗ b2`  若 `φ_i(b1) >= ε_i(b2)`，否则 `b1 ⊗ e_i b2`
//!
//! ## 依赖关系
//! - 实现 `crystal::Crystal`
//! - 使用 `crystal::traversal` 求连通分支作为生成元

use crate::crystal::{traversal, Cardinality, Crystal};
use crate::error::{CrystalError, Result};
use crate::root_system::CartanType;

use std::fmt;

/// 张量积元素 `b1 ⊗ b2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TensorElement<E1, E2>(pub E1, pub E2);

impl<E1: fmt::Display, E2: fmt::Display> fmt::Display for TensorElement<E1, E2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (X) {}", self.0, self.1)
    }
}

/// 张量积晶体
pub struct TensorProduct<B1: Crystal, B2: Crystal> {
    left: B1,
    right: B2,
    cartan: CartanType,
    generators: Vec<TensorElement<B1::Element, B2::Element>>,
}

impl<B1: Crystal, B2: Crystal> TensorProduct<B1, B2> {
    pub fn new(left: B1, right: B2) -> Result<Self> {
        let cartan = left.cartan_type();
        if right.cartan_type() != cartan {
            return Err(CrystalError::InvalidInput(format!(
                "cannot tensor crystals of types {} and {}",
                cartan,
                right.cartan_type()
            )));
        }

        let mut product = TensorProduct {
            left,
            right,
            cartan,
            generators: Vec::new(),
        };

        product.generators = if product.cardinality().is_finite() {
            traversal::connected_components(&product)?
                .into_iter()
                .filter_map(|component| component.into_iter().next())
                .collect()
        } else {
            // 无限因子时退化为生成元的两两组合
            let rights = product.right.module_generators();
            product
                .left
                .module_generators()
                .into_iter()
                .flat_map(|l| rights.iter().map(move |r| TensorElement(l.clone(), r.clone())))
                .collect()
        };

        Ok(product)
    }
}

impl<B1, B2> fmt::Display for TensorProduct<B1, B2>
where
    B1: Crystal + fmt::Display,
    B2: Crystal + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Full tensor product of the crystals [{}, {}]",
            self.left, self.right
        )
    }
}

impl<B1: Crystal, B2: Crystal> Crystal for TensorProduct<B1, B2> {
    type Element = TensorElement<B1::Element, B2::Element>;

    fn cartan_type(&self) -> CartanType {
        self.cartan
    }

    fn module_generators(&self) -> Vec<Self::Element> {
        self.generators.clone()
    }

    fn cardinality(&self) -> Cardinality {
        match (self.left.cardinality(), self.right.cardinality()) {
            (Cardinality::Finite(a), Cardinality::Finite(b)) => Cardinality::Finite(a * b),
            _ => Cardinality::Infinite,
        }
    }

    fn e(&self, b: &Self::Element, i: usize) -> Option<Self::Element> {
        let TensorElement(b1, b2) = b;
        if self.left.phi(b1, i) >= self.right.epsilon(b2, i) {
            self.left
                .e(b1, i)
                .map(|x| TensorElement(x, b2.clone()))
        } else {
            self.right
                .e(b2, i)
                .map(|y| TensorElement(b1.clone(), y))
        }
    }

    fn f(&self, b: &Self::Element, i: usize) -> Option<Self::Element> {
        let TensorElement(b1, b2) = b;
        if self.left.phi(b1, i) > self.right.epsilon(b2, i) {
            self.left
                .f(b1, i)
                .map(|x| TensorElement(x, b2.clone()))
        } else {
            self.right
                .f(b2, i)
                .map(|y| TensorElement(b1.clone(), y))
        }
    }

    fn epsilon(&self, b: &Self::Element, i: usize) -> i64 {
        let TensorElement(b1, b2) = b;
        let (eps1, phi1) = (self.left.epsilon(b1, i), self.left.phi(b1, i));
        let eps2 = self.right.epsilon(b2, i);
        eps1.max(eps1 + eps2 - phi1)
    }

    fn phi(&self, b: &Self::Element, i: usize) -> i64 {
        let TensorElement(b1, b2) = b;
        let phi1 = self.left.phi(b1, i);
        let (eps2, phi2) = (self.right.epsilon(b2, i), self.right.phi(b2, i));
        phi2.max(phi1 + phi2 - eps2)
    }

    fn latex(&self, b: &Self::Element) -> String {
        format!("{} \\otimes {}", self.left.latex(&b.0), self.right.latex(&b.1))
    }

    fn list(&self) -> Result<Vec<Self::Element>> {
        let lefts = self.left.list()?;
        let rights = self.right.list()?;
        Ok(lefts
            .iter()
            .flat_map(|l| rights.iter().map(move |r| TensorElement(l.clone(), r.clone())))
            .collect())
    }
}
