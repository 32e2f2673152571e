//! # 仿射化晶体
//!
//! 有限仿射晶体 `B` 的仿射化 `B^aff = { b(m) | b ∈ B, m ∈ Z }`。
//!
//! 构造时校验 `B` 为仿射型且有限；之后不可变。生成元为 `g(0)`。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `crystal/` 的通用接口与遍历
//! - 使用 `affinization/element.rs`

use crate::affinization::AffinizedElement;
use crate::crystal::{traversal, Cardinality, Crystal, CrystalGraph, Direction};
use crate::error::{CrystalError, Result};
use crate::root_system::{CartanType, Weight, WeightLattice};

use std::fmt;
use std::sync::Arc;

struct Inner<B: Crystal> {
    base: B,
    cartan: CartanType,
    lattice: WeightLattice,
    delta: Weight,
}

/// 仿射化晶体；克隆只复制句柄，元素通过句柄判断是否同属一个晶体
pub struct AffinizedCrystal<B: Crystal> {
    inner: Arc<Inner<B>>,
}

impl<B: Crystal> Clone for AffinizedCrystal<B> {
    fn clone(&self) -> Self {
        AffinizedCrystal {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: Crystal> AffinizedCrystal<B> {
    /// 仿射化 `base`
    ///
    /// `base` 必须是仿射型的有限晶体。
    pub fn new(base: B) -> Result<Self> {
        let cartan = base.cartan_type();
        if !cartan.is_affine() {
            return Err(CrystalError::InvalidInput(format!(
                "must be an affine crystal (got type {})",
                cartan
            )));
        }
        if !base.cardinality().is_finite() {
            return Err(CrystalError::InvalidInput(
                "must be finite crystal".to_string(),
            ));
        }

        let lattice = WeightLattice::extended(cartan)?;
        let delta = lattice.null_root()?;

        Ok(AffinizedCrystal {
            inner: Arc::new(Inner {
                base,
                cartan,
                lattice,
                delta,
            }),
        })
    }

    /// 底层有限晶体
    pub fn base(&self) -> &B {
        &self.inner.base
    }

    /// 元素 `b(m)`
    pub fn element(&self, b: B::Element, m: i64) -> AffinizedElement<B> {
        AffinizedElement::new(self.clone(), b, m)
    }

    /// 是否为同一个仿射化晶体
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn null_root(&self) -> &Weight {
        &self.inner.delta
    }

    pub(crate) fn address(&self) -> usize {
        Arc::as_ptr(&self.inner) as *const () as usize
    }

    /// 从生成元出发、深度不超过 `max_depth` 的子晶体
    pub fn subcrystal(
        &self,
        max_depth: usize,
        index_set: Option<&[usize]>,
    ) -> Result<Vec<AffinizedElement<B>>> {
        traversal::subcrystal(self, None, index_set, Some(max_depth), Direction::Both)
    }

    /// 晶体图；仿射化是无限晶体，必须给出 `subset`
    pub fn digraph(
        &self,
        subset: Option<&[AffinizedElement<B>]>,
        index_set: Option<&[usize]>,
    ) -> Result<CrystalGraph<AffinizedElement<B>>> {
        traversal::digraph(self, subset, index_set)
    }
}

impl<B: Crystal + fmt::Display> fmt::Display for AffinizedCrystal<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Affinization of {}", self.inner.base)
    }
}

impl<B: Crystal> Crystal for AffinizedCrystal<B> {
    type Element = AffinizedElement<B>;

    fn cartan_type(&self) -> CartanType {
        self.inner.cartan
    }

    fn module_generators(&self) -> Vec<AffinizedElement<B>> {
        self.inner
            .base
            .module_generators()
            .into_iter()
            .map(|g| self.element(g, 0))
            .collect()
    }

    fn cardinality(&self) -> Cardinality {
        Cardinality::Infinite
    }

    fn e(&self, b: &AffinizedElement<B>, i: usize) -> Option<AffinizedElement<B>> {
        b.raise(i)
    }

    fn f(&self, b: &AffinizedElement<B>, i: usize) -> Option<AffinizedElement<B>> {
        b.lower(i)
    }

    fn epsilon(&self, b: &AffinizedElement<B>, i: usize) -> i64 {
        b.epsilon(i)
    }

    fn phi(&self, b: &AffinizedElement<B>, i: usize) -> i64 {
        b.phi(i)
    }

    fn weight(&self, b: &AffinizedElement<B>) -> Weight {
        b.weight()
    }

    fn latex(&self, b: &AffinizedElement<B>) -> String {
        b.latex()
    }

    fn weight_lattice_realization(&self) -> WeightLattice {
        self.inner.lattice
    }
}

/// 为任意晶体提供 `.affinization()`
pub trait Affinize: Crystal + Sized {
    fn affinization(self) -> Result<AffinizedCrystal<Self>> {
        AffinizedCrystal::new(self)
    }
}

impl<B: Crystal> Affinize for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crystals::{KirillovReshetikhin, Letter, Letters, TableCrystal, TensorProduct};

    fn kr(cartan: &str) -> KirillovReshetikhin {
        KirillovReshetikhin::new(cartan.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_rejects_non_affine_crystal() {
        let letters = Letters::new("A2".parse().unwrap()).unwrap();
        let err = AffinizedCrystal::new(letters);
        assert!(matches!(err, Err(CrystalError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_infinite_crystal() {
        let a = kr("A2^(1)").affinization().unwrap();
        let err = a.affinization();
        assert!(matches!(err, Err(CrystalError::InvalidInput(ref msg)) if msg.contains("finite")));
    }

    #[test]
    fn test_module_generators_have_grade_zero() {
        let a = kr("A2^(1)").affinization().unwrap();
        let gens = a.module_generators();
        assert_eq!(gens.len(), 1);
        assert_eq!(gens[0].base(), &Letter(1));
        assert_eq!(gens[0].grade(), 0);
        assert_eq!(gens[0].to_string(), "1(0)");
    }

    #[test]
    fn test_display_and_realization() {
        let a = kr("A2^(1)").affinization().unwrap();
        assert_eq!(
            a.to_string(),
            "Affinization of Kirillov-Reshetikhin crystal of type ['A', 2, 1] with (r,s)=(1,1)"
        );
        assert_eq!(
            a.weight_lattice_realization().to_string(),
            "Extended weight lattice of the Root system of type ['A', 2, 1]"
        );
        assert_eq!(a.cardinality(), Cardinality::Infinite);
    }

    #[test]
    fn test_enumeration_requires_depth() {
        let a = kr("A2^(1)").affinization().unwrap();
        assert!(matches!(a.list(), Err(CrystalError::InfiniteEnumeration)));
        assert!(a.digraph(None, None).is_err());
    }

    #[test]
    fn test_subcrystal_depth_two() {
        let a = kr("A2^(1)").affinization().unwrap();
        let mut s = a.subcrystal(2, None).unwrap();
        s.sort();
        let shown: Vec<String> = s.iter().map(|x| x.to_string()).collect();
        assert_eq!(shown, vec!["1(0)", "2(0)", "3(0)", "2(1)", "3(1)"]);
    }

    #[test]
    fn test_digraph_on_subset() {
        let a = kr("A2^(1)").affinization().unwrap();
        let s = a.subcrystal(3, None).unwrap();
        let g = a.digraph(Some(&s), None).unwrap();
        assert_eq!(g.node_count(), s.len());

        let top = a.element(Letter(3), 0);
        assert_eq!(g.successor(&top, 0), Some(&a.element(Letter(1), -1)));

        for (src, i, dst) in g.edges() {
            let expected = if i == 0 { src.grade() - 1 } else { src.grade() };
            assert_eq!(dst.grade(), expected);
        }

        let classical = a.digraph(Some(&s), Some(&[1, 2])).unwrap();
        assert!(classical.edges().iter().all(|(_, i, _)| *i != 0));
    }

    #[test]
    fn test_affinization_of_materialized_tensor_product() {
        let k = kr("A2^(1)");
        let table = TableCrystal::from_crystal(&TensorProduct::new(k.clone(), k).unwrap()).unwrap();
        let a = table.affinization().unwrap();
        let g = a.module_generators()[0].clone();
        assert_eq!(g.to_string(), "1 (X) 1(0)");

        let s = a.subcrystal(4, None).unwrap();
        assert!(s.iter().any(|x| x.grade() < 0));
        assert!(s.iter().any(|x| x.grade() > 0));
    }

    #[test]
    fn test_type_c_affinization() {
        let a = kr("C2^(1)").affinization().unwrap();
        let g = a.module_generators()[0].clone();
        let y = g.f_string(&[1, 2, 1, 0]).unwrap();
        assert_eq!(y.to_string(), "1(-1)");
        assert_eq!(g.raise(0).unwrap().to_string(), "-1(1)");
    }
}
