//! # 仿射化晶体的元素 `b(m)`
//!
//! 不可变的二元组：底层元素 `b` 与整数阶 `m`。
//!
//! ## 算子
//! - `e_0`: `b(m) -> (e_0 b)(m+1)`，`f_0`: `b(m) -> (f_0 b)(m-1)`
//! - `i != 0`: 只作用于 `b`，阶不变
//! - `ε_i`, `φ_i` 与 `b` 相同；`wt(b(m)) = wt(b) + m δ`
//!
//! ## 序
//! 先比较阶 `m`，阶相同时比较底层晶体中的序。
//!
//! ## 依赖关系
//! - 被 `affinization/crystal.rs` 构造
//! - 使用 `root_system/weight.rs`

use crate::affinization::AffinizedCrystal;
use crate::crystal::Crystal;
use crate::root_system::Weight;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 仿射化晶体的元素
pub struct AffinizedElement<B: Crystal> {
    parent: AffinizedCrystal<B>,
    b: B::Element,
    m: i64,
}

impl<B: Crystal> AffinizedElement<B> {
    pub(crate) fn new(parent: AffinizedCrystal<B>, b: B::Element, m: i64) -> Self {
        AffinizedElement { parent, b, m }
    }

    pub fn parent(&self) -> &AffinizedCrystal<B> {
        &self.parent
    }

    /// 底层元素 `b`
    pub fn base(&self) -> &B::Element {
        &self.b
    }

    /// 阶 `m`
    pub fn grade(&self) -> i64 {
        self.m
    }

    fn with(&self, b: B::Element, m: i64) -> Self {
        AffinizedElement::new(self.parent.clone(), b, m)
    }

    /// 提升算子 `e_i`
    ///
    /// 阶超出 `i64` 范围时（`m = i64::MAX` 处的 `e_0`）返回 `None`。
    pub fn raise(&self, i: usize) -> Option<Self> {
        let bp = self.parent.base().e(&self.b, i)?;
        let m = if i == 0 { self.m.checked_add(1)? } else { self.m };
        Some(self.with(bp, m))
    }

    /// 下降算子 `f_i`
    ///
    /// 阶超出 `i64` 范围时（`m = i64::MIN` 处的 `f_0`）返回 `None`。
    pub fn lower(&self, i: usize) -> Option<Self> {
        let bp = self.parent.base().f(&self.b, i)?;
        let m = if i == 0 { self.m.checked_sub(1)? } else { self.m };
        Some(self.with(bp, m))
    }

    /// 依次作用 `e_{i_1}, e_{i_2}, ...`
    pub fn e_string(&self, list: &[usize]) -> Option<Self> {
        list.iter().try_fold(self.clone(), |x, &i| x.raise(i))
    }

    /// 依次作用 `f_{i_1}, f_{i_2}, ...`
    pub fn f_string(&self, list: &[usize]) -> Option<Self> {
        list.iter().try_fold(self.clone(), |x, &i| x.lower(i))
    }

    pub fn epsilon(&self, i: usize) -> i64 {
        self.parent.base().epsilon(&self.b, i)
    }

    pub fn phi(&self, i: usize) -> i64 {
        self.parent.base().phi(&self.b, i)
    }

    /// `wt(b) + m δ`，`wt(b)` 以扩展权格的基本权表示
    pub fn weight(&self) -> Weight {
        let classical = Weight::from_coefficients(self.parent.base().weight(&self.b).terms());
        classical + self.m * self.parent.null_root().clone()
    }

    pub fn is_highest_weight(&self, index_set: Option<&[usize]>) -> bool {
        self.parent.is_highest_weight(self, index_set)
    }

    /// LaTeX 表示 `<b>(m)`
    pub fn latex(&self) -> String {
        format!("{}({})", self.parent.base().latex(&self.b), self.m)
    }
}

impl<B: Crystal> Clone for AffinizedElement<B> {
    fn clone(&self) -> Self {
        AffinizedElement {
            parent: self.parent.clone(),
            b: self.b.clone(),
            m: self.m,
        }
    }
}

impl<B: Crystal> fmt::Display for AffinizedElement<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.b, self.m)
    }
}

impl<B: Crystal> fmt::Debug for AffinizedElement<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AffinizedElement")
            .field("b", &format_args!("{}", self.b))
            .field("m", &self.m)
            .finish()
    }
}

impl<B: Crystal> PartialEq for AffinizedElement<B> {
    fn eq(&self, other: &Self) -> bool {
        self.parent.same_as(&other.parent) && self.b == other.b && self.m == other.m
    }
}

impl<B: Crystal> Eq for AffinizedElement<B> {}

impl<B: Crystal> Hash for AffinizedElement<B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.b.hash(state);
        self.m.hash(state);
    }
}

impl<B: Crystal> Ord for AffinizedElement<B> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.m
            .cmp(&other.m)
            .then_with(|| self.b.cmp(&other.b))
            // 不同晶体的元素只在 (m, b) 相同时才用句柄地址区分
            .then_with(|| self.parent.address().cmp(&other.parent.address()))
    }
}

impl<B: Crystal> PartialOrd for AffinizedElement<B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affinization::Affinize;
    use crate::crystals::{KirillovReshetikhin, Letter};

    use proptest::prelude::*;

    fn affinized_a2() -> AffinizedCrystal<KirillovReshetikhin> {
        KirillovReshetikhin::new("A2^(1)".parse().unwrap())
            .unwrap()
            .affinization()
            .unwrap()
    }

    #[test]
    fn test_raise_zero_increments_grade() {
        let a = affinized_a2();
        let mg = a.module_generators()[0].clone();
        let up = mg.raise(0).unwrap();
        assert_eq!(up.to_string(), "3(1)");
        assert_eq!(mg.raise(1), None);
        assert_eq!(up.raise(2).unwrap().to_string(), "2(1)");
    }

    #[test]
    fn test_lower_string_short_circuits() {
        let a = affinized_a2();
        let mg = a.module_generators()[0].clone();
        assert_eq!(mg.lower(2), None);
        assert_eq!(mg.f_string(&[2, 2, 0]), None);
        assert_eq!(mg.f_string(&[1, 1]), None);
        assert_eq!(mg.f_string(&[1, 2]).unwrap().to_string(), "3(0)");
        assert_eq!(mg.f_string(&[1, 2, 0]).unwrap(), a.element(Letter(1), -1));
    }

    #[test]
    fn test_equality_requires_same_parent() {
        let a = affinized_a2();
        let b = affinized_a2();
        let x = a.element(Letter(1), 0);
        assert_eq!(x, a.module_generators()[0]);
        assert!(x.parent().same_as(&a));
        assert!(!x.parent().same_as(&b));
        assert_ne!(x, b.element(Letter(1), 0));
        assert_ne!(x, a.element(Letter(1), 1));
        assert_eq!(x, x.lower(1).unwrap().raise(1).unwrap());
    }

    #[test]
    fn test_ordering_is_grade_first() {
        let a = affinized_a2();
        let low_grade_big_letter = a.element(Letter(3), -1);
        let high_grade_small_letter = a.element(Letter(1), 0);
        assert!(low_grade_big_letter < high_grade_small_letter);
        assert!(a.element(Letter(1), 2) < a.element(Letter(2), 2));

        let mut xs = vec![
            a.element(Letter(2), 1),
            a.element(Letter(3), 0),
            a.element(Letter(1), 1),
            a.element(Letter(2), -4),
        ];
        xs.sort();
        let shown: Vec<String> = xs.iter().map(|x| x.to_string()).collect();
        assert_eq!(shown, vec!["2(-4)", "3(0)", "1(1)", "2(1)"]);
    }

    #[test]
    fn test_weight_adds_null_root() {
        let a = affinized_a2();
        let mg = a.module_generators()[0].clone();
        assert_eq!(mg.weight().to_string(), "-Lambda[0] + Lambda[1]");

        let up = mg.raise(0).unwrap();
        assert_eq!(up.weight().to_string(), "Lambda[0] - Lambda[2] + delta");
        assert_eq!(up.weight().delta_coefficient() - mg.weight().delta_coefficient(), 1);

        let down = mg.f_string(&[1, 2, 0]).unwrap();
        assert_eq!(down.weight().to_string(), "-Lambda[0] + Lambda[1] - delta");
        assert_eq!(down.weight() - mg.weight(), -1 * Weight::delta());
    }

    #[test]
    fn test_statistics_pass_through() {
        let a = affinized_a2();
        let base = a.base().clone();
        for m in [-3, 0, 5] {
            let x = a.element(Letter(1), m);
            for i in 0..=2 {
                assert_eq!(x.epsilon(i), base.epsilon(&Letter(1), i));
                assert_eq!(x.phi(i), base.phi(&Letter(1), i));
            }
        }
        assert_eq!(a.element(Letter(1), 7).epsilon(0), 1);
    }

    #[test]
    fn test_display_and_latex() {
        let a = KirillovReshetikhin::new("C2^(1)".parse().unwrap())
            .unwrap()
            .affinization()
            .unwrap();
        let x = a.element(Letter(-2), -3);
        assert_eq!(x.to_string(), "-2(-3)");
        assert_eq!(x.latex(), "\\overline{2}(-3)");
    }

    #[test]
    fn test_grade_stays_in_range_at_the_boundaries() {
        let a = affinized_a2();
        let top = a.element(Letter(1), i64::MAX);
        assert_eq!(top.raise(0), None);
        assert_eq!(top.lower(1).unwrap().grade(), i64::MAX);
        assert_eq!(top.lower(0), None);
        assert_eq!(
            top.f_string(&[1, 2, 0]).unwrap().grade(),
            i64::MAX - 1
        );

        let bottom = a.element(Letter(3), i64::MIN);
        assert_eq!(bottom.lower(0), None);
        assert_eq!(bottom.e_string(&[2, 1]).unwrap().grade(), i64::MIN);
        let above = a.element(Letter(1), i64::MIN);
        assert_eq!(above.raise(0).unwrap().grade(), i64::MIN + 1);
        assert_eq!(above.raise(0).unwrap().lower(0), Some(above));
    }

    #[test]
    fn test_highest_weight() {
        let a = affinized_a2();
        assert!(a.element(Letter(1), 0).is_highest_weight(Some(&[1, 2])));
        assert!(!a.element(Letter(1), 0).is_highest_weight(None));
    }

    proptest! {
        #[test]
        fn prop_operator_strings_track_grade(ops in proptest::collection::vec((0usize..3, any::<bool>()), 0..16)) {
            let a = affinized_a2();
            let mut x = a.module_generators()[0].clone();
            let mut expected_grade = 0i64;
            for (i, up) in ops {
                let next = if up { x.raise(i) } else { x.lower(i) };
                let base_next = if up {
                    a.base().e(x.base(), i)
                } else {
                    a.base().f(x.base(), i)
                };
                prop_assert_eq!(next.is_some(), base_next.is_some());
                if let Some(y) = next {
                    if i == 0 {
                        expected_grade += if up { 1 } else { -1 };
                    }
                    prop_assert_eq!(y.grade(), expected_grade);
                    let back = if up { y.lower(i) } else { y.raise(i) };
                    prop_assert_eq!(back.as_ref(), Some(&x));
                    x = y;
                }
            }
        }
    }
}
