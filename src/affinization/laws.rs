//! # 仿射化定律校验
//!
//! 在有界子晶体上逐条检查仿射化应满足的性质：
//! - `e_i` / `f_i` 有定义当且仅当底层算子有定义，阶只在 `i = 0` 时改变 ±1
//! - `e_i` 与 `f_i` 互逆
//! - `e_0` 使 `δ` 系数加一，基本权部分的变化与底层晶体一致
//! - `ε_i`, `φ_i` 与底层元素相同
//! - 序为 `(m, b)` 的字典序
//!
//! ## 依赖关系
//! - 被 `commands/verify.rs` 调用
//! - 使用 `affinization/` 与 `crystal/`

use crate::affinization::{AffinizedCrystal, AffinizedElement};
use crate::crystal::Crystal;
use crate::error::Result;
use crate::root_system::Weight;

use std::fmt;

/// 被检查的性质
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Law {
    RaiseDomain,
    LowerDomain,
    RaiseGrade,
    LowerGrade,
    RaiseLowerInverse,
    LowerRaiseInverse,
    WeightShift,
    Statistics,
    Ordering,
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Law::RaiseDomain => "raise-domain",
            Law::LowerDomain => "lower-domain",
            Law::RaiseGrade => "raise-grade",
            Law::LowerGrade => "lower-grade",
            Law::RaiseLowerInverse => "raise-lower-inverse",
            Law::LowerRaiseInverse => "lower-raise-inverse",
            Law::WeightShift => "weight-shift",
            Law::Statistics => "statistics",
            Law::Ordering => "ordering",
        };
        write!(f, "{}", name)
    }
}

/// 一次违例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub law: Law,
    pub element: String,
    pub index: Option<usize>,
    pub detail: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "[{}] {} (i={}): {}", self.law, self.element, i, self.detail),
            None => write!(f, "[{}] {}: {}", self.law, self.element, self.detail),
        }
    }
}

/// 校验报告
#[derive(Debug, Clone, Default)]
pub struct LawReport {
    pub elements: usize,
    pub checks: usize,
    pub violations: Vec<Violation>,
}

impl LawReport {
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    fn check(&mut self, ok: bool, violation: impl FnOnce() -> Violation) {
        self.checks += 1;
        if !ok {
            self.violations.push(violation());
        }
    }
}

/// 在深度不超过 `max_depth` 的子晶体上检查全部性质
pub fn check_laws<B: Crystal>(
    crystal: &AffinizedCrystal<B>,
    max_depth: usize,
    index_set: Option<&[usize]>,
) -> Result<LawReport> {
    let elements = crystal.subcrystal(max_depth, index_set)?;
    let indices = match index_set {
        Some(set) => set.to_vec(),
        None => crystal.index_set(),
    };

    let mut report = LawReport {
        elements: elements.len(),
        ..Default::default()
    };

    for x in &elements {
        for &i in &indices {
            check_operators(crystal, x, i, &mut report);
        }
        check_statistics(crystal, x, &indices, &mut report);
    }
    check_ordering(&elements, &mut report);

    Ok(report)
}

fn violation<B: Crystal>(
    law: Law,
    x: &AffinizedElement<B>,
    i: Option<usize>,
    detail: String,
) -> Violation {
    Violation {
        law,
        element: x.to_string(),
        index: i,
        detail,
    }
}

fn grade_step(i: usize) -> i64 {
    if i == 0 {
        1
    } else {
        0
    }
}

/// 基本权部分（去掉 δ）
fn classical_part(w: &Weight) -> Weight {
    Weight::from_coefficients(w.terms())
}

fn check_operators<B: Crystal>(
    crystal: &AffinizedCrystal<B>,
    x: &AffinizedElement<B>,
    i: usize,
    report: &mut LawReport,
) {
    let base = crystal.base();

    let up = x.raise(i);
    let base_up = base.e(x.base(), i);
    report.check(up.is_some() == base_up.is_some(), || {
        violation(
            Law::RaiseDomain,
            x,
            Some(i),
            format!("raise defined: {}, e_i(b) defined: {}", up.is_some(), base_up.is_some()),
        )
    });

    if let Some(y) = &up {
        report.check(y.grade() == x.grade() + grade_step(i), || {
            violation(
                Law::RaiseGrade,
                x,
                Some(i),
                format!("grade went from {} to {}", x.grade(), y.grade()),
            )
        });
        report.check(y.lower(i).as_ref() == Some(x), || {
            violation(Law::RaiseLowerInverse, x, Some(i), format!("f_i(e_i(x)) != x via {}", y))
        });

        let shift = y.weight() - x.weight();
        let base_shift = base.weight(y.base()) - base.weight(x.base());
        report.check(
            shift.delta_coefficient() == grade_step(i)
                && classical_part(&shift) == classical_part(&base_shift),
            || {
                violation(
                    Law::WeightShift,
                    x,
                    Some(i),
                    format!("wt(e_i x) - wt(x) = {}", shift),
                )
            },
        );
    }

    let down = x.lower(i);
    let base_down = base.f(x.base(), i);
    report.check(down.is_some() == base_down.is_some(), || {
        violation(
            Law::LowerDomain,
            x,
            Some(i),
            format!(
                "lower defined: {}, f_i(b) defined: {}",
                down.is_some(),
                base_down.is_some()
            ),
        )
    });

    if let Some(y) = &down {
        report.check(y.grade() == x.grade() - grade_step(i), || {
            violation(
                Law::LowerGrade,
                x,
                Some(i),
                format!("grade went from {} to {}", x.grade(), y.grade()),
            )
        });
        report.check(y.raise(i).as_ref() == Some(x), || {
            violation(Law::LowerRaiseInverse, x, Some(i), format!("e_i(f_i(x)) != x via {}", y))
        });
    }
}

fn check_statistics<B: Crystal>(
    crystal: &AffinizedCrystal<B>,
    x: &AffinizedElement<B>,
    indices: &[usize],
    report: &mut LawReport,
) {
    let base = crystal.base();
    for &i in indices {
        let (eps, phi) = (x.epsilon(i), x.phi(i));
        let (base_eps, base_phi) = (base.epsilon(x.base(), i), base.phi(x.base(), i));
        report.check(eps == base_eps && phi == base_phi, || {
            violation(
                Law::Statistics,
                x,
                Some(i),
                format!("(eps, phi) = ({}, {}), base gives ({}, {})", eps, phi, base_eps, base_phi),
            )
        });
    }
}

fn check_ordering<B: Crystal>(elements: &[AffinizedElement<B>], report: &mut LawReport) {
    for x in elements {
        for y in elements {
            let expected = (x.grade(), x.base()).cmp(&(y.grade(), y.base()));
            report.check(x.cmp(y) == expected, || {
                violation(
                    Law::Ordering,
                    x,
                    None,
                    format!("compares {:?} with {}, expected {:?}", x.cmp(y), y, expected),
                )
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affinization::Affinize;
    use crate::crystals::{EdgeRecord, KirillovReshetikhin, TableCrystal, TensorProduct};

    #[test]
    fn test_kr_affinization_satisfies_laws() {
        for cartan in ["A1^(1)", "A3^(1)", "C3^(1)"] {
            let a = KirillovReshetikhin::new(cartan.parse().unwrap())
                .unwrap()
                .affinization()
                .unwrap();
            let report = check_laws(&a, 4, None).unwrap();
            assert!(report.is_ok(), "{}: {:?}", cartan, report.violations);
            assert!(report.elements > 1);
            assert!(report.checks > report.elements);
        }
    }

    #[test]
    fn test_tensor_affinization_satisfies_laws() {
        let k = KirillovReshetikhin::new("A2^(1)".parse().unwrap()).unwrap();
        let a = TensorProduct::new(k.clone(), k)
            .unwrap()
            .affinization()
            .unwrap();
        let report = check_laws(&a, 3, None).unwrap();
        assert!(report.is_ok(), "{:?}", report.violations);
    }

    #[test]
    fn test_restricted_index_set_stays_in_grade_zero() {
        let k = KirillovReshetikhin::new("A2^(1)".parse().unwrap()).unwrap();
        let a = k.affinization().unwrap();
        let report = check_laws(&a, 5, Some(&[1, 2])).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.elements, 3);
    }

    #[test]
    fn test_table_affinization_satisfies_laws() {
        let table = TableCrystal::from_records(
            "chain",
            "A1^(1)".parse().unwrap(),
            vec![
                EdgeRecord::edge("u", 1, "v"),
                EdgeRecord::edge("v", 0, "u"),
            ],
        )
        .unwrap();
        let report = check_laws(&table.affinization().unwrap(), 6, None).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.elements, 13);
    }

    #[test]
    fn test_violation_display() {
        let v = Violation {
            law: Law::RaiseGrade,
            element: "1(0)".to_string(),
            index: Some(0),
            detail: "grade went from 0 to 0".to_string(),
        };
        assert_eq!(v.to_string(), "[raise-grade] 1(0) (i=0): grade went from 0 to 0");
    }
}
