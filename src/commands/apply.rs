//! # apply 子命令实现
//!
//! 在仿射化晶体中从 `b(m)` 出发依次作用算子串，输出结果或 `None`。
//!
//! ## 依赖关系
//! - 使用 `cli/apply.rs` 定义的 ApplyArgs
//! - 使用 `affinization/`
//! - 使用 `utils/output.rs`

use super::load_crystal;
use crate::affinization::{Affinize, AffinizedElement};
use crate::cli::apply::ApplyArgs;
use crate::crystal::Crystal;
use crate::error::{CrystalError, Result};
use crate::utils::output;

use regex::Regex;
use std::fmt;
use tabled::{Table, Tabled};

/// 单个晶体算子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `e_i`
    Raise(usize),
    /// `f_i`
    Lower(usize),
}

impl Operator {
    pub fn index(&self) -> usize {
        match self {
            Operator::Raise(i) | Operator::Lower(i) => *i,
        }
    }

    pub fn apply<B: Crystal>(&self, x: &AffinizedElement<B>) -> Option<AffinizedElement<B>> {
        match self {
            Operator::Raise(i) => x.raise(*i),
            Operator::Lower(i) => x.lower(*i),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Raise(i) => write!(f, "e{}", i),
            Operator::Lower(i) => write!(f, "f{}", i),
        }
    }
}

/// 解析 `f1,f2,e0` 形式的算子串（也接受 `f_1`, `e[0]`）
pub fn parse_operators(input: &str) -> Result<Vec<Operator>> {
    let re = Regex::new(r"^([efEF])[_\[]?(\d+)\]?$").unwrap();

    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|token| {
            let caps = re.captures(token).ok_or_else(|| {
                CrystalError::InvalidArgument(format!("Unrecognized operator '{}'", token))
            })?;
            let i: usize = caps[2].parse().map_err(|_| {
                CrystalError::InvalidArgument(format!("Index out of range in '{}'", token))
            })?;
            Ok(match &caps[1] {
                "e" | "E" => Operator::Raise(i),
                _ => Operator::Lower(i),
            })
        })
        .collect()
}

/// 中间结果行
#[derive(Debug, Clone, Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: usize,
    #[tabled(rename = "Operator")]
    operator: String,
    #[tabled(rename = "Element")]
    element: String,
    #[tabled(rename = "Grade")]
    grade: String,
}

/// 执行 apply
pub fn execute(args: ApplyArgs) -> Result<()> {
    let operators = parse_operators(&args.operators)?;
    let base = load_crystal(&args.crystal)?;
    let cartan = base.cartan_type();
    for op in &operators {
        cartan.check_index(op.index())?;
    }

    let start = match args.start {
        Some(ref label) => base.get(label).ok_or_else(|| {
            CrystalError::InvalidArgument(format!("No element labelled '{}' in {}", label, base))
        })?,
        None => base
            .module_generators()
            .into_iter()
            .next()
            .ok_or_else(|| CrystalError::InvalidInput(format!("{} has no generators", base)))?,
    };

    let affinization = base.affinization()?;
    output::print_info(&format!("{}", affinization));

    let x = affinization.element(start, args.grade);
    let result = apply_word(&x, &operators);

    if args.trace {
        let rows: Vec<StepRow> = trace_word(&x, &operators)
            .iter()
            .enumerate()
            .map(|(k, (op, y))| StepRow {
                step: k + 1,
                operator: op.to_string(),
                element: y.as_ref().map_or("None".to_string(), |y| y.to_string()),
                grade: y.as_ref().map_or("-".to_string(), |y| y.grade().to_string()),
            })
            .collect();
        println!("{}", Table::new(&rows));
    }

    let word = operators
        .iter()
        .map(|op| op.to_string())
        .collect::<Vec<_>>()
        .join(",");
    match result {
        Some(y) => {
            output::print_success(&format!("{} . {} = {}", word, x, y));
            output::print_info(&format!("weight: {}", y.weight()));
        }
        None => output::print_warning(&format!("{} . {} = None", word, x)),
    }

    Ok(())
}

/// 把算子串切成连续的 `e` 段与 `f` 段
fn runs(operators: &[Operator]) -> Vec<(bool, Vec<usize>)> {
    let mut runs: Vec<(bool, Vec<usize>)> = Vec::new();
    for op in operators {
        let raise = matches!(op, Operator::Raise(_));
        match runs.last_mut() {
            Some((r, indices)) if *r == raise => indices.push(op.index()),
            _ => runs.push((raise, vec![op.index()])),
        }
    }
    runs
}

/// 从左到右作用算子串，每一段用 `e_string` / `f_string`
pub fn apply_word<B: Crystal>(
    x: &AffinizedElement<B>,
    operators: &[Operator],
) -> Option<AffinizedElement<B>> {
    runs(operators)
        .into_iter()
        .try_fold(x.clone(), |y, (raise, indices)| {
            if raise {
                y.e_string(&indices)
            } else {
                y.f_string(&indices)
            }
        })
}

/// 逐步作用，遇到 `None` 即停止；返回每一步的记录
fn trace_word<B: Crystal>(
    x: &AffinizedElement<B>,
    operators: &[Operator],
) -> Vec<(Operator, Option<AffinizedElement<B>>)> {
    let mut steps = Vec::with_capacity(operators.len());
    let mut current = Some(x.clone());
    for op in operators {
        current = match current {
            Some(ref y) => op.apply(y),
            None => break,
        };
        steps.push((*op, current.clone()));
    }
    steps
}
