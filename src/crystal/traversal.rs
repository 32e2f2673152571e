//! # 晶体遍历
//!
//! 通用的广度优先遍历与晶体图构造，适用于任何 `Crystal` 实现。
//!
//! ## 功能
//! - `subcrystal`: 从生成元出发沿 `e_i` / `f_i` 的有界 BFS
//! - `breadth_first`: 只沿 `f_i` 的分层遍历
//! - `digraph`: 以 `petgraph` 构造带指标标签的晶体图
//! - 最高权 / 最低权向量与连通分支
//!
//! 无限晶体（例如仿射化）必须给出深度上界。
//!
//! ## 依赖关系
//! - 被 `crystal/mod.rs`, `affinization/`, `commands/` 使用
//! - 使用 `petgraph` 存储晶体图

use crate::crystal::Crystal;
use crate::error::{CrystalError, Result};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// BFS 的方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// 同时沿 `e_i` 与 `f_i`
    #[default]
    Both,
    /// 只沿 `e_i`
    Upper,
    /// 只沿 `f_i`
    Lower,
}

fn resolve_index_set<C: Crystal + ?Sized>(
    crystal: &C,
    index_set: Option<&[usize]>,
) -> Result<Vec<usize>> {
    match index_set {
        Some(set) => {
            let cartan = crystal.cartan_type();
            for &i in set {
                cartan.check_index(i)?;
            }
            Ok(set.to_vec())
        }
        None => Ok(crystal.index_set()),
    }
}

/// 由生成元出发的子晶体（BFS 发现顺序）
///
/// `generators` 缺省时使用模生成元；`max_depth` 缺省时不限深度，
/// 此时晶体必须有限。
pub fn subcrystal<C: Crystal + ?Sized>(
    crystal: &C,
    generators: Option<&[C::Element]>,
    index_set: Option<&[usize]>,
    max_depth: Option<usize>,
    direction: Direction,
) -> Result<Vec<C::Element>> {
    if max_depth.is_none() && !crystal.cardinality().is_finite() {
        return Err(CrystalError::InfiniteEnumeration);
    }
    let index_set = resolve_index_set(crystal, index_set)?;

    let starts = match generators {
        Some(gens) => gens.to_vec(),
        None => crystal.module_generators(),
    };

    let mut seen: HashSet<C::Element> = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    for g in starts {
        if seen.insert(g.clone()) {
            order.push(g.clone());
            queue.push_back((g, 0usize));
        }
    }

    while let Some((x, depth)) = queue.pop_front() {
        if max_depth.map_or(false, |d| depth >= d) {
            continue;
        }
        for &i in &index_set {
            let lower = match direction {
                Direction::Both | Direction::Lower => crystal.f(&x, i),
                Direction::Upper => None,
            };
            let upper = match direction {
                Direction::Both | Direction::Upper => crystal.e(&x, i),
                Direction::Lower => None,
            };
            for y in lower.into_iter().chain(upper) {
                if seen.insert(y.clone()) {
                    order.push(y.clone());
                    queue.push_back((y, depth + 1));
                }
            }
        }
    }

    Ok(order)
}

/// 从模生成元出发、只沿 `f_i` 的分层遍历
pub fn breadth_first<C: Crystal + ?Sized>(
    crystal: &C,
    index_set: Option<&[usize]>,
    max_depth: Option<usize>,
) -> Result<Vec<C::Element>> {
    subcrystal(crystal, None, index_set, max_depth, Direction::Lower)
}

/// 晶体图：顶点为元素，边 `b -> f_i(b)` 标注指标 `i`
#[derive(Debug, Clone)]
pub struct CrystalGraph<E> {
    graph: DiGraph<E, usize>,
    nodes: HashMap<E, NodeIndex>,
}

impl<E: Clone + Eq + Hash> CrystalGraph<E> {
    fn with_vertices(vertices: &[E]) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for v in vertices {
            if !nodes.contains_key(v) {
                let idx = graph.add_node(v.clone());
                nodes.insert(v.clone(), idx);
            }
        }
        CrystalGraph { graph, nodes }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// 按插入顺序的顶点
    pub fn vertices(&self) -> impl Iterator<Item = &E> + '_ {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// 全部边 `(source, i, target)`
    pub fn edges(&self) -> Vec<(&E, usize, &E)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], *e.weight(), &self.graph[e.target()]))
            .collect()
    }

    /// 从 `v` 出发、标签为 `i` 的边的终点
    pub fn successor(&self, v: &E, i: usize) -> Option<&E> {
        let idx = *self.nodes.get(v)?;
        self.graph
            .edges(idx)
            .find(|e| *e.weight() == i)
            .map(|e| &self.graph[e.target()])
    }
}

/// 晶体图
///
/// `subset` 缺省时使用全部元素（晶体必须有限）；
/// 只保留两端都在 `subset` 内的边。
pub fn digraph<C: Crystal + ?Sized>(
    crystal: &C,
    subset: Option<&[C::Element]>,
    index_set: Option<&[usize]>,
) -> Result<CrystalGraph<C::Element>> {
    let index_set = resolve_index_set(crystal, index_set)?;
    let vertices = match subset {
        Some(s) => s.to_vec(),
        None => crystal.list()?,
    };

    let mut g = CrystalGraph::with_vertices(&vertices);
    for x in &vertices {
        let src = g.nodes[x];
        for &i in &index_set {
            if let Some(y) = crystal.f(x, i) {
                if let Some(&dst) = g.nodes.get(&y) {
                    g.graph.add_edge(src, dst, i);
                }
            }
        }
    }
    Ok(g)
}

/// 模生成元中的最高权元素
pub fn highest_weight_vectors<C: Crystal + ?Sized>(crystal: &C) -> Vec<C::Element> {
    crystal
        .module_generators()
        .into_iter()
        .filter(|g| crystal.is_highest_weight(g, None))
        .collect()
}

/// 全部最低权元素（仅限有限晶体）
pub fn lowest_weight_vectors<C: Crystal + ?Sized>(crystal: &C) -> Result<Vec<C::Element>> {
    Ok(crystal
        .list()?
        .into_iter()
        .filter(|b| crystal.is_lowest_weight(b, None))
        .collect())
}

/// 连通分支；每个分支的第一个元素是该分支的最小元
pub fn connected_components<C: Crystal + ?Sized>(crystal: &C) -> Result<Vec<Vec<C::Element>>> {
    let mut all = crystal.list()?;
    all.sort();

    let mut seen: HashSet<C::Element> = HashSet::new();
    let mut components = Vec::new();
    for b in all {
        if seen.contains(&b) {
            continue;
        }
        let component = subcrystal(
            crystal,
            Some(std::slice::from_ref(&b)),
            None,
            None,
            Direction::Both,
        )?;
        seen.extend(component.iter().cloned());
        components.push(component);
    }
    Ok(components)
}
