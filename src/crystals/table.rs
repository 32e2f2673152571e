//! # 表格晶体
//!
//! 由显式 `f` 箭头列表定义的有限晶体，可从 CSV 读取或由任意有限晶体物化得到。
//!
//! ## CSV 格式
//! ```text
//! source,index,target
//! 1,1,2
//! 2,2,3
//! 3,0,1
//! x,,
//! ```
//! 每行表示 `f_index(source) = target`；`index` 与 `target` 同时为空的行
//! 只声明一个孤立顶点。顶点按首次出现的顺序排序。
//!
//! ## 校验
//! - 指标必须属于 Cartan 类型的指标集
//! - 每个 `f_i`, `e_i` 都是部分单射
//! - 不存在循环的 `i`-串
//!
//! ## 依赖关系
//! - 被 `commands/` 使用（CLI 统一把晶体物化为表格）
//! - 使用 `csv` + `serde` 读写

use crate::crystal::{traversal, Cardinality, Crystal};
use crate::error::{CrystalError, Result};
use crate::root_system::CartanType;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

/// CSV 中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub index: Option<usize>,
    pub target: Option<String>,
}

impl EdgeRecord {
    pub fn edge(source: impl Into<String>, index: usize, target: impl Into<String>) -> Self {
        EdgeRecord {
            source: source.into(),
            index: Some(index),
            target: Some(target.into()),
        }
    }

    pub fn vertex(label: impl Into<String>) -> Self {
        EdgeRecord {
            source: label.into(),
            index: None,
            target: None,
        }
    }
}

/// 表格晶体的顶点；相等与顺序只看位置
#[derive(Debug, Clone)]
pub struct Vertex {
    pos: usize,
    label: Arc<str>,
}

impl Vertex {
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos.cmp(&other.pos)
    }
}

impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// 表格晶体
#[derive(Debug, Clone)]
pub struct TableCrystal {
    name: String,
    cartan: CartanType,
    labels: Vec<Arc<str>>,
    latex: Vec<String>,
    f_map: HashMap<(usize, usize), usize>,
    e_map: HashMap<(usize, usize), usize>,
    generators: Vec<usize>,
}

impl TableCrystal {
    /// 从箭头记录构造
    pub fn from_records<I>(name: impl Into<String>, cartan: CartanType, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let name = name.into();
        let mut labels: Vec<Arc<str>> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut edges = Vec::new();

        let mut intern = |label: &str, labels: &mut Vec<Arc<str>>| -> usize {
            if let Some(&pos) = positions.get(label) {
                return pos;
            }
            let pos = labels.len();
            labels.push(Arc::from(label));
            positions.insert(label.to_string(), pos);
            pos
        };

        for (row, record) in records.into_iter().enumerate() {
            let source = record.source.trim();
            if source.is_empty() {
                return Err(CrystalError::InvalidInput(format!(
                    "row {}: empty source label",
                    row + 1
                )));
            }
            let src = intern(source, &mut labels);
            match (record.index, record.target.as_deref().map(str::trim)) {
                (Some(i), Some(target)) if !target.is_empty() => {
                    let dst = intern(target, &mut labels);
                    edges.push((src, i, dst));
                }
                (None, None) | (None, Some("")) => {}
                _ => {
                    return Err(CrystalError::InvalidInput(format!(
                        "row {}: index and target must be given together",
                        row + 1
                    )))
                }
            }
        }

        let latex = labels.iter().map(|l| l.to_string()).collect();
        Self::build(name, cartan, labels, latex, edges)
    }

    /// 从 CSV 文件读取
    pub fn from_csv(path: &Path, cartan: CartanType) -> Result<Self> {
        if !path.exists() {
            return Err(CrystalError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path).map_err(|e| CrystalError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        let records = rdr
            .deserialize::<EdgeRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("table")
            .to_string();

        Self::from_records(name, cartan, records).map_err(|e| CrystalError::ParseError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// 把任意有限晶体物化为表格；顶点顺序与原晶体的序一致
    pub fn from_crystal<C>(crystal: &C) -> Result<Self>
    where
        C: Crystal + fmt::Display,
    {
        let mut elements = crystal.list()?;
        elements.sort();

        let mut positions = HashMap::new();
        let mut labels: Vec<Arc<str>> = Vec::with_capacity(elements.len());
        let mut by_label: HashMap<String, usize> = HashMap::new();
        for (pos, b) in elements.iter().enumerate() {
            let label = b.to_string();
            if by_label.insert(label.clone(), pos).is_some() {
                return Err(CrystalError::InvalidInput(format!(
                    "two elements of {} share the label '{}'",
                    crystal, label
                )));
            }
            labels.push(Arc::from(label.as_str()));
            positions.insert(b.clone(), pos);
        }

        let mut edges = Vec::new();
        for (pos, b) in elements.iter().enumerate() {
            for i in crystal.index_set() {
                if let Some(y) = crystal.f(b, i) {
                    let dst = positions.get(&y).copied().ok_or_else(|| {
                        CrystalError::InvalidInput(format!(
                            "f_{}({}) = {} is missing from the element list",
                            i, b, y
                        ))
                    })?;
                    edges.push((pos, i, dst));
                }
            }
        }

        let latex = elements.iter().map(|b| crystal.latex(b)).collect();
        Self::build(crystal.to_string(), crystal.cartan_type(), labels, latex, edges)
    }

    fn build(
        name: String,
        cartan: CartanType,
        labels: Vec<Arc<str>>,
        latex: Vec<String>,
        edges: Vec<(usize, usize, usize)>,
    ) -> Result<Self> {
        let mut f_map = HashMap::new();
        let mut e_map = HashMap::new();

        for (src, i, dst) in edges {
            cartan.check_index(i)?;
            if let Some(&old) = f_map.get(&(src, i)) {
                if old != dst {
                    return Err(CrystalError::InvalidInput(format!(
                        "f_{} of '{}' is both '{}' and '{}'",
                        i, labels[src], labels[old], labels[dst]
                    )));
                }
                continue;
            }
            if let Some(&old) = e_map.get(&(dst, i)) {
                return Err(CrystalError::InvalidInput(format!(
                    "e_{} of '{}' is both '{}' and '{}'",
                    i, labels[dst], labels[old], labels[src]
                )));
            }
            f_map.insert((src, i), dst);
            e_map.insert((dst, i), src);
        }

        // 部分单射下，环上任一点出发都会回到自身
        for &(start, i) in f_map.keys() {
            let mut x = start;
            for _ in 0..labels.len() {
                match f_map.get(&(x, i)) {
                    Some(&y) if y == start => {
                        return Err(CrystalError::InvalidInput(format!(
                            "the {}-string through '{}' is a cycle",
                            i, labels[start]
                        )))
                    }
                    Some(&y) => x = y,
                    None => break,
                }
            }
        }

        let mut table = TableCrystal {
            name,
            cartan,
            labels,
            latex,
            f_map,
            e_map,
            generators: Vec::new(),
        };
        table.generators = traversal::connected_components(&table)?
            .into_iter()
            .filter_map(|component| component.first().map(|v| v.pos))
            .collect();
        Ok(table)
    }

    fn vertex(&self, pos: usize) -> Vertex {
        Vertex {
            pos,
            label: self.labels[pos].clone(),
        }
    }

    /// 按标签查找顶点
    pub fn get(&self, label: &str) -> Option<Vertex> {
        self.labels
            .iter()
            .position(|l| l.as_ref() == label)
            .map(|pos| self.vertex(pos))
    }

    /// 全部记录：先按顺序声明每个顶点，再按源顶点与指标列出箭头
    pub fn records(&self) -> Vec<EdgeRecord> {
        let mut edges: Vec<(usize, usize, usize)> = self
            .f_map
            .iter()
            .map(|(&(src, i), &dst)| (src, i, dst))
            .collect();
        edges.sort();

        self.labels
            .iter()
            .map(|label| EdgeRecord::vertex(label.to_string()))
            .chain(edges.into_iter().map(|(src, i, dst)| {
                EdgeRecord::edge(self.labels[src].to_string(), i, self.labels[dst].to_string())
            }))
            .collect()
    }

    /// 写出为 CSV
    pub fn to_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        for record in self.records() {
            wtr.serialize(record)?;
        }
        wtr.flush().map_err(|e| CrystalError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(())
    }
}

impl fmt::Display for TableCrystal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Crystal for TableCrystal {
    type Element = Vertex;

    fn cartan_type(&self) -> CartanType {
        self.cartan
    }

    fn module_generators(&self) -> Vec<Vertex> {
        self.generators.iter().map(|&pos| self.vertex(pos)).collect()
    }

    fn cardinality(&self) -> Cardinality {
        Cardinality::Finite(self.labels.len())
    }

    fn e(&self, b: &Vertex, i: usize) -> Option<Vertex> {
        self.e_map.get(&(b.pos, i)).map(|&pos| self.vertex(pos))
    }

    fn f(&self, b: &Vertex, i: usize) -> Option<Vertex> {
        self.f_map.get(&(b.pos, i)).map(|&pos| self.vertex(pos))
    }

    fn latex(&self, b: &Vertex) -> String {
        self.latex[b.pos].clone()
    }

    fn list(&self) -> Result<Vec<Vertex>> {
        Ok((0..self.labels.len()).map(|pos| self.vertex(pos)).collect())
    }
}
