//! # enumerate 子命令实现
//!
//! 列出仿射化晶体中从生成元出发、深度有界的子晶体。
//!
//! ## 功能
//! - 终端表格：元素、阶、权、`ε`、`φ`
//! - 可选导出子晶体图为 CSV（与表格晶体相同的 `source,index,target` 格式）
//!
//! ## 依赖关系
//! - 使用 `cli/enumerate.rs` 定义的 EnumerateArgs
//! - 使用 `affinization/`, `crystal/traversal.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use super::{index_set, load_crystal};
use crate::affinization::{Affinize, AffinizedElement};
use crate::cli::enumerate::EnumerateArgs;
use crate::crystal::{Crystal, CrystalGraph};
use crate::crystals::{EdgeRecord, TableCrystal};
use crate::error::{CrystalError, Result};
use crate::utils::{output, progress};

use std::path::Path;
use tabled::{Table, Tabled};

/// 子晶体表格行
#[derive(Debug, Clone, Tabled)]
struct ElementRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Element")]
    element: String,
    #[tabled(rename = "Grade")]
    grade: i64,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "ε")]
    epsilon: String,
    #[tabled(rename = "φ")]
    phi: String,
}

/// 执行 enumerate
pub fn execute(args: EnumerateArgs) -> Result<()> {
    output::print_header("Affinization Subcrystal");

    let base = load_crystal(&args.crystal)?;
    let affinization = base.affinization()?;
    let indices = index_set(&args.index_set);

    output::print_info(&format!("{}", affinization));
    output::print_info(&format!("Depth bound: {}", args.depth));

    let spinner = progress::create_spinner("Enumerating subcrystal...");
    let mut elements = affinization.subcrystal(args.depth, indices)?;
    spinner.finish_and_clear();

    if args.sorted {
        elements.sort();
    }

    let shown: Vec<usize> = match indices {
        Some(set) => set.to_vec(),
        None => affinization.index_set(),
    };
    let rows: Vec<ElementRow> = elements
        .iter()
        .take(args.max_rows)
        .enumerate()
        .map(|(k, x)| element_row(k + 1, x, &shown))
        .collect();

    println!("{}", Table::new(&rows));
    if elements.len() > args.max_rows {
        output::print_warning(&format!(
            "... and {} more (use --max-rows to show them)",
            elements.len() - args.max_rows
        ));
    }

    let (lowest, highest) = grade_range(&elements);
    output::print_success(&format!(
        "{} elements, grades {} to {}",
        elements.len(),
        lowest,
        highest
    ));

    if let Some(ref path) = args.output {
        let graph = affinization.digraph(Some(&elements), indices)?;
        write_graph_csv(&graph, path)?;
        output::print_done(&format!(
            "{} vertices and {} edges written to '{}'",
            graph.node_count(),
            graph.edge_count(),
            path.display()
        ));
    }

    Ok(())
}

fn element_row(position: usize, x: &AffinizedElement<TableCrystal>, indices: &[usize]) -> ElementRow {
    let stat = |f: &dyn Fn(usize) -> i64| {
        let values: Vec<String> = indices.iter().map(|&i| f(i).to_string()).collect();
        format!("({})", values.join(", "))
    };
    ElementRow {
        position,
        element: x.to_string(),
        grade: x.grade(),
        weight: x.weight().to_string(),
        epsilon: stat(&|i| x.epsilon(i)),
        phi: stat(&|i| x.phi(i)),
    }
}

fn grade_range(elements: &[AffinizedElement<TableCrystal>]) -> (i64, i64) {
    let lowest = elements.iter().map(|x| x.grade()).min().unwrap_or(0);
    let highest = elements.iter().map(|x| x.grade()).max().unwrap_or(0);
    (lowest, highest)
}

/// 以 `source,index,target` 格式写出晶体图：先声明顶点，再列出 `f` 箭头
fn write_graph_csv(graph: &CrystalGraph<AffinizedElement<TableCrystal>>, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for v in graph.vertices() {
        wtr.serialize(EdgeRecord::vertex(v.to_string()))?;
    }
    for (src, i, dst) in graph.edges() {
        wtr.serialize(EdgeRecord::edge(src.to_string(), i, dst.to_string()))?;
    }
    wtr.flush().map_err(|e| CrystalError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CrystalArgs;
    use crate::root_system::CartanType;

    fn affinized(cartan: &str) -> crate::affinization::AffinizedCrystal<TableCrystal> {
        load_crystal(&CrystalArgs {
            cartan: cartan.parse::<CartanType>().unwrap(),
            factors: 1,
            table: None,
        })
        .unwrap()
        .affinization()
        .unwrap()
    }

    #[test]
    fn test_element_row() {
        let a = affinized("A2^(1)");
        let g = a.subcrystal(0, None).unwrap().remove(0);
        let row = element_row(1, &g, &[0, 1, 2]);
        assert_eq!(row.element, "1(0)");
        assert_eq!(row.grade, 0);
        assert_eq!(row.epsilon, "(1, 0, 0)");
        assert_eq!(row.phi, "(0, 1, 0)");
        assert_eq!(row.weight, "-Lambda[0] + Lambda[1]");
    }

    #[test]
    fn test_grade_range() {
        let a = affinized("A2^(1)");
        let s = a.subcrystal(4, None).unwrap();
        let (lowest, highest) = grade_range(&s);
        assert!(lowest < 0 && highest > 0);
        assert_eq!(grade_range(&[]), (0, 0));
    }

    #[test]
    fn test_write_graph_csv() {
        let a = affinized("A2^(1)");
        let s = a.subcrystal(2, None).unwrap();
        let graph = a.digraph(Some(&s), None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.csv");
        write_graph_csv(&graph, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let records: Vec<EdgeRecord> = rdr.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), graph.node_count() + graph.edge_count());
        assert_eq!(records[0], EdgeRecord::vertex("1(0)"));
        assert!(records.contains(&EdgeRecord::edge("1(0)", 1, "2(0)")));
    }
}
