//! # info 子命令实现
//!
//! 打印底层晶体与其仿射化的概览。
//!
//! ## 依赖关系
//! - 使用 `cli/info.rs` 定义的 InfoArgs
//! - 使用 `affinization/`, `crystal/traversal.rs`
//! - 使用 `utils/output.rs`

use super::load_crystal;
use crate::affinization::Affinize;
use crate::cli::info::InfoArgs;
use crate::crystal::{traversal, Crystal};
use crate::crystals::{TableCrystal, Vertex};
use crate::error::Result;
use crate::utils::output;

use tabled::{Table, Tabled};

/// 底层元素表格行
#[derive(Debug, Clone, Tabled)]
struct VertexRow {
    #[tabled(rename = "Element")]
    element: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Generator")]
    generator: String,
    #[tabled(rename = "Highest weight")]
    highest: String,
}

/// 执行 info
pub fn execute(args: InfoArgs) -> Result<()> {
    let base = load_crystal(&args.crystal)?;
    let generators = base.module_generators();
    let highest = traversal::highest_weight_vectors(&base);
    let lowest = traversal::lowest_weight_vectors(&base)?;
    let affinization = base.clone().affinization()?;

    output::print_header(&format!("{}", affinization));

    output::print_field("Base crystal", &base.to_string());
    output::print_field("Cartan type", &base.cartan_type().to_string());
    output::print_field("Index set", &format!("{:?}", base.index_set()));
    output::print_field("Base cardinality", &base.cardinality().to_string());
    output::print_field(
        "Affinization cardinality",
        &affinization.cardinality().to_string(),
    );
    let realization = affinization.weight_lattice_realization();
    output::print_field("Weight lattice realization", &realization.to_string());
    output::print_field("Null root", &realization.null_root()?.to_string());

    output::print_separator();
    output::print_field("Module generators", &join(&generators));
    output::print_field(
        "Affinized generators",
        &join(&affinization.module_generators()),
    );
    output::print_field("Highest weight generators", &join(&highest));
    output::print_field("Lowest weight elements", &join(&lowest));

    if args.elements {
        let rows = vertex_rows(&base, &generators, &highest)?;
        println!("{}", Table::new(&rows));
    }

    Ok(())
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn vertex_rows(
    base: &TableCrystal,
    generators: &[Vertex],
    highest: &[Vertex],
) -> Result<Vec<VertexRow>> {
    let mark = |yes: bool| (if yes { "yes" } else { "" }).to_string();
    Ok(base
        .list()?
        .into_iter()
        .map(|b| VertexRow {
            element: b.to_string(),
            weight: base.weight(&b).to_string(),
            generator: mark(generators.contains(&b)),
            highest: mark(highest.contains(&b)),
        })
        .collect())
}
