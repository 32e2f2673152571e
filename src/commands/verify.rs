//! # verify 子命令实现
//!
//! 在有界子晶体上校验仿射化的各项性质。
//!
//! ## 功能
//! - 单个晶体：由 `--cartan` / `--factors` / `--table` 选择
//! - 批量模式：目录中的 CSV 表格并行校验（rayon）
//! - 汇总报告与违例列表
//!
//! ## 依赖关系
//! - 使用 `cli/verify.rs` 定义的 VerifyArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `affinization/laws.rs`

use super::{index_set, load_crystal};
use crate::affinization::{check_laws, Affinize, LawReport};
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::verify::VerifyArgs;
use crate::crystal::Crystal;
use crate::crystals::TableCrystal;
use crate::error::{CrystalError, Result};
use crate::root_system::CartanType;
use crate::utils::output;

use std::path::Path;

/// 最多打印的违例条数
const MAX_SHOWN: usize = 10;

/// 执行 verify
pub fn execute(args: VerifyArgs) -> Result<()> {
    output::print_header("Affinization Law Check");

    match args.input {
        Some(ref input) if input.is_dir() => execute_batch(&args, input),
        Some(ref input) if input.is_file() => {
            output::print_info(&format!("Single table mode: '{}'", input.display()));
            let table = TableCrystal::from_csv(input, args.crystal.cartan)?;
            verify_single(&table, &args)
        }
        Some(ref input) => Err(CrystalError::FileNotFound {
            path: input.display().to_string(),
        }),
        None => {
            let base = load_crystal(&args.crystal)?;
            verify_single(&base, &args)
        }
    }
}

/// 单个晶体模式
fn verify_single(base: &TableCrystal, args: &VerifyArgs) -> Result<()> {
    let affinization = base.clone().affinization()?;
    output::print_info(&format!("{}", affinization));

    let report = check_laws(&affinization, args.depth, index_set(&args.index_set))?;
    output::print_info(&format!(
        "{} elements within depth {}, {} checks",
        report.elements, args.depth, report.checks
    ));

    if report.is_ok() {
        output::print_success("All affinization laws hold");
        return Ok(());
    }

    output::print_warning("Violations:");
    for v in report.violations.iter().take(MAX_SHOWN) {
        output::print_error(&format!("  {}", v));
    }
    if report.violations.len() > MAX_SHOWN {
        output::print_warning(&format!(
            "  ... and {} more",
            report.violations.len() - MAX_SHOWN
        ));
    }
    Err(CrystalError::Other(format!(
        "{} of {} checks failed",
        report.violations.len(),
        report.checks
    )))
}

/// 批量处理模式
fn execute_batch(args: &VerifyArgs, input: &Path) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", input.display()));

    let files = FileCollector::new(input.to_path_buf())
        .with_pattern(&args.pattern)
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!(
        "Found {} tables, reading them as type {}",
        files.len(),
        args.crystal.cartan
    ));

    let cartan = args.crystal.cartan;
    let indices = index_set(&args.index_set);
    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| verify_file(file, cartan, args.depth, indices))?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} passed, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed tables:");
        for (path, err) in result.failures.iter().take(MAX_SHOWN) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > MAX_SHOWN {
            output::print_warning(&format!(
                "  ... and {} more",
                result.failures.len() - MAX_SHOWN
            ));
        }
        return Err(CrystalError::Other(format!(
            "{} of {} tables failed",
            result.failed,
            result.total()
        )));
    }

    Ok(())
}

/// 校验批量模式中的单个表格
fn verify_file(
    path: &Path,
    cartan: CartanType,
    depth: usize,
    index_set: Option<&[usize]>,
) -> ProcessResult {
    let name = path.display().to_string();
    match check_table(path, cartan, depth, index_set) {
        Ok(None) => ProcessResult::Skipped(format!("{}: empty table", name)),
        Ok(Some(report)) if report.is_ok() => ProcessResult::Success(format!(
            "{}: {} elements, {} checks",
            name, report.elements, report.checks
        )),
        Ok(Some(report)) => {
            let first = report
                .violations
                .first()
                .map(|v| v.to_string())
                .unwrap_or_default();
            ProcessResult::Failed(
                name,
                format!("{} violations, first: {}", report.violations.len(), first),
            )
        }
        Err(e) => ProcessResult::Failed(name, e.to_string()),
    }
}

fn check_table(
    path: &Path,
    cartan: CartanType,
    depth: usize,
    index_set: Option<&[usize]>,
) -> Result<Option<LawReport>> {
    let table = TableCrystal::from_csv(path, cartan)?;
    if table.module_generators().is_empty() {
        return Ok(None);
    }
    let affinization = table.affinization()?;
    check_laws(&affinization, depth, index_set).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_verify_file_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let a2: CartanType = "A2^(1)".parse().unwrap();

        let good = dir.path().join("good.csv");
        write(&good, "source,index,target\n1,1,2\n2,2,3\n3,0,1\n");
        assert!(matches!(
            verify_file(&good, a2, 3, None),
            ProcessResult::Success(_)
        ));

        let empty = dir.path().join("empty.csv");
        write(&empty, "source,index,target\n");
        assert!(matches!(
            verify_file(&empty, a2, 3, None),
            ProcessResult::Skipped(_)
        ));

        let bad_index = dir.path().join("bad.csv");
        write(&bad_index, "source,index,target\n1,5,2\n");
        assert!(matches!(
            verify_file(&bad_index, a2, 3, None),
            ProcessResult::Failed(_, _)
        ));

        let finite = dir.path().join("finite.csv");
        write(&finite, "source,index,target\n1,1,2\n");
        assert!(matches!(
            verify_file(&finite, "A2".parse().unwrap(), 3, None),
            ProcessResult::Failed(_, ref msg) if msg.contains("affine")
        ));
    }

    #[test]
    fn test_batch_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("a.csv"),
            "source,index,target\n1,1,2\n2,2,3\n3,0,1\n",
        );
        write(
            &dir.path().join("b.csv"),
            "source,index,target\nx,1,y\ny,2,z\nz,0,x\n",
        );
        write(&dir.path().join("ignored.txt"), "not a table");

        let args = VerifyArgs {
            crystal: crate::cli::CrystalArgs {
                cartan: "A2^(1)".parse().unwrap(),
                factors: 1,
                table: None,
            },
            input: Some(dir.path().to_path_buf()),
            pattern: "*.csv".to_string(),
            recursive: false,
            jobs: 2,
            depth: 3,
            index_set: Vec::new(),
        };
        execute(args).unwrap();
    }
}
