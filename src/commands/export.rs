//! # export 子命令实现
//!
//! 把底层晶体写成 `source,index,target` 格式的 CSV，可再用 `--table` 读回。
//!
//! ## 依赖关系
//! - 使用 `cli/export.rs` 定义的 ExportArgs
//! - 使用 `crystals/table.rs`
//! - 使用 `utils/output.rs`

use super::load_crystal;
use crate::cli::export::ExportArgs;
use crate::crystal::Crystal;
use crate::error::{CrystalError, Result};
use crate::utils::output;

use std::fs;

/// 执行 export
pub fn execute(args: ExportArgs) -> Result<()> {
    if args.output.exists() && !args.overwrite {
        output::print_skip(&format!(
            "'{}' exists (use --overwrite to replace it)",
            args.output.display()
        ));
        return Ok(());
    }

    let base = load_crystal(&args.crystal)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CrystalError::FileWriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    base.to_csv(&args.output)?;
    output::print_success(&format!(
        "{} ({} elements, type {}) written to '{}'",
        base,
        base.cardinality(),
        base.cartan_type(),
        args.output.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CrystalArgs;
    use crate::crystals::TableCrystal;

    fn export_args(output: std::path::PathBuf, overwrite: bool) -> ExportArgs {
        ExportArgs {
            crystal: CrystalArgs {
                cartan: "C2^(1)".parse().unwrap(),
                factors: 1,
                table: None,
            },
            output,
            overwrite,
        }
    }

    #[test]
    fn test_export_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("c2.csv");
        execute(export_args(path.clone(), false)).unwrap();

        let table = TableCrystal::from_csv(&path, "C2^(1)".parse().unwrap()).unwrap();
        assert_eq!(table.cardinality().to_string(), "4");
        assert_eq!(table.module_generators()[0].to_string(), "1");
    }

    #[test]
    fn test_export_skips_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.csv");
        fs::write(&path, "untouched").unwrap();
        execute(export_args(path.clone(), false)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "untouched");

        execute(export_args(path.clone(), true)).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("source,index,target"));
    }
}
