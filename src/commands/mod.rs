//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! 命令行上的底层晶体一律物化为 `TableCrystal`，
//! 因此各命令只需处理 `AffinizedCrystal<TableCrystal>` 一种具体类型。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `crystals/`, `affinization/`, `utils/`
//! - 子模块: apply, enumerate, export, info, verify

pub mod apply;
pub mod enumerate;
pub mod export;
pub mod info;
pub mod verify;

use crate::cli::{Commands, CrystalArgs};
use crate::crystals::{KirillovReshetikhin, TableCrystal, TensorProduct};
use crate::error::{CrystalError, Result};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Info(args) => info::execute(args),
        Commands::Apply(args) => apply::execute(args),
        Commands::Enumerate(args) => enumerate::execute(args),
        Commands::Export(args) => export::execute(args),
        Commands::Verify(args) => verify::execute(args),
    }
}

/// 按命令行参数构造底层晶体
pub fn load_crystal(args: &CrystalArgs) -> Result<TableCrystal> {
    if let Some(ref path) = args.table {
        return TableCrystal::from_csv(path, args.cartan);
    }

    if args.factors == 0 {
        return Err(CrystalError::InvalidArgument(
            "--factors must be at least 1".to_string(),
        ));
    }

    let kr = KirillovReshetikhin::new(args.cartan)?;
    let mut table = TableCrystal::from_crystal(&kr)?;
    for _ in 1..args.factors {
        table = TableCrystal::from_crystal(&TensorProduct::new(table, kr.clone())?)?;
    }
    Ok(table)
}

/// 解析 `--index-set`；空表示全部指标
pub(crate) fn index_set(indices: &[usize]) -> Option<&[usize]> {
    if indices.is_empty() {
        None
    } else {
        Some(indices)
    }
}
