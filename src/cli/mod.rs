//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `info`: 底层晶体与仿射化概览
//! - `apply`: 在仿射化晶体上作用算子串
//! - `enumerate`: 有界子晶体列表与导出
//! - `export`: 把底层晶体写成 CSV 表格
//! - `verify`: 校验仿射化性质（单个晶体或批量表格）
//!
//! 所有命令共享 `CrystalArgs` 选择底层晶体：
//! `B^{1,1}` 的张量幂（`--cartan`, `--factors`），或 CSV 表格（`--table`）。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: apply, enumerate, export, info, verify

pub mod apply;
pub mod enumerate;
pub mod export;
pub mod info;
pub mod verify;

use crate::root_system::CartanType;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// affcrystal - 仿射晶体的仿射化
#[derive(Parser)]
#[command(name = "affcrystal")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Affinization of finite affine crystals", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Show the base crystal and its affinization
    Info(info::InfoArgs),

    /// Apply a string of crystal operators (e.g. 'f1,f2,f0,e0') in the affinization
    Apply(apply::ApplyArgs),

    /// Enumerate a bounded subcrystal of the affinization
    Enumerate(enumerate::EnumerateArgs),

    /// Write the base crystal as a CSV edge table
    Export(export::ExportArgs),

    /// Check the affinization laws on one crystal or a directory of tables
    Verify(verify::VerifyArgs),
}

// ─────────────────────────────────────────────────────────────
// 底层晶体选择（各命令共享）
// ─────────────────────────────────────────────────────────────

/// 底层晶体参数
#[derive(Args, Debug, Clone)]
pub struct CrystalArgs {
    /// Affine Cartan type (e.g. 'A2^(1)', 'C3~', "['A', 2, 1]")
    #[arg(long, short = 'c', default_value = "A2^(1)", value_parser = parse_cartan)]
    pub cartan: CartanType,

    /// Number of B^{1,1} tensor factors
    #[arg(long, short = 'k', default_value_t = 1)]
    pub factors: usize,

    /// Read the base crystal from a CSV edge table (source,index,target) instead
    #[arg(long, conflicts_with = "factors")]
    pub table: Option<PathBuf>,
}

/// 解析 Cartan 类型参数
pub fn parse_cartan(input: &str) -> Result<CartanType, String> {
    input.parse::<CartanType>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_crystal_args_defaults() {
        let cli = Cli::try_parse_from(["affcrystal", "info"]).unwrap();
        match cli.command {
            Commands::Info(args) => {
                assert_eq!(args.crystal.cartan.to_string(), "['A', 2, 1]");
                assert_eq!(args.crystal.factors, 1);
                assert!(args.crystal.table.is_none());
            }
            _ => panic!("expected info"),
        }
    }

    #[test]
    fn test_grade_is_bounded() {
        let parse = |grade: &str| {
            Cli::try_parse_from(["affcrystal", "apply", "e0", "--grade", grade]).map(|cli| {
                match cli.command {
                    Commands::Apply(args) => args.grade,
                    _ => panic!("expected apply"),
                }
            })
        };
        assert_eq!(parse("-5").unwrap(), -5);
        assert_eq!(parse(&apply::MAX_GRADE.to_string()).unwrap(), apply::MAX_GRADE);
        assert!(parse(&i64::MAX.to_string()).is_err());
        assert!(parse(&i64::MIN.to_string()).is_err());
    }

    #[test]
    fn test_bad_cartan_rejected() {
        assert!(Cli::try_parse_from(["affcrystal", "info", "--cartan", "Q7"]).is_err());
        assert!(parse_cartan("C3~").is_ok());
    }
}
