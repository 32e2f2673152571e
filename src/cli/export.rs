//! # export 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/export.rs`

use super::CrystalArgs;
use clap::Args;
use std::path::PathBuf;

/// export 子命令参数
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub crystal: CrystalArgs,

    /// Output CSV file
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Overwrite an existing output file
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
