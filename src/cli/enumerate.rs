//! # enumerate 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/enumerate.rs`

use super::CrystalArgs;
use clap::Args;
use std::path::PathBuf;

/// enumerate 子命令参数
#[derive(Args, Debug)]
pub struct EnumerateArgs {
    #[command(flatten)]
    pub crystal: CrystalArgs,

    /// Maximum number of operator applications from the generators
    #[arg(long, short = 'd', default_value_t = 3)]
    pub depth: usize,

    /// Restrict to these indices (comma separated, e.g. '1,2')
    #[arg(long, value_delimiter = ',')]
    pub index_set: Vec<usize>,

    /// Sort by (grade, element) instead of discovery order
    #[arg(long, default_value_t = false)]
    pub sorted: bool,

    /// Maximum number of rows to print
    #[arg(long, default_value_t = 50)]
    pub max_rows: usize,

    /// Export the subcrystal graph to this CSV file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}
