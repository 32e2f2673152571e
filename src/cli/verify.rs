//! # verify 子命令 CLI 定义
//!
//! 不给 `--input` 时校验 `CrystalArgs` 选择的晶体；
//! 给出文件或目录时按 `--cartan` 读取 CSV 表格并批量校验。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/verify.rs`

use super::CrystalArgs;
use clap::Args;
use std::path::PathBuf;

/// verify 子命令参数
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub crystal: CrystalArgs,

    /// CSV table or directory of tables to verify
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// File name pattern(s) in batch mode (comma separated)
    #[arg(long, short = 'p', default_value = "*.csv")]
    pub pattern: String,

    /// Search directories recursively
    #[arg(long, short = 'r', default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = number of CPUs)
    #[arg(long, short = 'j', default_value_t = 0)]
    pub jobs: usize,

    /// Depth of the subcrystal that is checked
    #[arg(long, short = 'd', default_value_t = 4)]
    pub depth: usize,

    /// Restrict to these indices (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub index_set: Vec<usize>,
}
