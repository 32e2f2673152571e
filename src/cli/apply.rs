//! # apply 子命令 CLI 定义
//!
//! 算子串写成逗号分隔的 `e<i>` / `f<i>`，按从左到右的顺序作用。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/apply.rs`

use super::CrystalArgs;
use clap::Args;

/// 起始阶的绝对值上限
pub const MAX_GRADE: i64 = 1_000_000_000_000;

/// apply 子命令参数
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Operator string, applied left to right (e.g. 'f1,f2,f0,e0')
    pub operators: String,

    #[command(flatten)]
    pub crystal: CrystalArgs,

    /// Label of the starting base element (default: first module generator)
    #[arg(long)]
    pub start: Option<String>,

    /// Grade m of the starting element b(m)
    #[arg(
        long,
        short = 'm',
        default_value_t = 0,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(i64).range(-MAX_GRADE..=MAX_GRADE)
    )]
    pub grade: i64,

    /// Print every intermediate element
    #[arg(long, default_value_t = false)]
    pub trace: bool,
}
