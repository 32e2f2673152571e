//! # info 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/info.rs`

use super::CrystalArgs;
use clap::Args;

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub crystal: CrystalArgs,

    /// Also list every element of the base crystal
    #[arg(long, default_value_t = false)]
    pub elements: bool,
}
