//! # affcrystal - 仿射晶体的仿射化
//!
//! 把有限仿射晶体 `B` 扩展为无限晶体 `B^aff = { b(m) }`，
//! 其中 `e_0` / `f_0` 使阶 `m` 加减一，权增加 `m δ`。
//!
//! ## 子命令
//! - `info`      - 底层晶体与仿射化概览
//! - `apply`     - 作用算子串
//! - `enumerate` - 有界子晶体列表与 CSV 导出
//! - `export`    - 把底层晶体写成 CSV 表格
//! - `verify`    - 校验仿射化性质（支持批量表格）
//!
//! ## 依赖关系
//! - 只负责解析参数与报告错误，其余全部在库 `affcrystal`（`lib.rs`）中
//! - 使用 `cli/` 定义参数，`commands/` 执行

use affcrystal::cli::Cli;
use affcrystal::{commands, utils};
use clap::Parser;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
