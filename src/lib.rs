//! # affcrystal
//!
//! 有限仿射晶体的仿射化 `B^aff = { b(m) | b ∈ B, m ∈ Z }` 及其命令行工具。
//!
//! ```text
//! use affcrystal::affinization::Affinize;
//! use affcrystal::crystals::KirillovReshetikhin;
//!
//! let kr = KirillovReshetikhin::new("A2^(1)".parse()?)?;
//! let a = kr.affinization()?;
//! let x = a.module_generators()[0].f_string(&[1, 2, 0]); // Some(1(-1))
//! ```
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── root_system/  (Cartan 类型与权格)
//!   ├── crystal/      (晶体通用接口与遍历)
//!   ├── crystals/     (字母、KR 晶体、张量积、表格晶体)
//!   ├── affinization/ (仿射化晶体、元素与性质校验)
//!   ├── cli/, commands/, batch/, utils/ (命令行)
//!   └── error.rs      (错误处理)
//! ```

pub mod affinization;
pub mod batch;
pub mod cli;
pub mod commands;
pub mod crystal;
pub mod crystals;
pub mod error;
pub mod root_system;
pub mod utils;

pub use error::{CrystalError, Result};
