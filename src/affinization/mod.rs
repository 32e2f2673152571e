//! # 仿射化模块
//!
//! 把有限仿射晶体 `B` 扩展为带整数阶的无限晶体 `B^aff`。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `crystal/`, `root_system/`
//! - 子模块: crystal, element, laws

pub mod crystal;
pub mod element;
pub mod laws;

pub use crystal::{Affinize, AffinizedCrystal};
pub use element::AffinizedElement;
pub use laws::{check_laws, Law, LawReport, Violation};
