//! # 根系数据模块
//!
//! 提供仿射化所需的最小根系数据：Cartan 类型与（扩展）权格。
//!
//! ## 依赖关系
//! - 被 `crystal/`, `crystals/`, `affinization/` 使用
//! - 子模块: cartan, weight

pub mod cartan;
pub mod weight;

pub use cartan::{CartanLetter, CartanType};
pub use weight::{Weight, WeightLattice};
