//! # 具体有限晶体
//!
//! 提供可供仿射化的有限晶体，以及用于校验的经典晶体。
//!
//! ## 依赖关系
//! - 被 `affinization/` 的测试与 `commands/` 使用
//! - 实现 `crystal::Crystal`
//! - 子模块: letters, kirillov_reshetikhin, tensor, table

pub mod kirillov_reshetikhin;
pub mod letters;
pub mod table;
pub mod tensor;

pub use kirillov_reshetikhin::KirillovReshetikhin;
pub use letters::{Letter, Letters};
pub use table::{EdgeRecord, TableCrystal, Vertex};
pub use tensor::{TensorElement, TensorProduct};
