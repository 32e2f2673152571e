//! # 统一错误处理模块
//!
//! 定义 affcrystal 的所有错误类型，使用 `thiserror` 派生。
//!
//! 注意：晶体算子 `e_i` / `f_i` 作用不到晶体内时返回 `None`，不属于错误。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// affcrystal 统一错误类型
#[derive(Error, Debug)]
pub enum CrystalError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 输入校验错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid Cartan type: {0}")]
    InvalidCartanType(String),

    #[error("Index {index} is not in the index set of type {cartan}")]
    InvalidIndex { index: usize, cartan: String },

    #[error("Cannot enumerate an infinite crystal without a depth bound")]
    InfiniteEnumeration,

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse crystal table: {path}\nReason: {reason}")]
    ParseError { path: String, reason: String },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, CrystalError>;
