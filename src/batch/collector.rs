//! # 文件收集器
//!
//! 根据输入路径和模式收集待校验的表格文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配（逗号分隔多模式）
//! - 递归目录搜索
//!
//! ## 依赖关系
//! - 被 `commands/verify.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{CrystalError, Result};

use glob::Pattern;
use std::path::PathBuf;
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<String>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: vec!["*".to_string()],
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if self.patterns.is_empty() {
            self.patterns = vec!["*".to_string()];
        }
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件（按路径排序）
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        if !self.input.is_dir() {
            return Err(CrystalError::FileNotFound {
                path: self.input.display().to_string(),
            });
        }

        let patterns = self
            .patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    CrystalError::InvalidArgument(format!("Invalid pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map_or(false, |name| patterns.iter().any(|p| p.matches(name)))
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &std::path::Path) {
        fs::write(path, "source,index,target\n").unwrap();
    }

    #[test]
    fn test_collect_with_patterns() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.csv"));
        touch(&dir.path().join("a.csv"));
        touch(&dir.path().join("notes.txt"));
        fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub").join("c.csv"));

        let flat = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.csv")
            .collect()
            .unwrap();
        let names: Vec<_> = flat
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);

        let deep = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.csv, *.txt")
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(deep.len(), 4);
    }

    #[test]
    fn test_single_file_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("x.csv");
        touch(&file);
        assert_eq!(FileCollector::new(file.clone()).collect().unwrap(), vec![file]);

        assert!(FileCollector::new(dir.path().join("missing")).collect().is_err());
        assert!(FileCollector::new(dir.path().to_path_buf())
            .with_pattern("[")
            .collect()
            .is_err());
    }
}
