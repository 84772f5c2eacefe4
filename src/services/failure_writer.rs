//! 失败清单写入服务 - 业务能力层
//!
//! 只负责"把失败的文件记到失败清单"，不关心流程

use crate::error::{AppError, AppResult, FileError};
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 失败清单写入服务
///
/// 每行一条：时间 | 序号 | 文件名 | 原因
pub struct FailureWriter {
    file_path: String,
}

impl FailureWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            file_path: path.into(),
        }
    }

    /// 追加一条失败记录
    pub fn write(&self, index: usize, name: &str, reason: &str) -> AppResult<()> {
        debug!("写入失败记录: #{} {}", index, name);

        let write_failed = |source| {
            AppError::File(FileError::WriteFailed {
                path: self.file_path.clone(),
                source,
            })
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .map_err(write_failed)?;

        let line = format!(
            "{} | #{} | {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            index,
            name,
            reason
        );
        file.write_all(line.as_bytes()).map_err(write_failed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed.txt");
        let writer = FailureWriter::with_path(path.to_string_lossy());

        writer.write(2, "2猫.jpg", "上传失败").unwrap();
        writer.write(5, "5狗.png", "缺少 token").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("| #2 | 2猫.jpg | 上传失败"));
        assert!(lines[1].ends_with("| #5 | 5狗.png | 缺少 token"));
    }
}
