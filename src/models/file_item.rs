//! 待插入文件

use crate::error::{AppError, AppResult, FileError};
use phf::phf_map;
use std::path::{Path, PathBuf};

/// 扩展名 → MIME 类型
static MIME_BY_EXTENSION: phf::Map<&'static str, &'static str> = phf_map! {
    "txt" => "text/plain",
    "png" => "image/png",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "webp" => "image/webp",
    "bmp" => "image/bmp",
    "svg" => "image/svg+xml",
};

const FALLBACK_MIME: &str = "application/octet-stream";

/// 文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// 文本：读取内容直接排版
    Text,
    /// 图片：上传后插入
    Image,
}

impl FileKind {
    /// 根据文件名判断类型，只有 `.txt` 算文本
    pub fn from_name(name: &str) -> Self {
        if name.to_lowercase().ends_with(".txt") {
            FileKind::Text
        } else {
            FileKind::Image
        }
    }
}

/// 根据文件名推断 MIME 类型
pub fn mime_type_for(name: &str) -> &'static str {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| MIME_BY_EXTENSION.get(ext.to_lowercase().as_str()).copied())
        .unwrap_or(FALLBACK_MIME)
}

/// 单个待处理文件
///
/// `kind` 在创建时确定，之后不会改变。
#[derive(Debug, Clone)]
pub struct FileItem {
    /// 源文件路径
    pub path: PathBuf,
    /// 原始文件名
    pub name: String,
    /// 文件类型
    kind: FileKind,
    /// MIME 类型
    pub mime_type: String,
    /// 文件大小（字节）
    pub size: u64,
}

impl FileItem {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        Self {
            path: path.into(),
            kind: FileKind::from_name(&name),
            mime_type: mime_type_for(&name).to_string(),
            name,
            size,
        }
    }

    /// 从磁盘文件创建，读取文件大小
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(path, name, metadata.len()))
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// 读取完整内容
    pub async fn read_bytes(&self) -> AppResult<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| AppError::file_read_failed(self.path.display().to_string(), e))
    }

    /// 按 UTF-8 读取文本内容
    pub async fn read_text(&self) -> AppResult<String> {
        let bytes = self.read_bytes().await?;
        String::from_utf8(bytes).map_err(|source| {
            AppError::from(FileError::DecodeFailed {
                path: self.path.display().to_string(),
                source,
            })
        })
    }
}
