use crate::error::{AppError, AppResult, FileError};
use crate::models::file_item::FileItem;
use std::path::Path;
use tokio::fs;

/// 从文件夹中加载所有待插入文件
///
/// 只取目录下一层的普通文件，跳过隐藏文件；按文件名排序作为“选择顺序”，
/// 之后的数字排序是稳定的，序号相同的文件保持这里的先后。
pub async fn load_input_files(folder_path: &str) -> AppResult<Vec<FileItem>> {
    let folder = Path::new(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut items = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        let is_hidden = entry.file_name().to_string_lossy().starts_with('.');
        let is_file = entry
            .file_type()
            .await
            .map(|t| t.is_file())
            .unwrap_or(false);
        if is_hidden || !is_file {
            continue;
        }

        match FileItem::from_path(&path).await {
            Ok(item) => {
                tracing::debug!("已加载: {} ({} 字节)", item.name, item.size);
                items.push(item);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    items.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::info!("在 {} 中找到 {} 个文件", folder_path, items.len());

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::file_item::FileKind;

    #[tokio::test]
    async fn test_load_skips_hidden_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2猫.jpg"), b"jpg").unwrap();
        std::fs::write(dir.path().join("1说明.txt"), "你好").unwrap();
        std::fs::write(dir.path().join(".DS_Store"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let items = load_input_files(dir.path().to_str().unwrap()).await.unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["1说明.txt", "2猫.jpg"]);
        assert_eq!(items[0].kind(), FileKind::Text);
        assert_eq!(items[1].kind(), FileKind::Image);
    }

    #[tokio::test]
    async fn test_missing_folder_is_error() {
        let result = load_input_files("/definitely/not/here").await;
        assert!(result.is_err());
    }
}
