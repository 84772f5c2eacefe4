//! 测试用的假页面 / 假上传

#![allow(dead_code)]

use async_trait::async_trait;
use mp_batch_insert::error::{AppError, AppResult, UploadError};
use mp_batch_insert::models::{AuthContext, FileItem};
use mp_batch_insert::services::{
    Asset, AssetUploader, AuthSource, ContentRenderer, EditorInjector, EditorSurface,
    SurfaceTarget, UploadResult,
};
use mp_batch_insert::{BatchController, BatchTiming, ItemFlow};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// 返回固定授权信息，记录调用次数
#[derive(Clone, Default)]
pub struct FakeAuth {
    pub auth: AuthContext,
    pub fail: bool,
    pub calls: Arc<AtomicUsize>,
}

impl FakeAuth {
    pub fn with_token(token: &str) -> Self {
        Self {
            auth: AuthContext::new(Some(token.to_string()), None),
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthSource for FakeAuth {
    async fn resolve(&self) -> AppResult<AuthContext> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Other("page unreachable".to_string()));
        }
        Ok(self.auth.clone())
    }
}

/// 名字在 `reject` 中的文件上传失败，其余返回 `https://cdn.test/<name>`
#[derive(Clone, Default)]
pub struct FakeUploader {
    pub reject: Vec<String>,
    pub uploaded: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl AssetUploader for FakeUploader {
    async fn upload(&self, asset: Asset, auth: &AuthContext) -> AppResult<UploadResult> {
        if !auth.has_token() {
            return Err(UploadError::AuthMissing.into());
        }
        self.uploaded.lock().unwrap().push(asset.name.clone());
        if self.reject.contains(&asset.name) {
            return Err(UploadError::Rejected {
                ret: -1,
                message: "file too large".to_string(),
            }
            .into());
        }
        Ok(UploadResult {
            cdn_url: format!("https://cdn.test/{}", asset.name),
        })
    }
}

/// 记录插入内容的编辑器
#[derive(Clone)]
pub struct FakeSurface {
    pub has_frame: bool,
    pub inserted: Arc<Mutex<Vec<String>>>,
    /// 插入后立即取消（模拟处理中途按下 Ctrl-C）
    pub cancel_on_insert: Option<CancellationToken>,
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self {
            has_frame: true,
            inserted: Arc::default(),
            cancel_on_insert: None,
        }
    }
}

impl FakeSurface {
    pub fn inserted(&self) -> Vec<String> {
        self.inserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl EditorSurface for FakeSurface {
    async fn locate_frame(&self, _frame_id: &str) -> Option<SurfaceTarget> {
        self.has_frame.then_some(SurfaceTarget::Frame)
    }

    async fn locate_top(&self) -> Option<SurfaceTarget> {
        Some(SurfaceTarget::Top)
    }

    async fn insert_at_selection(
        &self,
        _target: SurfaceTarget,
        _frame_id: &str,
        html: &str,
    ) -> AppResult<bool> {
        self.inserted.lock().unwrap().push(html.to_string());
        if let Some(cancel) = &self.cancel_on_insert {
            cancel.cancel();
        }
        Ok(true)
    }

    async fn scroll_to_end(&self, _target: SurfaceTarget, _frame_id: &str) -> AppResult<()> {
        Ok(())
    }
}

pub fn zero_timing() -> BatchTiming {
    BatchTiming {
        settle_delay: Duration::ZERO,
        failure_pause: Duration::ZERO,
    }
}

pub fn controller(auth: FakeAuth, uploader: FakeUploader, surface: FakeSurface) -> BatchController {
    let injector = EditorInjector::new(Box::new(surface), "ueditor_0", Duration::ZERO);
    let flow = ItemFlow::new(ContentRenderer::default(), Box::new(uploader), injector);
    BatchController::new(flow, Box::new(auth), zero_timing())
}

/// 在目录中写入一个文件并生成 FileItem
pub async fn write_item(dir: &Path, name: &str, content: impl AsRef<[u8]>) -> FileItem {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    FileItem::from_path(&path).await.unwrap()
}

/// 在目录中写入文本文件并生成 FileItem，顺序与 `files` 一致
pub async fn write_items(dir: &Path, files: &[(&str, &str)]) -> Vec<FileItem> {
    let mut items = Vec::new();
    for (name, content) in files {
        items.push(write_item(dir, name, content).await);
    }
    items
}
