//! 单个文件处理流程 - 流程层
//!
//! 核心职责：定义"一个文件"的完整处理流程
//!
//! 流程顺序：
//! 1. 文本 → 读取内容；图片 → 检查 token → 上传
//! 2. 排版
//! 3. 插入编辑器

use tracing::info;

use crate::error::{AppResult, UploadError};
use crate::models::{AuthContext, FileItem, FileKind};
use crate::services::{
    Asset, AssetUploader, Body, ContentRenderer, EditorInjector, SurfaceTarget,
};
use crate::workflow::item_ctx::ItemCtx;

/// 单个文件处理流程
///
/// - 编排 读取/上传 → 排版 → 插入
/// - 不做失败隔离，错误直接返回给编排层
/// - 不持有任何页面资源，只依赖业务能力（services）
pub struct ItemFlow {
    renderer: ContentRenderer,
    uploader: Box<dyn AssetUploader>,
    injector: EditorInjector,
}

impl ItemFlow {
    pub fn new(
        renderer: ContentRenderer,
        uploader: Box<dyn AssetUploader>,
        injector: EditorInjector,
    ) -> Self {
        Self {
            renderer,
            uploader,
            injector,
        }
    }

    /// 处理一个文件
    ///
    /// `auth` 为 `None` 表示本批没有读取授权信息（纯文本批次），
    /// 遇到图片时与缺少 token 一样处理。
    pub async fn run(
        &self,
        item: &FileItem,
        ctx: &ItemCtx,
        auth: Option<&AuthContext>,
    ) -> AppResult<SurfaceTarget> {
        info!("⚡ {} 处理中: {}...", ctx, ctx.name);

        let fragment = match item.kind() {
            FileKind::Text => {
                let content = item.read_text().await?;
                self.renderer.render(item, Body::Text(&content))
            }
            FileKind::Image => {
                let auth = auth
                    .filter(|a| a.has_token())
                    .ok_or(UploadError::AuthMissing)?;

                info!("☁️ {} 上传图片: {}...", ctx, ctx.name);
                let asset = Asset {
                    name: item.name.clone(),
                    mime_type: item.mime_type.clone(),
                    size: item.size,
                    bytes: item.read_bytes().await?,
                };
                let uploaded = self.uploader.upload(asset, auth).await?;
                self.renderer.render(
                    item,
                    Body::Image {
                        cdn_url: &uploaded.cdn_url,
                    },
                )
            }
        };

        info!("📝 {} 排版插入 ({} 块)...", ctx, fragment.len());
        self.injector.inject(&fragment).await
    }
}
