//! 编辑器插入服务 - 业务能力层
//!
//! 只负责"把一段 HTML 插进编辑器当前光标处"，不关心内容从哪来

use crate::error::{AppResult, InjectionError};
use crate::infrastructure::JsExecutor;
use crate::models::RenderedFragment;
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// 插入目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceTarget {
    /// 编辑器 iframe 内的文档
    Frame,
    /// 顶层页面文档
    Top,
}

impl fmt::Display for SurfaceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceTarget::Frame => write!(f, "iframe"),
            SurfaceTarget::Top => write!(f, "top"),
        }
    }
}

/// 编辑器所在页面的操作原语
#[async_trait]
pub trait EditorSurface: Send + Sync {
    /// iframe 存在且可访问时返回 `Frame`，否则 `None`（不报错）
    async fn locate_frame(&self, frame_id: &str) -> Option<SurfaceTarget>;

    /// 顶层文档可用时返回 `Top`
    async fn locate_top(&self) -> Option<SurfaceTarget>;

    /// 聚焦后一次性插入整段 HTML，返回编辑器是否接受
    async fn insert_at_selection(
        &self,
        target: SurfaceTarget,
        frame_id: &str,
        html: &str,
    ) -> AppResult<bool>;

    /// 滚动到文档底部
    async fn scroll_to_end(&self, target: SurfaceTarget, frame_id: &str) -> AppResult<()>;
}

/// 编辑器插入服务
///
/// 优先插入 iframe，iframe 不存在或跨域时静默退回顶层文档。
/// 整个片段作为一次 insertHTML 插入，保证块的顺序和连续。
pub struct EditorInjector {
    surface: Box<dyn EditorSurface>,
    frame_id: String,
    scroll_delay: Duration,
}

impl EditorInjector {
    pub fn new(
        surface: Box<dyn EditorSurface>,
        frame_id: impl Into<String>,
        scroll_delay: Duration,
    ) -> Self {
        Self {
            surface,
            frame_id: frame_id.into(),
            scroll_delay,
        }
    }

    pub async fn inject(&self, fragment: &RenderedFragment) -> AppResult<SurfaceTarget> {
        let target = match self.surface.locate_frame(&self.frame_id).await {
            Some(target) => target,
            None => {
                debug!("编辑器 iframe '{}' 不可用，使用顶层文档", self.frame_id);
                self.surface
                    .locate_top()
                    .await
                    .ok_or(InjectionError::NoDocument)?
            }
        };

        let html = fragment.to_html();
        let accepted = self
            .surface
            .insert_at_selection(target, &self.frame_id, &html)
            .await?;
        if !accepted {
            return Err(InjectionError::Rejected {
                target: target.to_string(),
            }
            .into());
        }

        sleep(self.scroll_delay).await;
        if let Err(e) = self.surface.scroll_to_end(target, &self.frame_id).await {
            debug!("滚动到底部失败（忽略）: {}", e);
        }

        Ok(target)
    }
}

/// 浏览器页面上的编辑器
pub struct PageSurface {
    executor: JsExecutor,
}

impl PageSurface {
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }
}

#[derive(Debug, Deserialize)]
struct InsertResult {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// 取目标文档和窗口的脚本前缀，`target` 为 "frame" 时进入 iframe
fn resolve_target_js(target: SurfaceTarget, frame_id: &str) -> AppResult<String> {
    Ok(format!(
        r#"
        const frameId = {frame_id};
        let targetDoc = document;
        let targetWin = window;
        if ({use_frame}) {{
            const iframe = document.getElementById(frameId);
            targetDoc = iframe.contentDocument || iframe.contentWindow.document;
            targetWin = iframe.contentWindow;
        }}
        "#,
        frame_id = serde_json::to_string(frame_id)?,
        use_frame = target == SurfaceTarget::Frame,
    ))
}

#[async_trait]
impl EditorSurface for PageSurface {
    async fn locate_frame(&self, frame_id: &str) -> Option<SurfaceTarget> {
        let frame_id = serde_json::to_string(frame_id).ok()?;
        let script = format!(
            r#"
            (() => {{
                const iframe = document.getElementById({frame_id});
                if (!iframe) return false;
                try {{
                    const doc = iframe.contentDocument || iframe.contentWindow.document;
                    return !!(doc && doc.body);
                }} catch (e) {{
                    return false;
                }}
            }})()
            "#
        );
        match self.executor.eval_as::<bool>(script).await {
            Ok(true) => Some(SurfaceTarget::Frame),
            Ok(false) => None,
            Err(e) => {
                debug!("检测 iframe 失败: {}", e);
                None
            }
        }
    }

    async fn locate_top(&self) -> Option<SurfaceTarget> {
        match self
            .executor
            .eval_as::<bool>("(() => !!(document && document.body))()")
            .await
        {
            Ok(true) => Some(SurfaceTarget::Top),
            _ => None,
        }
    }

    async fn insert_at_selection(
        &self,
        target: SurfaceTarget,
        frame_id: &str,
        html: &str,
    ) -> AppResult<bool> {
        let script = format!(
            r#"
            (() => {{
                try {{
                    {resolve}
                    targetWin.focus();
                    targetDoc.body.focus();
                    const ok = targetDoc.execCommand('insertHTML', false, {html});
                    return {{ ok: !!ok }};
                }} catch (e) {{
                    return {{ ok: false, error: String(e) }};
                }}
            }})()
            "#,
            resolve = resolve_target_js(target, frame_id)?,
            html = serde_json::to_string(html)?,
        );
        let result: InsertResult = self.executor.eval_as(script).await?;
        if let Some(error) = &result.error {
            debug!("insertHTML 异常: {}", error);
        }
        Ok(result.ok)
    }

    async fn scroll_to_end(&self, target: SurfaceTarget, frame_id: &str) -> AppResult<()> {
        let script = format!(
            r#"
            (() => {{
                try {{
                    {resolve}
                    targetWin.scrollTo(0, targetDoc.body.scrollHeight);
                }} catch (e) {{}}
                return true;
            }})()
            "#,
            resolve = resolve_target_js(target, frame_id)?,
        );
        self.executor.eval(script).await?;
        Ok(())
    }
}
