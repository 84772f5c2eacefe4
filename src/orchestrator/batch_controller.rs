//! 批次控制器 - 编排层
//!
//! ## 职责
//!
//! 把一批文件按序号排好，逐个交给 `ItemFlow`，并把每个文件的结果收集成清单。
//!
//! ## 阶段
//!
//! 排序 → 读取授权（仅当批次里有图片）→ 逐个处理 → 完成
//!
//! - 严格串行：同一时间只有一个文件在上传或插入
//! - 单个文件失败只记录结果，不中断批次，也不重试
//! - 只有读取授权失败会中止整个批次（此时还没有处理任何文件）

use crate::error::AppResult;
use crate::models::{ordering_key, BatchReport, FileItem, FileKind, ProcessingOutcome};
use crate::services::{AuthSource, FailureWriter};
use crate::workflow::{ItemCtx, ItemFlow};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// 批次中的等待时间
#[derive(Debug, Clone, Copy)]
pub struct BatchTiming {
    /// 成功插入后等待编辑器渲染
    pub settle_delay: Duration,
    /// 失败后停顿，留出查看提示的时间
    pub failure_pause: Duration,
}

impl Default for BatchTiming {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(500),
            failure_pause: Duration::from_millis(2000),
        }
    }
}

/// 按文件名开头的数字升序排列，数字相同的保持原顺序
pub fn sort_items(items: &mut [FileItem]) {
    // sort_by_key 是稳定排序
    items.sort_by_key(|item| ordering_key(&item.name));
}

/// 批次控制器
pub struct BatchController {
    flow: ItemFlow,
    auth_source: Box<dyn AuthSource>,
    timing: BatchTiming,
    failure_writer: Option<FailureWriter>,
    cancel: CancellationToken,
}

impl BatchController {
    pub fn new(flow: ItemFlow, auth_source: Box<dyn AuthSource>, timing: BatchTiming) -> Self {
        Self {
            flow,
            auth_source,
            timing,
            failure_writer: None,
            cancel: CancellationToken::new(),
        }
    }

    /// 失败的文件同时写入失败清单
    pub fn with_failure_writer(mut self, writer: FailureWriter) -> Self {
        self.failure_writer = Some(writer);
        self
    }

    /// 使用外部的取消令牌，在两个文件之间检查
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 处理整批文件，返回与排序后顺序一致的结果清单
    pub async fn run(&self, mut items: Vec<FileItem>) -> AppResult<BatchReport> {
        sort_items(&mut items);
        let total = items.len();
        info!("✅ 已准备 {} 个文件", total);

        let auth = if items.iter().any(|item| item.kind() == FileKind::Image) {
            info!("🔐 正在获取公众号授权信息...");
            let auth = self.auth_source.resolve().await.map_err(|e| {
                error!("❌ 获取授权信息失败: {}", e);
                e
            })?;
            if !auth.has_token() {
                warn!("未获取到 token，图片将无法上传");
            }
            Some(auth)
        } else {
            None
        };

        let mut report = BatchReport::default();

        for (idx, item) in items.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!("⏹ 批次已取消，剩余 {} 个文件未处理", total - idx);
                for rest in &items[idx..] {
                    report.push(&rest.name, ProcessingOutcome::Cancelled);
                }
                break;
            }

            let ctx = ItemCtx::new(idx + 1, total, &item.name);

            match self.flow.run(item, &ctx, auth.as_ref()).await {
                Ok(target) => {
                    info!("✓ {} 已插入 ({}): {}", ctx, target, ctx.name);
                    report.push(&item.name, ProcessingOutcome::Success);
                    sleep(self.timing.settle_delay).await;
                }
                Err(e) => {
                    let reason = e.to_string();
                    warn!("⚠️ 第 {} 个文件出错 ({:?}): {}", ctx.index, e.kind(), reason);
                    if let Some(writer) = &self.failure_writer {
                        if let Err(write_err) = writer.write(ctx.index, &ctx.name, &reason) {
                            warn!("写入失败清单出错: {}", write_err);
                        }
                    }
                    report.push(&item.name, ProcessingOutcome::Failure { reason });
                    sleep(self.timing.failure_pause).await;
                }
            }
        }

        info!(
            "🎉 全部完成！成功 {}/{}，失败 {}",
            report.succeeded(),
            report.total(),
            report.failed()
        );
        Ok(report)
    }
}
