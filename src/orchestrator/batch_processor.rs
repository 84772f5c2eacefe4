//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：写日志文件头、连接浏览器、创建 JsExecutor 和服务
//! 2. **加载文件**：扫描输入目录（代替弹窗里的文件选择）
//! 3. **运行批次**：委托 `BatchController`，Ctrl-C 时在两个文件之间停下
//! 4. **全局统计**：输出结果清单
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有 Browser 的模块
//! - **向下委托**：不处理单个文件的细节

use crate::browser;
use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::models::{load_input_files, BatchReport};
use crate::orchestrator::batch_controller::{BatchController, BatchTiming};
use crate::services::{
    ContentRenderer, EditorInjector, FailureWriter, MpAssetUploader, PageAuthResolver,
    PageSurface,
};
use crate::utils::logging;
use crate::workflow::ItemFlow;
use anyhow::{Context, Result};
use chromiumoxide::Browser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    executor: JsExecutor,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config);

        // 连接浏览器
        let (browser, page) =
            browser::connect_to_browser_and_page(config.browser_debug_port, &config.target_url)
                .await
                .context("无法连接到编辑器页面")?;

        // 创建 JsExecutor（持有 page）
        let executor = JsExecutor::new(page);

        Ok(Self {
            config,
            _browser: browser,
            executor,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<BatchReport> {
        info!("\n📁 正在扫描待插入的文件: {}", self.config.input_folder);
        let items = load_input_files(&self.config.input_folder)
            .await
            .with_context(|| format!("无法加载输入目录: {}", self.config.input_folder))?;

        if items.is_empty() {
            warn!("⚠️ 没有找到待插入的文件，程序结束");
            return Ok(BatchReport::default());
        }

        let controller = self.build_controller()?;

        let cancel = controller.cancellation_token();
        let ctrl_c = tokio::spawn(watch_ctrl_c(cancel));

        let report = controller.run(items).await;
        ctrl_c.abort();
        let report = report.context("批次中止")?;

        logging::print_final_stats(&report, &self.config);
        Ok(report)
    }

    fn build_controller(&self) -> Result<BatchController> {
        let uploader =
            MpAssetUploader::new(&self.config.upload_endpoint, self.config.upload_timeout())?;
        let injector = EditorInjector::new(
            Box::new(PageSurface::new(self.executor.clone())),
            &self.config.editor_frame_id,
            self.config.scroll_delay(),
        );
        let flow = ItemFlow::new(
            ContentRenderer::new(&self.config.banner_caption),
            Box::new(uploader),
            injector,
        );
        let timing = BatchTiming {
            settle_delay: self.config.settle_delay(),
            failure_pause: self.config.failure_pause(),
        };

        Ok(BatchController::new(
            flow,
            Box::new(PageAuthResolver::new(self.executor.clone())),
            timing,
        )
        .with_failure_writer(FailureWriter::with_path(&self.config.failed_log_file)))
    }
}

/// Ctrl-C 时请求取消，当前文件处理完后停止
async fn watch_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        warn!("收到 Ctrl-C，当前文件处理完后停止");
        cancel.cancel();
    }
}
