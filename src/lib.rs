//! # MP Batch Insert
//!
//! 把一个目录里的图片和文本批量排版后插入公众号后台编辑器
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文件
//! - `ContentRenderer` - 排版能力
//! - `PageAuthResolver` - 读取 token / ticket 能力
//! - `MpAssetUploader` - 上传图片能力
//! - `EditorInjector` - 插入编辑器能力
//! - `FailureWriter` - 写失败清单能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个文件"的完整处理流程
//! - `ItemCtx` - 上下文封装（第几个 / 共几个）
//! - `ItemFlow` - 流程编排（读取或上传 → 排版 → 插入）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_controller` - 排序、授权、逐个处理、失败隔离
//! - `orchestrator/batch_processor` - 应用入口，管理浏览器资源
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use config::Config;
pub use error::{AppError, AppResult, ErrorKind};
pub use infrastructure::JsExecutor;
pub use models::{AuthContext, BatchReport, FileItem, FileKind, ProcessingOutcome, RenderedFragment};
pub use orchestrator::{App, BatchController, BatchTiming};
pub use workflow::{ItemCtx, ItemFlow};
