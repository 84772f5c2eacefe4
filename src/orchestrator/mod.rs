//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用入口
//! - 管理应用生命周期（初始化、运行）
//! - 连接浏览器，创建 JsExecutor 和各项服务
//! - 加载输入目录中的文件
//! - 输出全局统计信息
//!
//! ### `batch_controller` - 批次控制器
//! - 排序、读取授权、逐个处理文件
//! - 单个文件失败隔离，收集结果清单
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (App)
//!     ↓
//! batch_controller (处理 Vec<FileItem>)
//!     ↓
//! workflow::ItemFlow (处理单个文件)
//!     ↓
//! services (能力层：renderer / uploader / injector / auth)
//!     ↓
//! infrastructure (基础设施：JsExecutor)
//! ```

pub mod batch_controller;
pub mod batch_processor;

// 重新导出主要类型
pub use batch_controller::{sort_items, BatchController, BatchTiming};
pub use batch_processor::App;
