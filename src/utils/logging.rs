/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use crate::config::Config;
use crate::models::BatchReport;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；未设置时 verbose 为 debug，否则为 info。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n批量插入日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
        .with_context(|| format!("无法写入日志文件: {}", log_file_path))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量插入公众号编辑器");
    info!("📂 输入目录: {}", config.input_folder);
    info!("🌐 浏览器调试端口: {}", config.browser_debug_port);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息，并把结果清单追加到日志文件
pub fn print_final_stats(report: &BatchReport, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    for item in &report.items {
        info!("{}", item);
    }
    info!("✅ 成功: {}/{}", report.succeeded(), report.total());
    info!("❌ 失败: {}", report.failed());
    if report.cancelled() > 0 {
        info!("⏹ 取消: {}", report.cancelled());
    }
    info!("{}", "=".repeat(60));

    match append_manifest(&config.output_log_file, report) {
        Ok(()) => info!("\n日志已保存至: {}", config.output_log_file),
        Err(e) => tracing::warn!("写入日志文件失败: {}", e),
    }
}

fn append_manifest(log_file_path: &str, report: &BatchReport) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", report)
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessingOutcome;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("今日份的猫", 2), "今日...");
        assert_eq!(truncate_text("abc", 3), "abc");
    }

    #[test]
    fn test_log_file_header_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        let path = path.to_str().unwrap();

        init_log_file(path).unwrap();
        let mut report = BatchReport::default();
        report.push("1a.txt", ProcessingOutcome::Success);
        append_manifest(path, &report).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("批量插入日志"));
        assert!(content.contains("✅ [1] 1a.txt"));
    }
}
