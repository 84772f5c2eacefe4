use anyhow::Result;
use mp_batch_insert::utils::logging;
use mp_batch_insert::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let mut config = Config::load()?;

    // 第一个参数可指定输入目录
    if let Some(folder) = std::env::args().nth(1) {
        config.input_folder = folder;
    }

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let report = App::initialize(config).await?.run().await?;

    if report.failed() > 0 {
        tracing::warn!("有 {} 个文件未能插入，详见失败清单", report.failed());
    }

    Ok(())
}
