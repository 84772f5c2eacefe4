use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "batch_insert.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 编辑器页面 URL（用于查找或打开标签页）
    pub target_url: String,
    /// 待插入文件所在目录
    pub input_folder: String,
    /// 素材上传接口
    pub upload_endpoint: String,
    /// 上传请求超时（秒）
    pub upload_timeout_secs: u64,
    /// 编辑器 iframe 的 id
    pub editor_frame_id: String,
    /// 每个文件插入后的等待时间（毫秒）
    pub settle_delay_ms: u64,
    /// 单个文件失败后的停顿时间（毫秒）
    pub failure_pause_ms: u64,
    /// 插入后滚动到底部的延迟（毫秒）
    pub scroll_delay_ms: u64,
    /// 序号为 1 的文件前面插入的标题
    pub banner_caption: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 失败清单文件
    pub failed_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 2001,
            target_url: "https://mp.weixin.qq.com/cgi-bin/appmsg".to_string(),
            input_folder: "input".to_string(),
            upload_endpoint: "https://mp.weixin.qq.com/cgi-bin/filetransfer".to_string(),
            upload_timeout_secs: 60,
            editor_frame_id: "ueditor_0".to_string(),
            settle_delay_ms: 500,
            failure_pause_ms: 2000,
            scroll_delay_ms: 50,
            banner_caption: "【每日杂图】".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            failed_log_file: "failed.txt".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：配置文件（可选）+ 环境变量覆盖
    ///
    /// 配置文件路径取 `BATCH_INSERT_CONFIG`，未设置时使用当前目录下的
    /// `batch_insert.toml`；文件不存在时使用默认值。
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("BATCH_INSERT_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        base.with_env_overrides()
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| {
            AppError::from(ConfigError::ParseFailed {
                path: path.to_string(),
                source,
            })
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 使用环境变量覆盖配置项
    pub fn with_env_overrides(self) -> AppResult<Self> {
        Ok(Self {
            browser_debug_port: env_parse("BROWSER_DEBUG_PORT", self.browser_debug_port)?,
            target_url: std::env::var("TARGET_URL").unwrap_or(self.target_url),
            input_folder: std::env::var("INPUT_FOLDER").unwrap_or(self.input_folder),
            upload_endpoint: std::env::var("UPLOAD_ENDPOINT").unwrap_or(self.upload_endpoint),
            upload_timeout_secs: env_parse("UPLOAD_TIMEOUT_SECS", self.upload_timeout_secs)?,
            editor_frame_id: std::env::var("EDITOR_FRAME_ID").unwrap_or(self.editor_frame_id),
            settle_delay_ms: env_parse("SETTLE_DELAY_MS", self.settle_delay_ms)?,
            failure_pause_ms: env_parse("FAILURE_PAUSE_MS", self.failure_pause_ms)?,
            scroll_delay_ms: env_parse("SCROLL_DELAY_MS", self.scroll_delay_ms)?,
            banner_caption: std::env::var("BANNER_CAPTION").unwrap_or(self.banner_caption),
            verbose_logging: env_parse("VERBOSE_LOGGING", self.verbose_logging)?,
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            failed_log_file: std::env::var("FAILED_LOG_FILE").unwrap_or(self.failed_log_file),
        })
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn failure_pause(&self) -> Duration {
        Duration::from_millis(self.failure_pause_ms)
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }
}

fn env_parse<T: std::str::FromStr>(var_name: &str, default: T) -> AppResult<T> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map_err(|_| {
            AppError::from(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value: value.clone(),
                expected_type: std::any::type_name::<T>().to_string(),
            })
        }),
        Err(_) => Ok(default),
    }
}
