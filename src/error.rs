use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 上传相关错误
    #[error("上传错误: {0}")]
    Upload(#[from] UploadError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 编辑器插入错误
    #[error("插入错误: {0}")]
    Injection(#[from] InjectionError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误
    #[error("错误: {0}")]
    Other(String),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {0}")]
    ScriptExecutionFailed(#[from] chromiumoxide::error::CdpError),
    /// 脚本返回值无法解析
    #[error("脚本返回值解析失败: {0}")]
    UnexpectedResult(#[from] serde_json::Error),
}

/// 上传相关错误
#[derive(Debug, Error)]
pub enum UploadError {
    /// 缺少 token
    #[error("上传图片需要登录公众号后台 (缺少 token)")]
    AuthMissing,
    /// 网络请求失败
    #[error("上传请求失败: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 接口返回错误信封
    #[error("接口返回错误 (ret={ret}): {message}")]
    Rejected { ret: i64, message: String },
    /// 无法识别的响应结构
    #[error("未知响应结构: {body}")]
    UnrecognizedResponse { body: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 文本不是合法 UTF-8
    #[error("文本解码失败 ({path}): {source}")]
    DecodeFailed {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 编辑器插入错误
#[derive(Debug, Error)]
pub enum InjectionError {
    /// 顶层页面和 iframe 都没有可用的文档
    #[error("找不到可用的编辑器文档")]
    NoDocument,
    /// insertHTML 返回 false
    #[error("编辑器拒绝插入内容 ({target})")]
    Rejected { target: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 错误分类，对应单个文件处理失败的几种原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthMissing,
    UploadFailed,
    ReadFailed,
    InjectionFailed,
    Other,
}

impl AppError {
    /// 返回错误所属的分类
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Upload(UploadError::AuthMissing) => ErrorKind::AuthMissing,
            AppError::Upload(_) => ErrorKind::UploadFailed,
            AppError::File(FileError::ReadFailed { .. })
            | AppError::File(FileError::DecodeFailed { .. }) => ErrorKind::ReadFailed,
            AppError::Injection(_) => ErrorKind::InjectionFailed,
            // 注入脚本本身执行失败也算插入失败
            AppError::Browser(_) => ErrorKind::InjectionFailed,
            _ => ErrorKind::Other,
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Browser(BrowserError::UnexpectedResult(err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upload(UploadError::RequestFailed(err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建浏览器连接错误
    pub fn browser_connection_failed(port: u16, source: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed { port, source })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
