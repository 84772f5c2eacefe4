//! 上传授权信息

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// 从公众号后台页面读取的授权信息
///
/// 每次批处理最多读取一次，之后在整个批次内共享。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthContext {
    /// URL 中的 token 参数
    #[serde(default)]
    pub token: Option<String>,
    /// 页面全局数据里的 ticket，数字按字符串读取，其他类型视为没有
    #[serde(default, deserialize_with = "lenient_string")]
    pub ticket: Option<String>,
    /// 页面 Cookie，供上传请求携带登录态
    #[serde(skip)]
    pub cookies: Option<String>,
}

impl AuthContext {
    pub fn new(token: Option<String>, ticket: Option<String>) -> Self {
        Self {
            token: non_empty(token),
            ticket: non_empty(ticket),
            cookies: None,
        }
    }

    pub fn with_cookies(mut self, cookies: Option<String>) -> Self {
        self.cookies = non_empty(cookies);
        self
    }

    /// 上传图片必须有 token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn ticket(&self) -> Option<&str> {
        self.ticket.as_deref().filter(|t| !t.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
