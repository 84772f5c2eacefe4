//! 授权信息读取服务 - 业务能力层
//!
//! 只负责"从当前页面读出 token / ticket"，页面结构的假设全部集中在这里

use crate::error::AppResult;
use crate::infrastructure::JsExecutor;
use crate::models::AuthContext;
use async_trait::async_trait;
use tracing::{debug, info};

/// 授权信息来源
#[async_trait]
pub trait AuthSource: Send + Sync {
    /// 读取授权信息
    ///
    /// 页面上缺少 token / ticket 不是错误，返回空字段；
    /// 只有页面本身无法访问时才返回 `Err`。
    async fn resolve(&self) -> AppResult<AuthContext>;
}

/// 读取 URL 中的 token；ticket 放在 `window.wx.commonData.data` 里，
/// 读取出错时视为没有 ticket
const READ_AUTH_SCRIPT: &str = r#"
(() => {
    const urlParams = new URLSearchParams(window.location.search);
    const token = urlParams.get('token');
    let ticket = null;
    try {
        if (window.wx && window.wx.commonData && window.wx.commonData.data) {
            const raw = window.wx.commonData.data.ticket || window.wx.commonData.data.ticket_id;
            if (typeof raw === 'string') {
                ticket = raw;
            } else if (raw != null) {
                ticket = String(raw);
            }
        }
    } catch (e) {}
    return { token, ticket };
})()
"#;

/// 从公众号后台页面读取授权信息
pub struct PageAuthResolver {
    executor: JsExecutor,
}

impl PageAuthResolver {
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl AuthSource for PageAuthResolver {
    async fn resolve(&self) -> AppResult<AuthContext> {
        let raw: AuthContext = self.executor.eval_as(READ_AUTH_SCRIPT).await?;
        let cookies = self.executor.cookie_header().await;
        debug!(
            "授权信息: token={}, ticket={}, cookie={}",
            raw.token.is_some(),
            raw.ticket.is_some(),
            cookies.is_some()
        );

        let auth = AuthContext::new(raw.token, raw.ticket).with_cookies(cookies);
        if auth.has_token() {
            info!("🔐 已获取公众号授权信息");
        }
        Ok(auth)
    }
}
