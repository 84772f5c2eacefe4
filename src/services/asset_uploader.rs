//! 素材上传服务 - 业务能力层
//!
//! 只负责"把一张图片传到公众号素材库并拿回 CDN 地址"

use crate::error::{AppResult, UploadError};
use crate::models::AuthContext;
use crate::utils::logging::truncate_text;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// 上传表单里固定的文件标识
const UPLOAD_FILE_ID: &str = "WU_FILE_0";

/// 待上传的素材
#[derive(Debug, Clone)]
pub struct Asset {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

/// 上传成功的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub cdn_url: String,
}

/// 素材上传能力
#[async_trait]
pub trait AssetUploader: Send + Sync {
    /// 上传素材，失败时返回带原因的错误，不重试
    async fn upload(&self, asset: Asset, auth: &AuthContext) -> AppResult<UploadResult>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    cdn_url: Option<String>,
    #[serde(default)]
    base_resp: Option<BaseResp>,
}

#[derive(Debug, Deserialize)]
struct BaseResp {
    #[serde(default)]
    ret: i64,
    #[serde(default)]
    err_msg: Option<String>,
}

/// 公众号素材上传客户端
pub struct MpAssetUploader {
    client: reqwest::Client,
    endpoint: String,
}

impl MpAssetUploader {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn build_form(asset: Asset) -> AppResult<Form> {
        let last_modified = chrono::Local::now()
            .format("%a %b %d %Y %H:%M:%S GMT%z")
            .to_string();
        let file_part = Part::bytes(asset.bytes)
            .file_name(asset.name.clone())
            .mime_str(&asset.mime_type)?;

        Ok(Form::new()
            .text("id", UPLOAD_FILE_ID)
            .text("name", asset.name)
            .text("type", asset.mime_type)
            .text("lastModifiedDate", last_modified)
            .text("size", asset.size.to_string())
            .part("file", file_part))
    }

    fn query(token: &str, ticket: Option<&str>) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("action", "upload_material".to_string()),
            ("f", "json".to_string()),
            ("writetype", "doublewrite".to_string()),
            ("groupid", "1".to_string()),
            ("token", token.to_string()),
            ("lang", "zh_CN".to_string()),
        ];
        if let Some(ticket) = ticket {
            query.push(("ticket_id", ticket.to_string()));
        }
        query
    }
}

/// 解析接口响应：有 cdn_url 即成功，否则看错误信封
fn parse_upload_response(body: &str) -> Result<UploadResult, UploadError> {
    let unrecognized = || UploadError::UnrecognizedResponse {
        body: truncate_text(body, 200),
    };

    let response: UploadResponse = serde_json::from_str(body).map_err(|_| unrecognized())?;

    if let Some(cdn_url) = response.cdn_url.filter(|u| !u.is_empty()) {
        return Ok(UploadResult { cdn_url });
    }

    match response.base_resp {
        Some(base) if base.ret != 0 => Err(UploadError::Rejected {
            ret: base.ret,
            message: base
                .err_msg
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "未知错误".to_string()),
        }),
        _ => Err(unrecognized()),
    }
}

#[async_trait]
impl AssetUploader for MpAssetUploader {
    async fn upload(&self, asset: Asset, auth: &AuthContext) -> AppResult<UploadResult> {
        let token = auth.token().ok_or(UploadError::AuthMissing)?;

        info!("☁️ 上传图片: {} ({} 字节)", asset.name, asset.size);
        let form = Self::build_form(asset)?;

        let mut request = self
            .client
            .post(&self.endpoint)
            .query(&Self::query(token, auth.ticket()))
            .multipart(form);
        if let Some(cookies) = &auth.cookies {
            request = request.header(reqwest::header::COOKIE, cookies);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("上传响应 ({}): {}", status, truncate_text(&body, 500));

        let result = parse_upload_response(&body)?;
        debug!("CDN 地址: {}", result.cdn_url);
        Ok(result)
    }
}
