use mp_batch_insert::error::{AppError, ErrorKind, UploadError};
use mp_batch_insert::models::AuthContext;
use mp_batch_insert::services::{Asset, AssetUploader, MpAssetUploader};
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn asset() -> Asset {
    Asset {
        name: "2猫.gif".to_string(),
        mime_type: "image/gif".to_string(),
        size: 4,
        bytes: b"GIF8".to_vec(),
    }
}

fn uploader(server: &MockServer) -> MpAssetUploader {
    MpAssetUploader::new(
        format!("{}/cgi-bin/filetransfer", server.uri()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_upload_returns_cdn_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/filetransfer"))
        .and(query_param("action", "upload_material"))
        .and(query_param("token", "12345"))
        .and(query_param("ticket_id", "tk"))
        .and(header("cookie", "slave_sid=abc"))
        .and(body_string_contains("WU_FILE_0"))
        .and(body_string_contains("lastModifiedDate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "base_resp": { "ret": 0, "err_msg": "ok" },
            "cdn_url": "https://mmbiz.qpic.cn/cat.gif"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthContext::new(Some("12345".to_string()), Some("tk".to_string()))
        .with_cookies(Some("slave_sid=abc".to_string()));
    let result = uploader(&server).upload(asset(), &auth).await.unwrap();

    assert_eq!(result.cdn_url, "https://mmbiz.qpic.cn/cat.gif");
}

#[tokio::test]
async fn test_upload_without_ticket_omits_ticket_param() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/filetransfer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cdn_url": "https://mmbiz.qpic.cn/x"
        })))
        .mount(&server)
        .await;

    let auth = AuthContext::new(Some("12345".to_string()), None);
    uploader(&server).upload(asset(), &auth).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query_pairs().all(|(k, _)| k != "ticket_id"));
    assert!(requests[0]
        .url
        .query_pairs()
        .any(|(k, v)| k == "token" && v == "12345"));
}

#[tokio::test]
async fn test_upload_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "base_resp": { "ret": 200003, "err_msg": "invalid session" }
        })))
        .mount(&server)
        .await;

    let auth = AuthContext::new(Some("12345".to_string()), None);
    let err = uploader(&server).upload(asset(), &auth).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UploadFailed);
    assert!(err.to_string().contains("invalid session"));
}

#[tokio::test]
async fn test_upload_unrecognized_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>请登录</html>"))
        .mount(&server)
        .await;

    let auth = AuthContext::new(Some("12345".to_string()), None);
    let err = uploader(&server).upload(asset(), &auth).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Upload(UploadError::UnrecognizedResponse { .. })
    ));
}

#[tokio::test]
async fn test_upload_without_token_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = uploader(&server)
        .upload(asset(), &AuthContext::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthMissing);
}
