//! 検出APIのレスポンス解釈
//!
//! 通信手段（ブラウザのfetch / reqwest）に依存しない部分だけを扱う。
//! シェルはステータスコード・ステータステキスト・本文を渡すだけでよい。

use crate::error::{Error, Result};
use crate::types::{DetectResponse, DetectionResult};
use serde::Deserialize;

pub const DETECT_PATH: &str = "/detect-text";
pub const HEALTH_PATH: &str = "/health";
pub const MODEL_INFO_PATH: &str = "/model-info";

/// multipartのフィールド名
pub const UPLOAD_FIELD: &str = "file";

/// バックエンドが返すアップロード上限（超えると413）
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

const DEFAULT_FAILURE: &str = "Text detection failed";

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// ベースURLとパスを連結（末尾の "/" は除去）
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// POST /detect-text の結果を解釈
///
/// - 非2xx: 本文の `error`、なければステータステキスト
/// - 2xx + success=false: `error`、なければ既定文言
/// - 2xx + success=true: 画像とカウントを取り出す
/// - 本文がJSONでない（2xx）: MalformedResponse
pub fn interpret_response(status: u16, status_text: &str, body: &str) -> Result<DetectionResult> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| {
                if status_text.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    status_text.to_string()
                }
            });
        return Err(Error::Api(message));
    }

    let response: DetectResponse = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    if !response.success {
        let message = response
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FAILURE.to_string());
        return Err(Error::Api(message));
    }

    let highlighted_image = response
        .highlighted_image
        .ok_or_else(|| Error::MalformedResponse("highlighted_image missing".to_string()))?;

    let text_regions_detected = response.text_regions_detected.unwrap_or_else(|| {
        log::warn!("text_regions_detected missing in success response; assuming 0");
        0
    });

    Ok(DetectionResult {
        highlighted_image,
        text_regions_detected,
        confidence_threshold: response.confidence_threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let body = r#"{"success":true,"highlighted_image":"data:image/png;base64,AAAA","text_regions_detected":42,"confidence_threshold":0.5}"#;
        let result = interpret_response(200, "OK", body).expect("成功するはず");
        assert_eq!(result.text_regions_detected, 42);
        assert_eq!(result.highlighted_image, "data:image/png;base64,AAAA");
        assert_eq!(result.confidence_threshold, Some(0.5));
    }

    #[test]
    fn test_http_error_with_body() {
        let err = interpret_response(400, "Bad Request", r#"{"error":"bad image"}"#).unwrap_err();
        assert_eq!(err.user_message(), "bad image");
    }

    #[test]
    fn test_http_error_falls_back_to_status_text() {
        let err = interpret_response(502, "Bad Gateway", "<html>upstream</html>").unwrap_err();
        assert!(matches!(err, Error::Api(_)));
        assert_eq!(err.user_message(), "Bad Gateway");
    }

    #[test]
    fn test_http_error_empty_status_text() {
        let err = interpret_response(500, "", "").unwrap_err();
        assert_eq!(err.user_message(), "HTTP 500");
    }

    #[test]
    fn test_payload_too_large() {
        let body = r#"{"success":false,"error":"File too large. Maximum size is 16MB."}"#;
        let err = interpret_response(413, "Payload Too Large", body).unwrap_err();
        assert_eq!(err.user_message(), "File too large. Maximum size is 16MB.");
    }

    #[test]
    fn test_application_failure() {
        let body = r#"{"success":false,"error":"Could not decode image"}"#;
        let err = interpret_response(200, "OK", body).unwrap_err();
        assert_eq!(err.user_message(), "Could not decode image");
    }

    #[test]
    fn test_application_failure_without_message() {
        let err = interpret_response(200, "OK", r#"{"success":false}"#).unwrap_err();
        assert_eq!(err.user_message(), DEFAULT_FAILURE);
    }

    #[test]
    fn test_malformed_success_body() {
        let err = interpret_response(200, "OK", "not json").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
        assert!(err.is_connectivity());
    }

    #[test]
    fn test_success_without_image() {
        let err = interpret_response(200, "OK", r#"{"success":true,"text_regions_detected":1}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_success_without_count() {
        let body = r#"{"success":true,"highlighted_image":"data:image/png;base64,AA=="}"#;
        let result = interpret_response(201, "Created", body).expect("成功するはず");
        assert_eq!(result.text_regions_detected, 0);
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(endpoint("http://localhost:5000", DETECT_PATH), "http://localhost:5000/detect-text");
        assert_eq!(endpoint("http://localhost:5000/", HEALTH_PATH), "http://localhost:5000/health");
    }
}
