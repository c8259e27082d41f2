//! 検出バックエンドへのHTTPクライアント
//!
//! - POST /detect-text: multipartで画像を送信
//! - GET /health, GET /model-info: 補助エンドポイント

use crate::config::Config;
use crate::error::{Result, ThirdEyeError};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use third_eye_common::{
    endpoint, interpret_response, DetectionResult, HealthStatus, ModelInfo, SelectedFile,
    DETECT_PATH, HEALTH_PATH, MODEL_INFO_PATH, UPLOAD_FIELD,
};

/// 検出処理の送信先
///
/// セッションはこのトレイト越しに送信するので、テストではHTTPなしで差し替えられる
#[allow(async_fn_in_trait)]
pub trait DetectService {
    async fn detect(&self, file: &SelectedFile) -> third_eye_common::Result<DetectionResult>;
}

#[derive(Clone)]
pub struct DetectClient {
    http: reqwest::Client,
    base_url: String,
}

impl DetectClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.get_json(HEALTH_PATH).await
    }

    pub async fn model_info(&self) -> Result<ModelInfo> {
        self.get_json(MODEL_INFO_PATH).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = endpoint(&self.base_url, path);
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ThirdEyeError::Backend {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl DetectService for DetectClient {
    async fn detect(&self, file: &SelectedFile) -> third_eye_common::Result<DetectionResult> {
        let url = endpoint(&self.base_url, DETECT_PATH);
        log::debug!("POST {} ({}, {} bytes)", url, file.mime_type, file.size());

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| third_eye_common::Error::Transport(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                log::error!("request to {} failed: {}", url, e);
                third_eye_common::Error::Transport(e.to_string())
            })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default();
        let body = response
            .text()
            .await
            .map_err(|e| third_eye_common::Error::Transport(e.to_string()))?;

        log::debug!("response {} ({} bytes)", status, body.len());
        interpret_response(status.as_u16(), status_text, &body)
    }
}
