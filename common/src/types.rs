//! ワークフローとAPI契約の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - SelectedFile: ユーザーが選択した画像ファイル
//! - DetectionResult: 検出成功時の表示用データ
//! - DetectResponse / HealthStatus / ModelInfo: バックエンドのJSON形状

use serde::{Deserialize, Serialize};

/// 選択された画像ファイル（選択後は変更しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// バイト数
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// 検出結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// "data:image/png;base64,..." 形式のハイライト画像
    pub highlighted_image: String,
    /// テキスト領域と判定されたピクセル数
    pub text_regions_detected: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
}

/// POST /detect-text のレスポンス
///
/// 成功時・失敗時どちらの形状も受け付ける
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectResponse {
    pub success: bool,
    pub highlighted_image: Option<String>,
    pub text_regions_detected: Option<u64>,
    pub confidence_threshold: Option<f64>,
    pub error: Option<String>,
}

/// GET /health のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
}

/// GET /model-info のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInfo {
    pub model_loaded: bool,
    pub input_size: Option<[u32; 2]>,
    pub output_size: Option<[u32; 2]>,
    pub model_path: Option<String>,
    pub error: Option<String>,
}
