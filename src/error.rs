use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThirdEyeError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像ファイルではありません: {0}")]
    NotAnImage(String),

    #[error("バックエンドに接続できません: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("バックエンドエラー ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("結果画像の保存に失敗: {0}")]
    Output(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] third_eye_common::Error),
}

pub type Result<T> = std::result::Result<T, ThirdEyeError>;
