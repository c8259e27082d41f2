//! エラー型定義

use thiserror::Error;

/// バックエンドに接続できない場合に表示するメッセージ
pub const CONNECTIVITY_MESSAGE: &str =
    "Failed to connect to the detection server. Please make sure the backend is running.";

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Please select a valid image file (got {mime})")]
    InvalidFileType { mime: String },

    #[error("Please select an image first")]
    NoFileSelected,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Api(String),

    #[error("Invalid data URL: {0}")]
    DataUrl(String),

    #[error("Could not read {0}")]
    FileUnreadable(String),
}

impl Error {
    /// 画面に表示する文言
    ///
    /// 通信系の失敗は原因を問わず接続メッセージにまとめる
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidFileType { .. } => "Please select a valid image file".to_string(),
            Error::Transport(_) | Error::MalformedResponse(_) => CONNECTIVITY_MESSAGE.to_string(),
            Error::Api(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// バックエンドへの到達自体に失敗したか
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::MalformedResponse(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
