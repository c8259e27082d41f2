//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use std::path::Path;
use tempfile::tempdir;
use third_eye::error::ThirdEyeError;
use third_eye::input::read_selected_file;
use third_eye::output::write_highlighted_image;
use third_eye_common::{DetectionResult, Error};

/// 存在しないファイル
#[test]
fn test_read_nonexistent_file() {
    let result = read_selected_file(Path::new("/nonexistent/path/12345.png"));
    assert!(matches!(result.unwrap_err(), ThirdEyeError::FileNotFound(_)));
}

/// Data URLでない結果画像
#[test]
fn test_write_non_data_url() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = DetectionResult {
        highlighted_image: "https://example.com/image.png".to_string(),
        text_regions_detected: 10,
        confidence_threshold: None,
    };
    let err = write_highlighted_image(&result, &dir.path().join("a.png"), None).unwrap_err();
    assert!(matches!(err, ThirdEyeError::Output(_)));
}

/// 共通エラーからの変換
#[test]
fn test_common_error_conversion() {
    let err: ThirdEyeError = Error::Api("bad image".to_string()).into();
    assert_eq!(err.to_string(), "bad image");
}

/// `?` で共通エラーがそのまま伝播する
#[test]
fn test_common_error_propagates_with_question_mark() {
    fn detect() -> third_eye::error::Result<()> {
        Err::<(), _>(Error::Transport("connection refused".to_string()))?;
        Ok(())
    }

    match detect().unwrap_err() {
        ThirdEyeError::Common(err) => assert!(err.is_connectivity()),
        other => panic!("unexpected error: {:?}", other),
    }
}

/// ThirdEyeErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ThirdEyeError::Config("テスト設定エラー".to_string()),
        ThirdEyeError::FileNotFound("test.png".to_string()),
        ThirdEyeError::NotAnImage("notes.txt".to_string()),
        ThirdEyeError::Backend { status: 500, message: "boom".to_string() },
        ThirdEyeError::Output("decode".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}
