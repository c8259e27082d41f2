//! ローカル画像ファイルの読み込み

use crate::error::{Result, ThirdEyeError};
use std::path::Path;
use third_eye_common::{mime_from_file_name, SelectedFile, MAX_UPLOAD_BYTES};

/// パスから `SelectedFile` を作る
///
/// MIMEタイプは拡張子から推定する。画像かどうかの判定はワークフロー側で行う
pub fn read_selected_file(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(ThirdEyeError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime_type = mime_from_file_name(&file_name);
    let bytes = std::fs::read(path)?;

    if bytes.len() as u64 > MAX_UPLOAD_BYTES {
        log::warn!(
            "{} is {} bytes; the backend rejects uploads over {} bytes",
            file_name,
            bytes.len(),
            MAX_UPLOAD_BYTES
        );
    }

    Ok(SelectedFile::new(file_name, mime_type, bytes))
}
