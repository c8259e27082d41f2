//! 結果画像の書き出し

use crate::error::{Result, ThirdEyeError};
use std::path::{Path, PathBuf};
use third_eye_common::{decode_data_url, extension_for_mime, DetectionResult};

/// 既定の出力先: 入力と同じフォルダの `<stem>_highlighted.<ext>`
pub fn default_output_path(input: &Path, mime_type: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "result".to_string());
    let file_name = format!("{}_highlighted.{}", stem, extension_for_mime(mime_type));
    input
        .parent()
        .map(|p| p.join(&file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

/// ハイライト画像をデコードして保存
///
/// 画像として読めない場合は `ThirdEyeError::Output` を返す（カウントには影響しない）
pub fn write_highlighted_image(
    result: &DetectionResult,
    input: &Path,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let (mime_type, bytes) = decode_data_url(&result.highlighted_image)
        .map_err(|e| ThirdEyeError::Output(e.to_string()))?;

    image::load_from_memory(&bytes)
        .map_err(|e| ThirdEyeError::Output(format!("画像をデコードできません: {}", e)))?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, &mime_type));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// ハイライト画像を保存する。画像が壊れている場合だけ `None` を返す
///
/// 書き込み先の問題（権限・ディスク容量など）はエラーとして返す
pub fn save_highlighted_image(
    result: &DetectionResult,
    input: &Path,
    output: Option<&Path>,
) -> Result<Option<PathBuf>> {
    match write_highlighted_image(result, input, output) {
        Ok(path) => Ok(Some(path)),
        Err(ThirdEyeError::Output(e)) => {
            log::warn!("highlighted image unusable: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
