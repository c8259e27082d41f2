//! アップロード対象の判定
//!
//! ブラウザではファイルが宣言するMIMEタイプ、CLIでは拡張子から推定したMIMEタイプで判定する

/// 拡張子とMIMEタイプの対応
const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

const FALLBACK_MIME: &str = "application/octet-stream";

/// MIMEタイプが画像カテゴリか
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// ファイル名の拡張子からMIMEタイプを推定
///
/// 未知の拡張子は "application/octet-stream"（画像として受け付けられない）
pub fn mime_from_file_name(file_name: &str) -> &'static str {
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return FALLBACK_MIME;
    };
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK_MIME)
}

/// 複数ファイルが渡された場合は先頭のみ扱う
pub fn first_candidate<T>(candidates: impl IntoIterator<Item = T>) -> Option<T> {
    candidates.into_iter().next()
}
