//! Data URL ("data:image/png;base64,...") の分解

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/png;base64,iVBORw0..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    let (header, data) = data_url.split_once(',')?;
    if !header.starts_with("data:") {
        return None;
    }
    Some(data)
}

/// Data URLからMIMEタイプを抽出
///
/// 抽出できない場合は "image/png"（検出APIの出力形式）を返す
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .strip_prefix("data:")
        .and_then(|s| s.split([';', ',']).next())
        .filter(|s| !s.is_empty())
        .unwrap_or("image/png")
}

/// Data URLをデコードして (MIMEタイプ, バイト列) を返す
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>)> {
    let data = extract_base64_from_data_url(data_url)
        .ok_or_else(|| Error::DataUrl("not a data URL".to_string()))?;
    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| Error::DataUrl(e.to_string()))?;
    if bytes.is_empty() {
        return Err(Error::DataUrl("empty payload".to_string()));
    }
    Ok((extract_mime_type_from_data_url(data_url).to_string(), bytes))
}

/// バイト列をBase64のData URLにする
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_base64_png() {
        let data_url = "data:image/png;base64,iVBORw0KGgo=";
        assert_eq!(extract_base64_from_data_url(data_url), Some("iVBORw0KGgo="));
    }

    #[test]
    fn test_extract_base64_invalid() {
        assert_eq!(extract_base64_from_data_url("not a data url"), None);
        assert_eq!(extract_base64_from_data_url("http://x/y,z"), None);
        assert_eq!(extract_base64_from_data_url(""), None);
    }

    #[test]
    fn test_extract_mime_type() {
        assert_eq!(extract_mime_type_from_data_url("data:image/jpeg;base64,/9j/"), "image/jpeg");
        assert_eq!(extract_mime_type_from_data_url("data:image/webp;base64,UklGR"), "image/webp");
        assert_eq!(extract_mime_type_from_data_url("data:,abc"), "image/png");
        assert_eq!(extract_mime_type_from_data_url("invalid"), "image/png");
    }

    #[test]
    fn test_decode_data_url() {
        let url = encode_data_url("image/png", &[0x89, b'P', b'N', b'G']);
        let (mime, bytes) = decode_data_url(&url).expect("デコード失敗");
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_decode_data_url_bad_base64() {
        let err = decode_data_url("data:image/png;base64,@@@").unwrap_err();
        assert!(matches!(err, Error::DataUrl(_)));
    }

    #[test]
    fn test_decode_data_url_empty_payload() {
        assert!(decode_data_url("data:image/png;base64,").is_err());
    }
}
