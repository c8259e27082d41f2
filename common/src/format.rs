//! 表示用の文言

/// 検出ピクセル数の表示文言
pub fn count_phrase(count: u64) -> String {
    match count {
        0 => "No text detected".to_string(),
        1 => "1 text pixel detected".to_string(),
        n => format!("{} text pixels detected", group_thousands(n)),
    }
}

/// 3桁区切り
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// ファイルサイズの表示（"512 B", "1.5 KB", "2.3 MB"）
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / MB)
    }
}

/// MIMEタイプから保存用の拡張子
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        _ => "png",
    }
}
