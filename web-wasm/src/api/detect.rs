//! 検出API呼び出し（fetch + FormData）

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};
use third_eye_common::{
    endpoint, interpret_response, DetectionResult, Error, SelectedFile, DETECT_PATH, UPLOAD_FIELD,
};

/// 画像を送信して結果を解釈する
///
/// fetch自体の失敗（接続不可・CORS拒否など）は `Error::Transport` になる
pub async fn detect_text(base_url: &str, file: &SelectedFile) -> Result<DetectionResult, Error> {
    match post_file(&endpoint(base_url, DETECT_PATH), file).await {
        Ok((status, status_text, body)) => interpret_response(status, &status_text, &body),
        Err(err) => {
            let cause = format!("{:?}", err);
            gloo::console::error!("detect-text request failed:", cause.clone());
            Err(Error::Transport(cause))
        }
    }
}

/// multipart送信。 (ステータス, ステータステキスト, 本文) を返す
async fn post_file(url: &str, file: &SelectedFile) -> Result<(u16, String, String), JsValue> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let bag = BlobPropertyBag::new();
    bag.set_type(&file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.file_name)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let body = JsFuture::from(resp.text()?).await?;
    Ok((resp.status(), resp.status_text(), body.as_string().unwrap_or_default()))
}
