//! アップロードエリアコンポーネント

use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileReader};
use third_eye_common::{format_file_size, is_image_mime, Event, SelectedFile};

use crate::store::Store;

#[component]
pub fn UploadArea(store: Store) -> impl IntoView {
    let input_ref: NodeRef<Input> = NodeRef::new();
    let reads = StoredValue::new(0u64);

    let is_drag_active = move || store.state.with(|s| s.is_drag_active);
    let is_processing = move || store.state.with(|s| s.is_processing);
    let selected = move || {
        store.state.with(|s| {
            s.selected_file
                .as_ref()
                .map(|f| (f.file_name.clone(), format_file_size(f.size())))
        })
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();

        let first = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));

        match first {
            Some(file) => read_file(file, store, reads, |file| Event::FilesDropped(vec![file])),
            None => store.dispatch(Event::FilesDropped(Vec::new())),
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !is_drag_active() {
            store.dispatch(Event::DragEntered);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        store.dispatch(Event::DragLeft);
    };

    let on_click = move |_| {
        if is_processing() {
            return;
        }
        // 非表示のinputでファイル選択ダイアログを開く
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            read_file(file, store, reads, Event::FileSelected);
        }
        // 同じファイルを選び直しても change が発火するように
        input.set_value("");
    };

    view! {
        <div
            class=move || upload_area_class(is_drag_active(), is_processing())
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            <input
                node_ref=input_ref
                type="file"
                accept="image/*"
                style="display: none"
                on:change=on_change
            />
            <div class="upload-icon">"📷"</div>
            <p>"Drag & drop an image here, or click to choose one"</p>
            <p class="text-muted">"Supported: PNG, JPEG, GIF, BMP, WebP"</p>
        </div>

        {move || selected().map(|(name, size)| view! {
            <div class="selected-file">
                <span class="file-name">{name}</span>
                <span class="text-muted">{size}</span>
                <button
                    class="btn btn-tertiary btn-small"
                    aria-label="Remove selected image"
                    disabled=is_processing
                    on:click=move |_| store.dispatch(Event::FileCleared)
                >
                    "×"
                </button>
            </div>
        })}
    }
}

/// ドロップ領域のCSSクラス
fn upload_area_class(is_drag_active: bool, is_processing: bool) -> String {
    let mut classes = vec!["upload-area"];
    if is_drag_active {
        classes.push("dragover");
    }
    if is_processing {
        classes.push("disabled");
    }
    classes.join(" ")
}

/// 読み込み開始を記録して番号を返す
fn begin_read(reads: StoredValue<u64>) -> u64 {
    reads.update_value(|n| *n += 1);
    reads.get_value()
}

/// 後から始めた読み込みがなければ true
fn is_latest_read(reads: StoredValue<u64>, ticket: u64) -> bool {
    reads.get_value() == ticket
}

/// ファイルを読み込んで `SelectedFile` にし、`into_event` のイベントとして配送する
///
/// 画像でないファイルは読み込まずに渡す（リデューサ側で拒否される）。
/// 読み込み中に別のファイルが選ばれた場合、古い方の結果は捨てる。
fn read_file(
    file: File,
    store: Store,
    reads: StoredValue<u64>,
    into_event: fn(SelectedFile) -> Event,
) {
    let ticket = begin_read(reads);
    let file_name = file.name();
    let mime_type = file.type_();

    if !is_image_mime(&mime_type) {
        store.dispatch(into_event(SelectedFile::new(file_name, mime_type, Vec::new())));
        return;
    }

    let fail = move |file_name: String| {
        if is_latest_read(reads, ticket) {
            store.dispatch(Event::FileReadFailed(file_name));
        }
    };

    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(err) => {
            gloo::console::error!("FileReader unavailable:", err);
            fail(file_name);
            return;
        }
    };

    let reader_clone = reader.clone();
    let loaded_name = file_name.clone();
    let onload = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if !is_latest_read(reads, ticket) {
            return;
        }
        match reader_clone.result() {
            Ok(result) => {
                let bytes = js_sys::Uint8Array::new(&result).to_vec();
                store.dispatch(into_event(SelectedFile::new(
                    loaded_name.clone(),
                    mime_type.clone(),
                    bytes,
                )));
            }
            Err(err) => {
                gloo::console::error!("failed to read file:", err);
                fail(loaded_name.clone());
            }
        }
    }) as Box<dyn FnMut(_)>);

    let failed_name = file_name.clone();
    let onerror = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        gloo::console::error!("failed to read file:", failed_name.clone());
        fail(failed_name.clone());
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    if let Err(err) = reader.read_as_array_buffer(&file) {
        gloo::console::error!("failed to read file:", err);
        fail(file_name);
    }
}
