//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use third_eye_common::{DetectionResult, Event};

use crate::components::{
    header::Header,
    processing_indicator::ProcessingIndicator,
    result_view::ResultView,
    toast::Toast,
    upload_area::UploadArea,
};
use crate::store::Store;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let store = Store::new();

    let is_processing = move || store.state.with(|s| s.is_processing);
    let can_submit = move || store.state.with(|s| s.can_submit());
    let error = move || store.state.with(|s| s.error.clone());
    let result = result_memo(store);
    let panel_class =
        move || format!("upload-panel {}", store.state.with(|s| s.status().as_str()));
    let file_name = Signal::derive(move || {
        store.state.with(|s| {
            s.selected_file
                .as_ref()
                .map(|f| f.file_name.clone())
                .unwrap_or_default()
        })
    });

    view! {
        <div class="container">
            <Header />

            {move || match result.get() {
                Some(result) => view! { <ResultView store=store result=result /> }.into_any(),
                None => view! {
                    <div class=panel_class>
                        <UploadArea store=store />

                        {move || error().map(|e| view! { <p class="error-message">{e}</p> })}

                        <Show when=is_processing>
                            <ProcessingIndicator file_name=file_name />
                        </Show>

                        <button
                            class="btn btn-primary"
                            disabled=move || !can_submit()
                            on:click=move |_| store.dispatch(Event::SubmitRequested)
                        >
                            {move || if is_processing() { "Detecting..." } else { "Detect text" }}
                        </button>
                    </div>
                }.into_any(),
            }}

            <Toast notifier=store.notifier />
        </div>
    }
}

/// 表示中の検出結果
///
/// 入力画面⇔結果画面の切り替え時だけ変化する（ドラッグ等では再描画しない）
fn result_memo(store: Store) -> Memo<Option<DetectionResult>> {
    Memo::new(move |_| store.state.with(|s| s.result.clone()))
}
