//! 検出結果コンポーネント

use leptos::prelude::*;
use third_eye_common::{count_phrase, DetectionResult, Event};

use crate::store::Store;

#[component]
pub fn ResultView(store: Store, result: DetectionResult) -> impl IntoView {
    let image_failed = move || store.state.with(|s| s.image_failed);
    let phrase = count_phrase(result.text_regions_detected);
    let threshold = result
        .confidence_threshold
        .map(|t| format!("Confidence threshold: {}", t));
    let image = result.highlighted_image;

    view! {
        <div class="result-view">
            <Show
                when=move || !image_failed()
                fallback=|| view! {
                    <div class="image-placeholder">
                        <div class="upload-icon">"🖼"</div>
                        <p class="text-muted">"The highlighted image could not be displayed"</p>
                    </div>
                }
            >
                <img
                    class="highlighted-image"
                    src=image.clone()
                    alt="Image with detected text regions highlighted"
                    on:error=move |_| store.dispatch(Event::ImageLoadFailed)
                />
            </Show>

            <p class="result-count">{phrase}</p>
            {threshold.map(|t| view! { <p class="text-muted">{t}</p> })}

            <button
                class="btn btn-primary"
                on:click=move |_| store.dispatch(Event::Reset)
            >
                "Start over"
            </button>
        </div>
    }
}
