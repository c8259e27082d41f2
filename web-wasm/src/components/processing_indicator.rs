//! 送信中インジケーター

use leptos::prelude::*;

#[component]
pub fn ProcessingIndicator(file_name: Signal<String>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="spinner" />
            <p class="progress-text">
                {move || format!("Detecting text in {}...", file_name.get())}
            </p>
        </div>
    }
}
