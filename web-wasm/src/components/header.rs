//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Third Eye"</h1>
            <p class="text-muted">"Upload an image to highlight the regions that contain text"</p>
        </header>
    }
}
