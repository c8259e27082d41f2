//! トースト通知

use leptos::prelude::*;
use third_eye_common::Notifier;

#[component]
pub fn Toast(notifier: RwSignal<Notifier>) -> impl IntoView {
    view! {
        <div
            class=move || if notifier.with(|n| n.is_visible()) { "toast visible" } else { "toast" }
            role="status"
        >
            {move || notifier.with(|n| n.message().unwrap_or_default().to_string())}
        </div>
    }
}
