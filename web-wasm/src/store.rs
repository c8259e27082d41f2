//! 画面状態とイベント配送
//!
//! 状態遷移は `third_eye_common::reduce` が行い、ここでは返された副作用
//! （API送信・トースト表示）をブラウザ上で実行する。

#[cfg(target_arch = "wasm32")]
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
#[cfg(target_arch = "wasm32")]
use third_eye_common::NOTIFY_DURATION;
use third_eye_common::{reduce, Effect, Event, Notifier, NotifyTicket, WorkflowState};

use crate::api::detect::detect_text;

/// 検出APIのベースURL（ビルド時に THIRD_EYE_API_URL で上書き可能）
pub const API_BASE_URL: &str = match option_env!("THIRD_EYE_API_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

#[derive(Clone, Copy)]
pub struct Store {
    pub state: RwSignal<WorkflowState>,
    pub notifier: RwSignal<Notifier>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(WorkflowState::default()),
            notifier: RwSignal::new(Notifier::new()),
        }
    }

    pub fn dispatch(self, event: Event) {
        let Some(effects) = self.state.try_update(|state| {
            let (next, effects) = reduce(std::mem::take(state), event);
            *state = next;
            effects
        }) else {
            // コンポーネント破棄後に通信が完了した場合
            return;
        };

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(self, effect: Effect) {
        match effect {
            Effect::Submit(file) => {
                spawn_local(async move {
                    let outcome = detect_text(API_BASE_URL, &file).await;
                    self.dispatch(Event::SubmitCompleted(outcome));
                });
            }
            Effect::Notify(message) => self.notify(message),
        }
    }

    fn notify(self, message: String) {
        let Some(ticket) = self.notifier.try_update(|n| n.notify(message)) else {
            return;
        };
        self.schedule_expiry(ticket);
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_expiry(self, ticket: NotifyTicket) {
        let notifier = self.notifier;
        Timeout::new(NOTIFY_DURATION.as_millis() as u32, move || {
            notifier.try_update(|n| n.expire(ticket));
        })
        .forget();
    }

    // ブラウザ外（ネイティブのテスト）ではタイマーを持たない
    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_expiry(self, ticket: NotifyTicket) {
        let _ = (self, ticket);
    }
}
