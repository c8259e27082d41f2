//! トースト通知
//!
//! 表示は常に1件。新しい通知は直前の通知を置き換える（キューなし）。
//! `notify` が返すチケットで非表示タイマーを世代管理し、
//! 古いタイマーが新しい通知を早期に消さないようにしている。

use std::time::Duration;

/// 通知の表示時間
pub const NOTIFY_DURATION: Duration = Duration::from_secs(3);

/// 非表示タイマー用のチケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyTicket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifier {
    message: Option<String>,
    visible: bool,
    generation: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 通知を表示し、非表示タイマーに渡すチケットを返す
    pub fn notify(&mut self, message: impl Into<String>) -> NotifyTicket {
        self.generation += 1;
        self.message = Some(message.into());
        self.visible = true;
        NotifyTicket(self.generation)
    }

    /// タイマー満了。チケットが最新のときだけ非表示にする
    ///
    /// 非表示にした場合は true
    pub fn expire(&mut self, ticket: NotifyTicket) -> bool {
        if ticket.0 != self.generation || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// 直近の通知文言（非表示後も保持）
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
