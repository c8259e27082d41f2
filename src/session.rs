//! CLI上でワークフローを駆動する
//!
//! 状態遷移は `third_eye_common::reduce` に任せ、ここでは副作用だけを実行する:
//! - `Effect::Submit`: スピナーを表示しながら `DetectService` に送信し、完了イベントを戻す
//! - `Effect::Notify`: 通知を表示し、`NOTIFY_DURATION` 後に非表示にするタスクを起動

use crate::client::DetectService;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use third_eye_common::{
    reduce, DetectionResult, Effect, Error, Event, Notifier, SelectedFile, WorkflowState,
    NOTIFY_DURATION,
};

pub struct Session<S> {
    service: S,
    state: WorkflowState,
    notifier: Arc<Mutex<Notifier>>,
    show_progress: bool,
    /// 直近の送信が失敗した原因（画面には文言しか残らないため）
    last_failure: Option<Error>,
}

impl<S: DetectService> Session<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: WorkflowState::default(),
            notifier: Arc::new(Mutex::new(Notifier::new())),
            show_progress: false,
            last_failure: None,
        }
    }

    /// 送信中にスピナーを表示する
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn notifier(&self) -> Arc<Mutex<Notifier>> {
        Arc::clone(&self.notifier)
    }

    /// 直近の送信失敗の原因を取り出す
    pub fn take_failure(&mut self) -> Option<Error> {
        self.last_failure.take()
    }

    /// イベントを処理し、発生した副作用が落ち着くまで実行する
    pub async fn dispatch(&mut self, event: Event) {
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (next, effects) = reduce(state, event);
            self.state = next;

            for effect in effects {
                match effect {
                    Effect::Submit(file) => {
                        let outcome = self.submit(&file).await;
                        self.last_failure = outcome.as_ref().err().cloned();
                        pending.push_back(Event::SubmitCompleted(outcome));
                    }
                    Effect::Notify(message) => self.notify(message),
                }
            }
        }
    }

    async fn submit(&self, file: &SelectedFile) -> third_eye_common::Result<DetectionResult> {
        let spinner = self.show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("{} を解析中...", file.file_name));
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let outcome = self.service.detect(file).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        outcome
    }

    fn notify(&self, message: String) {
        let ticket = match self.notifier.lock() {
            Ok(mut notifier) => notifier.notify(message.clone()),
            Err(_) => {
                log::error!("notifier lock poisoned; dropping notification");
                return;
            }
        };
        eprintln!("🔔 {}", message);

        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            tokio::time::sleep(NOTIFY_DURATION).await;
            if let Ok(mut notifier) = notifier.lock() {
                if notifier.expire(ticket) {
                    log::debug!("notification hidden");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use third_eye_common::{WorkflowStatus, CONNECTIVITY_MESSAGE, SUCCESS_NOTICE};

    /// 呼び出し回数を数え、固定の結果を返す
    struct FakeService {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeService {
        fn ok() -> Self {
            Self { calls: AtomicUsize::new(0), fail: false }
        }

        fn unreachable() -> Self {
            Self { calls: AtomicUsize::new(0), fail: true }
        }
    }

    impl DetectService for &FakeService {
        async fn detect(&self, _file: &SelectedFile) -> third_eye_common::Result<DetectionResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Transport("connection refused".to_string()));
            }
            Ok(DetectionResult {
                highlighted_image: "data:image/png;base64,AA==".to_string(),
                text_regions_detected: 42,
                confidence_threshold: Some(0.5),
            })
        }
    }

    fn png() -> SelectedFile {
        SelectedFile::new("sign.png", "image/png", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_submit_success() {
        let service = FakeService::ok();
        let mut session = Session::new(&service);

        session.dispatch(Event::FileSelected(png())).await;
        session.dispatch(Event::SubmitRequested).await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.state().status(), WorkflowStatus::ResultReady);
        assert!(!session.state().is_processing);
        assert_eq!(
            session.state().result.as_ref().map(|r| r.text_regions_detected),
            Some(42)
        );
        let notifier = session.notifier();
        let notifier = notifier.lock().unwrap();
        assert!(notifier.is_visible());
        assert_eq!(notifier.message(), Some(SUCCESS_NOTICE));
    }

    #[tokio::test]
    async fn test_submit_without_file_makes_no_call() {
        let service = FakeService::ok();
        let mut session = Session::new(&service);

        session.dispatch(Event::SubmitRequested).await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.state().error.as_deref(), Some("Please select an image first"));
    }

    #[tokio::test]
    async fn test_non_image_makes_no_call() {
        let service = FakeService::ok();
        let mut session = Session::new(&service);

        session
            .dispatch(Event::FileSelected(SelectedFile::new("a.txt", "text/plain", vec![1])))
            .await;
        session.dispatch(Event::SubmitRequested).await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert!(session.state().selected_file.is_none());
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let service = FakeService::unreachable();
        let mut session = Session::new(&service);

        session.dispatch(Event::FileSelected(png())).await;
        session.dispatch(Event::SubmitRequested).await;

        assert!(!session.state().is_processing);
        assert_eq!(session.state().error.as_deref(), Some(CONNECTIVITY_MESSAGE));
        assert_eq!(session.state().status(), WorkflowStatus::Errored);

        let failure = session.take_failure().expect("失敗原因が残っていない");
        assert!(failure.is_connectivity());
        assert!(session.take_failure().is_none());
    }

    #[tokio::test]
    async fn test_success_leaves_no_failure() {
        let service = FakeService::ok();
        let mut session = Session::new(&service);

        session.dispatch(Event::FileSelected(png())).await;
        session.dispatch(Event::SubmitRequested).await;

        assert!(session.take_failure().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_hides_after_delay() {
        let service = FakeService::ok();
        let mut session = Session::new(&service);

        session.dispatch(Event::FileSelected(png())).await;
        session.dispatch(Event::SubmitRequested).await;
        let notifier = session.notifier();
        assert!(notifier.lock().unwrap().is_visible());

        tokio::time::sleep(NOTIFY_DURATION - Duration::from_millis(100)).await;
        assert!(notifier.lock().unwrap().is_visible());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!notifier.lock().unwrap().is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_notification_survives_older_timer() {
        let service = FakeService::unreachable();
        let mut session = Session::new(&service);
        session.dispatch(Event::FileSelected(png())).await;

        // 1回目の失敗通知
        session.dispatch(Event::SubmitRequested).await;
        tokio::time::sleep(Duration::from_secs(2)).await;

        // 2回目の失敗通知（1回目のタイマーは残り1秒）
        session.dispatch(Event::SubmitRequested).await;
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let notifier = session.notifier();
        assert!(notifier.lock().unwrap().is_visible());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!notifier.lock().unwrap().is_visible());
    }
}
