//! アップロード→送信→結果表示のワークフロー
//!
//! 状態は `WorkflowState` に集約し、`reduce` が (状態, イベント) から
//! 次の状態と副作用（`Effect`）を返す純粋関数になっている。
//! ネットワーク送信や通知表示はシェル側（Web/CLI）が `Effect` を受けて実行し、
//! 完了したら `Event::SubmitCompleted` を戻す。
//!
//! ```text
//! Idle --SubmitRequested(ファイルあり)--> Processing
//! Processing --成功--> ResultReady
//! Processing --失敗--> Errored（入力画面のまま、エラー表示）
//! ResultReady --Reset--> Idle
//! ```

use crate::error::Error;
use crate::types::{DetectionResult, SelectedFile};
use crate::upload::{first_candidate, is_image_mime};

pub const SUCCESS_NOTICE: &str = "Text detection completed!";
pub const FAILURE_NOTICE: &str = "Text detection failed";

/// ワークフローの段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    Idle,
    Processing,
    ResultReady,
    Errored,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Idle => "idle",
            WorkflowStatus::Processing => "processing",
            WorkflowStatus::ResultReady => "result-ready",
            WorkflowStatus::Errored => "errored",
        }
    }
}

/// 画面の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub selected_file: Option<SelectedFile>,
    pub result: Option<DetectionResult>,
    pub error: Option<String>,
    pub is_processing: bool,
    /// ドラッグ中のハイライト表示用
    pub is_drag_active: bool,
    /// 結果画像の読み込みに失敗した（プレースホルダ表示）
    pub image_failed: bool,
}

impl WorkflowState {
    pub fn status(&self) -> WorkflowStatus {
        if self.is_processing {
            WorkflowStatus::Processing
        } else if self.result.is_some() {
            WorkflowStatus::ResultReady
        } else if self.error.is_some() {
            WorkflowStatus::Errored
        } else {
            WorkflowStatus::Idle
        }
    }

    /// 送信ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.is_processing
    }

    /// 結果画面を表示すべきか
    pub fn shows_result(&self) -> bool {
        self.result.is_some()
    }
}

/// 画面・通信から届くイベント
#[derive(Debug)]
pub enum Event {
    /// ファイル選択ダイアログで選ばれた
    FileSelected(SelectedFile),
    /// ドロップされた（先頭のみ扱う）
    FilesDropped(Vec<SelectedFile>),
    DragEntered,
    DragLeft,
    /// 選択中のファイルを破棄
    FileCleared,
    /// ファイルの中身を読み込めなかった
    FileReadFailed(String),
    SubmitRequested,
    SubmitCompleted(Result<DetectionResult, Error>),
    /// 結果画像のデコード/表示に失敗
    ImageLoadFailed,
    /// 「やり直す」
    Reset,
}

/// シェルに実行してもらう副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// 検出APIへ送信する
    Submit(SelectedFile),
    /// トースト通知を出す
    Notify(String),
}

/// 状態遷移
pub fn reduce(mut state: WorkflowState, event: Event) -> (WorkflowState, Vec<Effect>) {
    let mut effects = Vec::new();

    // 送信中は完了イベント以外で状態を変えない
    if state.is_processing && !matches!(event, Event::SubmitCompleted(_) | Event::DragLeft) {
        log::debug!("ignoring {} while processing", event_name(&event));
        return (state, effects);
    }

    match event {
        Event::FileSelected(file) => {
            if !state.shows_result() {
                select_file(&mut state, file);
            }
        }

        Event::FilesDropped(files) => {
            state.is_drag_active = false;
            if !state.shows_result() {
                if let Some(file) = first_candidate(files) {
                    select_file(&mut state, file);
                }
            }
        }

        Event::DragEntered => {
            state.is_drag_active = true;
        }

        Event::DragLeft => {
            state.is_drag_active = false;
        }

        Event::FileCleared => {
            // 結果表示中はResetで結果と一緒に消す
            if !state.shows_result() {
                state.selected_file = None;
            }
        }

        Event::FileReadFailed(file_name) => {
            if !state.shows_result() {
                state.selected_file = None;
                state.error = Some(Error::FileUnreadable(file_name).user_message());
            }
        }

        Event::SubmitRequested => match state.selected_file.clone() {
            None => {
                state.error = Some(Error::NoFileSelected.user_message());
            }
            Some(file) => {
                state.result = None;
                state.error = None;
                state.image_failed = false;
                state.is_processing = true;
                log::info!("submitting {} ({} bytes)", file.file_name, file.size());
                effects.push(Effect::Submit(file));
            }
        },

        Event::SubmitCompleted(outcome) => {
            if !state.is_processing {
                log::warn!("submission completed while no submission was in flight; ignored");
                return (state, effects);
            }
            state.is_processing = false;
            match outcome {
                Ok(result) => {
                    log::info!("detection succeeded: {} text pixels", result.text_regions_detected);
                    state.result = Some(result);
                    state.error = None;
                    effects.push(Effect::Notify(SUCCESS_NOTICE.to_string()));
                }
                Err(err) => {
                    log::warn!("detection failed: {}", err);
                    state.result = None;
                    state.error = Some(err.user_message());
                    effects.push(Effect::Notify(FAILURE_NOTICE.to_string()));
                }
            }
        }

        Event::ImageLoadFailed => {
            if state.shows_result() {
                state.image_failed = true;
            }
        }

        Event::Reset => {
            state.selected_file = None;
            state.result = None;
            state.error = None;
            state.image_failed = false;
            state.is_drag_active = false;
        }
    }

    (state, effects)
}

fn select_file(state: &mut WorkflowState, file: SelectedFile) {
    if is_image_mime(&file.mime_type) {
        state.selected_file = Some(file);
        state.error = None;
    } else {
        let err = Error::InvalidFileType { mime: file.mime_type };
        log::debug!("rejected {}: {}", file.file_name, err);
        state.selected_file = None;
        state.error = Some(err.user_message());
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::FileSelected(_) => "FileSelected",
        Event::FilesDropped(_) => "FilesDropped",
        Event::DragEntered => "DragEntered",
        Event::DragLeft => "DragLeft",
        Event::FileCleared => "FileCleared",
        Event::FileReadFailed(_) => "FileReadFailed",
        Event::SubmitRequested => "SubmitRequested",
        Event::SubmitCompleted(_) => "SubmitCompleted",
        Event::ImageLoadFailed => "ImageLoadFailed",
        Event::Reset => "Reset",
    }
}
