//! Third Eye Common Library
//!
//! CLIとWeb(WASM)で共有されるワークフロー状態・リデューサ・API契約

pub mod types;
pub mod error;
pub mod upload;
pub mod workflow;
pub mod response;
pub mod notifier;
pub mod data_url;
pub mod format;

pub use types::{DetectResponse, DetectionResult, HealthStatus, ModelInfo, SelectedFile};
pub use error::{Error, Result, CONNECTIVITY_MESSAGE};
pub use upload::{is_image_mime, mime_from_file_name, first_candidate};
pub use workflow::{
    reduce, Effect, Event, WorkflowState, WorkflowStatus, FAILURE_NOTICE, SUCCESS_NOTICE,
};
pub use response::{
    endpoint, interpret_response, DETECT_PATH, HEALTH_PATH, MAX_UPLOAD_BYTES, MODEL_INFO_PATH,
    UPLOAD_FIELD,
};
pub use notifier::{Notifier, NotifyTicket, NOTIFY_DURATION};
pub use data_url::{
    decode_data_url, encode_data_url, extract_base64_from_data_url, extract_mime_type_from_data_url,
};
pub use format::{count_phrase, extension_for_mime, format_file_size};
