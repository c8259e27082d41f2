//! Third Eye CLI
//!
//! 画像を検出バックエンドへ送信し、ハイライト画像と検出ピクセル数を受け取る

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod session;
