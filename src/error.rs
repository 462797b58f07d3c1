//! 트레이 내부 배관용 에러 타입
//!
//! 이 에러는 로그로만 남고 표시 계층으로 넘어가지 않습니다.
//! 표시 계층이 받는 것은 항상 센티널 값이 들어간 스냅샷입니다.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum TrayError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
