pub mod actions;
pub mod config;
pub mod coordinator;
pub mod desktop;
pub mod error;
pub mod probe;
pub mod report;
pub mod scanner;
pub mod utils;
pub mod view;

pub use vibe_sec_updater_lib as updater;

/// 실행 중인 애플릿 버전
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
