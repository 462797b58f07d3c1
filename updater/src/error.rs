//! 업데이트 확인 중 발생하는 에러 분류
//!
//! ## 지원하는 에러 상황
//! - 네트워크 끊김 / 타임아웃
//! - API 응답 오류 (non-2xx)
//! - 응답 본문 파싱 실패
//!
//! 업데이트 확인은 백그라운드 best-effort 작업이므로 이 에러는
//! 로그로만 남고, 호출측에는 "업데이트 없음"으로 전달됩니다.

use std::fmt;

/// 업데이터 에러 타입
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdaterError {
    /// 네트워크 연결 실패
    NetworkError {
        message: String,
        recoverable: bool,
    },
    /// HTTP 요청 타임아웃
    Timeout {
        operation: String,
        duration_secs: u64,
    },
    /// API 응답 오류
    ApiError {
        status_code: u16,
        message: String,
    },
    /// 응답 본문이 기대한 형식이 아님
    MalformedResponse {
        message: String,
    },
    /// 설정 오류 (HTTP 클라이언트 생성 실패 등)
    ConfigError {
        message: String,
    },
}

impl fmt::Display for UpdaterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdaterError::NetworkError { message, .. } => {
                write!(f, "Network error: {}", message)
            }
            UpdaterError::Timeout { operation, duration_secs } => {
                write!(f, "Timeout after {}s: {}", duration_secs, operation)
            }
            UpdaterError::ApiError { status_code, message } => {
                write!(f, "API error ({}): {}", status_code, message)
            }
            UpdaterError::MalformedResponse { message } => {
                write!(f, "Malformed response: {}", message)
            }
            UpdaterError::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for UpdaterError {}

impl UpdaterError {
    /// 다음 주기 체크에서 재시도할 가치가 있는 에러인지 확인
    pub fn is_recoverable(&self) -> bool {
        match self {
            UpdaterError::NetworkError { recoverable, .. } => *recoverable,
            UpdaterError::Timeout { .. } => true,
            // 5xx와 rate limit은 재시도 가능, 나머지 4xx는 불가능
            UpdaterError::ApiError { status_code, .. } => {
                *status_code >= 500 || *status_code == 429
            }
            UpdaterError::MalformedResponse { .. } => false,
            UpdaterError::ConfigError { .. } => false,
        }
    }

    /// reqwest 에러를 UpdaterError로 변환
    pub fn from_reqwest(err: &reqwest::Error, operation: &str, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            UpdaterError::Timeout {
                operation: operation.to_string(),
                duration_secs: timeout_secs,
            }
        } else if err.is_decode() {
            UpdaterError::MalformedResponse {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            UpdaterError::NetworkError {
                message: "connection failed".to_string(),
                recoverable: true,
            }
        } else if let Some(status) = err.status() {
            UpdaterError::ApiError {
                status_code: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            UpdaterError::NetworkError {
                message: err.to_string(),
                recoverable: err.is_request() || err.is_body(),
            }
        }
    }
}
