//! 업데이트 스케줄러: 원샷 체크 유틸리티
//!
//! ## 아키텍처
//! 이 크레이트는 백그라운드 타이머를 직접 돌리지 않습니다.
//! 트레이 코디네이터가 시작 시 한 번, 이후 `SchedulerConfig` 간격마다
//! [`check_once`]를 호출합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::UpdateChecker;

/// 스케줄러 설정. 호출측이 타이머 간격을 결정할 때 참조
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// 체크 간격 (시간 단위, 기본 6시간)
    pub interval_hours: u32,
    /// 업데이터 활성화 여부
    pub enabled: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_hours: 6,
            enabled: true,
        }
    }
}

impl SchedulerConfig {
    /// 체크 간격을 Duration으로 변환 (0시간은 1시간으로 올림)
    pub fn interval_duration(&self) -> Duration {
        Duration::from_secs(self.interval_hours.max(1) as u64 * 3600)
    }
}

/// 원샷 업데이트 체크 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// 더 새로운 버전 (없으면 None)
    pub update: Option<String>,
    /// 체크 시각
    pub checked_at: DateTime<Utc>,
    /// 오류 메시지 (있으면)
    pub error: Option<String>,
}

/// 한 번 체크하고 결과를 반환합니다.
///
/// 실패해도 `update: None`이며, 원인은 `error`에만 기록됩니다.
pub async fn check_once(checker: &UpdateChecker) -> CheckResult {
    if !checker.config.enabled {
        return CheckResult {
            update: None,
            checked_at: Utc::now(),
            error: Some("Updater is disabled".into()),
        };
    }

    tracing::info!("[Updater] Running one-shot update check");

    match checker.try_check().await {
        Ok(update) => CheckResult {
            update,
            checked_at: Utc::now(),
            error: None,
        },
        Err(e) => {
            if e.is_recoverable() {
                tracing::warn!("[Updater] Check failed, will retry next interval: {}", e);
            } else {
                tracing::error!("[Updater] Check failed: {}", e);
            }
            CheckResult {
                update: None,
                checked_at: Utc::now(),
                error: Some(e.to_string()),
            }
        }
    }
}
