//! # vibe-sec 업데이터 라이브러리
//!
//! 트레이 애플릿의 새 릴리즈가 있는지 GitHub에서 확인합니다.
//!
//! ## 동작 원리
//! - `releases/latest`에 GET 한 번 (10초 타임아웃)
//! - `tag_name`의 `v` 접두사를 떼고 현재 버전과 비교
//! - 더 새로운 경우에만 버전 문자열을 돌려줌
//!
//! 네트워크 오류, non-2xx 응답, 깨진 본문은 모두 "업데이트 없음"으로 취급합니다.
//! 주기 실행은 호출측(트레이 코디네이터)이 담당하고, 이 크레이트는
//! [`scheduler::check_once`] 같은 원샷 유틸리티만 제공합니다.

pub mod error;
pub mod github;
pub mod scheduler;
pub mod version;

pub use error::UpdaterError;
pub use github::{GitHubClient, GitHubRelease};
pub use scheduler::{CheckResult, SchedulerConfig};
pub use version::{is_newer, parse_version, Version};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 업데이트 확인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    pub enabled: bool,
    /// 확인 주기 (시간 단위, 기본값 6)
    pub check_interval_hours: u32,
    /// GitHub 레포지토리 소유자
    pub github_owner: String,
    /// GitHub 레포지토리 이름
    pub github_repo: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// API 베이스 URL 오버라이드 (테스트용 로컬 서버 지원,
    /// 예: "http://127.0.0.1:9876" 처럼 GitHub API 대신 사용할 URL 설정)
    #[serde(default)]
    pub api_base_url: Option<String>,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval_hours: 6,
            github_owner: "kobzevvv".to_string(),
            github_repo: "vibe-sec-app-win".to_string(),
            timeout_secs: 10,
            api_base_url: None,
        }
    }
}

/// 원격 릴리즈와 실행 중인 버전을 비교하는 체커
pub struct UpdateChecker {
    pub config: UpdateConfig,
    current_version: String,
    client: GitHubClient,
}

impl UpdateChecker {
    pub fn new(config: UpdateConfig, current_version: &str) -> Result<Self, UpdaterError> {
        let client = GitHubClient::with_base_url(
            &config.github_owner,
            &config.github_repo,
            config.api_base_url.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )?;

        Ok(Self {
            config,
            current_version: current_version.to_string(),
            client,
        })
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// 최신 릴리즈를 가져와 비교. 에러 분류가 필요한 호출측용
    ///
    /// `Ok(Some(ver))`: 더 새로운 버전 있음, `Ok(None)`: 최신 상태
    pub async fn try_check(&self) -> Result<Option<String>, UpdaterError> {
        let release = self.client.fetch_latest_release().await?;
        let remote = release.version();

        if is_newer(remote, &self.current_version) {
            tracing::info!(
                "[Updater] New release available: {} -> {} ({})",
                self.current_version,
                remote,
                release.html_url.as_deref().unwrap_or("no release page")
            );
            Ok(Some(remote.to_string()))
        } else {
            tracing::debug!(
                "[Updater] Up to date (local {}, remote {})",
                self.current_version,
                remote
            );
            Ok(None)
        }
    }

    /// 새 버전 문자열 또는 None. 실패는 로그만 남기고 None으로 접힘
    pub async fn check_for_updates(&self) -> Option<String> {
        match self.try_check().await {
            Ok(update) => update,
            Err(e) => {
                tracing::warn!("[Updater] Update check failed: {}", e);
                None
            }
        }
    }
}
