//! GitHub Release API 클라이언트
//!
//! `releases/latest` 엔드포인트 하나만 사용합니다.
//! 드래프트/프리릴리즈는 GitHub가 이미 걸러서 돌려줍니다.

use serde::Deserialize;
use std::time::Duration;

use crate::error::UpdaterError;

/// 기본 API 베이스 URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub Release 응답 (필요한 필드만)
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    /// 릴리스 페이지 (로그용)
    #[serde(default)]
    pub html_url: Option<String>,
}

impl GitHubRelease {
    /// 태그에서 `v` 접두사를 뗀 버전 문자열
    pub fn version(&self) -> &str {
        self.tag_name.strip_prefix('v').unwrap_or(&self.tag_name)
    }
}

/// GitHub API 클라이언트
pub struct GitHubClient {
    owner: String,
    repo: String,
    http: reqwest::Client,
    timeout: Duration,
    /// API 베이스 URL (기본: "https://api.github.com")
    /// 로컬 mock 서버 테스트 시 "http://127.0.0.1:9876" 등으로 오버라이드
    base_url: String,
}

impl GitHubClient {
    /// base_url을 오버라이드할 수 있는 생성자 (테스트/mock 서버용)
    pub fn with_base_url(
        owner: &str,
        repo: &str,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, UpdaterError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vibe-sec-updater/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| UpdaterError::ConfigError {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            http,
            timeout,
            base_url: base_url
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
        })
    }

    pub fn latest_release_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.base_url, self.owner, self.repo
        )
    }

    /// 최신 릴리스 가져오기 (프리릴리스 제외)
    pub async fn fetch_latest_release(&self) -> Result<GitHubRelease, UpdaterError> {
        let operation = "fetch latest release";
        let timeout_secs = self.timeout.as_secs();

        let response = self.http
            .get(self.latest_release_url())
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| UpdaterError::from_reqwest(&e, operation, timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpdaterError::ApiError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpdaterError::from_reqwest(&e, operation, timeout_secs))?;

        serde_json::from_str(&body).map_err(|e| UpdaterError::MalformedResponse {
            message: e.to_string(),
        })
    }
}
