//! 트레이 설정: `<config dir>/tray.toml`
//!
//! 모든 필드가 선택 사항입니다. 파일이 없으면 기본값, 깨져 있으면
//! 경고를 남기고 기본값으로 동작합니다.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use vibe_sec_updater_lib::{SchedulerConfig, UpdateConfig};

use crate::coordinator::Paths;
use crate::error::TrayError;
use crate::report::locator;

/// 설정 파일 경로를 덮어쓰는 환경 변수
pub const CONFIG_ENV: &str = "VIBE_SEC_TRAY_CONFIG";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrayConfig {
    /// 리포트 재확인 간격 (초)
    pub refresh_interval_secs: u64,
    /// 업데이트 확인 간격 (시간)
    pub update_interval_hours: u32,
    pub updates_enabled: bool,
    pub github_owner: String,
    pub github_repo: String,
    /// GitHub API 대신 사용할 베이스 URL (미러/테스트)
    pub api_base_url: Option<String>,
    /// 스캐너 실행에 쓸 node 바이너리
    pub node_binary: String,
    /// vibe-sec 설정 디렉터리 고정 (없으면 자동 탐색)
    pub config_dir: Option<PathBuf>,
    /// Claude settings.json 경로 고정 (없으면 ~/.claude/settings.json)
    pub settings_path: Option<PathBuf>,
}

impl Default for TrayConfig {
    fn default() -> Self {
        let updater = UpdateConfig::default();
        Self {
            refresh_interval_secs: 60,
            update_interval_hours: updater.check_interval_hours,
            updates_enabled: updater.enabled,
            github_owner: updater.github_owner,
            github_repo: updater.github_repo,
            api_base_url: None,
            node_binary: "node".to_string(),
            config_dir: None,
            settings_path: None,
        }
    }
}

impl TrayConfig {
    /// 지정한 파일에서 로드. 파일이 없으면 기본값
    pub fn load(path: &Path) -> Result<Self, TrayError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| TrayError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| TrayError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// `$VIBE_SEC_TRAY_CONFIG` → `<config dir>/tray.toml` 순으로 로드
    pub fn load_default() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| locator::locate_config_dir().join("tray.toml"));

        match Self::load(&path) {
            Ok(cfg) => {
                tracing::debug!("[Config] Loaded {}", path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!("[Config] {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            interval_hours: self.update_interval_hours.max(1),
            enabled: self.updates_enabled,
        }
    }

    pub fn update_config(&self) -> UpdateConfig {
        UpdateConfig {
            enabled: self.updates_enabled,
            check_interval_hours: self.update_interval_hours.max(1),
            github_owner: self.github_owner.clone(),
            github_repo: self.github_repo.clone(),
            api_base_url: self.api_base_url.clone(),
            ..UpdateConfig::default()
        }
    }

    /// 코디네이터가 쓸 경로 결정 (고정값이 없으면 자동 탐색)
    pub fn paths(&self) -> Paths {
        Paths {
            config_dir: self
                .config_dir
                .clone()
                .unwrap_or_else(locator::locate_config_dir),
            settings_path: self
                .settings_path
                .clone()
                .unwrap_or_else(locator::settings_path),
        }
    }
}
