//! 최신 스캔 리포트 읽기
//!
//! - `locator`: 설정 디렉터리 / 최신 리포트 파일 / 파일명 날짜
//! - `score`: 리포트 본문 → 발견 건수

pub mod locator;
pub mod score;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::probe;
pub use score::{extract_score, NO_SCORE};

/// 최신 리포트에서 읽은 상태 (생성 후 불변)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// -1 = 결과 없음, 0 = 클린, >0 = 발견 건수
    pub score: i64,
    /// 리포트 파일명에서 추출한 "2026-02-19"
    pub date: Option<String>,
    /// 스캐너 스크립트 존재 여부
    pub is_installed: bool,
}

impl ScanResult {
    /// 리포트를 찾지 못했거나 읽지 못한 경우
    pub fn no_results(is_installed: bool) -> Self {
        Self {
            score: NO_SCORE,
            date: None,
            is_installed,
        }
    }

    pub fn has_score(&self) -> bool {
        self.score >= 0
    }
}

/// 설정 디렉터리의 최신 Markdown 리포트를 읽어 `ScanResult` 생성
///
/// 블로킹 파일시스템 호출이므로 async 컨텍스트에서는 `spawn_blocking`으로 부를 것.
pub fn read_scan_result(config_dir: &Path) -> ScanResult {
    let is_installed = probe::is_scanner_installed(config_dir);

    let latest = match locator::find_latest_report(config_dir, "md") {
        Some(path) => path,
        None => return ScanResult::no_results(is_installed),
    };

    let content = match std::fs::read_to_string(&latest) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read report {}: {}", latest.display(), e);
            return ScanResult::no_results(is_installed);
        }
    };

    ScanResult {
        score: extract_score(&content),
        date: locator::extract_date_from_filename(&latest),
        is_installed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_dir_has_no_results() {
        let tmp = TempDir::new().unwrap();
        let result = read_scan_result(tmp.path());
        assert_eq!(result, ScanResult::no_results(false));
        assert!(!result.has_score());
    }

    #[test]
    fn installed_without_reports_is_still_sentinel() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("scripts")).unwrap();
        fs::write(probe::scanner_script_path(tmp.path()), "").unwrap();

        let result = read_scan_result(tmp.path());
        assert!(result.is_installed);
        assert_eq!(result.score, NO_SCORE);
        assert_eq!(result.date, None);
    }

    #[test]
    fn reads_newest_report() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("vibe-sec-log-report-2026-01-01.md"), "<!-- findings: 9 -->").unwrap();
        fs::write(tmp.path().join("vibe-sec-log-report-2026-02-19.md"), "3 critical and 1 high").unwrap();

        let result = read_scan_result(tmp.path());
        assert_eq!(result.score, 4);
        assert_eq!(result.date.as_deref(), Some("2026-02-19"));
        assert!(!result.is_installed);
    }

    #[test]
    fn unparseable_report_keeps_date() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("vibe-sec-log-report-2026-02-19.md"), "# empty").unwrap();

        let result = read_scan_result(tmp.path());
        assert_eq!(result.score, NO_SCORE);
        assert_eq!(result.date.as_deref(), Some("2026-02-19"));
    }
}
