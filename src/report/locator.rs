//! 설정 디렉터리와 최신 리포트 파일 탐색
//!
//! 스캐너는 `vibe-sec-log-report-YYYY-MM-DD.{md,html}` 형식으로 리포트를 남깁니다.
//! 날짜가 고정폭 ISO 형식이므로 파일명 사전순 정렬 == 시간순 정렬입니다.

use glob::glob;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// 리포트 파일명 접두사
pub const REPORT_PREFIX: &str = "vibe-sec-log-report-";

const APP_DIR_NAME: &str = "vibe-sec";

fn date_pattern() -> &'static Regex {
    static DATE: OnceLock<Regex> = OnceLock::new();
    DATE.get_or_init(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("static regex"))
}

/// 사용자 홈 디렉터리 (USERPROFILE → HOME 순)
pub fn home_dir() -> PathBuf {
    std::env::var_os("USERPROFILE")
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var_os("HOME").filter(|v| !v.is_empty()))
        .map(PathBuf::from)
        .unwrap_or_default()
}

/// OS별 폴백 설정 디렉터리의 부모
fn fallback_root() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    #[cfg(target_os = "macos")]
    {
        Some(home_dir().join("Library").join("Application Support"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}

/// vibe-sec 설정 디렉터리 결정
///
/// `~/.config/vibe-sec` (Node.js 기본값)을 먼저 보고, 없으면 OS별 폴백.
/// 둘 다 없으면 기본 경로를 돌려주므로 호출측은 없는 경로를 견뎌야 합니다.
pub fn locate_config_dir() -> PathBuf {
    locate_config_dir_from(&home_dir(), fallback_root().as_deref())
}

/// 루트를 명시적으로 받는 버전 (테스트용)
pub fn locate_config_dir_from(home: &Path, fallback_root: Option<&Path>) -> PathBuf {
    let primary = home.join(".config").join(APP_DIR_NAME);
    if primary.is_dir() {
        return primary;
    }

    if let Some(root) = fallback_root {
        let alt = root.join(APP_DIR_NAME);
        if alt.is_dir() {
            tracing::debug!("Using fallback config dir: {}", alt.display());
            return alt;
        }
    }

    primary
}

/// Claude Code settings.json 경로
pub fn settings_path() -> PathBuf {
    home_dir().join(".claude").join("settings.json")
}

/// `dir`에서 주어진 확장자의 가장 최신 리포트 파일
pub fn find_latest_report(dir: &Path, extension: &str) -> Option<PathBuf> {
    let escaped = glob::Pattern::escape(dir.to_str()?);
    let pattern = Path::new(&escaped).join(format!("{}*.{}", REPORT_PREFIX, extension));
    let pattern = pattern.to_str()?;

    let mut matches: Vec<PathBuf> = match glob(pattern) {
        Ok(paths) => paths
            .flatten()
            .filter(|p| p.is_file())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| date_pattern().is_match(n))
                    .unwrap_or(false)
            })
            .collect(),
        Err(e) => {
            tracing::debug!("Invalid report glob {}: {}", pattern, e);
            return None;
        }
    };

    matches.sort();
    matches.pop()
}

/// 파일명에서 첫 번째 ISO 날짜 모양 문자열
pub fn extract_date_from_filename(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    date_pattern().find(name).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "x").unwrap();
    }

    #[test]
    fn latest_report_is_last_in_date_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "vibe-sec-log-report-2026-02-19.md");
        touch(tmp.path(), "vibe-sec-log-report-2026-01-01.md");
        touch(tmp.path(), "vibe-sec-log-report-2025-12-31.md");

        let latest = find_latest_report(tmp.path(), "md").unwrap();
        assert_eq!(latest.file_name().unwrap(), "vibe-sec-log-report-2026-02-19.md");
    }

    #[test]
    fn extension_is_respected() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "vibe-sec-log-report-2026-03-01.html");
        touch(tmp.path(), "vibe-sec-log-report-2026-01-01.md");

        let md = find_latest_report(tmp.path(), "md").unwrap();
        assert!(md.ends_with("vibe-sec-log-report-2026-01-01.md"));
        let html = find_latest_report(tmp.path(), "html").unwrap();
        assert!(html.ends_with("vibe-sec-log-report-2026-03-01.html"));
    }

    #[test]
    fn no_match_returns_none() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "notes.md");
        touch(tmp.path(), "vibe-sec-log-report-latest.md");
        assert!(find_latest_report(tmp.path(), "md").is_none());
    }

    #[test]
    fn missing_dir_returns_none() {
        let tmp = TempDir::new().unwrap();
        assert!(find_latest_report(&tmp.path().join("nope"), "md").is_none());
    }

    #[test]
    fn date_from_filename() {
        let p = Path::new("/tmp/vibe-sec-log-report-2026-02-19.md");
        assert_eq!(extract_date_from_filename(p).as_deref(), Some("2026-02-19"));
        assert_eq!(extract_date_from_filename(Path::new("report.md")), None);
    }

    #[test]
    fn date_requires_ascii_digits() {
        let p = Path::new("vibe-sec-log-report-٢٠٢٦-٠٢-١٩.md");
        assert_eq!(extract_date_from_filename(p), None);

        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "vibe-sec-log-report-٢٠٢٦-٠٢-١٩.md");
        touch(tmp.path(), "vibe-sec-log-report-2026-01-01.md");
        let latest = find_latest_report(tmp.path(), "md").unwrap();
        assert!(latest.ends_with("vibe-sec-log-report-2026-01-01.md"));
    }

    #[test]
    fn date_only_looks_at_file_name() {
        let p = Path::new("/backup/2020-01-01/vibe-sec-log-report-2026-02-19.md");
        assert_eq!(extract_date_from_filename(p).as_deref(), Some("2026-02-19"));
    }

    #[test]
    fn config_dir_prefers_primary() {
        let home = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join(".config").join("vibe-sec")).unwrap();
        fs::create_dir_all(fallback.path().join("vibe-sec")).unwrap();

        let dir = locate_config_dir_from(home.path(), Some(fallback.path()));
        assert_eq!(dir, home.path().join(".config").join("vibe-sec"));
    }

    #[test]
    fn config_dir_uses_fallback_when_primary_missing() {
        let home = TempDir::new().unwrap();
        let fallback = TempDir::new().unwrap();
        fs::create_dir_all(fallback.path().join("vibe-sec")).unwrap();

        let dir = locate_config_dir_from(home.path(), Some(fallback.path()));
        assert_eq!(dir, fallback.path().join("vibe-sec"));
    }

    #[test]
    fn config_dir_defaults_to_primary_when_nothing_exists() {
        let home = TempDir::new().unwrap();
        let dir = locate_config_dir_from(home.path(), None);
        assert_eq!(dir, home.path().join(".config").join("vibe-sec"));
        assert!(!dir.exists());
    }
}
