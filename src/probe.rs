//! 스캐너/인젝션 캐처 훅 설치 여부 확인
//!
//! 두 함수 모두 에러를 반환하지 않습니다. 파일 없음, JSON 파싱 실패,
//! 필드 누락은 전부 "설치 안 됨"(`false`)으로 처리합니다.

use serde_json::Value;
use std::path::{Path, PathBuf};

/// 인젝션 캐처 훅 커맨드에 들어있는 식별 문자열
pub const HOOK_MARKER: &str = "hook.mjs";

/// 스캐너 엔트리 스크립트 (설정 디렉터리 기준)
pub fn scanner_script_path(config_dir: &Path) -> PathBuf {
    config_dir.join("scripts").join("scan-logs.mjs")
}

/// 리포트 서버 스크립트 (설정 디렉터리 기준)
pub fn report_server_script_path(config_dir: &Path) -> PathBuf {
    config_dir.join("scripts").join("serve-report.mjs")
}

pub fn is_scanner_installed(config_dir: &Path) -> bool {
    scanner_script_path(config_dir).is_file()
}

/// settings.json의 `hooks.PreToolUse[*].hooks[*].command`에 마커가 있는지 확인
pub fn is_hook_installed(settings_path: &Path) -> bool {
    let content = match std::fs::read_to_string(settings_path) {
        Ok(c) => c,
        Err(_) => return false,
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(settings) => settings_have_hook(&settings),
        Err(e) => {
            tracing::debug!("Unreadable settings {}: {}", settings_path.display(), e);
            false
        }
    }
}

/// 형식이 맞지 않는 항목은 건너뛰고 나머지를 계속 확인
fn settings_have_hook(settings: &Value) -> bool {
    let entries = match settings
        .get("hooks")
        .and_then(|h| h.get("PreToolUse"))
        .and_then(Value::as_array)
    {
        Some(entries) => entries,
        None => return false,
    };

    entries
        .iter()
        .filter_map(|entry| entry.get("hooks").and_then(Value::as_array))
        .flatten()
        .filter_map(|hook| hook.get("command").and_then(Value::as_str))
        .any(|cmd| cmd.contains(HOOK_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_settings(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("settings.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn hook_present() {
        let tmp = TempDir::new().unwrap();
        let path = write_settings(&tmp, r#"{
            "hooks": {
                "PreToolUse": [
                    { "matcher": "Bash", "hooks": [ { "type": "command", "command": "node ~/.config/vibe-sec/scripts/hook.mjs" } ] }
                ]
            }
        }"#);
        assert!(is_hook_installed(&path));
    }

    #[test]
    fn hook_found_after_malformed_entries() {
        let tmp = TempDir::new().unwrap();
        let path = write_settings(&tmp, r#"{
            "hooks": {
                "PreToolUse": [
                    "not-an-object",
                    { "hooks": "not-an-array" },
                    { "hooks": [ { "command": 42 }, { "type": "command" } ] },
                    { "hooks": [ { "command": "node hook.mjs --catch" } ] }
                ]
            }
        }"#);
        assert!(is_hook_installed(&path));
    }

    #[test]
    fn missing_hooks_key() {
        let tmp = TempDir::new().unwrap();
        let path = write_settings(&tmp, r#"{ "theme": "dark" }"#);
        assert!(!is_hook_installed(&path));
    }

    #[test]
    fn invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = write_settings(&tmp, "{ hooks: ");
        assert!(!is_hook_installed(&path));
    }

    #[test]
    fn other_hooks_only() {
        let tmp = TempDir::new().unwrap();
        let path = write_settings(&tmp, r#"{
            "hooks": {
                "PreToolUse": [ { "hooks": [ { "command": "prettier --write" } ] } ],
                "PostToolUse": [ { "hooks": [ { "command": "node hook.mjs" } ] } ]
            }
        }"#);
        assert!(!is_hook_installed(&path));
    }

    #[test]
    fn missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_hook_installed(&tmp.path().join("settings.json")));
    }

    #[test]
    fn scanner_marker_file() {
        let tmp = TempDir::new().unwrap();
        assert!(!is_scanner_installed(tmp.path()));

        fs::create_dir_all(tmp.path().join("scripts")).unwrap();
        fs::write(scanner_script_path(tmp.path()), "// scanner").unwrap();
        assert!(is_scanner_installed(tmp.path()));
    }
}
