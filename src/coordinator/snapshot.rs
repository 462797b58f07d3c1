//! 표시 계층에 넘기는 렌더링용 스냅샷
//!
//! 메뉴 문구도 여기서 만들어 트레이 툴킷 쪽은 그대로 그리기만 하면 됩니다.

use serde::Serialize;

use crate::report::ScanResult;

/// 상태 줄에 보여줄 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum ScoreCategory {
    NotInstalled,
    NoResults,
    Clean,
    Findings(u64),
}

impl ScoreCategory {
    /// 미설치가 점수보다 우선
    pub fn from_result(result: &ScanResult) -> Self {
        if !result.is_installed {
            ScoreCategory::NotInstalled
        } else if result.score < 0 {
            ScoreCategory::NoResults
        } else if result.score == 0 {
            ScoreCategory::Clean
        } else {
            ScoreCategory::Findings(result.score as u64)
        }
    }
}

/// 메뉴 항목 하나의 표시 상태
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItemView {
    pub title: String,
    pub enabled: bool,
    pub visible: bool,
}

impl MenuItemView {
    fn clickable(title: impl Into<String>) -> Self {
        Self { title: title.into(), enabled: true, visible: true }
    }

    fn label(title: impl Into<String>) -> Self {
        Self { title: title.into(), enabled: false, visible: true }
    }

    fn hidden() -> Self {
        Self { title: String::new(), enabled: false, visible: false }
    }
}

pub const INSTALL_COMMAND: &str = "npx vibe-sec";
pub const SCAN_COMMAND: &str = "npx vibe-sec scan";
pub const SETUP_COMMAND: &str = "npx vibe-sec setup";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub installed: bool,
    pub score: ScoreCategory,
    pub last_scan_date: Option<String>,
    pub hook_installed: bool,
    pub update_available: Option<String>,
    pub scanning: bool,
}

impl Snapshot {
    pub fn build(
        result: &ScanResult,
        hook_installed: bool,
        update_available: Option<String>,
        scanning: bool,
    ) -> Self {
        Self {
            installed: result.is_installed,
            score: ScoreCategory::from_result(result),
            last_scan_date: result.date.clone(),
            hook_installed,
            update_available,
            scanning,
        }
    }

    pub fn status_title(&self) -> String {
        match self.score {
            ScoreCategory::NotInstalled => "Not installed".to_string(),
            ScoreCategory::NoResults => "No scan results yet".to_string(),
            ScoreCategory::Clean => "✓ Clean — no issues".to_string(),
            ScoreCategory::Findings(n) => format!("● {} findings", n),
        }
    }

    /// 상태 줄 아래 항목: 복사 가능한 커맨드 또는 마지막 스캔 날짜
    pub fn command_item(&self) -> MenuItemView {
        match self.score {
            ScoreCategory::NotInstalled => MenuItemView::clickable(format!("$ {}", INSTALL_COMMAND)),
            ScoreCategory::NoResults => MenuItemView::clickable(format!("$ {}", SCAN_COMMAND)),
            ScoreCategory::Clean | ScoreCategory::Findings(_) => match &self.last_scan_date {
                Some(date) => MenuItemView::label(format!("Last scan: {}", date)),
                None => MenuItemView::hidden(),
            },
        }
    }

    pub fn hook_item(&self) -> MenuItemView {
        if self.hook_installed {
            MenuItemView::label("✓ Injection Catcher: active")
        } else {
            MenuItemView::label("Injection Catcher: not installed")
        }
    }

    /// 훅이 없을 때만 셋업 커맨드를 노출
    pub fn setup_item(&self) -> MenuItemView {
        if self.hook_installed {
            MenuItemView::hidden()
        } else {
            MenuItemView::clickable(format!("$ {}", SETUP_COMMAND))
        }
    }

    pub fn scan_item(&self) -> MenuItemView {
        if self.scanning {
            MenuItemView::label("Scanning...")
        } else {
            MenuItemView::clickable("Scan Now")
        }
    }

    pub fn update_item(&self) -> MenuItemView {
        match &self.update_available {
            Some(ver) => MenuItemView::clickable(format!("↑ Update available: v{}", ver)),
            None => MenuItemView::hidden(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: i64, date: Option<&str>, installed: bool) -> ScanResult {
        ScanResult { score, date: date.map(String::from), is_installed: installed }
    }

    #[test]
    fn not_installed_wins_over_score() {
        let snap = Snapshot::build(&result(5, Some("2026-02-19"), false), false, None, false);
        assert_eq!(snap.score, ScoreCategory::NotInstalled);
        assert_eq!(snap.status_title(), "Not installed");
        assert_eq!(snap.command_item(), MenuItemView::clickable("$ npx vibe-sec"));
    }

    #[test]
    fn no_results_offers_scan_command() {
        let snap = Snapshot::build(&result(-1, None, true), true, None, false);
        assert_eq!(snap.score, ScoreCategory::NoResults);
        assert_eq!(snap.status_title(), "No scan results yet");
        assert_eq!(snap.command_item().title, "$ npx vibe-sec scan");
        assert!(snap.command_item().enabled);
    }

    #[test]
    fn clean_shows_last_scan_date() {
        let snap = Snapshot::build(&result(0, Some("2026-02-19"), true), true, None, false);
        assert_eq!(snap.status_title(), "✓ Clean — no issues");
        assert_eq!(snap.command_item(), MenuItemView::label("Last scan: 2026-02-19"));
    }

    #[test]
    fn findings_without_date_hide_command() {
        let snap = Snapshot::build(&result(3, None, true), true, None, false);
        assert_eq!(snap.score, ScoreCategory::Findings(3));
        assert_eq!(snap.status_title(), "● 3 findings");
        assert!(!snap.command_item().visible);
    }

    #[test]
    fn large_counts_are_not_truncated() {
        let snap = Snapshot::build(&result(99_999_999_999, None, true), false, None, false);
        assert_eq!(snap.score, ScoreCategory::Findings(99_999_999_999));
        assert_eq!(snap.status_title(), "● 99999999999 findings");
    }

    #[test]
    fn hook_and_setup_items() {
        let with_hook = Snapshot::build(&result(0, None, true), true, None, false);
        assert_eq!(with_hook.hook_item().title, "✓ Injection Catcher: active");
        assert!(!with_hook.setup_item().visible);

        let without = Snapshot::build(&result(0, None, true), false, None, false);
        assert_eq!(without.hook_item().title, "Injection Catcher: not installed");
        assert_eq!(without.setup_item().title, "$ npx vibe-sec setup");
    }

    #[test]
    fn update_and_scan_items() {
        let snap = Snapshot::build(&result(0, None, true), true, Some("1.2.0".into()), true);
        assert_eq!(snap.update_item().title, "↑ Update available: v1.2.0");
        assert_eq!(snap.scan_item(), MenuItemView::label("Scanning..."));

        let idle = Snapshot::build(&result(0, None, true), true, None, false);
        assert!(!idle.update_item().visible);
        assert_eq!(idle.scan_item().title, "Scan Now");
    }
}
