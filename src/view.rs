//! 콘솔 메뉴 뷰
//!
//! 트레이 툴킷 대신 메뉴 상태를 텍스트로 그립니다. `TrayEvent`를
//! 디스패치 태스크 하나에서 순서대로 적용하므로 그리기가 섞이지 않습니다.

use crate::coordinator::{MenuItemView, MenuSlot, Snapshot, TrayEvent};

pub const TOOLTIP: &str = "vibe-sec — security scanner for AI coding agents";

#[derive(Debug)]
pub struct ConsoleView {
    version: String,
    snapshot: Option<Snapshot>,
    /// 다음 스냅샷 전까지 항목 제목을 덮어쓰는 일시 문구
    feedback: Option<(MenuSlot, String)>,
}

impl ConsoleView {
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            snapshot: None,
            feedback: None,
        }
    }

    /// 이벤트를 적용하고 다시 그려야 하면 true
    pub fn apply(&mut self, event: TrayEvent) -> bool {
        match event {
            TrayEvent::Snapshot(snapshot) => {
                self.snapshot = Some(snapshot);
                self.feedback = None;
                true
            }
            TrayEvent::ScanStarted => {
                if let Some(s) = self.snapshot.as_mut() {
                    s.scanning = true;
                }
                true
            }
            TrayEvent::ScanFinished { .. } => {
                if let Some(s) = self.snapshot.as_mut() {
                    s.scanning = false;
                }
                true
            }
            TrayEvent::Feedback { slot, message } => {
                self.feedback = Some((slot, message));
                true
            }
            TrayEvent::Shutdown => false,
        }
    }

    fn overlay(&self, slot: MenuSlot, mut item: MenuItemView) -> MenuItemView {
        if let Some((s, msg)) = &self.feedback {
            if *s == slot {
                item.title = msg.clone();
                item.visible = true;
            }
        }
        item
    }

    pub fn render(&self) -> String {
        let mut lines = vec![format!("vibe-sec v{}", self.version)];

        let snapshot = match &self.snapshot {
            Some(s) => s,
            None => {
                lines.push("Checking...".to_string());
                return lines.join("\n");
            }
        };

        lines.push(snapshot.status_title());
        push_item(&mut lines, &self.overlay(MenuSlot::Command, snapshot.command_item()));
        lines.push("────".to_string());
        push_item(&mut lines, &snapshot.hook_item());
        push_item(&mut lines, &self.overlay(MenuSlot::HookSetup, snapshot.setup_item()));
        lines.push("────".to_string());
        lines.push("[open] Open Report".to_string());
        push_item(&mut lines, &snapshot.scan_item());
        lines.push("────".to_string());
        push_item(&mut lines, &self.overlay(MenuSlot::Update, snapshot.update_item()));
        lines.push("[quit] Quit vibe-sec".to_string());
        lines.join("\n")
    }
}

fn push_item(lines: &mut Vec<String>, item: &MenuItemView) {
    if !item.visible {
        return;
    }
    if item.enabled {
        lines.push(format!("[*] {}", item.title));
    } else {
        lines.push(format!("    {}", item.title));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ScanResult;

    fn snapshot(score: i64) -> Snapshot {
        let result = ScanResult { score, date: Some("2026-02-19".into()), is_installed: true };
        Snapshot::build(&result, false, Some("1.1.0".into()), false)
    }

    #[test]
    fn renders_checking_before_first_snapshot() {
        let view = ConsoleView::new("1.0.0");
        assert_eq!(view.render(), "vibe-sec v1.0.0\nChecking...");
    }

    #[test]
    fn renders_menu() {
        let mut view = ConsoleView::new("1.0.0");
        view.apply(TrayEvent::Snapshot(snapshot(2)));
        let text = view.render();
        assert!(text.contains("● 2 findings"));
        assert!(text.contains("    Last scan: 2026-02-19"));
        assert!(text.contains("[*] $ npx vibe-sec setup"));
        assert!(text.contains("[*] ↑ Update available: v1.1.0"));
        assert!(text.contains("[*] Scan Now"));
    }

    #[test]
    fn feedback_is_cleared_by_next_snapshot() {
        let mut view = ConsoleView::new("1.0.0");
        view.apply(TrayEvent::Snapshot(snapshot(0)));
        view.apply(TrayEvent::Feedback { slot: MenuSlot::HookSetup, message: "copied".into() });
        assert!(view.render().contains("[*] copied"));

        view.apply(TrayEvent::Snapshot(snapshot(0)));
        assert!(!view.render().contains("copied"));
    }

    #[test]
    fn scan_events_toggle_scan_item() {
        let mut view = ConsoleView::new("1.0.0");
        view.apply(TrayEvent::Snapshot(snapshot(0)));
        view.apply(TrayEvent::ScanStarted);
        assert!(view.render().contains("    Scanning..."));
        view.apply(TrayEvent::ScanFinished { exit_code: Some(0) });
        assert!(view.render().contains("[*] Scan Now"));
    }

    #[test]
    fn shutdown_does_not_redraw() {
        let mut view = ConsoleView::new("1.0.0");
        assert!(!view.apply(TrayEvent::Shutdown));
    }
}
