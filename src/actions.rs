//! 사용자 메뉴 커맨드
//!
//! 각 커맨드는 인자 없는 트리거입니다. 블로킹 부수효과(클립보드, 오프너)는
//! blocking 풀에서 실행하므로 디스패치 태스크를 막지 않습니다.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::TrayConfig;
use crate::coordinator::snapshot::{INSTALL_COMMAND, SCAN_COMMAND, SETUP_COMMAND};
use crate::coordinator::{MenuSlot, ScanTrigger, StateCoordinator, TrayEvent};
use crate::desktop::Desktop;
use crate::error::TrayError;
use crate::probe;
use crate::report::locator;

pub const COPIED_MESSAGE: &str = "✓ Copied — paste in Terminal";
pub const UPDATE_COPIED_MESSAGE: &str = "✓ Update command copied!";
/// HTML 리포트가 없을 때 띄우는 로컬 리포트 서버
pub const REPORT_SERVER_URL: &str = "http://localhost:7777";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    CopyInstallCommand,
    CopySetupCommand,
    OpenReport,
    ScanNow,
    CopyUpdateCommand,
    Quit,
}

impl FromStr for UserCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "install" | "copy" | "copy-install-command" => Ok(UserCommand::CopyInstallCommand),
            "setup" | "copy-setup-command" => Ok(UserCommand::CopySetupCommand),
            "open" | "report" | "open-report" => Ok(UserCommand::OpenReport),
            "scan" | "scan-now" => Ok(UserCommand::ScanNow),
            "update" | "copy-update-command" => Ok(UserCommand::CopyUpdateCommand),
            "quit" | "exit" | "q" => Ok(UserCommand::Quit),
            other => Err(format!(
                "Unknown command '{}' (install, setup, open, scan, update, quit)",
                other
            )),
        }
    }
}

/// 디스패치 루프에 돌려주는 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Continue,
    Quit,
}

/// 플랫폼별 업데이트 커맨드
pub fn update_command(owner: &str, repo: &str) -> String {
    if cfg!(target_os = "windows") {
        format!(
            "powershell -Command \"& {{ $r = Invoke-RestMethod 'https://api.github.com/repos/{}/{}/releases/latest'; $url = $r.assets[0].browser_download_url; Invoke-WebRequest $url -OutFile vibe-sec.exe; Start-Process vibe-sec.exe }}\"",
            owner, repo
        )
    } else {
        let opener = if cfg!(target_os = "macos") { "open" } else { "xdg-open" };
        format!("{} https://github.com/{}/{}/releases/latest", opener, owner, repo)
    }
}

#[derive(Clone)]
pub struct Actions {
    coordinator: Arc<StateCoordinator>,
    desktop: Arc<dyn Desktop>,
    node_binary: String,
    update_command: String,
    /// 피드백 문구를 보여준 뒤 원래 메뉴로 되돌리기까지의 시간
    feedback_delay: Duration,
}

impl Actions {
    pub fn new(coordinator: Arc<StateCoordinator>, desktop: Arc<dyn Desktop>, config: &TrayConfig) -> Self {
        Self {
            coordinator,
            desktop,
            node_binary: config.node_binary.clone(),
            update_command: update_command(&config.github_owner, &config.github_repo),
            feedback_delay: Duration::from_secs(2),
        }
    }

    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    pub async fn handle(&self, command: UserCommand) -> ActionOutcome {
        tracing::debug!("[Actions] {:?}", command);
        match command {
            UserCommand::CopyInstallCommand => {
                let text = self.install_command_text().await;
                self.copy_with_feedback(text, MenuSlot::Command, COPIED_MESSAGE).await;
            }
            UserCommand::CopySetupCommand => {
                self.copy_with_feedback(SETUP_COMMAND.to_string(), MenuSlot::HookSetup, COPIED_MESSAGE)
                    .await;
            }
            UserCommand::OpenReport => {
                if let Err(e) = self.open_report().await {
                    tracing::warn!("[Actions] Failed to open report: {}", e);
                }
            }
            UserCommand::ScanNow => {
                if let ScanTrigger::AlreadyRunning = self.coordinator.trigger_scan().await {
                    tracing::info!("[Actions] Scan request ignored, one is already running");
                }
            }
            UserCommand::CopyUpdateCommand => {
                if self.coordinator.latest_version().await.is_some() {
                    self.copy_with_feedback(
                        self.update_command.clone(),
                        MenuSlot::Update,
                        UPDATE_COPIED_MESSAGE,
                    )
                    .await;
                } else {
                    tracing::debug!("[Actions] No update known, nothing to copy");
                }
            }
            UserCommand::Quit => {
                self.coordinator.shutdown();
                return ActionOutcome::Quit;
            }
        }
        ActionOutcome::Continue
    }

    /// 설치는 됐지만 결과가 없으면 scan 커맨드, 그 외에는 설치 커맨드
    pub async fn install_command_text(&self) -> String {
        match self.coordinator.last_result().await {
            Some(r) if r.is_installed && !r.has_score() => SCAN_COMMAND.to_string(),
            _ => INSTALL_COMMAND.to_string(),
        }
    }

    async fn copy_with_feedback(&self, text: String, slot: MenuSlot, message: &str) {
        let desktop = Arc::clone(&self.desktop);
        let copied = tokio::task::spawn_blocking(move || desktop.copy_text(&text))
            .await
            .map_err(TrayError::from)
            .and_then(|r| r);

        match copied {
            Ok(()) => {
                self.coordinator.publish(TrayEvent::Feedback {
                    slot,
                    message: message.to_string(),
                });
                tokio::time::sleep(self.feedback_delay).await;
                self.coordinator.refresh().await;
            }
            Err(e) => tracing::warn!("[Actions] Copy failed: {}", e),
        }
    }

    /// 최신 HTML 리포트를 열고, 없으면 리포트 서버를 띄워 브라우저로 연결
    async fn open_report(&self) -> Result<(), TrayError> {
        let desktop = Arc::clone(&self.desktop);
        let dir = self.coordinator.paths().config_dir.clone();
        let node = self.node_binary.clone();

        tokio::task::spawn_blocking(move || {
            if let Some(html) = locator::find_latest_report(&dir, "html") {
                tracing::info!("[Actions] Opening {}", html.display());
                return desktop.open(&html.to_string_lossy());
            }

            let server = probe::report_server_script_path(&dir);
            if !server.is_file() {
                tracing::info!("[Actions] No HTML report and no report server in {}", dir.display());
                return Ok(());
            }

            let script = server.to_string_lossy().into_owned();
            desktop.spawn_detached(&node, &[script.as_str()], &dir)?;
            desktop.open(REPORT_SERVER_URL)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!("scan".parse::<UserCommand>(), Ok(UserCommand::ScanNow));
        assert_eq!(" Open-Report ".parse::<UserCommand>(), Ok(UserCommand::OpenReport));
        assert_eq!("copy-install-command".parse::<UserCommand>(), Ok(UserCommand::CopyInstallCommand));
        assert_eq!("setup".parse::<UserCommand>(), Ok(UserCommand::CopySetupCommand));
        assert_eq!("update".parse::<UserCommand>(), Ok(UserCommand::CopyUpdateCommand));
        assert_eq!("q".parse::<UserCommand>(), Ok(UserCommand::Quit));
        assert!("reboot".parse::<UserCommand>().is_err());
    }

    #[test]
    fn update_command_targets_repo() {
        let cmd = update_command("kobzevvv", "vibe-sec-app-win");
        assert!(cmd.contains("kobzevvv/vibe-sec-app-win/releases/latest"));
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn update_command_downloads_with_powershell() {
        let cmd = update_command("kobzevvv", "vibe-sec-app-win");
        assert!(cmd.starts_with("powershell -Command"));
        assert!(cmd.contains("Start-Process vibe-sec.exe"));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn update_command_opens_release_page() {
        let opener = if cfg!(target_os = "macos") { "open" } else { "xdg-open" };
        assert_eq!(
            update_command("kobzevvv", "vibe-sec-app-win"),
            format!("{} https://github.com/kobzevvv/vibe-sec-app-win/releases/latest", opener)
        );
    }
}
