//! 클립보드/브라우저 같은 데스크톱 부수효과
//!
//! 전부 best-effort입니다. 실패는 `TrayError`로 돌려주고 호출측이 로그만 남깁니다.

use std::path::Path;
use std::process::Command;

use crate::error::TrayError;
use crate::utils::{apply_creation_flags, silence};

/// 액션이 사용하는 데스크톱 기능. 블로킹 호출
pub trait Desktop: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<(), TrayError>;

    /// 파일 경로 또는 URL을 기본 프로그램으로 열기
    fn open(&self, target: &str) -> Result<(), TrayError>;

    /// 백그라운드 프로세스 시작 (기다리지 않음)
    fn spawn_detached(&self, program: &str, args: &[&str], cwd: &Path) -> Result<(), TrayError>;
}

/// 실제 OS 기능을 쓰는 구현
pub struct SystemDesktop;

impl Desktop for SystemDesktop {
    fn copy_text(&self, text: &str) -> Result<(), TrayError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| TrayError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| TrayError::Clipboard(e.to_string()))
    }

    fn open(&self, target: &str) -> Result<(), TrayError> {
        let mut cmd = opener_command(target);
        silence(&mut cmd);
        apply_creation_flags(&mut cmd);
        cmd.spawn()
            .map(|_| ())
            .map_err(|source| TrayError::Spawn {
                program: cmd.get_program().to_string_lossy().into_owned(),
                source,
            })
    }

    fn spawn_detached(&self, program: &str, args: &[&str], cwd: &Path) -> Result<(), TrayError> {
        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(cwd);
        silence(&mut cmd);
        apply_creation_flags(&mut cmd);
        cmd.spawn()
            .map(|_| ())
            .map_err(|source| TrayError::Spawn {
                program: program.to_string(),
                source,
            })
    }
}

/// OS 기본 오프너 커맨드
pub fn opener_command(target: &str) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/c", "start", "", target]);
        cmd
    }

    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(target);
        cmd
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(target);
        cmd
    }
}
