//! 외부 스캐너 실행
//!
//! 스캐너 내부 동작은 이 크레이트의 관심사가 아닙니다. 정해진 플래그로
//! 실행하고 끝날 때까지 기다릴 뿐이며, 타임아웃은 걸지 않습니다.

use std::path::Path;
use std::process::Command;

use crate::error::TrayError;
use crate::probe;
use crate::utils::{apply_creation_flags, silence};

/// 정적 분석만, 소스 = 앱
pub const SCAN_ARGS: [&str; 3] = ["--static-only", "--source", "app"];

/// 스캐너 실행 경계. 블로킹 호출이며 blocking 풀에서 불립니다.
pub trait ScanRunner: Send + Sync {
    /// 종료 코드를 돌려줌 (시그널 종료 등은 None)
    fn run(&self, config_dir: &Path) -> Result<Option<i32>, TrayError>;
}

/// `node <dir>/scripts/scan-logs.mjs --static-only --source app`
pub struct NodeScanRunner {
    node_binary: String,
}

impl NodeScanRunner {
    pub fn new(node_binary: &str) -> Self {
        Self { node_binary: node_binary.to_string() }
    }

    pub fn command(&self, config_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.node_binary);
        cmd.arg(probe::scanner_script_path(config_dir))
            .args(SCAN_ARGS)
            .current_dir(config_dir);
        silence(&mut cmd);
        apply_creation_flags(&mut cmd);
        cmd
    }
}

impl ScanRunner for NodeScanRunner {
    fn run(&self, config_dir: &Path) -> Result<Option<i32>, TrayError> {
        tracing::info!("[Scanner] Running scan in {}", config_dir.display());
        let status = self
            .command(config_dir)
            .status()
            .map_err(|source| TrayError::Spawn {
                program: self.node_binary.clone(),
                source,
            })?;
        Ok(status.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_uses_fixed_flags_and_config_dir() {
        let dir = Path::new("/home/user/.config/vibe-sec");
        let cmd = NodeScanRunner::new("node").command(dir);

        assert_eq!(cmd.get_program(), "node");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args[0], probe::scanner_script_path(dir).to_string_lossy());
        assert_eq!(&args[1..], &["--static-only", "--source", "app"]);
        assert_eq!(cmd.get_current_dir(), Some(dir));
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let runner = NodeScanRunner::new("definitely-not-a-real-node-binary");
        match runner.run(tmp.path()) {
            Err(TrayError::Spawn { program, .. }) => {
                assert_eq!(program, "definitely-not-a-real-node-binary")
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }
}
