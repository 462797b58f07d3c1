//! 공유 상태 코디네이터
//!
//! ## 아키텍처
//! - `ApplicationState` 하나를 `Mutex` 하나로 보호합니다.
//! - 락은 메모리 필드 읽기/쓰기에만 잡고, 파일시스템/서브프로세스/네트워크
//!   호출 동안에는 절대 잡지 않습니다. 결과는 끝난 뒤 락 안에서 합칩니다.
//! - 상태가 바뀔 때마다 `Snapshot`을 `TrayEvent`로 브로드캐스트하고,
//!   표시 계층은 단일 디스패치 태스크에서 순서대로 그립니다.
//! - 새로고침 스냅샷은 락 안에서 발행하므로 발행 순서가 `last_result`
//!   쓰기 순서와 같습니다. 마지막으로 발행된 스냅샷이 현재 상태입니다.
//! - 주기 작업(새로고침, 업데이트 확인)은 서로 독립된 tokio 태스크입니다.

pub mod snapshot;
pub mod state_machine;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use vibe_sec_updater_lib::{scheduler, SchedulerConfig, UpdateChecker};

use crate::probe;
use crate::report::{self, ScanResult};
use crate::scanner::ScanRunner;
pub use snapshot::{MenuItemView, ScoreCategory, Snapshot};
pub use state_machine::{ScanState, ScanStateMachine, TransitionError};

/// 코디네이터가 보는 파일 경로
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// vibe-sec 설정 디렉터리 (리포트, scripts/)
    pub config_dir: PathBuf,
    /// Claude settings.json
    pub settings_path: PathBuf,
}

/// 프로세스 수명 동안 하나만 존재하는 가변 상태
#[derive(Debug, Default)]
pub struct ApplicationState {
    pub last_result: Option<ScanResult>,
    pub scan: ScanStateMachine,
    pub latest_version: Option<String>,
}

/// 표시 계층이 어느 메뉴 항목에 일시 피드백을 띄울지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSlot {
    Command,
    HookSetup,
    Update,
}

/// 표시 계층으로 브로드캐스트되는 이벤트
#[derive(Debug, Clone)]
pub enum TrayEvent {
    /// 최신 렌더링 스냅샷
    Snapshot(Snapshot),
    ScanStarted,
    ScanFinished { exit_code: Option<i32> },
    /// "✓ Copied" 같은 일시 문구. 다음 스냅샷이 덮어씀
    Feedback { slot: MenuSlot, message: String },
    Shutdown,
}

/// `trigger_scan` 결과
#[derive(Debug)]
pub enum ScanTrigger {
    Started(JoinHandle<()>),
    AlreadyRunning,
}

pub struct StateCoordinator {
    state: Mutex<ApplicationState>,
    paths: Paths,
    scanner: Arc<dyn ScanRunner>,
    updater: UpdateChecker,
    events: broadcast::Sender<TrayEvent>,
    cancel: CancellationToken,
}

impl StateCoordinator {
    pub fn new(paths: Paths, scanner: Arc<dyn ScanRunner>, updater: UpdateChecker) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            state: Mutex::new(ApplicationState::default()),
            paths,
            scanner,
            updater,
            events,
            cancel: CancellationToken::new(),
        })
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrayEvent> {
        self.events.subscribe()
    }

    /// 구독자가 없으면 조용히 버림
    pub fn publish(&self, event: TrayEvent) {
        let _ = self.events.send(event);
    }

    pub async fn last_result(&self) -> Option<ScanResult> {
        self.state.lock().await.last_result.clone()
    }

    pub async fn latest_version(&self) -> Option<String> {
        self.state.lock().await.latest_version.clone()
    }

    pub async fn is_scanning(&self) -> bool {
        self.state.lock().await.scan.is_scanning()
    }

    /// 리포트/설치 상태를 다시 읽고 스냅샷을 발행
    ///
    /// 동시에 여러 번 불려도 안전하며 `last_result`는 마지막 쓰기가 이깁니다.
    pub async fn refresh(&self) -> Snapshot {
        let paths = self.paths.clone();
        let probed = tokio::task::spawn_blocking(move || {
            let result = report::read_scan_result(&paths.config_dir);
            let hook_installed = probe::is_hook_installed(&paths.settings_path);
            (result, hook_installed)
        })
        .await;

        let (result, hook_installed) = match probed {
            Ok(v) => v,
            Err(e) => {
                tracing::error!("[Coordinator] Report probe task failed: {}", e);
                (ScanResult::no_results(false), false)
            }
        };

        // broadcast::send는 블로킹하지 않으므로 락 안에서 발행
        let mut state = self.state.lock().await;
        let snapshot = Snapshot::build(
            &result,
            hook_installed,
            state.latest_version.clone(),
            state.scan.is_scanning(),
        );
        state.last_result = Some(result);
        self.publish(TrayEvent::Snapshot(snapshot.clone()));
        drop(state);

        tracing::debug!("[Coordinator] Refreshed: {:?}", snapshot.score);
        snapshot
    }

    /// 스캔 시작. 이미 진행 중이면 큐에 넣지 않고 `AlreadyRunning`
    ///
    /// 스캐너는 백그라운드 태스크에서 돌고, 끝나면 (성공/실패 무관)
    /// Idle로 돌아간 뒤 `refresh()`를 호출합니다.
    pub async fn trigger_scan(self: &Arc<Self>) -> ScanTrigger {
        {
            let mut state = self.state.lock().await;
            if let Err(e) = state.scan.begin() {
                tracing::info!("[Coordinator] Scan already running ({})", e);
                return ScanTrigger::AlreadyRunning;
            }
        }

        self.publish(TrayEvent::ScanStarted);

        let this = Arc::clone(self);
        ScanTrigger::Started(tokio::spawn(async move {
            this.run_scan().await;
        }))
    }

    async fn run_scan(&self) {
        let scanner = Arc::clone(&self.scanner);
        let dir = self.paths.config_dir.clone();
        let outcome = tokio::task::spawn_blocking(move || scanner.run(&dir)).await;

        let exit_code = match outcome {
            Ok(Ok(code)) => {
                tracing::info!("[Coordinator] Scan finished (exit code {:?})", code);
                code
            }
            Ok(Err(e)) => {
                tracing::warn!("[Coordinator] Scan failed: {}", e);
                None
            }
            Err(e) => {
                tracing::error!("[Coordinator] Scan task panicked: {}", e);
                None
            }
        };

        self.state.lock().await.scan.finish();
        self.publish(TrayEvent::ScanFinished { exit_code });
        self.refresh().await;
    }

    /// 업데이트 확인. 새 버전이 있으면 기록하고 `refresh()`
    pub async fn poll_updates(&self) -> Option<String> {
        let result = scheduler::check_once(&self.updater).await;
        if let Some(err) = &result.error {
            tracing::debug!("[Coordinator] Update check at {} failed: {}", result.checked_at, err);
        }
        let version = result.update?;

        self.state.lock().await.latest_version = Some(version.clone());
        self.refresh().await;
        Some(version)
    }

    /// 시작 즉시 한 번, 이후 각 간격마다 새로고침/업데이트 확인
    pub fn spawn_timers(
        self: &Arc<Self>,
        refresh_every: Duration,
        updates: &SchedulerConfig,
    ) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();

        let this = Arc::clone(self);
        handles.push(spawn_periodic("refresh", refresh_every, self.cancel.clone(), move || {
            let this = Arc::clone(&this);
            async move {
                this.refresh().await;
            }
        }));

        if updates.enabled {
            let this = Arc::clone(self);
            handles.push(spawn_periodic(
                "update-check",
                updates.interval_duration(),
                self.cancel.clone(),
                move || {
                    let this = Arc::clone(&this);
                    async move {
                        this.poll_updates().await;
                    }
                },
            ));
        } else {
            tracing::info!("[Coordinator] Update checks disabled");
        }

        handles
    }

    /// 타이머 중지 + 표시 계층에 종료 알림. 진행 중인 작업은 끝까지 실행됨
    pub fn shutdown(&self) {
        tracing::info!("[Coordinator] Shutting down");
        self.cancel.cancel();
        self.publish(TrayEvent::Shutdown);
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// 취소될 때까지 `period`마다 `tick`을 실행 (첫 틱은 즉시)
fn spawn_periodic<F, Fut>(
    name: &'static str,
    period: Duration,
    cancel: CancellationToken,
    mut tick: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!("[Scheduler] {} timer started (every {:?})", name, period);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => tick().await,
            }
        }

        tracing::info!("[Scheduler] {} timer stopped", name);
    })
}
