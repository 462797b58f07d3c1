use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use vibe_sec_tray::actions::{Actions, UserCommand};
use vibe_sec_tray::config::TrayConfig;
use vibe_sec_tray::coordinator::{StateCoordinator, TrayEvent};
use vibe_sec_tray::desktop::SystemDesktop;
use vibe_sec_tray::scanner::NodeScanRunner;
use vibe_sec_tray::updater::UpdateChecker;
use vibe_sec_tray::view::{ConsoleView, TOOLTIP};
use vibe_sec_tray::APP_VERSION;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout은 메뉴 렌더링 전용, 로그는 stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
    tracing::info!("{} (v{}) starting", TOOLTIP, APP_VERSION);

    let config = TrayConfig::load_default();
    let paths = config.paths();
    tracing::info!("Config dir: {}", paths.config_dir.display());

    let checker = UpdateChecker::new(config.update_config(), APP_VERSION)?;
    let scanner = Arc::new(NodeScanRunner::new(&config.node_binary));
    let coordinator = StateCoordinator::new(paths, scanner, checker);

    // 단일 디스패치 태스크: 이벤트를 순서대로 그림
    let mut events = coordinator.subscribe();
    let dispatcher = tokio::spawn(async move {
        let mut view = ConsoleView::new(APP_VERSION);
        println!("{}\n", view.render());
        loop {
            match events.recv().await {
                Ok(TrayEvent::Shutdown) | Err(RecvError::Closed) => break,
                Ok(event) => {
                    if view.apply(event) {
                        println!("{}\n", view.render());
                    }
                }
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!("Presentation lagged, skipped {} event(s)", n);
                }
            }
        }
    });

    let timers = coordinator.spawn_timers(config.refresh_interval(), &config.scheduler_config());
    let actions = Actions::new(coordinator.clone(), Arc::new(SystemDesktop), &config);

    // 메뉴 클릭 대신 stdin 한 줄 = 커맨드 하나
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match line.parse::<UserCommand>() {
                    Ok(UserCommand::Quit) => {
                        actions.handle(UserCommand::Quit).await;
                        break;
                    }
                    Ok(command) => {
                        let actions = actions.clone();
                        tokio::spawn(async move {
                            actions.handle(command).await;
                        });
                    }
                    Err(e) => eprintln!("{}", e),
                },
                Ok(None) => {
                    tracing::debug!("stdin closed, waiting for Ctrl+C");
                    stdin_open = false;
                }
                Err(e) => {
                    tracing::warn!("Failed to read command: {}", e);
                    stdin_open = false;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                actions.handle(UserCommand::Quit).await;
                break;
            }
        }
    }

    for timer in timers {
        let _ = timer.await;
    }
    let _ = dispatcher.await;

    tracing::info!("vibe-sec tray exiting");
    Ok(())
}
