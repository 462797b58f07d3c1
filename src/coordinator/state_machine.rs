use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransitionError {
    #[error("invalid transition: {0:?} -> {1:?}")]
    InvalidTransition(ScanState, ScanState),
}

/// 스캔 수명주기: Idle → Scanning → Idle
///
/// Idle→Scanning은 이미 Scanning이면 거부되고,
/// Scanning→Idle은 서브프로세스 결과와 관계없이 항상 일어납니다.
#[derive(Debug)]
pub struct ScanStateMachine {
    state: ScanState,
}

impl Default for ScanStateMachine {
    fn default() -> Self {
        Self { state: ScanState::Idle }
    }
}

impl ScanStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_scanning(&self) -> bool {
        self.state == ScanState::Scanning
    }

    pub fn can_transition(&self, to: ScanState) -> bool {
        matches!(
            (self.state, to),
            (ScanState::Idle, ScanState::Scanning) | (ScanState::Scanning, ScanState::Idle)
        )
    }

    pub fn transition(&mut self, to: ScanState) -> Result<(), TransitionError> {
        if self.can_transition(to) {
            tracing::debug!("Scan state transition: {:?} -> {:?}", self.state, to);
            self.state = to;
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition(self.state, to))
        }
    }

    /// Idle → Scanning
    pub fn begin(&mut self) -> Result<(), TransitionError> {
        self.transition(ScanState::Scanning)
    }

    /// 어떤 상태에서든 Idle로
    pub fn finish(&mut self) {
        if self.transition(ScanState::Idle).is_err() {
            tracing::warn!("Scan finished while state machine was already idle");
        }
    }
}
