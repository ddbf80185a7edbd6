use serde::Serialize;

use crate::startup::{ContextView, StartupPhase, StartupState};

/// Point-in-time copy of the startup flow, published after every dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupSnapshot {
    pub state: StartupState,
    pub context: ContextView,
}

impl StartupSnapshot {
    pub fn new(state: StartupState, context: ContextView) -> Self {
        Self { state, context }
    }

    pub fn phase_name(&self) -> &'static str {
        self.state.phase_name()
    }

    /// In the daemon error phase, or carrying an error of any stage.
    pub fn is_at_error(&self) -> bool {
        self.state.is_phase(StartupPhase::DaemonError) || self.context.error.is_some()
    }

    /// Whether a `BACK` command would currently be accepted.
    pub fn can_go_back(&self) -> bool {
        match self.state {
            StartupState::Overlay { .. } => true,
            StartupState::Phase(StartupPhase::PreCreateWallet) => true,
            StartupState::Phase(
                StartupPhase::WalletPubpassInput | StartupPhase::WalletDiscoverAccountsPassInput,
            ) => !self.context.wallet_started,
            StartupState::Phase(_) => false,
        }
    }

    /// Control has been handed to the setting-up sub-flow.
    pub fn is_finished(&self) -> bool {
        self.state.is_phase(StartupPhase::SettingUpWallet)
    }
}
