use serde::{Deserialize, Serialize};

use crate::startup::StartupStage;

/// Main-flow phase of the get-started flow.
///
/// 启动流程的主阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StartupPhase {
    /// Nothing decided yet; waiting for the mode resolver.
    PreStart,
    /// User manages the daemon connection parameters manually.
    StartAdvancedDaemon,
    /// Light client mode, no daemon involved.
    #[serde(rename = "startSPV")]
    StartSpv,
    StartingDaemon,
    ConnectingDaemon,
    SyncingDaemon,
    CheckingNetworkMatch,
    DaemonError,
    ChoosingWallet,
    /// Wallet database is missing; offer create or restore.
    PreCreateWallet,
    WalletPubpassInput,
    WalletDiscoverAccountsPassInput,
    StartingWallet,
    #[serde(rename = "syncingRPC")]
    SyncingRpc,
    /// Terminal success: control goes to the setting-up sub-flow.
    SettingUpWallet,
}

impl StartupPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartupPhase::PreStart => "preStart",
            StartupPhase::StartAdvancedDaemon => "startAdvancedDaemon",
            StartupPhase::StartSpv => "startSPV",
            StartupPhase::StartingDaemon => "startingDaemon",
            StartupPhase::ConnectingDaemon => "connectingDaemon",
            StartupPhase::SyncingDaemon => "syncingDaemon",
            StartupPhase::CheckingNetworkMatch => "checkingNetworkMatch",
            StartupPhase::DaemonError => "daemonError",
            StartupPhase::ChoosingWallet => "choosingWallet",
            StartupPhase::PreCreateWallet => "preCreateWallet",
            StartupPhase::WalletPubpassInput => "walletPubpassInput",
            StartupPhase::WalletDiscoverAccountsPassInput => "walletDiscoverAccountsPassInput",
            StartupPhase::StartingWallet => "startingWallet",
            StartupPhase::SyncingRpc => "syncingRPC",
            StartupPhase::SettingUpWallet => "settingUpWallet",
        }
    }

    /// Phases whose failures are daemon failures (routed to `daemonError`).
    pub fn is_daemon_phase(&self) -> bool {
        matches!(
            self,
            StartupPhase::StartAdvancedDaemon
                | StartupPhase::StartSpv
                | StartupPhase::StartingDaemon
                | StartupPhase::ConnectingDaemon
                | StartupPhase::SyncingDaemon
                | StartupPhase::CheckingNetworkMatch
        )
    }

    /// Stage whose success clears a stage-less error raised in this phase.
    pub fn stage(&self) -> StartupStage {
        match self {
            StartupPhase::PreStart
            | StartupPhase::StartAdvancedDaemon
            | StartupPhase::StartingDaemon
            | StartupPhase::DaemonError => StartupStage::DaemonStart,
            StartupPhase::ConnectingDaemon => StartupStage::DaemonConnect,
            StartupPhase::SyncingDaemon => StartupStage::DaemonSync,
            StartupPhase::CheckingNetworkMatch => StartupStage::NetworkCheck,
            StartupPhase::StartSpv | StartupPhase::ChoosingWallet => StartupStage::WalletList,
            StartupPhase::PreCreateWallet
            | StartupPhase::WalletPubpassInput
            | StartupPhase::WalletDiscoverAccountsPassInput
            | StartupPhase::StartingWallet => StartupStage::WalletStart,
            StartupPhase::SyncingRpc | StartupPhase::SettingUpWallet => StartupStage::WalletSync,
        }
    }

    /// Whether settings/logs/trezor/release-notes views may be opened on top.
    pub fn allows_overlay(&self) -> bool {
        !matches!(
            self,
            StartupPhase::PreStart | StartupPhase::DaemonError | StartupPhase::SettingUpWallet
        )
    }
}

/// Views entered on top of a main phase that return to it on `BACK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Overlay {
    Settings,
    Logs,
    TrezorConfig,
    ReleaseNotes,
    /// Hosts the externally owned create-wallet sub-flow.
    CreatingWallet,
}

impl Overlay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Overlay::Settings => "settings",
            Overlay::Logs => "logs",
            Overlay::TrezorConfig => "trezorConfig",
            Overlay::ReleaseNotes => "releaseNotes",
            Overlay::CreatingWallet => "creatingWallet",
        }
    }
}

/// Exactly one of these is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StartupState {
    Phase(StartupPhase),
    Overlay {
        overlay: Overlay,
        /// Phase restored by `BACK`.
        origin: StartupPhase,
    },
}

impl StartupState {
    pub fn initial() -> Self {
        StartupState::Phase(StartupPhase::PreStart)
    }

    pub fn phase_name(&self) -> &'static str {
        match self {
            StartupState::Phase(phase) => phase.as_str(),
            StartupState::Overlay { overlay, .. } => overlay.as_str(),
        }
    }

    /// The main phase, or `None` while an overlay is shown.
    pub fn phase(&self) -> Option<StartupPhase> {
        match self {
            StartupState::Phase(phase) => Some(*phase),
            StartupState::Overlay { .. } => None,
        }
    }

    pub fn is_phase(&self, phase: StartupPhase) -> bool {
        self.phase() == Some(phase)
    }

    pub fn overlay(&self) -> Option<Overlay> {
        match self {
            StartupState::Phase(_) => None,
            StartupState::Overlay { overlay, .. } => Some(*overlay),
        }
    }
}

impl From<StartupPhase> for StartupState {
    fn from(phase: StartupPhase) -> Self {
        StartupState::Phase(phase)
    }
}

impl Default for StartupState {
    fn default() -> Self {
        Self::initial()
    }
}
