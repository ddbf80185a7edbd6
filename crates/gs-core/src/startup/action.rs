use std::path::PathBuf;

use crate::security::SecretString;
use crate::startup::StartupError;
use crate::wallet::{RpcCredentials, WalletDescriptor};

/// Side effects requested by a state transition.
///
/// 状态迁移产生的副作用。The reducer never performs them; the orchestrator
/// runs each one out-of-band and feeds the outcome back as a single event.
#[derive(Debug, PartialEq)]
pub enum StartupAction {
    /// Start (or attach to) the daemon.
    StartDaemon {
        appdata: Option<PathBuf>,
        remote: Option<RpcCredentials>,
    },

    /// Open the RPC connection to the daemon.
    ConnectDaemon {
        credentials: Option<RpcCredentials>,
        is_remote: bool,
    },

    /// Wait for the daemon to catch up with the chain.
    SyncDaemon,

    /// Verify the daemon runs on the expected network.
    CheckNetworkMatch,

    /// Load the wallet list for the picker.
    ListAvailableWallets,

    /// Start the selected wallet.
    StartWallet {
        wallet: WalletDescriptor,
        has_passphrase: bool,
    },

    /// Open a wallet protected by a public passphrase.
    OpenWallet {
        wallet: WalletDescriptor,
        public_passphrase: SecretString,
    },

    /// Establish wallet RPC sync (or SPV sync).
    SyncRpc {
        passphrase: Option<SecretString>,
        is_spv: bool,
    },

    /// Persist the selection with the wallet loader.
    RememberSelectedWallet { wallet: WalletDescriptor },

    /// Launch the create-wallet sub-flow.
    LaunchCreateWallet(CreateWalletRequest),

    /// Launch the post-sync setting-up sub-flow.
    LaunchSettingUpWallet { wallet: Option<WalletDescriptor> },

    /// SPV needs no user input before the wallet list.
    ContinueSpvStartup,

    /// Advanced mode recovers from daemon errors in-flow.
    ReturnToAdvancedStartup,

    /// Hand a fatal daemon error to the global error view.
    EscalateToErrorPage { error: StartupError },
}

/// Parameters for the create-wallet sub-flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWalletRequest {
    pub is_new: bool,
    pub is_trezor: bool,
    pub wallet_master_pub_key: Option<String>,
    pub is_testnet: bool,
}

/// Effect identity used to suppress duplicate in-flight requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    StartDaemon,
    ConnectDaemon,
    SyncDaemon,
    CheckNetworkMatch,
    ListAvailableWallets,
    StartWallet,
    OpenWallet,
    SyncRpc,
    RememberSelectedWallet,
    LaunchCreateWallet,
    LaunchSettingUpWallet,
    ContinueSpvStartup,
    ReturnToAdvancedStartup,
    EscalateToErrorPage,
}

impl StartupAction {
    pub fn kind(&self) -> EffectKind {
        match self {
            StartupAction::StartDaemon { .. } => EffectKind::StartDaemon,
            StartupAction::ConnectDaemon { .. } => EffectKind::ConnectDaemon,
            StartupAction::SyncDaemon => EffectKind::SyncDaemon,
            StartupAction::CheckNetworkMatch => EffectKind::CheckNetworkMatch,
            StartupAction::ListAvailableWallets => EffectKind::ListAvailableWallets,
            StartupAction::StartWallet { .. } => EffectKind::StartWallet,
            StartupAction::OpenWallet { .. } => EffectKind::OpenWallet,
            StartupAction::SyncRpc { .. } => EffectKind::SyncRpc,
            StartupAction::RememberSelectedWallet { .. } => EffectKind::RememberSelectedWallet,
            StartupAction::LaunchCreateWallet(_) => EffectKind::LaunchCreateWallet,
            StartupAction::LaunchSettingUpWallet { .. } => EffectKind::LaunchSettingUpWallet,
            StartupAction::ContinueSpvStartup => EffectKind::ContinueSpvStartup,
            StartupAction::ReturnToAdvancedStartup => EffectKind::ReturnToAdvancedStartup,
            StartupAction::EscalateToErrorPage { .. } => EffectKind::EscalateToErrorPage,
        }
    }
}
