use std::path::PathBuf;

use crate::ids::SubflowRef;
use crate::security::SecretString;
use crate::startup::StartupError;
use crate::wallet::{RpcCredentials, WalletDescriptor};

/// Events that drive the startup flow.
///
/// 驱动启动流程的事件。Events come from three sources: the mode resolver
/// (once), the user through the command surface, and effect results.
#[derive(Debug, PartialEq)]
pub enum StartupEvent {
    // Mode resolution
    StartCliRemoteDaemon { credentials: RpcCredentials },
    StartSpv,
    StartAdvancedDaemon,
    StartRegularDaemon,

    // Advanced startup
    SubmitRemote { credentials: RpcCredentials },
    SubmitAppdata { appdata: PathBuf },
    Continue,

    // Daemon results (from orchestrator)
    ConnectDaemon {
        credentials: Option<RpcCredentials>,
        appdata: Option<PathBuf>,
    },
    ErrorStartingDaemon { error: StartupError },
    SyncDaemon,
    ErrorConnectingDaemon { error: StartupError },
    CheckNetworkMatch,
    ErrorSyncingDaemon { error: StartupError },
    ChooseWallet,
    ErrorNetworkDaemon { error: StartupError },

    // Wallet selection
    AvailableWalletsLoaded { wallets: Vec<WalletDescriptor> },
    AvailableWalletError { error: StartupError },
    SubmitChooseWallet { wallet: WalletDescriptor },
    CreateWallet { is_new: bool },

    // Wallet start
    WalletStarted { discover_accounts_complete: bool },
    WalletDatabaseMissing { is_new: bool },
    /// Ask for the private passphrase; `error` carries the reason when the
    /// previous one was rejected.
    WalletDiscoverAccountsPass { error: Option<StartupError> },
    WalletPubpassInput,
    SubmitPublicPassphrase { passphrase: SecretString },
    SetPassphrase { passphrase: SecretString },
    SyncRpc,

    // Wallet sync
    ShowSettingUpWallet,
    ErrorSyncingWallet { error: StartupError },

    // Sub-flows
    ShowCreateWallet {
        is_new: bool,
        is_trezor: bool,
        wallet_master_pub_key: Option<String>,
    },
    CreateWalletLaunched { handle: SubflowRef },
    WalletCreated { wallet: WalletDescriptor },
    SettingUpWalletLaunched { handle: SubflowRef },

    // Navigation
    ShowSettings,
    ShowLogs,
    ShowTrezorConfig,
    ShowReleaseNotes,
    Back,

    Error { error: StartupError },
}

impl StartupEvent {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            StartupEvent::StartCliRemoteDaemon { .. } => "START_CLI_REMOTE_DAEMON",
            StartupEvent::StartSpv => "START_SPV",
            StartupEvent::StartAdvancedDaemon => "START_ADVANCED_DAEMON",
            StartupEvent::StartRegularDaemon => "START_REGULAR_DAEMON",
            StartupEvent::SubmitRemote { .. } => "SUBMIT_REMOTE",
            StartupEvent::SubmitAppdata { .. } => "SUBMIT_APPDATA",
            StartupEvent::Continue => "CONTINUE",
            StartupEvent::ConnectDaemon { .. } => "CONNECT_DAEMON",
            StartupEvent::ErrorStartingDaemon { .. } => "ERROR_STARTING_DAEMON",
            StartupEvent::SyncDaemon => "SYNC_DAEMON",
            StartupEvent::ErrorConnectingDaemon { .. } => "ERROR_CONNECTING_DAEMON",
            StartupEvent::CheckNetworkMatch => "CHECK_NETWORK_MATCH",
            StartupEvent::ErrorSyncingDaemon { .. } => "ERROR_SYNCING_DAEMON",
            StartupEvent::ChooseWallet => "CHOOSE_WALLET",
            StartupEvent::ErrorNetworkDaemon { .. } => "ERROR_NETWORK_DAEMON",
            StartupEvent::AvailableWalletsLoaded { .. } => "AVAILABLE_WALLETS_LOADED",
            StartupEvent::AvailableWalletError { .. } => "AVAILABLE_WALLET_ERROR",
            StartupEvent::SubmitChooseWallet { .. } => "SUBMIT_CHOOSE_WALLET",
            StartupEvent::CreateWallet { .. } => "CREATE_WALLET",
            StartupEvent::WalletStarted { .. } => "WALLET_STARTED",
            StartupEvent::WalletDatabaseMissing { .. } => "WALLET_DATABASE_MISSING",
            StartupEvent::WalletDiscoverAccountsPass { .. } => "WALLET_DISCOVERACCOUNTS_PASS",
            StartupEvent::WalletPubpassInput => "WALLET_PUBPASS_INPUT",
            StartupEvent::SubmitPublicPassphrase { .. } => "SUBMIT_PUBLIC_PASSPHRASE",
            StartupEvent::SetPassphrase { .. } => "SETPASSPHRASE",
            StartupEvent::SyncRpc => "SYNC_RPC",
            StartupEvent::ShowSettingUpWallet => "SHOW_SETTING_UP_WALLET",
            StartupEvent::ErrorSyncingWallet { .. } => "ERROR_SYNCING_WALLET",
            StartupEvent::ShowCreateWallet { .. } => "SHOW_CREATE_WALLET",
            StartupEvent::CreateWalletLaunched { .. } => "CREATE_WALLET_LAUNCHED",
            StartupEvent::WalletCreated { .. } => "WALLET_CREATED",
            StartupEvent::SettingUpWalletLaunched { .. } => "SETTING_UP_WALLET_LAUNCHED",
            StartupEvent::ShowSettings => "SHOW_SETTINGS",
            StartupEvent::ShowLogs => "SHOW_LOGS",
            StartupEvent::ShowTrezorConfig => "SHOW_TREZOR_CONFIG",
            StartupEvent::ShowReleaseNotes => "SHOW_RELEASE_NOTES",
            StartupEvent::Back => "BACK",
            StartupEvent::Error { .. } => "ERROR",
        }
    }
}
