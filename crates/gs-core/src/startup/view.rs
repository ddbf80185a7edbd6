//! View projection.
//!
//! Maps a snapshot plus the collaborator status readouts to a display
//! descriptor. Pure read: nothing here can influence a transition.

use serde::Serialize;

use crate::ids::SubflowRef;
use crate::startup::{Overlay, StartupPhase, StartupSnapshot, StartupState, StartupStatus, SyncStage};

/// Which page the UI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PageKind {
    GetStarted,
    Settings,
    Logs,
    TrezorConfig,
    ReleaseNotes,
    CreatingWallet,
    SettingUpWallet,
}

/// Status line of the get-started page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusText {
    WaitingDaemon,
    WaitingConnection,
    CheckingNetwork,
    StartingDaemon,
    SyncingDaemon,
    ChoosingWallet,
    ChoosingWalletSpv,
    PreCreateWalletCreate,
    PreCreateWalletRestore,
    WalletPubPass,
    WalletDiscoverAccountsPass,
    StartingWallet,
    SyncingRpc,
    FetchingMissingCfilters,
    FetchingBlockHeaders,
    DiscoveringAddresses,
    RescanWallet,
    FinishingStart,
}

impl StatusText {
    /// Localization key.
    pub fn id(&self) -> &'static str {
        match self {
            StatusText::WaitingDaemon => "loaderBar.WaitingDaemon",
            StatusText::WaitingConnection => "loaderBar.WaitingConnection",
            StatusText::CheckingNetwork => "loaderBar.checkingNetwork",
            StatusText::StartingDaemon => "loaderBar.StartingDaemon",
            StatusText::SyncingDaemon => "loaderBar.syncingDaemon",
            StatusText::ChoosingWallet => "loaderBar.choosingWallet",
            StatusText::ChoosingWalletSpv => "loaderBar.choosingWalletSPV",
            StatusText::PreCreateWalletCreate => "loaderBar.preCreateWalletCreate",
            StatusText::PreCreateWalletRestore => "loaderBar.preCreateWalletRestore",
            StatusText::WalletPubPass => "loaderBar.walletPubPass",
            StatusText::WalletDiscoverAccountsPass => "loaderBar.walletDiscoverAccountsPass",
            StatusText::StartingWallet => "loaderBar.startingWallet",
            StatusText::SyncingRpc => "loaderBar.syncingRPC",
            StatusText::FetchingMissingCfilters => "getStarted.header.fetchingMissing.meta",
            StatusText::FetchingBlockHeaders => "getStarted.header.fetchingBlockHeaders.meta",
            StatusText::DiscoveringAddresses => "getStarted.header.discoveringAddresses.meta",
            StatusText::RescanWallet => "getStarted.header.rescanWallet.meta",
            StatusText::FinishingStart => "getStarted.header.finishingStart.meta",
        }
    }

    /// English fallback when no translation is loaded.
    pub fn default_message(&self) -> &'static str {
        match self {
            StatusText::WaitingDaemon => "Waiting for daemon connection...",
            StatusText::WaitingConnection => "connecting to daemon...",
            StatusText::CheckingNetwork => "Checking if network matches...",
            StatusText::StartingDaemon => "Starting Daemon...",
            StatusText::SyncingDaemon => "Syncing Daemon...",
            StatusText::ChoosingWallet => "Choose a wallet to open",
            StatusText::ChoosingWalletSpv => "Choose a wallet to open in SPV mode",
            StatusText::PreCreateWalletCreate => "Create a wallet...",
            StatusText::PreCreateWalletRestore => "Restore a Wallet...",
            StatusText::WalletPubPass => "Insert your pubkey",
            StatusText::WalletDiscoverAccountsPass => "Type passphrase to discover accounts",
            StatusText::StartingWallet => "Starting wallet...",
            StatusText::SyncingRpc => "Syncing RPC connection...",
            StatusText::FetchingMissingCfilters => "Fetching missing committed filters",
            StatusText::FetchingBlockHeaders => "Fetching block headers",
            StatusText::DiscoveringAddresses => "Discovering addresses",
            StatusText::RescanWallet => "Scanning blocks for transactions",
            StatusText::FinishingStart => "Finishing to load wallet",
        }
    }
}

/// Progress animation hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Animation {
    DaemonWaiting,
    BlockchainSyncing,
    EstablishingRpc,
    FetchingHeaders,
    DiscoveringAddresses,
    ScanningBlocks,
    FinalizingSetup,
}

/// Interactive form embedded in the get-started page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StateComponent {
    AdvancedStartup,
    WalletSelection,
    PreCreateWallet,
    WalletPubpassInput,
    DiscoverAccounts,
    RescanWallet,
}

/// Display descriptor consumed by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupView {
    pub page: PageKind,
    pub text: Option<StatusText>,
    pub animation: Option<Animation>,
    pub component: Option<StateComponent>,
    /// User-facing message of the active error.
    pub error: Option<String>,
    pub available_wallets_error: Option<String>,
    pub show_nav_links: bool,
    pub can_go_back: bool,
    pub is_spv: bool,
    pub is_testnet: bool,
    pub is_create_new_wallet: bool,
    pub update_available: bool,
    pub app_version: String,
    pub daemon_warning: Option<String>,
    pub create_wallet_ref: Option<SubflowRef>,
    pub setting_up_wallet_ref: Option<SubflowRef>,
}

pub fn project(snapshot: &StartupSnapshot, status: &StartupStatus) -> StartupView {
    let ctx = &snapshot.context;
    let page = page_kind(&snapshot.state);

    let (mut text, mut animation, mut component) = match snapshot.state {
        StartupState::Phase(phase) => phase_display(phase, ctx.is_spv, ctx.is_create_new_wallet),
        StartupState::Overlay { .. } => (None, None, None),
    };

    // Live sync progress replaces the phase text on the get-started page.
    if page == PageKind::GetStarted {
        if let Some(stage) = status.active_sync_stage() {
            let (stage_text, stage_animation) = sync_stage_display(stage);
            text = Some(stage_text);
            animation = Some(stage_animation);
            if stage == SyncStage::Rescanning {
                component = Some(StateComponent::RescanWallet);
            }
        }
    }

    StartupView {
        page,
        text,
        animation,
        component,
        error: ctx.error.as_ref().map(|e| e.user_message()),
        available_wallets_error: ctx.available_wallets_error.as_ref().map(|e| e.user_message()),
        show_nav_links: ctx.show_nav_links,
        can_go_back: snapshot.can_go_back(),
        is_spv: ctx.is_spv,
        is_testnet: ctx.is_testnet || status.is_testnet,
        is_create_new_wallet: ctx.is_create_new_wallet,
        update_available: status.update_available,
        app_version: status.app_version.clone(),
        daemon_warning: status.daemon_warning.clone(),
        create_wallet_ref: ctx.create_wallet_ref.clone(),
        setting_up_wallet_ref: ctx.setting_up_wallet_ref.clone(),
    }
}

fn page_kind(state: &StartupState) -> PageKind {
    match state {
        StartupState::Phase(StartupPhase::SettingUpWallet) => PageKind::SettingUpWallet,
        StartupState::Phase(_) => PageKind::GetStarted,
        StartupState::Overlay { overlay, .. } => match overlay {
            Overlay::Settings => PageKind::Settings,
            Overlay::Logs => PageKind::Logs,
            Overlay::TrezorConfig => PageKind::TrezorConfig,
            Overlay::ReleaseNotes => PageKind::ReleaseNotes,
            Overlay::CreatingWallet => PageKind::CreatingWallet,
        },
    }
}

fn phase_display(
    phase: StartupPhase,
    is_spv: bool,
    is_create_new_wallet: bool,
) -> (Option<StatusText>, Option<Animation>, Option<StateComponent>) {
    match phase {
        StartupPhase::StartAdvancedDaemon => (
            Some(StatusText::WaitingDaemon),
            None,
            Some(StateComponent::AdvancedStartup),
        ),
        StartupPhase::ConnectingDaemon => (Some(StatusText::WaitingConnection), None, None),
        StartupPhase::CheckingNetworkMatch => (Some(StatusText::CheckingNetwork), None, None),
        StartupPhase::StartingDaemon => (
            Some(StatusText::StartingDaemon),
            Some(Animation::DaemonWaiting),
            None,
        ),
        StartupPhase::SyncingDaemon => (
            Some(StatusText::SyncingDaemon),
            Some(Animation::BlockchainSyncing),
            None,
        ),
        StartupPhase::ChoosingWallet => {
            let text = if is_spv {
                StatusText::ChoosingWalletSpv
            } else {
                StatusText::ChoosingWallet
            };
            (Some(text), None, Some(StateComponent::WalletSelection))
        }
        StartupPhase::PreCreateWallet => {
            let text = if is_create_new_wallet {
                StatusText::PreCreateWalletCreate
            } else {
                StatusText::PreCreateWalletRestore
            };
            (Some(text), None, Some(StateComponent::PreCreateWallet))
        }
        StartupPhase::WalletPubpassInput => (
            Some(StatusText::WalletPubPass),
            None,
            Some(StateComponent::WalletPubpassInput),
        ),
        StartupPhase::WalletDiscoverAccountsPassInput => (
            Some(StatusText::WalletDiscoverAccountsPass),
            None,
            Some(StateComponent::DiscoverAccounts),
        ),
        StartupPhase::StartingWallet => (Some(StatusText::StartingWallet), None, None),
        StartupPhase::SyncingRpc => (
            Some(StatusText::SyncingRpc),
            Some(Animation::EstablishingRpc),
            None,
        ),
        StartupPhase::PreStart
        | StartupPhase::StartSpv
        | StartupPhase::DaemonError
        | StartupPhase::SettingUpWallet => (None, None, None),
    }
}

fn sync_stage_display(stage: SyncStage) -> (StatusText, Animation) {
    match stage {
        SyncStage::FetchingMissingCfilters => {
            (StatusText::FetchingMissingCfilters, Animation::DaemonWaiting)
        }
        SyncStage::FetchingHeaders => (StatusText::FetchingBlockHeaders, Animation::FetchingHeaders),
        SyncStage::DiscoveringAddresses => (
            StatusText::DiscoveringAddresses,
            Animation::DiscoveringAddresses,
        ),
        SyncStage::Rescanning => (StatusText::RescanWallet, Animation::ScanningBlocks),
        SyncStage::Finalizing => (StatusText::FinishingStart, Animation::FinalizingSetup),
    }
}
