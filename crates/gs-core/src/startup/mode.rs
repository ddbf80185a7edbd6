//! Startup mode resolution.
//!
//! Runs once before any user-visible phase and produces the first event fed
//! to the state machine.

use serde::{Deserialize, Serialize};

use crate::startup::StartupEvent;
use crate::wallet::{RpcCredentials, WalletDescriptor};

/// Mode flags fixed at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupFlags {
    pub is_spv: bool,
    pub is_advanced_daemon: bool,
    pub is_testnet: bool,
}

impl StartupFlags {
    pub fn daemon_mode(&self) -> DaemonMode {
        DaemonMode::from_flags(self.is_spv, self.is_advanced_daemon)
    }
}

/// How the daemon side of startup is handled. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaemonMode {
    /// Start and manage a local daemon automatically.
    Regular,
    /// No daemon; the wallet syncs over compact filters.
    Spv,
    /// The user supplies connection parameters.
    Advanced,
}

impl DaemonMode {
    /// SPV wins over advanced: an SPV wallet never talks to a daemon, so the
    /// advanced daemon settings are meaningless there.
    pub fn from_flags(is_spv: bool, is_advanced_daemon: bool) -> Self {
        match (is_spv, is_advanced_daemon) {
            (true, _) => DaemonMode::Spv,
            (false, true) => DaemonMode::Advanced,
            (false, false) => DaemonMode::Regular,
        }
    }
}

/// Everything the resolver looks at.
#[derive(Debug, Clone, Default)]
pub struct ResolverInputs {
    /// Remote RPC descriptor passed on the command line.
    pub cli_remote: Option<RpcCredentials>,
    /// The collaborator reports an already synced session: the daemon is
    /// synced, or an SPV session is already running (e.g. the flow was
    /// re-entered after a wallet was pre-created).
    pub daemon_synced: bool,
    pub flags: StartupFlags,
    /// Wallet selected by a previous session or a dev-mode shortcut.
    pub selected_wallet: Option<WalletDescriptor>,
}

/// Decides the initial transition.
pub struct ModeResolver;

impl ModeResolver {
    /// First match wins:
    /// 1. CLI remote credentials
    /// 2. synced session or SPV mode, with a pre-selected wallet
    /// 3. synced session without a wallet
    /// 4. exactly one of the daemon modes
    ///
    /// A cold SPV start without a wallet goes through the SPV landing page
    /// rather than straight to the picker.
    pub fn resolve(inputs: ResolverInputs) -> StartupEvent {
        if let Some(credentials) = inputs.cli_remote {
            return StartupEvent::StartCliRemoteDaemon { credentials };
        }

        let is_spv = inputs.flags.daemon_mode() == DaemonMode::Spv;
        match inputs.selected_wallet {
            Some(wallet) if inputs.daemon_synced || is_spv => {
                return StartupEvent::SubmitChooseWallet { wallet };
            }
            None if inputs.daemon_synced => return StartupEvent::ChooseWallet,
            _ => {}
        }

        #[cfg(feature = "tracing")]
        if inputs.flags.is_spv && inputs.flags.is_advanced_daemon {
            tracing::warn!("both spv and advanced daemon mode configured; using spv");
        }

        match inputs.flags.daemon_mode() {
            DaemonMode::Spv => StartupEvent::StartSpv,
            DaemonMode::Advanced => StartupEvent::StartAdvancedDaemon,
            DaemonMode::Regular => StartupEvent::StartRegularDaemon,
        }
    }
}
