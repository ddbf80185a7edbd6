use serde::{Deserialize, Serialize};

use crate::wallet::Network;

/// Read-only status readouts owned by the daemon/wallet collaborators.
///
/// These are plain values sampled on demand, never events: the startup flow
/// looks at them when it needs them and the view projection renders them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupStatus {
    /// An already synced session exists (daemon synced or SPV running).
    pub daemon_synced: bool,
    /// Wallet sync finished.
    pub synced: bool,
    /// A sync attempt is already in flight.
    pub sync_attempt_request: bool,
    pub sync_fetch_missing_cfilters_attempt: bool,
    pub sync_fetch_headers_attempt: bool,
    pub sync_discover_addresses_attempt: bool,
    pub sync_rescan_attempt: bool,
    pub update_available: bool,
    pub is_testnet: bool,
    pub app_version: String,
    pub daemon_warning: Option<String>,
}

/// Wallet sync stage currently reported, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStage {
    FetchingMissingCfilters,
    FetchingHeaders,
    DiscoveringAddresses,
    Rescanning,
    Finalizing,
}

impl StartupStatus {
    pub fn network(&self) -> Network {
        Network::from_testnet_flag(self.is_testnet)
    }

    /// The first active stage wins; `synced` only shows when nothing else runs.
    pub fn active_sync_stage(&self) -> Option<SyncStage> {
        if self.sync_fetch_missing_cfilters_attempt {
            Some(SyncStage::FetchingMissingCfilters)
        } else if self.sync_fetch_headers_attempt {
            Some(SyncStage::FetchingHeaders)
        } else if self.sync_discover_addresses_attempt {
            Some(SyncStage::DiscoveringAddresses)
        } else if self.sync_rescan_attempt {
            Some(SyncStage::Rescanning)
        } else if self.synced {
            Some(SyncStage::Finalizing)
        } else {
            None
        }
    }
}
