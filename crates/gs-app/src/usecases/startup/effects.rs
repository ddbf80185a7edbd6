//! Startup effect handlers.
//!
//! Each handler wraps one collaborator call and turns its outcome into at most
//! one follow-up event. Handlers never touch the startup context; everything
//! they need travels inside the action.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use gs_core::ports::{
    DaemonPort, ErrorPagePort, StartDaemonRequest, StartupStatusPort, SubflowPort, WalletLoaderPort,
};
use gs_core::security::SecretString;
use gs_core::startup::{
    translate_connect_error, CreateWalletRequest, StartupAction, StartupError, StartupEvent,
};
use gs_core::wallet::WalletDescriptor;

use crate::deps::StartupDeps;

/// Runs startup actions against the collaborator ports.
#[derive(Clone)]
pub struct StartupEffects {
    daemon: Arc<dyn DaemonPort>,
    wallet_loader: Arc<dyn WalletLoaderPort>,
    status: Arc<dyn StartupStatusPort>,
    subflows: Arc<dyn SubflowPort>,
    error_page: Arc<dyn ErrorPagePort>,
    error_page_grace: Duration,
}

impl StartupEffects {
    pub fn new(deps: &StartupDeps, error_page_grace: Duration) -> Self {
        Self {
            daemon: deps.daemon.clone(),
            wallet_loader: deps.wallet_loader.clone(),
            status: deps.status.clone(),
            subflows: deps.subflows.clone(),
            error_page: deps.error_page.clone(),
            error_page_grace,
        }
    }

    /// Execute `action` and return the event reporting its outcome, if any.
    pub async fn execute(&self, action: StartupAction) -> Option<StartupEvent> {
        match action {
            StartupAction::StartDaemon { appdata, remote } => {
                self.start_daemon(StartDaemonRequest { appdata, remote }).await
            }
            StartupAction::ConnectDaemon {
                credentials,
                is_remote,
            } => Some(match self.daemon.connect_daemon(credentials, is_remote).await {
                Ok(()) => StartupEvent::SyncDaemon,
                Err(err) => {
                    let error = translate_connect_error(err);
                    error!(action = "ConnectDaemon", is_remote, error = %error, "startup effect failed");
                    StartupEvent::ErrorConnectingDaemon { error }
                }
            }),
            StartupAction::SyncDaemon => Some(match self.daemon.sync_daemon().await {
                Ok(()) => StartupEvent::CheckNetworkMatch,
                Err(error) => {
                    error!(action = "SyncDaemon", error = %error, "startup effect failed");
                    StartupEvent::ErrorSyncingDaemon { error }
                }
            }),
            StartupAction::CheckNetworkMatch => {
                Some(match self.daemon.check_network_match().await {
                    Ok(()) => StartupEvent::ChooseWallet,
                    Err(error) => {
                        error!(action = "CheckNetworkMatch", error = %error, "startup effect failed");
                        StartupEvent::ErrorNetworkDaemon { error }
                    }
                })
            }
            StartupAction::ListAvailableWallets => {
                Some(match self.wallet_loader.available_wallets().await {
                    Ok(wallets) => {
                        debug!(count = wallets.len(), "available wallets loaded");
                        StartupEvent::AvailableWalletsLoaded { wallets }
                    }
                    Err(error) => {
                        error!(action = "ListAvailableWallets", error = %error, "startup effect failed");
                        StartupEvent::AvailableWalletError { error }
                    }
                })
            }
            StartupAction::StartWallet {
                wallet,
                has_passphrase,
            } => Some(self.start_wallet(&wallet, has_passphrase).await),
            StartupAction::OpenWallet {
                wallet,
                public_passphrase,
            } => Some(
                match self.wallet_loader.open_wallet(&wallet, public_passphrase).await {
                    Ok(()) => StartupEvent::Continue,
                    Err(error) => {
                        warn!(wallet = %wallet.name, error = %error, "open wallet failed");
                        StartupEvent::Error { error }
                    }
                },
            ),
            StartupAction::SyncRpc { passphrase, is_spv } => self.sync_rpc(passphrase, is_spv).await,
            StartupAction::RememberSelectedWallet { wallet } => {
                self.remember_selected_wallet(&wallet).await;
                None
            }
            StartupAction::LaunchCreateWallet(request) => Some(self.launch_create_wallet(request).await),
            StartupAction::LaunchSettingUpWallet { wallet } => {
                self.launch_setting_up_wallet(wallet).await
            }
            StartupAction::ContinueSpvStartup => Some(StartupEvent::Continue),
            StartupAction::ReturnToAdvancedStartup => Some(StartupEvent::StartAdvancedDaemon),
            StartupAction::EscalateToErrorPage { error } => {
                // Give the UI time to leave the get-started route first.
                tokio::time::sleep(self.error_page_grace).await;
                self.error_page.show_error_page(&error).await;
                None
            }
        }
    }

    async fn start_daemon(&self, request: StartDaemonRequest) -> Option<StartupEvent> {
        let is_remote = request.remote.is_some();
        Some(match self.daemon.start_daemon(request).await {
            Ok(started) => StartupEvent::ConnectDaemon {
                credentials: started.credentials,
                appdata: started.appdata,
            },
            Err(error) => {
                error!(action = "StartDaemon", is_remote, error = %error, "startup effect failed");
                StartupEvent::ErrorStartingDaemon { error }
            }
        })
    }

    async fn start_wallet(&self, wallet: &WalletDescriptor, has_passphrase: bool) -> StartupEvent {
        match self.wallet_loader.start_wallet(wallet, has_passphrase).await {
            Ok(discover_accounts_complete) => StartupEvent::WalletStarted {
                discover_accounts_complete,
            },
            Err(StartupError::MissingDatabase { is_new }) => {
                debug!(wallet = %wallet.name, is_new, "wallet database missing");
                StartupEvent::WalletDatabaseMissing { is_new }
            }
            Err(StartupError::BadPrivatePassphrase) => StartupEvent::WalletDiscoverAccountsPass {
                error: Some(StartupError::BadPrivatePassphrase),
            },
            Err(StartupError::NeedsPublicPassphrase) => StartupEvent::WalletPubpassInput,
            Err(error) => {
                error!(action = "StartWallet", wallet = %wallet.name, error = %error, "startup effect failed");
                StartupEvent::Error { error }
            }
        }
    }

    async fn sync_rpc(&self, passphrase: Option<SecretString>, is_spv: bool) -> Option<StartupEvent> {
        let status = self.status.status();
        if status.sync_attempt_request {
            debug!("sync attempt already in flight; waiting for status change");
            return None;
        }
        if status.synced {
            return Some(StartupEvent::ShowSettingUpWallet);
        }

        let result = if is_spv {
            self.wallet_loader.start_spv_sync(passphrase).await
        } else {
            self.wallet_loader.retry_start_rpc(passphrase).await
        };

        Some(match result {
            Ok(()) => StartupEvent::ShowSettingUpWallet,
            Err(error) => {
                error!(action = "SyncRpc", is_spv, error = %error, "startup effect failed");
                StartupEvent::ErrorSyncingWallet { error }
            }
        })
    }

    async fn remember_selected_wallet(&self, wallet: &WalletDescriptor) {
        if let Err(err) = self.wallet_loader.set_selected_wallet(wallet).await {
            warn!(wallet = %wallet.name, error = %err, "failed to remember selected wallet");
        }
    }

    async fn launch_create_wallet(&self, request: CreateWalletRequest) -> StartupEvent {
        match self.subflows.launch_create_wallet(request).await {
            Ok(handle) => {
                debug!(handle = %handle, "create-wallet sub-flow launched");
                StartupEvent::CreateWalletLaunched { handle }
            }
            Err(err) => {
                error!(action = "LaunchCreateWallet", error = %err, "startup effect failed");
                StartupEvent::Error {
                    error: StartupError::other(format!("{err:#}")),
                }
            }
        }
    }

    async fn launch_setting_up_wallet(
        &self,
        wallet: Option<WalletDescriptor>,
    ) -> Option<StartupEvent> {
        match self.subflows.launch_setting_up_wallet(wallet).await {
            Ok(handle) => {
                debug!(handle = %handle, "setting-up sub-flow launched");
                Some(StartupEvent::SettingUpWalletLaunched { handle })
            }
            Err(err) => {
                error!(action = "LaunchSettingUpWallet", error = %err, "startup effect failed");
                None
            }
        }
    }
}
