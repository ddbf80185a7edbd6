//! Mutable record carried across every startup phase.

use std::path::PathBuf;

use serde::Serialize;

use crate::ids::SubflowRef;
use crate::security::SecretString;
use crate::startup::{DaemonMode, StartupError, StartupFlags, StartupStage};
use crate::wallet::{RpcCredentials, WalletDescriptor};

/// Startup context.
///
/// Owned and mutated by the state machine only. The passphrase lives here and
/// nowhere else; [`StartupContext::view`] strips it before anything leaves
/// the engine.
#[derive(Debug)]
pub struct StartupContext {
    pub(crate) selected_wallet: Option<WalletDescriptor>,
    pass_phrase: Option<SecretString>,
    pub(crate) remote_credentials: Option<RpcCredentials>,
    pub(crate) daemon_credentials: Option<RpcCredentials>,
    pub(crate) appdata: Option<PathBuf>,
    pub(crate) is_spv: bool,
    pub(crate) is_advanced_daemon: bool,
    pub(crate) is_testnet: bool,
    pub(crate) is_create_new_wallet: bool,
    pub(crate) session_synced: bool,
    pub(crate) error: Option<StartupError>,
    error_stage: Option<StartupStage>,
    pub(crate) available_wallets_error: Option<StartupError>,
    pub(crate) available_wallets: Vec<WalletDescriptor>,
    pub(crate) create_wallet_ref: Option<SubflowRef>,
    pub(crate) setting_up_wallet_ref: Option<SubflowRef>,
    pub(crate) wallet_started: bool,
    pub(crate) show_nav_links: bool,
}

impl StartupContext {
    pub fn new(flags: StartupFlags) -> Self {
        Self {
            selected_wallet: None,
            pass_phrase: None,
            remote_credentials: None,
            daemon_credentials: None,
            appdata: None,
            is_spv: flags.is_spv,
            is_advanced_daemon: flags.is_advanced_daemon,
            is_testnet: flags.is_testnet,
            is_create_new_wallet: false,
            session_synced: false,
            error: None,
            error_stage: None,
            available_wallets_error: None,
            available_wallets: Vec::new(),
            create_wallet_ref: None,
            setting_up_wallet_ref: None,
            wallet_started: false,
            show_nav_links: true,
        }
    }

    /// Record whether the collaborator reported an already synced session.
    /// Only meaningful before the first event.
    pub fn set_session_synced(&mut self, synced: bool) {
        self.session_synced = synced;
    }

    /// Data directory handed to a locally started daemon until the user
    /// submits another one. Only meaningful before the first event.
    pub fn set_default_appdata(&mut self, appdata: Option<PathBuf>) {
        self.appdata = appdata;
    }

    pub fn daemon_mode(&self) -> DaemonMode {
        DaemonMode::from_flags(self.is_spv, self.is_advanced_daemon)
    }

    pub fn selected_wallet(&self) -> Option<&WalletDescriptor> {
        self.selected_wallet.as_ref()
    }

    pub fn error(&self) -> Option<&StartupError> {
        self.error.as_ref()
    }

    pub fn has_passphrase(&self) -> bool {
        self.pass_phrase.is_some()
    }

    pub(crate) fn set_passphrase(&mut self, passphrase: SecretString) {
        self.pass_phrase = Some(passphrase);
    }

    /// Drop (and wipe) the passphrase.
    pub(crate) fn clear_passphrase(&mut self) {
        self.pass_phrase = None;
    }

    /// Copy of the passphrase for a single effect request.
    pub(crate) fn share_passphrase(&self) -> Option<SecretString> {
        self.pass_phrase.as_ref().map(SecretString::duplicate)
    }

    /// Selecting a different wallet is refused once one has started.
    pub(crate) fn select_wallet(&mut self, wallet: WalletDescriptor) -> bool {
        if self.wallet_started
            && self
                .selected_wallet
                .as_ref()
                .is_some_and(|current| current != &wallet)
        {
            return false;
        }
        self.selected_wallet = Some(wallet);
        true
    }

    /// Forget a selection that never started.
    pub(crate) fn drop_unstarted_selection(&mut self) {
        if !self.wallet_started {
            self.selected_wallet = None;
            self.clear_passphrase();
        }
    }

    /// Record `error` raised while `raised_in` was running. A stage-less error
    /// is owned by that stage.
    pub(crate) fn record_error_at(&mut self, error: StartupError, raised_in: StartupStage) {
        let stage = match error.stage() {
            StartupStage::General => raised_in,
            own => own,
        };
        self.error_stage = Some(stage);
        self.error = Some(error);
    }

    /// `stage` succeeded: clear the error it owns. Errors of other stages stay.
    pub(crate) fn clear_error_for(&mut self, stage: StartupStage) {
        if self.error_stage == Some(stage) {
            self.error = None;
            self.error_stage = None;
        }
    }

    /// Serializable view handed to observers.
    pub fn view(&self) -> ContextView {
        ContextView {
            selected_wallet: self.selected_wallet.clone(),
            has_passphrase: self.has_passphrase(),
            remote_credentials: self.remote_credentials.clone(),
            appdata: self.appdata.clone(),
            is_spv: self.is_spv,
            is_advanced_daemon: self.is_advanced_daemon,
            is_testnet: self.is_testnet,
            is_create_new_wallet: self.is_create_new_wallet,
            error: self.error.clone(),
            available_wallets_error: self.available_wallets_error.clone(),
            available_wallets: self.available_wallets.clone(),
            create_wallet_ref: self.create_wallet_ref.clone(),
            setting_up_wallet_ref: self.setting_up_wallet_ref.clone(),
            wallet_started: self.wallet_started,
            show_nav_links: self.show_nav_links,
        }
    }
}

/// Observer-facing copy of the context. Contains no secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextView {
    pub selected_wallet: Option<WalletDescriptor>,
    pub has_passphrase: bool,
    pub remote_credentials: Option<RpcCredentials>,
    pub appdata: Option<PathBuf>,
    pub is_spv: bool,
    pub is_advanced_daemon: bool,
    pub is_testnet: bool,
    pub is_create_new_wallet: bool,
    pub error: Option<StartupError>,
    pub available_wallets_error: Option<StartupError>,
    pub available_wallets: Vec<WalletDescriptor>,
    pub create_wallet_ref: Option<SubflowRef>,
    pub setting_up_wallet_ref: Option<SubflowRef>,
    pub wallet_started: bool,
    pub show_nav_links: bool,
}
