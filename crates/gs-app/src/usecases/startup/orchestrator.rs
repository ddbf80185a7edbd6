//! Startup orchestrator.
//!
//! This module coordinates the startup state machine and its side effects.
//! Events are processed one at a time under a dispatch lock; effects run as
//! tokio tasks and report back through a channel drained by a single pump, so
//! results are dispatched in the order they settle.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tracing::{debug, info, info_span, warn, Instrument};

use gs_core::security::SecretString;
use gs_core::startup::{
    project, ModeResolver, ResolverInputs, StartupAction, StartupContext, StartupError, StartupEvent,
    StartupFlags, StartupPhase, StartupSnapshot, StartupState, StartupStateMachine, StartupView,
};
use gs_core::wallet::{RpcCredentials, WalletDescriptor};

use crate::deps::StartupDeps;
use crate::usecases::startup::context::StartupRuntimeContext;
use crate::usecases::startup::effects::StartupEffects;
use crate::usecases::startup::in_flight::InFlightEffects;

/// Errors produced by the startup orchestrator.
///
/// Collaborator failures are not errors here: they are stored in the startup
/// context and rendered. These only cover misuse of the orchestrator itself.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StartupOrchestratorError {
    #[error("startup flow has not been started")]
    NotStarted,
    #[error("startup flow already started")]
    AlreadyStarted,
}

/// Values fixed for the lifetime of one orchestrator.
#[derive(Debug, Clone)]
pub struct StartupSettings {
    /// Remote daemon passed on the command line.
    pub cli_remote: Option<RpcCredentials>,
    pub flags: StartupFlags,
    /// Data directory of a locally started daemon, unless the user picks one.
    pub appdata: Option<PathBuf>,
    /// Delay before a fatal daemon error is handed to the error page.
    pub error_page_grace: Duration,
}

/// Orchestrator that drives startup state and side effects.
pub struct StartupOrchestrator {
    runtime: StartupRuntimeContext,
    settings: StartupSettings,
    deps: StartupDeps,
    effects: StartupEffects,
    in_flight: InFlightEffects,
    started: AtomicBool,

    results_tx: mpsc::UnboundedSender<StartupEvent>,
    results_rx: Mutex<Option<mpsc::UnboundedReceiver<StartupEvent>>>,
    snapshot_tx: watch::Sender<StartupSnapshot>,
}

impl StartupOrchestrator {
    pub fn new(deps: StartupDeps, settings: StartupSettings) -> Arc<Self> {
        let runtime = StartupRuntimeContext::new(settings.flags);
        let initial = StartupSnapshot::new(
            StartupState::initial(),
            StartupContext::new(settings.flags).view(),
        );
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, _) = watch::channel(initial);

        Arc::new(Self {
            runtime,
            effects: StartupEffects::new(&deps, settings.error_page_grace),
            settings,
            deps,
            in_flight: InFlightEffects::default(),
            started: AtomicBool::new(false),
            results_tx,
            results_rx: Mutex::new(Some(results_rx)),
            snapshot_tx,
        })
    }

    /// Resolve the startup mode and dispatch the first event.
    ///
    /// Must be called exactly once, from within a tokio runtime.
    pub async fn start(self: &Arc<Self>) -> Result<StartupSnapshot, StartupOrchestratorError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(StartupOrchestratorError::AlreadyStarted);
        }
        self.spawn_result_pump().await?;

        let status = self.deps.status.status();
        let selected_wallet = match self.deps.wallet_loader.selected_wallet().await {
            Ok(wallet) => wallet,
            Err(err) => {
                warn!(error = %err, "failed to read previously selected wallet");
                None
            }
        };

        {
            let mut machine = self.runtime.machine().await;
            machine.context.set_session_synced(status.daemon_synced);
            machine
                .context
                .set_default_appdata(self.settings.appdata.clone());
        }

        let event = ModeResolver::resolve(ResolverInputs {
            cli_remote: self.settings.cli_remote.clone(),
            daemon_synced: status.daemon_synced,
            flags: self.settings.flags,
            selected_wallet,
        });
        info!(
            event = event.name(),
            daemon_synced = status.daemon_synced,
            "startup mode resolved"
        );

        Ok(self.dispatch_event(event).await)
    }

    pub async fn submit_remote_credentials(
        &self,
        credentials: RpcCredentials,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::SubmitRemote { credentials }).await
    }

    pub async fn submit_appdata(
        &self,
        appdata: PathBuf,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::SubmitAppdata { appdata }).await
    }

    pub async fn continue_startup(&self) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::Continue).await
    }

    pub async fn back(&self) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::Back).await
    }

    pub async fn choose_wallet(
        &self,
        wallet: WalletDescriptor,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::SubmitChooseWallet { wallet }).await
    }

    pub async fn create_wallet(
        &self,
        is_new: bool,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::CreateWallet { is_new }).await
    }

    pub async fn show_create_wallet(
        &self,
        is_new: bool,
        is_trezor: bool,
        wallet_master_pub_key: Option<String>,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::ShowCreateWallet {
            is_new,
            is_trezor,
            wallet_master_pub_key,
        })
        .await
    }

    /// Report the wallet produced by the create-wallet sub-flow.
    pub async fn wallet_created(
        &self,
        wallet: WalletDescriptor,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::WalletCreated { wallet }).await
    }

    /// Private passphrase for account discovery.
    pub async fn set_passphrase(
        &self,
        passphrase: String,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        let passphrase = SecretString::new(passphrase);
        self.dispatch(StartupEvent::SetPassphrase { passphrase }).await
    }

    pub async fn submit_public_passphrase(
        &self,
        passphrase: String,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        let passphrase = SecretString::new(passphrase);
        self.dispatch(StartupEvent::SubmitPublicPassphrase { passphrase })
            .await
    }

    /// Switch from the public passphrase form to the discovery prompt.
    pub async fn request_discover_accounts_passphrase(
        &self,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::WalletDiscoverAccountsPass { error: None })
            .await
    }

    pub async fn show_settings(&self) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::ShowSettings).await
    }

    pub async fn show_logs(&self) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::ShowLogs).await
    }

    pub async fn show_trezor_config(&self) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::ShowTrezorConfig).await
    }

    pub async fn show_release_notes(&self) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::ShowReleaseNotes).await
    }

    /// Error raised by a UI form (e.g. an invalid seed on the restore form).
    pub async fn report_error(
        &self,
        error: StartupError,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        self.dispatch(StartupEvent::Error { error }).await
    }

    /// Re-read the status readouts. Completes the flow when the wallet
    /// reports synced while `syncingRPC` is waiting on it.
    pub async fn notify_status_changed(
        &self,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        let status = self.deps.status.status();
        let waiting_for_sync = self.snapshot().state.is_phase(StartupPhase::SyncingRpc);
        if waiting_for_sync && status.synced {
            return self.dispatch(StartupEvent::ShowSettingUpWallet).await;
        }
        Ok(self.snapshot())
    }

    /// Dispatch a raw event.
    pub async fn dispatch(
        &self,
        event: StartupEvent,
    ) -> Result<StartupSnapshot, StartupOrchestratorError> {
        if !self.started.load(Ordering::SeqCst) {
            return Err(StartupOrchestratorError::NotStarted);
        }
        Ok(self.dispatch_event(event).await)
    }

    pub fn snapshot(&self) -> StartupSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Stream of snapshots, one per dispatch. Intermediate values may be
    /// skipped by slow readers; the latest is always observed.
    pub fn subscribe(&self) -> watch::Receiver<StartupSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Display descriptor for the current snapshot.
    pub fn view(&self) -> StartupView {
        project(&self.snapshot(), &self.deps.status.status())
    }

    async fn dispatch_event(&self, event: StartupEvent) -> StartupSnapshot {
        // Serialize concurrent dispatch calls so transitions and the
        // snapshots they publish stay in the same order.
        let _dispatch_guard = self.runtime.acquire_dispatch_lock().await;

        let event_name = event.name();
        let span = info_span!("usecase.startup_orchestrator.dispatch", event = event_name);
        async {
            let (snapshot, actions) = {
                let mut machine = self.runtime.machine().await;
                let from = machine.state;
                let before = machine.context.view();

                let (next, actions) =
                    StartupStateMachine::transition(from, &mut machine.context, event);
                machine.state = next;

                if from != next {
                    info!(
                        from = from.phase_name(),
                        to = next.phase_name(),
                        event = event_name,
                        "startup state transition"
                    );
                } else if actions.is_empty() && machine.context.view() == before {
                    warn!(
                        state = from.phase_name(),
                        event = event_name,
                        "startup event not accepted in current state; dropped"
                    );
                }

                (machine.snapshot(), actions)
            };

            self.execute_actions(actions);
            self.publish(snapshot.clone()).await;
            snapshot
        }
        .instrument(span)
        .await
    }

    fn execute_actions(&self, actions: Vec<StartupAction>) {
        for action in actions {
            let kind = action.kind();
            let Some(guard) = self.in_flight.try_begin(kind) else {
                warn!(?kind, "startup effect already in flight; request suppressed");
                continue;
            };
            debug!(?action, "startup executing action");

            let effects = self.effects.clone();
            let results = self.results_tx.clone();
            tokio::spawn(
                async move {
                    let outcome = effects.execute(action).await;
                    // Release before reporting so the follow-up transition may
                    // request the same effect again.
                    drop(guard);
                    if let Some(event) = outcome {
                        if results.send(event).is_err() {
                            debug!(?kind, "startup orchestrator gone; effect result dropped");
                        }
                    }
                }
                .instrument(info_span!("usecase.startup_orchestrator.effect", ?kind)),
            );
        }
    }

    async fn publish(&self, snapshot: StartupSnapshot) {
        self.snapshot_tx.send_replace(snapshot.clone());
        self.deps
            .event_port
            .emit_startup_state_changed(snapshot)
            .await;
    }

    async fn spawn_result_pump(self: &Arc<Self>) -> Result<(), StartupOrchestratorError> {
        let mut results = self
            .results_rx
            .lock()
            .await
            .take()
            .ok_or(StartupOrchestratorError::AlreadyStarted)?;
        let orchestrator: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(
            async move {
                while let Some(event) = results.recv().await {
                    let Some(orchestrator) = orchestrator.upgrade() else {
                        break;
                    };
                    orchestrator.dispatch_event(event).await;
                }
                debug!("startup result pump stopped");
            }
            .instrument(info_span!("usecase.startup_orchestrator.pump")),
        );
        Ok(())
    }
}
