//! Startup state machine.
//!
//! Defines a pure state transition function for the get-started flow. The
//! reducer mutates the context in place and returns the side effects the
//! caller must execute; it never performs I/O and never waits.

use crate::startup::{
    translate_connect_error, CreateWalletRequest, DaemonMode, Overlay, StartupAction,
    StartupContext, StartupError, StartupEvent, StartupPhase, StartupStage, StartupState,
};

type Transition = (StartupState, Vec<StartupAction>);

/// Pure startup state machine.
///
/// 纯状态机：不包含副作用。Events that are not legal in the current state are
/// ignored, which is how late effect completions arriving after `BACK` are
/// absorbed.
pub struct StartupStateMachine;

impl StartupStateMachine {
    pub fn transition(
        state: StartupState,
        ctx: &mut StartupContext,
        event: StartupEvent,
    ) -> (StartupState, Vec<StartupAction>) {
        match state {
            StartupState::Overlay { overlay, origin } => {
                Self::on_overlay(overlay, origin, ctx, event)
            }
            StartupState::Phase(phase) => match overlay_for(&event) {
                Some(overlay) if phase.allows_overlay() => (
                    StartupState::Overlay {
                        overlay,
                        origin: phase,
                    },
                    Vec::new(),
                ),
                Some(_) => (state, Vec::new()),
                None => Self::on_phase(phase, ctx, event),
            },
        }
    }

    fn on_phase(phase: StartupPhase, ctx: &mut StartupContext, event: StartupEvent) -> Transition {
        use StartupEvent as E;
        use StartupPhase as P;

        match (phase, event) {
            // Mode resolution. Only the event matching the configured mode is
            // accepted, so mode is fixed once preStart is left.
            (P::PreStart, E::StartCliRemoteDaemon { credentials }) => {
                ctx.remote_credentials = Some(credentials);
                enter(P::StartingDaemon, ctx)
            }
            // SPV needs no daemon, so a remembered wallet can start right away.
            (P::PreStart, E::SubmitChooseWallet { wallet })
                if ctx.session_synced || ctx.daemon_mode() == DaemonMode::Spv =>
            {
                ctx.select_wallet(wallet);
                enter(P::ChoosingWallet, ctx)
            }
            (P::PreStart, E::ChooseWallet) if ctx.session_synced => enter(P::ChoosingWallet, ctx),
            (P::PreStart, E::StartSpv) if ctx.daemon_mode() == DaemonMode::Spv => {
                ctx.is_spv = true;
                enter(P::StartSpv, ctx)
            }
            (P::PreStart, E::StartAdvancedDaemon) if ctx.daemon_mode() == DaemonMode::Advanced => {
                enter(P::StartAdvancedDaemon, ctx)
            }
            (P::PreStart, E::StartRegularDaemon) if ctx.daemon_mode() == DaemonMode::Regular => {
                enter(P::StartingDaemon, ctx)
            }

            (P::StartSpv, E::Continue) => {
                ctx.show_nav_links = false;
                enter(P::ChoosingWallet, ctx)
            }

            (P::StartAdvancedDaemon, E::SubmitRemote { credentials }) => {
                ctx.remote_credentials = Some(credentials);
                enter(P::StartingDaemon, ctx)
            }
            (P::StartAdvancedDaemon, E::SubmitAppdata { appdata }) => {
                // A local daemon never reads remote credentials.
                ctx.remote_credentials = None;
                ctx.appdata = Some(appdata);
                enter(P::StartingDaemon, ctx)
            }
            (P::StartAdvancedDaemon, E::Continue) => {
                ctx.show_nav_links = false;
                enter(P::StartingDaemon, ctx)
            }

            (P::StartingDaemon, E::ConnectDaemon {
                credentials,
                appdata,
            }) => {
                ctx.clear_error_for(StartupStage::DaemonStart);
                if credentials.is_some() {
                    ctx.daemon_credentials = credentials;
                }
                if appdata.is_some() {
                    ctx.appdata = appdata;
                }
                enter(P::ConnectingDaemon, ctx)
            }
            (P::StartingDaemon, E::ErrorStartingDaemon { error }) => fail_daemon(phase, ctx, error),

            (P::ConnectingDaemon, E::SyncDaemon) => {
                ctx.clear_error_for(StartupStage::DaemonConnect);
                enter(P::SyncingDaemon, ctx)
            }
            (P::ConnectingDaemon, E::ErrorConnectingDaemon { error }) => {
                fail_daemon(phase, ctx, translate_connect_error(error))
            }

            (P::SyncingDaemon, E::CheckNetworkMatch) => {
                ctx.clear_error_for(StartupStage::DaemonSync);
                enter(P::CheckingNetworkMatch, ctx)
            }
            (P::SyncingDaemon, E::ErrorSyncingDaemon { error }) => fail_daemon(phase, ctx, error),

            (P::CheckingNetworkMatch, E::ChooseWallet) => {
                ctx.clear_error_for(StartupStage::NetworkCheck);
                enter(P::ChoosingWallet, ctx)
            }
            (P::CheckingNetworkMatch, E::ErrorNetworkDaemon { error }) => {
                fail_daemon(phase, ctx, error)
            }

            // The error stays visible on the advanced form.
            (P::DaemonError, E::StartAdvancedDaemon)
                if ctx.daemon_mode() == DaemonMode::Advanced =>
            {
                enter(P::StartAdvancedDaemon, ctx)
            }

            (P::ChoosingWallet, E::AvailableWalletsLoaded { wallets }) => {
                ctx.available_wallets = wallets;
                ctx.available_wallets_error = None;
                ctx.clear_error_for(StartupStage::WalletList);
                stay(P::ChoosingWallet)
            }
            (P::ChoosingWallet, E::AvailableWalletError { error }) => {
                ctx.available_wallets_error = Some(error);
                stay(P::ChoosingWallet)
            }
            (P::ChoosingWallet, E::SubmitChooseWallet { wallet }) => {
                if ctx.select_wallet(wallet) {
                    enter(P::StartingWallet, ctx)
                } else {
                    stay(P::ChoosingWallet)
                }
            }
            (P::ChoosingWallet, E::CreateWallet { is_new }) => {
                ctx.is_create_new_wallet = is_new;
                stay(P::PreCreateWallet)
            }

            (P::StartingWallet, E::WalletStarted {
                discover_accounts_complete,
            }) => on_wallet_started(ctx, discover_accounts_complete),
            (P::StartingWallet, E::SyncRpc) => {
                ctx.clear_error_for(StartupStage::WalletStart);
                ctx.wallet_started = true;
                enter(P::SyncingRpc, ctx)
            }
            (P::StartingWallet, E::WalletDiscoverAccountsPass { error }) => {
                request_discover_passphrase(ctx, error)
            }
            (P::StartingWallet, E::WalletPubpassInput) => stay(P::WalletPubpassInput),
            (P::StartingWallet, E::WalletDatabaseMissing { is_new }) => {
                ctx.is_create_new_wallet = is_new;
                stay(P::PreCreateWallet)
            }
            (P::StartingWallet, E::Error { error }) => {
                ctx.record_error_at(error, phase.stage());
                if ctx.wallet_started {
                    // The running wallet stays selected; ask again instead.
                    stay(P::WalletDiscoverAccountsPassInput)
                } else {
                    ctx.drop_unstarted_selection();
                    enter(P::ChoosingWallet, ctx)
                }
            }

            (P::WalletDiscoverAccountsPassInput, E::SetPassphrase { passphrase }) => {
                ctx.set_passphrase(passphrase);
                enter(P::StartingWallet, ctx)
            }

            (P::WalletPubpassInput, E::SubmitPublicPassphrase { passphrase }) => {
                match ctx.selected_wallet.clone() {
                    Some(wallet) => (
                        StartupState::Phase(P::WalletPubpassInput),
                        vec![StartupAction::OpenWallet {
                            wallet,
                            public_passphrase: passphrase,
                        }],
                    ),
                    None => stay(P::WalletPubpassInput),
                }
            }
            (P::WalletPubpassInput, E::Continue) => {
                ctx.clear_error_for(StartupStage::WalletStart);
                ctx.wallet_started = true;
                ctx.show_nav_links = false;
                enter(P::SyncingRpc, ctx)
            }
            (P::WalletPubpassInput, E::WalletDiscoverAccountsPass { error }) => {
                request_discover_passphrase(ctx, error)
            }

            (
                P::WalletPubpassInput | P::WalletDiscoverAccountsPassInput,
                E::Back,
            ) if !ctx.wallet_started => {
                ctx.drop_unstarted_selection();
                ctx.show_nav_links = true;
                enter(P::ChoosingWallet, ctx)
            }

            (P::PreCreateWallet, E::ShowCreateWallet {
                is_new,
                is_trezor,
                wallet_master_pub_key,
            }) => {
                ctx.is_create_new_wallet = is_new;
                let request = CreateWalletRequest {
                    is_new,
                    is_trezor,
                    wallet_master_pub_key,
                    is_testnet: ctx.is_testnet,
                };
                (
                    StartupState::Overlay {
                        overlay: Overlay::CreatingWallet,
                        origin: P::PreCreateWallet,
                    },
                    vec![StartupAction::LaunchCreateWallet(request)],
                )
            }
            (P::PreCreateWallet, E::Back) => {
                ctx.drop_unstarted_selection();
                ctx.show_nav_links = true;
                enter(P::ChoosingWallet, ctx)
            }

            (P::SyncingRpc, E::ShowSettingUpWallet) => {
                ctx.clear_error_for(StartupStage::WalletSync);
                enter(P::SettingUpWallet, ctx)
            }
            (P::SyncingRpc, E::ErrorSyncingWallet { error }) => match error {
                StartupError::BadPrivatePassphrase => request_discover_passphrase(ctx, Some(error)),
                other => fail_daemon(phase, ctx, other),
            },
            (P::SyncingRpc, E::WalletDiscoverAccountsPass { error }) => {
                request_discover_passphrase(ctx, error)
            }
            (P::SyncingRpc, E::Error { error }) => fail_daemon(phase, ctx, error),

            (P::SettingUpWallet, E::SettingUpWalletLaunched { handle }) => {
                ctx.setting_up_wallet_ref = Some(handle);
                stay(P::SettingUpWallet)
            }

            (phase, E::Error { error }) if phase.is_daemon_phase() => fail_daemon(phase, ctx, error),
            (
                phase @ (P::ChoosingWallet
                | P::PreCreateWallet
                | P::WalletPubpassInput
                | P::WalletDiscoverAccountsPassInput),
                E::Error { error },
            ) => {
                ctx.record_error_at(error, phase.stage());
                stay(phase)
            }

            (phase, _event) => stay(phase),
        }
    }

    fn on_overlay(
        overlay: Overlay,
        origin: StartupPhase,
        ctx: &mut StartupContext,
        event: StartupEvent,
    ) -> Transition {
        let current = StartupState::Overlay { overlay, origin };
        match (overlay, event) {
            (Overlay::CreatingWallet, StartupEvent::CreateWalletLaunched { handle }) => {
                ctx.create_wallet_ref = Some(handle);
                (current, Vec::new())
            }
            (Overlay::CreatingWallet, StartupEvent::WalletCreated { wallet }) => {
                ctx.create_wallet_ref = None;
                if ctx.select_wallet(wallet) {
                    enter(StartupPhase::StartingWallet, ctx)
                } else {
                    stay(origin)
                }
            }
            (Overlay::CreatingWallet, StartupEvent::Back) => {
                ctx.create_wallet_ref = None;
                ctx.show_nav_links = true;
                stay(origin)
            }
            (Overlay::CreatingWallet, StartupEvent::Error { error }) => {
                ctx.create_wallet_ref = None;
                ctx.record_error_at(error, origin.stage());
                stay(origin)
            }
            // Re-entering the origin re-requests its effects. The orchestrator
            // drops requests that are still in flight.
            (_, StartupEvent::Back) => {
                ctx.show_nav_links = true;
                enter(origin, ctx)
            }
            (_, _event) => (current, Vec::new()),
        }
    }
}

fn stay(phase: StartupPhase) -> Transition {
    (StartupState::Phase(phase), Vec::new())
}

/// Enter `phase` and collect its entry effects.
fn enter(phase: StartupPhase, ctx: &mut StartupContext) -> Transition {
    use StartupPhase as P;

    let actions = match phase {
        P::StartSpv => vec![StartupAction::ContinueSpvStartup],
        P::StartingDaemon => vec![StartupAction::StartDaemon {
            appdata: ctx.appdata.clone(),
            remote: ctx.remote_credentials.clone(),
        }],
        P::ConnectingDaemon => {
            let action = match &ctx.remote_credentials {
                Some(remote) => StartupAction::ConnectDaemon {
                    credentials: Some(remote.clone()),
                    is_remote: true,
                },
                None => StartupAction::ConnectDaemon {
                    credentials: ctx.daemon_credentials.clone(),
                    is_remote: false,
                },
            };
            vec![action]
        }
        P::SyncingDaemon => vec![StartupAction::SyncDaemon],
        P::CheckingNetworkMatch => vec![StartupAction::CheckNetworkMatch],
        P::DaemonError => {
            if ctx.daemon_mode() == DaemonMode::Advanced {
                vec![StartupAction::ReturnToAdvancedStartup]
            } else {
                ctx.error
                    .clone()
                    .map(|error| StartupAction::EscalateToErrorPage { error })
                    .into_iter()
                    .collect()
            }
        }
        P::ChoosingWallet => {
            // An explicit selection outranks a listing error.
            if ctx.selected_wallet.is_some() {
                return enter(P::StartingWallet, ctx);
            }
            // Listing is not retried automatically; a failing loader would loop.
            if ctx.available_wallets_error.is_some() {
                Vec::new()
            } else {
                ctx.show_nav_links = true;
                vec![StartupAction::ListAvailableWallets]
            }
        }
        P::StartingWallet => ctx
            .selected_wallet
            .clone()
            .map(|wallet| StartupAction::StartWallet {
                wallet,
                has_passphrase: ctx.has_passphrase(),
            })
            .into_iter()
            .collect(),
        P::SyncingRpc => vec![StartupAction::SyncRpc {
            passphrase: ctx.share_passphrase(),
            is_spv: ctx.daemon_mode() == DaemonMode::Spv,
        }],
        P::SettingUpWallet => {
            ctx.clear_passphrase();
            vec![StartupAction::LaunchSettingUpWallet {
                wallet: ctx.selected_wallet.clone(),
            }]
        }
        P::PreStart
        | P::StartAdvancedDaemon
        | P::PreCreateWallet
        | P::WalletPubpassInput
        | P::WalletDiscoverAccountsPassInput => Vec::new(),
    };

    (StartupState::Phase(phase), actions)
}

fn fail_daemon(phase: StartupPhase, ctx: &mut StartupContext, error: StartupError) -> Transition {
    ctx.record_error_at(error, phase.stage());
    // Nothing pending needs the passphrase after a fatal failure.
    ctx.clear_passphrase();
    enter(StartupPhase::DaemonError, ctx)
}

fn request_discover_passphrase(ctx: &mut StartupContext, error: Option<StartupError>) -> Transition {
    if let Some(error) = error {
        ctx.record_error_at(error, StartupStage::WalletStart);
    }
    // The rejected passphrase must not be offered again.
    ctx.clear_passphrase();
    stay(StartupPhase::WalletDiscoverAccountsPassInput)
}

fn on_wallet_started(ctx: &mut StartupContext, discover_accounts_complete: bool) -> Transition {
    let Some(wallet) = ctx.selected_wallet.clone() else {
        return stay(StartupPhase::StartingWallet);
    };

    ctx.clear_error_for(StartupStage::WalletStart);
    ctx.wallet_started = true;

    let needs_discover_passphrase = !discover_accounts_complete
        && !ctx.has_passphrase()
        && wallet.can_discover_with_passphrase();

    let (next, mut actions) = if needs_discover_passphrase {
        stay(StartupPhase::WalletDiscoverAccountsPassInput)
    } else {
        enter(StartupPhase::SyncingRpc, ctx)
    };
    actions.insert(0, StartupAction::RememberSelectedWallet { wallet });
    (next, actions)
}

fn overlay_for(event: &StartupEvent) -> Option<Overlay> {
    match event {
        StartupEvent::ShowSettings => Some(Overlay::Settings),
        StartupEvent::ShowLogs => Some(Overlay::Logs),
        StartupEvent::ShowTrezorConfig => Some(Overlay::TrezorConfig),
        StartupEvent::ShowReleaseNotes => Some(Overlay::ReleaseNotes),
        _ => None,
    }
}
