use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use gs_app::{StartupDeps, StartupOrchestrator, StartupOrchestratorError, StartupSettings};
use gs_core::ports::{
    DaemonPort, DaemonStarted, ErrorPagePort, StartDaemonRequest, StartupEventPort,
    StartupStatusPort, SubflowPort, WalletLoaderPort,
};
use gs_core::startup::{
    CreateWalletRequest, PageKind, StartupError, StartupFlags, StartupPhase, StartupSnapshot,
    StartupStatus,
};
use gs_core::{RpcCredentials, SecretString, SubflowRef, WalletDescriptor};

// ---------------------------------------------------------------------------
// Mocks
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockDaemon {
    start_error: StdMutex<Option<StartupError>>,
    connect_error: StdMutex<Option<StartupError>>,
    start_requests: StdMutex<Vec<StartDaemonRequest>>,
    connect_calls: StdMutex<Vec<bool>>,
}

#[async_trait]
impl DaemonPort for MockDaemon {
    async fn start_daemon(
        &self,
        request: StartDaemonRequest,
    ) -> Result<DaemonStarted, StartupError> {
        self.start_requests.lock().unwrap().push(request);
        match self.start_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(DaemonStarted {
                credentials: None,
                appdata: None,
            }),
        }
    }

    async fn connect_daemon(
        &self,
        _credentials: Option<RpcCredentials>,
        is_remote: bool,
    ) -> Result<(), StartupError> {
        self.connect_calls.lock().unwrap().push(is_remote);
        match self.connect_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn check_network_match(&self) -> Result<(), StartupError> {
        Ok(())
    }

    async fn sync_daemon(&self) -> Result<(), StartupError> {
        Ok(())
    }
}

#[derive(Default)]
struct MockWalletLoader {
    wallets: Vec<WalletDescriptor>,
    list_error: Option<StartupError>,
    preselected: Option<WalletDescriptor>,
    /// Consumed in order; an empty queue means "started, discovery complete".
    start_results: StdMutex<VecDeque<Result<bool, StartupError>>>,
    /// When set, `start_wallet` waits for a permit before returning.
    start_gate: Option<Arc<Notify>>,
    list_calls: AtomicUsize,
    start_calls: AtomicUsize,
    sync_passphrases: StdMutex<Vec<Option<String>>>,
    spv_syncs: AtomicUsize,
    remembered: StdMutex<Vec<WalletDescriptor>>,
}

#[async_trait]
impl WalletLoaderPort for MockWalletLoader {
    async fn available_wallets(&self) -> Result<Vec<WalletDescriptor>, StartupError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match &self.list_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.wallets.clone()),
        }
    }

    async fn start_wallet(
        &self,
        _wallet: &WalletDescriptor,
        _has_passphrase: bool,
    ) -> Result<bool, StartupError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.start_gate {
            gate.notified().await;
        }
        self.start_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(true))
    }

    async fn open_wallet(
        &self,
        _wallet: &WalletDescriptor,
        _public_passphrase: SecretString,
    ) -> Result<(), StartupError> {
        Ok(())
    }

    async fn retry_start_rpc(&self, passphrase: Option<SecretString>) -> Result<(), StartupError> {
        self.sync_passphrases
            .lock()
            .unwrap()
            .push(passphrase.map(|p| p.expose().to_string()));
        Ok(())
    }

    async fn start_spv_sync(&self, _passphrase: Option<SecretString>) -> Result<(), StartupError> {
        self.spv_syncs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn selected_wallet(&self) -> anyhow::Result<Option<WalletDescriptor>> {
        Ok(self.preselected.clone())
    }

    async fn set_selected_wallet(&self, wallet: &WalletDescriptor) -> anyhow::Result<()> {
        self.remembered.lock().unwrap().push(wallet.clone());
        Ok(())
    }
}

#[derive(Default)]
struct MockStatus {
    status: StdMutex<StartupStatus>,
}

impl MockStatus {
    fn update(&self, f: impl FnOnce(&mut StartupStatus)) {
        f(&mut self.status.lock().unwrap());
    }
}

impl StartupStatusPort for MockStatus {
    fn status(&self) -> StartupStatus {
        self.status.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct MockSubflows {
    create_requests: StdMutex<Vec<CreateWalletRequest>>,
    setting_up: AtomicUsize,
}

#[async_trait]
impl SubflowPort for MockSubflows {
    async fn launch_create_wallet(
        &self,
        request: CreateWalletRequest,
    ) -> anyhow::Result<SubflowRef> {
        self.create_requests.lock().unwrap().push(request);
        Ok(SubflowRef::new())
    }

    async fn launch_setting_up_wallet(
        &self,
        _wallet: Option<WalletDescriptor>,
    ) -> anyhow::Result<SubflowRef> {
        self.setting_up.fetch_add(1, Ordering::SeqCst);
        Ok(SubflowRef::new())
    }
}

#[derive(Default)]
struct MockErrorPage {
    shown: tokio::sync::Mutex<Vec<StartupError>>,
}

#[async_trait]
impl ErrorPagePort for MockErrorPage {
    async fn show_error_page(&self, error: &StartupError) {
        self.shown.lock().await.push(error.clone());
    }
}

#[derive(Default)]
struct MockStartupEventPort {
    emitted: tokio::sync::Mutex<Vec<&'static str>>,
}

impl MockStartupEventPort {
    async fn phases(&self) -> Vec<&'static str> {
        self.emitted.lock().await.clone()
    }
}

#[async_trait]
impl StartupEventPort for MockStartupEventPort {
    async fn emit_startup_state_changed(&self, snapshot: StartupSnapshot) {
        self.emitted.lock().await.push(snapshot.phase_name());
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

struct TestMocks {
    daemon: Arc<MockDaemon>,
    wallet_loader: Arc<MockWalletLoader>,
    status: Arc<MockStatus>,
    subflows: Arc<MockSubflows>,
    error_page: Arc<MockErrorPage>,
    events: Arc<MockStartupEventPort>,
}

fn settings(flags: StartupFlags) -> StartupSettings {
    StartupSettings {
        cli_remote: None,
        flags,
        appdata: None,
        error_page_grace: Duration::from_millis(10),
    }
}

fn test_fixtures(
    daemon: MockDaemon,
    wallet_loader: MockWalletLoader,
    status: StartupStatus,
    settings: StartupSettings,
) -> (TestMocks, Arc<StartupOrchestrator>) {
    let mocks = TestMocks {
        daemon: Arc::new(daemon),
        wallet_loader: Arc::new(wallet_loader),
        status: Arc::new(MockStatus {
            status: StdMutex::new(status),
        }),
        subflows: Arc::new(MockSubflows::default()),
        error_page: Arc::new(MockErrorPage::default()),
        events: Arc::new(MockStartupEventPort::default()),
    };

    let orchestrator = StartupOrchestrator::new(
        StartupDeps {
            daemon: mocks.daemon.clone(),
            wallet_loader: mocks.wallet_loader.clone(),
            status: mocks.status.clone(),
            subflows: mocks.subflows.clone(),
            error_page: mocks.error_page.clone(),
            event_port: mocks.events.clone(),
        },
        settings,
    );

    (mocks, orchestrator)
}

async fn wait_for(
    orchestrator: &StartupOrchestrator,
    predicate: impl FnMut(&StartupSnapshot) -> bool,
) -> StartupSnapshot {
    let mut rx = orchestrator.subscribe();
    let snapshot = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(predicate))
        .await
        .expect("timed out waiting for startup snapshot")
        .expect("snapshot channel closed")
        .clone();
    snapshot
}

async fn wait_for_phase(orchestrator: &StartupOrchestrator, phase: StartupPhase) -> StartupSnapshot {
    wait_for(orchestrator, |s| s.state.is_phase(phase)).await
}

async fn eventually(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

fn remote() -> RpcCredentials {
    RpcCredentials {
        rpc_user: "user".into(),
        rpc_pass: "pass".into(),
        rpc_cert: PathBuf::from("/tmp/rpc.cert"),
        rpc_host: "10.0.0.2".into(),
        rpc_port: 9109,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn spv_cold_start_reaches_setting_up_wallet_once_synced() {
    let wallet = WalletDescriptor::new("W");
    let (mocks, orchestrator) = test_fixtures(
        MockDaemon::default(),
        MockWalletLoader {
            wallets: vec![wallet.clone()],
            ..Default::default()
        },
        StartupStatus {
            // The collaborator is already syncing; completion comes from status.
            sync_attempt_request: true,
            ..Default::default()
        },
        settings(StartupFlags {
            is_spv: true,
            ..Default::default()
        }),
    );

    let first = orchestrator.start().await.unwrap();
    assert_eq!(first.state.phase(), Some(StartupPhase::StartSpv));

    let choosing = wait_for(&orchestrator, |s| {
        s.state.is_phase(StartupPhase::ChoosingWallet) && !s.context.available_wallets.is_empty()
    })
    .await;
    assert_eq!(choosing.context.available_wallets, vec![wallet.clone()]);

    orchestrator.choose_wallet(wallet.clone()).await.unwrap();
    wait_for_phase(&orchestrator, StartupPhase::SyncingRpc).await;

    mocks.status.update(|s| {
        s.sync_attempt_request = false;
        s.synced = true;
    });
    orchestrator.notify_status_changed().await.unwrap();

    let done = wait_for(&orchestrator, |s| s.context.setting_up_wallet_ref.is_some()).await;
    assert!(done.is_finished());
    assert!(!done.context.has_passphrase);
    assert_eq!(orchestrator.view().page, PageKind::SettingUpWallet);
    assert_eq!(mocks.daemon.start_requests.lock().unwrap().len(), 0);
    assert_eq!(mocks.wallet_loader.spv_syncs.load(Ordering::SeqCst), 0);
    let loader = mocks.wallet_loader.clone();
    eventually(move || loader.remembered.lock().unwrap().as_slice() == [wallet.clone()]).await;
}

#[tokio::test]
async fn spv_start_with_remembered_wallet_skips_the_picker() {
    let wallet = WalletDescriptor::new("W");
    let (mocks, orchestrator) = test_fixtures(
        MockDaemon::default(),
        MockWalletLoader {
            wallets: vec![wallet.clone(), WalletDescriptor::new("other")],
            preselected: Some(wallet.clone()),
            ..Default::default()
        },
        StartupStatus::default(),
        settings(StartupFlags {
            is_spv: true,
            ..Default::default()
        }),
    );

    let first = orchestrator.start().await.unwrap();
    assert_eq!(first.state.phase(), Some(StartupPhase::StartingWallet));
    assert_eq!(first.context.selected_wallet, Some(wallet.clone()));

    let syncing = wait_for_phase(&orchestrator, StartupPhase::SyncingRpc).await;
    assert_eq!(syncing.context.selected_wallet, Some(wallet));
    assert_eq!(mocks.wallet_loader.list_calls.load(Ordering::SeqCst), 0);
    assert_eq!(mocks.wallet_loader.start_calls.load(Ordering::SeqCst), 1);
    assert!(mocks.daemon.start_requests.lock().unwrap().is_empty());
    assert!(!mocks.events.phases().await.contains(&"choosingWallet"));
}

#[tokio::test]
async fn cli_remote_credentials_drive_remote_daemon_pipeline() {
    let (mocks, orchestrator) = test_fixtures(
        MockDaemon::default(),
        MockWalletLoader::default(),
        StartupStatus::default(),
        StartupSettings {
            cli_remote: Some(remote()),
            // Flags are ignored when remote credentials are given.
            ..settings(StartupFlags {
                is_spv: true,
                is_advanced_daemon: true,
                is_testnet: false,
            })
        },
    );

    let first = orchestrator.start().await.unwrap();
    assert_eq!(first.state.phase(), Some(StartupPhase::StartingDaemon));
    assert_eq!(first.context.remote_credentials, Some(remote()));

    wait_for_phase(&orchestrator, StartupPhase::ChoosingWallet).await;

    let requests = mocks.daemon.start_requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].remote, Some(remote()));
    assert_eq!(*mocks.daemon.connect_calls.lock().unwrap(), vec![true]);

    let phases = mocks.events.phases().await;
    let pipeline: Vec<_> = phases
        .iter()
        .copied()
        .filter(|p| *p != "choosingWallet")
        .collect();
    assert_eq!(
        pipeline,
        vec![
            "startingDaemon",
            "connectingDaemon",
            "syncingDaemon",
            "checkingNetworkMatch"
        ]
    );
}

#[tokio::test]
async fn regular_daemon_failure_escalates_to_error_page_after_grace() {
    let error = StartupError::Start {
        message: "dcrd not found".into(),
    };
    let (mocks, orchestrator) = test_fixtures(
        MockDaemon {
            start_error: StdMutex::new(Some(error.clone())),
            ..Default::default()
        },
        MockWalletLoader::default(),
        StartupStatus::default(),
        StartupSettings {
            appdata: Some(PathBuf::from("/var/lib/dcrd")),
            ..settings(StartupFlags::default())
        },
    );

    orchestrator.start().await.unwrap();
    let failed = wait_for_phase(&orchestrator, StartupPhase::DaemonError).await;
    assert!(failed.is_at_error());
    assert_eq!(failed.context.error, Some(error.clone()));
    assert_eq!(
        mocks.daemon.start_requests.lock().unwrap()[0].appdata,
        Some(PathBuf::from("/var/lib/dcrd"))
    );

    let error_page = mocks.error_page.clone();
    tokio::time::timeout(Duration::from_secs(2), async move {
        loop {
            if error_page.shown.lock().await.as_slice() == [error.clone()] {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("error page never shown");
}

#[tokio::test]
async fn advanced_daemon_failure_returns_to_advanced_form() {
    let (mocks, orchestrator) = test_fixtures(
        MockDaemon {
            start_error: StdMutex::new(Some(StartupError::Start {
                message: "bad appdata".into(),
            })),
            ..Default::default()
        },
        MockWalletLoader::default(),
        StartupStatus::default(),
        settings(StartupFlags {
            is_advanced_daemon: true,
            ..Default::default()
        }),
    );

    let first = orchestrator.start().await.unwrap();
    assert_eq!(first.state.phase(), Some(StartupPhase::StartAdvancedDaemon));

    orchestrator
        .submit_appdata(PathBuf::from("/custom/appdata"))
        .await
        .unwrap();

    let back = wait_for(&orchestrator, |s| {
        s.state.is_phase(StartupPhase::StartAdvancedDaemon) && s.context.error.is_some()
    })
    .await;
    assert_eq!(back.context.appdata, Some(PathBuf::from("/custom/appdata")));

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(mocks.error_page.shown.lock().await.is_empty());
}

#[tokio::test]
async fn deprecated_tls_curve_connect_failure_is_rewritten() {
    let (_mocks, orchestrator) = test_fixtures(
        MockDaemon {
            connect_error: StdMutex::new(Some(StartupError::Connect {
                message: "SSL routines:ssl3_read_bytes:SSLV3_ALERT_HANDSHAKE_FAILURE".into(),
                connected: false,
            })),
            ..Default::default()
        },
        MockWalletLoader::default(),
        StartupStatus::default(),
        settings(StartupFlags {
            is_advanced_daemon: true,
            ..Default::default()
        }),
    );

    orchestrator.start().await.unwrap();
    orchestrator.submit_remote_credentials(remote()).await.unwrap();

    let failed = wait_for(&orchestrator, |s| s.context.error.is_some()).await;
    assert_eq!(failed.context.error, Some(StartupError::DeprecatedTlsCurve));
    assert!(orchestrator
        .view()
        .error
        .unwrap()
        .contains("--tlscurve=P-256"));
}

#[tokio::test]
async fn missing_database_redirects_to_pre_create_wallet() {
    let wallet = WalletDescriptor::new("fresh").unfinished();
    let (_mocks, orchestrator) = test_fixtures(
        MockDaemon::default(),
        MockWalletLoader {
            preselected: Some(wallet),
            start_results: StdMutex::new(VecDeque::from([Err(StartupError::MissingDatabase {
                is_new: true,
            })])),
            ..Default::default()
        },
        StartupStatus {
            daemon_synced: true,
            ..Default::default()
        },
        settings(StartupFlags::default()),
    );

    let first = orchestrator.start().await.unwrap();
    // The wallet choice is skipped for a synced session with a wallet.
    assert_eq!(first.state.phase(), Some(StartupPhase::StartingWallet));

    let pre_create = wait_for_phase(&orchestrator, StartupPhase::PreCreateWallet).await;
    assert!(pre_create.context.is_create_new_wallet);
    assert!(pre_create.context.error.is_none());
    assert!(pre_create.can_go_back());
}

#[tokio::test]
async fn bad_passphrase_reprompts_and_retry_clears_error() {
    let wallet = WalletDescriptor::new("w");
    let (mocks, orchestrator) = test_fixtures(
        MockDaemon::default(),
        MockWalletLoader {
            preselected: Some(wallet),
            start_results: StdMutex::new(VecDeque::from([
                Err(StartupError::BadPrivatePassphrase),
                Ok(false),
            ])),
            ..Default::default()
        },
        StartupStatus {
            daemon_synced: true,
            ..Default::default()
        },
        settings(StartupFlags::default()),
    );

    orchestrator.start().await.unwrap();
    let prompt = wait_for_phase(&orchestrator, StartupPhase::WalletDiscoverAccountsPassInput).await;
    assert_eq!(prompt.context.error, Some(StartupError::BadPrivatePassphrase));

    orchestrator.set_passphrase("x".into()).await.unwrap();

    let done = wait_for_phase(&orchestrator, StartupPhase::SettingUpWallet).await;
    assert!(done.context.error.is_none());
    assert!(!done.context.has_passphrase);
    assert_eq!(
        *mocks.wallet_loader.sync_passphrases.lock().unwrap(),
        vec![Some("x".to_string())]
    );
}

#[tokio::test]
async fn back_from_side_view_does_not_duplicate_in_flight_effect() {
    let gate = Arc::new(Notify::new());
    let (mocks, orchestrator) = test_fixtures(
        MockDaemon::default(),
        MockWalletLoader {
            preselected: Some(WalletDescriptor::new("w")),
            start_gate: Some(gate.clone()),
            ..Default::default()
        },
        StartupStatus {
            daemon_synced: true,
            ..Default::default()
        },
        settings(StartupFlags::default()),
    );

    orchestrator.start().await.unwrap();
    let loader = mocks.wallet_loader.clone();
    eventually(move || loader.start_calls.load(Ordering::SeqCst) == 1).await;

    orchestrator.show_logs().await.unwrap();
    let restored = orchestrator.back().await.unwrap();
    assert_eq!(restored.state.phase(), Some(StartupPhase::StartingWallet));

    gate.notify_one();
    wait_for_phase(&orchestrator, StartupPhase::SettingUpWallet).await;
    assert_eq!(mocks.wallet_loader.start_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn completion_dropped_under_side_view_is_requested_again_on_back() {
    let gate = Arc::new(Notify::new());
    let (mocks, orchestrator) = test_fixtures(
        MockDaemon::default(),
        MockWalletLoader {
            preselected: Some(WalletDescriptor::new("w")),
            start_gate: Some(gate.clone()),
            ..Default::default()
        },
        StartupStatus {
            daemon_synced: true,
            ..Default::default()
        },
        settings(StartupFlags::default()),
    );

    orchestrator.start().await.unwrap();
    let loader = mocks.wallet_loader.clone();
    eventually(move || loader.start_calls.load(Ordering::SeqCst) == 1).await;

    orchestrator.show_settings().await.unwrap();
    let published = mocks.events.phases().await.len();

    // The result arrives while settings is shown and is dropped.
    gate.notify_one();
    let events = mocks.events.clone();
    tokio::time::timeout(Duration::from_secs(2), async move {
        while events.phases().await.len() == published {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("dropped completion never dispatched");
    assert_eq!(orchestrator.snapshot().phase_name(), "settings");

    gate.notify_one();
    orchestrator.back().await.unwrap();
    wait_for_phase(&orchestrator, StartupPhase::SettingUpWallet).await;
    assert_eq!(mocks.wallet_loader.start_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn listing_error_is_not_retried_automatically() {
    let (mocks, orchestrator) = test_fixtures(
        MockDaemon::default(),
        MockWalletLoader {
            list_error: Some(StartupError::List {
                message: "permission denied".into(),
            }),
            ..Default::default()
        },
        StartupStatus {
            daemon_synced: true,
            ..Default::default()
        },
        settings(StartupFlags::default()),
    );

    orchestrator.start().await.unwrap();
    let failed = wait_for(&orchestrator, |s| s.context.available_wallets_error.is_some()).await;
    assert!(failed.state.is_phase(StartupPhase::ChoosingWallet));

    orchestrator.show_release_notes().await.unwrap();
    orchestrator.back().await.unwrap();
    tokio::time::sleep(Duration::from_millis(30)).await;

    assert_eq!(mocks.wallet_loader.list_calls.load(Ordering::SeqCst), 1);
    assert!(orchestrator.view().available_wallets_error.is_some());
}

#[tokio::test]
async fn create_wallet_subflow_hands_back_new_wallet() {
    let (mocks, orchestrator) = test_fixtures(
        MockDaemon::default(),
        MockWalletLoader::default(),
        StartupStatus {
            daemon_synced: true,
            ..Default::default()
        },
        settings(StartupFlags {
            is_testnet: true,
            ..Default::default()
        }),
    );

    orchestrator.start().await.unwrap();
    wait_for_phase(&orchestrator, StartupPhase::ChoosingWallet).await;

    orchestrator.create_wallet(true).await.unwrap();
    orchestrator.show_create_wallet(true, false, None).await.unwrap();
    let creating = wait_for(&orchestrator, |s| s.context.create_wallet_ref.is_some()).await;
    assert_eq!(creating.phase_name(), "creatingWallet");
    assert_eq!(orchestrator.view().page, PageKind::CreatingWallet);

    let requests = mocks.subflows.create_requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![CreateWalletRequest {
            is_new: true,
            is_trezor: false,
            wallet_master_pub_key: None,
            is_testnet: true,
        }]
    );

    orchestrator
        .wallet_created(WalletDescriptor::new("brand-new"))
        .await
        .unwrap();
    let done = wait_for_phase(&orchestrator, StartupPhase::SettingUpWallet).await;
    assert_eq!(
        done.context.selected_wallet,
        Some(WalletDescriptor::new("brand-new"))
    );
    assert!(done.context.create_wallet_ref.is_none());
    let subflows = mocks.subflows.clone();
    eventually(move || subflows.setting_up.load(Ordering::SeqCst) == 1).await;
}

#[tokio::test]
async fn commands_require_start_and_start_runs_once() {
    let (_mocks, orchestrator) = test_fixtures(
        MockDaemon::default(),
        MockWalletLoader::default(),
        StartupStatus::default(),
        settings(StartupFlags::default()),
    );

    assert_eq!(
        orchestrator.continue_startup().await.unwrap_err(),
        StartupOrchestratorError::NotStarted
    );
    assert_eq!(orchestrator.snapshot().phase_name(), "preStart");

    orchestrator.start().await.unwrap();
    assert_eq!(
        orchestrator.start().await.unwrap_err(),
        StartupOrchestratorError::AlreadyStarted
    );
}
