use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clap::Parser;
use tempfile::NamedTempFile;

use getstarted::bootstrap::{load_startup_config, start_startup_flow, CliOptions};
use gs_app::StartupDeps;
use gs_core::ports::{
    DaemonPort, DaemonStarted, ErrorPagePort, StartDaemonRequest, StartupEventPort,
    StartupStatusPort, SubflowPort, WalletLoaderPort,
};
use gs_core::startup::{CreateWalletRequest, StartupPhase, StartupSnapshot, StartupStatus};
use gs_core::{RpcCredentials, SecretString, StartupError, SubflowRef, WalletDescriptor};

/// Collaborators that accept everything and record daemon start requests.
#[derive(Default)]
struct IdleHost {
    start_requests: Mutex<Vec<StartDaemonRequest>>,
}

#[async_trait]
impl DaemonPort for IdleHost {
    async fn start_daemon(
        &self,
        request: StartDaemonRequest,
    ) -> Result<DaemonStarted, StartupError> {
        self.start_requests.lock().unwrap().push(request);
        // Never settles: the tests only look at the first phase.
        std::future::pending().await
    }

    async fn connect_daemon(
        &self,
        _credentials: Option<RpcCredentials>,
        _is_remote: bool,
    ) -> Result<(), StartupError> {
        Ok(())
    }

    async fn check_network_match(&self) -> Result<(), StartupError> {
        Ok(())
    }

    async fn sync_daemon(&self) -> Result<(), StartupError> {
        Ok(())
    }
}

#[async_trait]
impl WalletLoaderPort for IdleHost {
    async fn available_wallets(&self) -> Result<Vec<WalletDescriptor>, StartupError> {
        Ok(Vec::new())
    }

    async fn start_wallet(
        &self,
        _wallet: &WalletDescriptor,
        _has_passphrase: bool,
    ) -> Result<bool, StartupError> {
        Ok(true)
    }

    async fn open_wallet(
        &self,
        _wallet: &WalletDescriptor,
        _public_passphrase: SecretString,
    ) -> Result<(), StartupError> {
        Ok(())
    }

    async fn retry_start_rpc(&self, _passphrase: Option<SecretString>) -> Result<(), StartupError> {
        Ok(())
    }

    async fn start_spv_sync(&self, _passphrase: Option<SecretString>) -> Result<(), StartupError> {
        Ok(())
    }

    async fn selected_wallet(&self) -> anyhow::Result<Option<WalletDescriptor>> {
        Ok(None)
    }

    async fn set_selected_wallet(&self, _wallet: &WalletDescriptor) -> anyhow::Result<()> {
        Ok(())
    }
}

impl StartupStatusPort for IdleHost {
    fn status(&self) -> StartupStatus {
        StartupStatus::default()
    }
}

#[async_trait]
impl SubflowPort for IdleHost {
    async fn launch_create_wallet(
        &self,
        _request: CreateWalletRequest,
    ) -> anyhow::Result<SubflowRef> {
        Ok(SubflowRef::new())
    }

    async fn launch_setting_up_wallet(
        &self,
        _wallet: Option<WalletDescriptor>,
    ) -> anyhow::Result<SubflowRef> {
        Ok(SubflowRef::new())
    }
}

#[async_trait]
impl ErrorPagePort for IdleHost {
    async fn show_error_page(&self, _error: &StartupError) {}
}

#[async_trait]
impl StartupEventPort for IdleHost {
    async fn emit_startup_state_changed(&self, _snapshot: StartupSnapshot) {}
}

fn deps(host: &Arc<IdleHost>) -> StartupDeps {
    StartupDeps {
        daemon: host.clone(),
        wallet_loader: host.clone(),
        status: host.clone(),
        subflows: host.clone(),
        error_page: host.clone(),
        event_port: host.clone(),
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file
}

#[tokio::test]
async fn advanced_config_opens_advanced_form() {
    let file = config_file(
        r#"
        [startup]
        advanced_daemon = true
    "#,
    );
    let cli = CliOptions::parse_from([
        "getstarted",
        "--config",
        file.path().to_str().unwrap(),
    ]);
    let host = Arc::new(IdleHost::default());

    let config = load_startup_config(&cli).unwrap();
    let orchestrator = start_startup_flow(deps(&host), &config, &cli).await.unwrap();

    assert!(orchestrator
        .snapshot()
        .state
        .is_phase(StartupPhase::StartAdvancedDaemon));
    assert!(host.start_requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rpc_flags_start_remote_daemon_with_configured_appdata() {
    let file = config_file(
        r#"
        [startup]
        spv = true
        appdata = "/var/lib/dcrd"

        [remote]
        rpc_user = "file-user"
        rpc_cert = "/etc/dcrd/rpc.cert"
    "#,
    );
    let cli = CliOptions::parse_from([
        "getstarted",
        "--config",
        file.path().to_str().unwrap(),
        "--rpchost",
        "10.0.0.2",
        "--rpcport",
        "19109",
    ]);
    let host = Arc::new(IdleHost::default());

    let config = load_startup_config(&cli).unwrap();
    let orchestrator = start_startup_flow(deps(&host), &config, &cli).await.unwrap();

    let snapshot = orchestrator.snapshot();
    assert!(snapshot.state.is_phase(StartupPhase::StartingDaemon));
    let remote = snapshot.context.remote_credentials.unwrap();
    assert_eq!(remote.rpc_user, "file-user");
    assert_eq!(remote.rpc_host, "10.0.0.2");
    assert_eq!(remote.rpc_port, 19109);
    assert_eq!(remote.rpc_cert, PathBuf::from("/etc/dcrd/rpc.cert"));

    tokio::time::timeout(std::time::Duration::from_secs(2), async {
        while host.start_requests.lock().unwrap().is_empty() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("daemon start never requested");
    let request = host.start_requests.lock().unwrap()[0].clone();
    assert_eq!(request.appdata, Some(PathBuf::from("/var/lib/dcrd")));
}

#[tokio::test]
async fn unreadable_config_is_reported() {
    let cli = CliOptions::parse_from(["getstarted", "--config", "/no/such/getstarted.toml"]);

    let err = load_startup_config(&cli).unwrap_err();

    assert!(err.to_string().contains("Failed to read config file"));
}
