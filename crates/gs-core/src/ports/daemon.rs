//! Daemon lifecycle port.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::startup::StartupError;
use crate::wallet::RpcCredentials;

/// Parameters for starting (or attaching to) a daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartDaemonRequest {
    /// Custom data directory chosen in advanced mode.
    pub appdata: Option<PathBuf>,
    /// Remote daemon; nothing is spawned locally when set.
    pub remote: Option<RpcCredentials>,
}

/// What a successful start reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonStarted {
    pub credentials: Option<RpcCredentials>,
    pub appdata: Option<PathBuf>,
}

#[async_trait]
pub trait DaemonPort: Send + Sync {
    async fn start_daemon(&self, request: StartDaemonRequest)
        -> Result<DaemonStarted, StartupError>;

    /// Open the RPC connection. Errors are [`StartupError::Connect`].
    async fn connect_daemon(
        &self,
        credentials: Option<RpcCredentials>,
        is_remote: bool,
    ) -> Result<(), StartupError>;

    async fn check_network_match(&self) -> Result<(), StartupError>;

    async fn sync_daemon(&self) -> Result<(), StartupError>;
}
