//! Command line options.
//!
//! Only the remote daemon connection can be given on the command line. When
//! any of these flags is present the flow skips mode selection and connects
//! to that daemon directly.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "getstarted", version, about = "Bring the wallet from cold start to synced")]
pub struct CliOptions {
    /// Configuration file (TOML).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Remote daemon RPC user.
    #[arg(long = "rpcuser", value_name = "USER")]
    pub rpc_user: Option<String>,

    /// Remote daemon RPC password.
    #[arg(long = "rpcpass", value_name = "PASS")]
    pub rpc_pass: Option<String>,

    /// Remote daemon RPC certificate.
    #[arg(long = "rpccert", value_name = "PATH")]
    pub rpc_cert: Option<PathBuf>,

    /// Remote daemon RPC host.
    #[arg(long = "rpchost", value_name = "HOST")]
    pub rpc_host: Option<String>,

    /// Remote daemon RPC port.
    #[arg(long = "rpcport", value_name = "PORT")]
    pub rpc_port: Option<u16>,
}

impl CliOptions {
    /// At least one remote RPC flag was passed.
    pub fn rpc_present(&self) -> bool {
        self.rpc_user.is_some()
            || self.rpc_pass.is_some()
            || self.rpc_cert.is_some()
            || self.rpc_host.is_some()
            || self.rpc_port.is_some()
    }
}
