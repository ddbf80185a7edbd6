//! Wallet and daemon connection descriptors carried through the startup flow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A wallet as listed by the wallet loader and chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletDescriptor {
    /// Wallet directory name, unique per network.
    pub name: String,
    /// No private keys are loaded; account discovery never needs a passphrase.
    pub is_watching_only: bool,
    /// Keys live on a hardware device.
    pub is_trezor: bool,
    /// Creation completed (in this or an earlier session).
    pub finished: bool,
}

impl WalletDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_watching_only: false,
            is_trezor: false,
            finished: true,
        }
    }

    pub fn watching_only(mut self) -> Self {
        self.is_watching_only = true;
        self
    }

    pub fn trezor(mut self) -> Self {
        self.is_trezor = true;
        self
    }

    pub fn unfinished(mut self) -> Self {
        self.finished = false;
        self
    }

    /// Whether a private passphrase can ever be required to discover accounts.
    pub fn can_discover_with_passphrase(&self) -> bool {
        !self.is_watching_only && !self.is_trezor
    }
}

/// RPC connection data for a full-node daemon.
///
/// Used both for credentials typed by the user (remote daemon) and for the
/// credentials a locally started daemon reports back.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcCredentials {
    pub rpc_user: String,
    #[serde(skip_serializing, default)]
    pub rpc_pass: String,
    pub rpc_cert: PathBuf,
    pub rpc_host: String,
    pub rpc_port: u16,
}

impl fmt::Debug for RpcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcCredentials")
            .field("rpc_user", &self.rpc_user)
            .field("rpc_pass", &"[REDACTED]")
            .field("rpc_cert", &self.rpc_cert)
            .field("rpc_host", &self.rpc_host)
            .field("rpc_port", &self.rpc_port)
            .finish()
    }
}

/// Chain the wallet operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn from_testnet_flag(is_testnet: bool) -> Self {
        if is_testnet {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }
}
