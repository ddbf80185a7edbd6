//! Startup error taxonomy.
//!
//! 启动流程错误类型。每个错误都归属于产生它的阶段，只有该阶段重试成功时才会清除。

use serde::{Deserialize, Serialize};

/// Marker the RPC layer reports when the daemon certificate uses a curve the
/// client no longer negotiates.
const DEPRECATED_TLS_CURVE_MARKER: &str = "SSLV3_ALERT_HANDSHAKE_FAILURE";

/// Errors surfaced by the startup flow.
///
/// These are values, not control flow: every failure reported by a
/// collaborator ends up stored in the context and rendered by the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StartupError {
    #[error("failed to start daemon: {message}")]
    Start { message: String },

    /// `connected` is true when the socket was established and the failure
    /// happened later (authentication, version check).
    #[error("{message}")]
    Connect { message: String, connected: bool },

    #[error(
        "Connection error. Probably you got this error because the P-521 curve is no longer \
         supported. To fix it, you need to remove the rpc.cert and rpc.key and restart dcrd with \
         the --tlscurve=P-256 param to allow it to generate a cert and key with that supported curve."
    )]
    DeprecatedTlsCurve,

    #[error("network mismatch: {message}")]
    NetworkMismatch { message: String },

    #[error("failed to sync daemon: {message}")]
    Sync { message: String },

    #[error("failed to list wallets: {message}")]
    List { message: String },

    /// The wallet directory exists but holds no database file. `is_new`
    /// tells whether the directory was created for a brand new wallet (as
    /// opposed to a restore).
    #[error("wallet database file is missing")]
    MissingDatabase { is_new: bool },

    #[error("invalid private passphrase")]
    BadPrivatePassphrase,

    #[error("wallet requires its public passphrase")]
    NeedsPublicPassphrase,

    #[error("failed to sync wallet: {message}")]
    WalletSync { message: String },

    #[error("{message}")]
    Other { message: String },
}

/// Stage of the startup flow an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupStage {
    DaemonStart,
    DaemonConnect,
    DaemonSync,
    NetworkCheck,
    WalletList,
    WalletStart,
    WalletSync,
    /// Reported without a specific stage. The context attributes it to the
    /// stage of the phase it was raised in.
    General,
}

impl StartupError {
    pub fn other(message: impl Into<String>) -> Self {
        StartupError::Other {
            message: message.into(),
        }
    }

    pub fn stage(&self) -> StartupStage {
        match self {
            StartupError::Start { .. } => StartupStage::DaemonStart,
            StartupError::Connect { .. } | StartupError::DeprecatedTlsCurve => {
                StartupStage::DaemonConnect
            }
            StartupError::NetworkMismatch { .. } => StartupStage::NetworkCheck,
            StartupError::Sync { .. } => StartupStage::DaemonSync,
            StartupError::List { .. } => StartupStage::WalletList,
            StartupError::MissingDatabase { .. }
            | StartupError::BadPrivatePassphrase
            | StartupError::NeedsPublicPassphrase => StartupStage::WalletStart,
            StartupError::WalletSync { .. } => StartupStage::WalletSync,
            StartupError::Other { .. } => StartupStage::General,
        }
    }

    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Rewrite a daemon connect failure into the error stored in the context.
///
/// A failure that never connected and mentions the deprecated TLS curve
/// marker becomes [`StartupError::DeprecatedTlsCurve`]; anything else passes
/// through untouched.
pub fn translate_connect_error(error: StartupError) -> StartupError {
    match error {
        StartupError::Connect {
            ref message,
            connected: false,
        } if message.contains(DEPRECATED_TLS_CURVE_MARKER) => StartupError::DeprecatedTlsCurve,
        other => other,
    }
}
