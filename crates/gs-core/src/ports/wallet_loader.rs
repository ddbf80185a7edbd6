//! Wallet loader port.
//!
//! 钱包加载端口：列出、启动、打开钱包，并建立 RPC / SPV 同步。

use async_trait::async_trait;

use crate::security::SecretString;
use crate::startup::StartupError;
use crate::wallet::WalletDescriptor;

#[async_trait]
pub trait WalletLoaderPort: Send + Sync {
    async fn available_wallets(&self) -> Result<Vec<WalletDescriptor>, StartupError>;

    /// Start `wallet`. Returns whether account discovery already completed.
    ///
    /// Recoverable failures are reported as [`StartupError::MissingDatabase`],
    /// [`StartupError::BadPrivatePassphrase`] and
    /// [`StartupError::NeedsPublicPassphrase`].
    async fn start_wallet(
        &self,
        wallet: &WalletDescriptor,
        has_passphrase: bool,
    ) -> Result<bool, StartupError>;

    async fn open_wallet(
        &self,
        wallet: &WalletDescriptor,
        public_passphrase: SecretString,
    ) -> Result<(), StartupError>;

    async fn retry_start_rpc(&self, passphrase: Option<SecretString>) -> Result<(), StartupError>;

    async fn start_spv_sync(&self, passphrase: Option<SecretString>) -> Result<(), StartupError>;

    /// Wallet remembered from a previous session, if any.
    async fn selected_wallet(&self) -> anyhow::Result<Option<WalletDescriptor>>;

    async fn set_selected_wallet(&self, wallet: &WalletDescriptor) -> anyhow::Result<()>;
}
