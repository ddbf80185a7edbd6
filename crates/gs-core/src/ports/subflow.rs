use async_trait::async_trait;

use crate::ids::SubflowRef;
use crate::startup::CreateWalletRequest;
use crate::wallet::WalletDescriptor;

/// Launches the externally owned sub-flows.
///
/// The returned handles are opaque to the startup flow; it only forwards them
/// to the UI boundary.
#[async_trait]
pub trait SubflowPort: Send + Sync {
    async fn launch_create_wallet(&self, request: CreateWalletRequest)
        -> anyhow::Result<SubflowRef>;

    async fn launch_setting_up_wallet(
        &self,
        wallet: Option<WalletDescriptor>,
    ) -> anyhow::Result<SubflowRef>;
}
