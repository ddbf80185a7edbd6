use async_trait::async_trait;

use crate::startup::StartupSnapshot;

/// UI boundary notified after every dispatch.
#[async_trait]
pub trait StartupEventPort: Send + Sync {
    async fn emit_startup_state_changed(&self, snapshot: StartupSnapshot);
}
