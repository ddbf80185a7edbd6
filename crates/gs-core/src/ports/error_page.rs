use async_trait::async_trait;

use crate::startup::StartupError;

/// Global error view, outside the startup flow.
#[async_trait]
pub trait ErrorPagePort: Send + Sync {
    async fn show_error_page(&self, error: &StartupError);
}
