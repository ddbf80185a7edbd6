use crate::startup::StartupStatus;

/// Synchronous status readouts owned by the daemon/wallet collaborators.
///
/// Sampled, never subscribed to: the flow reads the current values when it
/// needs them.
pub trait StartupStatusPort: Send + Sync {
    fn status(&self) -> StartupStatus;
}
