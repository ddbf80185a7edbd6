//! # gs-core
//!
//! Core domain model for the wallet get-started flow.
//!
//! This crate contains pure business logic without any runtime dependencies:
//! the startup state machine, the mode resolver, the view projection and the
//! port traits implemented by the daemon/wallet collaborators.

pub mod config;
pub mod ids;
pub mod ports;
pub mod security;
pub mod startup;
pub mod wallet;

// Re-export commonly used types at the crate root
pub use config::StartupConfig;
pub use ids::SubflowRef;
pub use security::SecretString;
pub use startup::{
    StartupAction, StartupContext, StartupError, StartupEvent, StartupPhase, StartupSnapshot,
    StartupState, StartupStateMachine,
};
pub use wallet::{Network, RpcCredentials, WalletDescriptor};
