//! Port interfaces for the application layer
//!
//! Ports define the contract between the startup flow and the collaborators
//! that own the daemon, the wallet files and the UI. The flow only ever talks
//! to these traits, so every collaborator can be swapped for a fake in tests.
//!
//! Failures that the flow reacts to come back as [`StartupError`] values;
//! failures it cannot interpret (I/O of a persistence layer, a sub-flow that
//! could not be spawned) use `anyhow`.
//!
//! [`StartupError`]: crate::startup::StartupError

pub mod daemon;
pub mod error_page;
pub mod startup_event;
pub mod status;
pub mod subflow;
pub mod wallet_loader;

pub use daemon::{DaemonPort, DaemonStarted, StartDaemonRequest};
pub use error_page::ErrorPagePort;
pub use startup_event::StartupEventPort;
pub use status::StartupStatusPort;
pub use subflow::SubflowPort;
pub use wallet_loader::WalletLoaderPort;
