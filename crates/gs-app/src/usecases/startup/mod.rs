//! Startup use cases.
//!
//! This module exposes the startup orchestrator and the effect handlers it
//! runs.

mod context;
pub mod effects;
mod in_flight;
pub mod orchestrator;

pub use effects::StartupEffects;
pub use orchestrator::{StartupOrchestrator, StartupOrchestratorError, StartupSettings};
