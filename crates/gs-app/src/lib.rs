//! # gs-app
//!
//! Application orchestration layer for the wallet get-started flow.
//!
//! This crate drives the pure state machine from `gs-core`: it runs the
//! requested effects against the collaborator ports, feeds their outcomes
//! back as events and publishes a snapshot after every dispatch.

pub mod deps;
pub mod usecases;

pub use deps::StartupDeps;
pub use usecases::startup::{
    StartupEffects, StartupOrchestrator, StartupOrchestratorError, StartupSettings,
};
