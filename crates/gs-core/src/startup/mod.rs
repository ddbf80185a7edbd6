//! Startup domain module.
//!
//! This module defines the get-started state machine: states, events, the
//! side effects a transition may request, and the pure reducer tying them
//! together. Everything here is synchronous; effects are executed by the
//! application layer and fed back as events.

pub mod action;
pub mod context;
pub mod error;
pub mod event;
pub mod mode;
pub mod snapshot;
pub mod state;
pub mod state_machine;
pub mod status;
pub mod view;

pub use action::{CreateWalletRequest, EffectKind, StartupAction};
pub use context::{ContextView, StartupContext};
pub use error::{translate_connect_error, StartupError, StartupStage};
pub use event::StartupEvent;
pub use mode::{DaemonMode, ModeResolver, ResolverInputs, StartupFlags};
pub use snapshot::StartupSnapshot;
pub use state::{Overlay, StartupPhase, StartupState};
pub use state_machine::StartupStateMachine;
pub use status::{StartupStatus, SyncStage};
pub use view::{project, Animation, PageKind, StartupView, StateComponent, StatusText};
