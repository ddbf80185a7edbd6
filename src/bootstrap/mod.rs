pub mod cli;
pub mod config;
pub mod tracing;
pub mod wiring;

pub use cli::CliOptions;
pub use config::{load_config, resolve_remote};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{
    build_startup_settings, load_startup_config, start_startup_flow, DEFAULT_ERROR_PAGE_GRACE,
};
