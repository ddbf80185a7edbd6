//! getstarted
//!
//! Bootstrap for the wallet get-started flow: configuration loading, remote
//! RPC command line options, tracing setup and orchestrator wiring.
//!
//! 钱包启动流程的引导层。

pub mod bootstrap;

pub use bootstrap::{
    build_startup_settings, init_tracing_subscriber, load_config, start_startup_flow, CliOptions,
};
