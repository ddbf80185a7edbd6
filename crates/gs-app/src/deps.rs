//! # Startup Dependencies / 启动依赖
//!
//! Dependency grouping for the startup orchestrator.
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包

use std::sync::Arc;

use gs_core::ports::{
    DaemonPort, ErrorPagePort, StartupEventPort, StartupStatusPort, SubflowPort, WalletLoaderPort,
};

/// Collaborators of the startup flow. All required.
/// 启动流程的外部协作者（全部必需）。
#[derive(Clone)]
pub struct StartupDeps {
    // Daemon / 守护进程
    pub daemon: Arc<dyn DaemonPort>,

    // Wallet / 钱包
    pub wallet_loader: Arc<dyn WalletLoaderPort>,
    pub status: Arc<dyn StartupStatusPort>,

    // Sub-flows / 子流程
    pub subflows: Arc<dyn SubflowPort>,

    // UI / 界面
    pub error_page: Arc<dyn ErrorPagePort>,
    pub event_port: Arc<dyn StartupEventPort>,
}
