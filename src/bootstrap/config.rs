//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into StartupConfig DTO / 将 TOML 解析为 StartupConfig DTO
//! - ✅ Overlay command line RPC flags on the `[remote]` section / 命令行覆盖远程配置
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//!
//! > **Pure data loading only. Accept whatever is in the file.**
//! > **仅纯数据加载。接受文件中的任何内容。**

use anyhow::Context;
use std::path::PathBuf;

use gs_core::config::RemoteConfig;
use gs_core::{RpcCredentials, StartupConfig};

use super::cli::CliOptions;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// **NO validation is performed**: empty strings and a zero port are facts.
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<StartupConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    StartupConfig::from_toml(&toml_value)
}

/// Remote daemon to connect to, if any.
///
/// Each command line flag replaces the matching `[remote]` field. The remote
/// counts as present when a flag was passed or the file section is not empty.
pub fn resolve_remote(config: &StartupConfig, cli: &CliOptions) -> Option<RpcCredentials> {
    if !cli.rpc_present() && config.remote.is_empty() {
        return None;
    }

    let RemoteConfig {
        rpc_user,
        rpc_pass,
        rpc_cert,
        rpc_host,
        rpc_port,
    } = config.remote.clone();

    Some(RpcCredentials {
        rpc_user: cli.rpc_user.clone().unwrap_or(rpc_user),
        rpc_pass: cli.rpc_pass.clone().unwrap_or(rpc_pass),
        rpc_cert: cli.rpc_cert.clone().unwrap_or(rpc_cert),
        rpc_host: cli.rpc_host.clone().unwrap_or(rpc_host),
        rpc_port: cli.rpc_port.unwrap_or(rpc_port),
    })
}
