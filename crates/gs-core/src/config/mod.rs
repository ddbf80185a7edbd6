//! # Pure Data Module / 纯数据模块
//!
//! Configuration DTOs mapped from TOML. No validation, no policy, no default
//! value calculation: a missing key is an empty value, and deciding what an
//! empty value means is the caller's job.
//!
//! 此模块只包含数据结构定义，禁止：业务逻辑、验证逻辑、默认值计算。

use std::path::PathBuf;

use crate::startup::StartupFlags;

/// Startup configuration DTO (pure data, no logic)
/// 启动配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub spv: bool,
    pub advanced_daemon: bool,
    pub testnet: bool,

    /// Daemon data directory (path info only, no existence check)
    /// 守护进程数据目录（仅路径信息，不检查是否存在）
    pub appdata: PathBuf,

    /// Remote daemon section. Empty strings are valid facts.
    pub remote: RemoteConfig,

    /// Delay before a fatal daemon error leaves the flow, when configured.
    pub error_page_grace_ms: Option<u64>,
}

/// `[remote]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteConfig {
    pub rpc_user: String,
    pub rpc_pass: String,
    pub rpc_cert: PathBuf,
    pub rpc_host: String,
    pub rpc_port: u16,
}

impl RemoteConfig {
    /// Whether any field was given.
    pub fn is_empty(&self) -> bool {
        self == &RemoteConfig::default()
    }
}

impl StartupConfig {
    /// Create StartupConfig from TOML value
    /// 从 TOML 值创建 StartupConfig
    ///
    /// **Prohibited / 禁止**: no validation or defaults beyond "missing is empty".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let startup = toml_value.get("startup");
        let remote = toml_value.get("remote");

        let flag = |key: &str| {
            startup
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        };
        let remote_str = |key: &str| {
            remote
                .and_then(|r| r.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            spv: flag("spv"),
            advanced_daemon: flag("advanced_daemon"),
            testnet: flag("testnet"),
            appdata: PathBuf::from(
                startup
                    .and_then(|s| s.get("appdata"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            remote: RemoteConfig {
                rpc_user: remote_str("rpc_user"),
                rpc_pass: remote_str("rpc_pass"),
                rpc_cert: PathBuf::from(remote_str("rpc_cert")),
                rpc_host: remote_str("rpc_host"),
                rpc_port: remote
                    .and_then(|r| r.get("rpc_port"))
                    .and_then(|v| v.as_integer())
                    .unwrap_or(0) as u16,
            },
            error_page_grace_ms: toml_value
                .get("timing")
                .and_then(|t| t.get("error_page_grace_ms"))
                .and_then(|v| v.as_integer())
                .map(|ms| ms as u64),
        })
    }

    /// Create empty StartupConfig (all empty/default values)
    /// 创建空的 StartupConfig
    pub fn empty() -> Self {
        Self {
            spv: false,
            advanced_daemon: false,
            testnet: false,
            appdata: PathBuf::new(),
            remote: RemoteConfig::default(),
            error_page_grace_ms: None,
        }
    }

    pub fn flags(&self) -> StartupFlags {
        StartupFlags {
            is_spv: self.spv,
            is_advanced_daemon: self.advanced_daemon,
            is_testnet: self.testnet,
        }
    }
}
