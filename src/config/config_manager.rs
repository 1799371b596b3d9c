// ==========================================
// 印刷拼版 UPS 优化 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、快照
// 来源优先级: 环境变量 > 配置文件 > 默认值
// 配置文件: $UPS_OPTIMIZER_CONFIG 或 <用户配置目录>/ups-optimizer/config.json
// ==========================================

use crate::config::optimizer_config::OptimizerConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// ==========================================
// 环境变量
// ==========================================
pub mod env_keys {
    /// 配置文件路径
    pub const CONFIG_PATH: &str = "UPS_OPTIMIZER_CONFIG";
    /// 外部求解服务地址
    pub const BACKEND_URL: &str = "UPS_OPTIMIZER_BACKEND_URL";
    /// 是否启用外部求解 (1/true/yes/on)
    pub const DELEGATION: &str = "UPS_OPTIMIZER_DELEGATION";
    /// 本地搜索模式 (exhaustive / greedy)
    pub const SEARCH_MODE: &str = "UPS_OPTIMIZER_SEARCH_MODE";
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    Read { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    Parse { path: String, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    source: Option<PathBuf>,
    config: OptimizerConfig,
}

impl ConfigManager {
    /// 按默认来源加载配置
    ///
    /// 1. $UPS_OPTIMIZER_CONFIG 指定的文件（必须存在）
    /// 2. 用户配置目录下的 config.json（不存在则用默认值）
    /// 3. 应用环境变量覆写
    pub fn load() -> Result<Self, ConfigError> {
        let mut manager = match std::env::var(env_keys::CONFIG_PATH) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    info!("未找到配置文件，使用默认配置");
                    Self::with_config(OptimizerConfig::default())
                }
            },
        };

        manager.apply_env_overrides()?;
        Ok(manager)
    }

    /// 从指定 JSON 文件加载（不应用环境变量）
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: OptimizerConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(path = %path.display(), "配置文件已加载");
        Ok(Self {
            source: Some(path.to_path_buf()),
            config,
        })
    }

    /// 直接使用给定配置（测试/嵌入场景）
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self {
            source: None,
            config,
        }
    }

    /// 应用环境变量覆写
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = std::env::var(env_keys::BACKEND_URL) {
            let url = url.trim();
            if !url.is_empty() {
                debug!(base_url = %url, "环境变量覆写外部服务地址");
                self.config.delegation.base_url = url.to_string();
            }
        }

        if let Ok(flag) = std::env::var(env_keys::DELEGATION) {
            self.config.delegation.enabled =
                parse_flag(&flag).ok_or_else(|| ConfigError::InvalidValue {
                    key: env_keys::DELEGATION.to_string(),
                    message: format!("无法解析为布尔值: {}", flag),
                })?;
        }

        if let Ok(mode) = std::env::var(env_keys::SEARCH_MODE) {
            self.config.search.mode = mode.parse().map_err(|message| ConfigError::InvalidValue {
                key: env_keys::SEARCH_MODE.to_string(),
                message,
            })?;
            debug!(mode = ?self.config.search.mode, "环境变量覆写搜索模式");
        }

        Ok(())
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn into_config(self) -> OptimizerConfig {
        self.config
    }

    /// 配置来源文件（默认值时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 获取配置快照（JSON 格式, 随结果一起记录便于复现）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        serde_json::to_string(&self.config).map_err(|e| ConfigError::InvalidValue {
            key: "snapshot".to_string(),
            message: e.to_string(),
        })
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ups-optimizer").join("config.json"))
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
