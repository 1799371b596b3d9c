// ==========================================
// 印刷拼版 UPS 优化 - 配置层
// ==========================================
// 职责: 优化器配置 (默认参数 / 搜索上限 / 外部求解服务)
// 存储: JSON 配置文件 + 环境变量
// ==========================================

pub mod config_manager;
pub mod optimizer_config;

// 重导出核心配置管理器
pub use config_manager::{default_config_path, env_keys, ConfigError, ConfigManager};
pub use optimizer_config::{DelegationConfig, OptimizerConfig, RequestDefaults, SearchConfig};
