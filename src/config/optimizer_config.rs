// ==========================================
// 印刷拼版 UPS 优化 - 优化器配置结构
// ==========================================
// 分段: defaults (命令行默认) / search (本地搜索) / delegation (外部求解)
// 缺省字段均取默认值
// ==========================================

use crate::domain::types::SearchMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 优化器配置（JSON 文件, 字段均有默认值）
///
/// 示例:
/// ```json
/// {
///   "delegation": { "enabled": true, "base_url": "http://192.168.2.57:5200" },
///   "search": { "max_exhaustive_items": 12 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OptimizerConfig {
    #[serde(default)]
    pub defaults: RequestDefaults,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub delegation: DelegationConfig,
}

/// 命令行未指定时使用的请求参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDefaults {
    #[serde(default = "default_slots_per_plate")]
    pub slots_per_plate: u32,

    #[serde(default = "default_plate_count")]
    pub plate_count: u32,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            slots_per_plate: default_slots_per_plate(),
            plate_count: default_plate_count(),
        }
    }
}

/// 本地搜索参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// 多版时本地穷举的需求条目上限; 超过则仅用贪心
    #[serde(default = "default_max_exhaustive_items")]
    pub max_exhaustive_items: usize,

    /// 多版时的搜索模式; greedy_only 时始终跳过穷举
    #[serde(default)]
    pub mode: SearchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_exhaustive_items: default_max_exhaustive_items(),
            mode: SearchMode::default(),
        }
    }
}

/// 外部求解服务参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegationConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 需求条目数 >= min_items 才委托
    #[serde(default = "default_min_items")]
    pub min_items: usize,

    /// 印版数 >= min_plates 才委托
    #[serde(default = "default_min_plates")]
    pub min_plates: u32,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,

    /// 单次 HTTP 请求超时
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// 委托失败时是否回退本地计算
    #[serde(default = "default_true")]
    pub fallback_to_local: bool,
}

impl Default for DelegationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_base_url(),
            min_items: default_min_items(),
            min_plates: default_min_plates(),
            poll_interval_ms: default_poll_interval_ms(),
            max_wait_secs: default_max_wait_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            fallback_to_local: true,
        }
    }
}

impl DelegationConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_secs(self.max_wait_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// 是否应委托外部服务
    pub fn should_delegate(&self, item_count: usize, plate_count: u32) -> bool {
        self.enabled && item_count >= self.min_items && plate_count >= self.min_plates
    }
}

fn default_slots_per_plate() -> u32 {
    10
}

fn default_plate_count() -> u32 {
    1
}

fn default_max_exhaustive_items() -> usize {
    12
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_min_items() -> usize {
    10
}

fn default_min_plates() -> u32 {
    2
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_max_wait_secs() -> u64 {
    30 * 60
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}
