// ==========================================
// 印刷拼版 UPS 优化 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 搜索模式 (Search Mode)
// ==========================================
// 穷举模式为指数复杂度, 由调用方按规模选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Exhaustive, // 贪心基线 + 穷举剪枝
    GreedyOnly, // 仅贪心基线
}

impl Default for SearchMode {
    fn default() -> Self {
        SearchMode::Exhaustive
    }
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exhaustive" => Ok(SearchMode::Exhaustive),
            "greedy" | "greedy_only" | "greedy-only" => Ok(SearchMode::GreedyOnly),
            other => Err(format!("未知搜索模式: {}", other)),
        }
    }
}

// ==========================================
// 求解来源 (Solve Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveSource {
    SinglePlate, // 单版直接分配
    Exhaustive,  // 本地穷举
    Greedy,      // 本地贪心
    Delegated,   // 外部求解服务
}

impl fmt::Display for SolveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveSource::SinglePlate => write!(f, "single_plate"),
            SolveSource::Exhaustive => write!(f, "exhaustive"),
            SolveSource::Greedy => write!(f, "greedy"),
            SolveSource::Delegated => write!(f, "delegated"),
        }
    }
}
