// ==========================================
// 印刷拼版 UPS 优化 - 优化结果领域模型
// ==========================================
// 职责: 单条结果 / 汇总 / 单版汇总 / 搜索统计
// 红线: produced = slots × runs >= quantity, excess >= 0
// ==========================================

use crate::domain::demand::Attachments;
use crate::domain::plate::PlateLabel;
use crate::domain::types::SolveSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// OptimizationResult - 单条结果 (印版 × 需求)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub color: String,
    pub size: String,
    pub quantity: u64,           // 需求数量
    pub plate_label: PlateLabel, // 所在印版
    pub allocated_slots: u32,    // 分配出数
    pub runs_needed: u64,        // 所在印版印刷次数
    pub produced: u64,           // 实际产出
    pub excess: u64,             // 超产

    #[serde(default, skip_serializing_if = "Attachments::is_empty")]
    pub attachments: Attachments,
}

// ==========================================
// OptimizationSummary - 汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSummary {
    pub total_runs: u64,
    pub total_produced: u64,
    pub total_excess: u64,
    pub waste_percentage: f64, // 超产 / 产出 × 100, 保留两位小数
    pub total_required: u64,
    pub slot_capacity: u32,
    pub plate_count: u32,
}

// ==========================================
// PlateSummary - 单版汇总
// ==========================================
// 空版 (印版数 > 需求条数) 也保留一行, 各项为 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateSummary {
    pub plate_label: PlateLabel,
    pub item_count: usize,
    pub runs: u64,
    pub slots_used: u32,
    pub produced: u64,
    pub excess: u64,
}

// ==========================================
// OptimizationResponse - 引擎输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResponse {
    pub results: Vec<OptimizationResult>,
    pub summary: OptimizationSummary,
    #[serde(default)]
    pub plates: Vec<PlateSummary>,
}

// ==========================================
// SearchStats - 搜索统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub seed_total_runs: Option<u64>, // 贪心基线总印次 (不可行时为 None)
    pub candidates_visited: u64,
    pub candidates_pruned: u64,
    pub candidates_infeasible: u64,
    pub improvements: u64, // 优于基线的次数
}

// ==========================================
// OptimizationOutcome - 服务层输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOutcome {
    pub request_id: String,
    pub source: SolveSource,
    pub response: OptimizationResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<SearchStats>,
    pub elapsed_ms: u64,
    pub completed_at: DateTime<Utc>,
}

/// 浪费率 = 超产 / 产出 × 100, 四舍五入保留两位小数; 产出为 0 时为 0
pub fn waste_percentage(total_excess: u64, total_produced: u64) -> f64 {
    if total_produced == 0 {
        return 0.0;
    }
    let pct = total_excess as f64 / total_produced as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
