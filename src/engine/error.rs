// ==========================================
// 印刷拼版 UPS 优化 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 每版出数上限
pub const MAX_SLOTS_PER_PLATE: u32 = 50;

/// 需求总数量上限
pub const MAX_TOTAL_QUANTITY: u64 = 1_000_000_000_000;

/// 引擎错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    // ===== 配置错误（搜索前拒绝） =====
    #[error("印版数量无效: {0}（至少为 1）")]
    InvalidPlateCount(u32),

    #[error("每版出数无效: {value}（有效范围 [1, {max}]）")]
    InvalidSlotBudget { value: u32, max: u32 },

    // ===== 需求错误 =====
    #[error("无可优化的需求: 需求为空或数量均为 0")]
    NothingToOptimize,

    #[error("需求总数量超出范围: 上限 {max}")]
    QuantityOutOfRange { max: u64 },

    // ===== 不可行 =====
    #[error("单版无法容纳: {item_count} 个需求条目, 每版出数仅 {slot_budget}")]
    InfeasiblePacking { item_count: usize, slot_budget: u32 },

    #[error("无可行分组: {plate_count} 块印版 × 每版 {slot_budget} 出数无法容纳全部需求")]
    Infeasible { plate_count: u32, slot_budget: u32 },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    Internal(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
