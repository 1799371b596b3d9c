// ==========================================
// 印刷拼版 UPS 优化 - 领域模型层
// ==========================================
// 职责: 定义需求、印版、结果等领域实体
// 红线: 不含引擎逻辑, 不含 IO
// ==========================================

pub mod demand;
pub mod plate;
pub mod result;
pub mod types;

// 重导出核心类型
pub use demand::{Attachment, Attachments, DemandItem, DemandKey, OptimizationRequest};
pub use plate::{PlateAssignment, PlateLabel, PlatePlan};
pub use result::{
    waste_percentage, OptimizationOutcome, OptimizationResponse, OptimizationResult,
    OptimizationSummary, PlateSummary, SearchStats,
};
pub use types::{SearchMode, SolveSource};
