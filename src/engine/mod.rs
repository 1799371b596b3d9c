// ==========================================
// 印刷拼版 UPS 优化 - 引擎层
// ==========================================
// 职责: 分组枚举、出数分配、印次计算、分组搜索、结果汇总
// 红线: 引擎为纯计算, 不做 IO, 不持有跨请求状态
// ==========================================

pub mod allocator;
pub mod error;
pub mod greedy;
pub mod metrics;
pub mod orchestrator;
pub mod partition;
pub mod run_calculator;
pub mod search;

// 重导出核心引擎
pub use allocator::allocate_slots;
pub use error::{EngineError, EngineResult, MAX_SLOTS_PER_PLATE, MAX_TOTAL_QUANTITY};
pub use greedy::balanced_partition;
pub use metrics::aggregate;
pub use orchestrator::{LocalSolution, PlateOptimizer};
pub use partition::KGroupPartitions;
pub use run_calculator::runs_needed;
pub use search::{SearchController, SearchOutcome};
