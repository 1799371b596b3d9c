// ==========================================
// 印刷拼版 UPS 优化 - 核心库
// ==========================================
// 职责: 将颜色/尺码需求分配到印版并确定每版出数, 使总印次最少
// 路径: 导入 → 路由 (外部求解 / 本地引擎) → 汇总 → 导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分组搜索与出数分配
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 外部求解服务
pub mod delegation;

// API 层 - 优化服务
pub mod api;

// 导出层 - 结果报表
pub mod export;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{SearchMode, SolveSource};

// 领域实体
pub use domain::{
    Attachment, Attachments, DemandItem, OptimizationOutcome, OptimizationRequest,
    OptimizationResponse, OptimizationResult, OptimizationSummary, PlateLabel, PlateSummary,
    SearchStats,
};

// 引擎
pub use engine::{EngineError, PlateOptimizer, SearchController};

// API
pub use api::{ApiError, OptimizeApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "印刷拼版 UPS 优化";
