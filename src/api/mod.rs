// ==========================================
// 印刷拼版 UPS 优化 - API 层
// ==========================================
// 职责: 提供优化服务接口, 供命令行及嵌入方调用
// ==========================================

pub mod error;
pub mod optimize_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use optimize_api::OptimizeApi;
