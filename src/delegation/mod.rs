// ==========================================
// 印刷拼版 UPS 优化 - 外部求解服务
// ==========================================
// 职责: 大规模请求委托外部求解服务 (提交 + 轮询)
// ==========================================

pub mod backend;
pub mod client;
pub mod error;
pub mod http;
pub mod wire;

pub use backend::{DelegationBackend, SubmitOutcome};
pub use client::{DelegationClient, PollPolicy};
pub use error::{DelegationError, DelegationResult};
pub use http::HttpDelegationBackend;
pub use wire::{SubmitResponse, TaskStatus, WireRequest, WireResult, WireSummary};
