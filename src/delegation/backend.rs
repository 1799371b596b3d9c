// ==========================================
// 印刷拼版 UPS 优化 - 外部求解服务接口
// ==========================================
// 职责: 提交 / 状态查询 / 健康检查
// 实现: HttpDelegationBackend (reqwest); 测试中可替换为内存实现
// ==========================================

use crate::delegation::error::{DelegationError, DelegationResult};
use crate::delegation::wire::{SubmitResponse, TaskStatus, WireRequest, WireResult, WireSummary};
use async_trait::async_trait;

/// 提交结果
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 异步服务: 返回任务号, 需轮询
    Pending { task_id: String },
    /// 同步服务: 直接返回结果
    Completed {
        results: Vec<WireResult>,
        summary: Option<WireSummary>,
    },
}

impl TryFrom<SubmitResponse> for SubmitOutcome {
    type Error = DelegationError;

    fn try_from(response: SubmitResponse) -> DelegationResult<Self> {
        if let Some(error) = response.error {
            return Err(DelegationError::Remote(error));
        }
        if let Some(results) = response.results {
            return Ok(SubmitOutcome::Completed {
                results,
                summary: response.summary,
            });
        }
        match response.task_id {
            Some(task_id) if !task_id.trim().is_empty() => Ok(SubmitOutcome::Pending { task_id }),
            _ => Err(DelegationError::MissingTaskId),
        }
    }
}

// ==========================================
// Trait: DelegationBackend
// ==========================================
#[async_trait]
pub trait DelegationBackend: Send + Sync {
    /// 提交求解请求
    async fn submit(&self, request: &WireRequest) -> DelegationResult<SubmitOutcome>;

    /// 查询任务状态
    async fn poll(&self, task_id: &str) -> DelegationResult<TaskStatus>;

    /// 健康检查
    async fn health_check(&self) -> DelegationResult<()>;
}
