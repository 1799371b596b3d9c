// ==========================================
// 印刷拼版 UPS 优化 - 外部求解客户端
// ==========================================
// 流程: 提交 → (同步结果 | 按固定间隔轮询) → 映射回领域结果
// 终止: 结果就绪 / 远端报告失败 / 超过最长等待
// ==========================================

use crate::config::DelegationConfig;
use crate::delegation::backend::{DelegationBackend, SubmitOutcome};
use crate::delegation::error::{DelegationError, DelegationResult};
use crate::delegation::wire::{into_response, WireRequest, WireResult, WireSummary};
use crate::domain::demand::OptimizationRequest;
use crate::domain::result::OptimizationResponse;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

/// 轮询策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_wait: Duration,
}

impl From<&DelegationConfig> for PollPolicy {
    fn from(config: &DelegationConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            max_wait: config.max_wait(),
        }
    }
}

// ==========================================
// DelegationClient
// ==========================================
pub struct DelegationClient<B: DelegationBackend> {
    backend: B,
    policy: PollPolicy,
}

impl<B: DelegationBackend> DelegationClient<B> {
    pub fn new(backend: B, policy: PollPolicy) -> Self {
        Self { backend, policy }
    }

    /// 委托外部服务求解
    ///
    /// # 返回
    /// - Ok: 完整结果（映射为领域结果）
    /// - Err: 任一环节失败; 不返回部分结果
    #[instrument(skip(self, request), fields(items = request.items.len(), plates = request.plate_count))]
    pub async fn run(&self, request: &OptimizationRequest) -> DelegationResult<OptimizationResponse> {
        let wire = WireRequest::from(request);

        let task_id = match self.backend.submit(&wire).await? {
            SubmitOutcome::Completed { results, summary } => {
                info!("外部服务同步返回结果");
                return finish(results, summary, request);
            }
            SubmitOutcome::Pending { task_id } => task_id,
        };

        info!(task_id = %task_id, "已提交外部求解任务");
        let started = Instant::now();
        let deadline = started + self.policy.max_wait;

        loop {
            let status = self.backend.poll(&task_id).await?;

            if let Some(reason) = status.failure() {
                warn!(task_id = %task_id, reason = %reason, "外部求解失败");
                return Err(DelegationError::Remote(reason));
            }

            if let Some(results) = status.results {
                info!(
                    task_id = %task_id,
                    waited_ms = started.elapsed().as_millis() as u64,
                    "外部求解完成"
                );
                return finish(results, status.summary, request);
            }

            if Instant::now() >= deadline {
                let waited = started.elapsed();
                warn!(task_id = %task_id, ?waited, "外部求解超时");
                return Err(DelegationError::Timeout { waited });
            }

            debug!(
                task_id = %task_id,
                status = ?status.status,
                estimated_secs = ?status.estimated_time_seconds,
                "任务未完成, 继续轮询"
            );
            sleep(self.policy.interval).await;
        }
    }

    /// 检查外部服务是否可用
    pub async fn is_available(&self) -> bool {
        match self.backend.health_check().await {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "外部服务不可用");
                false
            }
        }
    }
}

fn finish(
    results: Vec<WireResult>,
    summary: Option<WireSummary>,
    request: &OptimizationRequest,
) -> DelegationResult<OptimizationResponse> {
    let response = into_response(results, request)?;

    // 外部汇总仅用于对账
    if let Some(total_sheets) = summary.and_then(|s| s.total_sheets) {
        if total_sheets != response.summary.total_runs {
            warn!(
                remote = total_sheets,
                computed = response.summary.total_runs,
                "外部汇总印次与结果行不一致, 以结果行为准"
            );
        }
    }

    Ok(response)
}
