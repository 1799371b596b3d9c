// ==========================================
// 印刷拼版 UPS 优化 - 外部求解服务 HTTP 实现
// ==========================================
// POST {base}/optimize-plates
// GET  {base}/task-status/{task_id}
// GET  {base}/
// ==========================================

use crate::config::DelegationConfig;
use crate::delegation::backend::{DelegationBackend, SubmitOutcome};
use crate::delegation::error::{DelegationError, DelegationResult};
use crate::delegation::wire::{SubmitResponse, TaskStatus, WireRequest};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct HttpDelegationBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDelegationBackend {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> DelegationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| DelegationError::Http(format!("创建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &DelegationConfig) -> DelegationResult<Self> {
        Self::new(config.base_url.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// 非 2xx 状态转为 HttpStatus 错误
async fn ensure_success(response: reqwest::Response) -> DelegationResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(DelegationError::HttpStatus {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DelegationBackend for HttpDelegationBackend {
    #[instrument(skip(self, request), fields(tags = request.tags.len()))]
    async fn submit(&self, request: &WireRequest) -> DelegationResult<SubmitOutcome> {
        let response = self
            .client
            .post(self.url("optimize-plates"))
            .json(request)
            .send()
            .await?;

        let body: SubmitResponse = ensure_success(response).await?.json().await?;
        debug!(task_id = ?body.task_id, "提交完成");
        SubmitOutcome::try_from(body)
    }

    #[instrument(skip(self))]
    async fn poll(&self, task_id: &str) -> DelegationResult<TaskStatus> {
        let response = self
            .client
            .get(self.url(&format!("task-status/{}", task_id)))
            .send()
            .await?;

        let status: TaskStatus = ensure_success(response).await?.json().await?;
        Ok(status)
    }

    async fn health_check(&self) -> DelegationResult<()> {
        let response = self.client.get(self.url("")).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}
