// ==========================================
// 印刷拼版 UPS 优化 - 优化服务 API
// ==========================================
// 职责: 请求路由 (外部求解 / 本地引擎) + 回退策略
// 路由: 启用外部服务 且 条目数 >= min_items 且 印版数 >= min_plates → 委托
// 回退: 委托失败且 fallback_to_local → 本地计算; 否则返回错误
// 本地: CPU 密集计算放在 blocking 线程池
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::OptimizerConfig;
use crate::delegation::{DelegationBackend, DelegationClient, HttpDelegationBackend, PollPolicy};
use crate::domain::demand::OptimizationRequest;
use crate::domain::result::OptimizationOutcome;
use crate::domain::types::{SearchMode, SolveSource};
use crate::engine::{LocalSolution, PlateOptimizer};
use chrono::Utc;
use std::time::Instant;
use tracing::{info, instrument, warn, Span};
use uuid::Uuid;

/// 优化服务 API
pub struct OptimizeApi<B: DelegationBackend> {
    config: OptimizerConfig,
    delegation: Option<DelegationClient<B>>,
}

impl OptimizeApi<HttpDelegationBackend> {
    /// 按配置创建; 外部服务未启用时仅本地计算
    pub fn from_config(config: OptimizerConfig) -> ApiResult<Self> {
        let delegation = if config.delegation.enabled {
            let backend = HttpDelegationBackend::from_config(&config.delegation)?;
            info!(base_url = %backend.base_url(), "外部求解服务已启用");
            Some(DelegationClient::new(
                backend,
                PollPolicy::from(&config.delegation),
            ))
        } else {
            None
        };

        Ok(Self { config, delegation })
    }
}

impl<B: DelegationBackend> OptimizeApi<B> {
    pub fn new(config: OptimizerConfig, delegation: Option<DelegationClient<B>>) -> Self {
        Self { config, delegation }
    }

    /// 仅本地计算
    pub fn local_only(config: OptimizerConfig) -> Self {
        Self::new(config, None)
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// 执行优化
    ///
    /// # 返回
    /// - Ok(OptimizationOutcome): 结果 + 求解来源 + 搜索统计 + 耗时
    /// - Err(ApiError): 请求非法 / 无可行方案 / 委托失败且不回退
    #[instrument(skip(self, request), fields(request_id))]
    pub async fn optimize(&self, request: OptimizationRequest) -> ApiResult<OptimizationOutcome> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());
        let started = Instant::now();

        // 配置非法 / 无有效需求时不委托也不计算
        let items = PlateOptimizer::new().validate(&request)?;
        let request = OptimizationRequest { items, ..request };

        info!(
            items = request.items.len(),
            slots_per_plate = request.slots_per_plate,
            plate_count = request.plate_count,
            "收到优化请求"
        );

        if let Some(client) = self.delegation_for(&request) {
            match client.run(&request).await {
                Ok(response) => {
                    return Ok(OptimizationOutcome {
                        request_id,
                        source: SolveSource::Delegated,
                        response,
                        stats: None,
                        elapsed_ms: started.elapsed().as_millis() as u64,
                        completed_at: Utc::now(),
                    });
                }
                Err(e) if self.config.delegation.fallback_to_local => {
                    warn!(error = %e, "外部求解失败, 回退本地计算");
                }
                Err(e) => return Err(ApiError::Delegation(e)),
            }
        }

        let solution = self.optimize_local(request).await?;

        Ok(OptimizationOutcome {
            request_id,
            source: solution.source,
            response: solution.response,
            stats: Some(solution.stats),
            elapsed_ms: started.elapsed().as_millis() as u64,
            completed_at: Utc::now(),
        })
    }

    /// 检查外部服务是否可用（未启用时为 false）
    pub async fn delegation_available(&self) -> bool {
        match &self.delegation {
            Some(client) => client.is_available().await,
            None => false,
        }
    }

    fn delegation_for(&self, request: &OptimizationRequest) -> Option<&DelegationClient<B>> {
        let delegate = self
            .config
            .delegation
            .should_delegate(request.items.len(), request.plate_count);
        self.delegation.as_ref().filter(|_| delegate)
    }

    /// 本地搜索模式: 按配置; 多版且超过穷举上限时仅用贪心
    pub fn local_mode(&self, request: &OptimizationRequest) -> SearchMode {
        if request.plate_count > 1 && request.items.len() > self.config.search.max_exhaustive_items
        {
            SearchMode::GreedyOnly
        } else {
            self.config.search.mode
        }
    }

    async fn optimize_local(&self, request: OptimizationRequest) -> ApiResult<LocalSolution> {
        let mode = self.local_mode(&request);
        if mode == SearchMode::GreedyOnly {
            info!(
                items = request.items.len(),
                max_exhaustive_items = self.config.search.max_exhaustive_items,
                "条目数超过穷举上限, 使用贪心方案"
            );
        }

        let span = Span::current();
        let solution = tokio::task::spawn_blocking(move || {
            let _guard = span.enter();
            PlateOptimizer::new().optimize(&request, mode)
        })
        .await??;

        Ok(solution)
    }
}
