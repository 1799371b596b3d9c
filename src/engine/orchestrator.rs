// ==========================================
// 印刷拼版 UPS 优化 - 本地引擎编排器
// ==========================================
// 用途: 校验请求 → 分组搜索 → 结果汇总
// 红线: 配置非法 / 无需求时在搜索前拒绝
// 红线: 纯函数, 无 IO、无共享可变状态, 可并发调用
// ==========================================
// 注意: 穷举模式为指数复杂度, 调用方负责限制输入规模
// ==========================================

use crate::domain::demand::{DemandItem, OptimizationRequest};
use crate::domain::result::{OptimizationResponse, SearchStats};
use crate::domain::types::{SearchMode, SolveSource};
use crate::engine::error::{
    EngineError, EngineResult, MAX_SLOTS_PER_PLATE, MAX_TOTAL_QUANTITY,
};
use crate::engine::metrics::aggregate;
use crate::engine::search::SearchController;
use tracing::{debug, info, instrument, warn};

// ==========================================
// LocalSolution - 本地求解结果
// ==========================================
#[derive(Debug, Clone)]
pub struct LocalSolution {
    pub response: OptimizationResponse,
    pub stats: SearchStats,
    pub source: SolveSource,
}

// ==========================================
// PlateOptimizer - 本地引擎
// ==========================================
pub struct PlateOptimizer {
    // 无状态引擎，不需要注入依赖
}

impl PlateOptimizer {
    pub fn new() -> Self {
        Self {}
    }

    /// 校验请求并过滤数量为 0 的需求
    ///
    /// # 返回
    /// - Ok(Vec<DemandItem>): 参与优化的需求（保持输入顺序）
    /// - Err: 印版数 / 出数非法, 无有效需求, 或总数量超出上限
    pub fn validate(&self, request: &OptimizationRequest) -> EngineResult<Vec<DemandItem>> {
        if request.plate_count < 1 {
            return Err(EngineError::InvalidPlateCount(request.plate_count));
        }
        if request.slots_per_plate < 1 || request.slots_per_plate > MAX_SLOTS_PER_PLATE {
            return Err(EngineError::InvalidSlotBudget {
                value: request.slots_per_plate,
                max: MAX_SLOTS_PER_PLATE,
            });
        }

        let items: Vec<DemandItem> = request
            .items
            .iter()
            .filter(|item| item.quantity > 0)
            .cloned()
            .collect();

        let dropped = request.items.len() - items.len();
        if dropped > 0 {
            warn!(dropped, "已忽略数量为 0 的需求条目");
        }

        if items.is_empty() {
            return Err(EngineError::NothingToOptimize);
        }

        // 总量有界, 后续印次 / 产出计算不会溢出
        let total = items
            .iter()
            .try_fold(0u64, |acc, item| acc.checked_add(item.quantity));
        if !matches!(total, Some(t) if t <= MAX_TOTAL_QUANTITY) {
            return Err(EngineError::QuantityOutOfRange {
                max: MAX_TOTAL_QUANTITY,
            });
        }

        Ok(items)
    }

    /// 执行本地优化
    ///
    /// # 参数
    /// - request: 优化请求
    /// - mode: 搜索模式（单版时忽略）
    ///
    /// # 返回
    /// 汇总后的结果 + 搜索统计 + 求解来源
    #[instrument(skip(self, request), fields(
        items = request.items.len(),
        slots_per_plate = request.slots_per_plate,
        plate_count = request.plate_count
    ))]
    pub fn optimize(
        &self,
        request: &OptimizationRequest,
        mode: SearchMode,
    ) -> EngineResult<LocalSolution> {
        let items = self.validate(request)?;
        let quantities: Vec<u64> = items.iter().map(|i| i.quantity).collect();

        let source = match (request.plate_count, mode) {
            (1, _) => SolveSource::SinglePlate,
            (_, SearchMode::Exhaustive) => SolveSource::Exhaustive,
            (_, SearchMode::GreedyOnly) => SolveSource::Greedy,
        };
        debug!(%source, valid_items = items.len(), "开始本地优化");

        let controller = SearchController::new(
            request.slots_per_plate,
            request.plate_count as usize,
            mode,
        );
        let outcome = controller.search(&quantities)?;

        let response = aggregate(
            &items,
            &outcome.assignment,
            request.slots_per_plate,
            request.plate_count,
        )?;

        info!(
            %source,
            total_runs = response.summary.total_runs,
            total_excess = response.summary.total_excess,
            waste_percentage = response.summary.waste_percentage,
            "本地优化完成"
        );

        Ok(LocalSolution {
            response,
            stats: outcome.stats,
            source,
        })
    }
}

impl Default for PlateOptimizer {
    fn default() -> Self {
        Self::new()
    }
}
