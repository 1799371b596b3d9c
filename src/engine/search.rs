// ==========================================
// 印刷拼版 UPS 优化 - 分组搜索控制器
// ==========================================
// 目标: 最小化 Σ 各版印刷次数
// 流程:
// 1) 贪心均衡分组作为基线, 给出初始上界
// 2) 穷举 K 组分法, 逐版累计印次, 达到上界即剪枝
// 3) 完整评估且严格更优的分法成为新最优, 上界随之收紧
// ==========================================
// 红线: 当前最优只在本次调用内持有, 引擎无全局状态
// 红线: 组内条目数超过每版出数的分法直接跳过
// ==========================================

use crate::domain::plate::{PlateAssignment, PlatePlan};
use crate::domain::result::SearchStats;
use crate::domain::types::SearchMode;
use crate::engine::allocator::allocate_slots;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::greedy::balanced_partition;
use crate::engine::partition::KGroupPartitions;
use crate::engine::run_calculator::runs_needed;
use tracing::{debug, info, instrument, warn};

/// 搜索结果
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub assignment: PlateAssignment,
    pub stats: SearchStats,
}

// ==========================================
// SearchController - 搜索控制器
// ==========================================
pub struct SearchController {
    slot_budget: u32,
    plate_count: usize,
    mode: SearchMode,
}

impl SearchController {
    pub fn new(slot_budget: u32, plate_count: usize, mode: SearchMode) -> Self {
        Self {
            slot_budget,
            plate_count,
            mode,
        }
    }

    /// 执行搜索
    ///
    /// # 参数
    /// - `quantities`: 全部需求数量（输入顺序, 均 > 0）
    ///
    /// # 返回
    /// - Ok(SearchOutcome): 最优分配 + 搜索统计
    /// - Err(InfeasiblePacking): 单版且条目数超过出数
    /// - Err(Infeasible): 多版但不存在可行分法
    #[instrument(skip(self, quantities), fields(
        items = quantities.len(),
        plates = self.plate_count,
        slot_budget = self.slot_budget,
        mode = ?self.mode
    ))]
    pub fn search(&self, quantities: &[u64]) -> EngineResult<SearchOutcome> {
        if self.plate_count == 1 {
            return self.single_plate(quantities);
        }

        let mut stats = SearchStats::default();

        // 1. 贪心基线
        let seed = self.greedy_seed(quantities)?;
        stats.seed_total_runs = seed.as_ref().map(|s| s.total_runs());
        match stats.seed_total_runs {
            Some(total) => debug!(seed_total_runs = total, "贪心基线完成"),
            None => warn!("贪心基线不可行（组内条目数超过每版出数），仅依赖穷举"),
        }

        let best = match self.mode {
            SearchMode::GreedyOnly => seed,
            SearchMode::Exhaustive => self.exhaustive(quantities, seed, &mut stats)?,
        };

        let assignment = best.ok_or(EngineError::Infeasible {
            plate_count: self.plate_count as u32,
            slot_budget: self.slot_budget,
        })?;

        info!(
            total_runs = assignment.total_runs(),
            seed_total_runs = ?stats.seed_total_runs,
            visited = stats.candidates_visited,
            pruned = stats.candidates_pruned,
            infeasible = stats.candidates_infeasible,
            improvements = stats.improvements,
            "分组搜索完成"
        );

        Ok(SearchOutcome { assignment, stats })
    }

    /// 单版: 不枚举, 全部需求按输入顺序直接分配
    fn single_plate(&self, quantities: &[u64]) -> EngineResult<SearchOutcome> {
        let items: Vec<usize> = (0..quantities.len()).collect();
        let plate = evaluate_group(quantities, &items, self.slot_budget)?;
        let total = plate.runs;

        Ok(SearchOutcome {
            assignment: PlateAssignment {
                plates: vec![plate],
            },
            stats: SearchStats {
                seed_total_runs: Some(total),
                candidates_visited: 1,
                ..SearchStats::default()
            },
        })
    }

    /// 贪心基线; 任一组不可行时返回 None
    fn greedy_seed(&self, quantities: &[u64]) -> EngineResult<Option<PlateAssignment>> {
        let groups = balanced_partition(quantities, self.plate_count);
        let mut plates = Vec::with_capacity(groups.len());
        for group in &groups {
            match evaluate_group(quantities, group, self.slot_budget) {
                Ok(plate) => plates.push(plate),
                Err(EngineError::InfeasiblePacking { .. }) => return Ok(None),
                Err(e) => return Err(e),
            }
        }
        Ok(Some(PlateAssignment { plates }))
    }

    /// 穷举 + 剪枝
    fn exhaustive(
        &self,
        quantities: &[u64],
        seed: Option<PlateAssignment>,
        stats: &mut SearchStats,
    ) -> EngineResult<Option<PlateAssignment>> {
        let mut best_total = seed.as_ref().map(|s| s.total_runs());
        let mut best = seed;

        'candidates: for groups in KGroupPartitions::new(quantities.len(), self.plate_count) {
            stats.candidates_visited += 1;

            if groups
                .iter()
                .any(|g| g.len() > self.slot_budget as usize)
            {
                stats.candidates_infeasible += 1;
                continue;
            }

            let mut plates = Vec::with_capacity(groups.len());
            let mut running = 0u64;
            for group in &groups {
                let plate = match evaluate_group(quantities, group, self.slot_budget) {
                    Ok(plate) => plate,
                    Err(EngineError::InfeasiblePacking { .. }) => {
                        stats.candidates_infeasible += 1;
                        continue 'candidates;
                    }
                    Err(e) => return Err(e),
                };
                running += plate.runs;
                plates.push(plate);

                if matches!(best_total, Some(bound) if running >= bound) {
                    stats.candidates_pruned += 1;
                    continue 'candidates;
                }
            }

            debug!(
                total_runs = running,
                previous = ?best_total,
                visited = stats.candidates_visited,
                "发现更优分组"
            );
            stats.improvements += 1;
            best_total = Some(running);
            best = Some(PlateAssignment { plates });
        }

        Ok(best)
    }
}

/// 评估单个组: 分配出数 + 计算印次
pub(crate) fn evaluate_group(
    quantities: &[u64],
    group: &[usize],
    slot_budget: u32,
) -> EngineResult<PlatePlan> {
    if group.is_empty() {
        return Ok(PlatePlan::empty());
    }

    let group_quantities: Vec<u64> = group.iter().map(|&i| quantities[i]).collect();
    let slots = allocate_slots(&group_quantities, slot_budget)?;
    let runs = runs_needed(&group_quantities, &slots)?;

    Ok(PlatePlan {
        items: group.to_vec(),
        slots,
        runs,
    })
}
