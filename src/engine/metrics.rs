// ==========================================
// 印刷拼版 UPS 优化 - 结果汇总
// ==========================================
// 输入: 需求列表 + 最优分配方案
// 输出: 每 (印版, 需求) 一条结果 + 汇总 + 单版汇总
// ==========================================

use crate::domain::demand::DemandItem;
use crate::domain::plate::{PlateAssignment, PlateLabel};
use crate::domain::result::{
    waste_percentage, OptimizationResponse, OptimizationResult, OptimizationSummary,
    PlateSummary,
};
use crate::engine::error::{EngineError, EngineResult};

/// 汇总分配方案
///
/// # 参数
/// - `items`: 需求列表（PlatePlan.items 为其下标）
/// - `assignment`: 分配方案
/// - `slot_budget`: 每版出数
/// - `plate_count`: 请求的印版数
///
/// 结果按印版顺序、组内顺序输出; 标签按印版位置生成
pub fn aggregate(
    items: &[DemandItem],
    assignment: &PlateAssignment,
    slot_budget: u32,
    plate_count: u32,
) -> EngineResult<OptimizationResponse> {
    let mut results = Vec::new();
    let mut plates = Vec::with_capacity(assignment.plates.len());

    for (plate_index, plate) in assignment.plates.iter().enumerate() {
        let label = PlateLabel::from_index(plate_index);
        let mut plate_produced = 0u64;
        let mut plate_excess = 0u64;

        for (&item_index, &slots) in plate.items.iter().zip(&plate.slots) {
            let item = items.get(item_index).ok_or_else(|| {
                EngineError::Internal(format!("需求下标越界: {}", item_index))
            })?;

            let produced = (slots as u64).checked_mul(plate.runs).ok_or_else(|| {
                EngineError::Internal(format!("产出数量溢出: {} 出数 × {} 印次", slots, plate.runs))
            })?;
            let excess = produced.checked_sub(item.quantity).ok_or_else(|| {
                EngineError::Internal(format!(
                    "产出不足: {} 需求 {}, 产出 {}",
                    item.key(),
                    item.quantity,
                    produced
                ))
            })?;

            plate_produced += produced;
            plate_excess += excess;

            results.push(OptimizationResult {
                color: item.color.clone(),
                size: item.size.clone(),
                quantity: item.quantity,
                plate_label: label.clone(),
                allocated_slots: slots,
                runs_needed: plate.runs,
                produced,
                excess,
                attachments: item.attachments.clone(),
            });
        }

        plates.push(PlateSummary {
            plate_label: label,
            item_count: plate.items.len(),
            runs: plate.runs,
            slots_used: plate.slots_used(),
            produced: plate_produced,
            excess: plate_excess,
        });
    }

    let total_required: u64 = items.iter().map(|i| i.quantity).sum();
    let total_produced: u64 = results.iter().map(|r| r.produced).sum();
    let total_excess = total_produced.saturating_sub(total_required);

    let summary = OptimizationSummary {
        total_runs: assignment.total_runs(),
        total_produced,
        total_excess,
        waste_percentage: waste_percentage(total_excess, total_produced),
        total_required,
        slot_capacity: slot_budget,
        plate_count,
    };

    Ok(OptimizationResponse {
        results,
        summary,
        plates,
    })
}
