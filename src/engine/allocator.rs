// ==========================================
// 印刷拼版 UPS 优化 - 按比例出数分配
// ==========================================
// 输入: 一组需求数量 + 每版出数
// 输出: 每个需求的出数 (>=1), 合计严格等于每版出数
// ==========================================
// 规则:
// 1) 初值 = max(1, round(q / Σq × U))
// 2) 合计不足: 反复给当前最小者 +1
// 3) 合计超出: 反复给当前最大者 -1 (不低于 1), 无法再减则不可行
// 并列时取第一个下标
// ==========================================

use crate::engine::error::{EngineError, EngineResult};

/// 按需求比例分配出数
///
/// # 参数
/// - `quantities`: 组内各需求数量（均 > 0）
/// - `slot_budget`: 每版出数
///
/// # 返回
/// - Ok(Vec<u32>): 与 quantities 一一对应, 合计 = slot_budget; 空组返回空
/// - Err(InfeasiblePacking): 条目数超过出数, 无法保证每条至少 1
/// - Err(Internal): 数量合计溢出
pub fn allocate_slots(quantities: &[u64], slot_budget: u32) -> EngineResult<Vec<u32>> {
    if quantities.is_empty() {
        return Ok(Vec::new());
    }

    let total = quantities
        .iter()
        .try_fold(0u64, |acc, &q| acc.checked_add(q))
        .ok_or_else(|| EngineError::Internal("需求数量合计溢出".to_string()))?;
    let budget = slot_budget as f64;

    let mut slots: Vec<u32> = quantities
        .iter()
        .map(|&q| {
            let share = if total == 0 {
                0.0
            } else {
                q as f64 / total as f64 * budget
            };
            // 四舍五入 (0.5 向上)
            ((share + 0.5).floor() as u32).max(1)
        })
        .collect();

    let mut sum: u32 = slots.iter().sum();

    while sum < slot_budget {
        let idx = index_of_min(&slots);
        slots[idx] += 1;
        sum += 1;
    }

    while sum > slot_budget {
        let idx = index_of_max(&slots);
        if slots[idx] <= 1 {
            return Err(EngineError::InfeasiblePacking {
                item_count: quantities.len(),
                slot_budget,
            });
        }
        slots[idx] -= 1;
        sum -= 1;
    }

    Ok(slots)
}

/// 第一个最小值下标 (调用方保证非空)
fn index_of_min(values: &[u32]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v < values[best] {
            best = i;
        }
    }
    best
}

/// 第一个最大值下标 (调用方保证非空)
fn index_of_max(values: &[u32]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_proportional_exact() {
        // 10/30×10=3.33→3, 15/30×10=5, 5/30×10=1.67→2
        let slots = allocate_slots(&[10, 15, 5], 10).unwrap();
        assert_eq!(slots, vec![3, 5, 2]);
    }

    #[test]
    fn test_allocate_increments_first_smallest() {
        // 1/3×10=3.33→3 ×3 = 9, 补 1 给第一个最小
        let slots = allocate_slots(&[5, 5, 5], 10).unwrap();
        assert_eq!(slots, vec![4, 3, 3]);
    }

    #[test]
    fn test_allocate_decrements_first_largest() {
        // 各 0.5×3=1.5→2, 合计 4 > 3, 第一个最大者 -1
        let slots = allocate_slots(&[1, 1], 3).unwrap();
        assert_eq!(slots, vec![1, 2]);
    }

    #[test]
    fn test_allocate_minimum_one_slot() {
        // 极小需求也至少 1 出数
        let slots = allocate_slots(&[1000, 1], 10).unwrap();
        assert_eq!(slots.iter().sum::<u32>(), 10);
        assert!(slots.iter().all(|&s| s >= 1));
        assert_eq!(slots, vec![9, 1]);
    }

    #[test]
    fn test_allocate_single_item_takes_all() {
        assert_eq!(allocate_slots(&[7], 12).unwrap(), vec![12]);
    }

    #[test]
    fn test_allocate_items_equal_budget() {
        let slots = allocate_slots(&[100, 1, 1, 1], 4).unwrap();
        assert_eq!(slots, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_allocate_infeasible_when_items_exceed_budget() {
        let quantities = vec![10u64; 15];
        let err = allocate_slots(&quantities, 10).unwrap_err();
        assert_eq!(
            err,
            EngineError::InfeasiblePacking {
                item_count: 15,
                slot_budget: 10
            }
        );
    }

    #[test]
    fn test_allocate_total_overflow_is_error() {
        let err = allocate_slots(&[u64::MAX / 2, u64::MAX / 2, 10], 10).unwrap_err();
        assert!(matches!(err, EngineError::Internal(_)));
    }

    #[test]
    fn test_allocate_empty_group() {
        assert!(allocate_slots(&[], 10).unwrap().is_empty());
    }
}
