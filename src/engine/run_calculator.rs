// ==========================================
// 印刷拼版 UPS 优化 - 印刷次数计算
// ==========================================
// runs = max_i ceil(q_i / slots_i)
// 即本版满足组内全部需求所需的最少印刷次数
// ==========================================

use crate::engine::error::{EngineError, EngineResult};

/// 计算单版印刷次数
///
/// # 参数
/// - `quantities`: 组内需求数量
/// - `slots`: 与 quantities 一一对应的出数（均 >= 1）
///
/// # 返回
/// 印刷次数; 空组为 0
pub fn runs_needed(quantities: &[u64], slots: &[u32]) -> EngineResult<u64> {
    if quantities.len() != slots.len() {
        return Err(EngineError::Internal(format!(
            "出数与需求条目数不一致: quantities={}, slots={}",
            quantities.len(),
            slots.len()
        )));
    }

    let mut runs = 0u64;
    for (&q, &s) in quantities.iter().zip(slots) {
        if s == 0 {
            return Err(EngineError::Internal("出数为 0, 无法计算印刷次数".to_string()));
        }
        runs = runs.max(q.div_ceil(s as u64));
    }
    Ok(runs)
}
