// ==========================================
// 印刷拼版 UPS 优化 - 贪心均衡分组 (基线)
// ==========================================
// 规则: 按需求数量降序 (稳定排序), 依次放入当前累计数量最少的印版
// 并列时取第一块印版
// 用途: 穷举搜索的初始上界, 以及大规模输入的直接解
// ==========================================

/// 贪心均衡分组
///
/// # 参数
/// - `quantities`: 全部需求数量（输入顺序）
/// - `plate_count`: 印版数 K
///
/// # 返回
/// K 个组, 组内为需求下标, 顺序为放入顺序; 需求少于 K 时部分组为空
pub fn balanced_partition(quantities: &[u64], plate_count: usize) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); plate_count];
    if plate_count == 0 {
        return groups;
    }

    let mut loads = vec![0u64; plate_count];

    let mut order: Vec<usize> = (0..quantities.len()).collect();
    order.sort_by(|&a, &b| quantities[b].cmp(&quantities[a]));

    for idx in order {
        let lightest = lightest_plate(&loads);
        groups[lightest].push(idx);
        loads[lightest] += quantities[idx];
    }

    groups
}

fn lightest_plate(loads: &[u64]) -> usize {
    let mut best = 0;
    for (i, load) in loads.iter().enumerate() {
        if *load < loads[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_first_balancing() {
        // 降序: 15(1), 10(0), 5(2)
        // 15→A, 10→B, 5→B (B=10 < A=15)
        let groups = balanced_partition(&[10, 15, 5], 2);
        assert_eq!(groups, vec![vec![1], vec![0, 2]]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let groups = balanced_partition(&[5, 5, 5, 5], 2);
        assert_eq!(groups, vec![vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn test_more_plates_than_items_leaves_empty_groups() {
        let groups = balanced_partition(&[3, 7], 4);
        assert_eq!(groups, vec![vec![1], vec![0], vec![], vec![]]);
    }
}
