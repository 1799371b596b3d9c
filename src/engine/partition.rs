// ==========================================
// 印刷拼版 UPS 优化 - 分组枚举器
// ==========================================
// 职责: 惰性枚举 "N 个需求 → 恰好 K 个非空组" 的全部分法
// ==========================================
// 枚举方式: 按输入顺序逐个放置需求,
//   先尝试放入已开的组 (按开组顺序), 再尝试新开一组 (开组数 < K 时)
// 产出顺序与递归回溯完全一致; 组号按首次出现顺序编号,
// 因此同一集合划分只会出现一次
// 剪枝: 剩余需求不足以开满 K 组的分支直接跳过 (不改变产出顺序)
// ==========================================

/// K 组分法枚举器
///
/// 每次产出 `Vec<Vec<usize>>`: K 个组, 组内为需求下标 (升序)
pub struct KGroupPartitions {
    item_count: usize,
    group_count: usize,
    // assignment[i] = 第 i 个需求所在组号
    assignment: Vec<usize>,
    started: bool,
    done: bool,
}

impl KGroupPartitions {
    /// 创建枚举器
    ///
    /// # 参数
    /// - `item_count`: 需求条目数 N
    /// - `group_count`: 组数 K
    ///
    /// K == 0 或 K > N 时不产出任何分法
    pub fn new(item_count: usize, group_count: usize) -> Self {
        Self {
            item_count,
            group_count,
            assignment: vec![0; item_count],
            started: false,
            done: group_count == 0 || group_count > item_count,
        }
    }

    /// 从 start 位置起, 按字典序最小的可行选择填充剩余需求
    fn fill_from(&mut self, start: usize) {
        let mut open = self.open_before(start);
        for j in start..self.item_count {
            let remaining_after = self.item_count - j - 1;
            if open > 0 && open + remaining_after >= self.group_count {
                self.assignment[j] = 0;
            } else {
                self.assignment[j] = open;
                open += 1;
            }
        }
    }

    /// 放置第 index 个需求之前已开的组数
    fn open_before(&self, index: usize) -> usize {
        self.assignment[..index]
            .iter()
            .max()
            .map(|m| m + 1)
            .unwrap_or(0)
    }

    /// 推进到下一个分法; 没有更多分法时返回 false
    fn advance(&mut self) -> bool {
        for i in (0..self.item_count).rev() {
            let open = self.open_before(i);
            let next = self.assignment[i] + 1;
            if next <= open && next < self.group_count {
                self.assignment[i] = next;
                self.fill_from(i + 1);
                return true;
            }
        }
        false
    }

    fn materialize(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.group_count];
        for (item, &group) in self.assignment.iter().enumerate() {
            groups[group].push(item);
        }
        groups
    }
}

impl Iterator for KGroupPartitions {
    type Item = Vec<Vec<usize>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            self.fill_from(0);
        } else if !self.advance() {
            self.done = true;
            return None;
        }

        Some(self.materialize())
    }
}
