// ==========================================
// 印刷拼版 UPS 优化 - 印版领域模型
// ==========================================
// 职责: 印版标签 (A..Z, AA, AB ...) + 单版分配方案
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// ==========================================
// PlateLabel - 印版标签
// ==========================================
// 规则: 与电子表格列名一致, 仅由印版序号决定
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateLabel(String);

impl PlateLabel {
    /// 由从 0 开始的印版序号生成标签
    ///
    /// # 示例
    /// - 0 → "A"
    /// - 25 → "Z"
    /// - 26 → "AA"
    /// - 701 → "ZZ"
    /// - 702 → "AAA"
    pub fn from_index(index: usize) -> Self {
        let mut n = index + 1;
        let mut buf = Vec::new();
        while n > 0 {
            n -= 1;
            buf.push(LETTERS[n % 26]);
            n /= 26;
        }
        buf.reverse();
        // buf 只含 ASCII 大写字母
        Self(buf.into_iter().map(char::from).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlateLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ==========================================
// PlatePlan - 单版方案
// ==========================================
// items: 分到本版的需求下标 (原始输入顺序中的下标)
// slots: 与 items 一一对应的出数, 合计 = 每版出数
// runs: 本版印刷次数 (空版为 0)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatePlan {
    pub items: Vec<usize>,
    pub slots: Vec<u32>,
    pub runs: u64,
}

impl PlatePlan {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            slots: Vec::new(),
            runs: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn slots_used(&self) -> u32 {
        self.slots.iter().sum()
    }
}

// ==========================================
// PlateAssignment - 全部印版的分配方案
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateAssignment {
    pub plates: Vec<PlatePlan>,
}

impl PlateAssignment {
    /// 总印刷次数 = 各版印刷次数之和
    pub fn total_runs(&self) -> u64 {
        self.plates.iter().map(|p| p.runs).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plate_label_single_letters() {
        assert_eq!(PlateLabel::from_index(0).as_str(), "A");
        assert_eq!(PlateLabel::from_index(1).as_str(), "B");
        assert_eq!(PlateLabel::from_index(25).as_str(), "Z");
    }

    #[test]
    fn test_plate_label_multi_letters() {
        assert_eq!(PlateLabel::from_index(26).as_str(), "AA");
        assert_eq!(PlateLabel::from_index(27).as_str(), "AB");
        assert_eq!(PlateLabel::from_index(51).as_str(), "AZ");
        assert_eq!(PlateLabel::from_index(52).as_str(), "BA");
        assert_eq!(PlateLabel::from_index(701).as_str(), "ZZ");
        assert_eq!(PlateLabel::from_index(702).as_str(), "AAA");
    }

    #[test]
    fn test_plate_label_no_collision() {
        let labels: std::collections::HashSet<PlateLabel> =
            (0..2000).map(PlateLabel::from_index).collect();
        assert_eq!(labels.len(), 2000);
    }

    #[test]
    fn test_total_runs_counts_empty_plate_as_zero() {
        let assignment = PlateAssignment {
            plates: vec![
                PlatePlan {
                    items: vec![0],
                    slots: vec![10],
                    runs: 3,
                },
                PlatePlan::empty(),
            ],
        };
        assert_eq!(assignment.total_runs(), 3);
    }
}
