// ==========================================
// 印刷拼版 UPS 优化 - 需求领域模型
// ==========================================
// 职责: 需求条目 (颜色/尺码/数量) + 透传附加字段
// 红线: 需求条目加载后不可变, 引擎只读
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Attachment - 透传字段
// ==========================================
// 用途: 导入文件中除 COLOR/SIZE/QTY 外的任意列 (ITEM_CODE, PRICE, EP_NO ...)
// 引擎不解释其含义, 原样写回结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub key: String,
    pub value: String,
}

/// 有序的透传字段列表（保持导入时的列顺序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attachments(Vec<Attachment>);

impl Attachments {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// 追加字段（重复 key 也保留, 查询时取第一个）
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(Attachment {
            key: key.into(),
            value: value.into(),
        });
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Attachments {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| Attachment { key, value })
                .collect(),
        )
    }
}

// ==========================================
// DemandKey - 需求键 (颜色 + 尺码)
// ==========================================
// 注意: 不要求唯一, 同一键可出现多行
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DemandKey {
    pub color: String,
    pub size: String,
}

impl fmt::Display for DemandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.color, self.size)
    }
}

// ==========================================
// DemandItem - 需求条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandItem {
    pub color: String,
    pub size: String,
    pub quantity: u64, // 需求数量 (>0 才会进入引擎)

    #[serde(default, skip_serializing_if = "Attachments::is_empty")]
    pub attachments: Attachments,
}

impl DemandItem {
    pub fn new(color: impl Into<String>, size: impl Into<String>, quantity: u64) -> Self {
        Self {
            color: color.into(),
            size: size.into(),
            quantity,
            attachments: Attachments::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: Attachments) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn key(&self) -> DemandKey {
        DemandKey {
            color: self.color.clone(),
            size: self.size.clone(),
        }
    }
}

// ==========================================
// OptimizationRequest - 优化请求
// ==========================================
// 请求完全由 (items, slots_per_plate, plate_count) 描述, 无其他状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationRequest {
    pub items: Vec<DemandItem>,
    pub slots_per_plate: u32, // 每版出数 (UPS)
    pub plate_count: u32,     // 印版数量
}

impl OptimizationRequest {
    pub fn new(items: Vec<DemandItem>, slots_per_plate: u32, plate_count: u32) -> Self {
        Self {
            items,
            slots_per_plate,
            plate_count,
        }
    }

    /// 需求总数量（溢出时饱和）
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(i.quantity))
    }
}
