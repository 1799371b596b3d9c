// ==========================================
// 印刷拼版 UPS 优化 - 字段映射器实现
// ==========================================
// 职责: 原始行 → DemandItem 映射 + 数量类型转换
// 数量: 正整数且不超过引擎的需求总量上限
// 必需列: COLOR / SIZE / QTY（不区分大小写）
// 其余非空列按表头顺序作为附加字段透传
// ==========================================

use crate::domain::demand::{Attachments, DemandItem};
use crate::engine::MAX_TOTAL_QUANTITY;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use serde::{Deserialize, Serialize};

pub const COLOR_COLUMN: &str = "COLOR";
pub const SIZE_COLUMN: &str = "SIZE";
pub const QTY_COLUMN: &str = "QTY";

/// 被拒绝的数据行（不进入优化引擎）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    pub row_number: usize,
    pub reason: String,
}

/// 表头解析结果: 必需列的实际列名
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    color: String,
    size: String,
    qty: String,
}

impl ColumnLayout {
    fn is_required(&self, header: &str) -> bool {
        header == self.color || header == self.size || header == self.qty
    }
}

pub struct FieldMapper;

impl FieldMapper {
    /// 解析表头, 定位必需列
    pub fn resolve_columns(&self, headers: &[String]) -> ImportResult<ColumnLayout> {
        let find = |name: &str| {
            headers
                .iter()
                .find(|h| h.trim().eq_ignore_ascii_case(name))
                .cloned()
        };

        let color = find(COLOR_COLUMN);
        let size = find(SIZE_COLUMN);
        let qty = find(QTY_COLUMN);

        let missing: Vec<String> = [
            (COLOR_COLUMN, &color),
            (SIZE_COLUMN, &size),
            (QTY_COLUMN, &qty),
        ]
        .iter()
        .filter(|(_, found)| found.is_none())
        .map(|(name, _)| name.to_string())
        .collect();

        match (color, size, qty) {
            (Some(color), Some(size), Some(qty)) => Ok(ColumnLayout { color, size, qty }),
            _ => Err(ImportError::MissingColumns(missing)),
        }
    }

    /// 映射单行; 失败时返回拒绝原因
    pub fn map_row(&self, layout: &ColumnLayout, row: &RawRow) -> Result<DemandItem, RejectedRow> {
        let reject = |reason: String| RejectedRow {
            row_number: row.row_number,
            reason,
        };

        let color = self
            .get_string(row, &layout.color)
            .ok_or_else(|| reject("COLOR 为空".to_string()))?;
        let size = self
            .get_string(row, &layout.size)
            .ok_or_else(|| reject("SIZE 为空".to_string()))?;
        let raw_qty = self
            .get_string(row, &layout.qty)
            .ok_or_else(|| reject("QTY 为空".to_string()))?;
        let quantity = parse_quantity(&raw_qty).map_err(reject)?;

        let attachments: Attachments = row
            .cells
            .iter()
            .filter(|(header, value)| !layout.is_required(header) && !value.is_empty())
            .map(|(header, value)| (header.clone(), value.clone()))
            .collect();

        Ok(DemandItem::new(color, size, quantity).with_attachments(attachments))
    }

    /// 提取字符串字段（空值视为缺失）
    fn get_string(&self, row: &RawRow, header: &str) -> Option<String> {
        row.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// 解析数量: 正整数, 不超过需求总量上限; 接受表格导出的整数型浮点（如 12.0）
fn parse_quantity(value: &str) -> Result<u64, String> {
    if let Ok(n) = value.parse::<i64>() {
        return in_range(n as f64, value).map(|_| n as u64);
    }

    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => in_range(f, value).map(|_| f as u64),
        Ok(_) => Err(format!("QTY 不是整数: {}", value)),
        Err(_) => Err(format!("无法解析 QTY: {}", value)),
    }
}

fn in_range(n: f64, raw: &str) -> Result<(), String> {
    if n <= 0.0 {
        return Err(format!("QTY 必须为正数: {}", raw));
    }
    if n > MAX_TOTAL_QUANTITY as f64 {
        return Err(format!("QTY 超出上限 {}: {}", MAX_TOTAL_QUANTITY, raw));
    }
    Ok(())
}
