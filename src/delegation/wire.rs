// ==========================================
// 印刷拼版 UPS 优化 - 外部求解服务报文
// ==========================================
// 请求: POST /optimize-plates
//   {"tags": [{"COLOR", "SIZE", "QTY", ...附加字段}], "upsPerPlate", "plateCount"}
// 提交响应: {"task_id"} | {"results", "summary"} | {"error"}
// 状态查询: GET /task-status/{task_id}
//   {"status", "estimatedTimeSeconds", "results", "summary", "error"}
// ==========================================

use crate::delegation::error::{DelegationError, DelegationResult};
use crate::domain::demand::{Attachments, OptimizationRequest};
use crate::domain::plate::PlateLabel;
use crate::domain::result::{
    waste_percentage, OptimizationResponse, OptimizationResult, OptimizationSummary,
    PlateSummary,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ==========================================
// 请求报文
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTag {
    #[serde(rename = "COLOR")]
    pub color: String,
    #[serde(rename = "SIZE")]
    pub size: String,
    #[serde(rename = "QTY")]
    pub quantity: u64,
    /// 附加字段原样透传
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRequest {
    pub tags: Vec<WireTag>,
    pub ups_per_plate: u32,
    pub plate_count: u32,
}

impl From<&OptimizationRequest> for WireRequest {
    fn from(request: &OptimizationRequest) -> Self {
        let tags = request
            .items
            .iter()
            .map(|item| {
                let mut extra = Map::new();
                for attachment in item.attachments.iter() {
                    // 重复键保留第一个值, 必需字段不允许被覆盖
                    if is_reserved(&attachment.key) || extra.contains_key(&attachment.key) {
                        continue;
                    }
                    extra.insert(
                        attachment.key.clone(),
                        Value::String(attachment.value.clone()),
                    );
                }
                WireTag {
                    color: item.color.clone(),
                    size: item.size.clone(),
                    quantity: item.quantity,
                    extra,
                }
            })
            .collect();

        Self {
            tags,
            ups_per_plate: request.slots_per_plate,
            plate_count: request.plate_count,
        }
    }
}

const RESERVED_KEYS: [&str; 8] = [
    "COLOR",
    "SIZE",
    "QTY",
    "PLATE",
    "OPTIMAL_UPS",
    "SHEETS_NEEDED",
    "QTY_PRODUCED",
    "EXCESS",
];

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

// ==========================================
// 结果报文
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireResult {
    #[serde(rename = "COLOR")]
    pub color: String,
    #[serde(rename = "SIZE")]
    pub size: String,
    #[serde(rename = "QTY")]
    pub quantity: u64,
    #[serde(rename = "PLATE")]
    pub plate: String,
    #[serde(rename = "OPTIMAL_UPS")]
    pub optimal_ups: u32,
    #[serde(rename = "SHEETS_NEEDED")]
    pub sheets_needed: u64,
    #[serde(rename = "QTY_PRODUCED")]
    pub qty_produced: u64,
    #[serde(rename = "EXCESS")]
    pub excess: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 外部服务汇总（仅用于日志对账, 汇总以结果行重新计算）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSummary {
    #[serde(default)]
    pub total_sheets: Option<u64>,
    #[serde(default)]
    pub total_produced: Option<u64>,
    #[serde(default)]
    pub total_excess: Option<i64>,
    #[serde(default)]
    pub waste_percentage: Option<f64>,
    #[serde(default)]
    pub total_plates: Option<u32>,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub ups_capacity: Option<u32>,
}

/// 提交响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<WireResult>>,
    #[serde(default)]
    pub summary: Option<WireSummary>,
    #[serde(default)]
    pub error: Option<String>,
}

/// 任务状态
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "estimatedTimeSeconds")]
    pub estimated_time_seconds: Option<f64>,
    #[serde(default)]
    pub results: Option<Vec<WireResult>>,
    #[serde(default)]
    pub summary: Option<WireSummary>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TaskStatus {
    /// 外部服务是否报告失败
    pub fn failure(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        match self.status.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("failed") || s.eq_ignore_ascii_case("error") => {
                Some(format!("任务状态: {}", s))
            }
            _ => None,
        }
    }
}

// ==========================================
// 报文 → 领域结果
// ==========================================

/// 将外部结果行映射回领域结果
///
/// 结果行须与请求需求按 (颜色, 尺码, 数量) 一一对应, 缺失或多余均视为无效结果。
/// 附加字段（非保留键）转为 attachments; 汇总与单版汇总按结果行重新计算,
/// 需求总量取自请求
pub fn into_response(
    results: Vec<WireResult>,
    request: &OptimizationRequest,
) -> DelegationResult<OptimizationResponse> {
    if results.is_empty() {
        return Err(DelegationError::InvalidResult("结果为空".to_string()));
    }

    let mut mapped = Vec::with_capacity(results.len());
    let mut plates: Vec<PlateSummary> = Vec::new();
    let mut covered = vec![false; request.items.len()];

    for row in results {
        let matched = request.items.iter().enumerate().position(|(i, item)| {
            !covered[i]
                && item.color == row.color
                && item.size == row.size
                && item.quantity == row.quantity
        });
        match matched {
            Some(i) => covered[i] = true,
            None => {
                return Err(DelegationError::InvalidResult(format!(
                    "结果行不对应任何需求: {}/{} 数量 {}",
                    row.color, row.size, row.quantity
                )))
            }
        }

        if row.qty_produced < row.quantity {
            return Err(DelegationError::InvalidResult(format!(
                "产出不足: {}/{} 需求 {}, 产出 {}",
                row.color, row.size, row.quantity, row.qty_produced
            )));
        }
        let excess = row.qty_produced - row.quantity;

        let label = PlateLabel::from(row.plate.as_str());
        match plates.iter().position(|p| p.plate_label == label) {
            Some(idx) => {
                let plate = &mut plates[idx];
                if plate.runs != row.sheets_needed {
                    return Err(DelegationError::InvalidResult(format!(
                        "印版 {} 印次不一致: {} / {}",
                        label, plate.runs, row.sheets_needed
                    )));
                }
                plate.item_count += 1;
                plate.slots_used += row.optimal_ups;
                plate.produced += row.qty_produced;
                plate.excess += excess;
            }
            None => plates.push(PlateSummary {
                plate_label: label.clone(),
                item_count: 1,
                runs: row.sheets_needed,
                slots_used: row.optimal_ups,
                produced: row.qty_produced,
                excess,
            }),
        }

        let attachments: Attachments = row
            .extra
            .into_iter()
            .map(|(key, value)| (key, value_to_string(value)))
            .collect();

        mapped.push(OptimizationResult {
            color: row.color,
            size: row.size,
            quantity: row.quantity,
            plate_label: label,
            allocated_slots: row.optimal_ups,
            runs_needed: row.sheets_needed,
            produced: row.qty_produced,
            excess,
            attachments,
        });
    }

    if let Some(i) = covered.iter().position(|c| !c) {
        let missing = &request.items[i];
        return Err(DelegationError::InvalidResult(format!(
            "结果缺少需求: {} 数量 {}",
            missing.key(),
            missing.quantity
        )));
    }

    if plates.len() > request.plate_count as usize {
        return Err(DelegationError::InvalidResult(format!(
            "印版数 {} 超过请求的 {}",
            plates.len(),
            request.plate_count
        )));
    }

    if let Some(plate) = plates
        .iter()
        .find(|p| p.slots_used > request.slots_per_plate)
    {
        return Err(DelegationError::InvalidResult(format!(
            "印版 {} 出数 {} 超过每版出数 {}",
            plate.plate_label, plate.slots_used, request.slots_per_plate
        )));
    }

    let total_required = request.total_quantity();
    let total_produced: u64 = mapped.iter().map(|r| r.produced).sum();
    let total_excess = total_produced.saturating_sub(total_required);

    let summary = OptimizationSummary {
        total_runs: plates.iter().map(|p| p.runs).sum(),
        total_produced,
        total_excess,
        waste_percentage: waste_percentage(total_excess, total_produced),
        total_required,
        slot_capacity: request.slots_per_plate,
        plate_count: request.plate_count,
    };

    Ok(OptimizationResponse {
        results: mapped,
        summary,
        plates,
    })
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demand::DemandItem;
    use serde_json::json;

    fn request() -> OptimizationRequest {
        OptimizationRequest::new(
            vec![
                DemandItem::new("Red", "M", 10)
                    .with_attachments(Attachments::new().with("EP_NO", "EP-7")),
                DemandItem::new("Blue", "L", 15),
            ],
            10,
            2,
        )
    }

    #[test]
    fn test_wire_request_shape() {
        let value = serde_json::to_value(WireRequest::from(&request())).unwrap();
        assert_eq!(value["upsPerPlate"], 10);
        assert_eq!(value["plateCount"], 2);
        assert_eq!(value["tags"][0]["COLOR"], "Red");
        assert_eq!(value["tags"][0]["QTY"], 10);
        assert_eq!(value["tags"][0]["EP_NO"], "EP-7");
        assert!(value["tags"][1].get("EP_NO").is_none());
    }

    #[test]
    fn test_into_response_maps_extra_fields() {
        let results: Vec<WireResult> = serde_json::from_value(json!([
            {"COLOR": "Red", "SIZE": "M", "QTY": 10, "PLATE": "A", "OPTIMAL_UPS": 10,
             "SHEETS_NEEDED": 1, "QTY_PRODUCED": 10, "EXCESS": 0, "EP_NO": "EP-7"},
            {"COLOR": "Blue", "SIZE": "L", "QTY": 15, "PLATE": "B", "OPTIMAL_UPS": 10,
             "SHEETS_NEEDED": 2, "QTY_PRODUCED": 20, "EXCESS": 5, "PRICE": 1.5}
        ]))
        .unwrap();

        let response = into_response(results, &request()).unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].attachments.get("EP_NO"), Some("EP-7"));
        assert_eq!(response.results[1].attachments.get("PRICE"), Some("1.5"));
        assert_eq!(response.summary.total_runs, 3);
        assert_eq!(response.summary.total_produced, 30);
        assert_eq!(response.summary.total_excess, 5);
        assert_eq!(response.summary.waste_percentage, 16.67);
        assert_eq!(response.plates.len(), 2);
    }

    #[test]
    fn test_into_response_rejects_underproduction() {
        let results: Vec<WireResult> = serde_json::from_value(json!([
            {"COLOR": "Red", "SIZE": "M", "QTY": 10, "PLATE": "A", "OPTIMAL_UPS": 10,
             "SHEETS_NEEDED": 0, "QTY_PRODUCED": 0, "EXCESS": -10}
        ]))
        .unwrap();

        assert!(matches!(
            into_response(results, &request()),
            Err(DelegationError::InvalidResult(_))
        ));
    }

    #[test]
    fn test_into_response_rejects_missing_items() {
        let request = OptimizationRequest::new(
            vec![
                DemandItem::new("Red", "M", 10),
                DemandItem::new("Blue", "L", 15),
                DemandItem::new("Green", "S", 5),
            ],
            10,
            2,
        );
        let results: Vec<WireResult> = serde_json::from_value(json!([
            {"COLOR": "Red", "SIZE": "M", "QTY": 10, "PLATE": "A", "OPTIMAL_UPS": 10,
             "SHEETS_NEEDED": 1, "QTY_PRODUCED": 10, "EXCESS": 0}
        ]))
        .unwrap();

        let err = into_response(results, &request).unwrap_err();
        assert!(matches!(&err, DelegationError::InvalidResult(msg) if msg.contains("Blue/L")));
    }

    #[test]
    fn test_into_response_rejects_unknown_and_duplicate_rows() {
        let row = |color: &str, qty: u64, plate: &str| {
            json!({"COLOR": color, "SIZE": "M", "QTY": qty, "PLATE": plate, "OPTIMAL_UPS": 5,
                   "SHEETS_NEEDED": 3, "QTY_PRODUCED": 15, "EXCESS": 15 - qty})
        };
        let request = OptimizationRequest::new(
            vec![DemandItem::new("Red", "M", 10), DemandItem::new("Red", "M", 10)],
            10,
            2,
        );

        // 相同需求出现两次时各对应一行
        let ok: Vec<WireResult> =
            serde_json::from_value(json!([row("Red", 10, "A"), row("Red", 10, "A")])).unwrap();
        let response = into_response(ok, &request).unwrap();
        assert_eq!(response.summary.total_required, 20);

        // 多出一行
        let extra: Vec<WireResult> = serde_json::from_value(json!([
            row("Red", 10, "A"),
            row("Red", 10, "A"),
            row("Red", 10, "B")
        ]))
        .unwrap();
        assert!(matches!(
            into_response(extra, &request),
            Err(DelegationError::InvalidResult(_))
        ));

        // 数量不符
        let wrong_qty: Vec<WireResult> =
            serde_json::from_value(json!([row("Red", 10, "A"), row("Red", 12, "A")])).unwrap();
        assert!(matches!(
            into_response(wrong_qty, &request),
            Err(DelegationError::InvalidResult(_))
        ));
    }

    #[test]
    fn test_into_response_rejects_too_many_plates() {
        let results: Vec<WireResult> = serde_json::from_value(json!([
            {"COLOR": "Red", "SIZE": "M", "QTY": 10, "PLATE": "A", "OPTIMAL_UPS": 10,
             "SHEETS_NEEDED": 1, "QTY_PRODUCED": 10, "EXCESS": 0},
            {"COLOR": "Blue", "SIZE": "L", "QTY": 15, "PLATE": "B", "OPTIMAL_UPS": 10,
             "SHEETS_NEEDED": 2, "QTY_PRODUCED": 20, "EXCESS": 5}
        ]))
        .unwrap();
        let single_plate = OptimizationRequest::new(request().items, 10, 1);

        let err = into_response(results, &single_plate).unwrap_err();
        assert!(matches!(&err, DelegationError::InvalidResult(msg) if msg.contains("印版数")));
    }

    #[test]
    fn test_task_status_failure() {
        let status: TaskStatus =
            serde_json::from_value(json!({"status": "failed"})).unwrap();
        assert!(status.failure().is_some());

        let pending: TaskStatus =
            serde_json::from_value(json!({"status": "pending", "estimatedTimeSeconds": 12}))
                .unwrap();
        assert!(pending.failure().is_none());
        assert_eq!(pending.estimated_time_seconds, Some(12.0));
    }
}
