// ==========================================
// Mock 外部求解服务 - 用于集成测试
// ==========================================
// 提交结果与轮询状态按脚本返回; 轮询脚本耗尽后一直返回 pending
// ==========================================

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use ups_optimizer::delegation::{
    DelegationBackend, DelegationError, DelegationResult, SubmitOutcome, TaskStatus, WireRequest,
    WireResult,
};

struct MockState {
    submit: Mutex<Option<DelegationResult<SubmitOutcome>>>,
    statuses: Mutex<VecDeque<DelegationResult<TaskStatus>>>,
    healthy: bool,
    submits: AtomicUsize,
    polls: AtomicUsize,
    last_request: Mutex<Option<WireRequest>>,
}

#[derive(Clone)]
pub struct MockBackend {
    state: Arc<MockState>,
}

impl MockBackend {
    fn with(submit: DelegationResult<SubmitOutcome>, statuses: Vec<DelegationResult<TaskStatus>>) -> Self {
        Self {
            state: Arc::new(MockState {
                submit: Mutex::new(Some(submit)),
                statuses: Mutex::new(statuses.into()),
                healthy: true,
                submits: AtomicUsize::new(0),
                polls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }),
        }
    }

    /// 异步服务: 返回任务号, 按脚本轮询
    pub fn pending_then(statuses: Vec<DelegationResult<TaskStatus>>) -> Self {
        Self::with(
            Ok(SubmitOutcome::Pending {
                task_id: "task-1".to_string(),
            }),
            statuses,
        )
    }

    /// 同步服务: 提交即返回结果
    pub fn synchronous(results: Vec<WireResult>) -> Self {
        Self::with(
            Ok(SubmitOutcome::Completed {
                results,
                summary: None,
            }),
            Vec::new(),
        )
    }

    /// 提交即失败
    pub fn failing(error: DelegationError) -> Self {
        Self::with(Err(error), Vec::new())
    }

    pub fn submits(&self) -> usize {
        self.state.submits.load(Ordering::SeqCst)
    }

    pub fn polls(&self) -> usize {
        self.state.polls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<WireRequest> {
        self.state.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl DelegationBackend for MockBackend {
    async fn submit(&self, request: &WireRequest) -> DelegationResult<SubmitOutcome> {
        self.state.submits.fetch_add(1, Ordering::SeqCst);
        *self.state.last_request.lock().unwrap() = Some(request.clone());
        self.state
            .submit
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(DelegationError::Http("重复提交".to_string())))
    }

    async fn poll(&self, _task_id: &str) -> DelegationResult<TaskStatus> {
        self.state.polls.fetch_add(1, Ordering::SeqCst);
        self.state
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(pending_status()))
    }

    async fn health_check(&self) -> DelegationResult<()> {
        if self.state.healthy {
            Ok(())
        } else {
            Err(DelegationError::Http("unhealthy".to_string()))
        }
    }
}

// ==========================================
// 报文构造
// ==========================================

pub fn pending_status() -> TaskStatus {
    serde_json::from_value(json!({"status": "pending", "estimatedTimeSeconds": 30})).unwrap()
}

pub fn failed_status(error: &str) -> TaskStatus {
    serde_json::from_value(json!({"status": "failed", "error": error})).unwrap()
}

pub fn completed_status(results: Vec<WireResult>) -> TaskStatus {
    TaskStatus {
        status: Some("completed".to_string()),
        results: Some(results),
        ..TaskStatus::default()
    }
}

/// 按下标轮流分配到各印版、每条出数 1 的可行结果
///
/// 每版印次取版内最大数量
pub fn round_robin_plates(request: &WireRequest) -> Vec<WireResult> {
    let plate_count = request.plate_count.max(1) as usize;
    let plate_of = |i: usize| i % plate_count;

    let mut runs = vec![0u64; plate_count];
    for (i, tag) in request.tags.iter().enumerate() {
        runs[plate_of(i)] = runs[plate_of(i)].max(tag.quantity);
    }

    request
        .tags
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            let plate_runs = runs[plate_of(i)];
            let mut row = json!({
                "COLOR": tag.color,
                "SIZE": tag.size,
                "QTY": tag.quantity,
                "PLATE": format!("P{}", plate_of(i) + 1),
                "OPTIMAL_UPS": 1,
                "SHEETS_NEEDED": plate_runs,
                "QTY_PRODUCED": plate_runs,
                "EXCESS": plate_runs - tag.quantity,
            });
            if let Value::Object(map) = &mut row {
                for (k, v) in &tag.extra {
                    map.insert(k.clone(), v.clone());
                }
            }
            serde_json::from_value(row).unwrap()
        })
        .collect()
}
