// ==========================================
// 印刷拼版 UPS 优化 - 外部求解服务错误类型
// ==========================================
// 职责: HTTP / 解码 / 远端失败 / 超时
// 约束: 任何错误都不返回部分结果
// ==========================================

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DelegationError {
    #[error("HTTP 请求失败: {0}")]
    Http(String),

    #[error("外部服务返回错误状态 {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("响应解析失败: {0}")]
    Decode(String),

    #[error("外部服务求解失败: {0}")]
    Remote(String),

    #[error("外部求解超时: 已等待 {waited:?}")]
    Timeout { waited: Duration },

    #[error("提交响应缺少 task_id")]
    MissingTaskId,

    #[error("外部服务结果无效: {0}")]
    InvalidResult(String),
}

impl From<reqwest::Error> for DelegationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DelegationError::Decode(err.to_string())
        } else {
            DelegationError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DelegationError {
    fn from(err: serde_json::Error) -> Self {
        DelegationError::Decode(err.to_string())
    }
}

pub type DelegationResult<T> = Result<T, DelegationError>;
