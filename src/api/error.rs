// ==========================================
// 印刷拼版 UPS 优化 - API层错误类型
// ==========================================
// 职责: 汇总引擎 / 外部服务 / 导入 / 配置错误, 提供统一的错误出口
// ==========================================

use crate::config::ConfigError;
use crate::delegation::DelegationError;
use crate::engine::EngineError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求校验 / 求解
    // ==========================================
    #[error("优化失败: {0}")]
    Engine(#[from] EngineError),

    // ==========================================
    // 外部求解服务
    // ==========================================
    #[error("外部求解失败: {0}")]
    Delegation(#[from] DelegationError),

    // ==========================================
    // 导入 / 配置
    // ==========================================
    #[error("文件导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("计算任务异常终止: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 是否为调用方输入问题（参数 / 数据）
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ApiError::Engine(
                EngineError::InvalidPlateCount(_)
                    | EngineError::InvalidSlotBudget { .. }
                    | EngineError::NothingToOptimize
                    | EngineError::QuantityOutOfRange { .. }
            ) | ApiError::Import(_)
        )
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
