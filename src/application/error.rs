//! 应用层错误定义
//!
//! 服务边界上统一的错误类型

use thiserror::Error;

use super::ports::TtsError;
use super::streaming::SessionError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 供应商未注册
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 供应商错误
    #[error("Provider error: {0}")]
    ProviderError(#[from] TtsError),

    /// 流式会话错误
    #[error("Streaming error: {0}")]
    StreamingError(#[from] SessionError),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 ProviderNotFound 错误
    pub fn provider_not_found(name: impl Into<String>) -> Self {
        Self::ProviderNotFound(name.into())
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}
