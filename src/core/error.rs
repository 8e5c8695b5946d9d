//! 管线错误类型与错误分级
//!
//! 两层错误：
//! - `PipelineError`：致命错误，`process` 直接返回给调用方（校验失败 / 分析失败）
//! - `ProviderError`：单次 Provider 调用失败；文本、图片阶段只会把它记录进元数据，不会向上抛出

use thiserror::Error;

/// 错误分级（与调用方约定：只有 Validation / AnalysisFailure 会以 Err 形式出现）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 请求缺字段，未调用任何 Provider
    Validation,
    /// 分析阶段失败，整次运行终止
    AnalysisFailure,
    /// 文本 / 图片生成降级，只体现在数据里
    GenerationDegraded,
}

/// 单次 Provider 调用的失败原因
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("{operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Empty response from provider")]
    EmptyResponse,

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Image processing error: {0}")]
    Image(String),

    #[error("Provider pool closed")]
    PoolClosed,
}

impl ProviderError {
    /// 文本 / 图片阶段的 Provider 错误一律视为降级
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::GenerationDegraded
    }
}

/// `Orchestrator::process` 的致命错误
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Content analysis failed: {0}")]
    Analysis(#[source] ProviderError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Validation(_) => ErrorKind::Validation,
            PipelineError::Analysis(_) => ErrorKind::AnalysisFailure,
        }
    }
}
