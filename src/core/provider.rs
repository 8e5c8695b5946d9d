//! Provider 共享能力接口
//!
//! 分析 / 文本 / 图片三个 Provider 都实现 `Provider`；是否可用（有无凭证）在构造时决定一次，之后只读。
//! 超时也由 Provider 自己声明，调用方通过 `ProviderPool` 统一施加。

use std::time::Duration;

use serde::Serialize;

/// 未配置超时时的单次调用上限
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Provider 可用状态：构造时根据凭证决定，运行期间不变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// 已配置后端，可发起真实调用
    Configured,
    /// 未配置（如缺少 API Key），走占位降级
    Unavailable,
}

impl Availability {
    pub fn is_configured(self) -> bool {
        matches!(self, Availability::Configured)
    }
}

/// 所有 Provider 的公共部分
pub trait Provider: Send + Sync {
    /// 用于日志与审计
    fn name(&self) -> &str;

    fn availability(&self) -> Availability {
        Availability::Configured
    }

    /// 单次调用超时，由调用池施加
    fn call_timeout(&self) -> Duration {
        DEFAULT_CALL_TIMEOUT
    }
}
