//! Mock LLM 客户端（用于测试，无需 API）
//!
//! 按调用顺序返回预设的结果（成功文本或错误）；脚本用完后回显最后一条 User 消息。
//! 可选延迟，便于测试超时路径。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::ProviderError;
use crate::llm::{LlmClient, Message, Role};

/// Mock 客户端：脚本化响应 + 调用计数
#[derive(Debug, Default)]
pub struct MockLlmClient {
    script: Mutex<VecDeque<Result<String, ProviderError>>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按顺序返回给定结果
    pub fn with_responses(
        responses: impl IntoIterator<Item = Result<String, ProviderError>>,
    ) -> Self {
        Self {
            script: Mutex::new(responses.into_iter().collect()),
            ..Self::default()
        }
    }

    /// 每次调用前等待 delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// 已发生的调用次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        if let Some(result) = scripted {
            return result;
        }

        let last_user = messages
            .iter()
            .rev()
            .find(|m| matches!(m.role, Role::User))
            .map(|m| m.content.as_str())
            .unwrap_or("(no input)");
        Ok(format!("Echo from Mock: {}", last_user))
    }
}
