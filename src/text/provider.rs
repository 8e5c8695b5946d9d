//! 文本 Provider：按画像与上下文生成 count 条帖子文本
//!
//! 每次尝试单独经过调用池（独立超时）；失败只记录，不中断批次。
//! 未配置后端时不发起调用，为每个位置产出占位文本并标记未成功。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::analysis::VoiceProfile;
use crate::core::{Availability, Provider, ProviderError, ProviderPool, DEFAULT_CALL_TIMEOUT};
use crate::llm::{LlmClient, Message};
use crate::text::prompt::{build_system_prompt, truncate_chars, PLACEHOLDER_POST, USER_INSTRUCTION};
use crate::text::{AttemptFailure, GenerationContext, TextBatchResult, TextItem};

#[async_trait]
pub trait TextProvider: Provider {
    /// 生成最多 context.count 条文本；单条失败被吸收进元数据
    async fn generate(&self, profile: &VoiceProfile, context: &GenerationContext) -> TextBatchResult;
}

/// 基于 LlmClient 的文本 Provider
pub struct LlmTextProvider {
    llm: Option<Arc<dyn LlmClient>>,
    pool: ProviderPool,
    timeout: Duration,
}

impl LlmTextProvider {
    pub fn new(llm: Arc<dyn LlmClient>, pool: ProviderPool) -> Self {
        Self {
            llm: Some(llm),
            pool,
            timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// 未配置后端：只产出占位文本
    pub fn unavailable(pool: ProviderPool) -> Self {
        Self {
            llm: None,
            pool,
            timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn placeholders(context: &GenerationContext) -> Vec<TextItem> {
        (0..context.count)
            .map(|index| TextItem {
                index,
                content: PLACEHOLDER_POST.to_string(),
                succeeded: false,
            })
            .collect()
    }
}

impl Provider for LlmTextProvider {
    fn name(&self) -> &str {
        "llm_text"
    }

    fn availability(&self) -> Availability {
        if self.llm.is_some() {
            Availability::Configured
        } else {
            Availability::Unavailable
        }
    }

    fn call_timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl TextProvider for LlmTextProvider {
    async fn generate(&self, profile: &VoiceProfile, context: &GenerationContext) -> TextBatchResult {
        let Some(llm) = &self.llm else {
            tracing::warn!(
                count = context.count,
                "text provider unavailable, emitting placeholder posts"
            );
            return TextBatchResult::new(Self::placeholders(context), Vec::new(), context);
        };

        let messages = [
            Message::system(build_system_prompt(profile, context)),
            Message::user(USER_INSTRUCTION),
        ];

        let mut items = Vec::with_capacity(context.count);
        let mut failures = Vec::new();
        for index in 0..context.count {
            let result = self
                .pool
                .dispatch("text_generation", self.timeout, llm.complete(&messages))
                .await
                .and_then(|text| {
                    let text = text.trim();
                    if text.is_empty() {
                        Err(ProviderError::EmptyResponse)
                    } else {
                        Ok(text.to_string())
                    }
                });

            let result = result.and_then(|text| {
                let content = match context.max_text_length {
                    Some(max) => truncate_chars(&text, max),
                    None => text,
                };
                if content.is_empty() {
                    Err(ProviderError::EmptyResponse)
                } else {
                    Ok(content)
                }
            });

            match result {
                Ok(content) => {
                    items.push(TextItem {
                        index,
                        content,
                        succeeded: true,
                    });
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "text generation attempt failed");
                    failures.push(AttemptFailure {
                        index,
                        error: e.to_string(),
                    });
                }
            }
        }

        let (prompt_tokens, completion_tokens, total_tokens) = llm.token_usage();
        tracing::info!(
            requested = context.count,
            succeeded = items.len(),
            prompt_tokens,
            completion_tokens,
            total_tokens,
            "text generation finished"
        );

        TextBatchResult::new(items, failures, context)
    }
}
