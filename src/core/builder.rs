//! 编排器构建：从 AppConfig 一次性解析凭证、创建各 Provider
//!
//! 凭证只在这里读取（配置优先，其次 OPENAI_API_KEY）；之后 Provider 不再访问配置或环境变量。
//! 有无凭证决定每个 Provider 的 Availability。

use std::sync::Arc;

use crate::analysis::LexiconAnalyzer;
use crate::config::AppConfig;
use crate::core::{Orchestrator, ProviderPool};
use crate::llm::{LlmClient, MockLlmClient, OpenAiClient};
use crate::text::LlmTextProvider;
use crate::visual::{ImageVisualProvider, OpenAiImageClient};

const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// 取第一个非空的凭证
fn resolve_api_key(configured: Option<&str>, env: Option<String>) -> Option<String> {
    configured
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .or_else(|| env.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()))
}

fn env_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok()
}

/// 根据配置选择文本后端（OpenAI 兼容 / Mock）；None 表示未配置
pub fn create_llm_from_config(cfg: &AppConfig) -> Option<Arc<dyn LlmClient>> {
    match cfg.llm.provider.to_lowercase().as_str() {
        "mock" => {
            tracing::info!("Using Mock LLM");
            Some(Arc::new(MockLlmClient::new()))
        }
        "none" => None,
        provider => {
            if provider != "openai" {
                tracing::warn!(provider, "unknown LLM provider, treating as openai");
            }
            let Some(key) = resolve_api_key(cfg.llm.api_key.as_deref(), env_api_key()) else {
                tracing::warn!("No API key set, text generation will emit placeholders");
                return None;
            };
            let client = OpenAiClient::new(cfg.llm.base_url.as_deref(), &key, cfg.llm.chat_settings());
            tracing::info!(model = client.model(), "Using OpenAI LLM");
            Some(Arc::new(client))
        }
    }
}

/// 由配置构建完整的 Orchestrator；调用池在文本与图片阶段之间共享
pub fn build_orchestrator(cfg: &AppConfig) -> Orchestrator {
    let pool = ProviderPool::new(cfg.pipeline.max_concurrent_calls);

    let analysis = LexiconAnalyzer::new(cfg.analysis.settings());

    let text = match create_llm_from_config(cfg) {
        Some(llm) => LlmTextProvider::new(llm, pool.clone()),
        None => LlmTextProvider::unavailable(pool.clone()),
    }
    .with_timeout(cfg.llm.timeout());

    let visual = match resolve_api_key(cfg.image.api_key.as_deref(), env_api_key()) {
        Some(key) => {
            tracing::info!(model = %cfg.image.model, "Using OpenAI image generation");
            let client = OpenAiImageClient::new(&cfg.image.base_url, &key, cfg.image.image_settings());
            ImageVisualProvider::new(Arc::new(client), cfg.image.visual_settings())
        }
        None => {
            tracing::warn!("No API key set, visuals will be placeholders");
            ImageVisualProvider::unavailable(cfg.image.visual_settings())
        }
    };

    Orchestrator::new(
        Arc::new(analysis),
        Arc::new(text),
        Arc::new(visual),
        cfg.platform_table(),
        pool,
    )
}
