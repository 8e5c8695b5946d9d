//! AnalysisProvider：既有帖子 → VoiceProfile
//!
//! 默认实现 `LexiconAnalyzer` 纯本地计算（词典情感、语气标记、风格、话题），
//! 计算放在 spawn_blocking 中执行，不占用异步工作线程。

use std::time::Duration;

use async_trait::async_trait;

use crate::analysis::metrics::{analyze_language, analyze_style};
use crate::analysis::sentiment::average_sentiment;
use crate::analysis::tone::analyze_tone;
use crate::analysis::topics::{extract_topics, DEFAULT_TOPIC_COUNT};
use crate::analysis::types::VoiceProfile;
use crate::core::{Provider, ProviderError};

/// 分析 Provider：空输入必须返回全 0 画像而不是失败
#[async_trait]
pub trait AnalysisProvider: Provider {
    async fn analyze(&self, posts: &[String]) -> Result<VoiceProfile, ProviderError>;
}

/// 分析配置
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub timeout: Duration,
    pub topic_count: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            topic_count: DEFAULT_TOPIC_COUNT,
        }
    }
}

/// 同步计算完整画像（确定性：相同输入得到相同结果）
pub fn build_profile(posts: &[String], topic_count: usize) -> VoiceProfile {
    if posts.is_empty() {
        return VoiceProfile::default();
    }
    VoiceProfile {
        post_count: posts.len(),
        sentiment: average_sentiment(posts),
        tone: analyze_tone(posts),
        style: analyze_style(posts),
        topics: extract_topics(posts, topic_count),
        language: analyze_language(posts),
    }
}

/// 基于词典的本地分析器
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer {
    settings: AnalysisSettings,
}

impl LexiconAnalyzer {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }
}

impl Provider for LexiconAnalyzer {
    fn name(&self) -> &str {
        "lexicon_analyzer"
    }

    fn call_timeout(&self) -> Duration {
        self.settings.timeout
    }
}

#[async_trait]
impl AnalysisProvider for LexiconAnalyzer {
    async fn analyze(&self, posts: &[String]) -> Result<VoiceProfile, ProviderError> {
        let posts = posts.to_vec();
        let topic_count = self.settings.topic_count;
        let profile = tokio::task::spawn_blocking(move || build_profile(&posts, topic_count))
            .await
            .map_err(|e| ProviderError::Request(format!("analysis task failed: {e}")))?;

        tracing::info!(
            posts = profile.post_count,
            dominant_tone = profile.dominant_tone(),
            topics = profile.topics.len(),
            "content analysis completed"
        );
        Ok(profile)
    }
}
