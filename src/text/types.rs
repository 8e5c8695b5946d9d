//! 文本生成的输入上下文与输出批次

use serde::{Deserialize, Serialize};

use crate::analysis::VoiceProfile;
use crate::core::GenerationParams;
use crate::platform::PlatformSpec;

/// 供 TextProvider 使用的生成上下文（由画像、生成参数与平台规格推导）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationContext {
    pub dominant_tone: String,
    pub count: usize,
    pub post_type: String,
    pub platform: String,
    pub max_text_length: Option<usize>,
    pub target_audience: Option<String>,
    pub content_goals: Vec<String>,
}

impl GenerationContext {
    pub fn derive(
        profile: &VoiceProfile,
        params: &GenerationParams,
        platform: &str,
        spec: &PlatformSpec,
    ) -> Self {
        Self {
            dominant_tone: profile.dominant_tone().to_string(),
            count: params.num_posts,
            post_type: params.post_type.clone(),
            platform: platform.to_string(),
            max_text_length: spec.max_text_length,
            target_audience: params.target_audience.clone(),
            content_goals: params.content_goals.clone(),
        }
    }
}

/// 单条生成文本；index 为其在请求序列中的位置（从 0 开始）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub index: usize,
    pub content: String,
    pub succeeded: bool,
}

/// 某次尝试失败的记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptFailure {
    pub index: usize,
    pub error: String,
}

/// 批次元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBatchMetadata {
    pub post_type: String,
    pub platform: String,
    pub requested: usize,
    pub succeeded: usize,
    pub success_rate: f64,
    pub failures: Vec<AttemptFailure>,
}

/// 成功率 = succeeded / requested；requested 为 0 时为 0
pub fn success_rate(succeeded: usize, requested: usize) -> f64 {
    if requested == 0 {
        0.0
    } else {
        succeeded as f64 / requested as f64
    }
}

/// 文本批次：实际产出的条目（可能少于请求数）+ 元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBatchResult {
    pub items: Vec<TextItem>,
    pub metadata: TextBatchMetadata,
}

impl TextBatchResult {
    /// 由条目与失败记录组装；成功数与成功率从条目计算
    pub fn new(
        items: Vec<TextItem>,
        failures: Vec<AttemptFailure>,
        context: &GenerationContext,
    ) -> Self {
        let succeeded = items.iter().filter(|i| i.succeeded).count();
        Self {
            metadata: TextBatchMetadata {
                post_type: context.post_type.clone(),
                platform: context.platform.clone(),
                requested: context.count,
                succeeded,
                success_rate: success_rate(succeeded, context.count),
                failures,
            },
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
