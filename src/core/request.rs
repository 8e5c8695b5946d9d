//! 生成请求与校验
//!
//! 四个必填字段都用 Option 建模，这样 JSON 里缺字段时能走到校验并返回 Validation 错误，
//! 而不是在反序列化阶段就失败。校验通过后得到借用视图 `ValidRequest`，整次运行期间不可变。

use serde::{Deserialize, Serialize};

use crate::core::PipelineError;

/// 品牌规范：颜色、风格、语气等提示；未识别的键原样保留在 extra 中
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandGuidelines {
    #[serde(default)]
    pub colors: Vec<String>,
    pub style: Option<String>,
    pub tone: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// 生成参数：数量、帖子类型、受众与目标提示
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default = "default_num_posts")]
    pub num_posts: usize,
    #[serde(default = "default_post_type")]
    pub post_type: String,
    pub target_audience: Option<String>,
    #[serde(default)]
    pub content_goals: Vec<String>,
}

fn default_num_posts() -> usize {
    1
}

fn default_post_type() -> String {
    "general".to_string()
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            num_posts: default_num_posts(),
            post_type: default_post_type(),
            target_audience: None,
            content_goals: Vec::new(),
        }
    }
}

/// 一次管线运行的输入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub existing_posts: Option<Vec<String>>,
    pub brand_guidelines: Option<BrandGuidelines>,
    pub generation_params: Option<GenerationParams>,
    pub platform: Option<String>,
}

/// 校验通过的请求视图
#[derive(Debug, Clone, Copy)]
pub struct ValidRequest<'a> {
    pub existing_posts: &'a [String],
    pub brand_guidelines: &'a BrandGuidelines,
    pub params: &'a GenerationParams,
    pub platform: &'a str,
}

impl GenerationRequest {
    pub fn new(
        existing_posts: Vec<String>,
        brand_guidelines: BrandGuidelines,
        generation_params: GenerationParams,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            existing_posts: Some(existing_posts),
            brand_guidelines: Some(brand_guidelines),
            generation_params: Some(generation_params),
            platform: Some(platform.into()),
        }
    }

    /// 检查必填字段；缺失时列出全部缺失字段
    pub fn validate(&self) -> Result<ValidRequest<'_>, PipelineError> {
        let mut missing = Vec::new();

        if self.existing_posts.is_none() {
            missing.push("existing_posts");
        }
        if self.brand_guidelines.is_none() {
            missing.push("brand_guidelines");
        }
        if self.generation_params.is_none() {
            missing.push("generation_params");
        }
        let platform = self
            .platform
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        if platform.is_none() {
            missing.push("platform");
        }

        match (
            &self.existing_posts,
            &self.brand_guidelines,
            &self.generation_params,
            platform,
        ) {
            (Some(posts), Some(guidelines), Some(params), Some(platform)) => Ok(ValidRequest {
                existing_posts: posts,
                brand_guidelines: guidelines,
                params,
                platform,
            }),
            _ => Err(PipelineError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}
