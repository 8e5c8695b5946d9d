//! 视觉素材与风格偏好

use serde::{Deserialize, Serialize};

use crate::platform::PlatformSpec;
use crate::visual::processing::placeholder_image;

/// 风格偏好：由文本元数据投影而来
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylePreferences {
    pub mood: String,
    pub style: String,
    pub composition: String,
}

impl StylePreferences {
    /// mood 取帖子类型，style / composition 固定
    pub fn for_post_type(post_type: &str) -> Self {
        Self {
            mood: post_type.to_string(),
            style: "modern".to_string(),
            composition: "platform-optimized".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualMetadata {
    /// 调用被超时打断时为空（Prompt 未送达 Provider 之外）
    pub prompt_used: Option<String>,
    pub platform_spec: PlatformSpec,
    pub success: bool,
    pub error: Option<String>,
}

/// 一次视觉生成的结果；失败时 payload 为占位图，success=false
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualAsset {
    #[serde(skip)]
    pub payload: Vec<u8>,
    pub metadata: VisualMetadata,
}

impl VisualAsset {
    pub fn generated(payload: Vec<u8>, prompt: String, spec: &PlatformSpec) -> Self {
        Self {
            payload,
            metadata: VisualMetadata {
                prompt_used: Some(prompt),
                platform_spec: spec.clone(),
                success: true,
                error: None,
            },
        }
    }

    /// 占位素材：平台尺寸的浅灰图 + 错误描述
    pub fn placeholder(spec: &PlatformSpec, prompt: Option<String>, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "visual generation failed".to_string();
        }
        Self {
            payload: placeholder_image(spec),
            metadata: VisualMetadata {
                prompt_used: prompt,
                platform_spec: spec.clone(),
                success: false,
                error: Some(error),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.metadata.success
    }
}
