//! 视觉 Provider：一条文本 → 一个视觉素材（成功或占位）
//!
//! generate 不返回错误：无凭证、调用失败、空响应、后处理失败都落为 success=false 的占位素材。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::{Availability, BrandGuidelines, Provider, ProviderError};
use crate::platform::PlatformSpec;
use crate::visual::image_client::ImageClient;
use crate::visual::processing::{process_image, DEFAULT_JPEG_QUALITY};
use crate::visual::prompt::build_visual_prompt;
use crate::visual::{StylePreferences, VisualAsset};

fn unavailable_error() -> ProviderError {
    ProviderError::Unavailable("no image API key configured".to_string())
}

#[async_trait]
pub trait VisualProvider: Provider {
    async fn generate(
        &self,
        text: &str,
        guidelines: &BrandGuidelines,
        prefs: &StylePreferences,
        spec: &PlatformSpec,
    ) -> VisualAsset;
}

#[derive(Debug, Clone)]
pub struct VisualSettings {
    pub timeout: Duration,
    pub jpeg_quality: u8,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// 基于 ImageClient 的视觉 Provider
pub struct ImageVisualProvider {
    client: Option<Arc<dyn ImageClient>>,
    settings: VisualSettings,
}

impl ImageVisualProvider {
    pub fn new(client: Arc<dyn ImageClient>, settings: VisualSettings) -> Self {
        Self {
            client: Some(client),
            settings,
        }
    }

    pub fn unavailable(settings: VisualSettings) -> Self {
        Self {
            client: None,
            settings,
        }
    }

    async fn render(
        &self,
        client: &dyn ImageClient,
        prompt: &str,
        spec: &PlatformSpec,
    ) -> Result<Vec<u8>, ProviderError> {
        let raw = client.generate(prompt).await?;
        let spec = spec.clone();
        let quality = self.settings.jpeg_quality;
        tokio::task::spawn_blocking(move || process_image(&raw, &spec, quality))
            .await
            .map_err(|e| ProviderError::Image(e.to_string()))?
    }
}

impl Provider for ImageVisualProvider {
    fn name(&self) -> &str {
        "image_visual"
    }

    fn availability(&self) -> Availability {
        if self.client.is_some() {
            Availability::Configured
        } else {
            Availability::Unavailable
        }
    }

    fn call_timeout(&self) -> Duration {
        self.settings.timeout
    }
}

#[async_trait]
impl VisualProvider for ImageVisualProvider {
    async fn generate(
        &self,
        text: &str,
        guidelines: &BrandGuidelines,
        prefs: &StylePreferences,
        spec: &PlatformSpec,
    ) -> VisualAsset {
        let prompt = build_visual_prompt(text, guidelines, prefs);

        let Some(client) = &self.client else {
            return VisualAsset::placeholder(spec, Some(prompt), unavailable_error().to_string());
        };

        match self.render(client.as_ref(), &prompt, spec).await {
            Ok(payload) => {
                tracing::debug!(size = %spec.size_label(), bytes = payload.len(), "visual rendered");
                VisualAsset::generated(payload, prompt, spec)
            }
            Err(e) => {
                tracing::warn!(error = %e, "visual generation failed, using placeholder");
                VisualAsset::placeholder(spec, Some(prompt), e.to_string())
            }
        }
    }
}
