//! 图片生成客户端
//!
//! `OpenAiImageClient` 调用 OpenAI 兼容的 `/images/generations`，以 b64_json 取回原始图片字节。
//! `MockImageClient` 按脚本返回结果，供测试使用。

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::core::ProviderError;

/// 原始图片生成接口：Prompt → 图片字节（任意编码）
#[async_trait]
pub trait ImageClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ProviderError>;
}

/// 图片生成参数
#[derive(Debug, Clone)]
pub struct ImageSettings {
    pub model: String,
    pub size: String,
    pub quality: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            model: "dall-e-3".to_string(),
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    quality: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

pub struct OpenAiImageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    settings: ImageSettings,
}

impl OpenAiImageClient {
    pub fn new(base_url: &str, api_key: &str, settings: ImageSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }
}

#[async_trait]
impl ImageClient for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ProviderError> {
        let body = ImageRequest {
            model: &self.settings.model,
            prompt,
            n: 1,
            size: &self.settings.size,
            quality: &self.settings.quality,
            response_format: "b64_json",
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Request(format!(
                "image API returned {}: {}",
                status,
                text.trim()
            )));
        }

        let parsed: ImageResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        let encoded = parsed
            .data
            .into_iter()
            .next()
            .and_then(|d| d.b64_json)
            .filter(|s| !s.is_empty())
            .ok_or(ProviderError::EmptyResponse)?;

        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

/// Mock 图片客户端：脚本化响应 + 调用计数；脚本用完后返回一张 8x8 的纯色 PNG
#[derive(Debug, Default)]
pub struct MockImageClient {
    script: Mutex<VecDeque<Result<Vec<u8>, ProviderError>>>,
    calls: AtomicUsize,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(
        responses: impl IntoIterator<Item = Result<Vec<u8>, ProviderError>>,
    ) -> Self {
        Self {
            script: Mutex::new(responses.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn solid_png() -> Result<Vec<u8>, ProviderError> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            8,
            8,
            image::Rgb([0x33, 0x66, 0x99]),
        ));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| ProviderError::Image(e.to_string()))?;
        Ok(buf.into_inner())
    }
}

#[async_trait]
impl ImageClient for MockImageClient {
    async fn generate(&self, _prompt: &str) -> Result<Vec<u8>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match scripted {
            Some(result) => result,
            None => Self::solid_png(),
        }
    }
}
