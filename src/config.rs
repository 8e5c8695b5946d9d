//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `POSTCRAFT__*` 覆盖（双下划线表示嵌套，如 `POSTCRAFT__LLM__PROVIDER=mock`）。
//! 未识别的键一律忽略。

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::analysis::AnalysisSettings;
use crate::llm::ChatSettings;
use crate::platform::{default_platforms, PlatformSpec, PlatformTable};
use crate::visual::{ImageSettings, VisualSettings};

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub image: ImageSection,
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub pipeline: PipelineSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default = "default_platforms")]
    pub platforms: HashMap<String, PlatformSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmSection::default(),
            image: ImageSection::default(),
            analysis: AnalysisSection::default(),
            pipeline: PipelineSection::default(),
            output: OutputSection::default(),
            platforms: default_platforms(),
        }
    }
}

/// [llm] 段：文本后端
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    /// 后端：openai / mock / none
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    pub base_url: Option<String>,
    /// 未设置时读取 OPENAI_API_KEY
    pub api_key: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_llm_model() -> String {
    "gpt-4".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f32 {
    0.7
}

fn default_llm_timeout_secs() -> u64 {
    60
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            model: default_llm_model(),
            base_url: None,
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl LlmSection {
    pub fn chat_settings(&self) -> ChatSettings {
        ChatSettings {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// [image] 段：图片后端与后处理
#[derive(Debug, Clone, Deserialize)]
pub struct ImageSection {
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_image_size")]
    pub size: String,
    #[serde(default = "default_image_quality")]
    pub quality: String,
    #[serde(default = "default_image_base_url")]
    pub base_url: String,
    /// 未设置时读取 OPENAI_API_KEY
    pub api_key: Option<String>,
    #[serde(default = "default_image_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_image_size() -> String {
    "1024x1024".to_string()
}

fn default_image_quality() -> String {
    "standard".to_string()
}

fn default_image_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_image_timeout_secs() -> u64 {
    120
}

fn default_jpeg_quality() -> u8 {
    95
}

impl Default for ImageSection {
    fn default() -> Self {
        Self {
            model: default_image_model(),
            size: default_image_size(),
            quality: default_image_quality(),
            base_url: default_image_base_url(),
            api_key: None,
            timeout_secs: default_image_timeout_secs(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl ImageSection {
    pub fn image_settings(&self) -> ImageSettings {
        ImageSettings {
            model: self.model.clone(),
            size: self.size.clone(),
            quality: self.quality.clone(),
        }
    }

    pub fn visual_settings(&self) -> VisualSettings {
        VisualSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            jpeg_quality: self.jpeg_quality,
        }
    }
}

/// [analysis] 段
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSection {
    #[serde(default = "default_analysis_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_topic_count")]
    pub topic_count: usize,
}

fn default_analysis_timeout_secs() -> u64 {
    30
}

fn default_topic_count() -> usize {
    10
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_analysis_timeout_secs(),
            topic_count: default_topic_count(),
        }
    }
}

impl AnalysisSection {
    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            topic_count: self.topic_count,
        }
    }
}

/// [pipeline] 段：同时在途的 Provider 调用上限
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSection {
    #[serde(default = "default_max_concurrent_calls")]
    pub max_concurrent_calls: usize,
}

fn default_max_concurrent_calls() -> usize {
    4
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            max_concurrent_calls: default_max_concurrent_calls(),
        }
    }
}

/// [output] 段：结果输出目录
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_content")
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    pub fn platform_table(&self) -> PlatformTable {
        PlatformTable::new(self.platforms.clone())
    }
}

/// 从 config 目录加载配置，环境变量 POSTCRAFT__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 POSTCRAFT__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("POSTCRAFT")
            .separator("__")
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}
