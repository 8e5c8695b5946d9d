//! 平台规格表：目标尺寸、宽高比、文本长度上限，按平台标识查找
//!
//! 表本身来自配置（[platforms.<id>]），管线只把它当作只读输入。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// 单个平台的规格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    #[serde(default = "default_dimension")]
    pub width: u32,
    #[serde(default = "default_dimension")]
    pub height: u32,
    pub aspect_ratio: Option<String>,
    pub max_text_length: Option<usize>,
}

fn default_dimension() -> u32 {
    1024
}

impl Default for PlatformSpec {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            aspect_ratio: None,
            max_text_length: None,
        }
    }
}

impl PlatformSpec {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(ratio.into());
        self
    }

    pub fn with_max_text_length(mut self, max: usize) -> Self {
        self.max_text_length = Some(max);
        self
    }

    /// "宽x高"，如 1080x1080
    pub fn size_label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// 内置平台规格：instagram / twitter / linkedin
pub fn default_platforms() -> HashMap<String, PlatformSpec> {
    HashMap::from([
        (
            "instagram".to_string(),
            PlatformSpec::new(1080, 1080)
                .with_aspect_ratio("1:1")
                .with_max_text_length(2200),
        ),
        (
            "twitter".to_string(),
            PlatformSpec::new(1200, 675)
                .with_aspect_ratio("16:9")
                .with_max_text_length(280),
        ),
        (
            "linkedin".to_string(),
            PlatformSpec::new(1200, 627)
                .with_aspect_ratio("1.91:1")
                .with_max_text_length(3000),
        ),
    ])
}

/// 平台标识（大小写不敏感）→ 规格
#[derive(Debug, Clone, Default)]
pub struct PlatformTable {
    specs: HashMap<String, PlatformSpec>,
}

impl PlatformTable {
    pub fn new(specs: HashMap<String, PlatformSpec>) -> Self {
        Self {
            specs: specs
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_platforms())
    }

    pub fn get(&self, platform: &str) -> Option<&PlatformSpec> {
        self.specs.get(&platform.trim().to_lowercase())
    }

    /// 查找规格；未知平台返回默认规格（1024x1024，无文本上限）
    pub fn resolve(&self, platform: &str) -> PlatformSpec {
        match self.get(platform) {
            Some(spec) => spec.clone(),
            None => {
                tracing::warn!(platform, "unknown platform, using default spec");
                PlatformSpec::default()
            }
        }
    }

    pub fn platforms(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.specs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
