//! 视觉生成：Prompt、图片客户端、后处理与 Provider

pub mod image_client;
pub mod processing;
pub mod prompt;
pub mod provider;
pub mod types;

pub use image_client::{ImageClient, ImageSettings, MockImageClient, OpenAiImageClient};
pub use provider::{ImageVisualProvider, VisualProvider, VisualSettings};
pub use types::{StylePreferences, VisualAsset, VisualMetadata};
