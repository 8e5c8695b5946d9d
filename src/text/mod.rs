//! 文本生成：上下文、Prompt、Provider

pub mod prompt;
pub mod provider;
pub mod types;

pub use prompt::PLACEHOLDER_POST;
pub use provider::{LlmTextProvider, TextProvider};
pub use types::{
    success_rate, AttemptFailure, GenerationContext, TextBatchMetadata, TextBatchResult, TextItem,
};
