//! Postcraft - 品牌社交帖子生成管线
//!
//! 既有帖子 → 品牌声音画像 → N 条文本 → 每条文本一张配图 → 结果包。
//!
//! 模块划分：
//! - **analysis**: 内容分析（情感、语气、风格、话题、语言指标）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 请求校验、错误分级、Provider 接口与调用池、状态机、编排器、结果打包
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mock）
//! - **observability**: 日志初始化
//! - **output**: 结果落盘（JSON + JPEG）
//! - **platform**: 平台规格表
//! - **text**: 文本生成 Provider
//! - **visual**: 图片生成 Provider 与后处理

pub mod analysis;
pub mod config;
pub mod core;
pub mod llm;
pub mod observability;
pub mod output;
pub mod platform;
pub mod text;
pub mod visual;

pub use crate::core::{ContentPackage, GenerationRequest, Orchestrator, PipelineError};
