//! 内容分析层：既有帖子 → 品牌声音画像（情感、语气、风格、话题、语言指标）

pub mod metrics;
pub mod provider;
pub mod sentiment;
pub mod tokenizer;
pub mod tone;
pub mod topics;
pub mod types;

pub use provider::{build_profile, AnalysisProvider, AnalysisSettings, LexiconAnalyzer};
pub use types::{
    LanguageMetrics, SentimentScores, StyleMetrics, Tone, ToneDistribution, VoiceProfile,
    NEUTRAL_TONE,
};
