//! 品牌声音画像（VoiceProfile）及其组成部分

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 语气标签；声明顺序即规范顺序，用于并列时的决胜
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Professional,
    Casual,
    Formal,
    Friendly,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Casual, Tone::Formal, Tone::Friendly];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Formal => "formal",
            Tone::Friendly => "friendly",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 没有任何语气标记时的主导语气
pub const NEUTRAL_TONE: &str = "neutral";

/// 语气分布：各语气权重之和为 1；没有任何标记时全部为 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToneDistribution(BTreeMap<Tone, f64>);

impl ToneDistribution {
    /// 由原始标记计数归一化；总数为 0 时全部为 0（不会出现 NaN）
    pub fn from_counts(counts: &BTreeMap<Tone, usize>) -> Self {
        let total: usize = Tone::ALL.iter().map(|t| counts.get(t).copied().unwrap_or(0)).sum();
        let weights = Tone::ALL
            .iter()
            .map(|&tone| {
                let raw = counts.get(&tone).copied().unwrap_or(0);
                let weight = if total == 0 {
                    0.0
                } else {
                    raw as f64 / total as f64
                };
                (tone, weight)
            })
            .collect();
        Self(weights)
    }

    pub fn weight(&self, tone: Tone) -> f64 {
        self.0.get(&tone).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// 按规范顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (Tone, f64)> + '_ {
        Tone::ALL.iter().map(move |&t| (t, self.weight(t)))
    }

    /// 权重最大的语气；并列时取规范顺序靠前者；全为 0 时为 None
    pub fn dominant(&self) -> Option<Tone> {
        let mut best: Option<(Tone, f64)> = None;
        for (tone, weight) in self.iter() {
            if weight <= 0.0 {
                continue;
            }
            match best {
                Some((_, w)) if w >= weight => {}
                _ => best = Some((tone, weight)),
            }
        }
        best.map(|(tone, _)| tone)
    }

    /// 主导语气标签，全为 0 时为 "neutral"
    pub fn dominant_label(&self) -> &'static str {
        self.dominant().map(Tone::as_str).unwrap_or(NEUTRAL_TONE)
    }
}

impl Default for ToneDistribution {
    fn default() -> Self {
        Self::from_counts(&BTreeMap::new())
    }
}

/// 平均情感分：positive / negative / neutral ∈ [0,1]，compound ∈ [-1,1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
}

/// 写作风格指标
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleMetrics {
    /// 每句平均词数
    pub avg_sentence_length: f64,
    /// 不同词数 / 总词数，∈ [0,1]
    pub vocabulary_richness: f64,
    /// 每条帖子平均 emoji 数
    pub emoji_usage: f64,
}

/// 语言指标
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageMetrics {
    /// 每条帖子平均词数
    pub avg_post_length: f64,
    /// 平均词长（字符数）
    pub avg_word_length: f64,
    pub question_frequency: f64,
    pub exclamation_frequency: f64,
}

/// 分析阶段的输出：一次运行创建一次，之后只读
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub post_count: usize,
    pub sentiment: SentimentScores,
    pub tone: ToneDistribution,
    pub style: StyleMetrics,
    /// 按频次排序的高频话题（并列按首次出现顺序）
    pub topics: Vec<String>,
    pub language: LanguageMetrics,
}

impl VoiceProfile {
    pub fn dominant_tone(&self) -> &'static str {
        self.tone.dominant_label()
    }
}
