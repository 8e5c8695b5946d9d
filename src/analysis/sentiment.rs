//! 词典情感打分（VADER 风格）
//!
//! 每个情感词有一个 [-4, 4] 的强度；前两个词内出现否定词时强度乘以 -0.74。
//! 单条帖子得到 positive / negative / neutral 占比与 compound（s / sqrt(s² + 15)），多条帖子取平均。

use crate::analysis::tokenizer::words;
use crate::analysis::types::SentimentScores;

/// compound 归一化常数
const NORMALIZATION_ALPHA: f64 = 15.0;

/// 否定翻转系数
const NEGATION_SCALAR: f64 = -0.74;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "without",
    "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't", "can't", "cannot",
    "won't", "wouldn't", "shouldn't", "couldn't",
];

/// 通用社媒情感词典（小写单词 → 强度）
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // 正向
    ("love", 3.2),
    ("loved", 2.9),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("excellent", 3.2),
    ("great", 3.1),
    ("good", 1.9),
    ("best", 3.2),
    ("happy", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("grateful", 2.0),
    ("welcome", 2.0),
    ("win", 2.8),
    ("winner", 2.8),
    ("beautiful", 2.9),
    ("perfect", 2.7),
    ("fun", 2.3),
    ("enjoy", 2.2),
    ("support", 1.7),
    ("satisfaction", 1.9),
    ("quality", 1.3),
    ("innovation", 1.5),
    ("innovative", 1.9),
    ("proud", 2.1),
    ("celebrate", 2.7),
    ("delighted", 2.9),
    ("fantastic", 2.6),
    ("cool", 1.3),
    ("priority", 0.6),
    ("free", 1.9),
    ("easy", 1.9),
    ("success", 2.7),
    ("wow", 2.8),
    // 负向
    ("bad", -2.5),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("hate", -2.7),
    ("sad", -2.1),
    ("angry", -2.3),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("broken", -1.4),
    ("problem", -1.7),
    ("issue", -0.8),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("sorry", -0.3),
    ("delay", -1.3),
    ("delayed", -1.3),
    ("miss", -0.6),
    ("poor", -2.1),
    ("expensive", -0.9),
    ("recall", -1.6),
    ("outage", -1.9),
    ("slow", -1.0),
    ("annoying", -1.7),
    ("wrong", -2.1),
];

fn valence(word: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, v)| v)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word)
}

/// 单条文本的情感分；没有任何词时全部为 0
pub fn score_text(text: &str) -> SentimentScores {
    let tokens = words(text);
    if tokens.is_empty() {
        return SentimentScores::default();
    }

    let mut pos_sum = 0.0_f64;
    let mut neg_sum = 0.0_f64;
    let mut neu_count = 0.0_f64;
    let mut total_valence = 0.0_f64;

    for (i, token) in tokens.iter().enumerate() {
        let Some(mut v) = valence(token) else {
            neu_count += 1.0;
            continue;
        };
        let window = &tokens[i.saturating_sub(2)..i];
        if window.iter().any(|w| is_negation(w)) {
            v *= NEGATION_SCALAR;
        }
        total_valence += v;
        if v > 0.0 {
            pos_sum += v + 1.0;
        } else if v < 0.0 {
            neg_sum += v - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    let compound = total_valence / (total_valence * total_valence + NORMALIZATION_ALPHA).sqrt();

    SentimentScores {
        positive: pos_sum / total,
        negative: neg_sum.abs() / total,
        neutral: neu_count / total,
        compound: compound.clamp(-1.0, 1.0),
    }
}

/// 多条帖子的平均情感分；空输入返回全 0
pub fn average_sentiment(posts: &[String]) -> SentimentScores {
    if posts.is_empty() {
        return SentimentScores::default();
    }

    let mut sum = SentimentScores::default();
    for post in posts {
        let s = score_text(post);
        sum.positive += s.positive;
        sum.negative += s.negative;
        sum.neutral += s.neutral;
        sum.compound += s.compound;
    }

    let n = posts.len() as f64;
    SentimentScores {
        positive: sum.positive / n,
        negative: sum.negative / n,
        neutral: sum.neutral / n,
        compound: sum.compound / n,
    }
}
