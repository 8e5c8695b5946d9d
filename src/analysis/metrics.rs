//! 风格与语言指标

use std::collections::HashSet;

use crate::analysis::tokenizer::{count_emoji, count_exclamations, count_questions, sentences, words};
use crate::analysis::types::{LanguageMetrics, StyleMetrics};

/// 风格指标：句长、词汇丰富度、emoji 使用；空输入全部为 0
pub fn analyze_style(posts: &[String]) -> StyleMetrics {
    if posts.is_empty() {
        return StyleMetrics::default();
    }

    let mut total_words = 0usize;
    let mut total_sentences = 0usize;
    let mut total_emoji = 0usize;
    let mut unique: HashSet<String> = HashSet::new();

    for post in posts {
        let tokens = words(post);
        total_words += tokens.len();
        total_sentences += sentences(post).len();
        total_emoji += count_emoji(post);
        unique.extend(tokens);
    }

    StyleMetrics {
        avg_sentence_length: ratio(total_words, total_sentences),
        vocabulary_richness: ratio(unique.len(), total_words),
        emoji_usage: ratio(total_emoji, posts.len()),
    }
}

/// 语言指标：帖子长度、词长、问号/感叹号频率；空输入全部为 0
pub fn analyze_language(posts: &[String]) -> LanguageMetrics {
    if posts.is_empty() {
        return LanguageMetrics::default();
    }

    let mut total_words = 0usize;
    let mut total_chars = 0usize;
    let mut questions = 0usize;
    let mut exclamations = 0usize;

    for post in posts {
        let tokens = words(post);
        total_words += tokens.len();
        total_chars += tokens.iter().map(|w| w.chars().count()).sum::<usize>();
        questions += count_questions(post);
        exclamations += count_exclamations(post);
    }

    let n = posts.len();
    LanguageMetrics {
        avg_post_length: ratio(total_words, n),
        avg_word_length: ratio(total_chars, total_words),
        question_frequency: ratio(questions, n),
        exclamation_frequency: ratio(exclamations, n),
    }
}

/// 分母为 0 时返回 0
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_style_empty() {
        assert_eq!(analyze_style(&[]), StyleMetrics::default());
        assert_eq!(analyze_language(&[]), LanguageMetrics::default());
    }

    #[test]
    fn test_style_metrics() {
        let style = analyze_style(&posts(&["Big news today. We launch now! 🚀", "Join us 🎉"]));
        // 8 words over 3 sentences
        assert!((style.avg_sentence_length - 8.0 / 3.0).abs() < 1e-9);
        assert_eq!(style.vocabulary_richness, 1.0);
        assert_eq!(style.emoji_usage, 1.0);
    }

    #[test]
    fn test_vocabulary_richness_bounded() {
        let style = analyze_style(&posts(&["sale sale sale", "sale"]));
        assert_eq!(style.vocabulary_richness, 0.25);
    }

    #[test]
    fn test_language_metrics() {
        let m = analyze_language(&posts(&["Ready? Go!", "Now!!"]));
        assert_eq!(m.avg_post_length, 1.5);
        assert!((m.avg_word_length - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(m.question_frequency, 0.5);
        assert_eq!(m.exclamation_frequency, 1.5);
    }

    #[test]
    fn test_post_without_words() {
        let style = analyze_style(&posts(&["🎉🎉"]));
        assert_eq!(style.avg_sentence_length, 0.0);
        assert_eq!(style.vocabulary_richness, 0.0);
        assert_eq!(style.emoji_usage, 2.0);
    }
}
