//! 话题提取：去停用词后按词频取前 K 个
//!
//! 排序稳定：词频相同按首次出现顺序，同样的输入总是得到同样的结果。

use std::collections::HashMap;

use crate::analysis::tokenizer::{contains_cjk, words};

/// 默认话题数量
pub const DEFAULT_TOPIC_COUNT: usize = 10;

const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "been", "before", "being", "but", "by", "can", "could", "did", "do", "does", "don't", "for",
    "from", "get", "got", "had", "has", "have", "he", "her", "here", "him", "his", "how", "i",
    "if", "in", "into", "is", "it", "it's", "its", "just", "let's", "like", "more", "most", "my",
    "no", "not", "now", "of", "on", "one", "only", "or", "our", "out", "over", "so", "some",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "to", "too", "up", "us", "very", "was", "we", "we're", "were", "what", "when", "where",
    "which", "while", "who", "why", "will", "with", "would", "yet", "you", "you're", "your",
    "yours", "don", "miss", "join", "thanks", "thank", "please", "hope", "much", "many",
    "的", "了", "和", "是", "在", "我们", "我", "你", "你们", "也", "都", "就", "这", "那",
];

fn is_topic_candidate(word: &str) -> bool {
    if STOP_WORDS.contains(&word) || word.chars().all(|c| c.is_numeric()) {
        return false;
    }
    if contains_cjk(word) {
        word.chars().count() >= 2
    } else {
        word.chars().count() >= 3
    }
}

/// 提取前 `limit` 个话题
pub fn extract_topics(posts: &[String], limit: usize) -> Vec<String> {
    // word -> (count, first_seen)
    let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
    let mut seen = 0usize;

    for post in posts {
        for word in words(post) {
            if !is_topic_candidate(&word) {
                continue;
            }
            let entry = stats.entry(word).or_insert((0, seen));
            entry.0 += 1;
            seen += 1;
        }
    }

    let mut ranked: Vec<(String, usize, usize)> = stats
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, _, _)| word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_posts() {
        assert!(extract_topics(&[], DEFAULT_TOPIC_COUNT).is_empty());
    }

    #[test]
    fn test_ranked_by_frequency() {
        let topics = extract_topics(
            &posts(&["coffee beans and coffee mugs", "fresh coffee beans"]),
            DEFAULT_TOPIC_COUNT,
        );
        assert_eq!(topics, vec!["coffee", "beans", "mugs", "fresh"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let input = posts(&["zebra apple mango", "mango apple zebra"]);
        for _ in 0..5 {
            assert_eq!(
                extract_topics(&input, DEFAULT_TOPIC_COUNT),
                vec!["zebra", "apple", "mango"]
            );
        }
    }

    #[test]
    fn test_limit_applied() {
        let input = posts(&["alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima"]);
        let topics = extract_topics(&input, DEFAULT_TOPIC_COUNT);
        assert_eq!(topics.len(), 10);
        assert_eq!(topics[0], "alpha");
    }

    #[test]
    fn test_hashtags_count_as_topics() {
        let topics = extract_topics(&posts(&["New line #Innovation #Quality"]), DEFAULT_TOPIC_COUNT);
        assert!(topics.contains(&"innovation".to_string()));
        assert!(topics.contains(&"quality".to_string()));
    }
}
