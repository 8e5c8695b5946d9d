//! 分词与字符分类
//!
//! 品牌帖子可能是中英文混合：包含 CJK 字符时用 jieba-rs 切词，否则按非字母数字字符切分。
//! 链接（http / https / www）整体跳过，# 话题与 @ 提及只保留词本身。

use std::sync::OnceLock;

use jieba_rs::Jieba;

/// 全局 Jieba 实例（延迟初始化）
static JIEBA: OnceLock<Jieba> = OnceLock::new();

fn get_jieba() -> &'static Jieba {
    JIEBA.get_or_init(Jieba::new)
}

/// 判断字符是否为 CJK（中日韩）字符
fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |   // CJK Unified Ideographs Extension A
        '\u{F900}'..='\u{FAFF}' |   // CJK Compatibility Ideographs
        '\u{3040}'..='\u{309F}' |   // Hiragana
        '\u{30A0}'..='\u{30FF}'     // Katakana
    )
}

/// 判断文本是否包含 CJK 字符
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// 判断字符是否为 emoji（常用区段）
pub fn is_emoji(c: char) -> bool {
    matches!(c,
        '\u{1F300}'..='\u{1F5FF}' |   // Misc Symbols and Pictographs
        '\u{1F600}'..='\u{1F64F}' |   // Emoticons
        '\u{1F680}'..='\u{1F6FF}' |   // Transport and Map
        '\u{1F900}'..='\u{1F9FF}' |   // Supplemental Symbols and Pictographs
        '\u{1FA70}'..='\u{1FAFF}' |   // Symbols and Pictographs Extended-A
        '\u{1F1E6}'..='\u{1F1FF}' |   // Regional indicators
        '\u{2600}'..='\u{26FF}' |     // Misc Symbols
        '\u{2700}'..='\u{27BF}'       // Dingbats
    )
}

pub fn count_emoji(text: &str) -> usize {
    text.chars().filter(|c| is_emoji(*c)).count()
}

fn is_link(chunk: &str) -> bool {
    let lower = chunk.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}

/// 英文/西文切词：按非字母数字切分，去掉首尾撇号，转小写
fn split_latin(text: &str, out: &mut Vec<String>) {
    for piece in text.split(|c: char| !is_word_char(c)) {
        let word = piece.trim_matches('\'');
        if !word.is_empty() {
            out.push(word.to_lowercase());
        }
    }
}

/// 切词：返回小写词序列（保持出现顺序），不含标点、emoji 与链接
pub fn words(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for chunk in text.split_whitespace().filter(|c| !is_link(c)) {
        if contains_cjk(chunk) {
            for token in get_jieba().cut(chunk, false) {
                split_latin(token, &mut out);
            }
        } else {
            split_latin(chunk, &mut out);
        }
    }
    out
}

/// 句子切分：按中英文句末标点切分，丢弃空句
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(|c: char| matches!(c, '.' | '!' | '?' | '。' | '！' | '？'))
        .map(str::trim)
        .filter(|s| s.chars().any(is_word_char))
        .collect()
}

/// 问号数量（含全角）
pub fn count_questions(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, '?' | '？')).count()
}

/// 感叹号数量（含全角）
pub fn count_exclamations(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, '!' | '！')).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_english() {
        let tokens = words("Thanks so much, hope you're happy with the update!");
        assert_eq!(
            tokens,
            vec!["thanks", "so", "much", "hope", "you're", "happy", "with", "the", "update"]
        );
    }

    #[test]
    fn test_words_strip_hashtags_and_links() {
        let tokens = words("New drop #Innovation @acme https://acme.com/launch 🚀");
        assert_eq!(tokens, vec!["new", "drop", "innovation", "acme"]);
    }

    #[test]
    fn test_words_chinese() {
        let tokens = words("我喜欢编程和人工智能");
        assert!(!tokens.is_empty());
        assert!(tokens.iter().any(|t| t.contains("编程")));
    }

    #[test]
    fn test_words_empty() {
        assert!(words("").is_empty());
        assert!(words("  !!! 🎉 ").is_empty());
    }

    #[test]
    fn test_sentences() {
        let s = sentences("Big news! Are you ready? We are. ");
        assert_eq!(s, vec!["Big news", "Are you ready", "We are"]);
        assert_eq!(sentences("今天发布。欢迎试用！").len(), 2);
        assert!(sentences("...").is_empty());
    }

    #[test]
    fn test_count_emoji() {
        assert_eq!(count_emoji("Excited 🚀 #Innovation 💯🎉"), 3);
        assert_eq!(count_emoji("plain text, café"), 0);
    }

    #[test]
    fn test_contains_cjk() {
        assert!(contains_cjk("你好"));
        assert!(contains_cjk("Hello 世界"));
        assert!(!contains_cjk("Hello World"));
    }

    #[test]
    fn test_punctuation_counts() {
        assert_eq!(count_questions("Why? Really？"), 2);
        assert_eq!(count_exclamations("Wow! 太棒了！"), 2);
    }
}
