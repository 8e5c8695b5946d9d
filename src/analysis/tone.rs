//! 语气分析：按标记词统计四种语气
//!
//! 每个标记词在一条帖子里最多计一次；所有帖子的计数累加后归一化。

use std::collections::{BTreeMap, HashSet};

use crate::analysis::tokenizer::words;
use crate::analysis::types::{Tone, ToneDistribution};

/// 语气标记词
pub(crate) fn markers(tone: Tone) -> &'static [&'static str] {
    match tone {
        Tone::Professional => &["therefore", "consequently", "furthermore", "moreover"],
        Tone::Casual => &["hey", "cool", "awesome", "yeah"],
        Tone::Formal => &["hereby", "accordingly", "pursuant", "whilst"],
        Tone::Friendly => &["thanks", "please", "welcome", "happy"],
    }
}

/// 原始标记计数（各语气出现的不同标记词数，跨帖子累加）
pub fn marker_counts(posts: &[String]) -> BTreeMap<Tone, usize> {
    let mut counts: BTreeMap<Tone, usize> = Tone::ALL.iter().map(|&t| (t, 0)).collect();
    for post in posts {
        let tokens: HashSet<String> = words(post).into_iter().collect();
        for tone in Tone::ALL {
            let hits = markers(tone)
                .iter()
                .filter(|m| tokens.contains(**m))
                .count();
            *counts.entry(tone).or_insert(0) += hits;
        }
    }
    counts
}

pub fn analyze_tone(posts: &[String]) -> ToneDistribution {
    ToneDistribution::from_counts(&marker_counts(posts))
}
