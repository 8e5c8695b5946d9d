//! 图片 Prompt 构建

use crate::core::BrandGuidelines;
use crate::visual::StylePreferences;

/// 去掉 #话题 与 @提及 后的正文
pub fn extract_subject(text: &str) -> String {
    text.split_whitespace()
        .filter(|w| !w.starts_with('#') && !w.starts_with('@'))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn build_visual_prompt(
    text: &str,
    guidelines: &BrandGuidelines,
    prefs: &StylePreferences,
) -> String {
    let subject = extract_subject(text);
    let subject = if subject.is_empty() {
        "the brand".to_string()
    } else {
        subject
    };
    let colors = if guidelines.colors.is_empty() {
        "brand appropriate".to_string()
    } else {
        guidelines.colors.join(", ")
    };
    let brand_style = guidelines.style.as_deref().unwrap_or("modern");

    format!(
        "Create a social media image for: {subject}\n\
         Brand colors: {colors}\n\
         Brand style: {brand_style}\n\
         Mood: {mood}\n\
         Visual style: {style}\n\
         Composition: {composition}\n\
         Make it visually appealing and suitable for social media.",
        mood = prefs.mood,
        style = prefs.style,
        composition = prefs.composition,
    )
}
