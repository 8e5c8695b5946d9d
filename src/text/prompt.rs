//! 文本生成 Prompt：由品牌画像与生成上下文拼出 system prompt

use crate::analysis::VoiceProfile;
use crate::text::GenerationContext;

/// 未配置文本后端时使用的占位帖子
pub const PLACEHOLDER_POST: &str =
    "This is a placeholder post. Please provide an OpenAI API key for actual content generation.";

/// 每次生成使用的 user 指令
pub const USER_INSTRUCTION: &str = "Generate a social media post.";

/// Prompt 中列出的话题数
const PROMPT_TOPICS: usize = 5;

pub fn build_system_prompt(profile: &VoiceProfile, context: &GenerationContext) -> String {
    let topics = if profile.topics.is_empty() {
        "none identified".to_string()
    } else {
        profile
            .topics
            .iter()
            .take(PROMPT_TOPICS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut prompt = format!(
        "You write social media content for a brand with this voice:\n\
         - Dominant tone: {tone}\n\
         - Average sentence length: {sentence:.1} words\n\
         - Vocabulary richness: {richness:.2}\n\
         - Common topics: {topics}\n\n\
         Write one {post_type} post for {platform} that matches this voice.\n",
        tone = context.dominant_tone,
        sentence = profile.style.avg_sentence_length,
        richness = profile.style.vocabulary_richness,
        post_type = context.post_type,
        platform = context.platform,
    );

    if let Some(audience) = &context.target_audience {
        prompt.push_str(&format!("Target audience: {audience}.\n"));
    }
    if !context.content_goals.is_empty() {
        prompt.push_str(&format!(
            "Content goals: {}.\n",
            context.content_goals.join(", ")
        ));
    }
    if let Some(max) = context.max_text_length {
        prompt.push_str(&format!("Keep the post under {max} characters.\n"));
    }

    prompt.push_str(
        "\nGuidelines:\n\
         - Be concise and platform-appropriate\n\
         - Add relevant hashtags where they fit\n\
         - Stay within the brand's established tone and style\n\
         - Reply with the post text only",
    );
    prompt
}

/// 按字符截断到 max 个字符以内（不拆分 UTF-8 字符）
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].trim_end().to_string(),
        None => text.to_string(),
    }
}
