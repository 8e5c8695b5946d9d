//! 结果打包：文本与视觉素材按位置配对，附统计信息

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::VoiceProfile;
use crate::text::{TextBatchMetadata, TextBatchResult, TextItem};
use crate::visual::VisualAsset;

/// 一条文本与它对应的那一次视觉生成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostBundle {
    pub text: TextItem,
    pub visual: VisualAsset,
}

impl PostBundle {
    /// 仅当视觉生成成功时才视为“有图”
    pub fn visual_payload(&self) -> Option<&[u8]> {
        self.visual
            .is_success()
            .then_some(self.visual.payload.as_slice())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_posts: usize,
    pub posts_with_visuals: usize,
    pub generation_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPackage {
    pub posts: Vec<PostBundle>,
    pub statistics: Statistics,
    pub voice_profile: VoiceProfile,
    pub text_metadata: TextBatchMetadata,
}

/// 组装 ContentPackage；时间戳在此刻取得
///
/// 调用方保证 visuals 与 text.items 等长且顺序一致，不等长属于程序错误。
pub fn compile_package(
    text: TextBatchResult,
    visuals: Vec<VisualAsset>,
    voice_profile: VoiceProfile,
) -> ContentPackage {
    assert_eq!(
        text.items.len(),
        visuals.len(),
        "visual assets must align one-to-one with text items"
    );

    let posts: Vec<PostBundle> = text
        .items
        .into_iter()
        .zip(visuals)
        .map(|(text, visual)| PostBundle { text, visual })
        .collect();

    let posts_with_visuals = posts.iter().filter(|p| p.visual.is_success()).count();

    ContentPackage {
        statistics: Statistics {
            total_posts: posts.len(),
            posts_with_visuals,
            generation_timestamp: Utc::now(),
        },
        posts,
        voice_profile,
        text_metadata: text.metadata,
    }
}
