//! 结果落盘：content_package_<时间戳>.json + 每张成功生成的图片 image_<时间戳>_<序号>.jpg

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;

use crate::core::ContentPackage;

/// 本次写出的文件
#[derive(Debug, Clone, PartialEq)]
pub struct SavedOutput {
    pub package_file: PathBuf,
    pub image_files: Vec<PathBuf>,
}

/// 以当前本地时间为文件名时间戳写出结果
pub async fn save_package(package: &ContentPackage, dir: &Path) -> anyhow::Result<SavedOutput> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    save_package_with_timestamp(package, dir, &timestamp).await
}

/// JSON 中不含图片二进制；占位图不落盘
pub async fn save_package_with_timestamp(
    package: &ContentPackage,
    dir: &Path,
    timestamp: &str,
) -> anyhow::Result<SavedOutput> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output dir {}", dir.display()))?;

    let package_file = dir.join(format!("content_package_{timestamp}.json"));
    let json = serde_json::to_vec_pretty(package).context("Failed to serialize content package")?;
    tokio::fs::write(&package_file, json)
        .await
        .with_context(|| format!("Failed to write {}", package_file.display()))?;
    tracing::info!(path = %package_file.display(), "saved content package");

    let mut image_files = Vec::new();
    for (i, bundle) in package.posts.iter().enumerate() {
        let Some(payload) = bundle.visual_payload() else {
            continue;
        };
        let image_file = dir.join(format!("image_{timestamp}_{i}.jpg"));
        tokio::fs::write(&image_file, payload)
            .await
            .with_context(|| format!("Failed to write {}", image_file.display()))?;
        tracing::info!(path = %image_file.display(), "saved image");
        image_files.push(image_file);
    }

    Ok(SavedOutput {
        package_file,
        image_files,
    })
}
