//! postcraft 命令行入口
//!
//! 用法：`postcraft [request.json]`。未给出请求文件时使用内置示例请求。
//! 初始化日志、加载配置、构建编排器，运行一次管线并把结果写入输出目录。

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use postcraft::config::{load_config, AppConfig};
use postcraft::core::{build_orchestrator, BrandGuidelines, GenerationParams, GenerationRequest};
use postcraft::{observability, output};

#[derive(Debug, Parser)]
#[command(name = "postcraft", version)]
#[command(about = "Generate brand-consistent social posts with matching visuals")]
struct Cli {
    /// 请求 JSON 文件；省略时使用内置示例请求
    request: Option<PathBuf>,
}

/// 内置示例：三条既有帖子，为 Instagram 生成两条推广帖
fn demo_request() -> GenerationRequest {
    let mut extra = serde_json::Map::new();
    extra.insert(
        "visual_preferences".to_string(),
        serde_json::json!({
            "image_style": "minimalist",
            "composition": "centered",
            "color_scheme": "brand_colors"
        }),
    );

    GenerationRequest::new(
        vec![
            "Excited to announce our new product line! 🚀 #Innovation #Quality".to_string(),
            "Customer satisfaction is our top priority. Thanks for your continued support! 💯"
                .to_string(),
            "Join us this weekend for our biggest sale of the year! Don't miss out! 🎉".to_string(),
        ],
        BrandGuidelines {
            colors: vec![
                "#FF5733".to_string(),
                "#33FF57".to_string(),
                "#3357FF".to_string(),
            ],
            style: Some("modern".to_string()),
            tone: Some("professional".to_string()),
            extra,
        },
        GenerationParams {
            num_posts: 2,
            post_type: "promotional".to_string(),
            target_audience: Some("young professionals".to_string()),
            content_goals: vec!["engagement".to_string(), "brand_awareness".to_string()],
        },
        "instagram",
    )
}

async fn read_request(path: &Path) -> anyhow::Result<GenerationRequest> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid request JSON in {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    observability::init();

    let cfg = load_config(None).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    });

    let request = match cli.request.as_deref() {
        Some(path) => read_request(path).await?,
        None => {
            tracing::info!("No request file given, using built-in demo request");
            demo_request()
        }
    };

    let orchestrator = build_orchestrator(&cfg);
    let package = orchestrator
        .process(&request)
        .await
        .context("Content generation failed")?;

    let saved = output::save_package(&package, &cfg.output.dir)
        .await
        .context("Failed to save generated content")?;

    println!("Content generation completed successfully!");
    println!("Generated {} posts", package.statistics.total_posts);
    println!(
        "Posts with visuals: {}",
        package.statistics.posts_with_visuals
    );
    println!(
        "Text success rate: {:.0}%",
        package.text_metadata.success_rate * 100.0
    );
    println!("Saved content package to: {}", saved.package_file.display());
    for image in &saved.image_files {
        println!("Saved image to: {}", image.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_request_path_is_optional() {
        let cli = Cli::try_parse_from(["postcraft"]).unwrap();
        assert!(cli.request.is_none());

        let cli = Cli::try_parse_from(["postcraft", "req.json"]).unwrap();
        assert_eq!(cli.request, Some(PathBuf::from("req.json")));
    }

    #[test]
    fn test_help_flag_is_not_a_request_path() {
        let err = Cli::try_parse_from(["postcraft", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["postcraft", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_demo_request_is_valid() {
        assert!(demo_request().validate().is_ok());
    }
}
