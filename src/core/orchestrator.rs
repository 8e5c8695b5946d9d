//! 管线编排器：校验 → 分析 → 文本生成 → 逐条配图 → 打包
//!
//! 只有校验失败与分析失败会终止运行；进入文本生成之后，所有 Provider 失败都被吸收为元数据。
//! 每次运行分配一个 run_id，所有日志都在该 span 下输出。可选地通过 mpsc 通道推送过程事件。

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

use crate::analysis::AnalysisProvider;
use crate::core::package::{compile_package, ContentPackage};
use crate::core::request::GenerationRequest;
use crate::core::state::{PipelineEvent, PipelinePhase, RunState};
use crate::core::{BrandGuidelines, PipelineError, ProviderError, ProviderPool};
use crate::platform::{PlatformSpec, PlatformTable};
use crate::text::{GenerationContext, TextItem, TextProvider};
use crate::visual::{StylePreferences, VisualAsset, VisualProvider};

type EventSender<'a> = Option<&'a mpsc::UnboundedSender<PipelineEvent>>;

/// 管线编排器：持有三个 Provider、平台规格表与调用池，可被多次运行共享
pub struct Orchestrator {
    analysis: Arc<dyn AnalysisProvider>,
    text: Arc<dyn TextProvider>,
    visual: Arc<dyn VisualProvider>,
    platforms: PlatformTable,
    pool: ProviderPool,
}

impl Orchestrator {
    pub fn new(
        analysis: Arc<dyn AnalysisProvider>,
        text: Arc<dyn TextProvider>,
        visual: Arc<dyn VisualProvider>,
        platforms: PlatformTable,
        pool: ProviderPool,
    ) -> Self {
        tracing::info!(
            analysis = analysis.name(),
            text = text.name(),
            text_configured = text.availability().is_configured(),
            visual = visual.name(),
            visual_configured = visual.availability().is_configured(),
            max_concurrent_calls = pool.capacity(),
            "orchestrator ready"
        );
        Self {
            analysis,
            text,
            visual,
            platforms,
            pool,
        }
    }

    pub fn platforms(&self) -> &PlatformTable {
        &self.platforms
    }

    /// 处理一个请求；仅在校验失败或分析失败时返回错误
    pub async fn process(&self, request: &GenerationRequest) -> Result<ContentPackage, PipelineError> {
        self.process_with_events(request, None).await
    }

    /// 同 `process`，并把阶段切换与逐条进度推送到 events
    pub async fn process_with_events(
        &self,
        request: &GenerationRequest,
        events: EventSender<'_>,
    ) -> Result<ContentPackage, PipelineError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("pipeline_run", %run_id);
        self.run(request, events).instrument(span).await
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        events: EventSender<'_>,
    ) -> Result<ContentPackage, PipelineError> {
        let mut state = RunState::new();

        let valid = match request.validate() {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(error = %e, "request rejected");
                advance(&mut state, PipelinePhase::Failed, events);
                return Err(e);
            }
        };

        advance(&mut state, PipelinePhase::Analyzing, events);
        let analysis = self
            .pool
            .dispatch(
                "content_analysis",
                self.analysis.call_timeout(),
                self.analysis.analyze(valid.existing_posts),
            )
            .await;
        let profile = match analysis {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!(error = %e, "content analysis failed, aborting run");
                advance(&mut state, PipelinePhase::Failed, events);
                return Err(PipelineError::Analysis(e));
            }
        };

        advance(&mut state, PipelinePhase::GeneratingText, events);
        let spec = self.platforms.resolve(valid.platform);
        let context = GenerationContext::derive(&profile, valid.params, valid.platform, &spec);
        let text = self.text.generate(&profile, &context).await;
        emit(
            events,
            PipelineEvent::TextGenerated {
                requested: text.metadata.requested,
                succeeded: text.metadata.succeeded,
            },
        );

        advance(&mut state, PipelinePhase::GeneratingVisuals, events);
        let prefs = StylePreferences::for_post_type(&context.post_type);
        let visuals = self
            .generate_visuals(&text.items, valid.brand_guidelines, &prefs, &spec, events)
            .await;

        advance(&mut state, PipelinePhase::Compiling, events);
        let package = compile_package(text, visuals, profile);
        tracing::info!(
            total_posts = package.statistics.total_posts,
            posts_with_visuals = package.statistics.posts_with_visuals,
            "content package compiled"
        );

        advance(&mut state, PipelinePhase::Done, events);
        Ok(package)
    }

    /// 每条文本恰好产出一个素材，顺序与文本一致
    async fn generate_visuals(
        &self,
        items: &[TextItem],
        guidelines: &BrandGuidelines,
        prefs: &StylePreferences,
        spec: &PlatformSpec,
        events: EventSender<'_>,
    ) -> Vec<VisualAsset> {
        let mut visuals = Vec::with_capacity(items.len());
        for item in items {
            let call = async {
                Ok::<_, ProviderError>(
                    self.visual
                        .generate(&item.content, guidelines, prefs, spec)
                        .await,
                )
            };
            let asset = match self
                .pool
                .dispatch("visual_generation", self.visual.call_timeout(), call)
                .await
            {
                Ok(asset) => asset,
                Err(e) => {
                    tracing::warn!(index = item.index, error = %e, "visual call aborted, using placeholder");
                    VisualAsset::placeholder(spec, None, e.to_string())
                }
            };
            emit(
                events,
                PipelineEvent::VisualGenerated {
                    index: item.index,
                    success: asset.is_success(),
                },
            );
            visuals.push(asset);
        }
        visuals
    }
}

fn emit(events: EventSender<'_>, event: PipelineEvent) {
    if let Some(tx) = events {
        // 接收端已关闭时丢弃事件
        let _ = tx.send(event);
    }
}

fn advance(state: &mut RunState, next: PipelinePhase, events: EventSender<'_>) {
    match state.advance(next) {
        Ok(phase) => emit(events, PipelineEvent::Phase { phase }),
        Err(current) => {
            tracing::error!(?current, ?next, "illegal pipeline transition");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::analysis::{LexiconAnalyzer, VoiceProfile};
    use crate::core::{ErrorKind, GenerationParams, Provider};
    use crate::llm::MockLlmClient;
    use crate::text::LlmTextProvider;
    use crate::visual::{ImageVisualProvider, MockImageClient, VisualSettings};

    struct FailingAnalyzer;

    impl Provider for FailingAnalyzer {
        fn name(&self) -> &str {
            "failing_analyzer"
        }
    }

    #[async_trait]
    impl AnalysisProvider for FailingAnalyzer {
        async fn analyze(&self, _posts: &[String]) -> Result<VoiceProfile, ProviderError> {
            Err(ProviderError::Request("model offline".to_string()))
        }
    }

    /// 分析耗时超过自身声明的超时
    struct SlowAnalyzer;

    impl Provider for SlowAnalyzer {
        fn name(&self) -> &str {
            "slow_analyzer"
        }

        fn call_timeout(&self) -> Duration {
            Duration::from_millis(20)
        }
    }

    #[async_trait]
    impl AnalysisProvider for SlowAnalyzer {
        async fn analyze(&self, _posts: &[String]) -> Result<VoiceProfile, ProviderError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(VoiceProfile::default())
        }
    }

    /// 计数的文本 Provider，用来确认失败路径上没有调用
    #[derive(Default)]
    struct CountingText {
        calls: AtomicUsize,
    }

    impl Provider for CountingText {
        fn name(&self) -> &str {
            "counting_text"
        }
    }

    #[async_trait]
    impl TextProvider for CountingText {
        async fn generate(
            &self,
            _profile: &VoiceProfile,
            context: &GenerationContext,
        ) -> crate::text::TextBatchResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            crate::text::TextBatchResult::new(vec![], vec![], context)
        }
    }

    /// 永远不返回的视觉 Provider，用于超时路径
    struct StalledVisual;

    impl Provider for StalledVisual {
        fn name(&self) -> &str {
            "stalled_visual"
        }

        fn call_timeout(&self) -> Duration {
            Duration::from_millis(20)
        }
    }

    #[async_trait]
    impl VisualProvider for StalledVisual {
        async fn generate(
            &self,
            _text: &str,
            _guidelines: &BrandGuidelines,
            _prefs: &StylePreferences,
            _spec: &PlatformSpec,
        ) -> VisualAsset {
            tokio::time::sleep(Duration::from_secs(5)).await;
            VisualAsset::generated(vec![], String::new(), &PlatformSpec::default())
        }
    }

    fn request(num_posts: usize) -> GenerationRequest {
        GenerationRequest::new(
            vec!["Hey, awesome news!".to_string()],
            BrandGuidelines::default(),
            GenerationParams {
                num_posts,
                ..GenerationParams::default()
            },
            "instagram",
        )
    }

    fn orchestrator(
        analysis: Arc<dyn AnalysisProvider>,
        text: Arc<dyn TextProvider>,
        visual: Arc<dyn VisualProvider>,
    ) -> Orchestrator {
        Orchestrator::new(
            analysis,
            text,
            visual,
            PlatformTable::with_defaults(),
            ProviderPool::new(2),
        )
    }

    #[tokio::test]
    async fn test_analysis_failure_is_fatal() {
        let text = Arc::new(CountingText::default());
        let orch = orchestrator(
            Arc::new(FailingAnalyzer),
            text.clone(),
            Arc::new(ImageVisualProvider::unavailable(VisualSettings::default())),
        );
        let err = orch.process(&request(2)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AnalysisFailure);
        assert_eq!(text.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analysis_timeout_is_fatal() {
        let text = Arc::new(CountingText::default());
        let orch = orchestrator(
            Arc::new(SlowAnalyzer),
            text.clone(),
            Arc::new(ImageVisualProvider::unavailable(VisualSettings::default())),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();
        let err = orch
            .process_with_events(&request(2), Some(&tx))
            .await
            .unwrap_err();
        drop(tx);

        assert_eq!(err.kind(), ErrorKind::AnalysisFailure);
        assert!(matches!(
            err,
            PipelineError::Analysis(ProviderError::Timeout { timeout_ms: 20, .. })
        ));
        assert_eq!(text.calls.load(Ordering::SeqCst), 0);

        let mut seen = Vec::new();
        while let Some(event) = rx.recv().await {
            seen.push(event);
        }
        assert_eq!(
            seen,
            vec![
                PipelineEvent::Phase { phase: PipelinePhase::Analyzing },
                PipelineEvent::Phase { phase: PipelinePhase::Failed },
            ]
        );
    }

    #[tokio::test]
    async fn test_validation_failure_before_providers() {
        let text = Arc::new(CountingText::default());
        let orch = orchestrator(
            Arc::new(LexiconAnalyzer::default()),
            text.clone(),
            Arc::new(ImageVisualProvider::unavailable(VisualSettings::default())),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();
        let err = orch
            .process_with_events(&GenerationRequest::default(), Some(&tx))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(text.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            rx.recv().await,
            Some(PipelineEvent::Phase {
                phase: PipelinePhase::Failed
            })
        );
    }

    #[tokio::test]
    async fn test_event_sequence() {
        let mock_image = Arc::new(MockImageClient::new());
        let orch = orchestrator(
            Arc::new(LexiconAnalyzer::default()),
            Arc::new(LlmTextProvider::new(
                Arc::new(MockLlmClient::new()),
                ProviderPool::new(2),
            )),
            Arc::new(ImageVisualProvider::new(mock_image, VisualSettings::default())),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();
        let package = orch.process_with_events(&request(1), Some(&tx)).await.unwrap();
        drop(tx);

        let mut seen = Vec::new();
        while let Some(event) = rx.recv().await {
            seen.push(event);
        }
        assert_eq!(package.statistics.total_posts, 1);
        assert_eq!(
            seen,
            vec![
                PipelineEvent::Phase { phase: PipelinePhase::Analyzing },
                PipelineEvent::Phase { phase: PipelinePhase::GeneratingText },
                PipelineEvent::TextGenerated { requested: 1, succeeded: 1 },
                PipelineEvent::Phase { phase: PipelinePhase::GeneratingVisuals },
                PipelineEvent::VisualGenerated { index: 0, success: true },
                PipelineEvent::Phase { phase: PipelinePhase::Compiling },
                PipelineEvent::Phase { phase: PipelinePhase::Done },
            ]
        );
    }

    #[tokio::test]
    async fn test_visual_timeout_keeps_alignment() {
        let orch = orchestrator(
            Arc::new(LexiconAnalyzer::default()),
            Arc::new(LlmTextProvider::new(
                Arc::new(MockLlmClient::new()),
                ProviderPool::new(2),
            )),
            Arc::new(StalledVisual),
        );
        let package = orch.process(&request(2)).await.unwrap();
        assert_eq!(package.posts.len(), 2);
        assert_eq!(package.statistics.posts_with_visuals, 0);
        for bundle in &package.posts {
            assert!(!bundle.visual.payload.is_empty());
            assert!(bundle.visual.metadata.prompt_used.is_none());
            assert!(bundle
                .visual
                .metadata
                .error
                .as_deref()
                .unwrap()
                .contains("timed out"));
        }
    }

    #[tokio::test]
    async fn test_unknown_platform_uses_default_spec() {
        let mut req = request(1);
        req.platform = Some("myspace".to_string());
        let orch = orchestrator(
            Arc::new(LexiconAnalyzer::default()),
            Arc::new(LlmTextProvider::new(
                Arc::new(MockLlmClient::new()),
                ProviderPool::new(2),
            )),
            Arc::new(ImageVisualProvider::unavailable(VisualSettings::default())),
        );
        let package = orch.process(&req).await.unwrap();
        assert_eq!(
            package.posts[0].visual.metadata.platform_spec,
            PlatformSpec::default()
        );
    }
}
