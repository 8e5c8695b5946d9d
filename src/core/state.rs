//! 单次运行的状态机与过程事件
//!
//! Idle → Analyzing → GeneratingText → GeneratingVisuals → Compiling → Done；
//! Failed 只能从 Idle（校验失败）或 Analyzing（分析失败）进入。进入 GeneratingText 之后不会再失败。

use serde::Serialize;

/// 管线阶段
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    Idle,
    Analyzing,
    GeneratingText,
    GeneratingVisuals,
    Compiling,
    Done,
    Failed,
}

impl PipelinePhase {
    /// 是否允许从 self 迁移到 next
    pub fn can_transition_to(self, next: PipelinePhase) -> bool {
        use PipelinePhase::*;
        matches!(
            (self, next),
            (Idle, Analyzing)
                | (Idle, Failed)
                | (Analyzing, GeneratingText)
                | (Analyzing, Failed)
                | (GeneratingText, GeneratingVisuals)
                | (GeneratingVisuals, Compiling)
                | (Compiling, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, PipelinePhase::Done | PipelinePhase::Failed)
    }
}

/// 运行过程事件（可序列化为 JSON 供前端展示）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// 阶段切换
    Phase { phase: PipelinePhase },
    /// 文本批次完成
    TextGenerated { requested: usize, succeeded: usize },
    /// 第 index 条帖子的配图完成（成功或占位）
    VisualGenerated { index: usize, success: bool },
}

/// 单次运行的状态：只允许合法迁移
#[derive(Debug)]
pub struct RunState {
    phase: PipelinePhase,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            phase: PipelinePhase::Idle,
        }
    }

    pub fn phase(&self) -> PipelinePhase {
        self.phase
    }

    /// 迁移到 next；非法迁移返回 Err(当前阶段)，状态不变
    pub fn advance(&mut self, next: PipelinePhase) -> Result<PipelinePhase, PipelinePhase> {
        if !self.phase.can_transition_to(next) {
            return Err(self.phase);
        }
        tracing::info!(from = ?self.phase, to = ?next, "pipeline phase");
        self.phase = next;
        Ok(next)
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
