//! 核心编排层：请求与校验、错误分级、Provider 接口与调用池、状态机、编排器、结果打包

pub mod builder;
pub mod error;
pub mod orchestrator;
pub mod package;
pub mod provider;
pub mod request;
pub mod state;
pub mod task_scheduler;

pub use builder::{build_orchestrator, create_llm_from_config};
pub use error::{ErrorKind, PipelineError, ProviderError};
pub use orchestrator::Orchestrator;
pub use package::{compile_package, ContentPackage, PostBundle, Statistics};
pub use provider::{Availability, Provider, DEFAULT_CALL_TIMEOUT};
pub use request::{BrandGuidelines, GenerationParams, GenerationRequest, ValidRequest};
pub use state::{PipelineEvent, PipelinePhase, RunState};
pub use task_scheduler::ProviderPool;
