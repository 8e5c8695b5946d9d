//! Provider 调用池：并发上限 + 单次调用超时
//!
//! 所有 Provider 调用都经过 `ProviderPool::dispatch`：先拿 Semaphore 许可（限制同时在途的调用数），
//! 再在超时内等待结果；超时转为 `ProviderError::Timeout`。每次调用输出一条审计日志。
//! 同一个池可以在多次运行之间共享，用来限制进程内的总并发。

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::time::timeout;

use crate::core::ProviderError;

/// 有界 Provider 调用池
#[derive(Debug, Clone)]
pub struct ProviderPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl ProviderPool {
    pub fn new(max_concurrent_calls: usize) -> Self {
        let capacity = max_concurrent_calls.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 当前空闲的许可数
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// 在池中执行一次 Provider 调用；超时返回 Timeout，调用自身的错误原样返回
    pub async fn dispatch<T, F>(
        &self,
        operation: &str,
        limit: Duration,
        call: F,
    ) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::PoolClosed)?;

        let start = Instant::now();
        let result = timeout(limit, call).await;

        let outcome = match &result {
            Ok(Ok(_)) => "ok",
            Ok(Err(_)) => "error",
            Err(_) => "timeout",
        };
        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(operation, outcome, duration_ms, "provider call");

        match result {
            Ok(inner) => inner,
            Err(_) => Err(ProviderError::Timeout {
                operation: operation.to_string(),
                timeout_ms: limit.as_millis() as u64,
            }),
        }
    }
}

impl Default for ProviderPool {
    fn default() -> Self {
        Self::new(4)
    }
}
