//! 回答服务 - 业务能力层
//!
//! 只负责"提示词 -> 回答"能力，不关心流程

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AnswerError;
use crate::infrastructure::{GenerativeBackend, OpenAiBackend};

/// 回答服务
///
/// 职责：
/// - 把完整提示词交给后端生成回答
/// - 用超时上限约束每次调用
/// - 只处理单个提示词
/// - 不出现 Document / PDF
/// - 不关心回答如何被展示
pub struct AnswerService<B: GenerativeBackend> {
    backend: B,
    timeout_secs: u64,
}

impl AnswerService<OpenAiBackend> {
    /// 创建使用 OpenAI 兼容后端的回答服务
    pub fn new(config: &Config) -> Self {
        Self::with_backend(OpenAiBackend::new(config), config.llm_timeout_secs)
    }
}

impl<B: GenerativeBackend> AnswerService<B> {
    /// 使用指定后端创建回答服务，测试注入内存后端时使用
    pub fn with_backend(backend: B, timeout_secs: u64) -> Self {
        Self {
            backend,
            timeout_secs,
        }
    }

    /// 对单个提示词生成回答
    ///
    /// # 参数
    /// - `prompt`: 完整的提示词
    ///
    /// # 返回
    /// 后端生成的回答文本。超过配置的时间上限返回 `Timeout`；
    /// 一次失败直接上抛，不做重试。
    pub async fn answer(&self, prompt: &str) -> Result<String, AnswerError> {
        let timeout = Duration::from_secs(self.timeout_secs);
        debug!("开始生成回答（超时上限 {} 秒）", self.timeout_secs);

        match tokio::time::timeout(timeout, self.backend.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("⚠️ LLM 调用超过 {} 秒，已放弃", self.timeout_secs);
                Err(AnswerError::Timeout {
                    timeout_secs: self.timeout_secs,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoBackend;

    impl GenerativeBackend for EchoBackend {
        async fn generate(&self, prompt: &str) -> Result<String, AnswerError> {
            Ok(format!("echo: {}", prompt))
        }
    }

    struct SlowBackend;

    impl GenerativeBackend for SlowBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, AnswerError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("太迟了".to_string())
        }
    }

    struct FailingBackend;

    impl GenerativeBackend for FailingBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, AnswerError> {
            Err(AnswerError::auth_failure("Invalid API key"))
        }
    }

    #[tokio::test]
    async fn test_answer_passes_prompt_to_backend() {
        let service = AnswerService::with_backend(EchoBackend, 5);
        let answer = service.answer("什么是 Rust？").await.unwrap();
        assert_eq!(answer, "echo: 什么是 Rust？");
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_times_out() {
        let service = AnswerService::with_backend(SlowBackend, 1);
        let err = service.answer("any").await.unwrap_err();
        assert_eq!(err, AnswerError::Timeout { timeout_secs: 1 });
    }

    #[tokio::test]
    async fn test_backend_failure_passes_through_unchanged() {
        let service = AnswerService::with_backend(FailingBackend, 5);
        let err = service.answer("any").await.unwrap_err();
        assert_eq!(err, AnswerError::auth_failure("Invalid API key"));
    }
}
