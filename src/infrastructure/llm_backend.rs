//! LLM 后端 - 基础设施层
//!
//! 持有唯一的 API 客户端资源，只暴露"文本生成"的能力
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Gemini, Azure, Doubao 等）

use std::future::Future;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AnswerError;

/// 文本生成后端
///
/// 回答服务通过这个 trait 调用 LLM，具体后端在编译期确定。
/// 测试可以注入内存实现，不需要网络。
pub trait GenerativeBackend {
    /// 对单个提示词生成一段回答文本
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, AnswerError>> + Send;
}

/// OpenAI 兼容接口的 LLM 后端
///
/// 职责：
/// - 持有唯一的 HTTP 客户端资源
/// - 暴露 generate() 能力
/// - 不认识 Document / 问题
/// - 不处理业务流程，也不做重试
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiBackend {
    /// 创建新的 LLM 后端
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }
}

impl GenerativeBackend for OpenAiBackend {
    async fn generate(&self, prompt: &str) -> Result<String, AnswerError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        // 构建消息列表（单轮对话，只有一条用户消息）
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| AnswerError::unknown(e.to_string()))?;
        let messages = vec![ChatCompletionRequestMessage::User(user_msg)];

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| AnswerError::unknown(e.to_string()))?;

        // 调用 API，失败直接归类上抛，不做重试
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            classify_failure(&e.to_string())
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容；没有文本内容时退回整个响应的调试表示
        let answer = match response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
        {
            Some(content) => content.trim().to_string(),
            None => {
                warn!("LLM 响应中没有文本内容，退回调试表示");
                format!("{:?}", response)
            }
        };

        Ok(answer)
    }
}

/// 根据错误消息文本归类 API 失败
///
/// OpenAI 兼容服务之间的错误结构差异很大，消息文本是最稳定的公共部分。
/// 认不出的失败一律归入 Unknown，调用方不需要再解析字符串。
fn classify_failure(message: &str) -> AnswerError {
    let lowered = message.to_lowercase();

    let auth_markers = [
        "api key",
        "api_key",
        "unauthorized",
        "authentication",
        "permission denied",
        "invalid key",
    ];
    if auth_markers.iter().any(|m| lowered.contains(m)) {
        return AnswerError::auth_failure(message);
    }

    let rate_markers = [
        "rate limit",
        "rate_limit",
        "too many requests",
        "quota",
        "resource_exhausted",
        "resource has been exhausted",
        "overloaded",
    ];
    if rate_markers.iter().any(|m| lowered.contains(m)) {
        return AnswerError::rate_limited(message);
    }

    AnswerError::unknown(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_failures() {
        assert!(matches!(
            classify_failure("Incorrect API key provided: sk-xxx"),
            AnswerError::AuthFailure { .. }
        ));
        assert!(matches!(
            classify_failure("401 Unauthorized"),
            AnswerError::AuthFailure { .. }
        ));
    }

    #[test]
    fn test_classify_rate_limits() {
        assert!(matches!(
            classify_failure("Rate limit reached for requests"),
            AnswerError::RateLimited { .. }
        ));
        // Gemini 的配额错误文案
        assert!(matches!(
            classify_failure("Resource has been exhausted (e.g. check quota)."),
            AnswerError::RateLimited { .. }
        ));
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert!(matches!(
            classify_failure("RATE LIMIT"),
            AnswerError::RateLimited { .. }
        ));
    }

    #[test]
    fn test_unrecognized_failures_are_unknown() {
        let err = classify_failure("connection reset by peer");
        assert_eq!(err, AnswerError::unknown("connection reset by peer"));
    }

    #[test]
    fn test_classified_error_keeps_original_message() {
        let err = classify_failure("Rate limit reached");
        assert_eq!(
            err,
            AnswerError::RateLimited {
                message: "Rate limit reached".to_string()
            }
        );
    }
}
