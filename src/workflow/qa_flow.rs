//! 问答流程 - 流程层
//!
//! 核心职责：定义"一个问题"的完整处理流程
//!
//! 流程顺序：
//! 1. 检查文档是否已加载
//! 2. 提取 PDF 文本
//! 3. 构建提示词
//! 4. 调用回答服务
//!
//! 任何一步失败都立即短路返回，后续步骤不再执行。

use std::future::Future;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::infrastructure::{GenerativeBackend, OpenAiBackend};
use crate::models::Document;
use crate::services::{build_prompt, AnswerService, PdfExtractor};
use crate::utils::logging::truncate_text;

/// 问答流程
///
/// 职责：
/// - 编排完整的问答流程（提取 → 拼提示词 → 回答）
/// - 决定每一步失败时如何短路
/// - 不持有任何会话状态
/// - 只依赖业务能力（services）
pub struct QaFlow<B: GenerativeBackend> {
    extractor: PdfExtractor,
    answer_service: AnswerService<B>,
    verbose_logging: bool,
}

impl QaFlow<OpenAiBackend> {
    /// 创建使用 OpenAI 兼容后端的问答流程
    pub fn new(config: &Config) -> Self {
        Self {
            extractor: PdfExtractor::new(),
            answer_service: AnswerService::new(config),
            verbose_logging: config.verbose_logging,
        }
    }
}

impl<B: GenerativeBackend> QaFlow<B> {
    /// 使用指定后端创建问答流程，测试注入内存后端时使用
    pub fn with_backend(backend: B, config: &Config) -> Self {
        Self {
            extractor: PdfExtractor::new(),
            answer_service: AnswerService::with_backend(backend, config.llm_timeout_secs),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 对已加载的文档回答一个问题
    ///
    /// # 参数
    /// - `document`: 当前加载的 PDF（未加载时传 None）
    /// - `question`: 用户的问题
    ///
    /// # 返回
    /// 回答文本；每一步的失败都带类别标签原样上抛
    pub async fn run(&self, document: Option<&Document>, question: &str) -> PipelineResult<String> {
        // ========== 流程 1: 检查文档 ==========
        let document = document.ok_or(PipelineError::NoDocument)?;

        // ========== 流程 2: 提取文本 ==========
        info!("📄 正在提取 PDF 文本: {}", document.name());
        let pdf_text = self.extractor.extract(document)?;
        info!("✓ 文本提取完成，共 {} 字符", pdf_text.chars().count());

        if self.verbose_logging {
            debug!("文本预览: {}", truncate_text(&pdf_text, 200));
        }

        // ========== 流程 3: 构建提示词 ==========
        let prompt = build_prompt(&pdf_text, question);
        debug!("提示词构建完成，共 {} 字符", prompt.chars().count());

        // ========== 流程 4: 生成回答 ==========
        info!("🔍 正在生成回答...");
        let answer = self.answer_service.answer(&prompt).await?;
        info!("✓ 已获得回答，共 {} 字符", answer.chars().count());

        Ok(answer)
    }

    /// 带取消的问答流程
    ///
    /// `cancel` 先完成时整个流程立即中止并返回 `Cancelled`，
    /// 进行中的 LLM 调用随流程一起被丢弃。
    pub async fn run_with_cancel<F>(
        &self,
        document: Option<&Document>,
        question: &str,
        cancel: F,
    ) -> PipelineResult<String>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.run(document, question) => result,
            _ = cancel => {
                info!("⚠️ 问答流程被取消");
                Err(PipelineError::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnswerError, ExtractError};

    /// 一旦被调用就 panic 的后端，用来断言流程提前短路
    struct PanicBackend;

    impl GenerativeBackend for PanicBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, AnswerError> {
            panic!("后端不应被调用");
        }
    }

    #[test]
    fn test_run_without_document_short_circuits() {
        let flow = QaFlow::with_backend(PanicBackend, &Config::default());

        let err = tokio_test::block_on(flow.run(None, "里面写了什么？")).unwrap_err();
        assert_eq!(err, PipelineError::NoDocument);
    }

    #[test]
    fn test_invalid_pdf_short_circuits_before_backend() {
        let flow = QaFlow::with_backend(PanicBackend, &Config::default());
        let document = Document::from_bytes("bad.pdf", b"not a pdf".to_vec());

        let err = tokio_test::block_on(flow.run(Some(&document), "里面写了什么？")).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Extract(ExtractError::InvalidPdf { .. })
        ));
    }
}
