use thiserror::Error;

/// 问答流水线错误类型
///
/// 每个阶段的失败都带有明确的类别标签，调用方可以直接 match，
/// 不需要解析错误字符串。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// 尚未加载任何 PDF 文档
    #[error("未加载 PDF 文档")]
    NoDocument,
    /// 文本提取阶段失败
    #[error("{0}")]
    Extract(#[from] ExtractError),
    /// 回答阶段失败
    #[error("{0}")]
    Answer(#[from] AnswerError),
    /// 流程在完成前被取消
    #[error("问答流程已取消")]
    Cancelled,
}

/// 文本提取错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// 字节流不是合法的 PDF
    #[error("无法解析 PDF 文件: {message}")]
    InvalidPdf { message: String },
    /// 所有页面都没有可提取的文本（扫描件或空文档）
    #[error("PDF 中没有可提取的文本")]
    NoExtractableText,
}

/// LLM 回答错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnswerError {
    /// 调用超过了配置的时间上限
    #[error("LLM API 调用超时 ({timeout_secs} 秒)")]
    Timeout { timeout_secs: u64 },
    /// 认证失败（API Key 无效或权限不足）
    #[error("LLM API 认证失败: {message}")]
    AuthFailure { message: String },
    /// 请求频率或配额受限
    #[error("LLM API 请求频率受限: {message}")]
    RateLimited { message: String },
    /// 其他未分类的失败
    #[error("LLM API 调用失败: {message}")]
    Unknown { message: String },
}

// ========== 便捷构造函数 ==========

impl ExtractError {
    /// 创建 PDF 解析失败错误
    pub fn invalid_pdf(message: impl Into<String>) -> Self {
        ExtractError::InvalidPdf {
            message: message.into(),
        }
    }
}

impl AnswerError {
    /// 创建认证失败错误
    pub fn auth_failure(message: impl Into<String>) -> Self {
        AnswerError::AuthFailure {
            message: message.into(),
        }
    }

    /// 创建频率受限错误
    pub fn rate_limited(message: impl Into<String>) -> Self {
        AnswerError::RateLimited {
            message: message.into(),
        }
    }

    /// 创建未分类错误
    pub fn unknown(message: impl Into<String>) -> Self {
        AnswerError::Unknown {
            message: message.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 问答流水线结果类型
pub type PipelineResult<T> = Result<T, PipelineError>;
