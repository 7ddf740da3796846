use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    /// API Key（默认空，必须通过配置文件或环境变量提供）
    pub llm_api_key: String,
    /// OpenAI 兼容接口的基础地址
    pub llm_api_base_url: String,
    /// 模型名称
    pub llm_model_name: String,
    /// 单次 LLM 调用的超时秒数
    pub llm_timeout_secs: u64,
    /// 单次回答的最大 token 数
    pub llm_max_tokens: u32,
    /// 采样温度
    pub llm_temperature: f32,
    // --- 会话配置 ---
    /// 问答记录文件
    pub transcript_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai"
                .to_string(),
            llm_model_name: "gemini-1.5-flash".to_string(),
            llm_timeout_secs: 60,
            llm_max_tokens: 1024,
            llm_temperature: 0.3,
            transcript_file: "transcript.txt".to_string(),
            verbose_logging: false,
        }
    }
}

/// config.toml 中允许出现的字段，全部可选，缺省时回落到默认值
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    llm_api_key: Option<String>,
    llm_api_base_url: Option<String>,
    llm_model_name: Option<String>,
    llm_timeout_secs: Option<u64>,
    llm_max_tokens: Option<u32>,
    llm_temperature: Option<f32>,
    transcript_file: Option<String>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 按 默认值 -> config.toml -> 环境变量 的顺序加载配置
    ///
    /// 配置文件路径取自环境变量 CONFIG_FILE，默认 config.toml；
    /// 文件不存在时直接跳过，不视为错误。
    pub fn load() -> Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        let mut config = Self::default();
        if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("读取配置文件失败: {}", path))?;
            let file: ConfigFile = toml::from_str(&content)
                .with_context(|| format!("解析配置文件失败: {}", path))?;
            config = config.apply_file(file);
        }
        Ok(config.apply_env())
    }

    /// 仅从环境变量加载（忽略配置文件）
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    fn apply_file(self, file: ConfigFile) -> Self {
        Self {
            llm_api_key: file.llm_api_key.unwrap_or(self.llm_api_key),
            llm_api_base_url: file.llm_api_base_url.unwrap_or(self.llm_api_base_url),
            llm_model_name: file.llm_model_name.unwrap_or(self.llm_model_name),
            llm_timeout_secs: file.llm_timeout_secs.unwrap_or(self.llm_timeout_secs),
            llm_max_tokens: file.llm_max_tokens.unwrap_or(self.llm_max_tokens),
            llm_temperature: file.llm_temperature.unwrap_or(self.llm_temperature),
            transcript_file: file.transcript_file.unwrap_or(self.transcript_file),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
        }
    }

    fn apply_env(self) -> Self {
        Self {
            // GOOGLE_API_KEY 是 Gemini 生态的惯用变量名，作为回落项支持
            llm_api_key: std::env::var("LLM_API_KEY").or_else(|_| std::env::var("GOOGLE_API_KEY")).unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_timeout_secs),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_max_tokens),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_temperature),
            transcript_file: std::env::var("TRANSCRIPT_FILE").unwrap_or(self.transcript_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}
