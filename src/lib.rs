//! # PDF Question Answer
//!
//! 一个基于 LLM 的 PDF 问答 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（API 客户端），只暴露能力
//! - `GenerativeBackend` - 文本生成能力的 trait，后端在编译期确定
//! - `OpenAiBackend` - 唯一的 API 客户端 owner，提供 generate() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个问题
//! - `PdfExtractor` - PDF 文本提取能力
//! - `build_prompt` - 提示词构建能力
//! - `AnswerService` - 带超时上限的回答能力
//! - `TranscriptWriter` - 写问答记录能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个问题"的完整处理流程
//! - `QaFlow` - 流程编排（检查文档 → 提取 → 拼提示词 → 回答）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/session` - 问答会话，管理文档、输入与取消
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AnswerError, ExtractError, PipelineError, PipelineResult};
pub use infrastructure::{GenerativeBackend, OpenAiBackend};
pub use models::Document;
pub use orchestrator::App;
pub use services::{build_prompt, AnswerService, PdfExtractor, TranscriptWriter};
pub use workflow::QaFlow;
