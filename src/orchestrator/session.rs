//! 问答会话 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责会话生命周期和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验 API Key、加载启动 PDF、初始化问答记录
//! 2. **交互式会话**：从标准输入逐行读取问题
//! 3. **会话命令**：`:load <路径>` 切换文档，`:quit` 退出
//! 4. **取消控制**：回答中 Ctrl-C 只取消当前问题，空闲时 Ctrl-C 结束会话
//! 5. **单次模式**：命令行直接给出问题时回答一次就退出
//! 6. **会话统计**：汇总回答成功与失败的数量
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理提取与回答的细节
//! - **资源所有者**：唯一持有 Document 和问答记录的模块
//! - **向下委托**：委托 workflow::QaFlow 处理单个问题

use anyhow::Result;
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::infrastructure::OpenAiBackend;
use crate::models::Document;
use crate::services::TranscriptWriter;
use crate::workflow::QaFlow;

/// 应用主结构
pub struct App {
    config: Config,
    flow: QaFlow<OpenAiBackend>,
    transcript: TranscriptWriter,
    document: Option<Document>,
}

impl App {
    /// 初始化应用
    ///
    /// # 参数
    /// - `config`: 完整配置
    /// - `pdf_path`: 启动时要加载的 PDF 路径（可选）
    pub async fn initialize(config: Config, pdf_path: Option<&str>) -> Result<Self> {
        if config.llm_api_key.is_empty() {
            anyhow::bail!(
                "未设置 LLM API Key，请通过 LLM_API_KEY / GOOGLE_API_KEY 环境变量或 config.toml 提供"
            );
        }

        log_startup(&config);

        // 加载启动时指定的 PDF（可选）
        let document = match pdf_path {
            Some(path) => {
                let doc = Document::open(path).await?;
                log_document_loaded(&doc);
                Some(doc)
            }
            None => None,
        };

        // 初始化问答记录文件
        let transcript = TranscriptWriter::new(&config);
        transcript
            .init_session(document.as_ref().map(|d| d.name()))
            .await?;

        let flow = QaFlow::new(&config);

        Ok(Self {
            config,
            flow,
            transcript,
            document,
        })
    }

    /// 单次模式：回答一个问题后退出
    ///
    /// 回答失败时错误继续上抛，让进程以非零状态退出。
    pub async fn run_once(&self, question: &str) -> Result<()> {
        if question.trim().is_empty() {
            warn!("⚠️ 问题为空，不做处理");
            return Ok(());
        }

        let result = self
            .flow
            .run_with_cancel(self.document.as_ref(), question, cancel_signal())
            .await;

        match result {
            Ok(answer) => {
                print_answer(&answer);
                self.transcript.record(question, &answer).await?;
                Ok(())
            }
            Err(e) => {
                let message = format!("❌ {}", e);
                error!("{}", message);
                self.transcript.record(question, &message).await?;
                Err(e.into())
            }
        }
    }

    /// 交互式会话主循环
    pub async fn run(&mut self) -> Result<()> {
        log_session_hints(self.document.is_some());

        let mut stats = SessionStats::default();
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            prompt_for_input()?;

            // 空闲时收到 Ctrl-C 直接结束会话
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => {
                    info!("收到 Ctrl-C，结束会话");
                    break;
                }
            };

            // 标准输入关闭（EOF）也结束会话
            let Some(line) = line else {
                break;
            };

            match parse_command(line.trim()) {
                SessionCommand::Empty => continue,
                SessionCommand::Quit => break,
                SessionCommand::Load(path) => self.load_document(path).await,
                SessionCommand::Question(question) => {
                    self.answer_question(question, &mut stats).await?;
                }
            }
        }

        print_session_stats(&stats, &self.config);

        Ok(())
    }

    /// 加载（或替换）当前文档
    async fn load_document(&mut self, path: &str) {
        if path.is_empty() {
            error!("❌ 用法: :load <路径>");
            return;
        }

        match Document::open(path).await {
            Ok(doc) => {
                log_document_loaded(&doc);
                self.document = Some(doc);
            }
            Err(e) => {
                error!("❌ 加载 PDF 失败: {}", e);
            }
        }
    }

    /// 处理一个问题
    ///
    /// 回答过程中收到 Ctrl-C 只取消当前问题，会话继续；
    /// 失败不中断会话，结果原样写入问答记录。
    async fn answer_question(&self, question: &str, stats: &mut SessionStats) -> Result<()> {
        let result = self
            .flow
            .run_with_cancel(self.document.as_ref(), question, cancel_signal())
            .await;

        match result {
            Ok(answer) => {
                stats.answered += 1;
                print_answer(&answer);
                self.transcript.record(question, &answer).await?;
            }
            Err(e) => {
                stats.failed += 1;
                let message = format!("❌ {}", e);
                error!("{}", message);
                self.transcript.record(question, &message).await?;
            }
        }

        Ok(())
    }
}

/// 会话统计
#[derive(Debug, Default)]
struct SessionStats {
    answered: usize,
    failed: usize,
}

/// 会话命令
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand<'a> {
    /// 空输入，重新提示
    Empty,
    /// 退出会话
    Quit,
    /// 加载新的 PDF
    Load(&'a str),
    /// 普通问题
    Question(&'a str),
}

/// 解析一行输入
fn parse_command(input: &str) -> SessionCommand<'_> {
    if input.is_empty() {
        SessionCommand::Empty
    } else if matches!(input, ":quit" | ":exit" | ":q") {
        SessionCommand::Quit
    } else if input == ":load" {
        SessionCommand::Load("")
    } else if let Some(path) = input.strip_prefix(":load ") {
        SessionCommand::Load(path.trim())
    } else {
        SessionCommand::Question(input)
    }
}

/// 等待 Ctrl-C 信号；安装失败时永不完成，流程退化为不可取消
async fn cancel_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 问答模式");
    info!(
        "📊 模型: {} | 超时: {} 秒",
        config.llm_model_name, config.llm_timeout_secs
    );
    info!("{}", "=".repeat(60));
}

fn log_document_loaded(document: &Document) {
    info!(
        "✓ 已加载 PDF: {} ({} 字节)",
        document.name(),
        document.size()
    );
}

fn log_session_hints(has_document: bool) {
    if !has_document {
        info!("💡 尚未加载 PDF，可输入 :load <路径> 加载");
    }
    info!("💡 输入问题并回车提问，:quit 退出\n");
}

fn prompt_for_input() -> Result<()> {
    print!("💬 请输入问题> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn print_answer(answer: &str) {
    println!("\n{}", "─".repeat(60));
    println!("📝 回答:\n{}", answer);
    println!("{}\n", "─".repeat(60));
}

fn print_session_stats(stats: &SessionStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 会话结束统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已回答: {}", stats.answered);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("\n问答记录已保存至: {}", config.transcript_file);
}
