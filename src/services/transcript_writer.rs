//! 问答记录服务 - 业务能力层
//!
//! 只负责"写问答记录文件"能力，不关心流程

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::debug;

use crate::config::Config;

/// 问答记录服务
///
/// 职责：
/// - 把每轮问答（或失败原因）追加到记录文件
/// - 只处理单轮问答
/// - 不出现会话统计
/// - 不关心流程顺序
pub struct TranscriptWriter {
    transcript_path: String,
}

impl TranscriptWriter {
    /// 创建新的问答记录服务
    pub fn new(config: &Config) -> Self {
        Self {
            transcript_path: config.transcript_file.clone(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            transcript_path: path.into(),
        }
    }

    /// 开始新会话：覆盖旧文件并写入会话头
    ///
    /// # 参数
    /// - `document_name`: 当前加载的 PDF 名称（尚未加载时为 None）
    pub async fn init_session(&self, document_name: Option<&str>) -> Result<()> {
        let header = format!(
            "{}\n问答记录 - {}\n文档: {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            document_name.unwrap_or("（未加载）"),
            "=".repeat(60)
        );
        fs::write(&self.transcript_path, header)?;
        Ok(())
    }

    /// 追加一轮问答
    ///
    /// # 参数
    /// - `question`: 用户问题
    /// - `outcome`: 回答文本，或带 ❌ 前缀的失败说明
    pub async fn record(&self, question: &str, outcome: &str) -> Result<()> {
        debug!(
            "写入问答记录: 问题长度 {} | 结果长度 {}",
            question.len(),
            outcome.len()
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.transcript_path)?;

        let entry = format!(
            "[{}]\n问: {}\n答: {}\n\n",
            chrono::Local::now().format("%H:%M:%S"),
            question,
            outcome
        );

        file.write_all(entry.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_session_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.txt");
        let writer = TranscriptWriter::with_path(path.to_string_lossy());

        writer.init_session(Some("report.pdf")).await.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("问答记录"));
        assert!(content.contains("文档: report.pdf"));
    }

    #[tokio::test]
    async fn test_record_appends_entries_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.txt");
        let writer = TranscriptWriter::with_path(path.to_string_lossy());

        writer.init_session(None).await.unwrap();
        writer.record("第一个问题", "第一个回答").await.unwrap();
        writer
            .record("第二个问题", "❌ 未加载 PDF 文档")
            .await
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let first = content.find("第一个问题").unwrap();
        let second = content.find("第二个问题").unwrap();
        assert!(first < second);
        assert!(content.contains("答: ❌ 未加载 PDF 文档"));
    }

    #[tokio::test]
    async fn test_init_session_resets_previous_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.txt");
        let writer = TranscriptWriter::with_path(path.to_string_lossy());

        writer.init_session(None).await.unwrap();
        writer.record("旧问题", "旧回答").await.unwrap();
        writer.init_session(Some("new.pdf")).await.unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("旧问题"));
        assert!(content.contains("文档: new.pdf"));
    }
}
