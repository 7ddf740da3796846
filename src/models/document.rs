use anyhow::{Context, Result};
use std::path::Path;

/// 内存中的 PDF 文档
///
/// 持有完整的文件字节，加载后与文件系统脱钩，
/// 后续的提取和问答不再触碰磁盘。
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    bytes: Vec<u8>,
}

impl Document {
    /// 从磁盘读取 PDF 文件
    ///
    /// # 参数
    /// - `path`: PDF 文件路径
    ///
    /// # 返回
    /// 读取成功返回 Document，文档名取文件名部分
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("读取 PDF 文件失败: {:?}", path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    /// 从内存字节构造文档，名称仅用于日志与记录
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 文件大小（字节）
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_reads_file_and_names_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.pdf");
        tokio::fs::write(&path, b"%PDF-1.5 fake").await.unwrap();

        let doc = Document::open(&path).await.unwrap();
        assert_eq!(doc.name(), "notes.pdf");
        assert_eq!(doc.size(), 13);
    }

    #[tokio::test]
    async fn test_open_missing_file_fails() {
        let err = Document::open("no/such/file.pdf").await.unwrap_err();
        assert!(err.to_string().contains("读取 PDF 文件失败"));
    }
}
