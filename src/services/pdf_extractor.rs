//! PDF 文本提取 - 业务能力层
//!
//! 只负责"PDF 字节 -> 纯文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `lopdf` crate 在内存中解析 PDF
//! - 按页号顺序逐页提取，提取不出文本的页直接跳过

use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::models::Document;

/// PDF 文本提取器
///
/// 职责：
/// - 把整份 PDF 的字节解析为纯文本
/// - 逐页提取并按页序拼接
/// - 只处理单个文档
/// - 不出现问题 / 提示词
/// - 不关心提取结果如何被使用
pub struct PdfExtractor;

impl PdfExtractor {
    /// 创建新的提取器
    pub fn new() -> Self {
        Self
    }

    /// 提取 PDF 全文
    ///
    /// # 参数
    /// - `document`: 内存中的 PDF 文档
    ///
    /// # 返回
    /// 所有页面文本按页序拼接的结果（页与页之间不加分隔符）。
    /// 字节流解析失败返回 `InvalidPdf`；整份文档提取不出任何
    /// 非空白文本时返回 `NoExtractableText`。
    pub fn extract(&self, document: &Document) -> Result<String, ExtractError> {
        debug!("解析 PDF: {} ({} 字节)", document.name(), document.size());

        let pdf = lopdf::Document::load_mem(document.as_bytes())
            .map_err(|e| ExtractError::invalid_pdf(e.to_string()))?;

        let mut text = String::new();
        for (page_num, _page_id) in pdf.get_pages() {
            match pdf.extract_text(&[page_num]) {
                Ok(page_text) if !page_text.is_empty() => {
                    debug!(
                        "第 {} 页提取到 {} 字符",
                        page_num,
                        page_text.chars().count()
                    );
                    text.push_str(&page_text);
                }
                Ok(_) => {
                    debug!("第 {} 页没有可提取的文本，跳过", page_num);
                }
                Err(e) => {
                    // 单页失败不终止整体提取（扫描页、损坏页等）
                    warn!("第 {} 页提取失败，跳过: {}", page_num, e);
                }
            }
        }

        if text.trim().is_empty() {
            return Err(ExtractError::NoExtractableText);
        }

        Ok(text)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}
