//! 提示词构建 - 业务能力层
//!
//! 只负责把 PDF 文本和问题拼装成提示词，不关心流程

/// 构建问答提示词
///
/// 模板固定，PDF 文本和问题原样嵌入，不做清洗、转义或截断，
/// 相同输入永远产生相同的提示词。
///
/// # 参数
/// - `pdf_text`: 提取出的 PDF 全文
/// - `question`: 用户的问题
///
/// # 返回
/// 拼装好的完整提示词
pub fn build_prompt(pdf_text: &str, question: &str) -> String {
    format!(
        "Answer the following question based on this PDF content:\n\n{}\n\nQuestion: {}",
        pdf_text, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_exact_layout() {
        let prompt = build_prompt(
            "Paris is the capital of France.",
            "What is the capital of France?",
        );
        assert_eq!(
            prompt,
            "Answer the following question based on this PDF content:\n\n\
             Paris is the capital of France.\n\n\
             Question: What is the capital of France?"
        );
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let a = build_prompt("同一段文本", "同一个问题");
        let b = build_prompt("同一段文本", "同一个问题");
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_prompt_preserves_input_verbatim() {
        // 内嵌换行和首尾空白都不能被动过
        let prompt = build_prompt("  line one\nline two  ", " spaced question ");
        assert!(prompt.contains("  line one\nline two  "));
        assert!(prompt.ends_with("Question:  spaced question "));
    }
}
