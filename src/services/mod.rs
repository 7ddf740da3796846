pub mod answer_service;
pub mod pdf_extractor;
pub mod prompt;
pub mod transcript_writer;

pub use answer_service::AnswerService;
pub use pdf_extractor::PdfExtractor;
pub use prompt::build_prompt;
pub use transcript_writer::TranscriptWriter;
