pub mod llm_backend;

pub use llm_backend::{GenerativeBackend, OpenAiBackend};
