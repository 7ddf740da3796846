pub mod qa_flow;

pub use qa_flow::QaFlow;
