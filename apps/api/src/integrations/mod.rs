pub mod analyzer;
pub mod github;
pub mod handlers;
pub mod linkedin;
pub mod llm;
pub mod serper;
