//! Prompt domain
//!
//! Templates for every generative call the Council makes.

mod template;

pub use template::PromptTemplate;
