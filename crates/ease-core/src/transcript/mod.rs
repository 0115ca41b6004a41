//! Transcript parsing
//!
//! Turns a free-text or markdown step log (numbered instructions, bullet
//! lists, or an agent's exported execution log with `## Step N` headings)
//! into a structured [`Flow`](crate::flow::Flow).

mod classifier;
mod config;
mod parser;

pub use classifier::KeywordClassifier;
pub use config::{PatternRule, TranscriptConfig};
pub use parser::TranscriptParser;
