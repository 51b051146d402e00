//! Interview API — question generation and answer analysis.

pub mod handlers;
pub mod parse;
pub mod prompts;
