//! Parsers that map raw provider output into the response types.
//!
//! Providers drift: numbering styles vary and JSON sometimes arrives wrapped
//! in code fences. Anything that still cannot be mapped after normalization
//! is a `ProviderParse` error and must never be cached.

use serde::Deserialize;

use crate::errors::AppError;
use crate::interview::handlers::{AnalysisResponse, Scores};
use crate::llm_client::strip_json_fences;

/// Extracts numbered questions ("1. ..." or "1) ...") from free text, one per
/// line, stripping the numbering. Unnumbered prose lines are ignored.
pub fn parse_question_lines(raw: &str) -> Result<Vec<String>, AppError> {
    let questions: Vec<String> = raw
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
            if digits == 0 {
                return None;
            }
            let rest = line[digits..].strip_prefix(['.', ')'])?;
            let question = rest.trim();
            (!question.is_empty()).then(|| question.to_string())
        })
        .collect();

    if questions.is_empty() {
        return Err(AppError::ProviderParse(
            "no numbered questions found in provider output".to_string(),
        ));
    }
    Ok(questions)
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    feedback: String,
    scores: RawScores,
}

#[derive(Debug, Deserialize)]
struct RawScores {
    technical_accuracy: i64,
    communication: i64,
    overall: i64,
}

/// Parses the analysis JSON, tolerating markdown code fences and
/// out-of-range scores (clamped to 0-100).
pub fn parse_analysis(raw: &str) -> Result<AnalysisResponse, AppError> {
    let text = strip_json_fences(raw);

    let parsed: RawAnalysis = serde_json::from_str(text)
        .map_err(|e| AppError::ProviderParse(format!("analysis output is not valid JSON: {e}")))?;

    Ok(AnalysisResponse {
        feedback: parsed.feedback,
        scores: Scores {
            technical_accuracy: clamp_score(parsed.scores.technical_accuracy),
            communication: clamp_score(parsed.scores.communication),
            overall: clamp_score(parsed.scores.overall),
        },
    })
}

fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}
