//! Axum route handlers for the Interview API.
//!
//! Order per request: validate → rate-limit → fingerprint → cached dispatch.
//! A throttled or invalid request never touches the cache or the provider.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::cache::key::fingerprint;
use crate::cache::get_or_compute;
use crate::errors::AppError;
use crate::interview::parse::{parse_analysis, parse_question_lines};
use crate::interview::prompts::{build_analysis_prompt, build_questions_prompt};
use crate::llm_client::prompts::INTERVIEWER_SYSTEM;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub text: String,
    pub role: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub feedback: String,
    pub scores: Scores,
}

/// 0-100 integer scores, as produced by `parse::parse_analysis`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Scores {
    pub technical_accuracy: u8,
    pub communication: u8,
    pub overall: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-questions
///
/// Generates interview questions for a job description, tailored to the
/// optional role/company context. Results are cached for an hour under a
/// fingerprint of (text, role, company).
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<QuestionsResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    if !state.limiter.check(addr.ip()) {
        return Err(AppError::RateLimited);
    }

    let key = fingerprint(
        "questions",
        &[
            &request.text,
            request.role.as_deref().unwrap_or(""),
            request.company.as_deref().unwrap_or(""),
        ],
    );

    let prompt = build_questions_prompt(
        &request.text,
        request.role.as_deref(),
        request.company.as_deref(),
    );
    let llm = state.llm.clone();

    let response = get_or_compute(state.cache.as_ref(), &key, state.config.cache_ttl, || async move {
        let raw = llm.call(&prompt, INTERVIEWER_SYSTEM).await?;
        let questions = parse_question_lines(&raw)?;
        Ok(QuestionsResponse { questions })
    })
    .await?;

    Ok(Json(response))
}

/// POST /analyze-response
///
/// Scores and critiques a candidate's answer to one interview question.
/// Cached for an hour under a fingerprint of (question, answer).
pub async fn handle_analyze_response(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }
    if request.answer.trim().is_empty() {
        return Err(AppError::Validation("answer cannot be empty".to_string()));
    }

    if !state.limiter.check(addr.ip()) {
        return Err(AppError::RateLimited);
    }

    let key = fingerprint("analysis", &[&request.question, &request.answer]);

    let prompt = build_analysis_prompt(&request.question, &request.answer);
    let llm = state.llm.clone();

    let response = get_or_compute(state.cache.as_ref(), &key, state.config.cache_ttl, || async move {
        let raw = llm.call(&prompt, INTERVIEWER_SYSTEM).await?;
        parse_analysis(&raw)
    })
    .await?;

    Ok(Json(response))
}
