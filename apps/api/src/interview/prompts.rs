//! Prompt builders for the Interview API.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Builds the question-generation prompt. Role and company context are
/// included only when the caller provided them.
pub fn build_questions_prompt(text: &str, role: Option<&str>, company: Option<&str>) -> String {
    let mut prompt = String::from(
        "Generate exactly 5 relevant interview questions for the following position.\n",
    );
    if let Some(role) = role {
        prompt.push_str(&format!("Role: {}\n", role.trim()));
    }
    if let Some(company) = company {
        prompt.push_str(&format!("Company: {}\n", company.trim()));
    }
    prompt.push_str(&format!(
        "Job Description: {}\n\n\
        Focus on both technical skills and soft skills. Make the questions specific to the role.\n\n\
        Format each question on a new line, numbered from 1-5.",
        text.trim()
    ));
    prompt
}

/// Builds the answer-analysis prompt. The JSON schema here must stay in sync
/// with `parse::parse_analysis`.
pub fn build_analysis_prompt(question: &str, answer: &str) -> String {
    format!(
        "Analyze this interview response:\n\n\
        Q: {}\n\
        A: {}\n\n\
        Provide constructive feedback covering strengths and areas for improvement, \
        and score the answer.\n\n\
        {}\n\
        Return a JSON object with this EXACT schema (no extra fields):\n\
        {{\n\
          \"feedback\": \"two to four sentences of constructive feedback\",\n\
          \"scores\": {{\n\
            \"technical_accuracy\": 0,\n\
            \"communication\": 0,\n\
            \"overall\": 0\n\
          }}\n\
        }}\n\
        All scores are integers from 0 to 100.",
        question.trim(),
        answer.trim(),
        JSON_ONLY_SYSTEM
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_prompt_includes_optional_context() {
        let prompt = build_questions_prompt("Build APIs in Rust", Some("Backend"), Some("Acme"));
        assert!(prompt.contains("Role: Backend"));
        assert!(prompt.contains("Company: Acme"));
        assert!(prompt.contains("Job Description: Build APIs in Rust"));
    }

    #[test]
    fn test_questions_prompt_omits_absent_context() {
        let prompt = build_questions_prompt("Build APIs in Rust", None, None);
        assert!(!prompt.contains("Role:"));
        assert!(!prompt.contains("Company:"));
    }

    #[test]
    fn test_analysis_prompt_names_all_score_fields() {
        let prompt = build_analysis_prompt("What is ACID?", "Atomicity, consistency...");
        assert!(prompt.contains("technical_accuracy"));
        assert!(prompt.contains("communication"));
        assert!(prompt.contains("overall"));
    }
}
