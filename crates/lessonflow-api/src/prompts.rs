// Prompt builders and parsing of model output for the study-aid endpoints

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use lessonflow_graph::lesson_prompt;

/// Number of questions requested per assessment
pub const ASSESSMENT_QUESTIONS: usize = 3;
/// Options per multiple-choice question
pub const OPTIONS_PER_QUESTION: usize = 4;

pub fn revision_notes_prompt(lesson: &str) -> String {
    format!(
        "Create a concise set of revision notes in bullet points for the following lesson:\n\n{lesson}"
    )
}

pub fn assessment_prompt(lesson: &str) -> String {
    format!(
        "Based on the following lesson, generate a JSON object for a multiple-choice assessment \
         with exactly {ASSESSMENT_QUESTIONS} questions.\n\
         Each question must have an array of {OPTIONS_PER_QUESTION} options and a field indicating \
         the correct answer's text.\n\
         The JSON output should strictly follow this format: \
         {{\"questions\": [{{\"question\": \"...\", \"options\": [\"...\", \"...\", \"...\", \"...\"], \"answer\": \"...\"}}]}}\n\n\
         Lesson content:\n{lesson}"
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Assessment {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// Text of the correct option
    pub answer: String,
}

/// Strip markdown code fences the model tends to wrap JSON in
pub fn strip_code_fences(raw: &str) -> String {
    raw.trim().replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse model output into an `Assessment`
///
/// Fails on malformed JSON, a question count other than
/// `ASSESSMENT_QUESTIONS`, an option count other than `OPTIONS_PER_QUESTION`,
/// or an answer that is not one of its question's options.
pub fn parse_assessment(raw: &str) -> Result<Assessment> {
    let cleaned = strip_code_fences(raw);
    let assessment: Assessment =
        serde_json::from_str(&cleaned).context("model returned an unparseable assessment")?;

    if assessment.questions.len() != ASSESSMENT_QUESTIONS {
        anyhow::bail!(
            "model returned {} questions, expected {ASSESSMENT_QUESTIONS}",
            assessment.questions.len()
        );
    }
    for (idx, question) in assessment.questions.iter().enumerate() {
        if question.options.len() != OPTIONS_PER_QUESTION {
            anyhow::bail!(
                "question {} has {} options, expected {OPTIONS_PER_QUESTION}",
                idx + 1,
                question.options.len()
            );
        }
        if !question.options.iter().any(|option| option == &question.answer) {
            anyhow::bail!("question {} has an answer that is not among its options", idx + 1);
        }
    }

    Ok(assessment)
}
