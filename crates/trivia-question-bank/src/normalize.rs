//! Turns raw provider records into plain-text, deduplicated drafts.

use std::collections::HashSet;

use tracing::debug;
use trivia_core::question::{Difficulty, QuestionDraft};

use crate::provider::RawQuestion;

/// Decodes HTML entities and trims surrounding whitespace.
#[must_use]
pub fn decode_text(raw: &str) -> String {
    html_escape::decode_html_entities(raw).trim().to_owned()
}

/// Decodes one record. Returns `None` unless it has a non-empty question,
/// a non-empty correct answer, and exactly three non-empty incorrect answers.
#[must_use]
pub fn normalize_question(difficulty: Difficulty, raw: &RawQuestion) -> Option<QuestionDraft> {
    let text = decode_text(&raw.question);
    let correct_answer = decode_text(&raw.correct_answer);
    if text.is_empty() || correct_answer.is_empty() {
        return None;
    }

    let decoded: Vec<String> = raw.incorrect_answers.iter().map(|a| decode_text(a)).collect();
    if decoded.iter().any(|a| a.is_empty() || *a == correct_answer) {
        return None;
    }
    let incorrect_answers: [String; 3] = decoded.try_into().ok()?;

    Some(QuestionDraft {
        difficulty,
        category: decode_text(&raw.category),
        text,
        correct_answer,
        incorrect_answers,
    })
}

/// Normalizes a batch, dropping malformed records and later duplicates of
/// an earlier question.
#[must_use]
pub fn normalize_batch(difficulty: Difficulty, raw: &[RawQuestion]) -> Vec<QuestionDraft> {
    let mut seen = HashSet::new();
    let drafts: Vec<QuestionDraft> = raw
        .iter()
        .filter_map(|record| normalize_question(difficulty, record))
        .filter(|draft| seen.insert(draft.fingerprint()))
        .collect();

    if drafts.len() < raw.len() {
        debug!(
            %difficulty,
            received = raw.len(),
            kept = drafts.len(),
            "dropped malformed or duplicate questions"
        );
    }
    drafts
}
