//! Question fixtures.

use trivia_core::question::{Difficulty, QuestionDraft};

/// "What is the capital of France?" with "Paris" as the correct answer.
#[must_use]
pub fn capital_of_france() -> QuestionDraft {
    QuestionDraft {
        difficulty: Difficulty::Easy,
        category: "Geography".to_owned(),
        text: "What is the capital of France?".to_owned(),
        correct_answer: "Paris".to_owned(),
        incorrect_answers: ["Berlin".to_owned(), "Madrid".to_owned(), "Rome".to_owned()],
    }
}

/// `count` distinct easy questions; question `n` has correct answer
/// `"answer n"`.
#[must_use]
pub fn numbered_drafts(count: usize) -> Vec<QuestionDraft> {
    (0..count)
        .map(|n| QuestionDraft {
            difficulty: Difficulty::Easy,
            category: "Numbers".to_owned(),
            text: format!("Question number {n}?"),
            correct_answer: format!("answer {n}"),
            incorrect_answers: [
                format!("wrong {n}a"),
                format!("wrong {n}b"),
                format!("wrong {n}c"),
            ],
        })
        .collect()
}
