//! Questions, difficulty tiers, and the result shapes of the question store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::DomainError;

/// Difficulty tier used to partition question acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Easy tier.
    Easy,
    /// Medium tier.
    Medium,
    /// Hard tier.
    Hard,
}

impl Difficulty {
    /// Tiers in the order a new game requests them.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Lowercase name, shared by storage and the provider's query string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(DomainError::InvalidInput(format!(
                "unknown difficulty: {other}"
            ))),
        }
    }
}

/// A normalized, provider-agnostic question that is not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Provider category, possibly empty.
    pub category: String,
    /// Plain-text question.
    pub text: String,
    /// Plain-text correct answer.
    pub correct_answer: String,
    /// Plain-text incorrect answers.
    pub incorrect_answers: [String; 3],
}

impl QuestionDraft {
    /// SHA-256 of the case-folded, whitespace-collapsed question text, hex
    /// encoded. Two drafts with the same fingerprint are duplicates.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.text)
    }
}

/// Fingerprint of a question text. See [`QuestionDraft::fingerprint`].
#[must_use]
pub fn fingerprint(text: &str) -> String {
    let canonical = text
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    format!("{:x}", Sha256::digest(canonical.as_bytes()))
}

/// A question stored for a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Question identifier.
    pub question_id: Uuid,
    /// Owning game.
    pub game_id: Uuid,
    /// Insertion order within the game; dispensing is first-in-first-out.
    pub position: i32,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Provider category, possibly empty.
    pub category: String,
    /// Plain-text question.
    pub text: String,
    /// Ground truth. Never sent to the player.
    pub correct_answer: String,
    /// Plain-text incorrect answers.
    pub incorrect_answers: [String; 3],
    /// Dedupe key, unique per game.
    pub fingerprint: String,
    /// Set exactly once, when the question is dispensed.
    pub displayed: bool,
    /// Recorded outcome of the first answer, if any.
    pub answered_correctly: Option<bool>,
}

impl Question {
    /// Builds an undisplayed question from a draft.
    #[must_use]
    pub fn from_draft(draft: QuestionDraft, game_id: Uuid, position: i32) -> Self {
        let fingerprint = draft.fingerprint();
        Self {
            question_id: Uuid::new_v4(),
            game_id,
            position,
            difficulty: draft.difficulty,
            category: draft.category,
            text: draft.text,
            correct_answer: draft.correct_answer,
            incorrect_answers: draft.incorrect_answers,
            fingerprint,
            displayed: false,
            answered_correctly: None,
        }
    }

    /// Exact, case-sensitive comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

/// Outcome of persisting a batch of drafts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Questions written.
    pub stored: usize,
    /// Drafts skipped as duplicates of a question already in the game.
    pub skipped: usize,
}

/// Result of an atomic dispense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispensed {
    /// The question now marked as displayed.
    Question(Box<Question>),
    /// No undisplayed question remains for the game.
    Exhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str) -> QuestionDraft {
        QuestionDraft {
            difficulty: Difficulty::Easy,
            category: String::new(),
            text: text.to_owned(),
            correct_answer: "Paris".to_owned(),
            incorrect_answers: ["Berlin".into(), "Madrid".into(), "Rome".into()],
        }
    }

    #[test]
    fn test_fingerprint_ignores_case_and_spacing() {
        assert_eq!(
            draft("What is the capital of France?").fingerprint(),
            draft("  what is the  CAPITAL of France? ").fingerprint()
        );
        assert_ne!(
            draft("What is the capital of France?").fingerprint(),
            draft("What is the capital of Spain?").fingerprint()
        );
    }

    #[test]
    fn test_is_correct_is_exact_and_case_sensitive() {
        let question = Question::from_draft(draft("Capital?"), Uuid::new_v4(), 0);
        assert!(question.is_correct("Paris"));
        assert!(!question.is_correct("paris"));
        assert!(!question.is_correct("Paris "));
    }

    #[test]
    fn test_from_draft_starts_undisplayed() {
        let game_id = Uuid::new_v4();
        let question = Question::from_draft(draft("Capital?"), game_id, 3);
        assert_eq!(question.game_id, game_id);
        assert_eq!(question.position, 3);
        assert!(!question.displayed);
        assert_eq!(question.answered_correctly, None);
    }

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!(matches!(
            "impossible".parse::<Difficulty>(),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
