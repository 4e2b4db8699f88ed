//! Results returned by the Game Session Engine.

use serde::Serialize;
use trivia_core::game::{Game, GameStatus};
use uuid::Uuid;

use crate::domain::view::QuestionView;

/// Result of asking for the next question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NextQuestionOutcome {
    /// A freshly dispensed question.
    Question(QuestionView),
    /// Every stored question has been dispensed; the game is now finished.
    Completed {
        /// Final score.
        score: i64,
    },
}

/// Result of answering a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
    /// Whether the answer matched.
    pub correct: bool,
    /// Score after the answer was applied.
    pub score: i64,
    /// Game state after the answer was applied.
    pub game_status: GameStatus,
}

impl AnswerResult {
    pub(crate) fn new(correct: bool, game: &Game) -> Self {
        Self {
            correct,
            score: game.score,
            game_status: game.status,
        }
    }
}

/// Result of starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartedGame {
    /// The new game.
    pub game_id: Uuid,
    /// Questions stored for it across all tiers.
    pub questions_stored: usize,
}

#[cfg(test)]
mod tests {
    use trivia_core::question::Difficulty;

    use super::*;

    #[test]
    fn test_next_question_outcome_is_tagged() {
        let completed = serde_json::to_value(NextQuestionOutcome::Completed { score: 4 }).unwrap();
        assert_eq!(completed, serde_json::json!({ "outcome": "completed", "score": 4 }));

        let view = QuestionView {
            question_id: Uuid::nil(),
            game_id: Uuid::nil(),
            difficulty: Difficulty::Hard,
            category: String::new(),
            question_text: "Why?".to_owned(),
            answers: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        };
        let question = serde_json::to_value(NextQuestionOutcome::Question(view)).unwrap();
        assert_eq!(question["outcome"], "question");
        assert_eq!(question["difficulty"], "hard");
        assert_eq!(question["question_text"], "Why?");
    }

    #[test]
    fn test_answer_result_serializes_status_in_snake_case() {
        let result = AnswerResult {
            correct: false,
            score: 0,
            game_status: GameStatus::Finished,
        };

        let json = serde_json::to_value(result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "correct": false, "score": 0, "game_status": "finished" })
        );
    }
}
