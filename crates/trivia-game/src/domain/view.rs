//! Player-facing question view.

use serde::Serialize;
use trivia_core::question::{Difficulty, Question};
use trivia_core::rng::{DeterministicRng, shuffle};
use uuid::Uuid;

/// A dispensed question as shown to the player. The correct answer is mixed
/// into `answers` at a random position and never identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// Question identifier, echoed back when answering.
    pub question_id: Uuid,
    /// Owning game.
    pub game_id: Uuid,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Provider category, possibly empty.
    pub category: String,
    /// Plain-text question.
    pub question_text: String,
    /// The correct and the three incorrect answers, shuffled.
    pub answers: Vec<String>,
}

impl QuestionView {
    /// Builds the view with a uniformly random answer order.
    pub fn shuffled(question: &Question, rng: &mut dyn DeterministicRng) -> Self {
        let mut answers = Vec::with_capacity(4);
        answers.push(question.correct_answer.clone());
        answers.extend(question.incorrect_answers.iter().cloned());
        shuffle(&mut answers, rng);

        Self {
            question_id: question.question_id,
            game_id: question.game_id,
            difficulty: question.difficulty,
            category: question.category.clone(),
            question_text: question.text.clone(),
            answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use trivia_core::question::Question;
    use trivia_core::rng::SystemRng;
    use trivia_test_support::fixtures::capital_of_france;
    use trivia_test_support::{MockRng, SequenceRng};
    use uuid::Uuid;

    use super::*;

    fn question() -> Question {
        Question::from_draft(capital_of_france(), Uuid::new_v4(), 0)
    }

    fn sorted(mut answers: Vec<String>) -> Vec<String> {
        answers.sort();
        answers
    }

    #[test]
    fn test_view_contains_exactly_the_four_answers() {
        let question = question();

        let view = QuestionView::shuffled(&question, &mut SystemRng::seeded(9));

        assert_eq!(
            sorted(view.answers),
            vec!["Berlin", "Madrid", "Paris", "Rome"]
        );
        assert_eq!(view.question_text, "What is the capital of France?");
        assert_eq!(view.question_id, question.question_id);
        assert_eq!(view.game_id, question.game_id);
    }

    #[test]
    fn test_view_never_serializes_the_correct_answer_field() {
        let view = QuestionView::shuffled(&question(), &mut MockRng);

        let json = serde_json::to_value(&view).unwrap();

        assert!(json.get("correct_answer").is_none());
        assert!(json.get("incorrect_answers").is_none());
        assert_eq!(json["answers"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_order_follows_the_rng() {
        // Fisher–Yates draws j for i = 3, 2, 1.
        let view = QuestionView::shuffled(&question(), &mut SequenceRng::new(vec![3, 2, 1]));
        assert_eq!(view.answers, vec!["Paris", "Berlin", "Madrid", "Rome"]);

        let view = QuestionView::shuffled(&question(), &mut MockRng);
        assert_eq!(view.answers, vec!["Berlin", "Madrid", "Rome", "Paris"]);
    }

    #[test]
    fn test_correct_answer_position_does_not_cluster() {
        let question = question();
        let mut rng = SystemRng::seeded(2024);
        let mut positions = [0_u32; 4];

        for _ in 0..4_000 {
            let view = QuestionView::shuffled(&question, &mut rng);
            let index = view.answers.iter().position(|a| a == "Paris").unwrap();
            positions[index] += 1;
        }

        for count in positions {
            assert!(
                (800..=1_200).contains(&count),
                "correct answer positions skewed: {positions:?}"
            );
        }
    }
}
