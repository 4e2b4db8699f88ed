//! Lifeline Provider.
//!
//! Lifelines are pure derivations over a question's answers: they never
//! touch the displayed flag or the score. Enforcing one use per game is the
//! caller's job.

use serde::Serialize;
use trivia_core::game::Lifeline;
use trivia_core::question::Question;
use trivia_core::rng::{DeterministicRng, pick_index};
use uuid::Uuid;

/// What a lifeline reveals about a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "lifeline", rename_all = "snake_case")]
pub enum LifelineHint {
    /// Two incorrect answers to remove from display.
    FiftyFifty {
        /// The question the hint applies to.
        question_id: Uuid,
        /// Exactly two of the three incorrect answers.
        eliminated: Vec<String>,
    },
    /// The friend's advice: one correct and one incorrect answer, in random
    /// roles.
    PhoneAFriend {
        /// The question the hint applies to.
        question_id: Uuid,
        /// The answer the friend suggests.
        suggestion: String,
        /// The other answer the friend is considering.
        alternative: String,
    },
}

impl LifelineHint {
    /// Computes the hint for `lifeline` over `question`.
    pub fn for_question(
        lifeline: Lifeline,
        question: &Question,
        rng: &mut dyn DeterministicRng,
    ) -> Self {
        match lifeline {
            Lifeline::FiftyFifty => fifty_fifty(question, rng),
            Lifeline::PhoneAFriend => phone_a_friend(question, rng),
        }
    }
}

/// A random index into the incorrect answers, clamped to the last one.
fn incorrect_index(question: &Question, rng: &mut dyn DeterministicRng) -> usize {
    let last = question.incorrect_answers.len() - 1;
    pick_index(question.incorrect_answers.len(), rng)
        .unwrap_or(0)
        .min(last)
}

fn fifty_fifty(question: &Question, rng: &mut dyn DeterministicRng) -> LifelineHint {
    let survivor = incorrect_index(question, rng);
    let eliminated = question
        .incorrect_answers
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != survivor)
        .map(|(_, answer)| answer.clone())
        .collect();

    LifelineHint::FiftyFifty {
        question_id: question.question_id,
        eliminated,
    }
}

fn phone_a_friend(question: &Question, rng: &mut dyn DeterministicRng) -> LifelineHint {
    let decoy = question.incorrect_answers[incorrect_index(question, rng)].clone();
    let correct = question.correct_answer.clone();

    let (suggestion, alternative) = if rng.next_u32_range(0, 1) == 0 {
        (correct, decoy)
    } else {
        (decoy, correct)
    };

    LifelineHint::PhoneAFriend {
        question_id: question.question_id,
        suggestion,
        alternative,
    }
}
