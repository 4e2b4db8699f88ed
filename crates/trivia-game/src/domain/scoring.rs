//! Scoring policy.

use std::str::FromStr;

use trivia_core::error::DomainError;
use trivia_core::question::Difficulty;

/// Default number of questions requested per difficulty tier.
pub const DEFAULT_QUESTIONS_PER_TIER: u32 = 5;

/// Points awarded for a correct answer.
///
/// A wrong answer always resets the score to zero regardless of policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// +1 per correct answer.
    #[default]
    Flat,
    /// +1 easy, +2 medium, +3 hard.
    DifficultyWeighted,
}

impl ScoringPolicy {
    /// Points for a correct answer to a question of `difficulty`.
    #[must_use]
    pub fn points_for(self, difficulty: Difficulty) -> i64 {
        match (self, difficulty) {
            (Self::Flat, _) | (Self::DifficultyWeighted, Difficulty::Easy) => 1,
            (Self::DifficultyWeighted, Difficulty::Medium) => 2,
            (Self::DifficultyWeighted, Difficulty::Hard) => 3,
        }
    }
}

impl FromStr for ScoringPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "difficulty_weighted" => Ok(Self::DifficultyWeighted),
            other => Err(DomainError::InvalidInput(format!(
                "unknown scoring policy: {other}"
            ))),
        }
    }
}

/// Engine-wide settings, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Questions requested from the bank for each tier of a new game.
    pub questions_per_tier: u32,
    /// How correct answers are scored.
    pub scoring: ScoringPolicy,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            questions_per_tier: DEFAULT_QUESTIONS_PER_TIER,
            scoring: ScoringPolicy::Flat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_policy_awards_one_point_per_tier() {
        for difficulty in Difficulty::ALL {
            assert_eq!(ScoringPolicy::Flat.points_for(difficulty), 1);
        }
    }

    #[test]
    fn test_weighted_policy_scales_with_difficulty() {
        let points: Vec<i64> = Difficulty::ALL
            .into_iter()
            .map(|d| ScoringPolicy::DifficultyWeighted.points_for(d))
            .collect();
        assert_eq!(points, vec![1, 2, 3]);
    }

    #[test]
    fn test_policy_parses_configuration_names() {
        assert_eq!("flat".parse::<ScoringPolicy>().unwrap(), ScoringPolicy::Flat);
        assert_eq!(
            "difficulty_weighted".parse::<ScoringPolicy>().unwrap(),
            ScoringPolicy::DifficultyWeighted
        );
        assert!("double".parse::<ScoringPolicy>().is_err());
    }
}
