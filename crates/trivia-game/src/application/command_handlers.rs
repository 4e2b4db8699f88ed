//! Command handlers for the Game Session Engine.
//!
//! Handlers orchestrate the question bank and the stores; every atomicity
//! guarantee they rely on lives in the store traits, so any number of
//! handlers may run against the same game at once.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, error, info, instrument, warn};
use trivia_core::clock::Clock;
use trivia_core::command::Command;
use trivia_core::error::DomainError;
use trivia_core::game::{FinishReason, Game};
use trivia_core::question::{Difficulty, Dispensed, Question};
use trivia_core::question_bank::QuestionBank;
use trivia_core::repository::{
    GameRepository, PlayerRepository, QuestionStore, ScoredAnswer, Settlement,
};
use trivia_core::rng::DeterministicRng;
use uuid::Uuid;

use crate::application::query_handlers::find_visible_game;
use crate::domain::commands::{NextQuestion, StartGame, SubmitAnswer, UseLifeline};
use crate::domain::lifelines::LifelineHint;
use crate::domain::outcomes::{AnswerResult, NextQuestionOutcome, StartedGame};
use crate::domain::scoring::GameSettings;
use crate::domain::view::QuestionView;

/// Runs `draw` with the shared RNG locked. The lock is never held across an
/// await point. A poisoned lock is recovered, since the RNG carries no
/// invariant a panic could break.
fn with_rng<T>(
    rng: &Mutex<dyn DeterministicRng + Send>,
    draw: impl FnOnce(&mut dyn DeterministicRng) -> T,
) -> T {
    let mut guard = rng.lock().unwrap_or_else(PoisonError::into_inner);
    draw(&mut *guard)
}

/// Loads an active game.
async fn load_active_game(
    game_id: Uuid,
    games: &dyn GameRepository,
) -> Result<Game, DomainError> {
    let game = find_visible_game(game_id, games).await?;
    game.ensure_active()?;
    Ok(game)
}

/// Loads a question and checks that it belongs to `game_id`.
async fn load_owned_question(
    game_id: Uuid,
    question_id: Uuid,
    questions: &dyn QuestionStore,
) -> Result<Question, DomainError> {
    questions
        .peek(question_id)
        .await?
        .filter(|question| question.game_id == game_id)
        .ok_or_else(|| DomainError::question_not_found(question_id))
}

/// Handles the `StartGame` command: validates the owner, fetches one batch
/// per difficulty tier, and persists the game with its questions.
///
/// Every tier is fetched before anything is written, so a provider failure
/// leaves no trace. The game is inserted in `Creating` and only activated
/// once its questions are stored; a failed save discards it.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown player,
/// `DomainError::ProviderUnavailable` if a tier cannot be fetched or the
/// tiers yield no questions at all, and `DomainError::Storage` if the game
/// cannot be persisted.
#[instrument(
    skip_all,
    fields(correlation_id = %command.correlation_id(), player_id = %command.player_id)
)]
pub async fn handle_start_game(
    command: &StartGame,
    settings: &GameSettings,
    clock: &dyn Clock,
    bank: &dyn QuestionBank,
    players: &dyn PlayerRepository,
    games: &dyn GameRepository,
    questions: &dyn QuestionStore,
) -> Result<StartedGame, DomainError> {
    players
        .find_by_id(command.player_id)
        .await?
        .ok_or_else(|| DomainError::player_not_found(command.player_id))?;

    let mut drafts = Vec::new();
    for difficulty in Difficulty::ALL {
        let batch = bank
            .fetch_batch(difficulty, settings.questions_per_tier)
            .await?;
        debug!(%difficulty, fetched = batch.len(), "fetched question tier");
        drafts.extend(batch);
    }
    if drafts.is_empty() {
        warn!("question bank returned no questions for any tier");
        return Err(DomainError::ProviderUnavailable(
            "question bank returned no questions".to_owned(),
        ));
    }

    let game = Game::new(Uuid::new_v4(), command.player_id, clock.now());
    games.create(&game).await?;

    let report = match questions.save_batch(game.game_id, &drafts).await {
        Ok(report) if report.stored > 0 => report,
        Ok(_) => {
            discard(games, game.game_id).await;
            return Err(DomainError::ProviderUnavailable(
                "no question could be stored".to_owned(),
            ));
        }
        Err(e) => {
            error!(game_id = %game.game_id, error = %e, "failed to store question batch");
            discard(games, game.game_id).await;
            return Err(e);
        }
    };

    if let Err(e) = games.activate(game.game_id).await {
        error!(game_id = %game.game_id, error = %e, "failed to activate game");
        discard(games, game.game_id).await;
        return Err(e);
    }
    info!(
        game_id = %game.game_id,
        stored = report.stored,
        skipped = report.skipped,
        "started game"
    );

    Ok(StartedGame {
        game_id: game.game_id,
        questions_stored: report.stored,
    })
}

async fn discard(games: &dyn GameRepository, game_id: Uuid) {
    if let Err(e) = games.discard(game_id).await {
        warn!(%game_id, error = %e, "failed to discard game left in creating");
    }
}

/// Handles the `NextQuestion` command: dispenses the earliest undisplayed
/// question with its answers shuffled, or completes the game when none are
/// left.
///
/// The `Mutex` is locked only around the synchronous shuffle.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown game,
/// `DomainError::GameFinished` for a finished one, and
/// `DomainError::Storage` if the store fails.
#[instrument(
    skip_all,
    fields(correlation_id = %command.correlation_id(), game_id = %command.game_id)
)]
pub async fn handle_next_question(
    command: &NextQuestion,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
    games: &dyn GameRepository,
    questions: &dyn QuestionStore,
) -> Result<NextQuestionOutcome, DomainError> {
    load_active_game(command.game_id, games).await?;

    match questions.dispense_next(command.game_id).await? {
        Dispensed::Question(question) => {
            debug!(question_id = %question.question_id, position = question.position, "dispensed question");
            let view = with_rng(rng, |rng| QuestionView::shuffled(&question, rng));
            Ok(NextQuestionOutcome::Question(view))
        }
        Dispensed::Exhausted => {
            let game = games.complete(command.game_id, clock.now()).await?;
            if game.finish_reason == Some(FinishReason::WrongAnswer) {
                return Err(DomainError::GameFinished(game.game_id));
            }
            info!(score = game.score, "game completed");
            Ok(NextQuestionOutcome::Completed { score: game.score })
        }
    }
}

/// Handles the `SubmitAnswer` command: evaluates the answer against the
/// stored ground truth and settles it on the game.
///
/// A retried submission for a question that was already answered does not
/// score again; it reports the outcome recorded the first time.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown game or a question outside
/// it, `DomainError::GameFinished` for a finished game,
/// `DomainError::InvalidInput` for a question that was never dispensed, and
/// `DomainError::Storage` if the store fails.
#[instrument(
    skip_all,
    fields(
        correlation_id = %command.correlation_id(),
        game_id = %command.game_id,
        question_id = %command.question_id
    )
)]
pub async fn handle_submit_answer(
    command: &SubmitAnswer,
    settings: &GameSettings,
    clock: &dyn Clock,
    games: &dyn GameRepository,
    questions: &dyn QuestionStore,
) -> Result<AnswerResult, DomainError> {
    load_active_game(command.game_id, games).await?;
    let question = load_owned_question(command.game_id, command.question_id, questions).await?;

    let correct = question.is_correct(&command.answer);
    let answer = ScoredAnswer {
        game_id: command.game_id,
        question_id: command.question_id,
        correct,
        points: settings.scoring.points_for(question.difficulty),
        answered_at: clock.now(),
    };

    match games.settle_answer(&answer).await? {
        Settlement::Recorded(game) => {
            info!(correct, score = game.score, status = game.status.as_str(), "answer recorded");
            Ok(AnswerResult::new(correct, &game))
        }
        Settlement::AlreadyAnswered { correct, game } => {
            debug!(correct, "question already answered; returning recorded result");
            Ok(AnswerResult::new(correct, &game))
        }
    }
}

/// Handles the `UseLifeline` command: consumes the game's lifeline and
/// computes its hint for the question.
///
/// Validation runs before consumption, so a rejected request never burns
/// the lifeline.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown game or a question outside
/// it, `DomainError::GameFinished` for a finished game,
/// `DomainError::InvalidInput` for a question that was never dispensed,
/// `DomainError::LifelineExhausted` if the lifeline was already used, and
/// `DomainError::Storage` if the store fails.
#[instrument(
    skip_all,
    fields(
        correlation_id = %command.correlation_id(),
        game_id = %command.game_id,
        lifeline = %command.lifeline
    )
)]
pub async fn handle_use_lifeline(
    command: &UseLifeline,
    rng: &Mutex<dyn DeterministicRng + Send>,
    games: &dyn GameRepository,
    questions: &dyn QuestionStore,
) -> Result<LifelineHint, DomainError> {
    load_active_game(command.game_id, games).await?;
    let question = load_owned_question(command.game_id, command.question_id, questions).await?;
    if !question.displayed {
        return Err(DomainError::InvalidInput(format!(
            "question {} has not been dispensed",
            command.question_id
        )));
    }

    if !games
        .consume_lifeline(command.game_id, command.lifeline)
        .await?
    {
        // The game may have finished since it was loaded.
        load_active_game(command.game_id, games).await?;
        return Err(DomainError::LifelineExhausted {
            game_id: command.game_id,
            lifeline: command.lifeline,
        });
    }

    info!(question_id = %question.question_id, "lifeline used");
    Ok(with_rng(rng, |rng| {
        LifelineHint::for_question(command.lifeline, &question, rng)
    }))
}
