//! Integration tests for the PostgreSQL stores.
//!
//! These need a database reachable through `DATABASE_URL`; run them with
//! `cargo test -- --ignored`.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use trivia_core::error::DomainError;
use trivia_core::game::{FinishReason, Game, GameStatus, Lifeline};
use trivia_core::player::Player;
use trivia_core::question::{Dispensed, SaveReport};
use trivia_core::repository::{
    GameRepository, PlayerRepository, QuestionStore, ScoredAnswer, Settlement,
};
use trivia_store::{PgGameRepository, PgPlayerRepository, PgQuestionStore};
use trivia_test_support::fixtures::{capital_of_france, numbered_drafts};
use uuid::Uuid;

fn player(name: &str) -> Player {
    Player {
        player_id: Uuid::new_v4(),
        name: name.to_owned(),
        created_at: Utc::now(),
    }
}

/// Inserts a player and an active game for it.
async fn active_game(pool: &PgPool) -> Game {
    let players = PgPlayerRepository::new(pool.clone());
    let games = PgGameRepository::new(pool.clone());
    let owner = player(&format!("player-{}", Uuid::new_v4().simple()));
    players.insert_if_absent(&owner).await.unwrap();
    let game = Game::new(Uuid::new_v4(), owner.player_id, Utc::now());
    games.create(&game).await.unwrap();
    games.activate(game.game_id).await.unwrap()
}

fn dispensed(result: Dispensed) -> Uuid {
    match result {
        Dispensed::Question(question) => question.question_id,
        Dispensed::Exhausted => panic!("expected a question"),
    }
}

// --- players ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_insert_if_absent_rejects_duplicate_names(pool: PgPool) {
    let repo = PgPlayerRepository::new(pool);
    let first = player("helenvu");
    let second = player("helenvu");

    assert!(repo.insert_if_absent(&first).await.unwrap());
    assert!(!repo.insert_if_absent(&second).await.unwrap());

    let found = repo.find_by_name("helenvu").await.unwrap().unwrap();
    assert_eq!(found.player_id, first.player_id);
    assert_eq!(
        repo.find_by_id(first.player_id).await.unwrap().unwrap().name,
        "helenvu"
    );
    assert!(repo.find_by_name("paul").await.unwrap().is_none());
}

// --- games ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_discard_removes_creating_game_and_its_questions(pool: PgPool) {
    let players = PgPlayerRepository::new(pool.clone());
    let games = PgGameRepository::new(pool.clone());
    let questions = PgQuestionStore::new(pool);
    let owner = player("paul");
    players.insert_if_absent(&owner).await.unwrap();
    let game = Game::new(Uuid::new_v4(), owner.player_id, Utc::now());
    games.create(&game).await.unwrap();
    questions
        .save_batch(game.game_id, &numbered_drafts(2))
        .await
        .unwrap();

    games.discard(game.game_id).await.unwrap();

    assert!(games.find(game.game_id).await.unwrap().is_none());
    assert_eq!(questions.count_remaining(game.game_id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_discard_leaves_active_games_alone(pool: PgPool) {
    let games = PgGameRepository::new(pool.clone());
    let game = active_game(&pool).await;

    games.discard(game.game_id).await.unwrap();

    assert_eq!(
        games.find(game.game_id).await.unwrap().unwrap().status,
        GameStatus::Active
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_settle_answer_scores_once_and_finishes_on_wrong_answer(pool: PgPool) {
    // Arrange
    let games = PgGameRepository::new(pool.clone());
    let questions = PgQuestionStore::new(pool.clone());
    let game = active_game(&pool).await;
    questions
        .save_batch(game.game_id, &[capital_of_france()])
        .await
        .unwrap();
    questions
        .save_batch(game.game_id, &numbered_drafts(1))
        .await
        .unwrap();
    let first = dispensed(questions.dispense_next(game.game_id).await.unwrap());
    let second = dispensed(questions.dispense_next(game.game_id).await.unwrap());
    let scored = |question_id, correct| ScoredAnswer {
        game_id: game.game_id,
        question_id,
        correct,
        points: 1,
        answered_at: Utc::now(),
    };

    // Act
    let recorded = games.settle_answer(&scored(first, true)).await.unwrap();
    let retried = games.settle_answer(&scored(first, false)).await.unwrap();
    let wrong = games.settle_answer(&scored(second, false)).await.unwrap();

    // Assert
    assert!(matches!(recorded, Settlement::Recorded(ref g) if g.score == 1));
    assert!(matches!(
        retried,
        Settlement::AlreadyAnswered { correct: true, ref game } if game.score == 1
    ));
    let Settlement::Recorded(finished) = wrong else {
        panic!("expected the wrong answer to be recorded");
    };
    assert_eq!(finished.score, 0);
    assert_eq!(finished.status, GameStatus::Finished);
    assert_eq!(finished.finish_reason, Some(FinishReason::WrongAnswer));
    assert!(matches!(
        games.settle_answer(&scored(second, true)).await,
        Err(DomainError::GameFinished(_))
    ));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_settle_answer_rejects_undispensed_question(pool: PgPool) {
    let games = PgGameRepository::new(pool.clone());
    let questions = PgQuestionStore::new(pool.clone());
    let game = active_game(&pool).await;
    questions
        .save_batch(game.game_id, &[capital_of_france()])
        .await
        .unwrap();
    let question_id = {
        let sql = "SELECT question_id FROM questions WHERE game_id = $1";
        let (id,): (Uuid,) = sqlx::query_as(sql)
            .bind(game.game_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        id
    };

    let result = games
        .settle_answer(&ScoredAnswer {
            game_id: game.game_id,
            question_id,
            correct: true,
            points: 1,
            answered_at: Utc::now(),
        })
        .await;

    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_complete_is_idempotent(pool: PgPool) {
    let games = PgGameRepository::new(pool.clone());
    let game = active_game(&pool).await;

    let first = games.complete(game.game_id, Utc::now()).await.unwrap();
    let second = games.complete(game.game_id, Utc::now()).await.unwrap();

    assert_eq!(first.finish_reason, Some(FinishReason::Completed));
    assert_eq!(second, first);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_consume_lifeline_succeeds_once(pool: PgPool) {
    let games = PgGameRepository::new(pool.clone());
    let game = active_game(&pool).await;

    assert!(
        games
            .consume_lifeline(game.game_id, Lifeline::FiftyFifty)
            .await
            .unwrap()
    );
    assert!(
        !games
            .consume_lifeline(game.game_id, Lifeline::FiftyFifty)
            .await
            .unwrap()
    );
    let reloaded = games.find(game.game_id).await.unwrap().unwrap();
    assert_eq!(reloaded.lifelines_available(), vec![Lifeline::PhoneAFriend]);
}

// --- questions ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_save_batch_skips_duplicates_and_dispenses_in_order(pool: PgPool) {
    // Arrange
    let questions = PgQuestionStore::new(pool.clone());
    let game = active_game(&pool).await;

    // Act
    let first = questions
        .save_batch(game.game_id, &numbered_drafts(2))
        .await
        .unwrap();
    let second = questions
        .save_batch(game.game_id, &numbered_drafts(3))
        .await
        .unwrap();

    // Assert
    assert_eq!(first, SaveReport { stored: 2, skipped: 0 });
    assert_eq!(second, SaveReport { stored: 1, skipped: 2 });
    let mut texts = Vec::new();
    while let Dispensed::Question(question) = questions.dispense_next(game.game_id).await.unwrap()
    {
        assert!(question.displayed);
        let peeked = questions.peek(question.question_id).await.unwrap().unwrap();
        assert!(peeked.displayed);
        texts.push(question.text);
    }
    assert_eq!(
        texts,
        vec![
            "Question number 0?",
            "Question number 1?",
            "Question number 2?"
        ]
    );
    assert_eq!(questions.count_remaining(game.game_id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_dispense_next_refuses_game_finished_by_wrong_answer(pool: PgPool) {
    // Arrange
    let games = PgGameRepository::new(pool.clone());
    let questions = PgQuestionStore::new(pool.clone());
    let game = active_game(&pool).await;
    questions
        .save_batch(game.game_id, &numbered_drafts(2))
        .await
        .unwrap();
    let first = dispensed(questions.dispense_next(game.game_id).await.unwrap());
    games
        .settle_answer(&ScoredAnswer {
            game_id: game.game_id,
            question_id: first,
            correct: false,
            points: 1,
            answered_at: Utc::now(),
        })
        .await
        .unwrap();

    // Act
    let result = questions.dispense_next(game.game_id).await;

    // Assert
    assert!(matches!(
        result,
        Err(DomainError::GameFinished(id)) if id == game.game_id
    ));
    assert_eq!(questions.count_remaining(game.game_id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_dispenses_receive_distinct_questions(pool: PgPool) {
    // Arrange
    let questions = Arc::new(PgQuestionStore::new(pool.clone()));
    let game = active_game(&pool).await;
    questions
        .save_batch(game.game_id, &numbered_drafts(6))
        .await
        .unwrap();

    // Act
    let handles: Vec<_> = (0..6)
        .map(|_| {
            let questions = Arc::clone(&questions);
            let game_id = game.game_id;
            tokio::spawn(async move { questions.dispense_next(game_id).await.unwrap() })
        })
        .collect();
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(dispensed(handle.await.unwrap()));
    }

    // Assert
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 6);
    assert_eq!(
        questions.dispense_next(game.game_id).await.unwrap(),
        Dispensed::Exhausted
    );
}
