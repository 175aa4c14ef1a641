//! Roll session flow tests on a paused tokio clock.
//!
//! Run with: `cargo test -p dice-core --test session_flow`

use std::time::Duration;

use dice_core::{
    AdvantageMode, DiceSpec, DieType, RollRequest, RollSession, RollerConfig, SessionError,
    HISTORY_CAPACITY,
};
use tokio::time::{advance, Instant};

fn session(seed: u64) -> RollSession {
    RollSession::new(&RollerConfig::new().with_seed(seed))
}

fn d6(quantity: u32, modifier: i32) -> RollRequest {
    RollRequest::Standard(DiceSpec::new(DieType::D6, quantity, modifier))
}

/// Let spawned timer tasks run after the clock moves.
async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_outcome_published_after_delay() {
    let mut session = session(1);

    session.request(d6(3, 0)).unwrap();
    assert!(session.is_rolling());
    assert!(session.current().is_none());
    assert!(session.history().is_empty());

    advance(Duration::from_millis(1999)).await;
    settle().await;
    assert!(session.try_publish().is_none());
    assert!(session.is_rolling());

    advance(Duration::from_millis(1)).await;
    settle().await;
    let outcome = session.try_publish().cloned().expect("roll should publish at 2000ms");
    assert_eq!(outcome.results.len(), 3);
    assert!(!session.is_rolling());
    assert_eq!(session.current(), Some(&outcome));
    assert_eq!(session.history().latest(), Some(&outcome));
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_publish_takes_roll_delay() {
    let mut session = session(2);
    let started = Instant::now();

    session.request(d6(1, 4)).unwrap();
    let outcome = session.wait_for_publish().await.cloned().unwrap();

    assert!(started.elapsed() >= Duration::from_millis(2000));
    assert_eq!(outcome.total, outcome.dice_sum() + 4);
}

#[tokio::test(start_paused = true)]
async fn test_wait_when_idle_returns_none() {
    let mut session = session(3);
    assert!(session.wait_for_publish().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_second_request_blocked_while_rolling() {
    let mut session = session(4);
    session.request(d6(1, 0)).unwrap();

    assert_eq!(session.request(d6(2, 0)), Err(SessionError::AlreadyRolling));

    let outcome = session.wait_for_publish().await.cloned().unwrap();
    // The blocked request never rolled anything.
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(session.history().len(), 1);

    // Idle again, so a new roll is accepted.
    assert!(session.request(d6(2, 0)).is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_discards_pending_roll() {
    let mut session = session(5);
    session.request(d6(2, 1)).unwrap();

    assert!(session.cancel());
    assert!(!session.is_rolling());

    advance(Duration::from_millis(5000)).await;
    settle().await;
    assert!(session.try_publish().is_none());
    assert!(session.history().is_empty());
    assert!(session.current().is_none());

    // Cancelling twice is a no-op.
    assert!(!session.cancel());
}

#[tokio::test(start_paused = true)]
async fn test_history_keeps_latest_ten_newest_first() {
    let mut session = session(6);
    let mut published = Vec::new();

    for _ in 0..(HISTORY_CAPACITY + 3) {
        session.request(d6(1, 0)).unwrap();
        published.push(session.wait_for_publish().await.cloned().unwrap());
    }

    let ids: Vec<_> = session.history().iter().map(|o| o.id).collect();
    let expected: Vec<_> = published.iter().rev().take(HISTORY_CAPACITY).map(|o| o.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test(start_paused = true)]
async fn test_clear_history_keeps_current_roll() {
    let mut session = session(7);
    session.request(d6(1, 0)).unwrap();
    session.wait_for_publish().await;

    session.clear_history();
    assert!(session.history().is_empty());
    assert!(session.current().is_some());

    session.clear_history();
    assert!(session.history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_new_roll_clears_current() {
    let mut session = session(8);
    session.request(d6(1, 0)).unwrap();
    session.wait_for_publish().await;
    assert!(session.current().is_some());

    session.request(d6(1, 0)).unwrap();
    assert!(session.current().is_none());
    assert_eq!(session.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_advantage_roll_through_session() {
    let mut session = session(9);
    session
        .request(RollRequest::WithAdvantage {
            mode: AdvantageMode::Disadvantage,
            modifier: 2,
        })
        .unwrap();

    let outcome = session.wait_for_publish().await.cloned().unwrap();
    assert_eq!(outcome.die, DieType::D20);
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.mode, Some(AdvantageMode::Disadvantage));
    assert_eq!(
        outcome.total,
        i64::from(outcome.results[0]) + i64::from(outcome.results[1]) + 2
    );
}

#[tokio::test(start_paused = true)]
async fn test_configured_delay_is_honoured() {
    let config = RollerConfig::new()
        .with_seed(10)
        .with_roll_delay(Duration::from_millis(250));
    let mut session = RollSession::new(&config);
    let started = Instant::now();

    session.request(d6(1, 0)).unwrap();
    session.wait_for_publish().await;

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(250));
    assert!(elapsed < Duration::from_millis(2000));
}
