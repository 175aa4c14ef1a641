//! RollSession - the roll state owned by a front-end.
//!
//! A request computes its outcome immediately but keeps the session in the
//! rolling state for `roll_delay` (the dice animation). When the delay
//! elapses the outcome is published: it becomes the current roll and is
//! prepended to the history. No new roll can start while one is rolling.
//!
//! The delay runs as a tokio task that hands the outcome back over a
//! channel, so publication happens on the owner's side when it calls
//! [`RollSession::try_publish`] or awaits [`RollSession::wait_for_publish`].

use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::RollerConfig;
use crate::dice::{RollOutcome, RollRequest};
use crate::engine::RollEngine;
use crate::history::RollHistory;

/// Errors from RollSession operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("A roll is already in progress")]
    AlreadyRolling,

    #[error("Rolling requires a tokio runtime")]
    NoRuntime,
}

/// Identifies one scheduled publication.
pub type RollTicket = u64;

/// Message sent by the timer task when the delay elapses.
#[derive(Debug)]
struct Published {
    ticket: RollTicket,
    outcome: RollOutcome,
}

#[derive(Debug)]
struct ScheduledRoll {
    ticket: RollTicket,
    handle: JoinHandle<()>,
}

/// Roll state for a single front-end session.
pub struct RollSession<R = StdRng> {
    engine: RollEngine<R>,
    history: RollHistory,
    current: Option<RollOutcome>,
    pending: Option<ScheduledRoll>,
    roll_delay: Duration,
    next_ticket: RollTicket,
    tx: mpsc::UnboundedSender<Published>,
    rx: mpsc::UnboundedReceiver<Published>,
}

impl RollSession<StdRng> {
    /// Create a session from configuration.
    pub fn new(config: &RollerConfig) -> Self {
        let engine = match config.seed {
            Some(seed) => RollEngine::seeded(seed),
            None => RollEngine::new(),
        };
        Self::with_engine(engine, config.roll_delay)
    }
}

impl<R: Rng> RollSession<R> {
    pub fn with_engine(engine: RollEngine<R>, roll_delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            engine,
            history: RollHistory::new(),
            current: None,
            pending: None,
            roll_delay,
            next_ticket: 0,
            tx,
            rx,
        }
    }

    /// Start a roll.
    ///
    /// The outcome is computed now and published after the roll delay.
    /// Fails without touching any state if a roll is already in flight.
    pub fn request(&mut self, request: RollRequest) -> Result<RollTicket, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::AlreadyRolling);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| SessionError::NoRuntime)?;

        let outcome = self.engine.resolve(&request);
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.current = None;

        tracing::debug!(
            ticket,
            roll = %outcome.label(),
            delay_ms = self.roll_delay.as_millis() as u64,
            "roll scheduled"
        );

        // Deadline is fixed here, not when the task first runs.
        let deadline = Instant::now() + self.roll_delay;
        let tx = self.tx.clone();
        let handle = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // The receiver lives as long as the session; a send error
            // only means the session is gone.
            let _ = tx.send(Published { ticket, outcome });
        });

        self.pending = Some(ScheduledRoll { ticket, handle });
        Ok(ticket)
    }

    /// Publish a finished roll if one is waiting, without blocking.
    ///
    /// Returns the newly published outcome, if any.
    pub fn try_publish(&mut self) -> Option<&RollOutcome> {
        let mut published = false;
        while let Ok(message) = self.rx.try_recv() {
            published |= self.apply(message);
        }
        if published {
            self.current.as_ref()
        } else {
            None
        }
    }

    /// Wait for the in-flight roll to publish.
    ///
    /// Returns `None` immediately when nothing is rolling.
    pub async fn wait_for_publish(&mut self) -> Option<&RollOutcome> {
        self.pending.as_ref()?;
        loop {
            let message = self.rx.recv().await?;
            if self.apply(message) {
                break;
            }
        }
        self.current.as_ref()
    }

    /// Abort the in-flight roll, if any. Its outcome is discarded.
    ///
    /// Returns `true` if a roll was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(scheduled) => {
                scheduled.handle.abort();
                tracing::debug!(ticket = scheduled.ticket, "roll cancelled");
                true
            }
            None => false,
        }
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::debug!("roll history cleared");
    }

    pub fn is_rolling(&self) -> bool {
        self.pending.is_some()
    }

    /// The most recently published outcome. Cleared when a new roll starts.
    pub fn current(&self) -> Option<&RollOutcome> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &RollHistory {
        &self.history
    }

    pub fn roll_delay(&self) -> Duration {
        self.roll_delay
    }

    /// Apply a timer message. Messages for cancelled tickets are dropped.
    fn apply(&mut self, message: Published) -> bool {
        let is_pending = self
            .pending
            .as_ref()
            .is_some_and(|p| p.ticket == message.ticket);
        if !is_pending {
            tracing::debug!(ticket = message.ticket, "dropping stale roll");
            return false;
        }

        self.pending = None;
        tracing::info!(
            ticket = message.ticket,
            roll = %message.outcome.label(),
            total = message.outcome.total,
            "roll published"
        );
        self.history.push(message.outcome.clone());
        self.current = Some(message.outcome);
        true
    }
}

impl<R> Drop for RollSession<R> {
    fn drop(&mut self) {
        if let Some(scheduled) = self.pending.take() {
            scheduled.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{DiceSpec, DieType};

    #[test]
    fn test_request_outside_runtime() {
        let mut session = RollSession::new(&RollerConfig::new().with_seed(1));
        let result = session.request(RollRequest::Standard(DiceSpec::single(DieType::D6)));
        assert_eq!(result, Err(SessionError::NoRuntime));
        assert!(!session.is_rolling());
    }

    #[test]
    fn test_cancel_when_idle() {
        let mut session = RollSession::new(&RollerConfig::new());
        assert!(!session.cancel());
        assert!(session.try_publish().is_none());
    }

    #[tokio::test]
    async fn test_zero_delay_publishes() {
        let config = RollerConfig::new()
            .with_seed(5)
            .with_roll_delay(Duration::ZERO);
        let mut session = RollSession::new(&config);
        session
            .request(RollRequest::Standard(DiceSpec::new(DieType::D8, 2, 1)))
            .unwrap();
        let outcome = session.wait_for_publish().await.cloned().unwrap();
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(session.history().len(), 1);
        assert!(!session.is_rolling());
    }
}
