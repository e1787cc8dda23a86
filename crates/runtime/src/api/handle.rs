//! Cloneable façade for issuing commands to the running match.
//!
//! [`MatchHandle`] hides channel plumbing and offers async helpers for
//! tapping, casting skills, or streaming events from specific topics.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use symphony_core::{Judgement, Lane, MatchPhase, MatchResult, MatchState, Timestamp};

use super::SkillOutcome;
use super::errors::{Result, RuntimeError};
use crate::clock::TimeSource;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the match
#[derive(Clone)]
pub struct MatchHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    phase_rx: watch::Receiver<MatchPhase>,
    time: Arc<dyn TimeSource>,
}

impl MatchHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        phase_rx: watch::Receiver<MatchPhase>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            phase_rx,
            time,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Taps now, stamped by the runtime's time source.
    ///
    /// Returns `None` once the match is over.
    pub async fn tap(&self) -> Result<Option<Judgement>> {
        self.tap_at(self.time.now()).await
    }

    /// Taps with an explicit timestamp from the same time source.
    pub async fn tap_at(&self, at: Timestamp) -> Result<Option<Judgement>> {
        self.request(|reply| Command::Tap { at, reply }).await
    }

    /// Requests a skill from the player unit in `lane` (0-based).
    ///
    /// Out-of-range lanes are rejected before reaching the worker.
    pub async fn cast_skill(&self, lane: usize) -> Result<SkillOutcome> {
        let lane = Lane::new(lane)?;
        self.request(|reply| Command::CastSkill { lane, reply })
            .await
    }

    /// Query the current match state (read-only snapshot)
    pub async fn query_state(&self) -> Result<MatchState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Ends the match without a result. Returns false if it was already over.
    pub async fn abandon(&self) -> Result<bool> {
        self.request(|reply| Command::Abandon { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use symphony_runtime::Topic;
    ///
    /// let mut beats = handle.subscribe(Topic::Beat);
    /// while let Ok(event) = beats.recv().await {
    ///     // React to the beat
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Latest published phase of the match.
    pub fn phase(&self) -> MatchPhase {
        *self.phase_rx.borrow()
    }

    /// Current time of the runtime's time source.
    pub fn now(&self) -> Timestamp {
        self.time.now()
    }

    /// Waits until the match leaves `InProgress`.
    ///
    /// Resolves to `None` when the match was abandoned.
    pub async fn wait_for_result(&self) -> Result<Option<MatchResult>> {
        let mut phase_rx = self.phase_rx.clone();
        let phase = *phase_rx
            .wait_for(|phase| !matches!(phase, MatchPhase::InProgress))
            .await
            .map_err(|_| RuntimeError::WorkerStopped)?;

        Ok(match phase {
            MatchPhase::Finished(result) => Some(result),
            _ => None,
        })
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
