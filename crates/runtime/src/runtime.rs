//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to start a match.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

use symphony_core::{Formation, MatchConfig, MatchPhase, MatchResult, MatchState, Side};

use crate::api::{MatchHandle, Result, RuntimeError};
use crate::clock::{TimeSource, TokioTimeSource};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub match_config: MatchConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            match_config: MatchConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that hosts one match.
///
/// Runtime owns the worker; [`MatchHandle`] provides a cloneable façade for
/// clients.
pub struct Runtime {
    handle: MatchHandle,
    command_tx: mpsc::Sender<Command>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this match
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> MatchHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Waits until the match finishes or is abandoned.
    pub async fn wait_for_result(&self) -> Result<Option<MatchResult>> {
        self.handle.wait_for_result().await
    }

    /// Stops the worker and waits for it to exit.
    ///
    /// Safe to call whether or not the match has ended.
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already be gone; joining below surfaces real failures.
        let _ = self.command_tx.send(Command::Shutdown).await;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    player: Option<Formation>,
    enemy: Option<Formation>,
    stage: u32,
    time: Option<Arc<dyn TimeSource>>,
    event_bus: Option<EventBus>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            player: None,
            enemy: None,
            stage: 0,
            time: None,
            event_bus: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the match rules, keeping channel sizes.
    pub fn match_config(mut self, match_config: MatchConfig) -> Self {
        self.config.match_config = match_config;
        self
    }

    /// Set the player formation (required)
    pub fn player(mut self, formation: Formation) -> Self {
        self.player = Some(formation);
        self
    }

    /// Set the enemy formation (required)
    pub fn enemy(mut self, formation: Formation) -> Self {
        self.enemy = Some(formation);
        self
    }

    /// Tag the match with the stage the enemy formation was built for
    pub fn stage(mut self, stage: u32) -> Self {
        self.stage = stage;
        self
    }

    /// Replace the default [`TokioTimeSource`]
    pub fn time_source(mut self, time: impl TimeSource) -> Self {
        self.time = Some(Arc::new(time));
        self
    }

    /// Publish on an existing bus instead of a fresh one.
    ///
    /// Receivers subscribed on it before [`build`](Self::build) observe the
    /// match from `MatchEvent::Started` onwards; subscriptions made through
    /// the built [`Runtime`] start after it.
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    /// Starts the match and spawns the simulation worker.
    ///
    /// `MatchEvent::Started` is published before this returns.
    pub async fn build(self) -> Result<Runtime> {
        let player = self.player.ok_or(RuntimeError::MissingFormation { side: Side::Player })?;
        let enemy = self.enemy.ok_or(RuntimeError::MissingFormation { side: Side::Enemy })?;
        let time = self
            .time
            .unwrap_or_else(|| Arc::new(TokioTimeSource::new()));

        let state = MatchState::new(player, enemy, self.config.match_config).with_stage(self.stage);

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let (phase_tx, phase_rx) = watch::channel(MatchPhase::InProgress);
        let event_bus = self
            .event_bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));

        let handle = MatchHandle::new(
            command_tx.clone(),
            event_bus.clone(),
            phase_rx,
            Arc::clone(&time),
        );

        info!(
            target: "runtime",
            stage = self.stage,
            player_units = state.player.living_count(),
            enemy_units = state.enemy.living_count(),
            "Spawning simulation worker"
        );

        let mut worker = SimulationWorker::new(state, command_rx, event_bus, phase_tx, time);
        let ticker = worker.start();
        let sim_worker_handle = tokio::spawn(worker.run(ticker));

        Ok(Runtime {
            handle,
            command_tx,
            sim_worker_handle,
        })
    }
}
