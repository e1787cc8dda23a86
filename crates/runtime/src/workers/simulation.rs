//! Simulation worker that owns the authoritative [`MatchState`].
//!
//! Receives commands from [`MatchHandle`](crate::MatchHandle), drives the beat
//! clock, applies every input through [`MatchEngine`], and publishes events
//! on the bus. Beats and commands are handled strictly one at a time, so no
//! input ever observes a half-resolved beat.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use symphony_core::{
    BeatReport, GameError, Judgement, Lane, MatchEngine, MatchPhase, MatchState, Side,
};

use crate::api::SkillOutcome;
use crate::clock::TimeSource;
use crate::events::{BeatEvent, CombatUpdate, Event, EventBus, MatchEvent, RhythmEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Judge a tap stamped at `at`.
    Tap {
        at: symphony_core::Timestamp,
        reply: oneshot::Sender<Option<Judgement>>,
    },
    /// Cast the skill of the player unit in `lane`.
    CastSkill {
        lane: Lane,
        reply: oneshot::Sender<SkillOutcome>,
    },
    /// Query the current match state (read-only).
    QueryState { reply: oneshot::Sender<MatchState> },
    /// End the match without a result.
    Abandon { reply: oneshot::Sender<bool> },
    /// Stop the worker loop.
    Shutdown,
}

/// Background task that hosts one match.
pub struct SimulationWorker {
    state: MatchState,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    phase_tx: watch::Sender<MatchPhase>,
    time: Arc<dyn TimeSource>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        state: MatchState,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        phase_tx: watch::Sender<MatchPhase>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            state,
            command_rx,
            event_bus,
            phase_tx,
            time,
        }
    }

    /// Anchors the beat grid, publishes `MatchEvent::Started`, and returns
    /// the beat ticker for [`run`](Self::run).
    ///
    /// Called from the builder before the worker is spawned, so the event
    /// reaches every subscriber of the bus that exists at build time.
    pub fn start(&mut self) -> Interval {
        let started_at = self.time.now();
        MatchEngine::new(&mut self.state).start(started_at);
        info!(
            target: "runtime::worker",
            stage = self.state.stage,
            bpm = self.state.config.bpm,
            period_ms = self.state.clock.period_ms(),
            "Match started"
        );
        self.event_bus.publish(Event::Match(MatchEvent::Started {
            stage: self.state.stage,
            at: started_at,
        }));

        let period = Duration::from_millis(self.state.clock.period_ms());
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        ticker
    }

    /// Main worker loop.
    ///
    /// Interleaves beat ticks with commands until the command channel closes
    /// or a shutdown is requested. The beat ticker is disabled as soon as the
    /// match becomes terminal.
    pub async fn run(mut self, mut ticker: Interval) {
        loop {
            let in_progress = self.state.is_in_progress();
            tokio::select! {
                biased;
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                _ = ticker.tick(), if in_progress => self.handle_beat(),
            }
        }

        info!(
            target: "runtime::worker",
            beat = %self.state.beat(),
            phase = %self.state.phase(),
            "Simulation worker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Tap { at, reply } => {
                let _ = reply.send(self.tap(at));
            }
            Command::CastSkill { lane, reply } => {
                let _ = reply.send(self.cast_skill(lane));
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::Abandon { reply } => {
                let _ = reply.send(self.abandon());
            }
            Command::Shutdown => {}
        }
    }

    fn handle_beat(&mut self) {
        let now = self.time.now();
        let report = MatchEngine::new(&mut self.state).resolve_beat(now);

        debug!(
            target: "runtime::worker",
            beat = %report.beat,
            measure = report.measure,
            events = report.events.len(),
            "Beat resolved"
        );

        self.event_bus.publish(Event::Beat(BeatEvent {
            beat: report.beat,
            measure: report.measure,
            at: now,
            player_alive: self.state.player.living_count(),
            enemy_alive: self.state.enemy.living_count(),
        }));
        self.publish_report(report);
    }

    fn publish_report(&mut self, report: BeatReport) {
        let BeatReport {
            beat,
            events,
            result,
            ..
        } = report;

        for event in events {
            self.event_bus
                .publish(Event::Combat(CombatUpdate::Combat(event)));
        }

        if let Some(result) = result {
            info!(
                target: "runtime::worker",
                result = %result,
                beat = %beat,
                "Match finished"
            );
            self.event_bus
                .publish(Event::Match(MatchEvent::Finished { result, beat }));
            self.phase_tx.send_replace(self.state.phase());
        }
    }

    fn tap(&mut self, at: symphony_core::Timestamp) -> Option<Judgement> {
        let judgement = MatchEngine::new(&mut self.state).tap(at)?;

        debug!(
            target: "runtime::worker",
            grade = %judgement.grade,
            offset_ms = judgement.offset_ms,
            bonus = %judgement.multiplier,
            "Tap judged"
        );
        self.event_bus.publish(Event::Rhythm(RhythmEvent {
            judgement,
            combo: self.state.conductor.combo,
        }));

        Some(judgement)
    }

    fn cast_skill(&mut self, lane: Lane) -> SkillOutcome {
        match MatchEngine::new(&mut self.state).cast_skill(lane) {
            Ok(report) => {
                info!(
                    target: "runtime::worker",
                    caster = %report.caster,
                    name = %report.name,
                    bonus = %report.bonus,
                    "Skill cast"
                );
                if let Some(strike) = report.strike
                    && strike.defeated
                    && let Some(unit) = self.state.enemy.get(strike.target)
                {
                    self.event_bus.publish(Event::Combat(CombatUpdate::Combat(
                        symphony_core::CombatEvent::Defeated {
                            side: Side::Enemy,
                            lane: strike.target,
                            unit: unit.id,
                        },
                    )));
                }
                self.event_bus
                    .publish(Event::Combat(CombatUpdate::SkillCast(report.clone())));
                SkillOutcome::Cast(report)
            }
            Err(error) => {
                debug!(
                    target: "runtime::worker",
                    lane = %lane,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    error = %error,
                    "Skill rejected"
                );
                SkillOutcome::Ignored(error)
            }
        }
    }

    fn abandon(&mut self) -> bool {
        if !MatchEngine::new(&mut self.state).abandon() {
            return false;
        }

        info!(
            target: "runtime::worker",
            beat = %self.state.beat(),
            "Match abandoned"
        );
        self.event_bus.publish(Event::Match(MatchEvent::Abandoned {
            beat: self.state.beat(),
        }));
        self.phase_tx.send_replace(self.state.phase());
        true
    }
}
