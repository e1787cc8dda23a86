//! Automated player that taps shortly after every beat and fires ready skills.

use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use symphony_core::MatchPhase;
use symphony_runtime::{Event, MatchHandle, SkillOutcome, Topic};

/// Counters collected over one conducted match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConductorSummary {
    pub taps: u32,
    pub casts: u32,
    pub best_combo: u32,
}

/// Drives a match through its [`MatchHandle`] until the match ends.
pub struct AutoConductor {
    handle: MatchHandle,
    beats: broadcast::Receiver<Event>,
    tap_offset: Duration,
}

impl AutoConductor {
    /// Subscribes to beats immediately, so no beat after construction is missed.
    pub fn new(handle: MatchHandle, tap_offset_ms: u64) -> Self {
        let beats = handle.subscribe(Topic::Beat);
        Self {
            handle,
            beats,
            tap_offset: Duration::from_millis(tap_offset_ms),
        }
    }

    /// Plays until the match finishes, is abandoned, or the worker stops.
    pub async fn run(mut self) -> symphony_runtime::Result<ConductorSummary> {
        let mut summary = ConductorSummary::default();
        let ended = self.handle.wait_for_result();
        tokio::pin!(ended);

        loop {
            // An abandoned match publishes no further beats.
            let received = tokio::select! {
                biased;
                _ = &mut ended => break,
                received = self.beats.recv() => received,
            };

            match received {
                Ok(Event::Beat(beat)) => {
                    if self.handle.phase() != MatchPhase::InProgress {
                        break;
                    }
                    tokio::time::sleep(self.tap_offset).await;

                    let Some(judgement) = self.handle.tap().await? else {
                        break;
                    };
                    summary.taps += 1;
                    debug!(
                        target: "client::conductor",
                        beat = %beat.beat,
                        grade = %judgement.grade,
                        "Tapped"
                    );

                    summary.casts += self.cast_ready_skills().await?;
                    let state = self.handle.query_state().await?;
                    summary.best_combo = summary.best_combo.max(state.conductor.combo);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(target: "client::conductor", skipped, "Fell behind the beat");
                }
                Err(RecvError::Closed) => break,
            }
        }

        Ok(summary)
    }

    async fn cast_ready_skills(&self) -> symphony_runtime::Result<u32> {
        let state = self.handle.query_state().await?;
        let ready: Vec<usize> = state
            .player
            .units()
            .filter(|(_, unit)| unit.is_alive() && unit.skill_ready())
            .map(|(lane, _)| lane.index())
            .collect();

        let mut casts = 0;
        for lane in ready {
            match self.handle.cast_skill(lane).await? {
                SkillOutcome::Cast(_) => casts += 1,
                SkillOutcome::Ignored(reason) => {
                    debug!(target: "client::conductor", lane, %reason, "Skill skipped");
                }
            }
        }
        Ok(casts)
    }
}
