//! Async host for a single rhythm match.
//!
//! This crate wires the deterministic engine from `symphony-core` into a
//! tokio task that owns the match, drives the beat clock, and serializes
//! player input. Consumers embed [`Runtime`] to start a match, interact with
//! it through [`MatchHandle`], and subscribe to topic events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`clock`] abstracts the host wall clock
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod clock;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{MatchHandle, Result, RuntimeError, SkillOutcome};
pub use clock::{TimeSource, TokioTimeSource};
pub use events::{BeatEvent, CombatUpdate, Event, EventBus, MatchEvent, RhythmEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
