//! Headless host for a single rhythm match.
//!
//! # Architecture
//!
//! ```text
//! symphony (binary)
//!   ├─→ ClientConfig   (environment)
//!   ├─→ setup          (roster, enemy formation, match rules)
//!   ├─→ Runtime        (simulation worker + event bus)
//!   └─→ AutoConductor  (taps and skill casts driven by beat events)
//! ```

pub mod conductor;
pub mod config;
pub mod setup;

pub use conductor::AutoConductor;
pub use config::ClientConfig;
