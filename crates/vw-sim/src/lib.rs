//! Tick-driven telemetry generation for the dashboard.
//!
//! Provides:
//! - `DataSource` strategy with random, fixed-vector and manual implementations
//! - `SimulationRunner`, a finite lazy tick sequence feeding a `HistoryStore`
//! - `TickClock` pacing for callers that refresh on a fixed cadence
//!
//! Nothing here sleeps; pacing is the caller's decision.

pub mod error;
pub mod pacing;
pub mod runner;
pub mod source;

pub use error::{SimError, SimResult};
pub use pacing::{TickClock, TickConfig};
pub use runner::{SimulationRunner, Tick, Ticks, Timestamping};
pub use source::{DataSource, FixedSource, ManualSource, RandomSource};
