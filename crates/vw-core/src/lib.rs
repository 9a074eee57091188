//! vw-core: stable foundation for voltwatch.
//!
//! Contains:
//! - cell (chemistry, mode and per-tick reading types)
//! - limits (configuration bounds shared by every frontend)
//! - numeric (Real + float helpers)
//! - ids (stable 1-based cell identifiers)
//! - error (shared error types)

pub mod cell;
pub mod error;
pub mod ids;
pub mod limits;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use cell::*;
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
