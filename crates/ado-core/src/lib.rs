//! `ado-core`: foundational types shared by every `ado-*` crate.
//!
//! This crate has no `ado-*` dependencies and only a few external ones
//! (`nalgebra`, `rand`, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`ids`]          | `AdoId`                                               |
//! | [`kinematics`]   | `Position2D`, `Velocity2D`, `Covariance2`, helpers    |
//! | [`trajectory`]   | `TimedPosition`, `Trajectory` (append-only history)   |
//! | [`time`]         | `Tick`, `StepClock`, `SimConfig`                      |
//! | [`rng`]          | `AdoRng` (per-ado), `SimRng` (global)                 |
//! | [`error`]        | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, ticks and config.   |

pub mod error;
pub mod ids;
pub mod kinematics;
pub mod rng;
pub mod time;
pub mod trajectory;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::AdoId;
pub use kinematics::{Covariance2, Position2D, Velocity2D};
pub use rng::{AdoRng, SimRng};
pub use time::{SimConfig, StepClock, Tick};
pub use trajectory::{TimedPosition, Trajectory};
