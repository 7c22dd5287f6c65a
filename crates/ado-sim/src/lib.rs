//! `ado-sim`: step loop driver for fleets of ado models.
//!
//! # Two-phase step
//!
//! ```text
//! for step in 0..config.total_steps:
//!   ① Query:  every ado samples a velocity from vpdf_current() with its
//!             own AdoRng (parallel with the `parallel` feature).
//!   ② Apply:  in ascending AdoId order: clamp the velocity to speed_max,
//!             then advance the ado by dt.
//! ```
//!
//! The query phase only reads ado state, so it is safe to run concurrently.
//! Because each ado owns its RNG, results do not depend on thread count.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                          |
//! |------------|-------------------------------------------------|
//! | `parallel` | Runs the query phase on Rayon's thread pool.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ado_core::SimConfig;
//! use ado_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), fleet).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
