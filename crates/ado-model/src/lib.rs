//! `ado-model`: discrete-time-variant (DTV) models of observed agents.
//!
//! An *ado* is an agent the planner observes but does not control.  Each ado
//! owns its current position and an append-only history, and carries a
//! [`VelocityModel`] that maps a trajectory history to a distribution over
//! the ado's velocity at the next step (its *vPDF*).
//!
//! # Crate layout
//!
//! | Module      | Contents                                                              |
//! |-------------|-----------------------------------------------------------------------|
//! | [`state`]   | `AdoState`: current position + history, updated atomically            |
//! | [`model`]   | `VelocityModel` trait, the one capability every variant provides      |
//! | [`ado`]     | `Ado<M>`: the agent entity tying state and model together             |
//! | [`single`]  | `SingleMode`: one fixed Gaussian, history-independent                 |
//! | [`multi`]   | `MultiMode`, `ModeWeighting`: mixture, optionally history-conditioned |
//! | [`any`]     | `AnyModel`: closed set of the built-in variants                       |
//! | [`rollout`] | What-if unrolling of an ado without mutating it                       |
//! | [`error`]   | `ModelError`, `ModelResult<T>`                                        |
//!
//! # Queries vs. steps
//!
//! `vpdf` takes `&self` and never touches the ado's state; it may be called
//! with any history, not only the ado's own.  The only mutators are
//! `advance`, `observe` and `reset`, which need `&mut`, so the borrow
//! checker enforces the usual reader/writer discipline.

pub mod ado;
pub mod any;
pub mod error;
pub mod model;
pub mod multi;
pub mod rollout;
pub mod single;
pub mod state;


pub use ado::Ado;
pub use any::AnyModel;
pub use error::{ModelError, ModelResult};
pub use model::VelocityModel;
pub use multi::{ModeWeighting, MultiMode};
pub use single::SingleMode;
pub use state::AdoState;

pub type SingleModeAdo = Ado<SingleMode>;
pub type MultiModeAdo = Ado<MultiMode>;
