//! `ado-dist`: probability distributions over a 2D velocity.
//!
//! Agent models hand their predictions out as values of these types.  The
//! only thing a consumer may rely on is the [`VelocityDistribution`] trait:
//! mean, covariance, density and sampling.  Parameters are stored by value,
//! so two results never alias each other.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                    |
//! |------------------|-------------------------------------------------------------|
//! | [`distribution`] | `VelocityDistribution` trait                                |
//! | [`gaussian`]     | `Gaussian2D`: single mode                                   |
//! | [`mixture`]      | `Mode`, `GaussianMixture2D`, `WEIGHT_TOLERANCE`             |
//! | [`error`]        | `DistError`, `DistResult<T>`                                |
//!
//! # Malformed covariances
//!
//! `Gaussian2D::new` does not validate its covariance.  A non-symmetric or
//! indefinite matrix gives an ill-defined distribution: `density` returns
//! `0.0` whenever the matrix is not positive definite, and sampling uses only
//! the non-negative part of its spectrum.  Use [`Gaussian2D::try_new`] to
//! reject such input up front.

pub mod distribution;
pub mod error;
pub mod gaussian;
pub mod mixture;

#[cfg(test)]
mod tests;

pub use distribution::VelocityDistribution;
pub use error::{DistError, DistResult};
pub use gaussian::Gaussian2D;
pub use mixture::{GaussianMixture2D, Mode, WEIGHT_TOLERANCE};
