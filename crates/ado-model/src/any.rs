//! `AnyModel`: the built-in variants behind one type.

use ado_core::Trajectory;
use ado_dist::GaussianMixture2D;

use crate::{MultiMode, SingleMode, VelocityModel};

/// Closed set of the built-in model variants.
///
/// Every variant answers with a [`GaussianMixture2D`] (single-mode answers
/// are one-component mixtures), so a heterogeneous fleet can be stored as
/// `Vec<Ado<AnyModel>>`.  For variants defined outside this crate use
/// `Box<dyn VelocityModel<Dist = GaussianMixture2D>>` instead.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyModel {
    Single(SingleMode),
    Multi(MultiMode),
}

impl Default for AnyModel {
    fn default() -> Self {
        AnyModel::Single(SingleMode::default())
    }
}

impl From<SingleMode> for AnyModel {
    fn from(m: SingleMode) -> Self {
        AnyModel::Single(m)
    }
}

impl From<MultiMode> for AnyModel {
    fn from(m: MultiMode) -> Self {
        AnyModel::Multi(m)
    }
}

impl VelocityModel for AnyModel {
    type Dist = GaussianMixture2D;

    fn vpdf(&self, history: &Trajectory) -> GaussianMixture2D {
        match self {
            AnyModel::Single(m) => m.vpdf(history).into(),
            AnyModel::Multi(m)  => m.vpdf(history),
        }
    }

    fn mode_count(&self) -> usize {
        match self {
            AnyModel::Single(m) => m.mode_count(),
            AnyModel::Multi(m)  => m.mode_count(),
        }
    }
}
