//! JSON scene description: sim config plus the ados to place.

use ado_core::{AdoId, Covariance2, Position2D, SimConfig, SimRng, Velocity2D};
use ado_dist::Mode;
use ado_model::{Ado, AdoState, AnyModel, ModeWeighting, MultiMode, SingleMode};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Whole scene file.  Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub config:         SimConfig,
    pub ados:           Vec<AdoSpec>,
    /// Extra single-mode pedestrians with random start and heading.
    pub random_walkers: usize,
    /// Side of the square random walkers are placed in, metres.
    pub area:           f64,
}

#[derive(Debug, Deserialize)]
pub struct AdoSpec {
    pub position: [f64; 2],
    pub model:    ModelSpec,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSpec {
    Single {
        mean:       [f64; 2],
        covariance: [[f64; 2]; 2],
    },
    Multi {
        modes:     Vec<ModeSpec>,
        #[serde(default)]
        weighting: WeightingSpec,
    },
}

#[derive(Debug, Deserialize)]
pub struct ModeSpec {
    pub mean:       [f64; 2],
    pub covariance: [[f64; 2]; 2],
    pub weight:     f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingSpec {
    #[default]
    Fixed,
    HistoryLikelihood,
}

impl Default for Scene {
    /// Two pedestrians approaching a crossing, one undecided between
    /// crossing and turning.
    fn default() -> Self {
        Self {
            config:         SimConfig::default(),
            ados:           vec![
                AdoSpec {
                    position: [-4.0, 0.0],
                    model:    ModelSpec::Single {
                        mean:       [1.2, 0.0],
                        covariance: [[0.05, 0.0], [0.0, 0.05]],
                    },
                },
                AdoSpec {
                    position: [0.0, -4.0],
                    model:    ModelSpec::Multi {
                        modes:     vec![
                            ModeSpec { mean: [0.0, 1.2],  covariance: [[0.05, 0.0], [0.0, 0.05]], weight: 0.6 },
                            ModeSpec { mean: [-1.0, 0.3], covariance: [[0.05, 0.0], [0.0, 0.05]], weight: 0.4 },
                        ],
                        weighting: WeightingSpec::HistoryLikelihood,
                    },
                },
            ],
            random_walkers: 6,
            area:           10.0,
        }
    }
}

impl Scene {
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse scene from {}", path.display()))
    }

    /// Build the fleet: listed ados first, then the random walkers.  Ids are
    /// assigned in that order starting from 0.
    pub fn build_fleet(&self) -> Result<Vec<Ado<AnyModel>>> {
        let mut fleet = Vec::with_capacity(self.ados.len() + self.random_walkers);

        for (i, spec) in self.ados.iter().enumerate() {
            let id = AdoId::try_from(i)?;
            let model = spec
                .model
                .to_model()
                .with_context(|| format!("invalid model for scene ado {i}"))?;
            fleet.push(Ado::new(id, state_at(spec.position), model));
        }

        if !(self.area.is_finite() && self.area >= 0.0) {
            anyhow::bail!("scene area must be non-negative, got {}", self.area);
        }
        let mut rng = SimRng::new(self.config.seed);
        let half = self.area / 2.0;
        for i in 0..self.random_walkers {
            let id = AdoId::try_from(self.ados.len() + i)?;
            let position = [rng.gen_range(-half..=half), rng.gen_range(-half..=half)];
            let heading: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
            let speed: f64 = rng.gen_range(0.8..1.6);
            let model = SingleMode::new(
                Velocity2D::new(speed * heading.cos(), speed * heading.sin()),
                Covariance2::identity() * 0.1,
            );
            fleet.push(Ado::new(id, state_at(position), model.into()));
        }

        Ok(fleet)
    }
}

impl ModelSpec {
    fn to_model(&self) -> Result<AnyModel> {
        Ok(match self {
            ModelSpec::Single { mean, covariance } => {
                SingleMode::new(vector(*mean), matrix(*covariance)).into()
            }
            ModelSpec::Multi { modes, weighting } => {
                let modes = modes
                    .iter()
                    .map(|m| Mode::new(vector(m.mean), matrix(m.covariance), m.weight))
                    .collect();
                let weighting = match weighting {
                    WeightingSpec::Fixed             => ModeWeighting::Fixed,
                    WeightingSpec::HistoryLikelihood => ModeWeighting::HistoryLikelihood,
                };
                MultiMode::new(modes)?.with_weighting(weighting).into()
            }
        })
    }
}

fn state_at(position: [f64; 2]) -> AdoState {
    AdoState::new(vector(position))
}

fn vector([x, y]: [f64; 2]) -> Position2D {
    Position2D::new(x, y)
}

fn matrix([[a, b], [c, d]]: [[f64; 2]; 2]) -> Covariance2 {
    Covariance2::new(a, b, c, d)
}
