//! Fluent builder for constructing a [`Sim`].

use ado_core::{AdoId, AdoRng, SimConfig};
use ado_model::{Ado, AnyModel};
use tracing::debug;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: step length, total steps, seed, speed limit, …
/// - the fleet, as `Vec<Ado<AnyModel>>`
///
/// # Optional inputs
///
/// | Method      | Default                                  |
/// |-------------|------------------------------------------|
/// | `.ado(a)`   | Appends one more ado to the fleet        |
///
/// Ado ids must match their position in the fleet (`fleet[i].id() ==
/// AdoId(i)`), which keeps the apply order and per-ado RNG seeding stable.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, fleet)
///     .ado(extra)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    ados:   Vec<Ado<AnyModel>>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, ados: Vec<Ado<AnyModel>>) -> Self {
        Self { config, ados }
    }

    /// Append one ado to the fleet.
    pub fn ado(mut self, ado: Ado<AnyModel>) -> Self {
        self.ados.push(ado);
        self
    }

    /// Validate inputs, seed one RNG per ado and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        // ── Ids must be dense and ordered ─────────────────────────────────
        for (i, ado) in self.ados.iter().enumerate() {
            let expected = AdoId::try_from(i)
                .map_err(|_| SimError::Config(format!("fleet too large: {} ados", self.ados.len())))?;
            if ado.id() != expected {
                return Err(SimError::Config(format!(
                    "ado at index {i} has id {}, expected {expected}",
                    ado.id()
                )));
            }
        }

        let rngs: Vec<AdoRng> = self
            .ados
            .iter()
            .map(|a| AdoRng::new(self.config.seed, a.id()))
            .collect();

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            None    => None,
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(format!("thread pool: {e}")))?,
            ),
        };

        debug!(
            ados = self.ados.len(),
            steps = self.config.total_steps,
            dt = self.config.dt_secs,
            seed = self.config.seed,
            "sim built"
        );

        Ok(Sim {
            clock:  self.config.make_clock(),
            config: self.config,
            ados:   self.ados,
            rngs,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
