//! CSV output for the crossing demo.
//!
//! Creates two files in the output directory:
//! - `ado_positions.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use ado_core::Tick;
use ado_model::{Ado, AnyModel};
use ado_sim::SimObserver;
use csv::Writer;
use tracing::error;

/// A [`SimObserver`] that writes ado positions and per-step summaries.
///
/// Errors are stored because `SimObserver` methods have no return value.
/// After `sim.run()` returns, check for them with
/// [`take_error`][Self::take_error].
pub struct CsvObserver {
    positions:     Writer<File>,
    summaries:     Writer<File>,
    dt_secs:       f64,
    position_rows: usize,
    summary_rows:  usize,
    last_error:    Option<csv::Error>,
}

impl CsvObserver {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path, dt_secs: f64) -> csv::Result<Self> {
        let mut positions = Writer::from_path(dir.join("ado_positions.csv"))?;
        positions.write_record(["ado_id", "step", "time_secs", "x", "y"])?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(["step", "time_secs", "clamped_ados"])?;

        Ok(Self {
            positions,
            summaries,
            dt_secs,
            position_rows: 0,
            summary_rows:  0,
            last_error:    None,
        })
    }

    pub fn take_error(&mut self) -> Option<csv::Error> {
        self.last_error.take()
    }

    pub fn position_rows(&self) -> usize {
        self.position_rows
    }

    pub fn summary_rows(&self) -> usize {
        self.summary_rows
    }

    fn store_err(&mut self, result: csv::Result<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                error!("csv write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }

    fn write_positions(&mut self, step: Tick, ados: &[Ado<AnyModel>]) -> csv::Result<()> {
        for ado in ados {
            let p = ado.position();
            self.positions.write_record(&[
                ado.id().0.to_string(),
                step.0.to_string(),
                format!("{:.3}", ado.time()),
                format!("{:.4}", p.x),
                format!("{:.4}", p.y),
            ])?;
            self.position_rows += 1;
        }
        Ok(())
    }
}

impl SimObserver for CsvObserver {
    fn on_step_end(&mut self, step: Tick, clamped: usize) {
        let result = self.summaries.write_record(&[
            step.0.to_string(),
            format!("{:.3}", (step.0 + 1) as f64 * self.dt_secs),
            clamped.to_string(),
        ]);
        if result.is_ok() {
            self.summary_rows += 1;
        }
        self.store_err(result);
    }

    fn on_snapshot(&mut self, step: Tick, ados: &[Ado<AnyModel>]) {
        let result = self.write_positions(step, ados);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_step: Tick) {
        let result = self
            .positions
            .flush()
            .and_then(|_| self.summaries.flush())
            .map_err(csv::Error::from);
        self.store_err(result);
    }
}
