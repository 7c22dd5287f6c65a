//! Simulation observer trait for progress reporting and data collection.

use ado_core::Tick;
use ado_model::{Ado, AnyModel};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, step: Tick, clamped: usize) {
///         if step.0 % self.interval == 0 {
///             println!("step {step}: {clamped} ados hit the speed limit");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any processing.
    fn on_step_start(&mut self, _step: Tick) {}

    /// Called at the end of each step.
    ///
    /// `clamped` is the number of ados whose sampled velocity exceeded
    /// `speed_max` this step.
    fn on_step_end(&mut self, _step: Tick, _clamped: usize) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_steps`
    /// steps), after the step has been applied.
    ///
    /// Gives read-only access to the whole fleet so output writers can record
    /// positions without the sim knowing about any output format.
    fn on_snapshot(&mut self, _step: Tick, _ados: &[Ado<AnyModel>]) {}

    /// Called once after the final step completes.
    fn on_sim_end(&mut self, _final_step: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
