// ── Simulation engine ──
//
// Pure, synchronous state transitions. Timing lives in the controller.

mod connection;
mod random;
mod tick;
pub mod tuning;

pub use connection::ConnectionSimulator;
pub use random::{RandomSource, StdRandom};
pub use tick::UpdateEngine;
pub use tuning::SimulationTuning;

#[cfg(test)]
pub(crate) use random::scripted::Scripted;
