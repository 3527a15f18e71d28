//! Per-update metrics.
//!
//! [`UpdateMetrics`] captures timing and event counts for a single
//! update pass over one map.

use crate::phase::MeltOutcome;

/// Timing and event counts collected during one update pass.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateMetrics {
    /// Wall-clock time for the diffusion pass, in microseconds.
    pub diffusion_us: u64,
    /// Wall-clock time for the phase change and ignition scan, in microseconds.
    pub phase_us: u64,
    /// Largest absolute change applied to any air temperature.
    pub max_delta: f32,
    /// Water cells that froze.
    pub cells_frozen: u32,
    /// Ice cells that melted.
    pub cells_melted: u32,
    /// Living things drowned by melting ice.
    pub pawns_killed: u32,
    /// Things destroyed by melting ice.
    pub things_destroyed: u32,
    /// Fires the host agreed to start.
    pub fires_started: u32,
}

impl UpdateMetrics {
    /// Add the consequences of one melt.
    pub fn record_melt(&mut self, outcome: &MeltOutcome) {
        self.cells_melted += 1;
        self.pawns_killed += outcome.pawns_killed;
        self.things_destroyed += outcome.things_destroyed;
    }
}
