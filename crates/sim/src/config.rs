//! Simulation configuration.
//!
//! Everything here is fixed at construction time. Changing weights or
//! quantum strength requires rebuilding the simulation; there is no
//! runtime mutation path by design, so the kernels can treat the config
//! as immutable shared state.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::SimError;

/// Workgroup tiling granularity. Grid dimensions are rounded up to a
/// multiple of this so the cell range divides evenly across workers.
pub const TILE: usize = 16;

/// Round a dimension up to the next multiple of [`TILE`].
#[inline]
pub const fn pad_to_tile(n: usize) -> usize {
    n.div_ceil(TILE) * TILE
}

/// Per-direction proposal weights. The defaults bias motion downward
/// (gravity) with a small sideways spread and a rare upward hop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionWeights {
    pub up: u32,
    pub right: u32,
    pub down: u32,
    pub left: u32,
}

impl Default for DirectionWeights {
    fn default() -> Self {
        Self {
            up: 1,
            right: 2,
            down: 5,
            left: 2,
        }
    }
}

impl DirectionWeights {
    #[inline]
    pub const fn get(&self, dir: Direction) -> u32 {
        match dir {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }

    #[inline]
    pub const fn total(&self) -> u32 {
        self.up + self.right + self.down + self.left
    }
}

/// Construction parameters for a [`crate::Simulation`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Requested width in cells; padded up to a multiple of [`TILE`].
    pub width: usize,
    /// Requested height in cells; padded up to a multiple of [`TILE`].
    pub height: usize,
    /// Worker threads for the phase dispatch. 0 = one per CPU core.
    pub max_parallel_units: usize,
    /// Full propose/arbitrate/commit cycles per `advance()` call.
    pub steps_per_frame: usize,
    /// Matter moved per accepted transfer in quantity variants.
    pub quantum_strength: u8,
    /// Directional gravity bias, shared by proposal and arbitration.
    pub weights: DirectionWeights,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            max_parallel_units: 0,
            steps_per_frame: 10,
            quantum_strength: 1,
            weights: DirectionWeights::default(),
        }
    }
}

impl SimConfig {
    /// Reject configurations the kernels cannot run on. Invalid values
    /// are errors, never silently defaulted.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::BadDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.weights.total() == 0 {
            return Err(SimError::ZeroWeights);
        }
        if self.steps_per_frame == 0 {
            return Err(SimError::ZeroSteps);
        }
        Ok(())
    }

    /// Actual grid dimensions after tiling padding.
    pub fn padded(&self) -> (usize, usize) {
        (pad_to_tile(self.width), pad_to_tile(self.height))
    }
}
