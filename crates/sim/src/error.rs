//! Error taxonomy for the simulation core.

use thiserror::Error;

/// Everything that can go wrong in the core. There are no transient or
/// retriable failures: the kernels are pure computation, so an error is
/// either a rejected configuration, a rejected index, or a failure to
/// build the parallel executor.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    BadDimensions { width: usize, height: usize },

    #[error("direction weights sum to zero; the proposal draw would be undefined")]
    ZeroWeights,

    #[error("steps per frame must be at least 1")]
    ZeroSteps,

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("parallel executor unavailable: {0}")]
    Executor(#[from] rayon::ThreadPoolBuildError),
}
