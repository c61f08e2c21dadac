//! Falling-sand simulation core.
//!
//! A 2-D granular-matter simulation built around a lock-free,
//! three-phase parallel update:
//!
//! 1. **Propose** - every cell picks where it wants to send matter via
//!    a weighted draw from its own deterministic RNG stream.
//! 2. **Arbitrate** - every cell picks at most one of the neighbors
//!    proposing into it, with a second weighted draw.
//! 3. **Commit** - a move is realized only when sender and receiver
//!    independently name each other (the mutual match), so mass is
//!    never duplicated or destroyed.
//!
//! Every phase is a flat `rayon` pass over all cells with no locks and
//! no atomics; determinism comes from per-cell RNG streams that never
//! observe other cells. Physics variants (binary sand, bounded pressure
//! quantities, heat-biased motion) plug in through the [`Substance`]
//! trait.
//!
//! This crate is framework-agnostic - it handles simulation only.
//! Use the `game` crate for rendering with Macroquad.

mod cell;
mod config;
mod direction;
mod error;
mod grid;
mod kernels;
mod rng;
mod simulation;
mod substance;

pub use cell::Cell;
pub use config::{pad_to_tile, DirectionWeights, SimConfig, TILE};
pub use direction::Direction;
pub use error::SimError;
pub use grid::Grid;
pub use simulation::{Phase, Simulation, DEFAULT_BRUSH_RADIUS};
pub use substance::{BinarySand, PressureField, Substance, ThermalSand};
