//! Substance variants - the pluggable physics rules.
//!
//! The phase sequencing is identical for every variant; what differs is
//! which moves a cell may propose and how an accepted transfer changes
//! the two cells involved. Each variant answers those questions through
//! this trait and the shared kernels do the rest.

use crate::cell::Cell;
use crate::config::DirectionWeights;
use crate::direction::Direction;

/// Per-variant movement policy consumed by the kernels.
///
/// The contract the kernels rely on:
/// - `permits` is evaluated by the *sender* against the frozen front
///   buffer, so a receiver can trust that any proposal aimed at it was
///   legal against the same snapshot it reads.
/// - `settle` must derive transfer quantities symmetrically from the
///   snapshot values it is given: the sender's debit for a matched pair
///   has to equal the receiver's credit, or mass leaks.
pub trait Substance: Send + Sync {
    /// Does this cell hold matter that can move out this step?
    fn can_send(&self, cell: Cell) -> bool;

    /// May matter flow from `from` into `to`?
    fn permits(&self, from: Cell, to: Cell) -> bool;

    /// Proposal weight for a permitted move out of `from` toward `dir`.
    fn weight(&self, dir: Direction, from: Cell, weights: &DirectionWeights) -> u32 {
        let _ = from;
        weights.get(dir)
    }

    /// New state of a cell given its realized transfers this step.
    ///
    /// `incoming` is the snapshot state of the neighbor whose proposal
    /// into this cell was mutually matched; `outgoing` is the snapshot
    /// state of the neighbor that accepted this cell's proposal. Either
    /// or both may be absent.
    fn settle(&self, cell: Cell, incoming: Option<Cell>, outgoing: Option<Cell>) -> Cell;
}

/// Binary occupancy: a cell is empty or holds one grain.
///
/// A grain may only move into a strictly empty cell. Since a cell that
/// holds a grain never received a proposal (every sender saw it
/// occupied in the snapshot), incoming and outgoing are mutually
/// exclusive here and `settle` degenerates to set/clear.
#[derive(Clone, Copy, Debug, Default)]
pub struct BinarySand;

impl Substance for BinarySand {
    #[inline]
    fn can_send(&self, cell: Cell) -> bool {
        cell.matter == 1
    }

    #[inline]
    fn permits(&self, _from: Cell, to: Cell) -> bool {
        to.matter == 0
    }

    #[inline]
    fn settle(&self, cell: Cell, incoming: Option<Cell>, outgoing: Option<Cell>) -> Cell {
        if incoming.is_some() {
            return Cell::occupied();
        }
        if outgoing.is_some() {
            return Cell::empty();
        }
        cell
    }
}

/// Bounded matter quantity (0-255) flowing strictly downhill.
///
/// Each accepted transfer moves `quantum` units, clamped so the sender
/// never goes negative and the receiver never overflows. Both sides
/// compute the clamp from the same snapshot pair, which keeps debit and
/// credit equal without any coordination.
///
/// Only the downhill-gradient law is modeled here. Anything richer
/// (equalizing diffusion, multi-way splits) is a design review item,
/// not an extrapolation.
#[derive(Clone, Copy, Debug)]
pub struct PressureField {
    quantum: u8,
}

impl PressureField {
    /// A zero quantum would turn every matched transfer into a no-op,
    /// so the strength is clamped to at least one unit.
    pub fn new(quantum: u8) -> Self {
        Self {
            quantum: quantum.max(1),
        }
    }

    /// Build from the `quantum_strength` the simulation config carries.
    pub fn from_config(config: &crate::config::SimConfig) -> Self {
        Self::new(config.quantum_strength)
    }

    /// Units moved for a matched sender/receiver snapshot pair.
    #[inline]
    fn transfer(&self, sender: Cell, receiver: Cell) -> u8 {
        (self.quantum)
            .min(sender.matter)
            .min(255 - receiver.matter)
    }
}

impl Substance for PressureField {
    #[inline]
    fn can_send(&self, cell: Cell) -> bool {
        cell.matter > 0
    }

    #[inline]
    fn permits(&self, from: Cell, to: Cell) -> bool {
        to.matter < from.matter
    }

    #[inline]
    fn settle(&self, cell: Cell, incoming: Option<Cell>, outgoing: Option<Cell>) -> Cell {
        let mut matter = cell.matter;
        if let Some(sender) = incoming {
            matter += self.transfer(sender, cell);
        }
        if let Some(receiver) = outgoing {
            matter -= self.transfer(cell, receiver);
        }
        Cell {
            matter,
            heat: cell.heat,
        }
    }
}

/// Binary occupancy with a heat field that biases motion upward.
///
/// Heat rides with the grain: an accepted move carries the sender's
/// heat into the receiving cell and leaves the source cold. A hotter
/// grain proposes upward more often; the other directions keep their
/// configured weights. Total heat is conserved by construction.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThermalSand;

impl Substance for ThermalSand {
    #[inline]
    fn can_send(&self, cell: Cell) -> bool {
        cell.matter == 1
    }

    #[inline]
    fn permits(&self, _from: Cell, to: Cell) -> bool {
        to.matter == 0
    }

    #[inline]
    fn weight(&self, dir: Direction, from: Cell, weights: &DirectionWeights) -> u32 {
        let base = weights.get(dir);
        if dir == Direction::Up {
            base * (1 + from.heat as u32 / 32)
        } else {
            base
        }
    }

    #[inline]
    fn settle(&self, cell: Cell, incoming: Option<Cell>, outgoing: Option<Cell>) -> Cell {
        if let Some(sender) = incoming {
            return Cell {
                matter: 1,
                heat: sender.heat,
            };
        }
        if outgoing.is_some() {
            return Cell::empty();
        }
        cell
    }
}
