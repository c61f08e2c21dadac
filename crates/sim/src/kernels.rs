//! The three per-cell kernels: propose, arbitrate, commit.
//!
//! Each kernel is a pure function of read-only snapshots plus the cell's
//! own RNG slot, so the driver can run them over all cells in any order
//! with no locks and no atomics. The only cross-cell agreement needed -
//! who actually moves - falls out of the double-checked mutual match in
//! the commit kernel: a transfer is realized only when the sender's
//! proposal and the receiver's arbitration independently name each
//! other, both derived from the same frozen buffers.

use crate::cell::Cell;
use crate::config::DirectionWeights;
use crate::direction::Direction;
use crate::grid::Grid;
use crate::rng;
use crate::substance::Substance;

/// Cumulative-weight draw over the four directions in fixed order.
///
/// Consumes exactly one RNG draw whether or not any candidate has
/// weight, so the number of draws per cell per phase is constant and
/// replays line up. A zero-weight entry can never win (the running
/// total does not advance past it); when the total is positive the
/// clamped pick guarantees some positive-weight entry wins.
fn draw_weighted(seed: &mut u32, options: [(Direction, u32); 4]) -> u8 {
    let total: u32 = options.iter().map(|&(_, w)| w).sum();
    let unit = rng::next_unit(seed);
    if total == 0 {
        return 0;
    }
    let pick = ((unit * total as f32) as u32).min(total - 1);

    let mut running = 0u32;
    for (dir, weight) in options {
        running += weight;
        if pick < running {
            return dir.code();
        }
    }
    0
}

/// Proposal phase: where does this cell want to send matter?
///
/// Emits a direction code, or 0 when the cell holds nothing movable or
/// no neighbor is a legal target. Edge neighbors do not exist (no
/// wrapping, no self-aliasing), so an edge cell simply has fewer
/// candidates.
pub(crate) fn propose_cell<S: Substance>(
    rule: &S,
    grid: &Grid,
    weights: &DirectionWeights,
    id: usize,
    seed: &mut u32,
) -> u8 {
    let cell = grid.cell(id);
    let movable = rule.can_send(cell);

    let mut options = [(Direction::Up, 0u32); 4];
    for (slot, dir) in options.iter_mut().zip(Direction::ALL) {
        let weight = match grid.neighbor(id, dir) {
            Some(n) if movable && rule.permits(cell, grid.cell(n)) => {
                rule.weight(dir, cell, weights)
            }
            _ => 0,
        };
        *slot = (dir, weight);
    }

    draw_weighted(seed, options)
}

/// Arbitration phase: which neighbor may send into this cell?
///
/// A neighbor in direction `d` qualifies when its own proposal points
/// back at this cell. A qualifying neighbor weighs in with the weight
/// of its travel direction `d.opposite()` - the gravity table doubles
/// as the delivery priority, so matter arriving from above wins as
/// often as matter prefers to fall. Emits the accept-direction code,
/// or 0 when nobody is aiming here.
pub(crate) fn arbitrate_cell(
    grid: &Grid,
    proposals: &[u8],
    weights: &DirectionWeights,
    id: usize,
    seed: &mut u32,
) -> u8 {
    let mut options = [(Direction::Up, 0u32); 4];
    for (slot, dir) in options.iter_mut().zip(Direction::ALL) {
        let weight = match grid.neighbor(id, dir) {
            Some(n) if proposals[n] == dir.opposite().code() => weights.get(dir.opposite()),
            _ => 0,
        };
        *slot = (dir, weight);
    }

    draw_weighted(seed, options)
}

/// Commit phase: settle this cell from the two earlier phases' outputs.
///
/// An incoming transfer is realized iff this cell's acceptance names a
/// neighbor whose proposal names this cell back; an outgoing transfer is
/// realized iff this cell's proposal names a neighbor whose acceptance
/// names this cell back. Everything is read from the frozen snapshot,
/// so both endpoints of a matched pair reach the same verdict and the
/// same transfer quantity independently.
pub(crate) fn commit_cell<S: Substance>(
    rule: &S,
    grid: &Grid,
    proposals: &[u8],
    accepts: &[u8],
    id: usize,
) -> Cell {
    let cell = grid.cell(id);

    let incoming = Direction::from_code(accepts[id]).and_then(|d| {
        let n = grid.neighbor(id, d)?;
        (proposals[n] == d.opposite().code()).then(|| grid.cell(n))
    });

    let outgoing = Direction::from_code(proposals[id]).and_then(|d| {
        let n = grid.neighbor(id, d)?;
        (accepts[n] == d.opposite().code()).then(|| grid.cell(n))
    });

    if incoming.is_none() && outgoing.is_none() {
        return cell;
    }
    rule.settle(cell, incoming, outgoing)
}
