//! Per-cell deterministic random streams.
//!
//! Every cell owns a 32-bit state, seeded once from its linear index and
//! stepped by an integer hash each time a kernel draws from it. Streams
//! never mix across cells, so a cell's sequence depends only on its seed
//! and how many draws it has consumed - not on the execution order of
//! its neighbors. That property is what makes the parallel update
//! bit-reproducible.

/// Maps a full-range `u32` onto `[0, 1)`.
const UNIT: f32 = 2.328_306_4e-10;

/// Wang-style integer hash. One application is one RNG step.
#[inline]
pub fn hash(mut state: u32) -> u32 {
    state = (state ^ 61) ^ (state >> 16);
    state = state.wrapping_mul(9);
    state ^= state >> 4;
    state = state.wrapping_mul(0x27d4_eb2d);
    state ^= state >> 15;
    state
}

/// Advance the state one step and return a uniform draw in `[0, 1)`.
#[inline]
pub fn next_unit(state: &mut u32) -> f32 {
    *state = hash(*state);
    *state as f32 * UNIT
}

/// Reset every cell's stream to its deterministic seed (the linear
/// cell index).
pub fn reseed(states: &mut [u32]) {
    for (id, state) in states.iter_mut().enumerate() {
        *state = id as u32;
    }
}
