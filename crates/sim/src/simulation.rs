//! Simulation driver - owns the buffers and sequences the phases.
//!
//! One `Simulation` is the whole mutable state of a run: both grid
//! generations, the two phase buffers, the RNG lattice and a dedicated
//! worker pool. Nothing lives in process-wide globals; phases receive
//! the context by reference.
//!
//! Concurrency model: each phase is one flat data-parallel pass with one
//! logical worker per cell, no ordering among workers and no
//! synchronization primitives inside a pass. A pass reads only
//! finalized buffers from the previous phase and writes only its own
//! output buffer; the join at the end of each `par_iter` is the
//! full-buffer barrier between phases. The rendering side only ever
//! sees the committed front buffer between steps.

use std::mem;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::cell::Cell;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::grid::Grid;
use crate::kernels;
use crate::rng;
use crate::substance::Substance;

/// Default cursor-tool radius in cells.
pub const DEFAULT_BRUSH_RADIUS: i32 = 15;

/// Where the step driver currently is. Externally the simulation is
/// always `Idle`: `advance()` walks the full cycle before returning,
/// and edits are only legal against an idle driver.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Phase {
    #[default]
    Idle,
    Propose,
    Arbitrate,
    Commit,
}

/// A falling-sand simulation specialized to one substance rule.
pub struct Simulation<S: Substance> {
    config: SimConfig,
    substance: S,
    /// Committed generation - what proposal reads and snapshots expose.
    front: Grid,
    /// Scratch generation the commit pass writes, then swapped in.
    back: Grid,
    /// Proposal phase output: "I send toward" codes.
    proposals: Vec<u8>,
    /// Arbitration phase output: "I accept from" codes.
    accepts: Vec<u8>,
    /// One RNG state per cell, stepped twice per cell per step.
    rng_states: Vec<u32>,
    phase: Phase,
    pool: rayon::ThreadPool,
    steps_run: u64,
}

impl<S: Substance> Simulation<S> {
    /// Build a simulation. Dimensions are padded up to the tiling
    /// granularity; read them back with [`width`](Self::width) and
    /// [`height`](Self::height). Fails on an invalid configuration or
    /// if the worker pool cannot be built.
    pub fn new(substance: S, config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let (width, height) = config.padded();
        let cells = width * height;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.max_parallel_units)
            .build()?;

        log::debug!(
            "simulation created: {width}x{height} ({cells} cells), {} worker(s), {} step(s)/frame",
            pool.current_num_threads(),
            config.steps_per_frame,
        );

        let mut sim = Self {
            config,
            substance,
            front: Grid::new(width, height),
            back: Grid::new(width, height),
            proposals: vec![0; cells],
            accepts: vec![0; cells],
            rng_states: vec![0; cells],
            phase: Phase::Idle,
            pool,
            steps_run: 0,
        };
        rng::reseed(&mut sim.rng_states);
        Ok(sim)
    }

    /// Padded grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.front.width()
    }

    /// Padded grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.front.height()
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Total simulation steps committed since construction or reset.
    #[inline]
    pub fn steps_run(&self) -> u64 {
        self.steps_run
    }

    /// Run `steps_per_frame` full propose/arbitrate/commit cycles and
    /// return the elapsed compute time.
    pub fn advance(&mut self) -> Duration {
        debug_assert_eq!(self.phase, Phase::Idle, "advance() on a mid-step driver");
        let start = Instant::now();
        for _ in 0..self.config.steps_per_frame {
            self.step_once();
        }
        let elapsed = start.elapsed();
        log::trace!(
            "{} step(s) in {elapsed:?} ({} total)",
            self.config.steps_per_frame,
            self.steps_run,
        );
        elapsed
    }

    /// One full phase cycle. Each parallel pass joins before the next
    /// begins - that join is the inter-phase barrier.
    fn step_once(&mut self) {
        let weights = self.config.weights;

        // Phase 1: every movable cell picks a target.
        self.phase = Phase::Propose;
        {
            let front = &self.front;
            let rule = &self.substance;
            let proposals = &mut self.proposals;
            let rng_states = &mut self.rng_states;
            self.pool.install(|| {
                proposals
                    .par_iter_mut()
                    .zip(rng_states.par_iter_mut())
                    .enumerate()
                    .for_each(|(id, (out, seed))| {
                        *out = kernels::propose_cell(rule, front, &weights, id, seed);
                    });
            });
        }

        // Phase 2: every cell picks at most one of the senders aiming
        // at it, using the RNG state left over from phase 1.
        self.phase = Phase::Arbitrate;
        {
            let front = &self.front;
            let proposals = &self.proposals;
            let accepts = &mut self.accepts;
            let rng_states = &mut self.rng_states;
            self.pool.install(|| {
                accepts
                    .par_iter_mut()
                    .zip(rng_states.par_iter_mut())
                    .enumerate()
                    .for_each(|(id, (out, seed))| {
                        *out = kernels::arbitrate_cell(front, proposals, &weights, id, seed);
                    });
            });
        }

        // Phase 3: settle mutual matches into the back generation, then
        // swap generations so commit output feeds the next proposal.
        self.phase = Phase::Commit;
        {
            let front = &self.front;
            let rule = &self.substance;
            let proposals = &self.proposals;
            let accepts = &self.accepts;
            let (matter_out, heat_out) = self.back.planes_mut();
            self.pool.install(|| {
                matter_out
                    .par_iter_mut()
                    .zip(heat_out.par_iter_mut())
                    .enumerate()
                    .for_each(|(id, (matter, heat))| {
                        let cell = kernels::commit_cell(rule, front, proposals, accepts, id);
                        *matter = cell.matter;
                        *heat = cell.heat;
                    });
            });
        }
        mem::swap(&mut self.front, &mut self.back);

        self.steps_run += 1;
        self.phase = Phase::Idle;
    }

    /// Cursor tool: force-set a disc of cells, clamped to the grid.
    /// Legal only between steps; the edit lands in the buffer the next
    /// proposal pass reads.
    pub fn paint(&mut self, x: i32, y: i32, radius: i32, value: u8) {
        debug_assert_eq!(self.phase, Phase::Idle, "paint() on a mid-step driver");
        self.front.paint_disc(x, y, radius, value);
    }

    /// Programmatic single-cell read. Out of bounds is an error.
    pub fn cell(&self, x: i32, y: i32) -> Result<Cell, SimError> {
        self.front.get_checked(x, y)
    }

    /// Programmatic single-cell write. Out of bounds is an error.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), SimError> {
        debug_assert_eq!(self.phase, Phase::Idle, "set_cell() on a mid-step driver");
        self.front.set_checked(x, y, cell)
    }

    /// Clear the grid and reseed every cell's RNG stream from its
    /// linear index. Buffers are reused, not reallocated.
    pub fn reset(&mut self) {
        self.front.clear();
        self.back.clear();
        self.proposals.fill(0);
        self.accepts.fill(0);
        rng::reseed(&mut self.rng_states);
        self.phase = Phase::Idle;
        self.steps_run = 0;
        log::debug!("simulation reset: {}x{}", self.width(), self.height());
    }

    /// Read-only view of the latest committed matter plane, row-major.
    #[inline]
    pub fn snapshot(&self) -> &[u8] {
        self.front.matter()
    }

    /// Read-only view of the latest committed heat plane, row-major.
    #[inline]
    pub fn heat_snapshot(&self) -> &[u8] {
        self.front.heat()
    }

    /// Total matter currently on the grid.
    #[inline]
    pub fn total_matter(&self) -> u64 {
        self.front.total_matter()
    }

    /// Total heat currently on the grid.
    #[inline]
    pub fn total_heat(&self) -> u64 {
        self.front.total_heat()
    }
}
