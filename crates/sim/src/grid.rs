//! Grid storage - struct-of-arrays fields over a padded cell range.
//!
//! One `Grid` is one buffer generation. The simulation owns two and
//! ping-pongs between them; a kernel only ever reads the front
//! generation and writes the back one, so no phase observes its own
//! writes.

use crate::cell::Cell;
use crate::direction::Direction;
use crate::error::SimError;

/// A full set of cell fields at one buffer generation.
///
/// Fields are parallel arrays rather than an array of structs so the
/// binary variant never touches the heat plane and each kernel streams
/// exactly the bytes it reads.
#[derive(Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    matter: Vec<u8>,
    heat: Vec<u8>,
}

impl Grid {
    /// Create an all-empty grid. Dimensions must already be padded;
    /// callers go through [`crate::SimConfig::padded`].
    pub fn new(width: usize, height: usize) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            matter: vec![0; cells],
            heat: vec![0; cells],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.matter.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matter.is_empty()
    }

    /// Linear index for in-bounds coordinates.
    #[inline]
    pub const fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// Neighbor index in `dir`, or `None` at a grid edge.
    ///
    /// Edge lookups clamp to the cell itself in the kernels' index
    /// arithmetic; a self-aliased neighbor is never a valid source or
    /// target, so it is excluded here rather than at every call site.
    #[inline]
    pub fn neighbor(&self, id: usize, dir: Direction) -> Option<usize> {
        let x = id % self.width;
        let y = id / self.width;
        let (dx, dy) = dir.offset();
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
            return None;
        }
        Some(ny as usize * self.width + nx as usize)
    }

    /// Full cell state at a linear index.
    #[inline]
    pub fn cell(&self, id: usize) -> Cell {
        Cell {
            matter: self.matter[id],
            heat: self.heat[id],
        }
    }

    #[inline]
    pub fn set(&mut self, id: usize, cell: Cell) {
        self.matter[id] = cell.matter;
        self.heat[id] = cell.heat;
    }

    /// Checked read for programmatic access. Out of bounds is an error,
    /// unlike the brush which clamps.
    pub fn get_checked(&self, x: i32, y: i32) -> Result<Cell, SimError> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Err(SimError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.cell(self.index(x as usize, y as usize)))
    }

    /// Checked write for programmatic access.
    pub fn set_checked(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), SimError> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Err(SimError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let id = self.index(x as usize, y as usize);
        self.set(id, cell);
        Ok(())
    }

    /// Force-set a filled disc of cells to `value`, clamped to the grid.
    ///
    /// This is the cursor tool: a source/sink outside the conservation
    /// law, applied directly to the buffer the next proposal pass reads.
    pub fn paint_disc(&mut self, cx: i32, cy: i32, radius: i32, value: u8) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let x = cx + dx;
                let y = cy + dy;
                if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
                    let id = self.index(x as usize, y as usize);
                    self.matter[id] = value;
                }
            }
        }
    }

    /// Sum of matter over the whole grid. Drives the HUD readout and
    /// the conservation tests.
    pub fn total_matter(&self) -> u64 {
        self.matter.iter().map(|&m| m as u64).sum()
    }

    /// Sum of heat over the whole grid.
    pub fn total_heat(&self) -> u64 {
        self.heat.iter().map(|&h| h as u64).sum()
    }

    /// Zero every field without reallocating.
    pub fn clear(&mut self) {
        self.matter.fill(0);
        self.heat.fill(0);
    }

    /// Read-only view of the matter plane, row-major.
    #[inline]
    pub fn matter(&self) -> &[u8] {
        &self.matter
    }

    /// Read-only view of the heat plane, row-major.
    #[inline]
    pub fn heat(&self) -> &[u8] {
        &self.heat
    }

    /// Split into per-plane output slices for the commit kernel.
    pub(crate) fn planes_mut(&mut self) -> (&mut [u8], &mut [u8]) {
        (&mut self.matter, &mut self.heat)
    }
}
