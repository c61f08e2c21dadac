//! Cell state - minimal per-cell value fields.

/// State of one grid cell at one buffer generation.
///
/// `matter` carries either binary occupancy (0/1) or a bounded quantity
/// (0-255) depending on the active substance. `heat` is the auxiliary
/// mobility field; only the thermal variant reads or writes it.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Cell {
    pub matter: u8,
    pub heat: u8,
}

impl Cell {
    #[inline]
    pub const fn empty() -> Self {
        Self { matter: 0, heat: 0 }
    }

    #[inline]
    pub const fn occupied() -> Self {
        Self { matter: 1, heat: 0 }
    }

    #[inline]
    pub const fn with_heat(heat: u8) -> Self {
        Self { matter: 1, heat }
    }
}
