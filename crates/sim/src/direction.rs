//! Direction codes for the phase buffers.
//!
//! Encoded as a bitmask (1/2/4/8) so a phase-buffer byte can be compared
//! directly against a neighbor's code. The same codes carry two meanings
//! in two different buffers: in the proposal buffer a code means "I send
//! toward this direction", in the acceptance buffer it means "I accept
//! from this direction". The meanings never share a buffer, so they
//! cannot collide.

/// One of the four axis directions. `0` in a phase buffer means "none".
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Direction {
    Up = 1,
    Right = 2,
    Down = 4,
    Left = 8,
}

impl Direction {
    /// Fixed evaluation order shared by every kernel. The cumulative
    /// weighted draw walks this order, so it is part of the protocol.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Buffer byte for this direction.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a phase-buffer byte. `0` and anything unknown is `None`.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Direction> {
        match code {
            1 => Some(Direction::Up),
            2 => Some(Direction::Right),
            4 => Some(Direction::Down),
            8 => Some(Direction::Left),
            _ => None,
        }
    }

    /// The direction pointing back at the sender.
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Grid offset, +y pointing down (row-major, row 0 at the top).
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}
