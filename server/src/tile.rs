//! Per-cell state of the Minesweeper board
//!
//! A tile is in exactly one of three visibility states. The only legal
//! transitions are:
//! - `Untouched -> Dug` (dig)
//! - `Untouched -> Flagged` (flag)
//! - `Flagged -> Untouched` (deflag)
//!
//! `Dug` is terminal. Illegal transitions are refused and reported to the
//! caller instead of being treated as errors.

/// Player-visible state of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Untouched,
    Flagged,
    Dug,
}

/// Result of attempting to dig a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileDig {
    /// The tile was not untouched; nothing changed.
    Refused,
    /// The tile is now dug and had no bomb.
    Clear,
    /// The tile is now dug and the bomb under it has been removed.
    Defused,
}

/// One cell of the board
///
/// The tile does not lock itself; the board wraps every tile in its own
/// mutex and only calls these methods while holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    visibility: Visibility,
    has_bomb: bool,
    neighbor_bombs: u8,
}

impl Tile {
    /// Creates an untouched tile with no bombs counted around it yet.
    pub fn new(x: usize, y: usize, has_bomb: bool) -> Self {
        Self {
            x,
            y,
            visibility: Visibility::Untouched,
            has_bomb,
            neighbor_bombs: 0,
        }
    }

    /// Creates an already dug tile. Dug tiles never carry a bomb.
    pub fn dug(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            visibility: Visibility::Dug,
            has_bomb: false,
            neighbor_bombs: 0,
        }
    }

    /// Creates a flagged tile, which may or may not hide a bomb.
    pub fn flagged(x: usize, y: usize, has_bomb: bool) -> Self {
        Self {
            x,
            y,
            visibility: Visibility::Flagged,
            has_bomb,
            neighbor_bombs: 0,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_untouched(&self) -> bool {
        self.visibility == Visibility::Untouched
    }

    pub fn is_flagged(&self) -> bool {
        self.visibility == Visibility::Flagged
    }

    pub fn is_dug(&self) -> bool {
        self.visibility == Visibility::Dug
    }

    pub fn has_bomb(&self) -> bool {
        self.has_bomb
    }

    pub fn neighbor_bombs(&self) -> u8 {
        self.neighbor_bombs
    }

    /// Digs an untouched tile, removing any bomb under it.
    pub fn try_dig(&mut self) -> TileDig {
        if !self.is_untouched() {
            return TileDig::Refused;
        }

        self.visibility = Visibility::Dug;
        if std::mem::take(&mut self.has_bomb) {
            TileDig::Defused
        } else {
            TileDig::Clear
        }
    }

    /// Places a flag on an untouched tile.
    pub fn try_flag(&mut self) -> bool {
        if self.is_untouched() {
            self.visibility = Visibility::Flagged;
            true
        } else {
            false
        }
    }

    /// Removes the flag from a flagged tile.
    pub fn try_deflag(&mut self) -> bool {
        if self.is_flagged() {
            self.visibility = Visibility::Untouched;
            true
        } else {
            false
        }
    }

    pub(crate) fn add_neighbor_bomb(&mut self) {
        debug_assert!(self.neighbor_bombs < 8, "a tile has at most 8 neighbors");
        self.neighbor_bombs += 1;
    }

    pub(crate) fn remove_neighbor_bomb(&mut self) {
        debug_assert!(self.neighbor_bombs > 0, "neighbor bomb count underflow");
        self.neighbor_bombs = self.neighbor_bombs.saturating_sub(1);
    }

    /// Single-character cell used in board renderings
    pub fn symbol(&self) -> char {
        match self.visibility {
            Visibility::Untouched => '-',
            Visibility::Flagged => 'F',
            Visibility::Dug if self.neighbor_bombs == 0 => ' ',
            Visibility::Dug => char::from(b'0' + self.neighbor_bombs),
        }
    }
}
