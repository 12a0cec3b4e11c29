//! The shared Minesweeper board
//!
//! One `Board` lives for the whole server process and is shared by every
//! connection through an `Arc`. Concurrency follows a two-tier discipline:
//!
//! - Every tile sits behind its own `Mutex`, held only while that single tile
//!   is inspected or changed. `flag_at` and `deflag_at` take nothing else, so
//!   flags on different tiles proceed fully in parallel.
//! - A board-wide `RwLock` serializes digs. `dig_at` holds it exclusively for
//!   the whole dig including the reveal cascade; `look` and the set observers
//!   hold it shared so a rendering never interleaves with a half-finished
//!   cascade.
//!
//! Lock order is always board lock first, then at most one tile lock at a
//! time, so no two operations can deadlock.

use crate::tile::{Tile, TileDig};
use log::debug;
use rand::Rng;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard};
use thiserror::Error;

/// Chance that any cell of a random board hides a bomb
pub const BOMB_PROBABILITY: f64 = 0.25;

/// Column and row of a tile, both zero-based
pub type Coord = (usize, usize);

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Rejected board construction requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("tile ({x}, {y}) lies outside the {width}x{height} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("tile ({x}, {y}) cannot be dug while also flagged or holding a bomb")]
    DugConflict { x: usize, y: usize },
}

/// What a dig request did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigOutcome {
    /// The coordinates are not on the board; nothing changed.
    OutOfBounds,
    /// The tile was already dug or is flagged; nothing changed.
    NoOp,
    /// The tile was dug without hitting a bomb.
    Revealed,
    /// The tile hid a bomb. It is now dug and the bomb is gone.
    Exploded,
}

#[derive(Debug)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major, index = y * width + x
    tiles: Vec<Mutex<Tile>>,
    dig_lock: RwLock<()>,
}

impl Board {
    /// Creates a board where each cell independently holds a bomb with
    /// probability [`BOMB_PROBABILITY`].
    pub fn random(width: usize, height: usize) -> Self {
        Self::random_with(width, height, BOMB_PROBABILITY, &mut rand::thread_rng())
    }

    /// Same as [`Board::random`] with an explicit bomb probability and source
    /// of randomness.
    pub fn random_with<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        bomb_probability: f64,
        rng: &mut R,
    ) -> Self {
        let probability = bomb_probability.clamp(0.0, 1.0);
        let tiles = (0..width * height)
            .map(|index| Tile::new(index % width, index / width, rng.gen_bool(probability)))
            .collect();
        Self::from_tiles(width, height, tiles)
    }

    /// Creates an untouched board with bombs exactly at the given coordinates.
    pub fn with_bombs(
        width: usize,
        height: usize,
        bombs: impl IntoIterator<Item = Coord>,
    ) -> Result<Self, BoardError> {
        let bombs = checked_set(width, height, bombs)?;
        let tiles = (0..width * height)
            .map(|index| {
                let coord = (index % width, index / width);
                Tile::new(coord.0, coord.1, bombs.contains(&coord))
            })
            .collect();
        Ok(Self::from_tiles(width, height, tiles))
    }

    /// Creates a board in an arbitrary reachable state.
    ///
    /// A coordinate listed as dug must not also be flagged or hold a bomb.
    pub fn with_state(
        width: usize,
        height: usize,
        dug: &HashSet<Coord>,
        flagged: &HashSet<Coord>,
        bombs: &HashSet<Coord>,
    ) -> Result<Self, BoardError> {
        let dug = checked_set(width, height, dug.iter().copied())?;
        let flagged = checked_set(width, height, flagged.iter().copied())?;
        let bombs = checked_set(width, height, bombs.iter().copied())?;

        if let Some(&(x, y)) = dug
            .iter()
            .find(|coord| flagged.contains(coord) || bombs.contains(coord))
        {
            return Err(BoardError::DugConflict { x, y });
        }

        let tiles = (0..width * height)
            .map(|index| {
                let coord = (index % width, index / width);
                let has_bomb = bombs.contains(&coord);
                if dug.contains(&coord) {
                    Tile::dug(coord.0, coord.1)
                } else if flagged.contains(&coord) {
                    Tile::flagged(coord.0, coord.1, has_bomb)
                } else {
                    Tile::new(coord.0, coord.1, has_bomb)
                }
            })
            .collect();
        Ok(Self::from_tiles(width, height, tiles))
    }

    fn from_tiles(width: usize, height: usize, mut tiles: Vec<Tile>) -> Self {
        let bomb_indices: Vec<usize> = tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.has_bomb())
            .map(|(index, _)| index)
            .collect();

        for bomb in bomb_indices {
            for neighbor in neighbors(width, height, bomb) {
                tiles[neighbor].add_neighbor_bomb();
            }
        }

        Self {
            width,
            height,
            tiles: tiles.into_iter().map(Mutex::new).collect(),
            dig_lock: RwLock::new(()),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Renders the board as newline-separated rows of space-separated cells.
    ///
    /// `-` untouched, `F` flagged, ` ` dug with no neighboring bombs, `1`-`8`
    /// dug with that many neighboring bombs.
    pub fn look(&self) -> String {
        let _board = self.read_lock();
        let mut rendering = String::with_capacity(self.tiles.len() * 2);

        for y in 0..self.height {
            if y > 0 {
                rendering.push('\n');
            }
            for x in 0..self.width {
                if x > 0 {
                    rendering.push(' ');
                }
                rendering.push(self.tile(y * self.width + x).symbol());
            }
        }

        rendering
    }

    /// Digs the tile at `(x, y)` and reveals the region around it.
    pub fn dig_at(&self, x: i64, y: i64) -> DigOutcome {
        let Some(index) = self.index_of(x, y) else {
            return DigOutcome::OutOfBounds;
        };

        let _board = self
            .dig_lock
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let dig = self.tile(index).try_dig();
        let outcome = match dig {
            TileDig::Refused => return DigOutcome::NoOp,
            TileDig::Clear => DigOutcome::Revealed,
            TileDig::Defused => {
                for neighbor in neighbors(self.width, self.height, index) {
                    self.tile(neighbor).remove_neighbor_bomb();
                }
                DigOutcome::Exploded
            }
        };

        let revealed = self.reveal_from(index);
        debug!(
            "Dig at ({}, {}): {:?}, {} more tile(s) revealed",
            x, y, outcome, revealed
        );
        outcome
    }

    /// Flags the tile at `(x, y)` if it is untouched.
    pub fn flag_at(&self, x: i64, y: i64) -> bool {
        self.index_of(x, y)
            .map_or(false, |index| self.tile(index).try_flag())
    }

    /// Removes the flag from the tile at `(x, y)` if it is flagged.
    pub fn deflag_at(&self, x: i64, y: i64) -> bool {
        self.index_of(x, y)
            .map_or(false, |index| self.tile(index).try_deflag())
    }

    /// Coordinates of all dug tiles in row-major order
    pub fn dug_tiles(&self) -> Vec<Coord> {
        self.collect_where(Tile::is_dug)
    }

    /// Coordinates of all flagged tiles in row-major order
    pub fn flagged_tiles(&self) -> Vec<Coord> {
        self.collect_where(Tile::is_flagged)
    }

    /// Coordinates of all tiles still hiding a bomb in row-major order
    pub fn bomb_tiles(&self) -> Vec<Coord> {
        self.collect_where(Tile::has_bomb)
    }

    pub fn is_untouched(&self, x: i64, y: i64) -> Option<bool> {
        self.query(x, y, Tile::is_untouched)
    }

    pub fn is_flagged(&self, x: i64, y: i64) -> Option<bool> {
        self.query(x, y, Tile::is_flagged)
    }

    pub fn is_dug(&self, x: i64, y: i64) -> Option<bool> {
        self.query(x, y, Tile::is_dug)
    }

    pub fn contains_bomb(&self, x: i64, y: i64) -> Option<bool> {
        self.query(x, y, Tile::has_bomb)
    }

    pub fn neighbor_bomb_count(&self, x: i64, y: i64) -> Option<u8> {
        self.query(x, y, Tile::neighbor_bombs)
    }

    /// Digs every untouched, bomb-free neighbor of a zero-count tile, and
    /// keeps going from each newly dug tile that is itself zero-count.
    ///
    /// Uses an explicit work queue so large open regions cannot overflow the
    /// stack. Returns the number of tiles dug by the cascade.
    fn reveal_from(&self, start: usize) -> usize {
        let mut frontier = VecDeque::from([start]);
        let mut revealed = 0;

        while let Some(index) = frontier.pop_front() {
            if self.tile(index).neighbor_bombs() != 0 {
                continue;
            }

            for neighbor in neighbors(self.width, self.height, index) {
                let mut tile = self.tile(neighbor);
                if tile.has_bomb() {
                    continue;
                }
                if tile.try_dig() == TileDig::Clear {
                    revealed += 1;
                    frontier.push_back(neighbor);
                }
            }
        }

        revealed
    }

    fn collect_where(&self, predicate: impl Fn(&Tile) -> bool) -> Vec<Coord> {
        let _board = self.read_lock();
        (0..self.tiles.len())
            .filter(|&index| predicate(&*self.tile(index)))
            .map(|index| (index % self.width, index / self.width))
            .collect()
    }

    fn query<T>(&self, x: i64, y: i64, read: impl Fn(&Tile) -> T) -> Option<T> {
        self.index_of(x, y).map(|index| read(&*self.tile(index)))
    }

    fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Every critical section leaves its tile valid before it can panic, so a
    /// poisoned lock still guards consistent state.
    fn tile(&self, index: usize) -> MutexGuard<'_, Tile> {
        self.tiles[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, ()> {
        self.dig_lock.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.look())
    }
}

/// Boards are equal when they have the same size and the same dug, flagged
/// and bomb-bearing tiles.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.width == other.width
            && self.height == other.height
            && self.dug_tiles() == other.dug_tiles()
            && self.flagged_tiles() == other.flagged_tiles()
            && self.bomb_tiles() == other.bomb_tiles()
    }
}

impl Eq for Board {}

/// In-bounds indices at Chebyshev distance 1 from `index`
fn neighbors(width: usize, height: usize, index: usize) -> impl Iterator<Item = usize> {
    let (x, y) = (index % width, index / width);
    NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < width && ny < height).then(|| ny * width + nx)
    })
}

fn checked_set(
    width: usize,
    height: usize,
    coords: impl IntoIterator<Item = Coord>,
) -> Result<HashSet<Coord>, BoardError> {
    coords
        .into_iter()
        .map(|(x, y)| {
            if x < width && y < height {
                Ok((x, y))
            } else {
                Err(BoardError::OutOfBounds {
                    x,
                    y,
                    width,
                    height,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use std::thread;

    /// 5 columns by 6 rows, bombs at (0,0) (3,1) (2,2) (1,4) (4,5)
    fn fixture_board() -> Board {
        Board::with_bombs(5, 6, [(0, 0), (3, 1), (2, 2), (1, 4), (4, 5)]).unwrap()
    }

    fn rows(board: &Board) -> Vec<String> {
        board.look().split('\n').map(str::to_string).collect()
    }

    fn set(coords: &[Coord]) -> HashSet<Coord> {
        coords.iter().copied().collect()
    }

    /// Checks every tile-level invariant against a brute-force recount.
    fn assert_invariants(board: &Board) {
        for index in 0..board.tiles.len() {
            let tile = board.tile(index).clone();
            if tile.is_dug() {
                assert!(!tile.has_bomb(), "dug tile ({}, {}) has a bomb", tile.x, tile.y);
            }
            let expected = neighbors(board.width, board.height, index)
                .filter(|&n| board.tile(n).has_bomb())
                .count();
            assert_eq!(
                tile.neighbor_bombs() as usize,
                expected,
                "wrong count at ({}, {})",
                tile.x,
                tile.y
            );
        }
    }

    #[test]
    fn test_fresh_board_is_all_untouched() {
        let board = fixture_board();
        assert_eq!(rows(&board), vec!["- - - - -"; 6]);
        assert_invariants(&board);
    }

    #[test]
    fn test_look_dimensions_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::random_with(9, 4, 0.2, &mut rng);
        for (x, y) in [(0, 0), (8, 3), (4, 2), (2, 1)] {
            board.dig_at(x, y);
        }

        let rendering = rows(&board);
        assert_eq!(rendering.len(), 4);
        for row in rendering {
            // A dug zero cell is itself a space, so check by character position.
            assert_eq!(row.len(), 9 * 2 - 1);
            for (i, cell) in row.chars().enumerate() {
                if i % 2 == 1 {
                    assert_eq!(cell, ' ');
                } else {
                    assert!(matches!(cell, '-' | 'F' | ' ' | '1'..='8'), "bad cell {:?}", cell);
                }
            }
        }
    }

    #[test]
    fn test_neighbor_counts_on_fixture() {
        let board = fixture_board();
        assert_eq!(board.neighbor_bomb_count(3, 2), Some(2));
        assert_eq!(board.neighbor_bomb_count(4, 3), Some(0));
        assert_eq!(board.neighbor_bomb_count(1, 1), Some(2));
        assert_eq!(board.neighbor_bomb_count(5, 0), None);
        assert_invariants(&board);
    }

    #[test]
    fn test_dig_bomb_explodes_and_cascades() {
        let board = fixture_board();

        assert_eq!(board.dig_at(4, 5), DigOutcome::Exploded);
        assert_eq!(
            rows(&board),
            vec![
                "- - - - -",
                "- - - - -",
                "- - - 2 1",
                "- - 2 1  ",
                "- - 1    ",
                "- - 1    ",
            ]
        );
        assert_eq!(board.contains_bomb(4, 5), Some(false));
        assert_invariants(&board);
    }

    #[test]
    fn test_dig_numbered_tile_reveals_only_itself() {
        let board = fixture_board();

        assert_eq!(board.dig_at(0, 5), DigOutcome::Revealed);
        assert_eq!(board.dug_tiles(), vec![(0, 5)]);
        assert_eq!(rows(&board)[5], "1 - - - -");
    }

    #[test]
    fn test_replayed_game_matches_expected_renderings() {
        let board = fixture_board();
        board.dig_at(4, 5);
        board.dig_at(0, 5);
        assert_eq!(board.dig_at(2, 2), DigOutcome::Exploded);
        assert_eq!(board.dig_at(0, 2), DigOutcome::Revealed);
        assert_eq!(
            rows(&board),
            vec![
                "- - - - -",
                "1 1 1 - -",
                "    1 1 1",
                "1 1 1    ",
                "- - 1    ",
                "1 - 1    ",
            ]
        );

        assert_eq!(board.dig_at(0, 0), DigOutcome::Exploded);
        assert_eq!(rows(&board)[0], "    1 - -");
        assert_eq!(rows(&board)[1], "    1 - -");
        assert_invariants(&board);
    }

    #[test]
    fn test_dig_out_of_bounds_is_rejected() {
        let board = fixture_board();
        let before = board.look();

        assert_eq!(board.dig_at(-1, 0), DigOutcome::OutOfBounds);
        assert_eq!(board.dig_at(0, -1), DigOutcome::OutOfBounds);
        assert_eq!(board.dig_at(5, 0), DigOutcome::OutOfBounds);
        assert_eq!(board.dig_at(0, 6), DigOutcome::OutOfBounds);
        assert_eq!(board.dig_at(i64::MAX, i64::MIN), DigOutcome::OutOfBounds);
        assert_eq!(board.look(), before);
    }

    #[test]
    fn test_dig_twice_is_noop() {
        let board = fixture_board();
        board.dig_at(0, 5);
        let before = board.look();

        assert_eq!(board.dig_at(0, 5), DigOutcome::NoOp);
        assert_eq!(board.look(), before);
    }

    #[test]
    fn test_dig_flagged_tile_is_noop() {
        let board = fixture_board();
        assert!(board.flag_at(0, 0));

        assert_eq!(board.dig_at(0, 0), DigOutcome::NoOp);
        assert_eq!(board.contains_bomb(0, 0), Some(true));
        assert_eq!(board.is_flagged(0, 0), Some(true));
    }

    #[test]
    fn test_flood_fill_clears_bomb_free_board() {
        let board = Board::with_bombs(5, 5, []).unwrap();

        assert_eq!(board.dig_at(2, 2), DigOutcome::Revealed);
        assert_eq!(board.dug_tiles().len(), 25);
        assert_eq!(rows(&board), vec!["         "; 5]);
    }

    #[test]
    fn test_flood_fill_stops_at_numbered_tiles() {
        let board = Board::with_bombs(5, 1, [(4, 0)]).unwrap();

        assert_eq!(board.dig_at(0, 0), DigOutcome::Revealed);
        assert_eq!(board.look(), [" ", " ", " ", "1", "-"].join(" "));
        assert_eq!(board.is_untouched(4, 0), Some(true));
    }

    #[test]
    fn test_flood_fill_skips_flagged_tiles() {
        let board = Board::with_bombs(3, 3, []).unwrap();
        board.flag_at(2, 2);

        board.dig_at(0, 0);
        assert_eq!(board.flagged_tiles(), vec![(2, 2)]);
        assert_eq!(board.dug_tiles().len(), 8);
        assert_eq!(rows(&board)[2], "    F");
    }

    #[test]
    fn test_single_tile_boards() {
        let empty = Board::with_bombs(1, 1, []).unwrap();
        assert_eq!(empty.dig_at(0, 0), DigOutcome::Revealed);
        assert_eq!(empty.look(), " ");

        let mined = Board::with_bombs(1, 1, [(0, 0)]).unwrap();
        assert_eq!(mined.dig_at(0, 0), DigOutcome::Exploded);
        assert_eq!(mined.look(), " ");
        assert!(mined.bomb_tiles().is_empty());
    }

    #[test]
    fn test_corner_dig_uses_clipped_neighborhood() {
        let board = Board::with_bombs(3, 3, [(1, 1)]).unwrap();
        assert_eq!(board.neighbor_bomb_count(0, 0), Some(1));

        assert_eq!(board.dig_at(2, 2), DigOutcome::Revealed);
        assert_eq!(board.dug_tiles(), vec![(2, 2)]);

        assert_eq!(board.dig_at(1, 1), DigOutcome::Exploded);
        assert_eq!(board.dug_tiles().len(), 9);
        assert_invariants(&board);
    }

    #[test]
    fn test_flag_then_deflag_restores_board() {
        let board = fixture_board();
        let before = board.look();

        assert!(board.flag_at(3, 1));
        assert_eq!(rows(&board)[1], "- - - F -");
        assert!(!board.flag_at(3, 1));
        assert!(board.deflag_at(3, 1));
        assert!(!board.deflag_at(3, 1));

        assert_eq!(board.look(), before);
        assert_eq!(board, fixture_board());
    }

    #[test]
    fn test_flag_rules() {
        let board = fixture_board();
        board.dig_at(0, 5);

        assert!(!board.flag_at(0, 5));
        assert!(!board.flag_at(-1, 2));
        assert!(!board.deflag_at(7, 7));
        assert!(!board.deflag_at(1, 1));
    }

    #[test]
    fn test_with_state_matches_played_board() {
        let played = fixture_board();
        played.flag_at(1, 1);
        played.dig_at(0, 5);

        let expected = Board::with_state(
            5,
            6,
            &set(&[(0, 5)]),
            &set(&[(1, 1)]),
            &set(&[(0, 0), (3, 1), (2, 2), (1, 4), (4, 5)]),
        )
        .unwrap();

        assert_eq!(played, expected);
        assert_eq!(played.look(), expected.look());
        assert_invariants(&expected);
    }

    #[test]
    fn test_with_state_rejects_dug_conflicts() {
        let dug = set(&[(1, 1)]);

        let flagged = Board::with_state(3, 3, &dug, &set(&[(1, 1)]), &HashSet::new());
        assert_eq!(flagged.unwrap_err(), BoardError::DugConflict { x: 1, y: 1 });

        let mined = Board::with_state(3, 3, &dug, &HashSet::new(), &set(&[(1, 1)]));
        assert_eq!(mined.unwrap_err(), BoardError::DugConflict { x: 1, y: 1 });
    }

    #[test]
    fn test_construction_rejects_out_of_bounds() {
        assert_eq!(
            Board::with_bombs(2, 2, [(2, 0)]).unwrap_err(),
            BoardError::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            }
        );
        let empty = HashSet::new();
        assert!(Board::with_state(2, 2, &set(&[(0, 3)]), &empty, &empty).is_err());
    }

    #[test]
    fn test_random_board_density() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = Board::random_with(200, 200, BOMB_PROBABILITY, &mut rng);

        let density = board.bomb_tiles().len() as f64 / (200.0 * 200.0);
        assert_approx_eq!(density, BOMB_PROBABILITY, 0.02);
        assert_invariants(&board);
    }

    #[test]
    fn test_random_board_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Board::random_with(10, 10, 0.0, &mut rng).bomb_tiles().is_empty());
        assert_eq!(Board::random_with(10, 10, 1.0, &mut rng).bomb_tiles().len(), 100);
        assert_eq!(Board::random(3, 4).look().lines().count(), 4);
    }

    #[test]
    fn test_invariants_hold_after_random_play() {
        let mut rng = StdRng::seed_from_u64(99);
        let board = Board::random_with(12, 9, 0.3, &mut rng);

        for step in 0..150_i64 {
            let (x, y) = (rng.gen_range(-1..13), rng.gen_range(-1..10));
            match step % 3 {
                0 => {
                    board.dig_at(x, y);
                }
                1 => {
                    board.flag_at(x, y);
                }
                _ => {
                    board.deflag_at(x, y);
                }
            }
            assert_invariants(&board);
        }
    }

    #[test]
    fn test_large_open_board_does_not_overflow() {
        let board = Board::with_bombs(400, 400, [(399, 399)]).unwrap();

        assert_eq!(board.dig_at(0, 0), DigOutcome::Revealed);
        assert_eq!(board.dug_tiles().len(), 400 * 400 - 1);
    }

    #[test]
    fn test_concurrent_flags_on_distinct_tiles() {
        let board = Arc::new(Board::with_bombs(16, 16, []).unwrap());

        let handles: Vec<_> = (0..16_i64)
            .map(|row| {
                let board = Arc::clone(&board);
                thread::spawn(move || {
                    for column in 0..16 {
                        assert!(board.flag_at(column, row));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(board.flagged_tiles().len(), 256);
    }

    #[test]
    fn test_concurrent_digs_keep_counts_consistent() {
        let mut rng = StdRng::seed_from_u64(5);
        let board = Arc::new(Board::random_with(30, 30, 0.3, &mut rng));

        let handles: Vec<_> = (0..8_u64)
            .map(|worker| {
                let board = Arc::clone(&board);
                thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(worker);
                    for _ in 0..200 {
                        let (x, y) = (rng.gen_range(0..30), rng.gen_range(0..30));
                        if rng.gen_bool(0.5) {
                            board.dig_at(x, y);
                        } else {
                            board.flag_at(x, y);
                            board.deflag_at(x, y);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_invariants(&board);
    }

    #[test]
    fn test_display_matches_look() {
        let board = fixture_board();
        board.dig_at(4, 5);
        assert_eq!(board.to_string(), board.look());
    }
}
