//! Constants for board dimensions, bot defaults and puzzle selection.
//!
//! Board size is a runtime property of each [`Board`](crate::board::Board),
//! but every board the engine accepts falls inside the range below.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Lessons, puzzles and bot games all use 9x9.
pub const DEFAULT_SIZE: usize = 9;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "goban-dojo.json";

/// Smallest accepted board size.
pub const MIN_SIZE: usize = 2;

/// Largest accepted board size. Standard Go sizes are 9, 13, or 19.
pub const MAX_SIZE: usize = 19;

/// Offsets to the four orthogonal neighbors as (dx, dy).
/// Order: East, West, South, North
pub const DELTA: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

// =============================================================================
// Text Representation
// =============================================================================

/// Black stone.
pub const CHAR_BLACK: char = 'X';

/// White stone.
pub const CHAR_WHITE: char = 'O';

/// Empty point.
pub const CHAR_EMPTY: char = '.';

// =============================================================================
// Puzzle Selection
// =============================================================================

/// FNV-1a 64-bit offset basis, used to turn a seed string into an RNG seed.
pub const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
pub const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
