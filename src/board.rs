//! Board state representation.
//!
//! A [`Board`] is a fixed-size N×N grid stored as a flat, index-addressed
//! buffer (`y * size + x`). The size never changes after construction.
//! The board knows nothing about Go rules: placement legality lives in
//! [`engine`](crate::engine) and connectivity in [`group`](crate::group).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CHAR_BLACK, CHAR_EMPTY, CHAR_WHITE, DELTA, MAX_SIZE, MIN_SIZE};
use crate::error::{ConfigError, PuzzleError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Color::Black => CHAR_BLACK,
            Color::White => CHAR_WHITE,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A point on the board as `(x, y)`, with `(0, 0)` in the top-left corner.
pub type Point = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Create an empty board. Panics if `size` is outside `MIN_SIZE..=MAX_SIZE`;
    /// use [`Board::try_new`] for untrusted sizes.
    pub fn new(size: usize) -> Self {
        match Self::try_new(size) {
            Ok(board) => board,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(size: usize) -> Result<Self, ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(ConfigError::BoardSize {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Parse a board from rows of `X` (black), `O` (white) and `.` (empty).
    ///
    /// Whitespace inside a row is ignored, so the output of `Display` parses back.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, PuzzleError> {
        let size = rows.len();
        let mut board = Self::try_new(size)?;
        for (y, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if chars.len() != size {
                return Err(PuzzleError::NotSquare {
                    row: y,
                    len: chars.len(),
                    size,
                });
            }
            for (x, ch) in chars.into_iter().enumerate() {
                let cell = match ch {
                    CHAR_BLACK => Some(Color::Black),
                    CHAR_WHITE => Some(Color::White),
                    CHAR_EMPTY => None,
                    ch => return Err(PuzzleError::BadChar { row: y, ch }),
                };
                board.set((x, y), cell);
            }
        }
        Ok(board)
    }

    /// Build a board with the given stones placed directly, without rule checks.
    pub fn from_stones(size: usize, stones: &[(Point, Color)]) -> Result<Self, ConfigError> {
        let mut board = Self::try_new(size)?;
        for &(p, color) in stones {
            if board.is_on_board(p.0, p.1) {
                board.set(p, Some(color));
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_on_board(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    #[inline]
    pub(crate) fn idx(&self, (x, y): Point) -> usize {
        y * self.size + x
    }

    /// Stone at `(x, y)`; `None` for empty or off-board points.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if !self.is_on_board(x, y) {
            return None;
        }
        self.cells[self.idx((x, y))]
    }

    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.is_on_board(x, y) && self.get(x, y).is_none()
    }

    pub(crate) fn set(&mut self, p: Point, cell: Option<Color>) {
        let i = self.idx(p);
        self.cells[i] = cell;
    }

    /// The in-bounds orthogonal neighbors of `p`.
    pub fn neighbors(&self, (x, y): Point) -> impl Iterator<Item = Point> + '_ {
        DELTA.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            self.is_on_board(nx, ny).then_some((nx, ny))
        })
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        (0..s).flat_map(move |y| (0..s).map(move |x| (x, y)))
    }

    pub fn empty_points(&self) -> Vec<Point> {
        self.points()
            .filter(|&(x, y)| self.is_empty_at(x, y))
            .collect()
    }

    /// Occupied points with their stone color, in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        self.points()
            .filter_map(|(x, y)| self.get(x, y).map(|c| ((x, y), c)))
    }

    pub fn stone_count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == Some(color)).count()
    }

    /// Rows as `X`/`O`/`.` strings without separators.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.size)
            .map(|y| {
                (0..self.size)
                    .map(|x| self.get(x, y).map_or(CHAR_EMPTY, Color::to_char))
                    .collect()
            })
            .collect()
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = PuzzleError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Board::from_rows(&rows)
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let ch = self.get(x, y).map_or(CHAR_EMPTY, Color::to_char);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(9);
        assert_eq!(board.size(), 9);
        assert_eq!(board.empty_points().len(), 81);
        assert_eq!(board.stone_count(Color::Black), 0);
    }

    #[test]
    fn test_try_new_rejects_bad_sizes() {
        assert!(Board::try_new(1).is_err());
        assert!(Board::try_new(20).is_err());
        assert!(Board::try_new(19).is_ok());
    }

    #[test]
    fn test_neighbors_corner_edge_center() {
        let board = Board::new(9);
        assert_eq!(board.neighbors((0, 0)).count(), 2);
        assert_eq!(board.neighbors((0, 4)).count(), 3);
        assert_eq!(board.neighbors((4, 4)).count(), 4);
        assert_eq!(board.neighbors((8, 8)).count(), 2);
    }

    #[test]
    fn test_get_off_board() {
        let board = Board::new(9);
        assert_eq!(board.get(9, 0), None);
        assert!(!board.is_on_board(0, 9));
        assert!(!board.is_empty_at(9, 9));
    }

    #[test]
    fn test_from_rows_and_display() {
        let board = Board::from_rows(&["X.O", "...", "..X"]).unwrap();
        assert_eq!(board.get(0, 0), Some(Color::Black));
        assert_eq!(board.get(2, 0), Some(Color::White));
        assert_eq!(board.get(2, 2), Some(Color::Black));
        assert_eq!(board.to_string(), "X . O \n. . . \n. . X \n");

        let reparsed = Board::from_rows(&board.to_string().lines().collect::<Vec<_>>()).unwrap();
        assert_eq!(reparsed, board);
    }

    #[test]
    fn test_from_rows_errors() {
        assert!(matches!(
            Board::from_rows(&["X.", "..."]),
            Err(PuzzleError::NotSquare { row: 0, .. })
        ));
        assert!(matches!(
            Board::from_rows(&["X?", ".."]),
            Err(PuzzleError::BadChar { row: 0, ch: '?' })
        ));
    }

    #[test]
    fn test_serde_rows() {
        let board = Board::from_rows(&["XO", ".."]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["XO",".."]"#);
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
    }
}
