//! The rule engine: board ownership, move legality and capture resolution.
//!
//! [`Engine::play`] is the only operation that mutates a game. It evaluates
//! a move in strict order:
//!
//! 1. bounds and occupancy checks (no mutation on failure)
//! 2. tentative placement
//! 3. capture of every adjacent opposing group left without liberties
//! 4. suicide check, only when nothing was captured
//!
//! Captures take precedence over the suicide check, so a move may fill its
//! own last liberty if it removes an opposing group at the same time.
//! After any successful move every group on the board has a liberty.

use serde::Serialize;
use tracing::{debug, trace};

use crate::board::{Board, Color, Point};
use crate::error::{ConfigError, MoveError};
use crate::group::{collect_group, liberties};

/// Stones captured by each color over the lifetime of an engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Captures {
    pub black: usize,
    pub white: usize,
}

impl Captures {
    pub fn get(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    fn add(&mut self, color: Color, n: usize) {
        match color {
            Color::Black => self.black += n,
            Color::White => self.white += n,
        }
    }
}

/// Result of a successful move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Removed opposing stones, in the order they were found.
    pub captured: Vec<Point>,
}

impl MoveOutcome {
    pub fn captured_count(&self) -> usize {
        self.captured.len()
    }
}

/// Read-only view of a game for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub captures: Captures,
}

/// A single game's board and capture counters.
///
/// Not meant to be shared: each session owns exactly one engine.
#[derive(Clone, Debug)]
pub struct Engine {
    board: Board,
    captures: Captures,
}

impl Engine {
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        Ok(Self::from_board(Board::try_new(size)?))
    }

    /// Start from a prepared position (lesson or puzzle setup).
    /// Capture counters start at zero.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            captures: Captures::default(),
        }
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn is_on_board(&self, x: usize, y: usize) -> bool {
        self.board.is_on_board(x, y)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            captures: self.captures,
        }
    }

    /// Empty the board and zero the capture counters. The size is kept.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.size());
        self.captures = Captures::default();
    }

    /// Place a stone of `color` at `(x, y)`.
    ///
    /// # Errors
    /// - [`MoveError::OutOfBounds`] if the point is off the board
    /// - [`MoveError::Occupied`] if the point holds a stone
    /// - [`MoveError::Suicide`] if the stone's group would have no liberties
    ///   and no opposing group is captured
    ///
    /// The board and counters are unchanged on every error path.
    pub fn play(&mut self, x: usize, y: usize, color: Color) -> Result<MoveOutcome, MoveError> {
        if !self.is_on_board(x, y) {
            trace!(x, y, %color, "rejected: off board");
            return Err(MoveError::OutOfBounds);
        }
        if self.board.get(x, y).is_some() {
            trace!(x, y, %color, "rejected: occupied");
            return Err(MoveError::Occupied);
        }

        let pt = (x, y);
        self.board.set(pt, Some(color));

        let captured = self.find_captures(pt, color.opponent());
        if !captured.is_empty() {
            for &p in &captured {
                self.board.set(p, None);
            }
            self.captures.add(color, captured.len());
            debug!(x, y, %color, captured = captured.len(), "capture");
            return Ok(MoveOutcome { captured });
        }

        if liberties(&self.board, pt, color) == 0 {
            self.board.set(pt, None); // undo suicidal move
            trace!(x, y, %color, "rejected: suicide");
            return Err(MoveError::Suicide);
        }

        Ok(MoveOutcome::default())
    }

    /// Union of the groups of `opp` next to `pt` that have no liberties left.
    fn find_captures(&self, pt: Point, opp: Color) -> Vec<Point> {
        let mut visited = vec![false; self.size() * self.size()];
        let mut captured = Vec::new();
        for n in self.board.neighbors(pt) {
            if self.board.get(n.0, n.1) == Some(opp)
                && !visited[self.board.idx(n)]
                && liberties(&self.board, n, opp) == 0
            {
                collect_group(&self.board, n, opp, &mut visited, &mut captured);
            }
        }
        captured
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    fn engine_from(rows: &[&str]) -> Engine {
        Engine::from_board(Board::from_rows(rows).unwrap())
    }

    #[test]
    fn test_play_basic() {
        let mut engine = Engine::new(9).unwrap();
        let outcome = engine.play(2, 2, Color::Black).unwrap();
        assert!(outcome.captured.is_empty());
        assert_eq!(engine.board().get(2, 2), Some(Color::Black));
    }

    #[test]
    fn test_new_rejects_bad_size() {
        assert!(Engine::new(0).is_err());
        assert!(Engine::new(25).is_err());
    }

    #[test]
    fn test_out_of_bounds_and_occupied() {
        let mut engine = Engine::new(9).unwrap();
        assert_eq!(engine.play(9, 0, Color::Black), Err(MoveError::OutOfBounds));
        assert_eq!(engine.play(0, 9, Color::White), Err(MoveError::OutOfBounds));
        engine.play(3, 3, Color::Black).unwrap();
        assert_eq!(engine.play(3, 3, Color::White), Err(MoveError::Occupied));
        assert_eq!(engine.play(3, 3, Color::Black), Err(MoveError::Occupied));
    }

    #[test]
    fn test_single_capture() {
        let mut engine = Engine::new(9).unwrap();
        engine.play(4, 4, Color::White).unwrap();
        engine.play(4, 3, Color::Black).unwrap();
        engine.play(4, 5, Color::Black).unwrap();
        engine.play(3, 4, Color::Black).unwrap();

        let outcome = engine.play(5, 4, Color::Black).unwrap();
        assert_eq!(outcome.captured, vec![(4, 4)]);
        assert_eq!(engine.board().get(4, 4), None);
        assert_eq!(engine.captures().black, 1);
        assert_eq!(engine.captures().white, 0);
    }

    #[test]
    fn test_suicide_is_rejected_without_mutation() {
        let mut engine = engine_from(&[
            ".O...", //
            "O....",
            ".....",
            ".....",
            ".....",
        ]);
        let before = engine.snapshot();
        assert_eq!(engine.play(0, 0, Color::Black), Err(MoveError::Suicide));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_multi_stone_suicide() {
        // Black fills the last shared liberty of its own two-stone group.
        let mut engine = engine_from(&[
            "X.O..", //
            "OO...",
            ".....",
            ".....",
            ".....",
        ]);
        assert_eq!(engine.play(1, 0, Color::Black), Err(MoveError::Suicide));
        assert_eq!(engine.board().get(1, 0), None);
        assert_eq!(engine.board().get(0, 0), Some(Color::Black));
    }

    #[test]
    fn test_capture_before_suicide() {
        // White at (1,0) is in atari; black at (0,0) filling it has no
        // liberties of its own but captures first.
        let mut engine = engine_from(&[
            ".OX..", //
            "OX...",
            ".....",
            ".....",
            ".....",
        ]);
        let outcome = engine.play(0, 0, Color::Black).unwrap();
        assert_eq!(outcome.captured, vec![(1, 0)]);
        assert_eq!(engine.board().get(0, 0), Some(Color::Black));
        assert_eq!(liberties(engine.board(), (0, 0), Color::Black), 1);
    }

    #[test]
    fn test_multiple_groups_captured_together() {
        let mut engine = engine_from(&[
            "XO.OX", //
            ".X.X.",
            ".....",
            ".....",
            ".....",
        ]);
        let outcome = engine.play(2, 0, Color::Black).unwrap();
        let mut captured = outcome.captured.clone();
        captured.sort_unstable();
        assert_eq!(captured, vec![(1, 0), (3, 0)]);
        assert_eq!(engine.captures().black, 2);
    }

    #[test]
    fn test_group_touching_twice_counted_once() {
        // The white group wraps around (1,1) and touches it on two sides.
        let mut engine = engine_from(&[
            "XOOX", //
            "XO.X",
            ".XX.",
            "....",
        ]);
        let outcome = engine.play(2, 1, Color::Black).unwrap();
        let mut captured = outcome.captured.clone();
        captured.sort_unstable();
        assert_eq!(captured, vec![(1, 0), (1, 1), (2, 0)]);
        assert_eq!(engine.captures().black, 3);
    }

    #[test]
    fn test_reset() {
        let mut engine = Engine::new(9).unwrap();
        engine.play(0, 0, Color::Black).unwrap();
        engine.reset();
        assert_eq!(engine.size(), 9);
        assert_eq!(engine.board().stone_count(Color::Black), 0);
        assert_eq!(engine.captures(), Captures::default());
    }

    fn every_group_has_a_liberty(board: &Board) -> bool {
        board
            .stones()
            .all(|(p, color)| liberties(board, p, color) > 0)
    }

    quickcheck! {
        fn play_keeps_invariants(moves: Vec<(u8, u8, bool)>) -> bool {
            let mut engine = Engine::new(7).unwrap();
            for (x, y, black) in moves {
                let (x, y) = (x as usize % 8, y as usize % 8);
                let color = if black { Color::Black } else { Color::White };
                let before = engine.snapshot();
                match engine.play(x, y, color) {
                    Ok(outcome) => {
                        let after = engine.captures();
                        if after.get(color) != before.captures.get(color) + outcome.captured_count()
                            || after.get(color.opponent()) != before.captures.get(color.opponent())
                            || engine.board().get(x, y) != Some(color)
                            || !every_group_has_a_liberty(engine.board())
                        {
                            return false;
                        }
                    }
                    Err(e) => {
                        if engine.snapshot() != before {
                            return false;
                        }
                        let expected = if x >= 7 || y >= 7 {
                            MoveError::OutOfBounds
                        } else if before.board.get(x, y).is_some() {
                            MoveError::Occupied
                        } else {
                            MoveError::Suicide
                        };
                        if e != expected {
                            return false;
                        }
                    }
                }
            }
            true
        }
    }
}
