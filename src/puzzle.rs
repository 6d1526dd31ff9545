//! Puzzle records and daily puzzle selection.
//!
//! A [`PuzzleRecord`] is stored in canonical orientation and never changes.
//! [`PuzzleCatalog::daily_puzzle`] turns a record into a [`PuzzleInstance`]
//! by applying one of the eight board symmetries and optionally swapping
//! colors. The solution is mapped through the same transform, so a
//! [`PuzzleAttempt`] can check moves against it directly.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Board, Color, Point};
use crate::constants::{FNV_OFFSET_BASIS, FNV_PRIME};
use crate::engine::{Engine, MoveOutcome};
use crate::error::{MoveError, PuzzleError};
use crate::group::liberties;
use crate::transform::{Transform, apply_transformation, transform_points};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A puzzle in canonical orientation.
///
/// `solution` alternates between `target_color` (even indices) and the
/// opponent's scripted replies (odd indices).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleRecord {
    pub id: String,
    pub difficulty: Difficulty,
    pub initial_board: Board,
    pub solution: Vec<Point>,
    pub target_color: Color,
    pub description: String,
}

impl PuzzleRecord {
    /// Check that every group on the initial board has a liberty and that
    /// the solution is non-empty and legal when replayed.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        let board = &self.initial_board;
        if let Some(((x, y), _)) = board.stones().find(|&(p, c)| liberties(board, p, c) == 0) {
            return Err(PuzzleError::DeadGroup {
                id: self.id.clone(),
                x,
                y,
            });
        }
        if self.solution.is_empty() {
            return Err(PuzzleError::EmptySolution(self.id.clone()));
        }
        let size = self.initial_board.size();
        let mut engine = Engine::from_board(self.initial_board.clone());
        let mut color = self.target_color;
        for (index, &(x, y)) in self.solution.iter().enumerate() {
            if !engine.is_on_board(x, y) {
                return Err(PuzzleError::SolutionOffBoard { x, y, size });
            }
            engine
                .play(x, y, color)
                .map_err(|source| PuzzleError::IllegalSolution {
                    id: self.id.clone(),
                    index,
                    source,
                })?;
            color = color.opponent();
        }
        Ok(())
    }
}

/// A record prepared for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleInstance {
    pub record: Arc<PuzzleRecord>,
    pub board: Board,
    pub transform: Transform,
    pub color_swapped: bool,
}

impl PuzzleInstance {
    /// Validate `record` and orient it.
    pub fn new(
        record: Arc<PuzzleRecord>,
        transform: Transform,
        color_swapped: bool,
    ) -> Result<Self, PuzzleError> {
        record.validate()?;
        Ok(Self::oriented(record, transform, color_swapped))
    }

    /// Orient a record that has already passed [`PuzzleRecord::validate`].
    fn oriented(record: Arc<PuzzleRecord>, transform: Transform, color_swapped: bool) -> Self {
        let board = apply_transformation(&record.initial_board, transform, color_swapped);
        Self {
            record,
            board,
            transform,
            color_swapped,
        }
    }

    /// The color the solver plays.
    pub fn player_color(&self) -> Color {
        if self.color_swapped {
            self.record.target_color.opponent()
        } else {
            self.record.target_color
        }
    }

    /// Map a point on this instance's board back to the record's orientation.
    pub fn to_canonical(&self, p: Point) -> Point {
        self.transform.inverse().map(p, self.board.size())
    }

    /// The solution in this instance's orientation.
    pub fn solution(&self) -> Vec<Point> {
        transform_points(&self.record.solution, self.transform, self.board.size())
    }
}

/// A set of puzzle records, shared read-only across sessions.
#[derive(Clone, Debug)]
pub struct PuzzleCatalog {
    records: Vec<Arc<PuzzleRecord>>,
}

impl PuzzleCatalog {
    /// Validate and wrap `records`. Ids must be unique.
    pub fn new(records: Vec<PuzzleRecord>) -> Result<Self, PuzzleError> {
        if records.is_empty() {
            return Err(PuzzleError::EmptyCatalog);
        }
        let mut ids = HashSet::new();
        for record in &records {
            if !ids.insert(record.id.as_str()) {
                return Err(PuzzleError::DuplicateId(record.id.clone()));
            }
            record.validate()?;
        }
        Ok(Self {
            records: records.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, PuzzleError> {
        let records: Vec<PuzzleRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn load(path: &Path) -> Result<Self, PuzzleError> {
        let content = fs::read_to_string(path).map_err(|source| PuzzleError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content)?;
        info!(path = %path.display(), puzzles = catalog.len(), "loaded puzzle catalog");
        Ok(catalog)
    }

    /// The stock puzzles shipped with the crate.
    pub fn builtin() -> Self {
        match Self::new(builtin_records()) {
            Ok(catalog) => catalog,
            Err(e) => panic!("builtin puzzle catalog is invalid: {e}"),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Arc<PuzzleRecord>] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Arc<PuzzleRecord>> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Pick a record, a transform and a color swap from `seed`.
    ///
    /// Selection is deterministic: the same seed over the same catalog
    /// always yields the same instance.
    pub fn daily_puzzle(&self, seed: &str) -> PuzzleInstance {
        let mut rng = fastrand::Rng::with_seed(seed_hash(seed));
        let record = Arc::clone(&self.records[rng.usize(..self.records.len())]);
        let transform = Transform::ALL[rng.usize(..Transform::ALL.len())];
        let color_swapped = rng.bool();
        debug!(seed, id = %record.id, %transform, color_swapped, "selected daily puzzle");
        PuzzleInstance::oriented(record, transform, color_swapped)
    }
}

/// Daily puzzle from the builtin catalog.
pub fn get_daily_puzzle(seed: &str) -> PuzzleInstance {
    PuzzleCatalog::builtin().daily_puzzle(seed)
}

/// FNV-1a hash of the seed string.
fn seed_hash(seed: &str) -> u64 {
    seed.bytes().fold(FNV_OFFSET_BASIS, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

fn builtin_records() -> Vec<PuzzleRecord> {
    let record = |id: &str, difficulty, rows: &[&str], solution: Vec<Point>, description: &str| {
        let initial_board = match Board::from_rows(rows) {
            Ok(board) => board,
            Err(e) => panic!("builtin puzzle {id}: {e}"),
        };
        PuzzleRecord {
            id: id.to_string(),
            difficulty,
            initial_board,
            solution,
            target_color: Color::Black,
            description: description.to_string(),
        }
    };
    vec![
        record(
            "p1",
            Difficulty::Easy,
            &[
                "...XOX...",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
            ],
            vec![(4, 1)],
            "Black to kill. Capture the white stone on the edge.",
        ),
        record(
            "p2",
            Difficulty::Medium,
            &[
                ".........",
                ".........",
                ".........",
                "....XX...",
                "...XOOX..",
                "....X....",
                ".........",
                ".........",
                ".........",
            ],
            vec![(5, 5)],
            "Black to kill. Capture both white stones.",
        ),
        record(
            "p3",
            Difficulty::Hard,
            &[
                ".........",
                "OOX......",
                "XX.......",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
                ".........",
            ],
            vec![(1, 0), (2, 0), (0, 0)],
            "Black to kill. Atari from the outside first.",
        ),
    ]
}

/// Where a puzzle attempt stands after a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttemptStatus {
    /// The full solution has been played.
    Solved,
    /// The move was correct; `reply` is the opponent's scripted answer, if any.
    Continue { reply: Option<Point> },
    /// The move left the solution. The attempt is over.
    Wrong,
}

/// Result of one solver move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptMove {
    pub outcome: MoveOutcome,
    pub status: AttemptStatus,
}

/// One session's try at a puzzle instance.
pub struct PuzzleAttempt {
    instance: PuzzleInstance,
    engine: Engine,
    solution: Vec<Point>,
    step: usize,
    finished: Option<AttemptStatus>,
}

impl PuzzleAttempt {
    pub fn new(instance: PuzzleInstance) -> Self {
        let engine = Engine::from_board(instance.board.clone());
        let solution = instance.solution();
        Self {
            instance,
            engine,
            solution,
            step: 0,
            finished: None,
        }
    }

    pub fn instance(&self) -> &PuzzleInstance {
        &self.instance
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Play the solver's move at `(x, y)` and compare it with the solution.
    ///
    /// Illegal moves are returned as errors and leave the attempt unchanged.
    /// A legal move off the solution is still played, and ends the attempt.
    /// Once finished, further moves are played but the status stays fixed.
    pub fn attempt(&mut self, x: usize, y: usize) -> Result<AttemptMove, MoveError> {
        let color = self.instance.player_color();
        let outcome = self.engine.play(x, y, color)?;

        if let Some(status) = self.finished {
            return Ok(AttemptMove { outcome, status });
        }

        if self.solution.get(self.step) != Some(&(x, y)) {
            let canonical = self.instance.to_canonical((x, y));
            debug!(x, y, ?canonical, step = self.step, id = %self.instance.record.id, "wrong puzzle move");
            self.finished = Some(AttemptStatus::Wrong);
            return Ok(AttemptMove {
                outcome,
                status: AttemptStatus::Wrong,
            });
        }
        self.step += 1;

        let reply = self.solution.get(self.step).copied();
        if let Some((rx, ry)) = reply {
            if let Err(e) = self.engine.play(rx, ry, color.opponent()) {
                warn!(rx, ry, error = %e, "scripted reply rejected");
            }
            self.step += 1;
        }

        let status = if self.step >= self.solution.len() {
            self.finished = Some(AttemptStatus::Solved);
            AttemptStatus::Solved
        } else {
            AttemptStatus::Continue { reply }
        };
        Ok(AttemptMove { outcome, status })
    }
}
