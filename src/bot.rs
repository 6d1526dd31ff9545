//! Heuristic opponents.
//!
//! Each [`Personality`] is a pure function from a board and a color to a
//! proposed point. Proposals are not checked for legality: the engine is the
//! only arbiter, and a rejected proposal counts as a pass (see
//! [`play_bot_turn`]). Randomness comes from a caller-owned [`fastrand::Rng`]
//! so games can be replayed from a seed.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Color, Point};
use crate::engine::{Engine, MoveOutcome};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    /// Any empty point
    Random,
    /// Empty points touching an opposing stone
    Aggressive,
    /// Empty points off the first line
    #[default]
    Cautious,
}

impl Personality {
    pub const ALL: [Personality; 3] = [
        Personality::Random,
        Personality::Aggressive,
        Personality::Cautious,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Personality::Random => "Random",
            Personality::Aggressive => "Aggressive Al",
            Personality::Cautious => "Cautious Cal",
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Propose a move for `color`. `None` means there is nothing to play (a pass).
pub fn propose_move(
    board: &Board,
    color: Color,
    personality: Personality,
    rng: &mut fastrand::Rng,
) -> Option<Point> {
    match personality {
        Personality::Random => random_move(board, rng),
        Personality::Aggressive => contact_move(board, color, rng),
        Personality::Cautious => interior_move(board, rng),
    }
}

/// Uniform choice among all empty points.
pub fn random_move(board: &Board, rng: &mut fastrand::Rng) -> Option<Point> {
    rng.choice(board.empty_points())
}

/// Uniform choice among [`contact_points`], falling back to [`random_move`].
pub fn contact_move(board: &Board, color: Color, rng: &mut fastrand::Rng) -> Option<Point> {
    rng.choice(contact_points(board, color))
        .or_else(|| random_move(board, rng))
}

/// Uniform choice among [`interior_points`], falling back to [`random_move`].
pub fn interior_move(board: &Board, rng: &mut fastrand::Rng) -> Option<Point> {
    rng.choice(interior_points(board))
        .or_else(|| random_move(board, rng))
}

/// Empty points orthogonally adjacent to at least one stone of `color`'s opponent.
pub fn contact_points(board: &Board, color: Color) -> Vec<Point> {
    let opp = color.opponent();
    board
        .empty_points()
        .into_iter()
        .filter(|&p| board.neighbors(p).any(|(nx, ny)| board.get(nx, ny) == Some(opp)))
        .collect()
}

/// Empty points not on the outermost ring of the board.
pub fn interior_points(board: &Board) -> Vec<Point> {
    let last = board.size() - 1;
    board
        .empty_points()
        .into_iter()
        .filter(|&(x, y)| x > 0 && y > 0 && x < last && y < last)
        .collect()
}

/// What happened when the bot took its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BotTurn {
    Played { point: Point, outcome: MoveOutcome },
    Passed,
}

/// Ask `personality` for a move and submit it to `engine`.
///
/// A proposal the engine rejects is not retried; the turn becomes a pass.
pub fn play_bot_turn(
    engine: &mut Engine,
    color: Color,
    personality: Personality,
    rng: &mut fastrand::Rng,
) -> BotTurn {
    let Some((x, y)) = propose_move(engine.board(), color, personality, rng) else {
        debug!(%personality, %color, "no candidates, passing");
        return BotTurn::Passed;
    };
    match engine.play(x, y, color) {
        Ok(outcome) => BotTurn::Played {
            point: (x, y),
            outcome,
        },
        Err(e) => {
            debug!(%personality, %color, x, y, error = %e, "proposal rejected, passing");
            BotTurn::Passed
        }
    }
}
