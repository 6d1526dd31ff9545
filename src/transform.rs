//! Board symmetries used to generate puzzle variations.
//!
//! The 8 elements of the square's dihedral group, each a bijection on the
//! points of an N×N board. Transforms preserve adjacency, so a position and
//! its image are the same problem.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Point};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transform {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    FlipH,
    FlipV,
    Transpose,
    AntiTranspose,
}

impl Transform {
    pub const ALL: [Transform; 8] = [
        Transform::Identity,
        Transform::Rotate90,
        Transform::Rotate180,
        Transform::Rotate270,
        Transform::FlipH,
        Transform::FlipV,
        Transform::Transpose,
        Transform::AntiTranspose,
    ];

    /// Map a point of a `size`×`size` board.
    pub fn map(self, (x, y): Point, size: usize) -> Point {
        let m = size - 1;
        match self {
            Transform::Identity => (x, y),
            Transform::Rotate90 => (m - y, x),
            Transform::Rotate180 => (m - x, m - y),
            Transform::Rotate270 => (y, m - x),
            Transform::FlipH => (m - x, y),
            Transform::FlipV => (x, m - y),
            Transform::Transpose => (y, x),
            Transform::AntiTranspose => (m - y, m - x),
        }
    }

    /// The transform that undoes `self`.
    pub fn inverse(self) -> Transform {
        match self {
            Transform::Rotate90 => Transform::Rotate270,
            Transform::Rotate270 => Transform::Rotate90,
            other => other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Transform::Identity => "identity",
            Transform::Rotate90 => "rotate90",
            Transform::Rotate180 => "rotate180",
            Transform::Rotate270 => "rotate270",
            Transform::FlipH => "flipH",
            Transform::FlipV => "flipV",
            Transform::Transpose => "transpose",
            Transform::AntiTranspose => "antiTranspose",
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transform::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown transform: {s}"))
    }
}

/// Copy every stone of `board` to its image under `transform`,
/// inverting its color when `color_swap` is set.
pub fn apply_transformation(board: &Board, transform: Transform, color_swap: bool) -> Board {
    let size = board.size();
    let mut out = Board::new(size);
    for (p, color) in board.stones() {
        let color = if color_swap { color.opponent() } else { color };
        out.set(transform.map(p, size), Some(color));
    }
    out
}

/// Map a sequence of points, keeping their order.
pub fn transform_points(points: &[Point], transform: Transform, size: usize) -> Vec<Point> {
    points.iter().map(|&p| transform.map(p, size)).collect()
}
