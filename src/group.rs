//! Connected groups and their liberties.
//!
//! Pure functions over a borrowed [`Board`]. Each traversal uses an explicit
//! stack and a visited buffer indexed like the board itself, so the cost is
//! bounded by the group size and no recursion is involved.

use crate::board::{Board, Color, Point};

/// Collect all stones of `color` connected to `start`.
///
/// Returns an empty vector if `start` does not hold a stone of `color`.
/// Stones are returned in traversal order; callers that need a set should
/// treat the result as one (no point appears twice).
pub fn group(board: &Board, start: Point, color: Color) -> Vec<Point> {
    let mut out = Vec::new();
    let mut visited = vec![false; board.size() * board.size()];
    collect_group(board, start, color, &mut visited, &mut out);
    out
}

/// Flood-fill from `start`, appending unvisited stones of `color` to `out`.
///
/// `visited` is shared with the caller so several fills over one board
/// never report the same stone twice. Returns the number of stones added.
pub(crate) fn collect_group(
    board: &Board,
    start: Point,
    color: Color,
    visited: &mut [bool],
    out: &mut Vec<Point>,
) -> usize {
    if board.get(start.0, start.1) != Some(color) {
        return 0;
    }
    let mut stack = vec![start];
    let mut count = 0;

    while let Some(p) = stack.pop() {
        let i = board.idx(p);
        if visited[i] {
            continue;
        }
        visited[i] = true;
        out.push(p);
        count += 1;
        for n in board.neighbors(p) {
            if !visited[board.idx(n)] && board.get(n.0, n.1) == Some(color) {
                stack.push(n);
            }
        }
    }
    count
}

/// Distinct empty points adjacent to the group of `color` at `start`.
pub fn liberty_points(board: &Board, start: Point, color: Color) -> Vec<Point> {
    let mut seen = vec![false; board.size() * board.size()];
    let mut libs = Vec::new();
    for p in group(board, start, color) {
        for n in board.neighbors(p) {
            let i = board.idx(n);
            if !seen[i] && board.get(n.0, n.1).is_none() {
                seen[i] = true;
                libs.push(n);
            }
        }
    }
    libs
}

/// Count the liberties of the group of `color` at `start`.
///
/// Liberties are deduplicated across the whole group, not counted per stone.
/// Returns 0 if `start` does not hold a stone of `color`.
pub fn liberties(board: &Board, start: Point, color: Color) -> usize {
    liberty_points(board, start, color).len()
}
