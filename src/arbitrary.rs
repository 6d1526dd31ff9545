use quickcheck::{Arbitrary, Gen};

use crate::board::{Board, Color, Point};

/// A random board between 2x2 and 9x9, roughly one third black, one third white.
#[derive(Clone, Debug)]
pub struct ArbBoard(pub Board);

impl Arbitrary for ArbBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = 2 + usize::arbitrary(g) % 8;
        let stones: Vec<(Point, Color)> = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .filter_map(|p| match u8::arbitrary(g) % 3 {
                0 => Some((p, Color::Black)),
                1 => Some((p, Color::White)),
                _ => None,
            })
            .collect();
        match Board::from_stones(size, &stones) {
            Ok(board) => ArbBoard(board),
            Err(e) => panic!("{e}"),
        }
    }
}

impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Color::Black
        } else {
            Color::White
        }
    }
}
