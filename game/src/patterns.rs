use engine::{Board, Coordinate};

/// A seed shape, with cells relative to its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
];

impl Pattern {
    pub fn find(name: &str) -> Option<&'static Pattern> {
        PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        PATTERNS.iter().map(|p| p.name)
    }

    pub fn width(&self) -> i32 {
        self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0)
    }

    pub fn height(&self) -> i32 {
        self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0)
    }

    /// Sets the pattern's cells alive, centred on `board`. Cells that fall off the board are
    /// skipped.
    pub fn place_centered(&self, board: &mut Board) -> usize {
        let origin = Coordinate::new(
            (board.width() as i32 - self.width()) / 2,
            (board.height() as i32 - self.height()) / 2,
        );
        self.cells
            .iter()
            .filter(|&&(x, y)| board.set(origin.offset(x, y), true).is_ok())
            .count()
    }
}

/// A board with roughly a third of its cells alive, reproducible from `seed`.
pub fn random_board(width: u32, height: u32, seed: u64) -> engine::Result<Board> {
    let mut board = Board::new(width, height)?;
    let mut state = seed.wrapping_mul(0x9e37_79b9_7f4a_7c15) | 1;
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            if (state >> 16) % 3 == 0 {
                board.set(Coordinate::new(x, y), true)?;
            }
        }
    }
    Ok(board)
}
