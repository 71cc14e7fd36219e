use engine::{Board, Coordinate, Simulation};

/// Conway's B3/S23 rule over a fixed starting board.
#[derive(Debug, Clone)]
pub struct Conway {
    seed: Board,
    wrap: bool,
}

impl Conway {
    pub fn new(seed: Board) -> Self {
        Self { seed, wrap: false }
    }

    /// Treats the board as a torus: cells on one edge neighbour the opposite edge.
    pub fn wrapping(mut self) -> Self {
        self.wrap = true;
        self
    }
}

pub fn next_generation(board: &Board, wrap: bool) -> Board {
    let mut next = board.clone();
    next.clear();
    for y in 0..board.height() as i32 {
        for x in 0..board.width() as i32 {
            let c = Coordinate::new(x, y);
            let alive = matches!(
                (board.is_alive(c), board.alive_neighbours(c, wrap)),
                (true, 2) | (true, 3) | (false, 3)
            );
            if alive {
                // `c` comes from the board's own bounds.
                let _ = next.set(c, true);
            }
        }
    }
    next
}

impl Simulation for Conway {
    type State = Board;

    fn initial_state(&self) -> Board {
        self.seed.clone()
    }

    fn step(&self, state: &Board) -> Board {
        next_generation(state, self.wrap)
    }
}
