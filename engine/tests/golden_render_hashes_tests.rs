use engine::field::TextFieldRenderer;
use engine::regression::{
    RenderHashGolden, assert_or_update_golden_json, generation_hashes, update_goldens_enabled,
};
use engine::{Board, Coordinate, RenderError, RenderStyles, Simulation, TextBoardRenderer};

/// A single live cell walking one column right per generation, wrapping at the edge.
struct Walker {
    width: u32,
    height: u32,
}

impl Simulation for Walker {
    type State = Board;

    fn initial_state(&self) -> Board {
        Board::with_alive(self.width, self.height, [Coordinate::new(0, 0)]).expect("board")
    }

    fn step(&self, state: &Board) -> Board {
        let mut next = state.clone();
        next.clear();
        for y in 0..state.height() as i32 {
            for x in 0..state.width() as i32 {
                if state.is_alive(Coordinate::new(x, y)) {
                    let moved = Coordinate::new((x + 1) % state.width() as i32, y);
                    next.set(moved, true).expect("in bounds");
                }
            }
        }
        next
    }
}

#[test]
fn walker_text_hashes_are_stable() {
    let name = "walker_text_hashes_are_stable";
    let (width, height) = (4, 3);
    let mut renderer =
        TextBoardRenderer::text(width, height, RenderStyles::default(), TextFieldRenderer::default())
            .expect("renderer");

    let hashes = generation_hashes(Walker { width, height }, 5, |board| {
        renderer.render_board(board).map(String::into_bytes)
    })
    .expect("render");
    assert_eq!(hashes.len(), 6);
    // The walker is back at the origin after `width` generations.
    assert_eq!(hashes[0], hashes[4]);
    assert_ne!(hashes[0], hashes[1]);

    let golden = RenderHashGolden::new(name, width, height, hashes);
    let path = engine::regression_golden_path!(name);
    assert_or_update_golden_json(&path, &golden, update_goldens_enabled()).expect("golden");
}

#[test]
fn render_errors_stop_hashing() {
    let failed = generation_hashes(Walker { width: 2, height: 2 }, 3, |_| {
        Err::<Vec<u8>, _>(RenderError::MissingBorderGrid)
    });
    assert!(matches!(failed, Err(RenderError::MissingBorderGrid)));
}
