use std::io::Cursor;

use engine::border::BorderStyle;
use engine::raster::{BLACK, WHITE};
use engine::{Board, Coordinate, ImageBoardRenderer, Overlay, Rectangle, RenderStyles};

const YELLOW: [u8; 4] = [255, 255, 0, 255];

fn renderer(width: u32, height: u32, field_size: u32, grid: bool) -> ImageBoardRenderer {
    let styles = RenderStyles {
        background_grid: grid.then(BorderStyle::background_grid),
        ..RenderStyles::default()
    };
    ImageBoardRenderer::image(width, height, field_size, styles, BLACK, YELLOW).expect("renderer")
}

#[test]
fn image_size_counts_fields_and_border_lines() {
    let board = Board::new(2, 2).expect("board");
    let plain = renderer(2, 2, 10, false).render_board(&board).expect("render");
    assert_eq!((plain.width(), plain.height()), (22, 22));

    let gridded = renderer(2, 2, 10, true).render_board(&board).expect("render");
    assert_eq!((gridded.width(), gridded.height()), (23, 23));
}

#[test]
fn alive_cells_draw_a_sprite() {
    let board = Board::with_alive(1, 1, [Coordinate::new(0, 0)]).expect("board");
    let image = renderer(1, 1, 20, false).render_board(&board).expect("render");
    let centre = image.pixel(11, 11).expect("pixel");
    assert_eq!(centre, YELLOW);
    assert_eq!(image.pixel(0, 0), Some(WHITE));

    let empty = Board::new(1, 1).expect("board");
    let blank = renderer(1, 1, 20, false).render_board(&empty).expect("render");
    assert_eq!(blank.pixel(11, 11), Some(BLACK));
}

#[test]
fn highlight_changes_pixels_only_for_the_call() {
    let board = Board::new(3, 3).expect("board");
    let mut renderer = renderer(3, 3, 8, false);
    let plain = renderer.render_board(&board).expect("render");
    let highlighted = renderer
        .render_board_with(&board, &Overlay::highlight(Coordinate::new(1, 1)))
        .expect("render");
    assert_ne!(plain.rgba(), highlighted.rgba());
    assert_eq!(renderer.render_board(&board).expect("render").rgba(), plain.rgba());
}

#[test]
fn png_output_decodes_to_the_same_size() {
    let board = Board::with_alive(3, 2, [Coordinate::new(1, 1)]).expect("board");
    let image = renderer(3, 2, 12, true).render_board(&board).expect("render");
    let bytes = image.to_png_bytes().expect("png");

    let decoder = png::Decoder::new(Cursor::new(bytes));
    let reader = decoder.read_info().expect("png header");
    let info = reader.info();
    assert_eq!((info.width, info.height), (image.width(), image.height()));
    assert_eq!(info.color_type, png::ColorType::Rgba);
}

#[test]
fn selection_past_the_board_is_clipped() {
    let board = Board::new(3, 3).expect("board");
    let mut renderer = renderer(3, 3, 10, false);
    let overhanging = renderer
        .render_board_with(
            &board,
            &Overlay::selection(Rectangle::new(Coordinate::new(-2, -2), Coordinate::new(1, 1))),
        )
        .expect("render");
    let clipped = renderer
        .render_board_with(
            &board,
            &Overlay::selection(Rectangle::new(Coordinate::new(0, 0), Coordinate::new(1, 1))),
        )
        .expect("render");
    assert_eq!(overhanging.rgba(), clipped.rgba());
    // Below the selection the frame's left edge keeps its own colour.
    assert_eq!(overhanging.pixel(0, 25), Some(WHITE));

    let plain = renderer.render_board(&board).expect("render");
    let away = renderer
        .render_board_with(
            &board,
            &Overlay::selection(Rectangle::new(Coordinate::new(5, 5), Coordinate::new(6, 6))),
        )
        .expect("render");
    assert_eq!(away.rgba(), plain.rgba());
}

#[test]
fn highlight_off_the_board_draws_nothing() {
    let board = Board::new(3, 3).expect("board");
    let mut renderer = renderer(3, 3, 10, false);
    let plain = renderer.render_board(&board).expect("render");
    let off = renderer
        .render_board_with(&board, &Overlay::highlight(Coordinate::new(7, 1)))
        .expect("render");
    assert_eq!(off.rgba(), plain.rgba());
}
