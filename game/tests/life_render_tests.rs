use std::io::Cursor;

use engine::{Board, Coordinate, Generations, Overlay, SimulationRunner};
use game::patterns::Pattern;
use game::rules::Conway;
use game::settings::{ImageSettings, RenderSettings, SettingsStore, TextSettings};

fn seeded(name: &str, width: u32, height: u32) -> Board {
    let mut board = Board::new(width, height).expect("board");
    Pattern::find(name).expect("pattern").place_centered(&mut board);
    board
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("lifegrid-{name}-{}", std::process::id()))
}

#[test]
fn blinker_text_alternates() {
    let settings = RenderSettings {
        text: TextSettings {
            alive_symbol: "#".to_string(),
            dead_symbol: ".".to_string(),
            ..TextSettings::default()
        },
        ..RenderSettings::default()
    };
    let mut runner = SimulationRunner::new(Conway::new(seeded("blinker", 3, 3)));
    runner.run(2);
    let mut renderer = settings.text_renderer(3, 3).expect("renderer");
    let frames: Vec<String> = runner
        .history()
        .iter()
        .map(|board| renderer.render_board(board).expect("render"))
        .collect();

    assert_eq!(frames[0], "╔═══╗\n║...║\n║###║\n║...║\n╚═══╝");
    assert_eq!(frames[1], "╔═══╗\n║.#.║\n║.#.║\n║.#.║\n╚═══╝");
    assert_eq!(frames[2], frames[0]);
    assert_eq!(renderer.border_grid_builds(), 1);
}

#[test]
fn highlight_marks_the_live_cell() {
    let board = seeded("block", 4, 4);
    let mut renderer = RenderSettings::default().text_renderer(4, 4).expect("renderer");
    let text = renderer
        .render_board_with(&board, &Overlay::highlight(Coordinate::new(1, 1)))
        .expect("render");
    assert!(text.contains('x'), "{text}");
    assert_eq!(text.matches('☻').count(), 3);
}

#[test]
fn image_renders_to_a_decodable_png() {
    let settings = RenderSettings {
        image: ImageSettings {
            field_size: 16,
            ..ImageSettings::default()
        },
        ..RenderSettings::default()
    };
    let board = seeded("glider", 5, 5);
    let mut renderer = settings.image_renderer(5, 5).expect("renderer");
    let image = renderer.render_board(&board).expect("render");
    // Five columns of 16 pixels, the frame on both sides and four grid lines between.
    assert_eq!((image.width(), image.height()), (86, 86));

    let bytes = image.to_png_bytes().expect("png");
    let reader = png::Decoder::new(Cursor::new(bytes))
        .read_info()
        .expect("png header");
    assert_eq!((reader.info().width, reader.info().height), (86, 86));
}

#[test]
fn history_round_trips_through_json() {
    let path = temp_path("history.json");
    let mut runner = SimulationRunner::new(Conway::new(seeded("toad", 6, 6)));
    runner.run(3);
    runner.generations().save_json_file(&path).expect("save");

    let mut loaded = Generations::<Board>::load_json_file(&path).expect("load");
    assert_eq!(loaded.len(), 4);
    assert_eq!(loaded.state(), runner.state());

    // Toad has period two, so stepping back two generations shows the same board.
    assert_eq!(loaded.rewind(2), 1);
    assert_eq!(loaded.state(), runner.state());
    assert_eq!(loaded.seek(0), 0);
    assert_eq!(loaded.forward(10), 3);
    assert_eq!(loaded.state_at(2), runner.history().get(2));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn settings_store_saves_and_loads() {
    let path = temp_path("settings.json");
    let store = SettingsStore::new(&path);
    assert_eq!(store.load(), RenderSettings::default());

    let mut settings = RenderSettings::default();
    settings.image.field_size = 32;
    settings.text.background_grid = true;
    store.save(&settings).expect("save");
    assert_eq!(store.load(), settings);

    std::fs::write(&path, "{ not json").expect("write");
    assert_eq!(store.load(), RenderSettings::default());
    let _ = std::fs::remove_file(&path);
}
