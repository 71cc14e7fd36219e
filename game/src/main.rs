//! lifegrid CLI: runs Conway's Game of Life and prints the board as box-drawing text or writes
//! it as a PNG.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use engine::{Board, Coordinate, Generations, Overlay, Rectangle, SimulationRunner};
use game::patterns::{Pattern, random_board};
use game::rules::Conway;
use game::settings::SettingsStore;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "lifegrid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file; defaults to $XDG_CONFIG_HOME/lifegrid/settings.json
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every generation as box-drawing text
    Text {
        #[command(flatten)]
        board: BoardArgs,

        /// Draw a line between every pair of cells
        #[arg(long)]
        grid: bool,
    },

    /// Write the last generation as a PNG
    Image {
        #[command(flatten)]
        board: BoardArgs,

        /// Output file
        #[arg(short, long, default_value = "lifegrid.png")]
        out: PathBuf,

        /// Pixels per cell
        #[arg(long)]
        field_size: Option<u32>,
    },

    /// Print one generation of a history saved with --history
    Replay {
        /// History JSON file
        history: PathBuf,

        /// Generation to start from; defaults to the one the history was saved at
        #[arg(long)]
        frame: Option<usize>,

        /// Step this many generations back
        #[arg(long, default_value = "0")]
        back: usize,

        /// Then this many generations forward
        #[arg(long, default_value = "0")]
        ahead: usize,

        /// Highlight one cell, as X,Y
        #[arg(long, value_parser = parse_coordinate)]
        highlight: Option<Coordinate>,
    },

    /// List the built-in seed patterns
    Patterns,

    /// Write the effective settings to the settings file
    InitSettings,
}

#[derive(Args)]
struct BoardArgs {
    #[arg(short = 'W', long, default_value = "10")]
    width: u32,

    #[arg(short = 'H', long, default_value = "10")]
    height: u32,

    /// Seed pattern, centred on the board
    #[arg(short, long, conflicts_with = "random")]
    pattern: Option<String>,

    /// Seed the board randomly from this number
    #[arg(long)]
    random: Option<u64>,

    /// Generations to run
    #[arg(short, long, default_value = "0")]
    generations: usize,

    /// Neighbours wrap around the board edges
    #[arg(long)]
    wrap: bool,

    /// Highlight one cell, as X,Y
    #[arg(long, value_parser = parse_coordinate)]
    highlight: Option<Coordinate>,

    /// Outline an area, as X1,Y1,X2,Y2
    #[arg(long, value_parser = parse_rectangle)]
    select: Option<Rectangle>,

    /// Save the generation history as JSON
    #[arg(long)]
    history: Option<PathBuf>,
}

impl BoardArgs {
    fn seed(&self) -> anyhow::Result<Board> {
        if let Some(seed) = self.random {
            return Ok(random_board(self.width, self.height, seed)?);
        }
        let mut board = Board::new(self.width, self.height)?;
        if let Some(name) = &self.pattern {
            let Some(pattern) = Pattern::find(name) else {
                bail!(
                    "unknown pattern {name:?}; try one of: {}",
                    Pattern::names().collect::<Vec<_>>().join(", ")
                );
            };
            let placed = pattern.place_centered(&mut board);
            debug!(pattern = pattern.name, placed, "seeded board");
        }
        Ok(board)
    }

    fn overlay(&self) -> Overlay {
        Overlay {
            highlight: self.highlight,
            selection: self.select,
        }
    }

    fn run(&self) -> anyhow::Result<SimulationRunner<Conway>> {
        let mut rules = Conway::new(self.seed()?);
        if self.wrap {
            rules = rules.wrapping();
        }
        let mut runner = SimulationRunner::new(rules);
        runner.run(self.generations);
        if let Some(path) = &self.history {
            runner
                .generations()
                .save_json_file(path)
                .with_context(|| format!("writing history to {}", path.display()))?;
        }
        Ok(runner)
    }
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[i32; N], String> {
    let parts: Vec<i32> = s
        .split(',')
        .map(|p| p.trim().parse::<i32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<_, _>>()?;
    parts
        .try_into()
        .map_err(|parts: Vec<i32>| format!("expected {N} numbers, got {}", parts.len()))
}

fn parse_coordinate(s: &str) -> Result<Coordinate, String> {
    let [x, y] = parse_numbers::<2>(s)?;
    Ok(Coordinate::new(x, y))
}

fn parse_rectangle(s: &str) -> Result<Rectangle, String> {
    let [x1, y1, x2, y2] = parse_numbers::<4>(s)?;
    Ok(Rectangle::new(Coordinate::new(x1, y1), Coordinate::new(x2, y2)))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing logger")?;

    let store = cli
        .settings
        .clone()
        .map(SettingsStore::new)
        .unwrap_or_else(SettingsStore::from_env);
    let mut settings = store.load();
    debug!(path = %store.path().display(), "loaded settings");

    match cli.command {
        Commands::Text { board, grid } => {
            settings.text.background_grid |= grid;
            let runner = board.run()?;
            let overlay = board.overlay();
            let mut renderer = settings.text_renderer(board.width, board.height)?;
            for (generation, state) in runner.history().iter().enumerate() {
                if generation > 0 {
                    println!();
                }
                println!("generation {generation} ({} alive)", state.alive_count());
                println!("{}", renderer.render_board_with(state, &overlay)?);
            }
        }

        Commands::Image {
            board,
            out,
            field_size,
        } => {
            if let Some(size) = field_size {
                settings.image.field_size = size;
                settings = settings.sanitized();
            }
            let runner = board.run()?;
            let mut renderer = settings.image_renderer(board.width, board.height)?;
            let raster = renderer.render_board_with(runner.state(), &board.overlay())?;
            let file =
                File::create(&out).with_context(|| format!("creating {}", out.display()))?;
            raster
                .encode_png(BufWriter::new(file))
                .with_context(|| format!("encoding {}", out.display()))?;
            info!(
                path = %out.display(),
                width = raster.width(),
                height = raster.height(),
                generation = runner.frame(),
                "wrote image"
            );
        }

        Commands::Replay {
            history,
            frame,
            back,
            ahead,
            highlight,
        } => {
            let mut generations = Generations::<Board>::load_json_file(&history)
                .with_context(|| format!("reading {}", history.display()))?;
            if let Some(frame) = frame {
                generations.seek(frame);
            }
            generations.rewind(back);
            let shown = generations.forward(ahead);
            let board = generations.state();
            let mut renderer = settings.text_renderer(board.width(), board.height())?;
            let overlay = Overlay {
                highlight,
                selection: None,
            };
            println!(
                "generation {shown} of {} ({} alive)",
                generations.len().saturating_sub(1),
                board.alive_count()
            );
            println!("{}", renderer.render_board_with(board, &overlay)?);
        }

        Commands::Patterns => {
            for pattern in game::patterns::PATTERNS {
                println!("{:<12} {}x{}", pattern.name, pattern.width(), pattern.height());
            }
        }

        Commands::InitSettings => {
            store
                .save(&settings)
                .with_context(|| format!("writing {}", store.path().display()))?;
            info!(path = %store.path().display(), "saved settings");
        }
    }

    Ok(())
}
