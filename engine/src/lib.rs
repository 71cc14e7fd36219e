pub mod board;
pub mod border;
pub mod canvas;
pub mod collision;
pub mod error;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod raster;
pub mod regression;
pub mod renderer;

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub use board::Board;
pub use error::{RenderError, Result};
pub use geometry::{BorderPartThickness, Coordinate, Rectangle};
pub use renderer::{BoardRenderer, ImageBoardRenderer, Overlay, RenderStyles, TextBoardRenderer};

/// Every recorded state of a simulation plus a cursor into it.
///
/// Recording while rewound drops the states after the cursor, so the history always reads as
/// a single line of generations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generations<State> {
    states: Vec<State>,
    frame: usize,
}

impl<State> Generations<State> {
    pub fn new(initial_state: State) -> Self {
        Self {
            states: vec![initial_state],
            frame: 0,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self) -> &State {
        &self.states[self.frame]
    }

    pub fn state_at(&self, frame: usize) -> Option<&State> {
        self.states.get(frame)
    }

    pub fn history(&self) -> &[State] {
        &self.states
    }

    pub fn can_rewind(&self) -> bool {
        self.frame > 0
    }

    pub fn can_forward(&self) -> bool {
        self.frame + 1 < self.states.len()
    }

    pub fn rewind(&mut self, frames: usize) -> usize {
        self.frame = self.frame.saturating_sub(frames);
        self.frame
    }

    pub fn forward(&mut self, frames: usize) -> usize {
        let max_frame = self.states.len().saturating_sub(1);
        self.frame = (self.frame + frames).min(max_frame);
        self.frame
    }

    pub fn seek(&mut self, frame: usize) -> usize {
        self.frame = frame.min(self.states.len().saturating_sub(1));
        self.frame
    }

    pub fn record(&mut self, state: State) -> usize {
        if self.frame + 1 < self.states.len() {
            self.states.truncate(self.frame + 1);
        }
        self.states.push(state);
        self.frame += 1;
        self.frame
    }
}

impl<State: Serialize + DeserializeOwned> Generations<State> {
    pub fn save_json_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = fs::File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(io::Error::other)?;
        writer.flush()
    }

    pub fn load_json_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let loaded: Self = serde_json::from_reader(io::BufReader::new(file)).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("failed parsing generations json {}: {e}", path.display()),
            )
        })?;
        if loaded.frame >= loaded.states.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "generations json {} points at frame {} of {}",
                    path.display(),
                    loaded.frame,
                    loaded.states.len()
                ),
            ));
        }
        Ok(loaded)
    }
}

pub trait Simulation {
    type State;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State) -> Self::State;
}

#[derive(Debug)]
pub struct SimulationRunner<S: Simulation> {
    simulation: S,
    generations: Generations<S::State>,
}

impl<S: Simulation> SimulationRunner<S> {
    pub fn new(simulation: S) -> Self {
        let initial_state = simulation.initial_state();
        Self {
            simulation,
            generations: Generations::new(initial_state),
        }
    }

    pub fn from_generations(simulation: S, generations: Generations<S::State>) -> Self {
        Self {
            simulation,
            generations,
        }
    }

    pub fn frame(&self) -> usize {
        self.generations.frame()
    }

    pub fn state(&self) -> &S::State {
        self.generations.state()
    }

    pub fn history(&self) -> &[S::State] {
        self.generations.history()
    }

    pub fn generations(&self) -> &Generations<S::State> {
        &self.generations
    }

    pub fn step(&mut self) -> usize {
        let next_state = self.simulation.step(self.generations.state());
        self.generations.record(next_state)
    }

    pub fn run(&mut self, steps: usize) -> usize {
        let mut last_frame = self.frame();
        for _ in 0..steps {
            last_frame = self.step();
        }
        last_frame
    }

    pub fn rewind(&mut self, frames: usize) -> usize {
        self.generations.rewind(frames)
    }

    pub fn forward(&mut self, frames: usize) -> usize {
        self.generations.forward(frames)
    }

    pub fn seek(&mut self, frame: usize) -> usize {
        self.generations.seek(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubling;

    impl Simulation for Doubling {
        type State = u64;

        fn initial_state(&self) -> Self::State {
            1
        }

        fn step(&self, state: &Self::State) -> Self::State {
            state * 2
        }
    }

    #[test]
    fn generations_rewind_and_branch() {
        let mut history = Generations::new(0);
        history.record(1);
        history.record(2);
        assert_eq!(history.state(), &2);

        history.rewind(1);
        assert_eq!(history.state(), &1);

        history.record(99);
        assert_eq!(history.history(), &[0, 1, 99]);
        assert_eq!(history.frame(), 2);
    }

    #[test]
    fn runner_steps_and_seeks() {
        let mut runner = SimulationRunner::new(Doubling);
        runner.run(3);
        assert_eq!(runner.frame(), 3);
        assert_eq!(runner.state(), &8);

        runner.rewind(2);
        assert_eq!(runner.state(), &2);
        assert!(runner.generations().can_forward());

        runner.forward(10);
        assert_eq!(runner.state(), &8);
        assert_eq!(runner.seek(0), 0);
        assert_eq!(runner.state(), &1);
    }

    #[test]
    fn generations_json_roundtrip() {
        let path = std::env::temp_dir().join(format!("lifegrid-gens-{}.json", std::process::id()));
        let mut runner = SimulationRunner::new(Doubling);
        runner.run(4);
        runner.rewind(1);
        runner.generations().save_json_file(&path).expect("save");

        let loaded = Generations::<u64>::load_json_file(&path).expect("load");
        assert_eq!(loaded.history(), &[1, 2, 4, 8, 16]);
        assert_eq!(loaded.frame(), 3);

        let resumed = SimulationRunner::from_generations(Doubling, loaded);
        assert_eq!(resumed.state(), &8);
        let _ = fs::remove_file(&path);
    }
}
