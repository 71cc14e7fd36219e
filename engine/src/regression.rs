//! Golden-hash regression helpers.
//!
//! Rendered output (text bytes or raster RGBA) is hashed with SHA-256 and compared against a
//! JSON golden file under `tests/goldens/`. Missing goldens are written on first run; set
//! `LIFEGRID_UPDATE_GOLDENS=1` to rewrite existing ones.

use std::{
    fs,
    io,
    path::Path,
};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Simulation, SimulationRunner};

/// Environment flag helper: accepts `1/true/yes/on` (case-insensitive).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// If set, regression tests may update golden files in-place.
pub fn update_goldens_enabled() -> bool {
    env_flag("LIFEGRID_UPDATE_GOLDENS")
}

pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[macro_export]
macro_rules! regression_golden_path {
    ($name:expr) => {{
        let base = $crate::regression::sanitize_filename($name);
        ::std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("goldens")
            .join(format!("{base}.json"))
    }};
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderHashGolden {
    pub version: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub hash_alg: String,
    /// One hash per rendered generation.
    pub hashes: Vec<String>,
}

impl RenderHashGolden {
    pub fn new(name: impl Into<String>, width: u32, height: u32, hashes: Vec<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            width,
            height,
            hash_alg: "sha256".to_string(),
            hashes,
        }
    }
}

pub fn load_golden_json(path: impl AsRef<Path>) -> io::Result<RenderHashGolden> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: not a render golden: {e}", path.display()),
        )
    })
}

pub fn save_golden_json(path: impl AsRef<Path>, golden: &RenderHashGolden) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut text = serde_json::to_string_pretty(golden).map_err(io::Error::other)?;
    text.push('\n');
    fs::write(path, text)
}

/// Where `actual` first departs from `expected`, if anywhere.
fn golden_difference(expected: &RenderHashGolden, actual: &RenderHashGolden) -> Option<String> {
    let shape = |g: &RenderHashGolden| {
        let (w, h, n) = (g.width, g.height, g.hashes.len());
        format!("v{} {} {w}x{h}, {n} generations", g.version, g.hash_alg)
    };
    if shape(expected) != shape(actual) {
        return Some(format!("expected {}, rendered {}", shape(expected), shape(actual)));
    }
    expected
        .hashes
        .iter()
        .zip(&actual.hashes)
        .position(|(a, b)| a != b)
        .map(|generation| {
            format!(
                "generation {generation} hashes to {} instead of {}",
                actual.hashes[generation], expected.hashes[generation]
            )
        })
}

/// Compares `golden` with the file at `path`, writing it when the file is missing or
/// `update` is set.
pub fn assert_or_update_golden_json(
    path: impl AsRef<Path>,
    golden: &RenderHashGolden,
    update: bool,
) -> io::Result<()> {
    let path = path.as_ref();
    if update || !path.exists() {
        save_golden_json(path, golden)?;
        eprintln!("wrote golden {}", path.display());
        return Ok(());
    }

    match golden_difference(&load_golden_json(path)?, golden) {
        None => Ok(()),
        Some(diff) => Err(io::Error::other(format!(
            "{}: {diff} (set LIFEGRID_UPDATE_GOLDENS=1 to accept)",
            path.display()
        ))),
    }
}

/// Runs `simulation` for `generations` steps and hashes the bytes `render` produces for the
/// initial state and every recorded generation.
pub fn generation_hashes<S, Render, E>(
    simulation: S,
    generations: usize,
    mut render: Render,
) -> Result<Vec<String>, E>
where
    S: Simulation,
    Render: FnMut(&S::State) -> Result<Vec<u8>, E>,
{
    let mut runner = SimulationRunner::new(simulation);
    runner.run(generations);
    runner
        .history()
        .iter()
        .map(|state| render(state).map(|bytes| sha256_hex(&bytes)))
        .collect()
}
