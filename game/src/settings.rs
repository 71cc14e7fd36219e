use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine::border::BorderStyle;
use engine::field::TextFieldRenderer;
use engine::raster::Color;
use engine::{BorderPartThickness, ImageBoardRenderer, RenderStyles, TextBoardRenderer};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const MIN_FIELD_SIZE: u32 = 4;
pub const MAX_FIELD_SIZE: u32 = 256;
pub const MAX_BORDER_THICKNESS: u32 = 16;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextSettings {
    pub alive_symbol: String,
    pub dead_symbol: String,
    pub highlighted_alive_symbol: String,
    pub highlighted_dead_symbol: String,
    pub background_grid: bool,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            alive_symbol: "☻".to_string(),
            dead_symbol: " ".to_string(),
            highlighted_alive_symbol: "x".to_string(),
            highlighted_dead_symbol: " ".to_string(),
            background_grid: false,
        }
    }
}

fn first_char_or(symbol: &str, fallback: &str) -> String {
    symbol
        .chars()
        .next()
        .or_else(|| fallback.chars().next())
        .map(String::from)
        .unwrap_or_default()
}

fn symbol(s: &str) -> char {
    s.chars().next().unwrap_or(' ')
}

impl TextSettings {
    /// Keeps one glyph per symbol; empty symbols fall back to the defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.alive_symbol = first_char_or(&self.alive_symbol, &defaults.alive_symbol);
        self.dead_symbol = first_char_or(&self.dead_symbol, &defaults.dead_symbol);
        self.highlighted_alive_symbol =
            first_char_or(&self.highlighted_alive_symbol, &defaults.highlighted_alive_symbol);
        self.highlighted_dead_symbol =
            first_char_or(&self.highlighted_dead_symbol, &defaults.highlighted_dead_symbol);
        self
    }

    pub fn field_renderer(&self) -> TextFieldRenderer {
        TextFieldRenderer::new(symbol(&self.alive_symbol), symbol(&self.dead_symbol)).with_highlight(
            symbol(&self.highlighted_alive_symbol),
            symbol(&self.highlighted_dead_symbol),
        )
    }

    pub fn styles(&self) -> RenderStyles {
        RenderStyles {
            background_grid: self.background_grid.then(BorderStyle::background_grid),
            ..RenderStyles::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageSettings {
    pub field_size: u32,
    pub border_thickness: u32,
    pub background_color: Color,
    pub foreground_color: Color,
    pub grid_color: Color,
    pub background_grid: bool,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            field_size: 100,
            border_thickness: 1,
            background_color: [0, 0, 0, 255],
            foreground_color: [255, 255, 0, 255],
            grid_color: [255, 255, 255, 255],
            background_grid: true,
        }
    }
}

impl ImageSettings {
    pub fn sanitized(mut self) -> Self {
        self.field_size = self.field_size.clamp(MIN_FIELD_SIZE, MAX_FIELD_SIZE);
        self.border_thickness = self.border_thickness.clamp(1, MAX_BORDER_THICKNESS);
        for color in [
            &mut self.background_color,
            &mut self.foreground_color,
            &mut self.grid_color,
        ] {
            color[3] = 255;
        }
        self
    }

    pub fn styles(&self) -> RenderStyles {
        let thickness = BorderPartThickness::new(self.border_thickness, self.border_thickness)
            .unwrap_or_default();
        RenderStyles {
            frame: BorderStyle::outer_frame()
                .with_color(self.grid_color)
                .with_thickness(thickness),
            background_grid: self
                .background_grid
                .then(|| BorderStyle::background_grid().with_color(self.grid_color)),
            ..RenderStyles::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub text: TextSettings,
    #[serde(default)]
    pub image: ImageSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            text: TextSettings::default(),
            image: ImageSettings::default(),
        }
    }
}

impl RenderSettings {
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.text = self.text.sanitized();
        self.image = self.image.sanitized();
        self
    }

    pub fn text_renderer(&self, width: u32, height: u32) -> engine::Result<TextBoardRenderer> {
        TextBoardRenderer::text(width, height, self.text.styles(), self.text.field_renderer())
    }

    pub fn image_renderer(&self, width: u32, height: u32) -> engine::Result<ImageBoardRenderer> {
        ImageBoardRenderer::image(
            width,
            height,
            self.image.field_size,
            self.image.styles(),
            self.image.background_color,
            self.image.foreground_color,
        )
    }
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("LIFEGRID_SETTINGS_PATH") {
            return Self {
                path: PathBuf::from(explicit),
            };
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("lifegrid");
        path.push("settings.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> RenderSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            return RenderSettings::default();
        };
        match serde_json::from_slice::<RenderSettings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable settings");
                RenderSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &RenderSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
