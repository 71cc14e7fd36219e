//! Per-cell content, independent of borders.

use std::rc::Rc;

use crate::board::Board;
use crate::geometry::Coordinate;
use crate::raster::{Color, Raster, unused_color};

pub trait BoardFieldRenderer {
    type Field;

    fn render_field(&self, alive: bool, highlighted: bool) -> Self::Field;

    /// Rendered fields row by row, `[y][x]`.
    fn rendered_board_fields(
        &self,
        board: &Board,
        highlight: Option<Coordinate>,
    ) -> Vec<Vec<Self::Field>> {
        board
            .fields()
            .into_iter()
            .enumerate()
            .map(|(y, row)| {
                row.into_iter()
                    .enumerate()
                    .map(|(x, alive)| {
                        let here = Coordinate::new(x as i32, y as i32);
                        self.render_field(alive, highlight == Some(here))
                    })
                    .collect()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFieldRenderer {
    pub alive: char,
    pub dead: char,
    pub highlighted_alive: char,
    pub highlighted_dead: char,
}

impl TextFieldRenderer {
    pub fn new(alive: char, dead: char) -> Self {
        Self {
            alive,
            dead,
            highlighted_alive: alive,
            highlighted_dead: dead,
        }
    }

    pub fn with_highlight(mut self, alive: char, dead: char) -> Self {
        self.highlighted_alive = alive;
        self.highlighted_dead = dead;
        self
    }
}

impl Default for TextFieldRenderer {
    fn default() -> Self {
        Self::new('☻', ' ')
    }
}

impl BoardFieldRenderer for TextFieldRenderer {
    type Field = char;

    fn render_field(&self, alive: bool, highlighted: bool) -> char {
        match (alive, highlighted) {
            (true, false) => self.alive,
            (false, false) => self.dead,
            (true, true) => self.highlighted_alive,
            (false, true) => self.highlighted_dead,
        }
    }
}

/// Draws alive cells as a smiley sprite; dead cells stay empty.
#[derive(Debug, Clone)]
pub struct SmileyFieldRenderer {
    sprite: Rc<Raster>,
}

impl SmileyFieldRenderer {
    /// A sprite four fifths of `field_size` wide, in `color`.
    pub fn new(field_size: u32, color: Color) -> Self {
        let head = (field_size * 4 / 5).max(1);
        Self {
            sprite: Rc::new(smiley_sprite(head, head, color)),
        }
    }

    pub fn sprite(&self) -> &Raster {
        &self.sprite
    }
}

impl BoardFieldRenderer for SmileyFieldRenderer {
    type Field = Option<Rc<Raster>>;

    fn render_field(&self, alive: bool, _highlighted: bool) -> Self::Field {
        alive.then(|| Rc::clone(&self.sprite))
    }
}

/// Filled head with eyes and mouth cut out as transparent pixels.
pub fn smiley_sprite(width: u32, height: u32, color: Color) -> Raster {
    let key = unused_color(&[color]);
    let mut sprite = Raster::filled(width, height, key);
    let (w, h) = (width as f32, height as f32);

    sprite.fill_ellipse(w * 0.5, h * 0.5, w - 1.0, h - 1.0, color);
    sprite.fill_ellipse(w * 0.25, h * 3.0 / 8.0, w * 0.2, h * 0.2, key);
    sprite.fill_ellipse(w * 0.75, h * 3.0 / 8.0, w * 0.2, h * 0.2, key);
    let stroke = (w / 16.0).max(1.0);
    sprite.stroke_lower_arc(w * 0.5, h * 5.0 / 8.0, w * 0.6, h * 0.5, stroke, key);

    sprite.mark_transparent(key);
    sprite
}
