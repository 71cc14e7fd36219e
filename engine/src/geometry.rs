//! Geometry primitives shared by the board, the border tree and both canvases.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn set_x(&mut self, x: i32) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.y = y;
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle of board cells, stored with normalized corners.
///
/// Both corners are inclusive: `Rectangle::new((0, 0), (2, 1))` covers 3x2 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    top_left: Coordinate,
    bottom_right: Coordinate,
}

impl Rectangle {
    /// Builds a rectangle from any two opposite corners.
    pub fn new(a: Coordinate, b: Coordinate) -> Self {
        Self {
            top_left: Coordinate::new(a.x.min(b.x), a.y.min(b.y)),
            bottom_right: Coordinate::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Like [`Rectangle::new`], for callers that may not have both corners yet
    /// (e.g. a selection where only the first corner has been picked).
    pub fn from_corners(a: Option<Coordinate>, b: Option<Coordinate>) -> Result<Self> {
        match (a, b) {
            (Some(a), Some(b)) => Ok(Self::new(a, b)),
            _ => Err(RenderError::InvalidGeometry(
                "rectangle needs two corner coordinates".to_string(),
            )),
        }
    }

    /// Rectangle covering a whole `width` x `height` board.
    pub fn from_size(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidGeometry(format!(
                "board size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self::new(
            Coordinate::new(0, 0),
            Coordinate::new(width as i32 - 1, height as i32 - 1),
        ))
    }

    pub fn top_left(&self) -> Coordinate {
        self.top_left
    }

    pub fn bottom_right(&self) -> Coordinate {
        self.bottom_right
    }

    pub fn width(&self) -> u32 {
        (self.bottom_right.x - self.top_left.x + 1) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom_right.y - self.top_left.y + 1) as u32
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        c.x >= self.top_left.x
            && c.x <= self.bottom_right.x
            && c.y >= self.top_left.y
            && c.y <= self.bottom_right.y
    }

    pub fn contains_rectangle(&self, other: &Rectangle) -> bool {
        self.contains(other.top_left) && self.contains(other.bottom_right)
    }

    /// Cells covered by both rectangles, if any.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let tl = Coordinate::new(
            self.top_left.x.max(other.top_left.x),
            self.top_left.y.max(other.top_left.y),
        );
        let br = Coordinate::new(
            self.bottom_right.x.min(other.bottom_right.x),
            self.bottom_right.y.min(other.bottom_right.y),
        );
        (tl.x <= br.x && tl.y <= br.y).then(|| Rectangle::new(tl, br))
    }
}

/// Width x height of a border part in output units (pixels for the image canvas, always
/// 1x1 for text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderPartThickness {
    width: u32,
    height: u32,
}

impl BorderPartThickness {
    pub const UNIT: Self = Self {
        width: 1,
        height: 1,
    };

    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidGeometry(format!(
                "border part thickness must be at least 1x1, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width.max(1);
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height.max(1);
    }
}

impl Default for BorderPartThickness {
    fn default() -> Self {
        Self::UNIT
    }
}
