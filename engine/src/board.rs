use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};
use crate::geometry::{Coordinate, Rectangle};

/// A rectangular field of alive/dead cells. Renderers only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Board {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidGeometry(format!(
                "board size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        })
    }

    pub fn with_alive<I>(width: u32, height: u32, alive: I) -> Result<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut board = Self::new(width, height)?;
        for c in alive {
            board.set(c, true)?;
        }
        Ok(board)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            Coordinate::new(0, 0),
            Coordinate::new(self.width as i32 - 1, self.height as i32 - 1),
        )
    }

    fn index(&self, c: Coordinate) -> Option<usize> {
        if c.x < 0 || c.y < 0 || c.x as u32 >= self.width || c.y as u32 >= self.height {
            return None;
        }
        Some(c.y as usize * self.width as usize + c.x as usize)
    }

    pub fn is_alive(&self, c: Coordinate) -> bool {
        self.index(c).is_some_and(|i| self.cells[i])
    }

    pub fn set(&mut self, c: Coordinate, alive: bool) -> Result<()> {
        let i = self.index(c).ok_or_else(|| {
            RenderError::InvalidGeometry(format!(
                "{c} lies outside a {}x{} board",
                self.width, self.height
            ))
        })?;
        self.cells[i] = alive;
        Ok(())
    }

    pub fn toggle(&mut self, c: Coordinate) -> Result<bool> {
        let alive = !self.is_alive(c);
        self.set(c, alive)?;
        Ok(alive)
    }

    /// Cell states row by row, `fields()[y][x]`.
    pub fn fields(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.width as usize)
            .map(<[bool]>::to_vec)
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Number of alive cells among the eight neighbours, wrapping at the edges when `wrap` is set.
    pub fn alive_neighbours(&self, c: Coordinate, wrap: bool) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let mut n = c.offset(dx, dy);
                if wrap {
                    n.x = n.x.rem_euclid(self.width as i32);
                    n.y = n.y.rem_euclid(self.height as i32);
                }
                if self.is_alive(n) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}
