use tracing::debug;

use crate::border::{BorderPart, LabelAnchor, PartId};
use crate::canvas::Canvas;
use crate::collision::CollisionView;
use crate::error::{RenderError, Result};
use crate::geometry::Coordinate;
use crate::grid::{BorderGrid, RenderedBorderPart};

/// Symbols on the doubled grid: border-line point `(x, y)` sits at `(2x, 2y)` and cell `(x, y)`
/// at `(2x + 1, 2y + 1)`.
#[derive(Debug, Clone)]
struct SymbolGrid {
    width: usize,
    height: usize,
    symbols: Vec<Option<char>>,
    rows: Vec<bool>,
    columns: Vec<bool>,
    column_labels: Vec<(i32, String)>,
    row_labels: Vec<(i32, String)>,
}

impl SymbolGrid {
    fn new(grid: &BorderGrid) -> Self {
        let width = grid.board_width() as usize * 2 + 1;
        let height = grid.board_height() as usize * 2 + 1;
        // Border rows and columns only take up space when a part lies on them.
        let rows = (0..height)
            .map(|gy| gy % 2 == 1 || grid.row_border_height((gy / 2) as i32) > 0)
            .collect();
        let columns = (0..width)
            .map(|gx| gx % 2 == 1 || grid.column_border_width((gx / 2) as i32) > 0)
            .collect();

        let mut column_labels = Vec::new();
        let mut row_labels = Vec::new();
        for label in grid.labels() {
            match label.anchor {
                LabelAnchor::AboveColumn(x) => column_labels.push((x, label.text.clone())),
                LabelAnchor::RightOfRow(y) => row_labels.push((y, label.text.clone())),
            }
        }

        Self {
            width,
            height,
            symbols: vec![None; width * height],
            rows,
            columns,
            column_labels,
            row_labels,
        }
    }

    fn set(&mut self, c: Coordinate, symbol: char) {
        if c.x < 0 || c.y < 0 || c.x as usize >= self.width || c.y as usize >= self.height {
            return;
        }
        self.symbols[c.y as usize * self.width + c.x as usize] = Some(symbol);
    }

    fn get(&self, gx: usize, gy: usize) -> Option<char> {
        self.symbols.get(gy * self.width + gx).copied().flatten()
    }

    /// Output column of doubled-grid column `gx`.
    fn output_column(&self, gx: usize) -> usize {
        self.columns[..gx.min(self.width)].iter().filter(|&&c| c).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextCanvas {
    border: Option<SymbolGrid>,
    fields: Vec<Vec<char>>,
}

impl TextCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

fn doubled(c: Coordinate) -> Coordinate {
    Coordinate::new(c.x * 2, c.y * 2)
}

/// The symbol `part` shows at border-line point `p`.
fn symbol_at(grid: &BorderGrid, part: &BorderPart, collisions: &[CollisionView<'_>], p: Coordinate) -> char {
    let mut symbol = None;
    for view in collisions.iter().filter(|v| v.positions.contains(&p)) {
        let Some(other) = grid.part(view.other) else {
            continue;
        };
        let (dominating, inferior) = if view.is_outer {
            (other, part)
        } else {
            (part, other)
        };
        let position = dominating.position_of(p);
        let directions = inferior.directions_at(p);
        match dominating.symbols().collision_symbol(position, directions) {
            Some(found) => symbol = Some(found),
            None => {
                let err = RenderError::MissingSymbolDefinition {
                    directions: directions.to_string(),
                    position: position.name(),
                };
                debug!(at = %p, error = %err, "using plain symbol");
            }
        }
    }
    symbol.unwrap_or_else(|| part.symbols().symbol_at(part.position_of(p)))
}

impl Canvas for TextCanvas {
    type Raw = Vec<char>;
    type Field = char;
    type Output = String;

    fn has_cached_border_grid(&self) -> bool {
        self.border.is_some()
    }

    fn render_border_part(&self, grid: &BorderGrid, id: PartId) -> RenderedBorderPart<Vec<char>> {
        let Some(part) = grid.part(id) else {
            return RenderedBorderPart {
                part: id,
                positions: Vec::new(),
                raw: Vec::new(),
            };
        };
        let collisions = grid.collisions().involving(id);
        let points = grid.part_positions(id);

        let mut positions = Vec::with_capacity(points.len() * 2);
        let mut raw = Vec::with_capacity(points.len() * 2);
        for (i, &p) in points.iter().enumerate() {
            positions.push(doubled(p));
            raw.push(symbol_at(grid, part, &collisions, p));

            if let Some(&next) = points.get(i + 1) {
                let step = Coordinate::new((next.x - p.x).signum(), (next.y - p.y).signum());
                positions.push(doubled(p).offset(step.x, step.y));
                raw.push(part.symbols().center);
            }
        }

        RenderedBorderPart {
            part: id,
            positions,
            raw,
        }
    }

    fn set_border_grid(
        &mut self,
        grid: &BorderGrid,
        parts: Vec<RenderedBorderPart<Vec<char>>>,
    ) -> Result<()> {
        let mut symbols = SymbolGrid::new(grid);
        for rendered in parts {
            for (c, symbol) in rendered.positions.into_iter().zip(rendered.raw) {
                symbols.set(c, symbol);
            }
        }
        self.border = Some(symbols);
        Ok(())
    }

    fn set_rendered_board_fields(&mut self, fields: Vec<Vec<char>>) {
        self.fields = fields;
    }

    /// Text cells are always one character wide, so `field_size` is not used.
    fn render(&self, _field_size: u32) -> Result<String> {
        let grid = self.border.as_ref().ok_or(RenderError::MissingBorderGrid)?;
        let mut lines = Vec::with_capacity(grid.height + 1);

        if !grid.column_labels.is_empty() {
            let mut label_line: Vec<char> = Vec::new();
            for (x, text) in &grid.column_labels {
                let start = grid.output_column((*x * 2 + 1).max(0) as usize);
                for (offset, ch) in text.chars().enumerate() {
                    let at = start + offset;
                    if label_line.len() <= at {
                        label_line.resize(at + 1, ' ');
                    }
                    label_line[at] = ch;
                }
            }
            lines.push(label_line.into_iter().collect::<String>().trim_end().to_string());
        }

        for gy in (0..grid.height).filter(|&gy| grid.rows[gy]) {
            let mut line = String::new();
            for gx in (0..grid.width).filter(|&gx| grid.columns[gx]) {
                let ch = if gx % 2 == 1 && gy % 2 == 1 {
                    self.fields
                        .get(gy / 2)
                        .and_then(|row| row.get(gx / 2))
                        .copied()
                        .unwrap_or(' ')
                } else {
                    grid.get(gx, gy).unwrap_or(' ')
                };
                line.push(ch);
            }
            if gy % 2 == 1 {
                for (_, text) in grid.row_labels.iter().filter(|(y, _)| (*y * 2 + 1) as usize == gy) {
                    line.push(' ');
                    line.push_str(text);
                }
            }
            lines.push(line);
        }

        Ok(lines.join("\n"))
    }

    fn invalidate_border_grid(&mut self) {
        self.border = None;
    }
}
