//! The shapes a border can take and the straight parts each one decomposes into.

use tracing::warn;

use crate::border::part::{BorderPart, ShapeKind};
use crate::border::style::Side;
use crate::border::{BorderId, BorderTree};
use crate::error::{RenderError, Result};
use crate::geometry::{Coordinate, Rectangle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderShape {
    /// A box around the cells of a rectangle.
    Rectangle(Rectangle),
    /// Lines between every pair of adjacent cells of the parent rectangle.
    BackgroundGrid,
    /// Crosshair lines through one cell, spanning the parent rectangle.
    HighlightField(Coordinate),
    Null,
}

/// Text shown next to the board rather than painted as a border part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderLabel {
    pub text: String,
    pub anchor: LabelAnchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// Above the board, over the given cell column.
    AboveColumn(i32),
    /// Right of the board, next to the given cell row.
    RightOfRow(i32),
}

impl BorderShape {
    pub fn name(&self) -> &'static str {
        match self {
            BorderShape::Rectangle(_) => "rectangle",
            BorderShape::BackgroundGrid => "background grid",
            BorderShape::HighlightField(_) => "highlight field",
            BorderShape::Null => "null",
        }
    }

    fn rectangle(&self) -> Option<&Rectangle> {
        match self {
            BorderShape::Rectangle(rect) => Some(rect),
            _ => None,
        }
    }

    fn covers_row_line(&self, y: i32) -> Option<&Rectangle> {
        self.rectangle()
            .filter(|r| y >= r.top_left().y && y <= r.bottom_right().y + 1)
    }

    fn covers_column_line(&self, x: i32) -> Option<&Rectangle> {
        self.rectangle()
            .filter(|r| x >= r.top_left().x && x <= r.bottom_right().x + 1)
    }

    /// First vertical line crossed by horizontal line `y`.
    pub fn start_x(&self, y: i32) -> Option<i32> {
        self.covers_row_line(y).map(|r| r.top_left().x)
    }

    /// Last vertical line crossed by horizontal line `y`.
    pub fn end_x(&self, y: i32) -> Option<i32> {
        self.covers_row_line(y).map(|r| r.bottom_right().x + 1)
    }

    pub fn start_y(&self, x: i32) -> Option<i32> {
        self.covers_column_line(x).map(|r| r.top_left().y)
    }

    pub fn end_y(&self, x: i32) -> Option<i32> {
        self.covers_column_line(x).map(|r| r.bottom_right().y + 1)
    }

    /// Cell rows the shape covers.
    pub fn row_ids(&self) -> Vec<i32> {
        self.rectangle()
            .map(|r| (r.top_left().y..=r.bottom_right().y).collect())
            .unwrap_or_default()
    }

    /// Cell columns the shape covers.
    pub fn column_ids(&self) -> Vec<i32> {
        self.rectangle()
            .map(|r| (r.top_left().x..=r.bottom_right().x).collect())
            .unwrap_or_default()
    }

    /// The parts realizing the shape of border `id`. Shapes that cannot get bounds from their
    /// parent degrade to no parts.
    pub(crate) fn border_parts(&self, tree: &BorderTree, id: BorderId) -> Result<Vec<BorderPart>> {
        match self.lines(tree, id) {
            Ok(lines) => {
                let border = tree.border(id)?;
                let style = border.style();
                lines
                    .into_iter()
                    .map(|(side, kind, start, end)| {
                        BorderPart::new(
                            id,
                            side,
                            kind,
                            start,
                            end,
                            style.thickness,
                            style.symbols(side).clone(),
                            style.color,
                        )
                    })
                    .collect()
            }
            Err(err @ RenderError::UnsupportedShapeComposition { .. }) => {
                warn!(border = ?id, error = %err, "dropping border parts");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    fn lines(
        &self,
        tree: &BorderTree,
        id: BorderId,
    ) -> Result<Vec<(Side, ShapeKind, Coordinate, Coordinate)>> {
        match self {
            BorderShape::Rectangle(rect) => {
                if let Some(parent) = tree.border(id)?.parent() {
                    if let BorderShape::Rectangle(outer) = tree.border(parent)?.shape() {
                        if !outer.contains_rectangle(rect) {
                            return Err(RenderError::UnsupportedShapeComposition {
                                shape: self.name(),
                                needs: "a rectangle inside its parent rectangle",
                            });
                        }
                    }
                }
                let tl = rect.top_left();
                let br = rect.bottom_right();
                let (left, right) = (tl.x, br.x + 1);
                let (top, bottom) = (tl.y, br.y + 1);
                Ok(vec![
                    (
                        Side::Top,
                        ShapeKind::Horizontal,
                        Coordinate::new(left, top),
                        Coordinate::new(right, top),
                    ),
                    (
                        Side::Bottom,
                        ShapeKind::Horizontal,
                        Coordinate::new(left, bottom),
                        Coordinate::new(right, bottom),
                    ),
                    (
                        Side::Left,
                        ShapeKind::Vertical,
                        Coordinate::new(left, top),
                        Coordinate::new(left, bottom),
                    ),
                    (
                        Side::Right,
                        ShapeKind::Vertical,
                        Coordinate::new(right, top),
                        Coordinate::new(right, bottom),
                    ),
                ])
            }
            BorderShape::BackgroundGrid => {
                let rect = parent_rectangle(tree, id, self.name())?;
                let tl = rect.top_left();
                let br = rect.bottom_right();
                let mut lines = Vec::new();
                for y in tl.y + 1..=br.y {
                    lines.push((
                        Side::Top,
                        ShapeKind::Horizontal,
                        Coordinate::new(tl.x, y),
                        Coordinate::new(br.x + 1, y),
                    ));
                }
                for x in tl.x + 1..=br.x {
                    lines.push((
                        Side::Left,
                        ShapeKind::Vertical,
                        Coordinate::new(x, tl.y),
                        Coordinate::new(x, br.y + 1),
                    ));
                }
                Ok(lines)
            }
            BorderShape::HighlightField(cell) => {
                let rect = highlight_parent(tree, id, *cell)?;
                let tl = rect.top_left();
                let br = rect.bottom_right();
                let mut lines = Vec::new();
                // Lines on the parent's own edges would just repaint them.
                for (side, y) in [(Side::Top, cell.y), (Side::Bottom, cell.y + 1)] {
                    if y > tl.y && y <= br.y {
                        lines.push((
                            side,
                            ShapeKind::Horizontal,
                            Coordinate::new(tl.x, y),
                            Coordinate::new(br.x + 1, y),
                        ));
                    }
                }
                for (side, x) in [(Side::Left, cell.x), (Side::Right, cell.x + 1)] {
                    if x > tl.x && x <= br.x {
                        lines.push((
                            side,
                            ShapeKind::Vertical,
                            Coordinate::new(x, tl.y),
                            Coordinate::new(x, br.y + 1),
                        ));
                    }
                }
                Ok(lines)
            }
            BorderShape::Null => Ok(Vec::new()),
        }
    }

    /// Index labels of a highlight. A highlight that draws no parts has no labels either.
    pub(crate) fn labels(&self, tree: &BorderTree, id: BorderId) -> Result<Vec<BorderLabel>> {
        let BorderShape::HighlightField(cell) = *self else {
            return Ok(Vec::new());
        };
        match highlight_parent(tree, id, cell) {
            Ok(_) => Ok(vec![
                BorderLabel {
                    text: cell.x.to_string(),
                    anchor: LabelAnchor::AboveColumn(cell.x),
                },
                BorderLabel {
                    text: cell.y.to_string(),
                    anchor: LabelAnchor::RightOfRow(cell.y),
                },
            ]),
            Err(RenderError::UnsupportedShapeComposition { .. }) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }
}

fn highlight_parent(tree: &BorderTree, id: BorderId, cell: Coordinate) -> Result<Rectangle> {
    let rect = parent_rectangle(tree, id, "highlight field")?;
    if !rect.contains(cell) {
        return Err(RenderError::UnsupportedShapeComposition {
            shape: "highlight field",
            needs: "a highlighted cell inside the parent rectangle",
        });
    }
    Ok(rect)
}

fn parent_rectangle(tree: &BorderTree, id: BorderId, shape: &'static str) -> Result<Rectangle> {
    let parent = tree.border(id)?.parent();
    let parent_shape = match parent {
        Some(parent) => *tree.border(parent)?.shape(),
        None => BorderShape::Null,
    };
    match parent_shape {
        BorderShape::Rectangle(rect) => Ok(rect),
        _ => Err(RenderError::UnsupportedShapeComposition {
            shape,
            needs: "a rectangle parent",
        }),
    }
}
