use std::collections::HashSet;
use std::rc::Rc;

use tracing::debug;

use crate::border::{PartId, ShapeKind};
use crate::canvas::Canvas;
use crate::error::{RenderError, Result};
use crate::grid::{BorderGrid, RenderedBorderPart};
use crate::raster::{Color, Raster, Rect, unused_color};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBlock {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone)]
struct BorderImage {
    raster: Raster,
    cell_x: Vec<u32>,
    cell_y: Vec<u32>,
}

/// Raster canvas: every cell is `field_size` pixels square and every border line is as thick
/// as the thickest part lying on it.
#[derive(Debug, Clone)]
pub struct ImageCanvas {
    field_size: u32,
    background: Color,
    border: Option<BorderImage>,
    fields: Vec<Vec<Option<Rc<Raster>>>>,
}

impl ImageCanvas {
    pub fn new(field_size: u32, background: Color) -> Self {
        Self {
            field_size,
            background,
            border: None,
            fields: Vec::new(),
        }
    }

    pub fn field_size(&self) -> u32 {
        self.field_size
    }

    /// Left pixel of vertical border line `x`, or `None` for a line left of the board.
    fn line_x(&self, grid: &BorderGrid, x: i32) -> Option<u32> {
        let index = u32::try_from(x).ok()?;
        Some(index * self.field_size + grid.border_width_before(x))
    }

    fn line_y(&self, grid: &BorderGrid, y: i32) -> Option<u32> {
        let index = u32::try_from(y).ok()?;
        Some(index * self.field_size + grid.border_height_before(y))
    }
}

impl Canvas for ImageCanvas {
    type Raw = Option<PixelBlock>;
    type Field = Option<Rc<Raster>>;
    type Output = Raster;

    fn has_cached_border_grid(&self) -> bool {
        self.border.is_some()
    }

    fn render_border_part(&self, grid: &BorderGrid, id: PartId) -> RenderedBorderPart<Self::Raw> {
        let positions = grid.part_positions(id);
        let raw = grid.part(id).and_then(|part| {
            let (start, end) = (part.start(), part.end());
            let thickness = part.thickness();
            let rect = match part.kind() {
                ShapeKind::Horizontal => {
                    let x0 = self.line_x(grid, start.x)?;
                    let x1 = self.line_x(grid, end.x)? + grid.column_border_width(end.x);
                    Rect::new(x0, self.line_y(grid, start.y)?, x1 - x0, thickness.height())
                }
                ShapeKind::Vertical => {
                    let y0 = self.line_y(grid, start.y)?;
                    let y1 = self.line_y(grid, end.y)? + grid.row_border_height(end.y);
                    Rect::new(self.line_x(grid, start.x)?, y0, thickness.width(), y1 - y0)
                }
            };
            Some(PixelBlock {
                rect,
                color: part.color(),
            })
        });
        RenderedBorderPart {
            part: id,
            positions,
            raw,
        }
    }

    fn set_border_grid(
        &mut self,
        grid: &BorderGrid,
        parts: Vec<RenderedBorderPart<Self::Raw>>,
    ) -> Result<()> {
        let width = grid.board_width() * self.field_size + grid.total_border_width();
        let height = grid.board_height() * self.field_size + grid.total_border_height();
        let mut raster = Raster::filled(width, height, self.background);
        for block in parts.into_iter().filter_map(|p| p.raw) {
            raster.set_pixel_block(block.rect, block.color);
        }

        let cell_x = (0..grid.board_width() as i32)
            .filter_map(|x| Some(self.line_x(grid, x)? + grid.column_border_width(x)))
            .collect();
        let cell_y = (0..grid.board_height() as i32)
            .filter_map(|y| Some(self.line_y(grid, y)? + grid.row_border_height(y)))
            .collect();

        debug!(width, height, "painted border image");
        self.border = Some(BorderImage {
            raster,
            cell_x,
            cell_y,
        });
        Ok(())
    }

    fn set_rendered_board_fields(&mut self, fields: Vec<Vec<Self::Field>>) {
        self.fields = fields;
    }

    fn render(&self, field_size: u32) -> Result<Raster> {
        if field_size != self.field_size {
            return Err(RenderError::FieldSizeMismatch {
                expected: self.field_size,
                actual: field_size,
            });
        }
        let border = self.border.as_ref().ok_or(RenderError::MissingBorderGrid)?;
        let mut image = border.raster.clone();

        for (y, row) in self.fields.iter().enumerate() {
            let Some(&top) = border.cell_y.get(y) else {
                continue;
            };
            for (x, field) in row.iter().enumerate() {
                let (Some(sprite), Some(&left)) = (field, border.cell_x.get(x)) else {
                    continue;
                };
                let dx = field_size.saturating_sub(sprite.width()) / 2;
                let dy = field_size.saturating_sub(sprite.height()) / 2;
                image.blit(sprite, left + dx, top + dy);
            }
        }

        let used: Vec<Color> = image
            .rgba()
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], 255])
            .collect::<HashSet<Color>>()
            .into_iter()
            .collect();
        image.mark_transparent(unused_color(&used));
        Ok(image)
    }

    fn invalidate_border_grid(&mut self) {
        self.border = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::{BorderId, BorderShape, BorderStyle, BorderTree};
    use crate::geometry::{BorderPartThickness, Coordinate, Rectangle};
    use crate::grid::BorderGridBuilder;
    use crate::raster::{BLACK, WHITE};

    fn tree(w: u32, h: u32, thickness: u32, with_grid: bool) -> (BorderTree, BorderId) {
        let mut tree = BorderTree::new();
        let root = tree.add_root(
            BorderShape::Rectangle(Rectangle::from_size(w, h).expect("rect")),
            BorderStyle::outer_frame()
                .with_color(WHITE)
                .with_thickness(BorderPartThickness::new(thickness, thickness).expect("thickness")),
        );
        if with_grid {
            tree.add_inner_border(
                root,
                BorderShape::BackgroundGrid,
                BorderStyle::background_grid().with_color([128, 128, 128, 255]),
            )
            .expect("grid");
        }
        (tree, root)
    }

    fn painted(tree: &BorderTree, root: BorderId, w: u32, h: u32, field_size: u32) -> ImageCanvas {
        let grid = BorderGridBuilder::new(tree, root, w, h).build().expect("grid");
        let mut canvas = ImageCanvas::new(field_size, BLACK);
        let parts = canvas.render_border_grid(&grid);
        canvas.set_border_grid(&grid, parts).expect("set grid");
        canvas
    }

    #[test]
    fn frame_sits_on_the_outer_pixels() {
        let (tree, root) = tree(2, 1, 2, false);
        let canvas = painted(&tree, root, 2, 1, 5);
        let image = canvas.render(5).expect("render");
        assert_eq!((image.width(), image.height()), (14, 9));
        assert_eq!(image.pixel(0, 0), Some(WHITE));
        assert_eq!(image.pixel(13, 8), Some(WHITE));
        assert_eq!(image.pixel(1, 4), Some(WHITE));
        assert_eq!(image.pixel(2, 2), Some(BLACK));
        assert_eq!(image.pixel(7, 4), Some(BLACK));
    }

    #[test]
    fn grid_lines_separate_cells() {
        let (tree, root) = tree(2, 2, 1, true);
        let canvas = painted(&tree, root, 2, 2, 10);
        let image = canvas.render(10).expect("render");
        assert_eq!((image.width(), image.height()), (23, 23));
        assert_eq!(image.pixel(11, 5), Some([128, 128, 128, 255]));
        assert_eq!(image.pixel(5, 11), Some([128, 128, 128, 255]));
        assert_eq!(image.pixel(5, 5), Some(BLACK));
    }

    #[test]
    fn sprites_are_centred_in_their_cell() {
        let (tree, root) = tree(1, 1, 1, false);
        let mut canvas = painted(&tree, root, 1, 1, 10);
        let sprite = Rc::new(Raster::filled(2, 2, [0, 255, 0, 255]));
        canvas.set_rendered_board_fields(vec![vec![Some(sprite)]]);
        let image = canvas.render(10).expect("render");
        assert_eq!(image.pixel(5, 5), Some([0, 255, 0, 255]));
        assert_eq!(image.pixel(6, 6), Some([0, 255, 0, 255]));
        assert_eq!(image.pixel(4, 4), Some(BLACK));
    }

    #[test]
    fn transparent_color_is_unused() {
        let (tree, root) = tree(1, 1, 1, false);
        let canvas = painted(&tree, root, 1, 1, 4);
        let image = canvas.render(4).expect("render");
        // black and white are taken, so the first free value is (1, 0, 0).
        assert_eq!(image.transparent_color(), Some([1, 0, 0, 0]));
        assert!(image.rgba().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn render_checks_field_size_and_grid() {
        let canvas = ImageCanvas::new(4, BLACK);
        assert!(matches!(canvas.render(4), Err(RenderError::MissingBorderGrid)));
        assert!(matches!(
            canvas.render(8),
            Err(RenderError::FieldSizeMismatch { expected: 4, actual: 8 })
        ));
    }

    #[test]
    fn parts_left_of_the_board_have_no_pixels() {
        let mut tree = BorderTree::new();
        let root = tree.add_root(
            BorderShape::Rectangle(Rectangle::new(Coordinate::new(-1, 0), Coordinate::new(0, 0))),
            BorderStyle::outer_frame(),
        );
        let grid = BorderGridBuilder::new(&tree, root, 1, 1).build().expect("grid");
        let canvas = ImageCanvas::new(4, BLACK);
        let rendered: Vec<_> = grid
            .part_ids()
            .map(|id| canvas.render_border_part(&grid, id).raw)
            .collect();
        // top, bottom and left start at line -1; only the right edge is on the board.
        assert!(rendered[..3].iter().all(Option::is_none));
        assert!(rendered[3].is_some());
    }
}
