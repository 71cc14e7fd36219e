//! Output surfaces that border grids and board fields are painted onto.

mod image;
mod text;

pub use image::{ImageCanvas, PixelBlock};
pub use text::TextCanvas;

use crate::border::PartId;
use crate::error::Result;
use crate::grid::{BorderGrid, RenderedBorderPart};

pub trait Canvas {
    /// Backend-specific content of one rendered border part.
    type Raw: Default;
    /// Backend-specific content of one board field.
    type Field;
    type Output;

    /// True while the border grid set last is still valid for the current borders.
    fn has_cached_border_grid(&self) -> bool;

    fn render_border_part(&self, grid: &BorderGrid, part: PartId) -> RenderedBorderPart<Self::Raw>;

    /// Every part of `grid`, in painting order.
    fn render_border_grid(&self, grid: &BorderGrid) -> Vec<RenderedBorderPart<Self::Raw>> {
        grid.part_ids()
            .map(|id| self.render_border_part(grid, id))
            .collect()
    }

    /// Paints `parts` (later ones over earlier ones) and caches the result.
    fn set_border_grid(
        &mut self,
        grid: &BorderGrid,
        parts: Vec<RenderedBorderPart<Self::Raw>>,
    ) -> Result<()>;

    fn set_rendered_board_fields(&mut self, fields: Vec<Vec<Self::Field>>);

    fn render(&self, field_size: u32) -> Result<Self::Output>;

    /// Forgets the cached border grid; the next render rebuilds it.
    fn invalidate_border_grid(&mut self);
}
