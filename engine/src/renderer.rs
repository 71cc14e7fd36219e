//! Board renderer facade: owns the border tree, caches the border grid on its canvas and
//! combines it with freshly rendered board fields on every call.

use tracing::{debug, trace};

use crate::board::Board;
use crate::border::{BorderId, BorderShape, BorderStyle, BorderTree};
use crate::canvas::{Canvas, ImageCanvas, TextCanvas};
use crate::error::Result;
use crate::field::{BoardFieldRenderer, SmileyFieldRenderer, TextFieldRenderer};
use crate::geometry::{Coordinate, Rectangle};
use crate::grid::BorderGridBuilder;
use crate::raster::Color;

/// Borders drawn for a single render call only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlay {
    pub highlight: Option<Coordinate>,
    pub selection: Option<Rectangle>,
}

impl Overlay {
    pub fn highlight(cell: Coordinate) -> Self {
        Self {
            highlight: Some(cell),
            selection: None,
        }
    }

    pub fn selection(area: Rectangle) -> Self {
        Self {
            highlight: None,
            selection: Some(area),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.highlight.is_none() && self.selection.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyles {
    pub frame: BorderStyle,
    /// Drawn between all cells when set.
    pub background_grid: Option<BorderStyle>,
    pub selection: BorderStyle,
    pub highlight: BorderStyle,
}

impl Default for RenderStyles {
    fn default() -> Self {
        Self {
            frame: BorderStyle::outer_frame(),
            background_grid: None,
            selection: BorderStyle::selection_area(),
            highlight: BorderStyle::highlight_field(),
        }
    }
}

#[derive(Debug)]
pub struct BoardRenderer<C, F> {
    tree: BorderTree,
    frame: BorderId,
    styles: RenderStyles,
    width: u32,
    height: u32,
    field_size: u32,
    canvas: C,
    fields: F,
    grid_builds: usize,
}

pub type TextBoardRenderer = BoardRenderer<TextCanvas, TextFieldRenderer>;
pub type ImageBoardRenderer = BoardRenderer<ImageCanvas, SmileyFieldRenderer>;

impl<C, F> BoardRenderer<C, F>
where
    C: Canvas,
    F: BoardFieldRenderer<Field = C::Field>,
{
    pub fn new(
        canvas: C,
        fields: F,
        field_size: u32,
        width: u32,
        height: u32,
        styles: RenderStyles,
    ) -> Result<Self> {
        let mut tree = BorderTree::new();
        let frame = tree.add_root(
            BorderShape::Rectangle(Rectangle::from_size(width, height)?),
            styles.frame.clone(),
        );
        if let Some(grid_style) = &styles.background_grid {
            tree.add_inner_border(frame, BorderShape::BackgroundGrid, grid_style.clone())?;
        }
        Ok(Self {
            tree,
            frame,
            styles,
            width,
            height,
            field_size,
            canvas,
            fields,
            grid_builds: 0,
        })
    }

    pub fn tree(&self) -> &BorderTree {
        &self.tree
    }

    pub fn frame(&self) -> BorderId {
        self.frame
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn field_size(&self) -> u32 {
        self.field_size
    }

    /// How many times the border grid has been rebuilt instead of taken from the canvas cache.
    pub fn border_grid_builds(&self) -> usize {
        self.grid_builds
    }

    /// Adds a border that stays until removed.
    pub fn add_inner_border(&mut self, shape: BorderShape, style: BorderStyle) -> Result<BorderId> {
        let id = self.tree.add_inner_border(self.frame, shape, style)?;
        self.canvas.invalidate_border_grid();
        Ok(id)
    }

    pub fn remove_inner_border(&mut self, id: BorderId) -> Result<()> {
        self.tree.remove_inner_border(id)?;
        self.canvas.invalidate_border_grid();
        Ok(())
    }

    /// Drops every inner border except the background grid.
    pub fn reset_inner_borders(&mut self) -> Result<()> {
        self.tree.reset_inner_borders(self.frame)?;
        if let Some(grid_style) = &self.styles.background_grid {
            self.tree
                .add_inner_border(self.frame, BorderShape::BackgroundGrid, grid_style.clone())?;
        }
        self.canvas.invalidate_border_grid();
        Ok(())
    }

    fn fit_board(&mut self, board: &Board) -> Result<()> {
        if board.width() == self.width && board.height() == self.height {
            return Ok(());
        }
        debug!(
            from = %format!("{}x{}", self.width, self.height),
            to = %format!("{}x{}", board.width(), board.height()),
            "board size changed, rebuilding frame"
        );
        self.tree.set_shape(self.frame, BorderShape::Rectangle(board.bounds()))?;
        self.width = board.width();
        self.height = board.height();
        self.canvas.invalidate_border_grid();
        Ok(())
    }

    pub fn render_board(&mut self, board: &Board) -> Result<C::Output> {
        self.render_board_with(board, &Overlay::default())
    }

    /// Renders `board` with `overlay` added as inner borders of the frame for this call only.
    pub fn render_board_with(&mut self, board: &Board, overlay: &Overlay) -> Result<C::Output> {
        self.fit_board(board)?;
        if overlay.is_empty() {
            return self.paint(board, None);
        }

        let mut ephemeral = Vec::new();
        // Selections are clipped to the board; highlights off the board draw nothing.
        if let Some(area) = overlay.selection.and_then(|area| board.bounds().intersection(&area)) {
            ephemeral.push(self.tree.add_inner_border(
                self.frame,
                BorderShape::Rectangle(area),
                self.styles.selection.clone(),
            )?);
        }
        if let Some(cell) = overlay.highlight {
            ephemeral.push(self.tree.add_inner_border(
                self.frame,
                BorderShape::HighlightField(cell),
                self.styles.highlight.clone(),
            )?);
        }
        self.canvas.invalidate_border_grid();

        let output = self.paint(board, overlay.highlight);

        for id in ephemeral {
            self.tree.remove_inner_border(id)?;
        }
        self.canvas.invalidate_border_grid();
        output
    }

    fn paint(&mut self, board: &Board, highlight: Option<Coordinate>) -> Result<C::Output> {
        if self.canvas.has_cached_border_grid() {
            trace!("reusing cached border grid");
        } else {
            let grid = BorderGridBuilder::new(&self.tree, self.frame, self.width, self.height)
                .build()?;
            let parts = self.canvas.render_border_grid(&grid);
            self.canvas.set_border_grid(&grid, parts)?;
            self.grid_builds += 1;
        }

        let fields = self.fields.rendered_board_fields(board, highlight);
        self.canvas.set_rendered_board_fields(fields);
        self.canvas.render(self.field_size)
    }
}

impl BoardRenderer<TextCanvas, TextFieldRenderer> {
    pub fn text(
        width: u32,
        height: u32,
        styles: RenderStyles,
        fields: TextFieldRenderer,
    ) -> Result<Self> {
        Self::new(TextCanvas::new(), fields, 1, width, height, styles)
    }
}

impl BoardRenderer<ImageCanvas, SmileyFieldRenderer> {
    pub fn image(
        width: u32,
        height: u32,
        field_size: u32,
        styles: RenderStyles,
        background: Color,
        foreground: Color,
    ) -> Result<Self> {
        Self::new(
            ImageCanvas::new(field_size, background),
            SmileyFieldRenderer::new(field_size, foreground),
            field_size,
            width,
            height,
            styles,
        )
    }
}
