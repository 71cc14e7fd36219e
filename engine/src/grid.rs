use tracing::debug;

use crate::border::{BorderId, BorderLabel, BorderPart, BorderTree, PartId, ShapeKind};
use crate::collision::{CollisionMap, resolve_collisions};
use crate::error::{RenderError, Result};
use crate::geometry::Coordinate;

/// One part as painted by a canvas: the raw content plus where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBorderPart<R> {
    pub part: PartId,
    pub positions: Vec<Coordinate>,
    pub raw: R,
}

/// Flattened parts, their collisions and the per-line border thickness of one border tree.
#[derive(Debug, Clone)]
pub struct BorderGrid {
    board_width: u32,
    board_height: u32,
    parts: Vec<BorderPart>,
    collisions: CollisionMap,
    labels: Vec<BorderLabel>,
    column_widths: Vec<u32>,
    row_heights: Vec<u32>,
}

impl BorderGrid {
    pub fn board_width(&self) -> u32 {
        self.board_width
    }

    pub fn board_height(&self) -> u32 {
        self.board_height
    }

    pub fn parts(&self) -> &[BorderPart] {
        &self.parts
    }

    pub fn part(&self, id: PartId) -> Option<&BorderPart> {
        self.parts.get(id.index())
    }

    pub fn part_ids(&self) -> impl Iterator<Item = PartId> + '_ {
        (0..self.parts.len()).map(PartId)
    }

    pub fn collisions(&self) -> &CollisionMap {
        &self.collisions
    }

    pub fn labels(&self) -> &[BorderLabel] {
        &self.labels
    }

    /// Width of vertical line `x`: the thickest vertical part on it, 0 if there is none.
    pub fn column_border_width(&self, x: i32) -> u32 {
        usize::try_from(x)
            .ok()
            .and_then(|x| self.column_widths.get(x))
            .copied()
            .unwrap_or(0)
    }

    /// Height of horizontal line `y`: the thickest horizontal part on it, 0 if there is none.
    pub fn row_border_height(&self, y: i32) -> u32 {
        usize::try_from(y)
            .ok()
            .and_then(|y| self.row_heights.get(y))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_border_width(&self) -> u32 {
        self.column_widths.iter().sum()
    }

    pub fn total_border_height(&self) -> u32 {
        self.row_heights.iter().sum()
    }

    /// Sum of the widths of vertical lines before line `x`.
    pub fn border_width_before(&self, x: i32) -> u32 {
        let end = usize::try_from(x).unwrap_or(0).min(self.column_widths.len());
        self.column_widths[..end].iter().sum()
    }

    pub fn border_height_before(&self, y: i32) -> u32 {
        let end = usize::try_from(y).unwrap_or(0).min(self.row_heights.len());
        self.row_heights[..end].iter().sum()
    }

    /// Grid positions of `id` plus any of its collision points not already on it, ordered
    /// along the part.
    pub fn part_positions(&self, id: PartId) -> Vec<Coordinate> {
        let Some(part) = self.part(id) else {
            return Vec::new();
        };
        let mut positions = part.grid_positions();
        for view in self.collisions.involving(id) {
            for &c in view.positions {
                if !positions.contains(&c) {
                    positions.push(c);
                }
            }
        }
        match part.kind() {
            ShapeKind::Horizontal => positions.sort_by_key(|c| c.x),
            ShapeKind::Vertical => positions.sort_by_key(|c| c.y),
        }
        positions
    }
}

/// Flattens a border tree, resolves its collisions and lays out line thicknesses for a
/// `width` x `height` board.
#[derive(Debug)]
pub struct BorderGridBuilder<'a> {
    tree: &'a BorderTree,
    root: BorderId,
    width: u32,
    height: u32,
}

impl<'a> BorderGridBuilder<'a> {
    pub fn new(tree: &'a BorderTree, root: BorderId, width: u32, height: u32) -> Self {
        Self {
            tree,
            root,
            width,
            height,
        }
    }

    pub fn build(&self) -> Result<BorderGrid> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidGeometry(format!(
                "border grid needs a non-empty board, got {}x{}",
                self.width, self.height
            )));
        }

        let parts = self.tree.border_parts(self.root)?;
        let collisions = resolve_collisions(self.tree, &parts);
        let labels = self.tree.labels(self.root)?;

        let mut column_widths = vec![0u32; self.width as usize + 1];
        let mut row_heights = vec![0u32; self.height as usize + 1];
        for part in &parts {
            let Ok(line) = usize::try_from(part.line()) else {
                continue;
            };
            let (lines, size) = match part.kind() {
                ShapeKind::Vertical => (&mut column_widths, part.thickness().width()),
                ShapeKind::Horizontal => (&mut row_heights, part.thickness().height()),
            };
            if let Some(slot) = lines.get_mut(line) {
                *slot = (*slot).max(size);
            }
        }

        debug!(
            parts = parts.len(),
            collisions = collisions.len(),
            labels = labels.len(),
            "built border grid"
        );

        Ok(BorderGrid {
            board_width: self.width,
            board_height: self.height,
            parts,
            collisions,
            labels,
            column_widths,
            row_heights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::{BorderShape, BorderStyle};
    use crate::geometry::{BorderPartThickness, Rectangle};

    fn frame_tree(w: u32, h: u32, thickness: u32) -> (BorderTree, BorderId) {
        let mut tree = BorderTree::new();
        let style = BorderStyle::outer_frame().with_thickness(
            BorderPartThickness::new(thickness, thickness).expect("thickness"),
        );
        let root = tree.add_root(
            BorderShape::Rectangle(Rectangle::from_size(w, h).expect("rect")),
            style,
        );
        (tree, root)
    }

    #[test]
    fn line_thickness_only_counts_lines_with_parts() {
        let (mut tree, root) = frame_tree(2, 2, 3);
        let grid = BorderGridBuilder::new(&tree, root, 2, 2).build().expect("grid");
        assert_eq!(grid.column_border_width(0), 3);
        assert_eq!(grid.column_border_width(1), 0);
        assert_eq!(grid.column_border_width(2), 3);
        assert_eq!(grid.total_border_width(), 6);
        assert_eq!(grid.border_width_before(2), 3);

        tree.add_inner_border(root, BorderShape::BackgroundGrid, BorderStyle::background_grid())
            .expect("grid border");
        let grid = BorderGridBuilder::new(&tree, root, 2, 2).build().expect("grid");
        assert_eq!(grid.column_border_width(1), 1);
        assert_eq!(grid.row_border_height(1), 1);
        assert_eq!(grid.total_border_height(), 7);
    }

    #[test]
    fn part_positions_are_sorted_along_the_part() {
        let (tree, root) = frame_tree(3, 1, 1);
        let grid = BorderGridBuilder::new(&tree, root, 3, 1).build().expect("grid");
        let top = grid.part_ids().next().expect("top part");
        let xs: Vec<i32> = grid.part_positions(top).iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_board_is_rejected() {
        let (tree, root) = frame_tree(1, 1, 1);
        assert!(BorderGridBuilder::new(&tree, root, 0, 1).build().is_err());
    }
}
