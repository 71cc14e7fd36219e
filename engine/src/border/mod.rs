//! Nested borders kept in an arena and addressed by handle.
//!
//! A border owns one [`BorderShape`] and any number of inner borders. Flattening a border
//! yields its own parts followed by every inner border's parts, in pre-order.

pub mod part;
pub mod shape;
pub mod style;

use crate::error::{RenderError, Result};

pub use part::{BorderPart, PartId, ShapeKind};
pub use shape::{BorderLabel, BorderShape, LabelAnchor};
pub use style::{
    BorderStyle, BorderSymbolDefinition, CollisionDirection, CollisionSymbolDefinition,
    PartPosition, Side,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BorderId(usize);

#[derive(Debug, Clone)]
pub struct Border {
    parent: Option<BorderId>,
    children: Vec<BorderId>,
    shape: BorderShape,
    style: BorderStyle,
}

impl Border {
    pub fn parent(&self) -> Option<BorderId> {
        self.parent
    }

    pub fn inner_borders(&self) -> &[BorderId] {
        &self.children
    }

    pub fn shape(&self) -> &BorderShape {
        &self.shape
    }

    pub fn style(&self) -> &BorderStyle {
        &self.style
    }
}

#[derive(Debug, Clone, Default)]
pub struct BorderTree {
    nodes: Vec<Option<Border>>,
}

impl BorderTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, border: Border) -> BorderId {
        if let Some(free) = self.nodes.iter().position(Option::is_none) {
            self.nodes[free] = Some(border);
            BorderId(free)
        } else {
            self.nodes.push(Some(border));
            BorderId(self.nodes.len() - 1)
        }
    }

    pub fn add_root(&mut self, shape: BorderShape, style: BorderStyle) -> BorderId {
        self.insert(Border {
            parent: None,
            children: Vec::new(),
            shape,
            style,
        })
    }

    pub fn border(&self, id: BorderId) -> Result<&Border> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(RenderError::UnknownBorder(id))
    }

    fn border_mut(&mut self, id: BorderId) -> Result<&mut Border> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(RenderError::UnknownBorder(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add_inner_border(
        &mut self,
        parent: BorderId,
        shape: BorderShape,
        style: BorderStyle,
    ) -> Result<BorderId> {
        self.border(parent)?;
        let id = self.insert(Border {
            parent: Some(parent),
            children: Vec::new(),
            shape,
            style,
        });
        self.border_mut(parent)?.children.push(id);
        Ok(id)
    }

    pub fn set_shape(&mut self, id: BorderId, shape: BorderShape) -> Result<()> {
        self.border_mut(id)?.shape = shape;
        Ok(())
    }

    fn free_subtree(&mut self, id: BorderId) {
        let children = match self.nodes.get_mut(id.0).and_then(Option::take) {
            Some(border) => border.children,
            None => return,
        };
        for child in children {
            self.free_subtree(child);
        }
    }

    /// Drops every inner border of `id` (and their subtrees). The shape is kept.
    pub fn reset_inner_borders(&mut self, id: BorderId) -> Result<()> {
        let children = std::mem::take(&mut self.border_mut(id)?.children);
        for child in children {
            self.free_subtree(child);
        }
        Ok(())
    }

    /// Detaches `id` from its parent and drops its whole subtree.
    pub fn remove_inner_border(&mut self, id: BorderId) -> Result<()> {
        let parent = self.border(id)?.parent;
        if let Some(parent) = parent {
            self.border_mut(parent)?.children.retain(|&c| c != id);
        }
        self.free_subtree(id);
        Ok(())
    }

    /// True if `inner` is a descendant of `outer`.
    pub fn contains_border(&self, outer: BorderId, inner: BorderId) -> bool {
        let Ok(border) = self.border(outer) else {
            return false;
        };
        border
            .children
            .iter()
            .any(|&child| child == inner || self.contains_border(child, inner))
    }

    /// `id` followed by all its descendants, self before children, children in insertion order.
    pub fn pre_order(&self, id: BorderId) -> Result<Vec<BorderId>> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let border = self.border(next)?;
            order.push(next);
            stack.extend(border.children.iter().rev());
        }
        Ok(order)
    }

    pub fn border_parts(&self, id: BorderId) -> Result<Vec<BorderPart>> {
        let mut parts = Vec::new();
        for border in self.pre_order(id)? {
            let shape = *self.border(border)?.shape();
            parts.extend(shape.border_parts(self, border)?);
        }
        Ok(parts)
    }

    pub fn labels(&self, id: BorderId) -> Result<Vec<BorderLabel>> {
        let mut labels = Vec::new();
        for border in self.pre_order(id)? {
            let shape = *self.border(border)?.shape();
            labels.extend(shape.labels(self, border)?);
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Coordinate, Rectangle};

    fn frame(tree: &mut BorderTree, w: i32, h: i32) -> BorderId {
        tree.add_root(
            BorderShape::Rectangle(Rectangle::new(
                Coordinate::new(0, 0),
                Coordinate::new(w - 1, h - 1),
            )),
            BorderStyle::outer_frame(),
        )
    }

    #[test]
    fn inner_borders_are_flattened_after_their_parent() {
        let mut tree = BorderTree::new();
        let root = frame(&mut tree, 4, 4);
        let selection = tree
            .add_inner_border(
                root,
                BorderShape::Rectangle(Rectangle::new(
                    Coordinate::new(1, 1),
                    Coordinate::new(2, 2),
                )),
                BorderStyle::selection_area(),
            )
            .expect("selection");

        let parts = tree.border_parts(root).expect("parts");
        assert_eq!(parts.len(), 8);
        assert!(parts[..4].iter().all(|p| p.border() == root));
        assert!(parts[4..].iter().all(|p| p.border() == selection));
        assert_eq!(parts[4].symbols().start, '┏');
    }

    #[test]
    fn contains_border_walks_descendants() {
        let mut tree = BorderTree::new();
        let root = frame(&mut tree, 3, 3);
        let child = tree
            .add_inner_border(root, BorderShape::Null, BorderStyle::background_grid())
            .expect("child");
        let grandchild = tree
            .add_inner_border(child, BorderShape::Null, BorderStyle::background_grid())
            .expect("grandchild");

        assert!(tree.contains_border(root, grandchild));
        assert!(tree.contains_border(child, grandchild));
        assert!(!tree.contains_border(grandchild, root));
        assert!(!tree.contains_border(child, child));
        assert_eq!(
            tree.pre_order(root).expect("order"),
            vec![root, child, grandchild]
        );
    }

    #[test]
    fn removing_a_border_frees_its_subtree() {
        let mut tree = BorderTree::new();
        let root = frame(&mut tree, 3, 3);
        let child = tree
            .add_inner_border(root, BorderShape::Null, BorderStyle::background_grid())
            .expect("child");
        let grandchild = tree
            .add_inner_border(child, BorderShape::Null, BorderStyle::background_grid())
            .expect("grandchild");

        tree.remove_inner_border(child).expect("remove");
        assert_eq!(tree.len(), 1);
        assert!(tree.border(root).expect("root").inner_borders().is_empty());
        assert!(matches!(
            tree.border(grandchild),
            Err(RenderError::UnknownBorder(_))
        ));

        let reused = tree
            .add_inner_border(root, BorderShape::Null, BorderStyle::background_grid())
            .expect("reuse slot");
        assert_eq!(tree.len(), 2);
        assert!(tree.contains_border(root, reused));
    }

    #[test]
    fn reset_keeps_the_shape() {
        let mut tree = BorderTree::new();
        let root = frame(&mut tree, 2, 2);
        tree.add_inner_border(root, BorderShape::BackgroundGrid, BorderStyle::background_grid())
            .expect("grid");
        assert_eq!(tree.border_parts(root).expect("parts").len(), 6);

        tree.reset_inner_borders(root).expect("reset");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.border_parts(root).expect("parts").len(), 4);
    }
}
