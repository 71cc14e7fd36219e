//! Pairwise collision detection between the parts of one flattened border tree.

use tracing::trace;

use crate::border::{BorderPart, BorderTree, PartId};
use crate::geometry::Coordinate;

/// A collision recorded on the earlier of two parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderPartCollision {
    positions: Vec<Coordinate>,
    with: PartId,
    is_outer: bool,
    mirrored_is_outer: bool,
}

impl BorderPartCollision {
    pub fn positions(&self) -> &[Coordinate] {
        &self.positions
    }

    pub fn with(&self) -> PartId {
        self.with
    }

    /// True if the other part's border is neither this part's border nor one of its
    /// descendants.
    pub fn is_outer(&self) -> bool {
        self.is_outer
    }
}

/// A collision as seen from one of the two parts involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionView<'a> {
    pub positions: &'a [Coordinate],
    pub other: PartId,
    pub is_outer: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionMap {
    recorded: Vec<Vec<BorderPartCollision>>,
}

impl CollisionMap {
    /// Collisions recorded on `part` against parts that come after it.
    pub fn recorded_by(&self, part: PartId) -> &[BorderPartCollision] {
        self.recorded
            .get(part.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every collision `part` takes part in: the ones it recorded, then the ones earlier parts
    /// recorded against it, each classified from `part`'s side.
    pub fn involving(&self, part: PartId) -> Vec<CollisionView<'_>> {
        let mut views: Vec<CollisionView<'_>> = self
            .recorded_by(part)
            .iter()
            .map(|c| CollisionView {
                positions: &c.positions,
                other: c.with,
                is_outer: c.is_outer,
            })
            .collect();

        for (index, collisions) in self.recorded.iter().enumerate().take(part.index()) {
            for c in collisions.iter().filter(|c| c.with == part) {
                views.push(CollisionView {
                    positions: &c.positions,
                    other: PartId(index),
                    is_outer: c.mirrored_is_outer,
                });
            }
        }
        views
    }

    pub fn len(&self) -> usize {
        self.recorded.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_outer(tree: &BorderTree, own: &BorderPart, other: &BorderPart) -> bool {
    !(own.border() == other.border() || tree.contains_border(own.border(), other.border()))
}

/// Compares every part with every later part. A collision between parts `a` and `b` (with
/// `a` first) is recorded on `a` only; the map is rebuilt from scratch on each call.
pub fn resolve_collisions(tree: &BorderTree, parts: &[BorderPart]) -> CollisionMap {
    let mut recorded = vec![Vec::new(); parts.len()];
    for (i, a) in parts.iter().enumerate() {
        for (j, b) in parts.iter().enumerate().skip(i + 1) {
            let positions = b.collision_positions_with(a);
            if positions.is_empty() {
                continue;
            }
            trace!(a = i, b = j, points = positions.len(), "border parts collide");
            recorded[i].push(BorderPartCollision {
                positions,
                with: PartId(j),
                is_outer: is_outer(tree, a, b),
                mirrored_is_outer: is_outer(tree, b, a),
            });
        }
    }
    CollisionMap { recorded }
}
