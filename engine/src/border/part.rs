//! Straight border segments in border-line space.

use crate::border::BorderId;
use crate::border::style::{BorderSymbolDefinition, CollisionDirection, PartPosition, Side};
use crate::error::{RenderError, Result};
use crate::geometry::{BorderPartThickness, Coordinate};
use crate::raster::Color;

/// Index of a part in the flattened part list of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartId(pub(crate) usize);

impl PartId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Horizontal,
    Vertical,
}

impl ShapeKind {
    /// Every integer point between `start` and `end`, in start to end order.
    pub fn grid_positions(self, start: Coordinate, end: Coordinate) -> Vec<Coordinate> {
        match self {
            ShapeKind::Horizontal => (start.x..=end.x)
                .map(|x| Coordinate::new(x, start.y))
                .collect(),
            ShapeKind::Vertical => (start.y..=end.y)
                .map(|y| Coordinate::new(start.x, y))
                .collect(),
        }
    }

    pub fn contains_coordinate(self, start: Coordinate, end: Coordinate, c: Coordinate) -> bool {
        match self {
            ShapeKind::Horizontal => c.y == start.y && c.x >= start.x && c.x <= end.x,
            ShapeKind::Vertical => c.x == start.x && c.y >= start.y && c.y <= end.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderPart {
    border: BorderId,
    side: Side,
    kind: ShapeKind,
    start: Coordinate,
    end: Coordinate,
    thickness: BorderPartThickness,
    symbols: BorderSymbolDefinition,
    color: Color,
}

impl BorderPart {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        border: BorderId,
        side: Side,
        kind: ShapeKind,
        start: Coordinate,
        end: Coordinate,
        thickness: BorderPartThickness,
        symbols: BorderSymbolDefinition,
        color: Color,
    ) -> Result<Self> {
        let valid = match kind {
            ShapeKind::Horizontal => start.y == end.y && start.x <= end.x,
            ShapeKind::Vertical => start.x == end.x && start.y <= end.y,
        };
        if !valid {
            return Err(RenderError::InvalidGeometry(format!(
                "{kind:?} part cannot run from {start} to {end}"
            )));
        }
        Ok(Self {
            border,
            side,
            kind,
            start,
            end,
            thickness,
            symbols,
            color,
        })
    }

    pub fn border(&self) -> BorderId {
        self.border
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn end(&self) -> Coordinate {
        self.end
    }

    pub fn thickness(&self) -> BorderPartThickness {
        self.thickness
    }

    pub fn symbols(&self) -> &BorderSymbolDefinition {
        &self.symbols
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The fixed line this part lies on (y for horizontal, x for vertical).
    pub fn line(&self) -> i32 {
        match self.kind {
            ShapeKind::Horizontal => self.start.y,
            ShapeKind::Vertical => self.start.x,
        }
    }

    pub fn grid_positions(&self) -> Vec<Coordinate> {
        self.kind.grid_positions(self.start, self.end)
    }

    pub fn contains_coordinate(&self, c: Coordinate) -> bool {
        self.kind.contains_coordinate(self.start, self.end, c)
    }

    pub fn position_of(&self, c: Coordinate) -> PartPosition {
        if c == self.start {
            PartPosition::Start
        } else if c == self.end {
            PartPosition::End
        } else {
            PartPosition::Center
        }
    }

    /// Orthogonal neighbours of `c` that lie on this part.
    pub fn directions_at(&self, c: Coordinate) -> CollisionDirection {
        let mut dirs = CollisionDirection::empty();
        let checks = [
            (c.offset(0, -1), CollisionDirection::TOP),
            (c.offset(0, 1), CollisionDirection::BOTTOM),
            (c.offset(-1, 0), CollisionDirection::LEFT),
            (c.offset(1, 0), CollisionDirection::RIGHT),
        ];
        for (neighbour, dir) in checks {
            if self.contains_coordinate(neighbour) {
                dirs |= dir;
            }
        }
        dirs
    }

    fn may_touch(&self, other: &BorderPart) -> bool {
        self.start.x <= other.end.x
            && other.start.x <= self.end.x
            && self.start.y <= other.end.y
            && other.start.y <= self.end.y
    }

    /// First point of this part, in start to end order, that `other` contains.
    pub fn collision_position_with(&self, other: &BorderPart) -> Option<Coordinate> {
        if !self.may_touch(other) {
            return None;
        }
        self.grid_positions()
            .into_iter()
            .find(|&c| other.contains_coordinate(c))
    }

    /// Every point shared with `other`, each contiguous run summarised to its first and last
    /// point. A crossing is a run of one point.
    pub fn collision_positions_with(&self, other: &BorderPart) -> Vec<Coordinate> {
        let mut positions = Vec::new();
        if !self.may_touch(other) {
            return positions;
        }

        let mut run: Option<(Coordinate, Coordinate)> = None;
        for c in self.grid_positions() {
            if other.contains_coordinate(c) {
                run = Some(match run {
                    Some((first, _)) => (first, c),
                    None => (c, c),
                });
            } else if let Some((first, last)) = run.take() {
                push_run(&mut positions, first, last);
            }
        }
        if let Some((first, last)) = run {
            push_run(&mut positions, first, last);
        }
        positions
    }
}

fn push_run(positions: &mut Vec<Coordinate>, first: Coordinate, last: Coordinate) {
    positions.push(first);
    if last != first {
        positions.push(last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::style::BorderStyle;

    fn part(kind: ShapeKind, start: (i32, i32), end: (i32, i32)) -> BorderPart {
        let style = BorderStyle::background_grid();
        BorderPart::new(
            BorderId(0),
            Side::Top,
            kind,
            Coordinate::new(start.0, start.1),
            Coordinate::new(end.0, end.1),
            BorderPartThickness::UNIT,
            style.top,
            style.color,
        )
        .expect("valid part")
    }

    #[test]
    fn rejects_parts_off_their_axis() {
        let style = BorderStyle::background_grid();
        let err = BorderPart::new(
            BorderId(0),
            Side::Top,
            ShapeKind::Horizontal,
            Coordinate::new(0, 0),
            Coordinate::new(3, 1),
            BorderPartThickness::UNIT,
            style.top.clone(),
            style.color,
        );
        assert!(matches!(err, Err(RenderError::InvalidGeometry(_))));

        let reversed = BorderPart::new(
            BorderId(0),
            Side::Left,
            ShapeKind::Vertical,
            Coordinate::new(1, 4),
            Coordinate::new(1, 2),
            BorderPartThickness::UNIT,
            style.left,
            style.color,
        );
        assert!(reversed.is_err());
    }

    #[test]
    fn grid_positions_lie_on_the_part() {
        for p in [
            part(ShapeKind::Horizontal, (2, 3), (5, 3)),
            part(ShapeKind::Vertical, (1, 0), (1, 4)),
        ] {
            let positions = p.grid_positions();
            assert!(positions.iter().all(|&c| p.contains_coordinate(c)));
            assert_eq!(positions.first(), Some(&p.start()));
            assert_eq!(positions.last(), Some(&p.end()));
        }

        let h = part(ShapeKind::Horizontal, (2, 3), (5, 3));
        assert!(!h.contains_coordinate(Coordinate::new(1, 3)));
        assert!(!h.contains_coordinate(Coordinate::new(6, 3)));
        assert!(!h.contains_coordinate(Coordinate::new(3, 4)));
    }

    #[test]
    fn crossing_parts_collide_once() {
        let h = part(ShapeKind::Horizontal, (0, 2), (4, 2));
        let v = part(ShapeKind::Vertical, (3, 0), (3, 4));
        assert_eq!(h.collision_position_with(&v), Some(Coordinate::new(3, 2)));
        assert_eq!(v.collision_positions_with(&h), vec![Coordinate::new(3, 2)]);

        let far = part(ShapeKind::Vertical, (6, 0), (6, 4));
        assert_eq!(h.collision_position_with(&far), None);
        assert!(h.collision_positions_with(&far).is_empty());
    }

    #[test]
    fn collinear_overlap_keeps_run_ends() {
        let a = part(ShapeKind::Horizontal, (0, 1), (6, 1));
        let b = part(ShapeKind::Horizontal, (2, 1), (4, 1));
        assert_eq!(a.collision_position_with(&b), Some(Coordinate::new(2, 1)));
        assert_eq!(
            a.collision_positions_with(&b),
            vec![Coordinate::new(2, 1), Coordinate::new(4, 1)]
        );
    }

    #[test]
    fn directions_and_positions_along_part() {
        let v = part(ShapeKind::Vertical, (2, 0), (2, 3));
        assert_eq!(
            v.directions_at(Coordinate::new(2, 1)),
            CollisionDirection::TOP | CollisionDirection::BOTTOM
        );
        assert_eq!(v.directions_at(Coordinate::new(2, 0)), CollisionDirection::BOTTOM);
        assert_eq!(v.position_of(Coordinate::new(2, 0)), PartPosition::Start);
        assert_eq!(v.position_of(Coordinate::new(2, 3)), PartPosition::End);
        assert_eq!(v.position_of(Coordinate::new(2, 2)), PartPosition::Center);
    }
}
