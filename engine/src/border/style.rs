//! Glyphs, colors and thicknesses a border paints its parts with.

use std::fmt;

use bitflags::bitflags;

use crate::geometry::BorderPartThickness;
use crate::raster::{Color, WHITE};

bitflags! {
    /// Which orthogonal neighbours of a collision point belong to the colliding part.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionDirection: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl fmt::Display for CollisionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        f.write_str(&names.join("|").to_ascii_lowercase())
    }
}

/// Where along a part a point sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartPosition {
    Start,
    Center,
    End,
}

impl PartPosition {
    pub fn name(self) -> &'static str {
        match self {
            PartPosition::Start => "start",
            PartPosition::Center => "center",
            PartPosition::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionSymbolDefinition {
    pub symbol: char,
    pub directions: CollisionDirection,
    pub position: PartPosition,
}

impl CollisionSymbolDefinition {
    pub const fn new(symbol: char, directions: CollisionDirection, position: PartPosition) -> Self {
        Self {
            symbol,
            directions,
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderSymbolDefinition {
    pub start: char,
    pub center: char,
    pub end: char,
    pub collisions: Vec<CollisionSymbolDefinition>,
}

impl BorderSymbolDefinition {
    pub fn new(start: char, center: char, end: char) -> Self {
        Self {
            start,
            center,
            end,
            collisions: Vec::new(),
        }
    }

    pub fn with_collision(
        mut self,
        symbol: char,
        directions: CollisionDirection,
        position: PartPosition,
    ) -> Self {
        self.collisions
            .push(CollisionSymbolDefinition::new(symbol, directions, position));
        self
    }

    pub fn symbol_at(&self, position: PartPosition) -> char {
        match position {
            PartPosition::Start => self.start,
            PartPosition::Center => self.center,
            PartPosition::End => self.end,
        }
    }

    /// First collision glyph whose position and direction set match exactly.
    pub fn collision_symbol(
        &self,
        position: PartPosition,
        directions: CollisionDirection,
    ) -> Option<char> {
        self.collisions
            .iter()
            .find(|d| d.position == position && d.directions == directions)
            .map(|d| d.symbol)
    }
}

/// Which side of its border a part realizes; picks the symbol definition for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderStyle {
    pub top: BorderSymbolDefinition,
    pub bottom: BorderSymbolDefinition,
    pub left: BorderSymbolDefinition,
    pub right: BorderSymbolDefinition,
    pub color: Color,
    pub thickness: BorderPartThickness,
}

impl BorderStyle {
    /// Same definition for both horizontal sides and for both vertical sides.
    pub fn lines(horizontal: BorderSymbolDefinition, vertical: BorderSymbolDefinition) -> Self {
        Self {
            top: horizontal.clone(),
            bottom: horizontal,
            left: vertical.clone(),
            right: vertical,
            color: WHITE,
            thickness: BorderPartThickness::UNIT,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_thickness(mut self, thickness: BorderPartThickness) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn symbols(&self, side: Side) -> &BorderSymbolDefinition {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Double-lined board frame.
    pub fn outer_frame() -> Self {
        use CollisionDirection as D;
        use PartPosition as P;

        Self {
            top: BorderSymbolDefinition::new('╔', '═', '╗')
                .with_collision('╔', D::BOTTOM, P::Start)
                .with_collision('╤', D::BOTTOM, P::Center)
                .with_collision('╗', D::BOTTOM, P::End),
            bottom: BorderSymbolDefinition::new('╚', '═', '╝')
                .with_collision('╚', D::TOP, P::Start)
                .with_collision('╧', D::TOP, P::Center)
                .with_collision('╝', D::TOP, P::End),
            left: BorderSymbolDefinition::new('╔', '║', '╚')
                .with_collision('╔', D::RIGHT, P::Start)
                .with_collision('╟', D::RIGHT, P::Center)
                .with_collision('╚', D::RIGHT, P::End),
            right: BorderSymbolDefinition::new('╗', '║', '╝')
                .with_collision('╗', D::LEFT, P::Start)
                .with_collision('╢', D::LEFT, P::Center)
                .with_collision('╝', D::LEFT, P::End),
            color: WHITE,
            thickness: BorderPartThickness::UNIT,
        }
    }

    /// Dashed box around a selected area.
    pub fn selection_area() -> Self {
        use CollisionDirection as D;
        use PartPosition as P;

        Self {
            top: BorderSymbolDefinition::new('┏', '╍', '┓')
                .with_collision('┏', D::BOTTOM, P::Start)
                .with_collision('╤', D::BOTTOM, P::Center)
                .with_collision('┓', D::BOTTOM, P::End),
            bottom: BorderSymbolDefinition::new('┗', '╍', '┛')
                .with_collision('┗', D::TOP, P::Start)
                .with_collision('╧', D::TOP, P::Center)
                .with_collision('┛', D::TOP, P::End),
            left: BorderSymbolDefinition::new('┏', '┋', '┗')
                .with_collision('┏', D::RIGHT, P::Start)
                .with_collision('╟', D::RIGHT, P::Center)
                .with_collision('┗', D::RIGHT, P::End),
            right: BorderSymbolDefinition::new('┓', '┋', '┛')
                .with_collision('┓', D::LEFT, P::Start)
                .with_collision('╢', D::LEFT, P::Center)
                .with_collision('┛', D::LEFT, P::End),
            color: [255, 200, 0, 255],
            thickness: BorderPartThickness::UNIT,
        }
    }

    /// Thin crosshair lines through a highlighted cell.
    pub fn highlight_field() -> Self {
        Self::lines(thin_horizontal(), thin_vertical()).with_color([255, 64, 64, 255])
    }

    /// Thin lines between every pair of adjacent cells.
    pub fn background_grid() -> Self {
        Self::lines(thin_horizontal(), thin_vertical()).with_color([96, 96, 96, 255])
    }
}

fn thin_horizontal() -> BorderSymbolDefinition {
    use CollisionDirection as D;
    use PartPosition as P;

    BorderSymbolDefinition::new('─', '─', '─')
        .with_collision('╟', D::TOP | D::BOTTOM, P::Start)
        .with_collision('┼', D::TOP | D::BOTTOM, P::Center)
        .with_collision('╢', D::TOP | D::BOTTOM, P::End)
}

fn thin_vertical() -> BorderSymbolDefinition {
    use CollisionDirection as D;
    use PartPosition as P;

    BorderSymbolDefinition::new('│', '│', '│')
        .with_collision('╤', D::LEFT | D::RIGHT, P::Start)
        .with_collision('┼', D::LEFT | D::RIGHT, P::Center)
        .with_collision('╧', D::LEFT | D::RIGHT, P::End)
}
