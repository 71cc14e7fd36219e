//! Error types for border composition and rendering.

use thiserror::Error;

use crate::border::BorderId;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Degenerate or out-of-range coordinates passed to a rectangle, part or thickness.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A shape asked an ancestor for bounds the ancestor's shape cannot provide.
    #[error("unsupported shape composition: {shape} needs {needs}")]
    UnsupportedShapeComposition {
        shape: &'static str,
        needs: &'static str,
    },

    /// A collision direction combination has no configured glyph.
    #[error("no collision symbol defined for {directions} at {position} position")]
    MissingSymbolDefinition {
        directions: String,
        position: &'static str,
    },

    /// A border handle that does not (or no longer) exist in the tree.
    #[error("unknown border {0:?}")]
    UnknownBorder(BorderId),

    #[error("canvas has no border grid; set one before rendering")]
    MissingBorderGrid,

    #[error("canvas was laid out for field size {expected}, asked to render {actual}")]
    FieldSizeMismatch { expected: u32, actual: u32 },

    #[error("png encoding failed: {0}")]
    PngEncoding(#[from] png::EncodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
