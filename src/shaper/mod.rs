//! Shaper module: the glyph-shaping collaborator and the units it produces.
//!
//! The typewriter never rasterizes. It asks a [`GlyphShaper`] two things:
//! how wide a short fragment of text is, and to render that fragment at a
//! top-left position with a style, appending the produced [`Unit`]s to a
//! caller-owned [`Units`] collection.
//!
//! [`CellShaper`] is the reference implementation for monospace terminals.

mod cell;
mod units;

pub use cell::{CellShaper, Glyph};
pub use units::{CapacityError, Units};

/// A position in shaper space (pixels, or cells for [`CellShaper`]).
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Horizontal alignment of each line relative to the run's origin.
///
/// - `Left`: the origin is the left edge of every line.
/// - `Center`: the origin is the horizontal center of every line.
/// - `Right`: the origin is the right edge of every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Lines grow to the right of the origin.
    #[default]
    Left,
    /// Lines are centered on the origin.
    Center,
    /// Lines grow to the left of the origin.
    Right,
}

/// A rendered, positioned piece of output.
///
/// Units already on screen are moved when a center- or right-aligned line
/// grows, so the typewriter needs to rewrite their position.
pub trait Unit {
    /// Top-left position of the unit.
    fn position(&self) -> Point;

    /// Move the unit.
    fn set_position(&mut self, position: Point);
}

/// Measures and renders short literal text fragments.
pub trait GlyphShaper {
    /// Style selected by style-change codes.
    type Style;
    /// What [`GlyphShaper::render`] produces.
    type Unit: Unit;

    /// Style used when the typewriter is configured without any.
    fn default_style(&self) -> Self::Style;

    /// Alignment the typewriter lays lines out with.
    ///
    /// Read once when a run starts.
    fn alignment(&self) -> Alignment;

    /// Widest fragment a single unit can hold.
    fn max_chunk_width(&self) -> i32;

    /// Width of `text` when rendered as one fragment.
    ///
    /// Not necessarily the sum of the widths of its graphemes.
    fn measure(&self, text: &str) -> i32;

    /// Render `text` with its top-left corner at `top_left`, appending zero
    /// or more units to `output`.
    fn render(
        &self,
        text: &str,
        top_left: Point,
        style: &Self::Style,
        output: &mut Units<Self::Unit>,
    ) -> Result<(), CapacityError>;
}
