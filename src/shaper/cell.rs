//! `CellShaper`: reference shaper for monospace terminal cells.
//!
//! Widths are terminal columns as reported by `unicode-width`; positions are
//! column/row coordinates. Like a sprite text generator, a fragment made only
//! of whitespace produces no unit.

use super::{Alignment, CapacityError, GlyphShaper, Point, Unit, Units};
use crate::style::TextStyle;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Columns a tab occupies.
const TAB_WIDTH: i32 = 4;

/// Default widest chunk, in columns.
pub const DEFAULT_MAX_CHUNK_WIDTH: i32 = 32;

/// A run of text placed on the terminal grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// The text of the run.
    pub text: String,
    /// Top-left cell of the run.
    pub position: Point,
    /// Width in columns.
    pub width: i32,
    /// Style the run was rendered with.
    pub style: TextStyle,
}

impl Unit for Glyph {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// Shaper for monospace terminal output.
#[derive(Debug, Clone)]
pub struct CellShaper {
    alignment: Alignment,
    max_chunk_width: i32,
    default_style: TextStyle,
}

impl CellShaper {
    /// Create a left-aligned shaper with default settings.
    pub fn new() -> Self {
        Self {
            alignment: Alignment::Left,
            max_chunk_width: DEFAULT_MAX_CHUNK_WIDTH,
            default_style: TextStyle::default(),
        }
    }

    /// Set the alignment used by runs started from now on.
    pub const fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    /// Builder form of [`CellShaper::set_alignment`].
    #[must_use]
    pub const fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the widest chunk a glyph may hold.
    #[must_use]
    pub fn with_max_chunk_width(mut self, columns: i32) -> Self {
        assert!(columns > 0, "Invalid max chunk width: {columns}");
        self.max_chunk_width = columns;
        self
    }

    /// Set the style used when no styles are configured.
    #[must_use]
    pub const fn with_default_style(mut self, style: TextStyle) -> Self {
        self.default_style = style;
        self
    }

    fn grapheme_width(grapheme: &str) -> i32 {
        if grapheme == "\t" {
            TAB_WIDTH
        } else {
            i32::try_from(UnicodeWidthStr::width(grapheme)).unwrap_or(i32::MAX)
        }
    }
}

impl Default for CellShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphShaper for CellShaper {
    type Style = TextStyle;
    type Unit = Glyph;

    fn default_style(&self) -> TextStyle {
        self.default_style
    }

    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn max_chunk_width(&self) -> i32 {
        self.max_chunk_width
    }

    fn measure(&self, text: &str) -> i32 {
        text.graphemes(true)
            .map(Self::grapheme_width)
            .fold(0, i32::saturating_add)
    }

    fn render(
        &self,
        text: &str,
        top_left: Point,
        style: &TextStyle,
        output: &mut Units<Glyph>,
    ) -> Result<(), CapacityError> {
        if text.chars().all(char::is_whitespace) {
            return Ok(());
        }
        output.push(Glyph {
            text: text.to_owned(),
            position: top_left,
            width: self.measure(text),
            style: *style,
        })
    }
}
