//! Layout module: incremental chunk and line layout.
//!
//! Nothing is laid out in advance. Literal graphemes are merged into a
//! pending *chunk* (one unit's worth of text), the chunk is re-measured
//! after every append, and lines and pages are discovered as text arrives.
//!
//! # Reflow
//!
//! Units are placed left to right while a line is still growing, but a
//! centered or right-aligned line only knows its final width once its last
//! chunk is in. Every time the line grows, the already committed units of
//! the line are shifted by the change in line width (half of it for
//! center alignment). This is the one place where units that were already
//! handed to the caller are modified: the range
//! `first_unit_of_line..unit_index` of the output collection.
//!
//! # Pages
//!
//! A line break past `max_lines` does not move the layout; the page is
//! *overflowed* and stays frozen until [`LineLayout::wipe`] clears it.

mod wrap;

pub use wrap::{word_width, wraps_before};

use crate::control::is_whitespace;
use crate::shaper::{Alignment, CapacityError, GlyphShaper, Point, Unit, Units};

/// Byte capacity of the pending chunk.
pub const CHUNK_CAPACITY: usize = 256;

/// Per-run layout constraints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutLimits {
    /// Widest a line may get.
    pub max_line_width: i32,
    /// Widest a chunk may get (shaper ceiling).
    pub max_chunk_width: i32,
    /// Vertical distance between lines.
    pub line_spacing: f32,
    /// Lines per page.
    pub max_lines: usize,
}

/// Where the next grapheme has to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Break {
    /// Into the pending chunk.
    None,
    /// Into a fresh chunk on the same line.
    Chunk,
    /// Onto the next line.
    Line,
}

/// Whether an appended grapheme is rendered right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// Replace the chunk's unit with a freshly rendered one.
    Now,
    /// Only update the accumulators; the chunk is rendered when it is settled.
    Deferred,
}

/// Layout state of one typewriter run.
#[derive(Debug, Clone, Default)]
pub struct LineLayout {
    origin: Point,
    alignment: Alignment,
    limits: LayoutLimits,

    chunk: heapless::String<CHUNK_CAPACITY>,
    chunk_width: i32,
    line_width: i32,
    line_index: usize,
    line_y: f32,
    initial_unit_index: usize,
    first_unit_of_line: usize,
    unit_index: usize,
    prev_whitespace: bool,
}

impl LineLayout {
    /// Start laying out at `origin`; units before `first_unit` are not ours.
    pub fn new(origin: Point, alignment: Alignment, limits: LayoutLimits, first_unit: usize) -> Self {
        Self {
            origin,
            alignment,
            limits,
            chunk: heapless::String::new(),
            chunk_width: 0,
            line_width: 0,
            line_index: 0,
            line_y: origin.y,
            initial_unit_index: first_unit,
            first_unit_of_line: first_unit,
            unit_index: first_unit,
            prev_whitespace: true,
        }
    }

    /// Alignment of this run.
    #[inline]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Layout constraints of this run.
    #[inline]
    pub const fn limits(&self) -> &LayoutLimits {
        &self.limits
    }

    /// Pending chunk text.
    #[inline]
    pub fn chunk(&self) -> &str {
        &self.chunk
    }

    /// Width of the pending chunk.
    #[inline]
    pub const fn chunk_width(&self) -> i32 {
        self.chunk_width
    }

    /// Width of the current line, pending chunk included.
    #[inline]
    pub const fn line_width(&self) -> i32 {
        self.line_width
    }

    /// 0-based line number on the current page.
    #[inline]
    pub const fn line_index(&self) -> usize {
        self.line_index
    }

    /// Index of the first unit of the current line.
    #[inline]
    pub const fn first_unit_of_line(&self) -> usize {
        self.first_unit_of_line
    }

    /// One past the last committed unit.
    #[inline]
    pub const fn unit_index(&self) -> usize {
        self.unit_index
    }

    /// Whether the last appended grapheme was whitespace.
    #[inline]
    pub const fn prev_whitespace(&self) -> bool {
        self.prev_whitespace
    }

    /// Whether the page ran out of lines.
    #[inline]
    pub const fn overflowed(&self) -> bool {
        self.line_index >= self.limits.max_lines
    }

    /// Decide where `grapheme` goes without changing anything.
    ///
    /// `wraps` is the word-wrap verdict for this grapheme. Breaking is only
    /// considered when it makes progress: a line break needs a non-empty
    /// line, a chunk break a non-empty chunk.
    pub fn fit<S: GlyphShaper>(&mut self, shaper: &S, grapheme: &str, wraps: bool) -> Break {
        let len = self.chunk.len();
        let (chunk_overflow, width) = if self.chunk.push_str(grapheme).is_ok() {
            let width = shaper.measure(&self.chunk);
            self.chunk.truncate(len);
            (width > self.limits.max_chunk_width, width)
        } else {
            (true, self.chunk_width)
        };

        let line_overflow =
            self.line_width - self.chunk_width + width > self.limits.max_line_width;

        if (wraps || line_overflow) && self.line_width > 0 {
            Break::Line
        } else if chunk_overflow && !self.chunk.is_empty() {
            Break::Chunk
        } else {
            Break::None
        }
    }

    /// Merge `grapheme` into the pending chunk.
    ///
    /// Returns `Ok(false)` if the grapheme alone does not fit the chunk
    /// buffer; it is then dropped.
    pub fn append<S: GlyphShaper>(
        &mut self,
        shaper: &S,
        grapheme: &str,
        style: &S::Style,
        output: &mut Units<S::Unit>,
        reveal: Reveal,
    ) -> Result<bool, CapacityError> {
        if self.chunk.push_str(grapheme).is_err() {
            return Ok(false);
        }
        let chunk_width = shaper.measure(&self.chunk);
        let prev_line_width = self.line_width;

        if reveal == Reveal::Now {
            output.truncate(self.unit_index);
        }
        self.line_width = self.line_width - self.chunk_width + chunk_width;
        self.chunk_width = chunk_width;
        self.reflow(output, prev_line_width);
        self.prev_whitespace = is_whitespace(grapheme);

        if reveal == Reveal::Now {
            self.render_chunk(shaper, style, output)?;
        }
        Ok(true)
    }

    /// Render the pending chunk at its place on the current line.
    pub fn render_chunk<S: GlyphShaper>(
        &self,
        shaper: &S,
        style: &S::Style,
        output: &mut Units<S::Unit>,
    ) -> Result<(), CapacityError> {
        if self.chunk.is_empty() {
            return Ok(());
        }
        let before = (self.line_width - self.chunk_width) as f32;
        let width = self.chunk_width as f32;
        let x = match self.alignment {
            Alignment::Left => self.origin.x + before,
            Alignment::Center => self.origin.x + (before + width) / 2.0 - width,
            Alignment::Right => self.origin.x - width,
        };
        shaper.render(&self.chunk, Point::new(x, self.line_y), style, output)
    }

    /// Shift the committed units of the current line after it changed width.
    pub fn reflow<U: Unit>(&self, output: &mut Units<U>, prev_line_width: i32) {
        if prev_line_width == self.line_width {
            return;
        }
        let diff = (prev_line_width - self.line_width) as f32;
        let dx = match self.alignment {
            Alignment::Left => return,
            Alignment::Center => diff / 2.0,
            Alignment::Right => diff,
        };
        for unit in output.range_mut(self.first_unit_of_line..self.unit_index) {
            let mut position = unit.position();
            position.x += dx;
            unit.set_position(position);
        }
    }

    /// Seal the pending chunk: everything up to `output_len` is committed.
    pub fn commit_chunk(&mut self, output_len: usize) {
        self.unit_index = output_len;
        self.chunk.clear();
        self.chunk_width = 0;
    }

    /// Move to the next line. The chunk must already be committed.
    pub fn newline(&mut self) {
        debug_assert!(self.chunk.is_empty(), "newline with a pending chunk");
        self.line_index += 1;
        self.prev_whitespace = true;
        if self.overflowed() {
            return;
        }
        self.line_y += self.limits.line_spacing;
        self.line_width = 0;
        self.first_unit_of_line = self.unit_index;
    }

    /// Remove every unit of the page and go back to the origin.
    pub fn wipe<U>(&mut self, output: &mut Units<U>) {
        output.truncate(self.initial_unit_index);
        *self = Self::new(self.origin, self.alignment, self.limits, self.initial_unit_index);
    }

    /// Where the next unit would start if it were rendered on this line.
    pub fn next_character_position(&self) -> Point {
        let width = self.line_width as f32;
        let dx = match self.alignment {
            Alignment::Left => width,
            Alignment::Center => width / 2.0,
            Alignment::Right => 0.0,
        };
        Point::new(self.origin.x + dx, self.line_y)
    }
}
