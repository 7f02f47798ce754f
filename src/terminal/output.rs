//! `OutputBuffer`: Single-syscall output buffer for painting glyph runs.

use crate::shaper::Glyph;
use crate::style::{Modifiers, Rgb, TextStyle};
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// A frame is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Move cursor to (x, y) position (1-indexed for ANSI).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H. Writing into a Vec cannot fail.
        write!(self.data, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1).ok();
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Set foreground color (true color).
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        // Writing into a Vec cannot fail.
        write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b).ok();
    }

    /// Turn on the SGR attributes of `modifiers`.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        const SGR: [(Modifiers, &[u8]); 5] = [
            (Modifiers::BOLD, b"\x1b[1m"),
            (Modifiers::DIM, b"\x1b[2m"),
            (Modifiers::ITALIC, b"\x1b[3m"),
            (Modifiers::UNDERLINE, b"\x1b[4m"),
            (Modifiers::REVERSED, b"\x1b[7m"),
        ];
        for (flag, seq) in SGR {
            if modifiers.contains(flag) {
                self.data.extend_from_slice(seq);
            }
        }
    }

    /// Reset all attributes, then apply `style`.
    pub fn set_style(&mut self, style: TextStyle) {
        self.reset_attrs();
        self.set_fg(style.fg);
        self.set_modifiers(style.modifiers);
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Paint glyph runs at their positions.
    ///
    /// Positions are rounded to the nearest cell. Runs starting left of or
    /// above the screen are skipped.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn paint<'g>(&mut self, glyphs: impl IntoIterator<Item = &'g Glyph>) {
        let mut style = None;
        for glyph in glyphs {
            let x = glyph.position.x.round();
            let y = glyph.position.y.round();
            if x < 0.0 || y < 0.0 || x > f32::from(u16::MAX) || y > f32::from(u16::MAX) {
                continue;
            }
            if style != Some(glyph.style) {
                self.set_style(glyph.style);
                style = Some(glyph.style);
            }
            self.cursor_move(x as u16, y as u16);
            self.write_str(&glyph.text);
        }
        if style.is_some() {
            self.reset_attrs();
        }
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
