//! Word-wrap look-ahead.
//!
//! Layout is discovered while typing, so the only way to avoid breaking a
//! word halfway is to measure it before its first grapheme is revealed.

use crate::control::{is_control, is_whitespace};
use crate::shaper::GlyphShaper;
use unicode_segmentation::UnicodeSegmentation;

/// Width of the word starting at the beginning of `rest`.
///
/// The word ends at the first whitespace or at the end of the text. Control
/// codes inside the word take no room and do not end it.
pub fn word_width<S: GlyphShaper>(shaper: &S, rest: &str) -> i32 {
    rest.graphemes(true)
        .take_while(|g| !is_whitespace(g))
        .filter(|g| !is_control(g))
        .map(|g| shaper.measure(g))
        .fold(0, i32::saturating_add)
}

/// Whether the word starting at `rest` should move to a new line.
///
/// Only checked at word starts: `prev_whitespace` must be set and the first
/// grapheme of `rest` must not be whitespace. A word wider than the whole
/// line never wraps here; it is split by the per-line overflow check
/// instead, so it cannot bounce between lines forever.
pub fn wraps_before<S: GlyphShaper>(
    shaper: &S,
    rest: &str,
    prev_whitespace: bool,
    line_width: i32,
    max_line_width: i32,
) -> bool {
    if !prev_whitespace {
        return false;
    }
    match rest.graphemes(true).next() {
        Some(first) if !is_whitespace(first) => {}
        _ => return false,
    }

    let width = word_width(shaper, rest);
    width <= max_line_width && line_width.saturating_add(width) > max_line_width
}
