//! Control-code classifier: maps one grapheme to a directive or to literal text.
//!
//! Dialogue text embeds its directives as reserved code points, so authors can
//! write them inline:
//!
//! | Glyph(s)                   | Code point(s)        | Directive                  |
//! |----------------------------|----------------------|----------------------------|
//! | `\n`                       | U+000A               | [`ControlCode::Newline`]   |
//! | `⏯`                        | U+23EF               | [`ControlCode::ManualPause`] |
//! | `⓵` .. `⓾`                 | U+24F5 ..= U+24FE    | `TimedPause(1..=10)`       |
//! | `⓿`, `❶` .. `❿`            | U+24FF, U+2776 ..    | `StyleChange(0..=10)`      |
//! | `🄌`, `➊` .. `➓`            | U+1F10C, U+278A ..   | `StyleChange(0..=10)`      |
//! | `⓪`, `①` .. `⑩`            | U+24EA, U+2460 ..    | `DelegateCall(0..=10)`     |
//! | `🄋`, `➀` .. `➉`            | U+1F10B, U+2780 ..   | `DelegateCall(0..=10)`     |
//!
//! Style and delegate codes come in two families each; both collapse to the
//! same 0-based index here and nothing downstream sees the difference.

use crate::typewriter::{MAX_DELEGATES, MAX_STYLES};

/// One classified grapheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCode<'t> {
    /// Text to render as-is (including spaces and tabs).
    Literal(&'t str),
    /// Hard line break.
    Newline,
    /// Wait for the resume key.
    ManualPause,
    /// Wait for `n` steps (`1..=10`).
    TimedPause(u8),
    /// Switch to the style at this index.
    StyleChange(usize),
    /// Invoke the delegate at this index.
    DelegateCall(usize),
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    ManualPause,
    TimedPause,
    Style,
    Delegate,
}

/// A contiguous run of reserved code points; `first` maps to `base`.
struct Reserved {
    first: u32,
    last: u32,
    kind: Kind,
    base: usize,
}

impl Reserved {
    const fn single(cp: u32, kind: Kind, index: usize) -> Self {
        Self::run(cp, cp, kind, index)
    }

    const fn run(first: u32, last: u32, kind: Kind, base: usize) -> Self {
        Self { first, last, kind, base }
    }

    const fn top_index(&self) -> usize {
        self.base + (self.last - self.first) as usize
    }
}

const RESERVED: [Reserved; 10] = [
    Reserved::single(0x23EF, Kind::ManualPause, 0),
    Reserved::run(0x24F5, 0x24FE, Kind::TimedPause, 1),
    Reserved::single(0x24FF, Kind::Style, 0),
    Reserved::run(0x2776, 0x277F, Kind::Style, 1),
    Reserved::single(0x1F10C, Kind::Style, 0),
    Reserved::run(0x278A, 0x2793, Kind::Style, 1),
    Reserved::single(0x24EA, Kind::Delegate, 0),
    Reserved::run(0x2460, 0x2469, Kind::Delegate, 1),
    Reserved::single(0x1F10B, Kind::Delegate, 0),
    Reserved::run(0x2780, 0x2789, Kind::Delegate, 1),
];

const fn max_index(kind: Kind) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < RESERVED.len() {
        let r = &RESERVED[i];
        if r.kind as u8 == kind as u8 && r.top_index() > max {
            max = r.top_index();
        }
        i += 1;
    }
    max
}

const fn runs_are_disjoint() -> bool {
    let mut i = 0;
    while i < RESERVED.len() {
        let mut j = i + 1;
        while j < RESERVED.len() {
            let (a, b) = (&RESERVED[i], &RESERVED[j]);
            if a.first <= b.last && b.first <= a.last {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(runs_are_disjoint(), "reserved code point runs overlap");
const _: () = assert!(max_index(Kind::Style) < MAX_STYLES, "style run exceeds MAX_STYLES");
const _: () = assert!(max_index(Kind::Delegate) < MAX_DELEGATES, "delegate run exceeds MAX_DELEGATES");
const _: () = assert!(max_index(Kind::TimedPause) <= u8::MAX as usize);

fn lookup(ch: char) -> Option<(Kind, usize)> {
    let cp = u32::from(ch);
    RESERVED
        .iter()
        .find(|r| r.first <= cp && cp <= r.last)
        .map(|r| (r.kind, r.base + (cp - r.first) as usize))
}

/// Classify a single grapheme.
///
/// The grapheme is classified by its first scalar value, so a reserved
/// character carrying a variation selector (`"⏯\u{FE0F}"`) is still a
/// control code.
#[allow(clippy::cast_possible_truncation)]
pub fn classify(grapheme: &str) -> ControlCode<'_> {
    if grapheme == "\n" || grapheme == "\r\n" {
        return ControlCode::Newline;
    }
    let Some(first) = grapheme.chars().next() else {
        return ControlCode::Literal(grapheme);
    };
    match lookup(first) {
        None => ControlCode::Literal(grapheme),
        Some((Kind::ManualPause, _)) => ControlCode::ManualPause,
        // Bounded by the const assertion above.
        Some((Kind::TimedPause, n)) => ControlCode::TimedPause(n as u8),
        Some((Kind::Style, index)) => ControlCode::StyleChange(index),
        Some((Kind::Delegate, index)) => ControlCode::DelegateCall(index),
    }
}

/// Whether a grapheme separates words.
#[inline]
pub fn is_whitespace(grapheme: &str) -> bool {
    matches!(grapheme, " " | "\t" | "\n" | "\r\n")
}

/// Whether a grapheme is one of the reserved directive characters.
///
/// Newlines are not reported here; they are whitespace.
#[inline]
pub fn is_control(grapheme: &str) -> bool {
    grapheme.chars().next().is_some_and(|ch| lookup(ch).is_some())
}
