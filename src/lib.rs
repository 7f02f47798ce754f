//! # Typewriter
//!
//! A tick-driven text reveal engine for dialogue boxes.
//!
//! Text is revealed a grapheme at a time, one step every few frames, and
//! laid out as it goes: words wrap, long lines split into chunks, pages
//! fill up and wait for a key press. Directives are written inline as
//! reserved Unicode characters, so authors can pause, change style or call
//! back into the game from inside the text itself.
//!
//! ## Core Concepts
//!
//! - **Glyph shaper**: the renderer collaborator. It measures text and
//!   renders chunks into caller-owned [`Units`]; [`CellShaper`] targets
//!   monospace terminals.
//! - **Chunks**: consecutive graphemes sharing a style merge into one unit,
//!   re-rendered as they grow.
//! - **Reflow**: centered and right-aligned lines shift their units while
//!   they grow, so each line stays aligned on screen.
//! - **States**: typing, manually paused, skipping and done, switched only
//!   between ticks.
//!
//! ## Example
//!
//! ```rust
//! use typewriter::{CellShaper, NoInput, Point, RunOptions, Silent, Typewriter, TypewriterConfig, Units};
//!
//! let shaper = CellShaper::new();
//! let mut writer: Typewriter<'_, CellShaper> =
//!     Typewriter::new(&shaper, TypewriterConfig::default()).unwrap();
//! let mut units = Units::with_limit(64);
//!
//! writer.start(Point::new(2.0, 1.0), "Hello⏯ world!", &mut units, RunOptions::default());
//! while !writer.done() {
//!     if writer.paused() {
//!         writer.resume();
//!     }
//!     writer.update(&mut units, &NoInput, &mut Silent);
//! }
//! assert_eq!(units[0].text, "Hello world!");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod audio;
pub mod control;
pub mod keys;
pub mod layout;
pub mod shaper;
pub mod style;
pub mod terminal;
pub mod typewriter;

// Re-exports for convenience
pub use audio::{AudioDevice, Silent, SoundHandle};
pub use control::{classify, ControlCode};
pub use keys::{InputDevice, KeyLatch, Keys, NoInput};
pub use shaper::{Alignment, CapacityError, CellShaper, Glyph, GlyphShaper, Point, Unit, Units};
pub use style::{Modifiers, Rgb, TextStyle};
pub use terminal::{KeyBindings, OutputBuffer};
pub use typewriter::{
    ConfigError, Delegate, RunOptions, State, Typewriter, TypewriterConfig, MAX_DELEGATES,
    MAX_STYLES,
};
