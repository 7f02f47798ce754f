//! Terminal module: crossterm front end for [`CellShaper`](crate::CellShaper) output.
//!
//! - [`KeyBindings`] turns terminal key events into logical [`Keys`](crate::Keys).
//! - [`OutputBuffer`] paints [`Glyph`](crate::Glyph) runs as ANSI sequences.

mod input;
mod output;

pub use input::KeyBindings;
pub use output::OutputBuffer;
