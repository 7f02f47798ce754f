//! Logical keys and the input device the typewriter polls once per tick.

use bitflags::bitflags;

bitflags! {
    /// A set of logical keys.
    ///
    /// The typewriter only cares about two of them (resume and skip); a key
    /// binding may map several physical keys onto one logical key, and a
    /// configured key may itself be a set ("A or START").
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Keys: u16 {
        /// Primary action (default resume key).
        const A = 1 << 0;
        /// Secondary action (default skip key).
        const B = 1 << 1;
        /// Select.
        const SELECT = 1 << 2;
        /// Start.
        const START = 1 << 3;
        /// Right.
        const RIGHT = 1 << 4;
        /// Left.
        const LEFT = 1 << 5;
        /// Up.
        const UP = 1 << 6;
        /// Down.
        const DOWN = 1 << 7;
        /// Right shoulder.
        const R = 1 << 8;
        /// Left shoulder.
        const L = 1 << 9;
    }
}

impl std::fmt::Debug for Keys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Source of "was this key pressed since the last poll" answers.
pub trait InputDevice {
    /// Returns `true` if any key of `keys` was pressed during the current frame.
    fn pressed(&self, keys: Keys) -> bool;
}

/// Frame-scoped key state.
///
/// Feed it presses as they arrive, hand it to the typewriter, then call
/// [`KeyLatch::end_frame`] so a press is only seen for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyLatch {
    pressed: Keys,
}

impl KeyLatch {
    /// Create a latch with nothing pressed.
    pub const fn new() -> Self {
        Self {
            pressed: Keys::empty(),
        }
    }

    /// Record a key press for this frame.
    pub fn press(&mut self, keys: Keys) {
        self.pressed |= keys;
    }

    /// Forget this frame's presses.
    pub fn end_frame(&mut self) {
        self.pressed = Keys::empty();
    }

    /// Keys pressed this frame.
    pub const fn keys(&self) -> Keys {
        self.pressed
    }
}

impl InputDevice for KeyLatch {
    fn pressed(&self, keys: Keys) -> bool {
        self.pressed.intersects(keys)
    }
}

/// An input device on which nothing is ever pressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputDevice for NoInput {
    fn pressed(&self, _keys: Keys) -> bool {
        false
    }
}
