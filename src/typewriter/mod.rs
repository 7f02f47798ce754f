//! Typewriter: reveals styled text one step per tick.
//!
//! A [`Typewriter`] is built once per text box and reused for many runs.
//! Each [`Typewriter::start`] takes the text, the caller-owned output
//! collection and the per-run options; each [`Typewriter::update`] is one
//! frame.
//!
//! # Example
//!
//! ```
//! use typewriter::{CellShaper, KeyLatch, Point, RunOptions, Silent, Typewriter, TypewriterConfig, Units};
//!
//! let shaper = CellShaper::new();
//! let mut writer: Typewriter<'_, CellShaper> =
//!     Typewriter::new(&shaper, TypewriterConfig::default()).unwrap();
//! let mut output = Units::unbounded();
//! let input = KeyLatch::new();
//!
//! writer.start(Point::new(0.0, 0.0), "Hi!", &mut output, RunOptions::default());
//! while !writer.done() {
//!     writer.update(&mut output, &input, &mut Silent);
//! }
//! assert_eq!(output[0].text, "Hi!");
//! ```

mod config;
mod state;

#[cfg(test)]
mod tests;

pub use config::{
    check_keys, ConfigError, Delegate, RunOptions, TypewriterConfig, MAX_DELEGATES, MAX_STYLES,
};
pub use state::{Skipping, State, Typing};

use crate::audio::{AudioDevice, Silent, SoundHandle};
use crate::keys::{InputDevice, Keys};
use crate::layout::{LayoutLimits, LineLayout};
use crate::shaper::{CapacityError, GlyphShaper, Point, Units};
use unicode_segmentation::UnicodeSegmentation;

/// Incrementally reveals annotated text through a [`GlyphShaper`].
pub struct Typewriter<'a, S: GlyphShaper, A: AudioDevice = Silent> {
    shaper: &'a S,
    styles: heapless::Vec<S::Style, MAX_STYLES>,
    delegates: heapless::Vec<Delegate<'a>, MAX_DELEGATES>,
    resume_key: Keys,
    skip_key: Keys,

    text: &'a str,
    cursor: usize,
    layout: LineLayout,
    wait_ticks: u32,
    style_index: usize,
    sound: Option<A::Sound>,
    sound_handle: Option<A::Handle>,
    paused: bool,
    failed: bool,

    state: State,
    requested: Option<State>,
}

impl<'a, S: GlyphShaper, A: AudioDevice> Typewriter<'a, S, A> {
    /// Create a typewriter rendering through `shaper`.
    ///
    /// The typewriter starts out done; call [`Typewriter::start`] to run it.
    pub fn new(shaper: &'a S, config: TypewriterConfig<'a, S::Style>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut styles: heapless::Vec<S::Style, MAX_STYLES> = config.styles.into_iter().collect();
        if styles.is_empty() {
            // Cannot fail: the list is empty.
            let _ = styles.push(shaper.default_style());
        }
        let delegates = config.delegates.into_iter().collect();

        Ok(Self {
            shaper,
            styles,
            delegates,
            resume_key: config.resume_key,
            skip_key: config.skip_key,
            text: "",
            cursor: 0,
            layout: LineLayout::default(),
            wait_ticks: 1,
            style_index: 0,
            sound: None,
            sound_handle: None,
            paused: false,
            failed: false,
            state: State::Done,
            requested: None,
        })
    }

    /// Start typewriting `text` at `origin`.
    ///
    /// `origin` is the top-left corner of the first line for left
    /// alignment, its top-center for center alignment and its top-right
    /// for right alignment. Units already in `output` are left alone; pass
    /// the same collection to every [`Typewriter::update`] of the run.
    ///
    /// The alignment is read from the shaper now and kept for the run.
    /// Empty text is done right away.
    ///
    /// # Panics
    ///
    /// Panics if `wait_ticks` or `max_lines` is zero.
    pub fn start(
        &mut self,
        origin: Point,
        text: &'a str,
        output: &mut Units<S::Unit>,
        options: RunOptions<A::Sound>,
    ) {
        assert!(options.wait_ticks > 0, "Invalid wait ticks: {}", options.wait_ticks);
        assert!(options.max_lines > 0, "Invalid max lines: {}", options.max_lines);

        self.stop_sound();

        let limits = LayoutLimits {
            max_line_width: options.max_line_width,
            max_chunk_width: self.shaper.max_chunk_width(),
            line_spacing: options.line_spacing,
            max_lines: options.max_lines,
        };
        self.layout = LineLayout::new(origin, self.shaper.alignment(), limits, output.len());
        self.text = text;
        self.cursor = 0;
        self.wait_ticks = options.wait_ticks;
        self.style_index = 0;
        self.sound = options.sound;
        self.paused = false;
        self.failed = false;
        self.state = if text.is_empty() {
            State::Done
        } else {
            State::Typing(Typing::default())
        };
        self.requested = None;

        log::debug!(
            "typewriter: start {} bytes at {origin:?}, {:?} aligned",
            text.len(),
            self.layout.alignment()
        );
    }

    /// Advance by one tick.
    ///
    /// # Panics
    ///
    /// Panics if the typewriter is done.
    pub fn update<I: InputDevice>(&mut self, output: &mut Units<S::Unit>, input: &I, audio: &mut A) {
        assert!(!self.done(), "Typewriting is done");

        self.apply_requested_state(output);

        let mut state = std::mem::replace(&mut self.state, State::Done);
        let revealed = match &mut state {
            State::Typing(typing) => self.update_typing(typing, output, input),
            State::ManuallyPaused => {
                self.update_paused(input);
                false
            }
            State::Skipping(skipping) => self.update_skipping(skipping, output),
            State::Done => false,
        };
        self.state = state;

        if revealed {
            self.play_write_sound(audio);
        }

        self.apply_requested_state(output);
    }

    /// Pause until [`Typewriter::resume`] or the resume key.
    ///
    /// Takes effect on the next update. Pausing while paused cancels any
    /// pending resume or skip.
    ///
    /// # Panics
    ///
    /// Panics if the typewriter is done.
    pub fn pause(&mut self) {
        assert!(!self.done(), "Typewriting is done");
        if self.paused {
            self.requested = None;
        } else {
            self.request(State::ManuallyPaused);
        }
    }

    /// Resume a paused typewriter.
    ///
    /// A pause requested since the last update is also accepted: it is
    /// cancelled instead, so `pause()` followed by `resume()` between two
    /// updates leaves the typewriter running.
    ///
    /// # Panics
    ///
    /// Panics if the typewriter is neither paused nor about to pause.
    pub fn resume(&mut self) {
        let pause_pending = self.requested == Some(State::ManuallyPaused);
        assert!(self.paused || pause_pending, "Typewriter is not paused");
        if self.paused {
            self.request(State::Typing(Typing::default()));
        } else {
            self.requested = None;
        }
    }

    /// Reveal the rest of the text as fast as possible.
    ///
    /// Manual and timed pauses are ignored; a full page still pauses.
    ///
    /// # Panics
    ///
    /// Panics if the typewriter is done.
    pub fn skip(&mut self) {
        assert!(!self.done(), "Typewriting is done");
        if !matches!(self.state, State::Skipping(_)) {
            self.request(State::skipping());
        }
    }

    /// Whether the typewriter waits for the resume key.
    #[inline]
    pub const fn paused(&self) -> bool {
        self.paused
    }

    /// Whether all text was revealed.
    #[inline]
    pub const fn done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    /// Whether the output collection ran out of room during this run.
    ///
    /// The run still completes; the output is just missing units.
    #[inline]
    pub const fn failed(&self) -> bool {
        self.failed
    }

    /// The active state.
    #[inline]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Bytes of the text consumed so far.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text of the current run.
    #[inline]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Index of the active style.
    #[inline]
    pub const fn style_index(&self) -> usize {
        self.style_index
    }

    /// Line number on the current page.
    #[inline]
    pub const fn line_index(&self) -> usize {
        self.layout.line_index()
    }

    /// Position of the next revealed unit.
    ///
    /// Pending word wrap is not taken into account, so the next word may
    /// still start on the following line.
    pub fn next_character_position(&self) -> Point {
        self.layout.next_character_position()
    }

    /// Key that ends a manual pause.
    #[inline]
    pub const fn resume_key(&self) -> Keys {
        self.resume_key
    }

    /// Change the resume key.
    ///
    /// # Panics
    ///
    /// Panics if the key overlaps the skip key.
    pub fn set_resume_key(&mut self, resume_key: Keys) {
        assert!(
            check_keys(resume_key, self.skip_key).is_ok(),
            "Resume key {resume_key:?} overlaps skip key {:?}",
            self.skip_key
        );
        self.resume_key = resume_key;
    }

    /// Key that fast-forwards to the end.
    #[inline]
    pub const fn skip_key(&self) -> Keys {
        self.skip_key
    }

    /// Change the skip key.
    ///
    /// # Panics
    ///
    /// Panics if the key overlaps the resume key.
    pub fn set_skip_key(&mut self, skip_key: Keys) {
        assert!(
            check_keys(self.resume_key, skip_key).is_ok(),
            "Skip key {skip_key:?} overlaps resume key {:?}",
            self.resume_key
        );
        self.skip_key = skip_key;
    }

    /// Reserve the next state; applied at the next transition point.
    fn request(&mut self, state: State) {
        self.requested = Some(state);
    }

    fn apply_requested_state(&mut self, output: &mut Units<S::Unit>) {
        let Some(next) = self.requested.take() else {
            return;
        };
        let prev = std::mem::replace(&mut self.state, next);
        log::debug!("typewriter: {prev:?} -> {next:?}");
        self.exit_state(prev, output);
        self.enter_state();
    }

    /// Grapheme at the cursor, if any text is left.
    fn current_grapheme(&self) -> Option<&'a str> {
        let text: &'a str = self.text;
        text[self.cursor..].graphemes(true).next()
    }

    /// Whether a style-change code should take effect.
    fn accepts_style(&self, index: usize) -> bool {
        if index >= self.styles.len() {
            log::warn!(
                "typewriter: style {index} requested, {} configured",
                self.styles.len()
            );
            return false;
        }
        index != self.style_index
    }

    fn call_delegate(&mut self, index: usize) {
        match self.delegates.get_mut(index) {
            Some(delegate) => {
                log::trace!("typewriter: delegate {index}");
                delegate(index);
            }
            None => log::warn!(
                "typewriter: delegate {index} requested, {} configured",
                self.delegates.len()
            ),
        }
    }

    fn record_failure(&mut self, err: CapacityError) {
        if !self.failed {
            log::warn!("typewriter: {err}, further text is not rendered");
        }
        self.failed = true;
    }

    fn stop_sound(&mut self) {
        if let Some(mut handle) = self.sound_handle.take() {
            if handle.active() {
                handle.stop();
            }
        }
    }

    fn play_write_sound(&mut self, audio: &mut A) {
        if self.sound.is_none() {
            return;
        }
        self.stop_sound();
        if let Some(sound) = &self.sound {
            self.sound_handle = Some(audio.play(sound));
        }
    }
}
