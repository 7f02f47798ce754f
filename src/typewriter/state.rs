//! Session states and their per-tick behavior.
//!
//! ```text
//! Typing ──(⏯ | pause() | page full)──────────▶ ManuallyPaused
//! Typing ──(skip() | skip key)───────────────▶ Skipping
//! Typing ──(text consumed)───────────────────▶ Done
//! ManuallyPaused ──(resume() | resume key)───▶ Typing
//! ManuallyPaused ──(skip() | skip key)───────▶ Skipping
//! Skipping ──(page full)─────────────────────▶ ManuallyPaused
//! Skipping ──(text consumed)─────────────────▶ Done
//! ```
//!
//! States never switch directly. They request the next state, and the
//! controller applies the request between ticks: the old state's exit hook
//! runs, then the new state's enter hook.

use super::Typewriter;
use crate::audio::AudioDevice;
use crate::control::{classify, is_whitespace, ControlCode};
use crate::keys::InputDevice;
use crate::layout::{wraps_before, Break, Reveal};
use crate::shaper::{GlyphShaper, Units};

/// The active state of a typewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Revealing one step every `wait_ticks` ticks.
    Typing(Typing),
    /// Waiting for the resume key.
    ManuallyPaused,
    /// Revealing everything in one tick.
    Skipping(Skipping),
    /// All text consumed.
    Done,
}

impl State {
    pub(crate) fn skipping() -> Self {
        Self::Skipping(Skipping::default())
    }
}

/// Counters of the typing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Typing {
    ticks: u32,
    timed_pause_remaining: u8,
}

/// Bookkeeping of the skipping state.
///
/// While skipping, chunks are rendered once, when they are settled. The
/// chunk that was being typed when skipping started already has a unit on
/// screen; once more text is merged into it that unit is *provisional* and
/// must be replaced when the chunk is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skipping {
    provisional: bool,
    maybe_provisional: bool,
}

impl Default for Skipping {
    fn default() -> Self {
        Self {
            provisional: false,
            maybe_provisional: true,
        }
    }
}

/// Result of trying to place a literal grapheme.
enum Placement {
    /// Placed; `visible` if it was not whitespace.
    Placed { visible: bool },
    /// The page has no room left; the grapheme was not consumed.
    PageFull,
}

impl<'a, S: GlyphShaper, A: AudioDevice> Typewriter<'a, S, A> {
    /// Typing: reveal the next step once enough ticks have passed.
    ///
    /// Returns `true` if visible text was revealed.
    pub(super) fn update_typing<I: InputDevice>(
        &mut self,
        typing: &mut Typing,
        output: &mut Units<S::Unit>,
        input: &I,
    ) -> bool {
        if input.pressed(self.skip_key) {
            self.request(State::skipping());
            return false;
        }

        typing.ticks += 1;
        if typing.ticks < self.wait_ticks {
            return false;
        }
        typing.ticks = 0;

        if typing.timed_pause_remaining != 0 {
            typing.timed_pause_remaining -= 1;
            if typing.timed_pause_remaining != 0 {
                return false;
            }
        }

        let mut revealed = false;
        while let Some(grapheme) = self.current_grapheme() {
            let (consumed, stop) = match classify(grapheme) {
                ControlCode::Newline => {
                    self.layout.commit_chunk(output.len());
                    self.layout.newline();
                    (true, true)
                }
                ControlCode::ManualPause => {
                    self.request(State::ManuallyPaused);
                    (true, true)
                }
                ControlCode::TimedPause(steps) => {
                    typing.timed_pause_remaining = steps;
                    (true, true)
                }
                ControlCode::StyleChange(index) => {
                    if self.accepts_style(index) {
                        self.layout.commit_chunk(output.len());
                        self.style_index = index;
                    }
                    (true, false)
                }
                ControlCode::DelegateCall(index) => {
                    self.call_delegate(index);
                    (true, false)
                }
                ControlCode::Literal(text) => match self.place_literal(text, output, None) {
                    Placement::Placed { visible } => {
                        revealed |= visible;
                        (true, true)
                    }
                    Placement::PageFull => {
                        self.request(State::ManuallyPaused);
                        (false, true)
                    }
                },
            };

            if consumed {
                self.cursor += grapheme.len();
            }
            if stop {
                break;
            }
        }

        self.finish_if_consumed();
        revealed
    }

    /// Paused: only the skip and resume keys do anything.
    pub(super) fn update_paused<I: InputDevice>(&mut self, input: &I) {
        if input.pressed(self.skip_key) {
            self.request(State::skipping());
        } else if input.pressed(self.resume_key) {
            self.request(State::Typing(Typing::default()));
        }
    }

    /// Skipping: reveal everything that fits on the page, in one tick.
    ///
    /// Pauses are ignored. A full page still pauses, leaving the rest of the
    /// text for later.
    pub(super) fn update_skipping(
        &mut self,
        skipping: &mut Skipping,
        output: &mut Units<S::Unit>,
    ) -> bool {
        let mut revealed = false;
        while let Some(grapheme) = self.current_grapheme() {
            match classify(grapheme) {
                ControlCode::Newline => {
                    self.settle_chunk(output, skipping);
                    self.layout.newline();
                }
                ControlCode::ManualPause | ControlCode::TimedPause(_) => {}
                ControlCode::StyleChange(index) => {
                    if self.accepts_style(index) {
                        self.settle_chunk(output, skipping);
                        self.style_index = index;
                    }
                }
                ControlCode::DelegateCall(index) => self.call_delegate(index),
                ControlCode::Literal(text) => {
                    match self.place_literal(text, output, Some(&mut *skipping)) {
                        Placement::Placed { visible } => revealed |= visible,
                        Placement::PageFull => {
                            self.request(State::ManuallyPaused);
                            return revealed;
                        }
                    }
                }
            }
            self.cursor += grapheme.len();
        }

        self.finish_if_consumed();
        revealed
    }

    /// Enter hook of the current state.
    pub(super) fn enter_state(&mut self) {
        if self.state == State::ManuallyPaused {
            self.paused = true;
        }
    }

    /// Exit hook of a state that was just replaced.
    pub(super) fn exit_state(&mut self, state: State, output: &mut Units<S::Unit>) {
        match state {
            State::ManuallyPaused => {
                self.paused = false;
                if self.layout.overflowed() {
                    log::trace!("typewriter: page full, wiping");
                    self.layout.wipe(output);
                }
            }
            State::Skipping(mut skipping) => self.settle_chunk(output, &mut skipping),
            State::Typing(_) | State::Done => {}
        }
    }

    /// Place a literal grapheme, breaking the chunk or the line as needed.
    ///
    /// `skipping` selects deferred rendering.
    fn place_literal(
        &mut self,
        grapheme: &str,
        output: &mut Units<S::Unit>,
        mut skipping: Option<&mut Skipping>,
    ) -> Placement {
        if self.layout.overflowed() {
            return Placement::PageFull;
        }

        let wraps = wraps_before(
            self.shaper,
            &self.text[self.cursor..],
            self.layout.prev_whitespace(),
            self.layout.line_width(),
            self.layout.limits().max_line_width,
        );
        match self.layout.fit(self.shaper, grapheme, wraps) {
            Break::None => {}
            Break::Chunk => self.seal_chunk(output, skipping.as_deref_mut()),
            Break::Line => {
                self.seal_chunk(output, skipping.as_deref_mut());
                self.layout.newline();
                if self.layout.overflowed() {
                    return Placement::PageFull;
                }
            }
        }

        let reveal = if skipping.is_some() {
            Reveal::Deferred
        } else {
            Reveal::Now
        };
        let style = &self.styles[self.style_index];
        let appended = match self.layout.append(self.shaper, grapheme, style, output, reveal) {
            Ok(appended) => appended,
            Err(err) => {
                self.record_failure(err);
                true
            }
        };
        if !appended {
            log::warn!(
                "typewriter: grapheme of {} bytes does not fit a chunk, dropped",
                grapheme.len()
            );
            return Placement::Placed { visible: false };
        }
        if let Some(skipping) = skipping {
            skipping.provisional = skipping.maybe_provisional;
        }
        Placement::Placed {
            visible: !is_whitespace(grapheme),
        }
    }

    /// Close the pending chunk, in the manner of the running state.
    fn seal_chunk(&mut self, output: &mut Units<S::Unit>, skipping: Option<&mut Skipping>) {
        match skipping {
            Some(skipping) => self.settle_chunk(output, skipping),
            None => self.layout.commit_chunk(output.len()),
        }
    }

    /// Render the pending chunk with its final content, then commit it.
    fn settle_chunk(&mut self, output: &mut Units<S::Unit>, skipping: &mut Skipping) {
        if skipping.provisional || !skipping.maybe_provisional {
            // Drops the provisional unit, if there is one.
            output.truncate(self.layout.unit_index());
            let result = self
                .layout
                .render_chunk(self.shaper, &self.styles[self.style_index], output);
            if let Err(err) = result {
                self.record_failure(err);
            }
        }
        self.layout.commit_chunk(output.len());
        skipping.provisional = false;
        skipping.maybe_provisional = false;
    }

    fn finish_if_consumed(&mut self) {
        if self.requested.is_none() && self.cursor == self.text.len() {
            self.request(State::Done);
        }
    }
}
