use super::*;
use crate::audio::{SilentHandle, SoundHandle};
use crate::keys::{KeyLatch, NoInput};
use crate::shaper::{Alignment, CellShaper, Glyph};
use crate::style::{Rgb, TextStyle};
use proptest::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn writer(shaper: &CellShaper) -> Typewriter<'_, CellShaper> {
    Typewriter::new(shaper, TypewriterConfig::default()).unwrap()
}

fn two_styles<'a>() -> TypewriterConfig<'a, TextStyle> {
    TypewriterConfig {
        styles: vec![TextStyle::default(), TextStyle::fg(Rgb::from(0xFF0000))],
        ..TypewriterConfig::default()
    }
}

fn options(max_line_width: i32, max_lines: usize) -> RunOptions<()> {
    RunOptions {
        max_line_width,
        max_lines,
        ..RunOptions::default()
    }
}

fn texts(output: &Units<Glyph>) -> Vec<&str> {
    output.iter().map(|g| g.text.as_str()).collect()
}

fn tick(writer: &mut Typewriter<'_, CellShaper>, output: &mut Units<Glyph>) {
    writer.update(output, &NoInput, &mut Silent);
}

/// Update until done, resuming every pause. Returns the number of updates.
fn finish(writer: &mut Typewriter<'_, CellShaper>, output: &mut Units<Glyph>) -> usize {
    let mut updates = 0;
    while !writer.done() {
        if writer.paused() {
            writer.resume();
        }
        tick(writer, output);
        updates += 1;
        assert!(updates < 10_000, "typewriter never finished");
    }
    updates
}

#[test]
fn test_one_step_per_tick() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "AB\n", &mut out, RunOptions::default());

    tick(&mut writer, &mut out);
    assert_eq!(texts(&out), ["A"]);
    tick(&mut writer, &mut out);
    assert_eq!(texts(&out), ["AB"]);
    assert!(!writer.done());
    tick(&mut writer, &mut out);
    assert!(writer.done());
    assert_eq!(writer.cursor(), 3);
    assert_eq!(texts(&out), ["AB"]);
}

#[test]
fn test_wait_ticks() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    let options = RunOptions {
        wait_ticks: 3,
        ..RunOptions::default()
    };
    writer.start(Point::default(), "ab", &mut out, options);

    tick(&mut writer, &mut out);
    tick(&mut writer, &mut out);
    assert!(out.is_empty());
    tick(&mut writer, &mut out);
    assert_eq!(texts(&out), ["a"]);
    assert_eq!(finish(&mut writer, &mut out), 3);
    assert_eq!(texts(&out), ["ab"]);
}

#[test]
#[should_panic(expected = "Invalid wait ticks")]
fn test_zero_wait_ticks_panics() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let options = RunOptions {
        wait_ticks: 0,
        ..RunOptions::default()
    };
    writer.start(Point::default(), "ab", &mut Units::unbounded(), options);
}

#[test]
#[should_panic(expected = "Typewriting is done")]
fn test_update_after_done_panics() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "a", &mut out, RunOptions::default());
    tick(&mut writer, &mut out);
    assert!(writer.done());
    tick(&mut writer, &mut out);
}

#[test]
fn test_empty_text_is_done_at_start() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "", &mut out, RunOptions::default());
    assert!(writer.done());
    assert!(!writer.paused());
    assert_eq!(finish(&mut writer, &mut out), 0);
    assert!(out.is_empty());
}

#[test]
#[should_panic(expected = "Typewriting is done")]
fn test_update_on_empty_text_panics() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "", &mut out, RunOptions::default());
    tick(&mut writer, &mut out);
}

#[test]
fn test_manual_pause_code_waits_for_resume() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "a⏯b", &mut out, RunOptions::default());

    tick(&mut writer, &mut out);
    tick(&mut writer, &mut out);
    assert!(writer.paused());
    assert_eq!(writer.state(), &State::ManuallyPaused);

    for _ in 0..5 {
        tick(&mut writer, &mut out);
    }
    assert!(writer.paused());
    assert_eq!(texts(&out), ["a"]);

    writer.resume();
    tick(&mut writer, &mut out);
    assert!(!writer.paused());
    assert!(writer.done());
    assert_eq!(texts(&out), ["ab"]);
}

#[test]
fn test_resume_key_ends_pause() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    let mut latch = KeyLatch::new();
    writer.start(Point::default(), "⏯b", &mut out, RunOptions::default());

    writer.update(&mut out, &latch, &mut Silent);
    assert!(writer.paused());

    latch.press(Keys::A);
    writer.update(&mut out, &latch, &mut Silent);
    latch.end_frame();
    assert!(!writer.paused());
    assert!(out.is_empty());

    writer.update(&mut out, &latch, &mut Silent);
    assert_eq!(texts(&out), ["b"]);
}

#[test]
fn test_pause_and_resume_api() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "abc", &mut out, RunOptions::default());

    tick(&mut writer, &mut out);
    writer.pause();
    assert!(!writer.paused());
    tick(&mut writer, &mut out);
    assert!(writer.paused());
    assert_eq!(texts(&out), ["a"]);

    writer.resume();
    tick(&mut writer, &mut out);
    assert_eq!(texts(&out), ["ab"]);
}

#[test]
fn test_resume_cancels_pending_pause() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "abc", &mut out, RunOptions::default());

    writer.pause();
    writer.resume();
    tick(&mut writer, &mut out);
    assert!(!writer.paused());
    assert_eq!(texts(&out), ["a"]);
}

#[test]
#[should_panic(expected = "Typewriter is not paused")]
fn test_resume_when_not_paused_panics() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "abc", &mut out, RunOptions::default());
    writer.resume();
}

#[test]
fn test_timed_pause() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "A⓷B", &mut out, RunOptions::default());

    tick(&mut writer, &mut out);
    assert_eq!(texts(&out), ["A"]);
    for _ in 0..3 {
        tick(&mut writer, &mut out);
        assert_eq!(texts(&out), ["A"]);
    }
    tick(&mut writer, &mut out);
    assert_eq!(texts(&out), ["AB"]);
    assert!(writer.done());
}

#[test]
fn test_style_change_splits_chunk() {
    let shaper = CellShaper::new();
    let mut writer = Typewriter::<CellShaper>::new(&shaper, two_styles()).unwrap();
    let mut out = Units::unbounded();
    writer.start(Point::default(), "a❶b", &mut out, RunOptions::default());
    finish(&mut writer, &mut out);

    assert_eq!(texts(&out), ["a", "b"]);
    assert_eq!(out[0].style, TextStyle::default());
    assert_eq!(out[1].style.fg, Rgb::from(0xFF0000));
    assert_eq!(out[1].position, Point::new(1.0, 0.0));
    assert_eq!(writer.style_index(), 1);
}

#[test]
fn test_style_change_to_active_style_keeps_chunk() {
    let shaper = CellShaper::new();
    let mut writer = Typewriter::<CellShaper>::new(&shaper, two_styles()).unwrap();
    let mut out = Units::unbounded();
    writer.start(Point::default(), "a⓿b", &mut out, RunOptions::default());
    finish(&mut writer, &mut out);
    assert_eq!(texts(&out), ["ab"]);
}

#[test]
fn test_unknown_style_is_ignored() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "a❷b", &mut out, RunOptions::default());
    finish(&mut writer, &mut out);
    assert_eq!(texts(&out), ["ab"]);
    assert_eq!(writer.style_index(), 0);
}

fn recording_delegates(calls: &RefCell<Vec<usize>>) -> TypewriterConfig<'_, TextStyle> {
    TypewriterConfig {
        delegates: vec![
            Box::new(move |i: usize| calls.borrow_mut().push(i)) as Delegate<'_>,
            Box::new(move |i: usize| calls.borrow_mut().push(i)) as Delegate<'_>,
        ],
        ..TypewriterConfig::default()
    }
}

#[test]
fn test_delegates_are_called_in_order() {
    let calls = RefCell::new(Vec::new());
    let shaper = CellShaper::new();
    let mut writer = Typewriter::<CellShaper>::new(&shaper, recording_delegates(&calls)).unwrap();
    let mut out = Units::unbounded();
    writer.start(Point::default(), "①x➀⓪⑤", &mut out, RunOptions::default());

    tick(&mut writer, &mut out);
    assert_eq!(*calls.borrow(), [1]);
    tick(&mut writer, &mut out);
    assert!(writer.done());
    assert_eq!(*calls.borrow(), [1, 1, 0]);
    assert_eq!(texts(&out), ["x"]);
}

#[test]
fn test_skip_calls_delegates_in_order() {
    let calls = RefCell::new(Vec::new());
    let shaper = CellShaper::new();
    let mut writer = Typewriter::<CellShaper>::new(&shaper, recording_delegates(&calls)).unwrap();
    let mut out = Units::unbounded();
    writer.start(Point::default(), "①x➀y⓪⑤", &mut out, RunOptions::default());

    writer.skip();
    tick(&mut writer, &mut out);
    assert!(writer.done());
    assert_eq!(*calls.borrow(), [1, 1, 0]);
    assert_eq!(texts(&out), ["xy"]);
}

#[test]
fn test_skip_calls_delegate_once_across_page_pause() {
    let calls = RefCell::new(Vec::new());
    let shaper = CellShaper::new();
    let mut writer = Typewriter::<CellShaper>::new(&shaper, recording_delegates(&calls)).unwrap();
    let mut out = Units::unbounded();
    writer.start(Point::default(), "a①b\n⓪c", &mut out, options(i32::MAX, 1));

    writer.skip();
    tick(&mut writer, &mut out);
    assert!(writer.paused());
    assert_eq!(*calls.borrow(), [1, 0]);
    assert_eq!(texts(&out), ["ab"]);

    writer.resume();
    tick(&mut writer, &mut out);
    assert!(writer.done());
    assert_eq!(*calls.borrow(), [1, 0]);
    assert_eq!(texts(&out), ["c"]);
}

#[test]
fn test_word_wrap() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "hello world", &mut out, options(10, usize::MAX));
    finish(&mut writer, &mut out);

    assert_eq!(texts(&out), ["hello ", "world"]);
    assert_eq!(out[0].position, Point::new(0.0, 0.0));
    assert_eq!(out[1].position, Point::new(0.0, 1.0));
    assert_eq!(writer.line_index(), 1);
}

#[test]
fn test_overlong_word_is_split() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "abcdefgh", &mut out, options(5, usize::MAX));
    finish(&mut writer, &mut out);

    assert_eq!(texts(&out), ["abcde", "fgh"]);
    assert_eq!(out[1].position, Point::new(0.0, 1.0));
}

#[test]
fn test_chunk_width_limit() {
    let shaper = CellShaper::new().with_max_chunk_width(3);
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::new(2.0, 0.0), "abcdefg", &mut out, RunOptions::default());
    finish(&mut writer, &mut out);

    assert_eq!(texts(&out), ["abc", "def", "g"]);
    assert_eq!(out[2].position, Point::new(8.0, 0.0));
}

#[test]
fn test_page_overflow_pauses_then_wipes() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "a\nb\nc", &mut out, options(i32::MAX, 2));

    for _ in 0..4 {
        tick(&mut writer, &mut out);
    }
    assert!(!writer.paused());
    tick(&mut writer, &mut out);
    assert!(writer.paused());
    assert_eq!(texts(&out), ["a", "b"]);
    assert_eq!(out[1].position, Point::new(0.0, 1.0));

    writer.resume();
    tick(&mut writer, &mut out);
    assert!(writer.done());
    assert_eq!(texts(&out), ["c"]);
    assert_eq!(out[0].position, Point::new(0.0, 0.0));
}

#[test]
fn test_trailing_newline_on_last_line_does_not_pause() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "a\nb\n", &mut out, options(i32::MAX, 2));

    for _ in 0..4 {
        tick(&mut writer, &mut out);
    }
    assert!(writer.done());
    assert!(!writer.paused());
    assert_eq!(texts(&out), ["a", "b"]);
}

#[test]
fn test_word_wrap_overflows_page() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "one two", &mut out, options(5, 1));

    let mut pauses = 0;
    while !writer.done() {
        if writer.paused() {
            pauses += 1;
            assert_eq!(texts(&out), ["one "]);
            writer.resume();
        }
        tick(&mut writer, &mut out);
    }
    assert_eq!(pauses, 1);
    assert_eq!(texts(&out), ["two"]);
}

#[test]
fn test_skip_drains_in_one_update() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "hel⏯lo⓾ world", &mut out, RunOptions::default());

    writer.skip();
    tick(&mut writer, &mut out);
    assert!(writer.done());
    assert_eq!(texts(&out), ["hello world"]);
}

#[test]
fn test_skip_key() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    let mut latch = KeyLatch::new();
    writer.start(Point::default(), "abc", &mut out, RunOptions::default());

    latch.press(Keys::B);
    writer.update(&mut out, &latch, &mut Silent);
    latch.end_frame();
    assert!(matches!(writer.state(), State::Skipping(_)));
    assert!(out.is_empty());

    writer.update(&mut out, &latch, &mut Silent);
    assert!(writer.done());
    assert_eq!(texts(&out), ["abc"]);
}

#[test]
fn test_skip_key_ends_manual_pause() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    let mut latch = KeyLatch::new();
    writer.start(Point::default(), "⏯abc", &mut out, RunOptions::default());

    writer.update(&mut out, &latch, &mut Silent);
    assert!(writer.paused());
    latch.press(Keys::B);
    writer.update(&mut out, &latch, &mut Silent);
    latch.end_frame();
    assert!(!writer.paused());
    writer.update(&mut out, &latch, &mut Silent);
    assert!(writer.done());
}

#[test]
fn test_skip_mid_chunk_leaves_one_unit() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "abcd", &mut out, RunOptions::default());

    tick(&mut writer, &mut out);
    tick(&mut writer, &mut out);
    assert_eq!(texts(&out), ["ab"]);

    writer.skip();
    tick(&mut writer, &mut out);
    assert!(writer.done());
    assert_eq!(texts(&out), ["abcd"]);
}

#[test]
fn test_skip_stops_at_full_page() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "a\nb\nc", &mut out, options(i32::MAX, 2));

    writer.skip();
    tick(&mut writer, &mut out);
    assert!(writer.paused());
    assert_eq!(texts(&out), ["a", "b"]);

    writer.skip();
    tick(&mut writer, &mut out);
    assert!(writer.done());
    assert_eq!(texts(&out), ["c"]);
}

#[test]
fn test_resume_after_skip_pause_types() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "a\nb\ncd", &mut out, options(i32::MAX, 2));

    writer.skip();
    tick(&mut writer, &mut out);
    assert!(writer.paused());

    writer.resume();
    tick(&mut writer, &mut out);
    assert!(matches!(writer.state(), State::Typing(_)));
    assert_eq!(texts(&out), ["c"]);
}

#[derive(Default)]
struct CountingAudio {
    plays: usize,
}

impl AudioDevice for CountingAudio {
    type Sound = ();
    type Handle = SilentHandle;

    fn play(&mut self, _sound: &()) -> SilentHandle {
        self.plays += 1;
        SilentHandle
    }
}

#[test]
fn test_sound_plays_for_visible_text_only() {
    let shaper = CellShaper::new();
    let mut writer: Typewriter<'_, CellShaper, CountingAudio> =
        Typewriter::new(&shaper, TypewriterConfig::default()).unwrap();
    let mut audio = CountingAudio::default();
    let mut out = Units::unbounded();
    let options = RunOptions {
        sound: Some(()),
        ..RunOptions::default()
    };
    writer.start(Point::default(), "a b❶\nc", &mut out, options);

    while !writer.done() {
        writer.update(&mut out, &NoInput, &mut audio);
    }
    assert_eq!(audio.plays, 3);
}

/// Audio whose sounds keep playing until stopped.
#[derive(Default)]
struct LingeringAudio {
    plays: usize,
    stops: Rc<Cell<usize>>,
}

struct LingeringHandle {
    playing: bool,
    stops: Rc<Cell<usize>>,
}

impl SoundHandle for LingeringHandle {
    fn active(&self) -> bool {
        self.playing
    }

    fn stop(&mut self) {
        self.playing = false;
        self.stops.set(self.stops.get() + 1);
    }
}

impl AudioDevice for LingeringAudio {
    type Sound = ();
    type Handle = LingeringHandle;

    fn play(&mut self, _sound: &()) -> LingeringHandle {
        self.plays += 1;
        LingeringHandle {
            playing: true,
            stops: Rc::clone(&self.stops),
        }
    }
}

#[test]
fn test_replayed_sound_stops_previous_one() {
    let shaper = CellShaper::new();
    let mut writer: Typewriter<'_, CellShaper, LingeringAudio> =
        Typewriter::new(&shaper, TypewriterConfig::default()).unwrap();
    let mut audio = LingeringAudio::default();
    let mut out = Units::unbounded();
    let options = || RunOptions {
        sound: Some(()),
        ..RunOptions::default()
    };
    writer.start(Point::default(), "abc", &mut out, options());

    writer.update(&mut out, &NoInput, &mut audio);
    assert_eq!((audio.plays, audio.stops.get()), (1, 0));
    while !writer.done() {
        writer.update(&mut out, &NoInput, &mut audio);
    }
    assert_eq!((audio.plays, audio.stops.get()), (3, 2));

    // The last sound is still playing when the next run starts.
    writer.start(Point::default(), "d", &mut out, options());
    assert_eq!(audio.stops.get(), 3);
    writer.update(&mut out, &NoInput, &mut audio);
    assert_eq!((audio.plays, audio.stops.get()), (4, 3));

    // Each handle is stopped at most once.
    writer.start(Point::default(), "e", &mut out, RunOptions::default());
    assert_eq!(audio.stops.get(), 4);
    writer.start(Point::default(), "f", &mut out, RunOptions::default());
    assert_eq!(audio.stops.get(), 4);
}

#[test]
fn test_no_sound_without_sound_option() {
    let shaper = CellShaper::new();
    let mut writer: Typewriter<'_, CellShaper, CountingAudio> =
        Typewriter::new(&shaper, TypewriterConfig::default()).unwrap();
    let mut audio = CountingAudio::default();
    let mut out = Units::unbounded();
    writer.start(Point::default(), "abc", &mut out, RunOptions::default());

    while !writer.done() {
        writer.update(&mut out, &NoInput, &mut audio);
    }
    assert_eq!(audio.plays, 0);
}

#[test]
fn test_full_output_sets_failed() {
    let shaper = CellShaper::new().with_max_chunk_width(2);
    let mut writer = writer(&shaper);
    let mut out = Units::with_limit(1);
    writer.start(Point::default(), "ab cd", &mut out, RunOptions::default());
    finish(&mut writer, &mut out);

    assert!(writer.failed());
    assert_eq!(texts(&out), ["ab"]);
}

#[test]
fn test_restart_keeps_existing_units() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "ab", &mut out, RunOptions::default());
    finish(&mut writer, &mut out);

    writer.start(Point::new(0.0, 3.0), "cd", &mut out, RunOptions::default());
    assert!(!writer.done());
    assert_eq!(writer.text(), "cd");
    assert_eq!(writer.cursor(), 0);
    finish(&mut writer, &mut out);
    assert_eq!(texts(&out), ["ab", "cd"]);
    assert_eq!(out[1].position, Point::new(0.0, 3.0));
}

#[test]
fn test_wipe_keeps_units_before_run() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::default(), "title", &mut out, RunOptions::default());
    finish(&mut writer, &mut out);

    writer.start(Point::new(0.0, 2.0), "a\nb", &mut out, options(i32::MAX, 1));
    finish(&mut writer, &mut out);
    assert_eq!(texts(&out), ["title", "b"]);
    assert_eq!(out[1].position, Point::new(0.0, 2.0));
}

#[test]
fn test_config_errors() {
    let shaper = CellShaper::new();
    let config = TypewriterConfig {
        styles: vec![TextStyle::default(); MAX_STYLES + 1],
        ..TypewriterConfig::default()
    };
    assert!(matches!(
        Typewriter::<CellShaper>::new(&shaper, config),
        Err(ConfigError::TooManyStyles { .. })
    ));

    let config = TypewriterConfig {
        resume_key: Keys::A,
        skip_key: Keys::A | Keys::B,
        ..TypewriterConfig::default()
    };
    assert!(matches!(
        Typewriter::<CellShaper>::new(&shaper, config),
        Err(ConfigError::OverlappingKeys { .. })
    ));
}

#[test]
fn test_key_setters() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    writer.set_resume_key(Keys::START);
    writer.set_skip_key(Keys::SELECT | Keys::B);
    assert_eq!(writer.resume_key(), Keys::START);
    assert_eq!(writer.skip_key(), Keys::SELECT | Keys::B);
}

#[test]
#[should_panic(expected = "overlaps")]
fn test_overlapping_key_setter_panics() {
    let shaper = CellShaper::new();
    let mut writer = writer(&shaper);
    writer.set_skip_key(Keys::A);
}

#[test]
fn test_center_alignment() {
    let shaper = CellShaper::new().with_alignment(Alignment::Center);
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::new(10.0, 0.0), "abcd", &mut out, RunOptions::default());

    tick(&mut writer, &mut out);
    assert_eq!(writer.next_character_position(), Point::new(10.5, 0.0));
    finish(&mut writer, &mut out);
    assert_eq!(out[0].position, Point::new(8.0, 0.0));
    assert_eq!(writer.next_character_position(), Point::new(12.0, 0.0));
}

#[test]
fn test_right_alignment_reflows_previous_chunks() {
    let shaper = CellShaper::new()
        .with_alignment(Alignment::Right)
        .with_max_chunk_width(2);
    let mut writer = writer(&shaper);
    let mut out = Units::unbounded();
    writer.start(Point::new(20.0, 0.0), "abc\nd", &mut out, RunOptions::default());
    finish(&mut writer, &mut out);

    assert_eq!(texts(&out), ["ab", "c", "d"]);
    assert_eq!(out[0].position, Point::new(17.0, 0.0));
    assert_eq!(out[1].position, Point::new(19.0, 0.0));
    assert_eq!(out[2].position, Point::new(19.0, 1.0));
}

const CHARSET: &[&str] = &["a", "b", "日", " ", " ", "\t", "\n", "❶", "⓿", "⓶", "①"];

fn annotated_text(with_manual_pause: bool) -> impl Strategy<Value = String> {
    let mut charset = CHARSET.to_vec();
    if with_manual_pause {
        charset.push("⏯");
    }
    prop::collection::vec(prop::sample::select(charset), 0..48).prop_map(|v| v.concat())
}

fn alignment() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Left),
        Just(Alignment::Center),
        Just(Alignment::Right),
    ]
}

proptest! {
    #[test]
    fn test_prop_consumes_all_text(
        text in annotated_text(true),
        align in alignment(),
        max_line_width in 1..16i32,
        max_chunk_width in 1..6i32,
        max_lines in 1..4usize,
    ) {
        let shaper = CellShaper::new()
            .with_alignment(align)
            .with_max_chunk_width(max_chunk_width);
        let mut writer = Typewriter::<CellShaper>::new(&shaper, two_styles()).unwrap();
        let mut out = Units::unbounded();
        writer.start(Point::default(), &text, &mut out, options(max_line_width, max_lines));
        finish(&mut writer, &mut out);

        prop_assert_eq!(writer.cursor(), text.len());
        // Only a lone grapheme may be wider than a chunk; tabs are the widest.
        for glyph in &out {
            prop_assert!(glyph.width <= max_chunk_width.max(4));
        }
    }

    #[test]
    fn test_prop_skip_matches_typing(
        text in annotated_text(false),
        align in alignment(),
        max_line_width in 1..16i32,
        max_chunk_width in 1..6i32,
        max_lines in 1..4usize,
    ) {
        let shaper = CellShaper::new()
            .with_alignment(align)
            .with_max_chunk_width(max_chunk_width);

        let mut typed = Units::unbounded();
        let mut typist = Typewriter::<CellShaper>::new(&shaper, two_styles()).unwrap();
        typist.start(Point::default(), &text, &mut typed, options(max_line_width, max_lines));
        finish(&mut typist, &mut typed);

        let mut skipped = Units::unbounded();
        let mut skipper = Typewriter::<CellShaper>::new(&shaper, two_styles()).unwrap();
        skipper.start(Point::default(), &text, &mut skipped, options(max_line_width, max_lines));
        let mut updates = 0;
        while !skipper.done() {
            if !matches!(skipper.state(), State::Skipping(_)) {
                skipper.skip();
            }
            skipper.update(&mut skipped, &NoInput, &mut Silent);
            updates += 1;
            prop_assert!(updates < 1_000);
        }

        prop_assert_eq!(typed.as_slice(), skipped.as_slice());
    }
}
