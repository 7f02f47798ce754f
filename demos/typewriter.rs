//! Typewriter Demo: three dialogue boxes revealing the same text.
//!
//! The boxes are left, center and right aligned. Enter/Space resumes a
//! paused box, Escape skips, 'r' restarts and 'q' quits.

use crossterm::{
    cursor, event, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::cell::Cell;
use std::io;
use std::time::{Duration, Instant};
use typewriter::{
    Alignment, CellShaper, Delegate, Glyph, KeyBindings, KeyLatch, Modifiers, OutputBuffer, Point,
    Rgb, RunOptions, Silent, TextStyle, Typewriter, TypewriterConfig, Units,
};

/// Dialogue text, with inline directives.
const SAMPLE_TEXT: &str = "Welcome to the ❶typewriter⓿ demo.⓹ Text appears one grapheme per tick, \
wraps between words and waits when the box is full.⏯\n\
Press ❷Enter⓿ to resume① or ❷Esc⓿ to skip.\n\
Centered and right aligned lines shift while they grow.⓾ \
The last sentence spills onto a second page.";

/// Frame duration (~60 fps).
const FRAME: Duration = Duration::from_millis(16);

/// Restores the terminal on drop, even on early return.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn styles() -> Vec<TextStyle> {
    vec![
        TextStyle::default(),
        TextStyle::fg(Rgb::from(0xF0C040)).with_modifiers(Modifiers::BOLD),
        TextStyle::fg(Rgb::from(0x60C0F0)).with_modifiers(Modifiers::UNDERLINE),
    ]
}

/// Top anchor of box `index`, as the alignment wants it.
fn origin(index: u16, alignment: Alignment, screen_width: u16, box_width: i32) -> Point {
    let left = i32::from(screen_width / 3 * index) + 1;
    let x = match alignment {
        Alignment::Left => left,
        Alignment::Center => left + box_width / 2,
        Alignment::Right => left + box_width,
    };
    Point::new(x as f32, 2.0)
}

fn main() -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let box_width = i32::from(width / 3).saturating_sub(2).max(8);
    let bells = Cell::new(0u32);

    let alignments = [Alignment::Left, Alignment::Center, Alignment::Right];
    let shapers = alignments.map(|alignment| {
        CellShaper::new()
            .with_alignment(alignment)
            .with_max_chunk_width(12)
    });
    let origins: Vec<Point> = (0..)
        .zip(alignments)
        .map(|(index, alignment)| origin(index, alignment, width, box_width))
        .collect();
    let options = || RunOptions {
        wait_ticks: 2,
        max_line_width: box_width,
        max_lines: 5,
        ..RunOptions::default()
    };

    let mut boxes = Vec::with_capacity(shapers.len());
    for shaper in &shapers {
        let config = TypewriterConfig {
            styles: styles(),
            delegates: vec![
                Box::new(|_: usize| {}) as Delegate<'_>,
                Box::new(|_: usize| bells.set(bells.get() + 1)) as Delegate<'_>,
            ],
            ..TypewriterConfig::default()
        };
        let writer: Typewriter<'_, CellShaper> = Typewriter::new(shaper, config)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        boxes.push((writer, Units::<Glyph>::with_limit(128)));
    }

    let restart = |boxes: &mut [(Typewriter<'_, CellShaper>, Units<Glyph>)]| {
        for ((writer, units), origin) in boxes.iter_mut().zip(&origins) {
            units.clear();
            writer.start(*origin, SAMPLE_TEXT, units, options());
        }
    };

    let _guard = TerminalGuard::enter()?;
    let bindings = KeyBindings::default();
    let mut latch = KeyLatch::new();
    let mut out = OutputBuffer::new();
    let mut stdout = io::stdout();

    restart(boxes.as_mut_slice());

    'frames: loop {
        let frame_start = Instant::now();

        // Collect this frame's key presses until the frame is over.
        while event::poll(FRAME.saturating_sub(frame_start.elapsed()))? {
            let event = event::read()?;
            if let event::Event::Key(key) = &event {
                match key.code {
                    event::KeyCode::Char('q') => break 'frames,
                    event::KeyCode::Char('r') => restart(boxes.as_mut_slice()),
                    _ => {}
                }
            }
            latch.press(bindings.translate(&event));
        }

        for (writer, units) in &mut boxes {
            if !writer.done() {
                writer.update(units, &latch, &mut Silent);
            }
        }
        latch.end_frame();

        out.clear();
        out.clear_screen();
        out.paint(boxes.iter().flat_map(|(_, units)| units.iter()));

        let status = boxes
            .iter()
            .map(|(writer, _)| {
                if writer.done() {
                    "done"
                } else if writer.paused() {
                    "paused"
                } else {
                    "typing"
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");
        out.cursor_move(1, height.saturating_sub(1));
        out.write_str(&format!(
            "{status} | bells: {} | Enter resume, Esc skip, r restart, q quit",
            bells.get()
        ));
        out.flush_to(&mut stdout)?;
    }

    Ok(())
}
