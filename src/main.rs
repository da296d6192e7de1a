mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use jumper::config::GameConfig;
use jumper::game::{Game, StepOutcome};
use jumper::input::{InputState, Key};
use jumper::level::{Level, LevelError};

const LOG_FILE: &str = "jumper.log";

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// OS key repeat runs at 15 Hz or faster, so 8 frames (≈133 ms at 60 FPS)
/// is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid level: {0}")]
    Level(#[from] LevelError),
}

// ── Input mapping ─────────────────────────────────────────────────────────────

fn key_for(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Key::Jump)
        }
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Key::Fire),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<Key, u64>, key: Key, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Drain pending terminal events into the held-key map and build this
/// frame's input snapshot.
fn poll_input(
    rx: &mpsc::Receiver<Event>,
    key_frame: &mut HashMap<Key, u64>,
    frame: u64,
) -> InputState {
    let mut input = InputState::new();

    while let Ok(ev) = rx.try_recv() {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            continue;
        };
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            input.press(Key::Quit);
            continue;
        }
        let Some(key) = key_for(&code) else {
            continue;
        };
        match kind {
            KeyEventKind::Press => {
                key_frame.insert(key, frame);
                input.press(key);
            }
            KeyEventKind::Repeat => {
                key_frame.insert(key, frame);
            }
            KeyEventKind::Release => {
                key_frame.remove(&key);
            }
        }
    }

    for key in [Key::Left, Key::Right, Key::Jump, Key::Fire] {
        if is_held(key_frame, key, frame) {
            input.set_held(key, true);
        }
    }
    input
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-step loop: one simulation tick per frame, then sleep off the rest
/// of the frame.  Slow frames are not caught up.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), AppError> {
    let frame_len = game.config().tick_duration();
    let mut key_frame: HashMap<Key, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let input = poll_input(rx, &mut key_frame, frame);
        if game.step(&input) == StepOutcome::Quit {
            return Ok(());
        }

        display::render(out, &game.render_frame(), game.config())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Log to a file; the terminal belongs to the game.  Logging is skipped if
/// the file cannot be created.
fn init_logging() {
    let Ok(file) = File::create(LOG_FILE) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn main() -> Result<(), AppError> {
    init_logging();

    let config = GameConfig::default();
    let level = Level::standard(&config)?;
    let mut game = Game::new(config, level, StdRng::from_entropy());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events; terminals without the kitty protocol fall
    // back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads happen on their own thread so the game loop
    // never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    tracing::info!("session started");
    let result = game_loop(&mut out, &mut game, &rx);
    tracing::info!(ticks = game.tick(), "session ended");

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
