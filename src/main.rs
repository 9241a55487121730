mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use laser_defender::audio::Audio;
use laser_defender::config::{GameConfig, Settings, FPS};
use laser_defender::game::{GameState, Input};
use laser_defender::highscore::HighScoreStore;
use laser_defender::logging;

const FRAME: Duration = Duration::from_millis(1000 / FPS as u64);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

/// Fold one key press into this frame's one-shot inputs.  Returns `true`
/// when the press asks to quit.
fn press(input: &mut Input, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('r') | KeyCode::Char('R') => input.reset = true,
        KeyCode::Char(c @ '1'..='5') => input.style = c.to_digit(10).map(|d| d as u8),
        KeyCode::Char('m') | KeyCode::Char('M') => input.toggle_music = true,
        KeyCode::Char('h') | KeyCode::Char('H') => input.toggle_high_scores = true,
        KeyCode::Char('c') | KeyCode::Char('C') => input.clear_scores = true,
        _ => {}
    }
    false
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the held keys (move, shoot)
/// are the ones still "fresh" within `HOLD_WINDOW`; one-shot keys (reset,
/// style, toggles) fire once per press.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    audio: &mut Audio,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt_ms = frame_start.duration_since(last_frame).as_millis() as u64;
        last_frame = frame_start;
        frame += 1;

        let mut input = Input::default();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if press(&mut input, code, modifiers) {
                        tracing::info!("quit requested");
                        return Ok(());
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        input.left = any_held(
            &key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        );
        input.right = any_held(
            &key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        );
        input.shoot = is_held(&key_frame, &KeyCode::Char(' '), frame);

        let events = state.update(&input, dt_ms, &mut rng);
        for sound in &events.sounds {
            audio.play(*sound);
        }
        if let Some(on) = events.music {
            audio.set_music(on);
        }

        display::render(out, &state.view())?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    let _log_guard = match logging::init(&settings.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("logging disabled ({}): {e}", settings.log_dir.display());
            None
        }
    };
    tracing::info!(
        scores = %settings.scores_path.display(),
        player = %settings.player_name,
        "starting laser defender"
    );

    let config = GameConfig::default();
    let high_scores = HighScoreStore::load_with_capacity(&settings.scores_path, config.max_high_scores);
    let mut audio = Audio::new(settings.music_enabled);
    let mut state = GameState::new(config, high_scores, settings.player_name.clone())
        .with_music(settings.music_enabled);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut state, &mut audio, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!("terminal error: {e}");
    }
    result?;
    tracing::info!("bye");
    Ok(())
}
