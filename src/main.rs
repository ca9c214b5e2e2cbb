mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use serde::Serialize;

use space_invaders::input::HeldKeys;
use space_invaders::stream::{replay, EventStream, ScriptedEvent};
use space_invaders::{initial_state, reduce, Body, Direction, Event, GameConfig, GameState, GameStatus};

/// Ticks between redraws.  The simulation runs at 100 Hz; 3 ticks ≈ 33 FPS.
const RENDER_EVERY: u64 = 3;

/// Min ticks between shots while Space is auto-repeating.
const SHOOT_COOLDOWN: u64 = 25;

/// A direction key is considered released if no press/repeat arrived within
/// this many ticks.  The OS key-repeat rate is ≥ 15 Hz, so 13 ticks
/// (≈130 ms) is always refreshed while the key is actually held.
const HOLD_WINDOW: u64 = 13;

#[derive(Parser)]
#[command(name = "space_invaders")]
#[command(about = "Space Invaders in the terminal, driven by a pure state reducer")]
struct Args {
    /// JSON file overriding any part of the default configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the random sample stream (defaults to the config's seed)
    #[arg(long)]
    seed: Option<u32>,

    /// Start in endless mode
    #[arg(long)]
    endless: bool,

    /// Run without a terminal for this many ticks and print a JSON summary
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// JSON list of `{ "tick": n, "event": ... }` inputs for headless runs
    #[arg(long, requires = "headless")]
    script: Option<PathBuf>,
}

/// What a headless run reports.
#[derive(Serialize)]
struct Summary {
    status: GameStatus,
    score: u64,
    level: u32,
    lives: u32,
    elapsed: u64,
    aliens: usize,
    shields: usize,
    bullets: usize,
}

impl From<&GameState> for Summary {
    fn from(state: &GameState) -> Self {
        Self {
            status: state.status,
            score: state.score,
            level: state.level,
            lives: state.ship.lives,
            elapsed: state.elapsed,
            aliens: state.aliens.len(),
            shields: state.shields.len(),
            bullets: state.bullets.len(),
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to stderr for headless runs and to a file otherwise, so they
/// never scribble over the alternate screen.
fn init_logging(interactive: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if interactive {
        match File::create("space_invaders.log") {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.init();
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start { endless: bool },
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<TermEvent>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  SPACE  INVADERS  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(4),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("P", "Campaign", Color::Green, "Three hand-built levels"),
        ("E", "Endless ", Color::Red, "Random formations, no end"),
    ];
    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(16), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<9}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(16), cy + 3))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    loop {
        match rx.recv() {
            Ok(TermEvent::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    return Ok(MenuResult::Start { endless: false })
                }
                KeyCode::Char('e') | KeyCode::Char('E') => {
                    return Ok(MenuResult::Start { endless: true })
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit)
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn key_direction(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Runs until the player quits.
///
/// Terminal key events are turned into discrete game events: the first press
/// of a direction key becomes `Move`, its release becomes `StopMoving`.
/// A key that has gone quiet for `HOLD_WINDOW` ticks is treated as released,
/// whether or not the terminal reports releases.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    mut state: GameState,
    mut stream: EventStream,
    rx: &mpsc::Receiver<TermEvent>,
) -> std::io::Result<()> {
    let frame = Duration::from_millis(config.tick_ms.max(1));

    let mut held = HeldKeys::new(HOLD_WINDOW, config.ship.speed);
    let mut last_shot: Option<u64> = None;
    let mut exits: Vec<Body> = Vec::new();

    loop {
        let frame_start = Instant::now();
        let now = state.elapsed;
        let mut input: Vec<Event> = Vec::new();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(term_event) = rx.try_recv() {
            let TermEvent::Key(KeyEvent { code, kind, modifiers, .. }) = term_event else {
                continue;
            };
            match (kind, key_direction(&code)) {
                (KeyEventKind::Press | KeyEventKind::Repeat, Some(direction)) => {
                    input.extend(held.press(direction, now));
                }
                (KeyEventKind::Release, Some(direction)) => {
                    input.extend(held.release(direction));
                }
                (KeyEventKind::Press, None) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    KeyCode::Char(' ') => {
                        let ready = last_shot.map_or(true, |t| now.saturating_sub(t) >= SHOOT_COOLDOWN);
                        if ready {
                            input.push(Event::Shoot);
                            last_shot = Some(now);
                        }
                    }
                    KeyCode::Char('p') | KeyCode::Char('P') => {
                        input.push(Event::Play { endless: false })
                    }
                    KeyCode::Char('e') | KeyCode::Char('E') => {
                        input.push(Event::Play { endless: true })
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        input.extend(held.expire(now));

        // ── Fold this tick's events ───────────────────────────────────────────
        for event in stream.advance(input) {
            state = reduce(&state, &event, config);
            exits.extend(state.exited.iter().cloned());
        }

        if state.elapsed % RENDER_EVERY == 0 {
            display::render(out, &state, &exits, config.canvas_size)?;
            exits.clear();
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.headless.is_none());

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or(config.rng_seed);

    if let Some(ticks) = args.headless {
        return run_headless(&config, seed, ticks, &args);
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Writing the flags succeeds on any sink, so ask the terminal first.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Blocking reads live on their own thread; the loop only polls the channel.
    let (tx, rx) = mpsc::channel::<TermEvent>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &config, seed, args.endless, &rx);

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal game loop failed")
}

fn run<W: Write>(
    out: &mut W,
    config: &GameConfig,
    seed: u32,
    endless: bool,
    rx: &mpsc::Receiver<TermEvent>,
) -> std::io::Result<()> {
    let endless = if endless {
        true
    } else {
        match show_menu(out, rx)? {
            MenuResult::Quit => return Ok(()),
            MenuResult::Start { endless } => endless,
        }
    };

    let state = reduce(&initial_state(config), &Event::Play { endless }, config);
    let stream = EventStream::new(config, seed);
    game_loop(out, config, state, stream, rx)
}

fn run_headless(config: &GameConfig, seed: u32, ticks: u64, args: &Args) -> anyhow::Result<()> {
    let mut script: Vec<ScriptedEvent> = match &args.script {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            serde_json::from_str(&text).context("failed to parse script")?
        }
        None => Vec::new(),
    };
    if args.endless {
        script.insert(0, ScriptedEvent { tick: 0, event: Event::Play { endless: true } });
    }

    log::info!("Headless run: seed {seed}, {ticks} ticks, {} scripted events", script.len());
    let state = replay(config, seed, script, ticks);
    println!("{}", serde_json::to_string_pretty(&Summary::from(&state))?);
    Ok(())
}
