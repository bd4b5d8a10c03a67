mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

use space_shooter::compute::Simulation;
use space_shooter::config::GameConfig;
use space_shooter::game::{Game, GameState};
use space_shooter::interface::{Key, KeyState};
use space_shooter::scores::{JsonScoreStore, NullScoreStore, ScoreStore};
use space_shooter::timestep::FixedTimestep;

use display::TerminalRenderer;

/// A key counts as held if its last press/repeat event arrived within this
/// many ticks. Covers terminals that never report key releases: OS key
/// repeat (≥ 15 Hz) refreshes it before it expires.
const HOLD_WINDOW: u64 = 8;

#[derive(Debug, Parser)]
#[command(author, version, about = "Terminal space shooter")]
struct Cli {
    /// Path to a YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the RNG (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Highscore file (overrides the config file)
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Run this many ticks on autopilot without a terminal, then print a summary
    #[arg(long)]
    headless: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path).context("loading config")?,
        None => GameConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.scores.is_some() {
        config.scores_path = cli.scores.clone();
    }

    init_logging(&config)?;
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, tick_millis = config.tick_millis, "starting");

    match cli.headless {
        Some(ticks) => run_headless(&config, seed, ticks),
        None => run_terminal(&config, seed),
    }
}

/// Logs go to a file: the terminal belongs to the game while it runs.
fn init_logging(config: &GameConfig) -> Result<()> {
    let file = File::create(&config.logging.file)
        .with_context(|| format!("creating log file {}", config.logging.file.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("parsing log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn new_game(config: &GameConfig, seed: u64, store: Box<dyn ScoreStore>) -> Game {
    Game::new(Simulation::new(seed), store, config.resolved_pilot_name())
}

// ── Headless ──────────────────────────────────────────────────────────────────

/// Autopilot: hold fire, sweep left and right, tap a key twice a second so
/// menus and score screens move on.
fn autopilot(tick: u64) -> KeyState {
    let mut keys = KeyState::new().with(Key::Fire);
    keys.set(if (tick / 60) % 2 == 0 { Key::Left } else { Key::Right }, true);
    keys.any_pressed = tick % 30 == 0;
    keys
}

fn run_headless(config: &GameConfig, seed: u64, ticks: u64) -> Result<()> {
    let store: Box<dyn ScoreStore> = match &config.scores_path {
        Some(path) => Box::new(JsonScoreStore::new(path)),
        None => Box::new(NullScoreStore),
    };
    let mut game = new_game(config, seed, store);
    let mut games_played = 0;
    for tick in 0..ticks {
        let before = game.state;
        game.tick(autopilot(tick));
        if before == GameState::Playing && game.state == GameState::GameOver {
            games_played += 1;
        }
    }
    println!(
        "seed {seed}: {ticks} ticks, state {:?}, score {}, {} entities, \
         {games_played} games finished, best {}",
        game.state,
        game.sim.score,
        game.sim.registry.len(),
        game.scores.best().unwrap_or(0),
    );
    Ok(())
}

// ── Terminal ──────────────────────────────────────────────────────────────────

fn run_terminal(config: &GameConfig, seed: u64) -> Result<()> {
    let store = JsonScoreStore::new(config.resolved_scores_path());
    info!(path = %store.path().display(), "highscore file");
    let game = new_game(config, seed, Box::new(store));

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key release/repeat events; terminals without the protocol
    // fall back to HOLD_WINDOW expiry.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, game, &rx, Duration::from_millis(config.tick_millis));

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

/// Tracks when each key was last seen so several can be held at once.
struct InputTracker {
    key_tick: HashMap<KeyCode, u64>,
    pressed: bool,
}

impl InputTracker {
    fn new() -> Self {
        Self {
            key_tick: HashMap::new(),
            pressed: false,
        }
    }

    /// Returns `false` when the player asked to quit.
    fn handle(&mut self, key: KeyEvent, tick: u64) -> bool {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key;
        match kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return false,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return false
                    }
                    _ => {}
                }
                self.key_tick.insert(code, tick);
                self.pressed = true;
            }
            KeyEventKind::Repeat => {
                self.key_tick.insert(code, tick);
            }
            KeyEventKind::Release => {
                self.key_tick.remove(&code);
            }
        }
        true
    }

    fn is_held(&self, code: KeyCode, tick: u64) -> bool {
        self.key_tick
            .get(&code)
            .map(|&last| tick.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn any_held(&self, codes: &[KeyCode], tick: u64) -> bool {
        codes.iter().any(|code| self.is_held(*code, tick))
    }

    /// This tick's key table; the press signal is consumed.
    fn snapshot(&mut self, tick: u64) -> KeyState {
        let mut keys = KeyState::new();
        let bindings: [(Key, &[KeyCode]); Key::COUNT] = [
            (Key::Up, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            (Key::Down, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            (Key::Left, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            (Key::Right, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            (Key::Fire, &[KeyCode::Char(' ')]),
            (Key::Confirm, &[KeyCode::Enter]),
        ];
        for (key, codes) in bindings {
            keys.set(key, self.any_held(codes, tick));
        }
        keys.any_pressed = std::mem::take(&mut self.pressed);
        keys
    }
}

fn game_loop<W: Write>(
    out: &mut W,
    mut game: Game,
    rx: &mpsc::Receiver<Event>,
    step: Duration,
) -> Result<()> {
    let (width, height) = terminal::size().context("reading terminal size")?;
    let mut renderer = TerminalRenderer::new(width, height);
    let mut input = InputTracker::new();
    let mut timestep = FixedTimestep::new(step);
    let mut tick: u64 = 0;
    let mut last = Instant::now();

    loop {
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => {
                    if !input.handle(key, tick) {
                        info!(tick, "quit requested");
                        return Ok(());
                    }
                }
                Event::Resize(w, h) => renderer.resize(w, h),
                _ => {}
            }
        }

        let now = Instant::now();
        let due = timestep.accumulate(now - last);
        last = now;
        for _ in 0..due {
            let keys = input.snapshot(tick);
            game.tick(keys);
            tick += 1;
        }

        if due > 0 {
            renderer.clear();
            game.render(&mut renderer);
            renderer.present(out).context("drawing frame")?;
        }

        thread::sleep(timestep.until_next());
    }
}
