/// Game-state driver: which flavour of the simulation step runs each tick,
/// and the side effects of moving between states.

use tracing::{info, warn};

use crate::compute::{Simulation, StepMode, ARENA_HEIGHT, ARENA_WIDTH};
use crate::interface::{KeyState, Renderer};
use crate::kinds::blip::{self, Blip};
use crate::kinds::player;
use crate::scores::{HighscoreTable, ScoreStore};

/// Frames the blank blip holds the game-over screen before a key can leave it.
pub const GAME_OVER_PAUSE: u32 = 120;

const GOOD_LUCK: &str = "GOOD LUCK";
const GOOD_LUCK_GLITCH_LIFE: u32 = 90;
const GOOD_LUCK_GLITCH_FLICKER: u8 = 50;
const GOOD_LUCK_STEADY_LIFE: u32 = 30;

const TEXT_COLOR: [u8; 4] = [242, 242, 242, 255];
const RECENT_COLOR: [u8; 4] = [242, 222, 92, 255];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    NewGame,
    Playing,
    GameOver,
    Scores,
}

pub struct Game {
    pub sim: Simulation,
    pub state: GameState,
    pub scores: HighscoreTable,
    pub pilot: String,
    store: Box<dyn ScoreStore>,
}

impl Game {
    /// Starts in the menu with the stored highscores, or a default table
    /// when none can be read.
    pub fn new(mut sim: Simulation, store: Box<dyn ScoreStore>, pilot: impl Into<String>) -> Self {
        let scores = match store.load() {
            Ok(Some(table)) => table,
            Ok(None) => HighscoreTable::defaults(&mut sim.rng),
            Err(err) => {
                warn!(%err, "could not load highscores, starting from defaults");
                HighscoreTable::defaults(&mut sim.rng)
            }
        };
        Self {
            sim,
            state: GameState::Menu,
            scores,
            pilot: pilot.into(),
            store,
        }
    }

    /// Advance one tick with this frame's input.
    pub fn tick(&mut self, input: KeyState) {
        self.sim.input = input;
        match self.state {
            GameState::Menu => {
                self.sim.step(StepMode::Decorative);
                if input.confirm() {
                    self.transition(GameState::NewGame);
                }
            }
            GameState::NewGame => {
                self.start_new_game();
                self.transition(GameState::Playing);
            }
            GameState::Playing => {
                let report = self.sim.step(StepMode::Full);
                if report.player_died {
                    self.finish_game();
                    self.transition(GameState::GameOver);
                }
            }
            GameState::GameOver => {
                self.sim.step(StepMode::Full);
                if input.any_pressed {
                    self.sim.sweep_dead();
                    if !self.sim.floating_text_alive() {
                        self.transition(GameState::Scores);
                    }
                }
            }
            GameState::Scores => {
                self.sim.step(StepMode::Decorative);
                if input.any_pressed {
                    self.transition(GameState::Menu);
                }
            }
        }
    }

    fn transition(&mut self, next: GameState) {
        info!(from = ?self.state, to = ?next, frame = self.sim.frame, "state change");
        self.state = next;
    }

    /// Wipe the field, place a fresh ship and wish the pilot luck.
    fn start_new_game(&mut self) {
        self.sim.registry.destroy_all();
        player::spawn_player(&mut self.sim);
        self.sim.score = 0;

        let (x, y) = (ARENA_WIDTH / 2.0 - 54.0, ARENA_HEIGHT / 2.0);
        // Two copies on top of each other: one glitching, one steady.
        blip::spawn_blip(
            &mut self.sim,
            Blip {
                x,
                y,
                text: GOOD_LUCK.to_string(),
                life: GOOD_LUCK_GLITCH_LIFE,
                flicker: GOOD_LUCK_GLITCH_FLICKER,
                rgba: TEXT_COLOR,
            },
        );
        blip::spawn_blip(
            &mut self.sim,
            Blip {
                x,
                y,
                text: GOOD_LUCK.to_string(),
                life: GOOD_LUCK_STEADY_LIFE,
                flicker: 0,
                rgba: TEXT_COLOR,
            },
        );
    }

    /// Commit the score and hold the game-over screen for a moment.
    fn finish_game(&mut self) {
        let score = self.sim.score;
        let rank = self.scores.add_score(score, &self.pilot);
        info!(score, ?rank, "game over");
        if let Err(err) = self.store.save(&self.scores) {
            warn!(%err, "could not save highscores");
        }
        blip::spawn_blip(
            &mut self.sim,
            Blip {
                x: 0.0,
                y: 0.0,
                text: String::new(),
                life: GAME_OVER_PAUSE,
                flicker: 0,
                rgba: [0; 4],
            },
        );
    }

    // ── Rendering ───────────────────────────────────────────────────────────

    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.sim.render(renderer);
        match self.state {
            GameState::Menu => self.render_menu(renderer),
            GameState::NewGame => {}
            GameState::Playing | GameState::GameOver => self.sim.render_hud(renderer),
            GameState::Scores => self.render_scores(renderer),
        }
    }

    fn render_menu(&self, renderer: &mut dyn Renderer) {
        let cx = ARENA_WIDTH / 2.0;
        let cy = ARENA_HEIGHT / 2.0;
        renderer.render_text("SPACE SHOOTER", cx - 78.0, cy - 60.0, TEXT_COLOR);
        renderer.render_text("Press FIRE to launch", cx - 120.0, cy, TEXT_COLOR);
        if let Some(best) = self.scores.best() {
            renderer.render_text(&format!("Best: {best}"), cx - 60.0, cy + 40.0, TEXT_COLOR);
        }
    }

    fn render_scores(&self, renderer: &mut dyn Renderer) {
        let x = ARENA_WIDTH / 2.0 - 180.0;
        let mut y = 120.0;
        renderer.render_text("HIGH SCORES", x, y, TEXT_COLOR);
        for (place, entry) in self.scores.entries.iter().enumerate() {
            y += 40.0;
            let color = if entry.recent { RECENT_COLOR } else { TEXT_COLOR };
            let line = format!("{:>2}. {:<24} {:>6}", place + 1, entry.name, entry.score);
            renderer.render_text(&line, x, y, color);
        }
    }
}
