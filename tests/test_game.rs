use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use space_shooter::compute::Simulation;
use space_shooter::entities::Sprite;
use space_shooter::error::Result;
use space_shooter::game::{Game, GameState, GAME_OVER_PAUSE};
use space_shooter::interface::{Key, KeyState, Renderer};
use space_shooter::scores::{
    HighscoreTable, JsonScoreStore, NullScoreStore, ScoreStore, NUM_HIGHSCORES,
};

/// Remembers every table it is asked to save.
#[derive(Clone, Default)]
struct RecordingStore {
    saved: Rc<RefCell<Vec<HighscoreTable>>>,
}

impl ScoreStore for RecordingStore {
    fn load(&self) -> Result<Option<HighscoreTable>> {
        Ok(None)
    }

    fn save(&self, table: &HighscoreTable) -> Result<()> {
        self.saved.borrow_mut().push(table.clone());
        Ok(())
    }
}

#[derive(Default)]
struct TextRenderer {
    texts: Vec<String>,
}

impl Renderer for TextRenderer {
    fn render_sprite(&mut self, _: Sprite, _: f32, _: f32, _: f32, _: f32, _: [u8; 4]) {}

    fn render_text(&mut self, text: &str, _: f32, _: f32, _: [u8; 4]) {
        self.texts.push(text.to_string());
    }
}

fn idle() -> KeyState {
    KeyState::new()
}

fn tap() -> KeyState {
    let mut keys = KeyState::new();
    keys.any_pressed = true;
    keys
}

fn confirm() -> KeyState {
    let mut keys = KeyState::new().with(Key::Confirm);
    keys.any_pressed = true;
    keys
}

fn new_game(store: Box<dyn ScoreStore>) -> Game {
    let mut game = Game::new(Simulation::new(7), store, "Tester");
    game.sim.asteroid_timer = 10_000;
    game
}

fn playing_game(store: Box<dyn ScoreStore>) -> Game {
    let mut game = new_game(store);
    game.tick(confirm());
    game.tick(idle());
    assert_eq!(game.state, GameState::Playing);
    game
}

fn kill_player(game: &mut Game) {
    let ship = game.sim.registry.find_player().expect("a ship is in play");
    game.sim.registry.get_mut(ship).unwrap().kill();
}

// ── menu & new game ───────────────────────────────────────────────────────────

#[test]
fn starts_in_menu_with_default_scores() {
    let game = new_game(Box::new(NullScoreStore));
    assert_eq!(game.state, GameState::Menu);
    assert_eq!(game.scores.entries.len(), NUM_HIGHSCORES);
    assert!(game.scores.is_sorted());
}

#[test]
fn menu_waits_for_confirm() {
    let mut game = new_game(Box::new(NullScoreStore));
    game.tick(idle());
    game.tick(tap());
    assert_eq!(game.state, GameState::Menu);

    game.tick(confirm());
    assert_eq!(game.state, GameState::NewGame);
}

#[test]
fn fire_also_confirms() {
    let mut game = new_game(Box::new(NullScoreStore));
    let mut keys = KeyState::new().with(Key::Fire);
    keys.any_pressed = true;
    game.tick(keys);
    assert_eq!(game.state, GameState::NewGame);
}

#[test]
fn new_game_places_ship_and_greeting() {
    let mut game = new_game(Box::new(NullScoreStore));
    game.sim.score = 999;
    game.tick(confirm());
    game.tick(idle());

    assert_eq!(game.state, GameState::Playing);
    assert_eq!(game.sim.score, 0);
    assert_eq!(game.sim.registry.len(), 3);
    let ship = game.sim.registry.find_player().unwrap();
    assert!(game.sim.registry.get(ship).unwrap().flags.invulnerable);
    let greetings = game
        .sim
        .registry
        .iter()
        .filter(|(_, e)| e.text.as_deref() == Some("GOOD LUCK"))
        .count();
    assert_eq!(greetings, 2);
}

#[test]
fn new_game_clears_leftovers() {
    let mut game = new_game(Box::new(NullScoreStore));
    game.sim.asteroid_timer = 0;
    game.tick(idle());
    assert_eq!(game.sim.registry.len(), 1);
    game.sim.asteroid_timer = 10_000;

    game.tick(confirm());
    game.tick(idle());
    assert!(game.sim.registry.iter().all(|(_, e)| e.is_player_ship() || e.is_floating_text()));
}

// ── game over ─────────────────────────────────────────────────────────────────

#[test]
fn losing_the_ship_records_the_score() {
    let store = RecordingStore::default();
    let mut game = playing_game(Box::new(store.clone()));
    game.sim.score = 6000;
    kill_player(&mut game);

    game.tick(idle());
    assert_eq!(game.state, GameState::GameOver);

    let recent: Vec<_> = game.scores.entries.iter().filter(|e| e.recent).collect();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].name, "Ensign Tester");
    assert_eq!(recent[0].score, 6000);

    let saved = store.saved.borrow();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0], game.scores);
}

#[test]
fn game_over_holds_until_the_pause_ends() {
    let mut game = playing_game(Box::new(NullScoreStore));
    kill_player(&mut game);
    game.tick(idle());
    assert_eq!(game.state, GameState::GameOver);

    game.tick(tap());
    assert_eq!(game.state, GameState::GameOver);

    for _ in 0..GAME_OVER_PAUSE + 10 {
        game.tick(idle());
    }
    game.tick(tap());
    assert_eq!(game.state, GameState::Scores);

    game.tick(idle());
    assert_eq!(game.state, GameState::Scores);
    game.tick(tap());
    assert_eq!(game.state, GameState::Menu);
}

#[test]
fn playing_continues_while_ship_survives() {
    let mut game = playing_game(Box::new(NullScoreStore));
    for _ in 0..200 {
        game.tick(idle());
    }
    assert_eq!(game.state, GameState::Playing);
}

// ── persistence ───────────────────────────────────────────────────────────────

#[test]
fn unreadable_scores_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");
    fs::write(&path, "{ not json").unwrap();

    let game = new_game(Box::new(JsonScoreStore::new(&path)));
    assert_eq!(game.scores.entries.len(), NUM_HIGHSCORES);
}

#[test]
fn finished_game_is_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");

    let mut game = playing_game(Box::new(JsonScoreStore::new(&path)));
    game.sim.score = 20_000;
    kill_player(&mut game);
    game.tick(idle());

    let reloaded = JsonScoreStore::new(&path).load().unwrap().unwrap();
    assert_eq!(reloaded.entries[0].name, "Captain Tester");
    assert_eq!(reloaded.best(), Some(20_000));
}

// ── rendering ─────────────────────────────────────────────────────────────────

#[test]
fn each_screen_draws_its_own_text() {
    let mut game = new_game(Box::new(NullScoreStore));
    let mut r = TextRenderer::default();
    game.render(&mut r);
    assert!(r.texts.iter().any(|t| t == "SPACE SHOOTER"));

    game.tick(confirm());
    game.tick(idle());
    let mut r = TextRenderer::default();
    game.render(&mut r);
    assert!(r.texts.iter().any(|t| t.starts_with("Points:")));

    game.state = GameState::Scores;
    let mut r = TextRenderer::default();
    game.render(&mut r);
    assert!(r.texts.iter().any(|t| t == "HIGH SCORES"));
    assert_eq!(r.texts.iter().filter(|t| t.contains(". ")).count(), NUM_HIGHSCORES);
}
