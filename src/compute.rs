/// Per-frame simulation step.
///
/// `Simulation` is the context every behaviour hook receives: the registry,
/// the input snapshot, score, world timers, the RNG and the audio sink. One
/// call to `step` is one tick and runs three phases in order:
///
/// 1. update: every entity alive at the start of the pass, in list order;
///    entities spawned during the pass wait for the next tick
/// 2. cooldown/reap: tick cooldowns, then run death hooks and unlink the
///    dead; anything a death hook spawns also waits for the next tick
/// 3. world timers: asteroid wave countdown and background scroll

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::entities::Entity;
use crate::interface::{AudioSink, Channel, KeyState, Renderer, SilentAudio, SoundId};
use crate::kinds::asteroid;
use crate::registry::{EntityId, Registry};

// ── Arena & world timers ─────────────────────────────────────────────────────

pub const ARENA_WIDTH: f32 = 1024.0;
pub const ARENA_HEIGHT: f32 = 768.0;

pub const BACKGROUND_TILE_HEIGHT: f32 = 256.0;
pub const BACKGROUND_SCROLL_STEP: f32 = 4.0;

pub const INITIAL_ASTEROID_TIMER: u32 = 50;
pub const ASTEROID_TIMER_RANGE: RangeInclusive<u32> = 15..=55;

const HUD_COLOR: [u8; 4] = [242, 242, 242, 255];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepMode {
    /// Everything updates.
    Full,
    /// Menu/score screens: the player's ship (if any) is frozen, the rest of
    /// the field keeps moving as backdrop.
    Decorative,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReapReport {
    pub reaped: usize,
    pub player_died: bool,
}

pub struct Simulation {
    pub registry: Registry,
    pub input: KeyState,
    pub score: u32,
    /// Ticks until the next asteroid spawns.
    pub asteroid_timer: u32,
    pub bg_offset: f32,
    pub frame: u64,
    pub rng: StdRng,
    audio: Box<dyn AudioSink>,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        Self {
            registry: Registry::new(),
            input: KeyState::new(),
            score: 0,
            asteroid_timer: INITIAL_ASTEROID_TIMER,
            bg_offset: 0.0,
            frame: 0,
            rng: StdRng::seed_from_u64(seed),
            audio: Box::new(SilentAudio),
        }
    }

    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = audio;
        self
    }

    // ── Services for behaviour hooks ────────────────────────────────────────

    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        trace!(kind = ?entity.kind, x = entity.x, y = entity.y, "spawn");
        self.registry.add(entity)
    }

    pub fn play_sound(&mut self, sound: SoundId, channel: Channel) {
        self.audio.play_sound(sound, channel);
    }

    /// Percent roll, `percent` in `0..=100`.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.rng.gen_ratio(percent.min(100), 100)
    }

    /// Apply one hit to `target` through its `take_damage` hook, or kill it
    /// outright when its kind has none.
    pub fn damage(&mut self, target: EntityId) {
        let Some(entity) = self.registry.get(target) else {
            return;
        };
        match entity.kind.behavior().take_damage {
            Some(take_damage) => take_damage(self, target),
            None => {
                if let Some(entity) = self.registry.get_mut(target) {
                    entity.kill();
                }
            }
        }
    }

    pub fn floating_text_alive(&self) -> bool {
        self.registry
            .iter()
            .any(|(_, e)| e.is_floating_text() && e.is_alive())
    }

    // ── Phases ──────────────────────────────────────────────────────────────

    pub fn step(&mut self, mode: StepMode) -> ReapReport {
        self.update_phase(mode);
        let report = self.cooldown_reap_phase();
        self.world_timer_phase();
        self.frame += 1;
        report
    }

    pub fn update_phase(&mut self, mode: StepMode) {
        for id in self.registry.ids() {
            let Some(entity) = self.registry.get(id) else {
                continue;
            };
            if !entity.is_alive() {
                continue;
            }
            if mode == StepMode::Decorative && entity.is_player_ship() {
                continue;
            }
            if let Some(update) = entity.kind.behavior().update {
                update(self, id);
            }
        }
    }

    pub fn cooldown_reap_phase(&mut self) -> ReapReport {
        let mut report = ReapReport::default();
        for id in self.registry.ids() {
            let Some(entity) = self.registry.get_mut(id) else {
                continue;
            };
            if entity.cooldown > 0 {
                entity.cooldown -= 1;
            } else {
                entity.flags.on_cooldown = false;
            }
            if !entity.is_alive() {
                self.reap(id, &mut report);
            }
        }
        report
    }

    /// Reap the dead without touching cooldowns.
    pub fn sweep_dead(&mut self) -> ReapReport {
        let mut report = ReapReport::default();
        for id in self.registry.ids() {
            if self.registry.get(id).is_some_and(|e| !e.is_alive()) {
                self.reap(id, &mut report);
            }
        }
        report
    }

    fn reap(&mut self, id: EntityId, report: &mut ReapReport) {
        let Some(entity) = self.registry.get(id) else {
            return;
        };
        if let Some(on_death) = entity.kind.behavior().on_death {
            on_death(self, id);
        }
        if let Some(dead) = self.registry.remove(id) {
            report.reaped += 1;
            if dead.is_player_ship() {
                report.player_died = true;
            }
        }
    }

    pub fn world_timer_phase(&mut self) {
        if self.asteroid_timer > 0 {
            self.asteroid_timer -= 1;
        } else {
            asteroid::spawn_asteroid(self);
            self.asteroid_timer = self.rng.gen_range(ASTEROID_TIMER_RANGE);
        }

        self.bg_offset += BACKGROUND_SCROLL_STEP;
        if self.bg_offset > BACKGROUND_TILE_HEIGHT {
            self.bg_offset = 0.0;
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────────

    /// Every entity through its render hook, in list order.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for (_, entity) in self.registry.iter() {
            if let Some(render) = entity.kind.behavior().render {
                render(entity, renderer);
            }
        }
    }

    /// Score and hull integrity while a ship exists, otherwise "GAME OVER".
    pub fn render_hud(&self, renderer: &mut dyn Renderer) {
        match self.registry.find_player().and_then(|id| self.registry.get(id)) {
            Some(player) => {
                renderer.render_text(&format!("Points: {}", self.score), 20.0, 2.0, HUD_COLOR);
                let color = match player.health {
                    1 => [242, 142, 142, 255],
                    2 => [242, 192, 192, 255],
                    3 => [192, 242, 192, 255],
                    _ => HUD_COLOR,
                };
                renderer.render_text(
                    &format!("Hull Integrity: {}%", player.health * 25),
                    20.0,
                    ARENA_HEIGHT - 22.0,
                    color,
                );
            }
            None => {
                renderer.render_text(
                    "GAME OVER",
                    ARENA_WIDTH / 2.0 - 54.0,
                    ARENA_HEIGHT / 2.0,
                    HUD_COLOR,
                );
            }
        }
    }
}
