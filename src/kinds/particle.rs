/// Particles: explosion bursts, their decaying afterglow and engine exhaust.
///
/// Every burst flavour is a parameter set over `spawn_explosion_particle`.

use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::Rng;

use crate::behavior::{render_sprite, Behavior};
use crate::compute::Simulation;
use crate::entities::{Entity, Kind, ParticleStyle, Sprite};
use crate::interface::{Channel, Renderer, SoundId};
use crate::registry::EntityId;
use crate::sprites;
use crate::vec2f::Vec2f;

/// Age after which a particle dies.
pub const PARTICLE_LIFETIME: u32 = 25;

const SPIN_STEP: f32 = 45.0;
const FADE_STEP: u8 = 5;
const FADE_FLOOR: u8 = 25;
const DECAY_START_FRAME: u32 = 5;

pub static BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render_sprite),
    take_damage: None,
    on_death: Some(leave_decay),
};

pub static DECAY_BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render_sprite),
    take_damage: None,
    on_death: None,
};

pub static THRUSTER_BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render_shimmer),
    take_damage: None,
    on_death: Some(leave_decay),
};

// ── Burst flavours ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstFlavor {
    /// Orange-red sparks of mixed size.
    Standard,
    /// One hue family picked per burst.
    RandomHue,
    Purple,
    Green,
    /// Small white rock chips.
    AsteroidDebris,
}

/// Per-channel tint ranges.
#[derive(Clone, Debug, PartialEq)]
pub struct Tint {
    pub r: RangeInclusive<u8>,
    pub g: RangeInclusive<u8>,
    pub b: RangeInclusive<u8>,
    pub a: RangeInclusive<u8>,
}

impl Tint {
    const fn new(
        r: RangeInclusive<u8>,
        g: RangeInclusive<u8>,
        b: RangeInclusive<u8>,
        a: RangeInclusive<u8>,
    ) -> Self {
        Self { r, g, b, a }
    }

    fn sample(&self, rng: &mut StdRng) -> [u8; 4] {
        [
            rng.gen_range(self.r.clone()),
            rng.gen_range(self.g.clone()),
            rng.gen_range(self.b.clone()),
            rng.gen_range(self.a.clone()),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BurstParams {
    pub count: RangeInclusive<u32>,
    pub max_radius: f32,
    pub min_velocity: f32,
    pub max_velocity: f32,
    pub sprites: &'static [Sprite],
    /// Scale is `scale.0 + scale.1 * r` for uniform `r` in `[0, 1)`.
    pub scale: (f32, f32),
    pub tint: Tint,
}

static BURST_SPRITES: [Sprite; 1] = [sprites::STAR_BURST];
const BURST_ALPHA: RangeInclusive<u8> = 25..=200;

impl BurstFlavor {
    /// Resolved per burst, so `RandomHue` settles on its hue family here.
    pub fn params(self, rng: &mut StdRng) -> BurstParams {
        let star = |count, scale, tint| BurstParams {
            count,
            max_radius: 20.0,
            min_velocity: 0.0,
            max_velocity: 10.0,
            sprites: &BURST_SPRITES,
            scale,
            tint,
        };
        match self {
            BurstFlavor::Standard => star(
                25..=50,
                (0.25, 0.75),
                Tint::new(200..=255, 25..=125, 0..=10, BURST_ALPHA),
            ),
            BurstFlavor::RandomHue => {
                let tint = match rng.gen_range(0..6) {
                    0 => Tint::new(200..=255, 0..=25, 0..=50, BURST_ALPHA),
                    1 => Tint::new(0..=25, 200..=255, 0..=50, BURST_ALPHA),
                    2 => Tint::new(0..=50, 0..=25, 200..=255, BURST_ALPHA),
                    3 => Tint::new(200..=255, 200..=255, 0..=25, BURST_ALPHA),
                    4 => Tint::new(200..=255, 100..=150, 0..=25, BURST_ALPHA),
                    _ => Tint::new(200..=255, 0..=25, 200..=255, BURST_ALPHA),
                };
                star(25..=25, (0.75, 0.0), tint)
            }
            BurstFlavor::Purple => star(
                25..=25,
                (0.75, 0.0),
                Tint::new(225..=255, 26..=106, 200..=255, BURST_ALPHA),
            ),
            BurstFlavor::Green => star(
                25..=25,
                (0.75, 0.0),
                Tint::new(0..=25, 200..=255, 0..=75, BURST_ALPHA),
            ),
            BurstFlavor::AsteroidDebris => BurstParams {
                count: 15..=75,
                max_radius: 5.0,
                min_velocity: 0.0,
                max_velocity: 5.0,
                sprites: &sprites::DEBRIS,
                scale: (0.0, 0.75),
                tint: Tint::new(255..=255, 255..=255, 255..=255, BURST_ALPHA),
            },
        }
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Everything one explosion particle needs.
#[derive(Clone, Copy, Debug)]
pub struct ParticleSeed {
    pub origin: Vec2f,
    pub sprite: Sprite,
    pub scale: f32,
    pub max_radius: f32,
    pub min_velocity: f32,
    pub max_velocity: f32,
    pub rgba: [u8; 4],
}

/// A single particle placed at a random point within `max_radius` of the
/// origin, flying off with a random per-axis velocity.
pub fn spawn_explosion_particle(sim: &mut Simulation, seed: ParticleSeed) -> EntityId {
    let rng = &mut sim.rng;
    let mut particle = Entity::new(Kind::Particle(ParticleStyle::Explosion), seed.sprite);
    particle.flags.alive = true;

    let theta = TAU * rng.gen::<f32>();
    let radius = seed.max_radius * rng.gen::<f32>();
    particle.x = seed.origin.x + radius * theta.cos();
    particle.y = seed.origin.y + radius * theta.sin();
    particle.dx = scatter(rng, seed.min_velocity, seed.max_velocity);
    particle.dy = scatter(rng, seed.min_velocity, seed.max_velocity);

    particle.speed = 1.0;
    particle.angle = 45.0;
    particle.spritescale = seed.scale;
    particle.rgba = seed.rgba;
    particle.frame = rng.gen_range(0..=5);
    sim.spawn(particle)
}

/// `min + max * r` with a random sign.
pub(crate) fn scatter(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    let v = min + max * rng.gen::<f32>();
    if rng.gen_bool(0.5) {
        -v
    } else {
        v
    }
}

/// A full burst of the given flavour around `origin`. Returns how many
/// particles were spawned.
pub fn spawn_burst(sim: &mut Simulation, flavor: BurstFlavor, origin: Vec2f) -> u32 {
    let params = flavor.params(&mut sim.rng);
    let count = sim.rng.gen_range(params.count.clone());
    for _ in 0..count {
        let sprite = params.sprites[sim.rng.gen_range(0..params.sprites.len())];
        let scale = params.scale.0 + params.scale.1 * sim.rng.gen::<f32>();
        let rgba = params.tint.sample(&mut sim.rng);
        spawn_explosion_particle(
            sim,
            ParticleSeed {
                origin,
                sprite,
                scale,
                max_radius: params.max_radius,
                min_velocity: params.min_velocity,
                max_velocity: params.max_velocity,
                rgba,
            },
        );
    }
    count
}

/// One exhaust particle from the bottom centre of `from`, thrown in a short
/// cone away from the direction the ship is tilted.
pub fn spawn_thruster_particle(sim: &mut Simulation, from: &Entity) -> EntityId {
    let rng = &mut sim.rng;
    let mut particle = Entity::new(Kind::Particle(ParticleStyle::Thruster), sprites::STAR_THRUSTER);
    particle.flags.alive = true;
    particle.x = from.x + from.width() / 2.0 + rng.gen_range(-5..=5) as f32;
    particle.y = from.y + from.height();
    particle.spritescale = 0.25;

    particle.dy = 2.0 * rng.gen::<f32>();
    particle.dx = if from.angle < 0.0 {
        (rng.gen_range(2..=24) / rng.gen_range(2..=4)) as f32
    } else if from.angle > 0.0 {
        (rng.gen_range(2..=24) / rng.gen_range(-4..=-2)) as f32
    } else {
        (rng.gen_range(-1..=1) / rng.gen_range(1..=4)) as f32
    };

    particle.speed = 1.0;
    particle.angle = 45.0;
    particle.rgba = [rng.gen_range(225..=255), rng.gen_range(0..=155), 0, rng.gen_range(100..=200)];
    particle.frame = rng.gen_range(0..=5);
    sim.spawn(particle)
}

/// A random explosion sound on the shared channel.
pub fn play_explosion(sim: &mut Simulation) {
    let variant = sim.rng.gen_range(0..5);
    sim.play_sound(SoundId::Explode(variant), Channel::Any);
}

// ── Hooks ────────────────────────────────────────────────────────────────────

fn update(sim: &mut Simulation, id: EntityId) {
    let Some(particle) = sim.registry.get_mut(id) else {
        return;
    };
    particle.frame += 1;
    particle.advance();
    if particle.angle != 0.0 {
        particle.angle += SPIN_STEP;
    }
    if particle.rgba[3] > FADE_FLOOR && particle.frame % 2 == 0 {
        particle.rgba[3] -= FADE_STEP;
    }
    if particle.frame > PARTICLE_LIFETIME {
        particle.kill();
    }
}

/// Replace a dying particle with a slower one drifting on from the same spot.
fn leave_decay(sim: &mut Simulation, id: EntityId) {
    let Some(particle) = sim.registry.get(id) else {
        return;
    };
    let mut decay = Entity::new(Kind::Particle(ParticleStyle::Decay), particle.sprite);
    decay.flags.alive = true;
    decay.x = particle.x;
    decay.y = particle.y;
    decay.spritescale = particle.spritescale;
    decay.rgba = particle.rgba;
    let (dx, dy) = (particle.dx, particle.dy);

    decay.dy = dy / sim.rng.gen_range(2..=8) as f32;
    decay.dx = dx / sim.rng.gen_range(4..=8) as f32;
    decay.speed = sim.rng.gen_range(1..=3) as f32;
    decay.angle = 45.0;
    decay.frame = DECAY_START_FRAME;
    sim.spawn(decay);
}

/// Flash white every third frame.
fn render_shimmer(particle: &Entity, renderer: &mut dyn Renderer) {
    let rgba = if particle.frame % 3 == 0 {
        [255; 4]
    } else {
        particle.rgba
    };
    renderer.render_sprite(
        particle.sprite,
        particle.x,
        particle.y,
        particle.angle,
        particle.spritescale,
        rgba,
    );
}
