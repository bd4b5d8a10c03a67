/// UFOs: saucers that sweep across the arena along a quadratic Bézier path,
/// firing down at the player.

use rand::Rng;
use tracing::debug;

use crate::behavior::{render_sprite, Behavior};
use crate::compute::{Simulation, ARENA_HEIGHT, ARENA_WIDTH};
use crate::entities::{Allegiance, CurveAi, Entity, Kind, Sprite};
use crate::interface::{Channel, SoundId};
use crate::kinds::particle::{self, BurstFlavor};
use crate::kinds::{pickup, projectile};
use crate::registry::EntityId;
use crate::sprites;
use crate::vec2f::{bezier_closed_form, Vec2f};

pub const UFO_SPEED: f32 = 8.0;
pub const UFO_SCALE: f32 = 0.75;
pub const UFO_HEALTH: i32 = 2;
/// Speed while fleeing after a hit.
pub const UFO_FLEE_SPEED: f32 = 24.0;
pub const FIRE_COOLDOWN: u32 = 60;

/// Frames per tick of the UFO's one-second clock.
const CLOCK_PERIOD: u32 = 60;
const SPIN_EVERY: u32 = 3;
const SPIN_STEP: f32 = 15.0;
const REVERSE_CHANCE: u32 = 15;
const PICKUP_CHANCE: u32 = 50;

pub static BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render_sprite),
    take_damage: Some(take_damage),
    on_death: Some(on_death),
};

/// A saucer whose path starts just off a top corner and ends off the
/// opposite side, somewhere in the top half.
pub fn create_ufo(sim: &mut Simulation, sprite: Sprite) -> Entity {
    let rng = &mut sim.rng;
    let mut ufo = Entity::new(Kind::Ufo, sprite);
    ufo.flags.alive = true;
    ufo.spritescale = UFO_SCALE;
    ufo.allegiance = Allegiance::Enemy;
    ufo.angle = 15.0;
    ufo.speed = UFO_SPEED;
    ufo.health = UFO_HEALTH;

    let x_off = (sprite.w / 2) as f32;
    let from_left = rng.gen_bool(0.5);
    let (start_x, end_x) = if from_left {
        (-x_off, ARENA_WIDTH + x_off)
    } else {
        (ARENA_WIDTH + x_off, -x_off)
    };
    ufo.ai = Some(CurveAi {
        start: Vec2f::new(start_x, 0.0),
        mid: Vec2f::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
        end: Vec2f::new(end_x, (ARENA_HEIGHT / 2.0) * rng.gen::<f32>()),
        t: 0.0,
        move_left: !from_left,
    });
    ufo
}

/// A saucer of random colour. With `from` it appears there and heads off in
/// a random direction; otherwise it enters from its path start.
pub fn spawn_ufo(sim: &mut Simulation, from: Option<Vec2f>) -> EntityId {
    let sprite = sprites::UFOS[sim.rng.gen_range(0..sprites::UFOS.len())];
    let mut ufo = create_ufo(sim, sprite);

    let move_left = sim.rng.gen_bool(0.5);
    if let Some(ai) = ufo.ai.as_mut() {
        if let Some(origin) = from {
            ai.start = origin;
            ai.move_left = move_left;
        }
        ufo.x = ai.start.x;
        ufo.y = ai.start.y;
    }
    debug!(x = ufo.x, y = ufo.y, "ufo spawned");
    let id = sim.spawn(ufo);
    sim.play_sound(SoundId::AlienSpawn, Channel::Any);
    id
}

fn update(sim: &mut Simulation, id: EntityId) {
    let reverse = sim.chance(REVERSE_CHANCE);
    let reroll = sim.rng.gen_bool(0.5);
    let new_y = ARENA_HEIGHT * sim.rng.gen::<f32>();

    let Some(ufo) = sim.registry.get_mut(id) else {
        return;
    };

    ufo.frame += 1;
    if ufo.frame % SPIN_EVERY == 0 {
        ufo.angle += SPIN_STEP;
    }
    if ufo.frame > CLOCK_PERIOD {
        ufo.frame = 0;
        if reverse {
            if let Some(ai) = ufo.ai.as_mut() {
                ai.move_left = !ai.move_left;
            }
        }
        if ufo.flags.invulnerable {
            ufo.flags.invulnerable = false;
            ufo.rgba[3] = 255;
            ufo.speed = UFO_SPEED;
        }
    }
    if ufo.flags.invulnerable {
        ufo.rgba[3] = if ufo.frame % 2 == 0 { 150 } else { 25 };
    }

    let step = ufo.speed / 1000.0;
    if let Some(ai) = ufo.ai.as_mut() {
        if ai.move_left {
            ai.t -= step;
        } else {
            ai.t += step;
        }
        // At either end turn round, sometimes moving the far endpoint.
        if ai.t <= 0.0 {
            ai.t = 0.0;
            ai.move_left = false;
            if reroll {
                ai.end.y = new_y;
            }
        }
        if ai.t >= 1.0 {
            ai.t = 1.0;
            ai.move_left = true;
            if reroll {
                ai.start.y = new_y;
            }
        }
        let pos = bezier_closed_form(ai.start, ai.mid, ai.end, ai.t);
        ufo.x = pos.x;
        ufo.y = pos.y;
    }

    if ufo.cooldown > 0 || ufo.flags.invulnerable {
        return;
    }
    ufo.flags.on_cooldown = true;
    ufo.cooldown = FIRE_COOLDOWN;
    let source = ufo.clone();

    let mut shot = projectile::create_projectile(&source, sprites::LASER_ENEMY, Allegiance::Enemy);
    shot.dy = 1.0;
    shot.angle = 180.0;
    shot.spritescale = source.spritescale;
    sim.spawn(shot);
    sim.play_sound(SoundId::AlienFire, Channel::Alien);
}

fn take_damage(sim: &mut Simulation, id: EntityId) {
    let Some(ufo) = sim.registry.get_mut(id) else {
        return;
    };
    if ufo.flags.invulnerable {
        return;
    }
    ufo.health -= 1;
    ufo.flags.invulnerable = true;
    ufo.speed = UFO_FLEE_SPEED;
    ufo.frame = 0;
    if ufo.health <= 0 {
        ufo.kill();
    }
}

fn on_death(sim: &mut Simulation, id: EntityId) {
    let Some(ufo) = sim.registry.get(id) else {
        return;
    };
    let origin = ufo.position();
    particle::spawn_burst(sim, BurstFlavor::RandomHue, origin);
    particle::play_explosion(sim);
    pickup::spawn_random_pickup(sim, origin, PICKUP_CHANCE);
}
