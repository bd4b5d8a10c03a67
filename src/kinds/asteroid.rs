/// Asteroids and the fragments they break into.

use std::f32::consts::TAU;

use rand::Rng;
use tracing::debug;

use crate::behavior::{render_sprite, Behavior};
use crate::compute::{Simulation, ARENA_HEIGHT, ARENA_WIDTH};
use crate::entities::{Allegiance, Entity, Kind};
use crate::kinds::particle::{self, BurstFlavor};
use crate::kinds::{pickup, ufo};
use crate::registry::EntityId;
use crate::sprites;

const ROTATION_STEP: f32 = 5.0;
const DAMAGE_SLOWDOWN: f32 = 2.0;
const DAMAGE_COOLDOWN: u32 = 2;

const FRAGMENT_RADIUS: f32 = 4.0;
const FRAGMENT_MIN_VELOCITY: f32 = 2.0;
const FRAGMENT_MAX_VELOCITY: f32 = 4.0;

/// Percent chance an asteroid's death calls in a UFO.
pub const UFO_CHANCE: u32 = 15;
/// Percent chance an asteroid's death drops a pickup.
pub const PICKUP_CHANCE: u32 = 10;

/// Scale and matching health, one row picked per asteroid.
const SIZES: [(f32, i32); 4] = [(0.75, 1), (1.0, 1), (1.25, 2), (1.5, 3)];

pub static BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render_sprite),
    take_damage: Some(take_damage),
    on_death: Some(on_death),
};

pub static FRAGMENT_BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render_sprite),
    take_damage: Some(take_damage),
    on_death: Some(on_fragment_death),
};

/// A random rock, not yet placed or moving.
pub fn create_asteroid(sim: &mut Simulation) -> Entity {
    let rng = &mut sim.rng;
    let sprite = sprites::ASTEROIDS[rng.gen_range(0..sprites::ASTEROIDS.len())];
    let mut asteroid = Entity::new(Kind::Asteroid, sprite);
    asteroid.flags.alive = true;
    asteroid.allegiance = Allegiance::Enemy;
    asteroid.speed = rng.gen_range(4..=8) as f32;
    let (scale, health) = SIZES[rng.gen_range(0..SIZES.len())];
    asteroid.spritescale = scale;
    asteroid.health = health;
    asteroid
}

/// Drop a new asteroid in from a random point along the top edge.
pub fn spawn_asteroid(sim: &mut Simulation) -> EntityId {
    let mut asteroid = create_asteroid(sim);
    let w = asteroid.sprite.w;
    asteroid.x = sim.rng.gen_range(w..=ARENA_WIDTH as i32 - w) as f32;
    asteroid.y = 0.0;
    asteroid.dy = 1.0;
    sim.spawn(asteroid)
}

/// A small rock near `from`, drifting off in a random direction.
pub fn spawn_fragment(sim: &mut Simulation, from: &Entity) -> EntityId {
    let rng = &mut sim.rng;
    let sprite = sprites::FRAGMENTS[rng.gen_range(0..sprites::FRAGMENTS.len())];
    let mut fragment = Entity::new(Kind::AsteroidFragment, sprite);
    fragment.flags.alive = true;
    fragment.allegiance = Allegiance::Enemy;

    let theta = TAU * rng.gen::<f32>();
    let radius = FRAGMENT_RADIUS * rng.gen::<f32>();
    fragment.x = from.x + radius * theta.cos();
    fragment.y = from.y + radius * theta.sin();
    fragment.dx = particle::scatter(rng, FRAGMENT_MIN_VELOCITY, FRAGMENT_MAX_VELOCITY);
    fragment.dy = particle::scatter(rng, FRAGMENT_MIN_VELOCITY, FRAGMENT_MAX_VELOCITY);
    fragment.speed = 1.0;
    fragment.spritescale = from.spritescale;
    sim.spawn(fragment)
}

fn update(sim: &mut Simulation, id: EntityId) {
    let Some(asteroid) = sim.registry.get_mut(id) else {
        return;
    };
    // Fragments can drift upwards, so the top edge counts once fully past it.
    if asteroid.x <= 0.0
        || asteroid.x >= ARENA_WIDTH
        || asteroid.y >= ARENA_HEIGHT
        || asteroid.y + asteroid.height() < 0.0
    {
        asteroid.kill_out_of_bounds();
    }

    if !asteroid.flags.on_cooldown {
        asteroid.angle += ROTATION_STEP;
        asteroid.cooldown = 1;
        asteroid.flags.on_cooldown = true;
    }
    let hitbox = asteroid.hitbox();
    asteroid.advance();

    // Rocks only ever hit the ship; shots test themselves against rocks.
    let contact = sim.registry.iter().find_map(|(other_id, other)| {
        (other_id != id
            && other.is_player_ship()
            && other.is_alive()
            && !other.flags.invulnerable
            && hitbox.overlaps(&other.hitbox()))
        .then_some(other_id)
    });
    if let Some(player) = contact {
        sim.damage(player);
        if let Some(asteroid) = sim.registry.get_mut(id) {
            asteroid.kill();
        }
    }
}

fn take_damage(sim: &mut Simulation, id: EntityId) {
    let Some(asteroid) = sim.registry.get_mut(id) else {
        return;
    };
    asteroid.health -= 1;
    asteroid.speed = (asteroid.speed - DAMAGE_SLOWDOWN).max(0.0);
    asteroid.cooldown += DAMAGE_COOLDOWN;
    if asteroid.health <= 0 {
        asteroid.kill();
    }
}

fn on_death(sim: &mut Simulation, id: EntityId) {
    let Some(asteroid) = sim.registry.get(id) else {
        return;
    };
    if asteroid.flags.out_of_bounds {
        return;
    }
    let asteroid = asteroid.clone();

    particle::spawn_burst(sim, BurstFlavor::AsteroidDebris, asteroid.position());
    particle::play_explosion(sim);

    let fragments = sim.rng.gen_range(2..=4);
    for _ in 0..fragments {
        spawn_fragment(sim, &asteroid);
    }
    if sim.chance(UFO_CHANCE) {
        debug!(x = asteroid.x, y = asteroid.y, "asteroid calls in a ufo");
        ufo::spawn_ufo(sim, Some(asteroid.position()));
    }
    pickup::spawn_random_pickup(sim, asteroid.position(), PICKUP_CHANCE);
}

fn on_fragment_death(sim: &mut Simulation, id: EntityId) {
    let Some(fragment) = sim.registry.get(id) else {
        return;
    };
    if fragment.flags.out_of_bounds {
        return;
    }
    let origin = fragment.position();
    particle::spawn_burst(sim, BurstFlavor::AsteroidDebris, origin);
}
