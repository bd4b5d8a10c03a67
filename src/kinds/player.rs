/// The player's ship.

use crate::behavior::{render_sprite, Behavior};
use crate::compute::{Simulation, ARENA_HEIGHT, ARENA_WIDTH};
use crate::entities::{Allegiance, Entity, Kind};
use crate::interface::{Channel, Key, SoundId};
use crate::kinds::particle::{self, BurstFlavor};
use crate::kinds::projectile;
use crate::registry::EntityId;
use crate::sprites;

pub const PLAYER_SPEED: f32 = 8.0;
pub const PLAYER_SCALE: f32 = 0.75;
pub const PLAYER_HEALTH: i32 = 4;
pub const PLAYER_MAX_HEALTH: i32 = 8;

/// Frames between shots.
pub const FIRE_COOLDOWN: u32 = 25;
/// Invulnerability after taking a hit.
pub const DAMAGE_INVULNERABLE_FRAMES: u32 = 60;
/// Invulnerability granted at the start of a game.
pub const SPAWN_INVULNERABLE_FRAMES: u32 = 120;

const TILT_DEGREES: f32 = 10.0;
const MUZZLE_OFFSET: f32 = 25.0;

pub static BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render_sprite),
    take_damage: Some(take_damage),
    on_death: Some(on_death),
};

pub fn create_player(x: f32, y: f32) -> Entity {
    let mut player = Entity::new(Kind::Player, sprites::PLAYER_SHIP);
    player.flags.alive = true;
    player.allegiance = Allegiance::Player;
    player.speed = PLAYER_SPEED;
    player.spritescale = PLAYER_SCALE;
    player.health = PLAYER_HEALTH;
    player.x = x;
    player.y = y;
    player
}

/// Bottom-centre of the arena.
pub fn start_position() -> (f32, f32) {
    let sprite = sprites::PLAYER_SHIP;
    (
        ARENA_WIDTH / 2.0 - sprite.w as f32,
        ARENA_HEIGHT - sprite.h as f32,
    )
}

/// A fresh ship at the start position, briefly invulnerable.
pub fn spawn_player(sim: &mut Simulation) -> EntityId {
    let (x, y) = start_position();
    let mut player = create_player(x, y);
    grant_invulnerability(&mut player, SPAWN_INVULNERABLE_FRAMES);
    sim.spawn(player)
}

/// Invulnerable ships hold fire: the weapon cooldown runs as long as the
/// invulnerability countdown.
pub fn grant_invulnerability(player: &mut Entity, frames: u32) {
    player.flags.invulnerable = true;
    player.flags.on_cooldown = true;
    player.cooldown = player.cooldown.max(frames);
    player.frame = frames;
}

fn update(sim: &mut Simulation, id: EntityId) {
    let input = sim.input;
    let Some(player) = sim.registry.get_mut(id) else {
        return;
    };

    // Four-way, not normalised: diagonals are faster.
    player.dx = 0.0;
    player.dy = 0.0;
    if input.is_down(Key::Up) {
        player.dy -= 1.0;
    }
    if input.is_down(Key::Down) {
        player.dy += 1.0;
    }
    if input.is_down(Key::Left) {
        player.dx -= 1.0;
        player.angle = -TILT_DEGREES;
    }
    if input.is_down(Key::Right) {
        player.dx += 1.0;
        player.angle = TILT_DEGREES;
    }
    if !input.is_down(Key::Left) && !input.is_down(Key::Right) {
        player.angle = 0.0;
    }

    player.advance();
    player.x = player.x.clamp(0.0, ARENA_WIDTH - player.width());
    player.y = player.y.clamp(0.0, ARENA_HEIGHT - player.height());

    if player.flags.invulnerable {
        player.frame = player.frame.saturating_sub(1);
        if player.frame == 0 {
            player.flags.invulnerable = false;
            player.flags.on_cooldown = false;
            player.rgba[3] = 255;
        } else {
            player.rgba[3] = if player.frame % 2 == 0 { 150 } else { 25 };
        }
    }

    let fire = input.is_down(Key::Fire) && !player.flags.on_cooldown;
    if fire {
        player.flags.on_cooldown = true;
        player.cooldown = FIRE_COOLDOWN;
    }
    let thrusting = player.dy < 0.0;
    let ship = player.clone();

    if fire {
        let mut shot =
            projectile::create_projectile(&ship, sprites::LASER_PLAYER, Allegiance::Player);
        shot.dy = -1.0;
        shot.y -= MUZZLE_OFFSET;
        shot.spritescale = ship.spritescale;
        sim.spawn(shot);
        sim.play_sound(SoundId::PlayerFire, Channel::Player);
    }
    if thrusting {
        particle::spawn_thruster_particle(sim, &ship);
    }
}

fn take_damage(sim: &mut Simulation, id: EntityId) {
    let Some(player) = sim.registry.get_mut(id) else {
        return;
    };
    if player.flags.invulnerable {
        return;
    }
    player.health -= 1;
    if player.health <= 0 {
        player.health = 0;
        player.kill();
        return;
    }
    grant_invulnerability(player, DAMAGE_INVULNERABLE_FRAMES);
}

fn on_death(sim: &mut Simulation, id: EntityId) {
    let Some(player) = sim.registry.get(id) else {
        return;
    };
    let centre = player.hitbox().centre();
    particle::spawn_burst(sim, BurstFlavor::Standard, centre);
    particle::spawn_burst(sim, BurstFlavor::Purple, centre);
    particle::play_explosion(sim);
}
