/// Pickups dropped by dying enemies: shield repairs and point bonuses.

use rand::Rng;

use crate::behavior::{render_sprite, Behavior};
use crate::compute::{Simulation, ARENA_HEIGHT, ARENA_WIDTH};
use crate::entities::{Entity, Kind, PickupKind};
use crate::interface::{Channel, SoundId};
use crate::kinds::particle::{self, BurstFlavor};
use crate::kinds::player::PLAYER_MAX_HEALTH;
use crate::registry::EntityId;
use crate::sprites;
use crate::vec2f::Vec2f;

pub const PICKUP_SPEED: f32 = 4.0;
/// Bonus for each of the three points sprites.
pub const POINTS_VALUES: [u32; 3] = [50, 100, 150];

pub static SHIELD_BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render_sprite),
    take_damage: None,
    on_death: Some(on_shield_collected),
};

pub static POINTS_BEHAVIOR: Behavior = Behavior {
    update: Some(update),
    render: Some(render_sprite),
    take_damage: None,
    on_death: Some(on_points_collected),
};

pub fn create_pickup(kind: PickupKind, at: Vec2f) -> Entity {
    let sprite = match kind {
        PickupKind::Shield => sprites::PICKUP_SHIELD,
        PickupKind::Points(value) => {
            let tier = POINTS_VALUES.iter().position(|v| *v == value).unwrap_or(0);
            sprites::PICKUP_POINTS[tier]
        }
    };
    let mut pickup = Entity::new(Kind::Pickup(kind), sprite);
    pickup.flags.alive = true;
    pickup.x = at.x;
    pickup.y = at.y;
    pickup.dy = 1.0;
    pickup.speed = PICKUP_SPEED;
    pickup
}

pub fn spawn_shield_pickup(sim: &mut Simulation, at: Vec2f) -> EntityId {
    sim.spawn(create_pickup(PickupKind::Shield, at))
}

pub fn spawn_points_pickup(sim: &mut Simulation, at: Vec2f) -> EntityId {
    let value = POINTS_VALUES[sim.rng.gen_range(0..POINTS_VALUES.len())];
    sim.spawn(create_pickup(PickupKind::Points(value), at))
}

/// Roll `chance` percent; on success drop a shield or points pickup, evenly.
pub fn spawn_random_pickup(sim: &mut Simulation, at: Vec2f, chance: u32) -> Option<EntityId> {
    if !sim.chance(chance) {
        return None;
    }
    let id = if sim.rng.gen_bool(0.5) {
        spawn_shield_pickup(sim, at)
    } else {
        spawn_points_pickup(sim, at)
    };
    Some(id)
}

fn update(sim: &mut Simulation, id: EntityId) {
    let Some(pickup) = sim.registry.get_mut(id) else {
        return;
    };
    if pickup.x <= 0.0 || pickup.x >= ARENA_WIDTH || pickup.y < 0.0 || pickup.y >= ARENA_HEIGHT {
        pickup.kill_out_of_bounds();
    }
    let hitbox = pickup.hitbox();

    let touched = sim
        .registry
        .iter()
        .any(|(_, other)| other.is_player_ship() && hitbox.overlaps(&other.hitbox()));

    if let Some(pickup) = sim.registry.get_mut(id) {
        if touched {
            pickup.kill();
        }
        pickup.advance();
    }
}

/// The ship that collected `id`, unless the pickup only drifted away.
fn collector(sim: &Simulation, id: EntityId) -> Option<EntityId> {
    let pickup = sim.registry.get(id)?;
    if pickup.flags.out_of_bounds {
        return None;
    }
    sim.registry.find_player()
}

fn on_shield_collected(sim: &mut Simulation, id: EntityId) {
    let Some(player_id) = collector(sim, id) else {
        return;
    };
    let Some(player) = sim.registry.get_mut(player_id) else {
        return;
    };
    player.health = (player.health + 1).min(PLAYER_MAX_HEALTH);
    let centre = player.hitbox().centre();
    particle::spawn_burst(sim, BurstFlavor::Green, centre);
    sim.play_sound(SoundId::Powerup, Channel::Any);
}

fn on_points_collected(sim: &mut Simulation, id: EntityId) {
    if collector(sim, id).is_none() {
        return;
    }
    if let Some(Kind::Pickup(PickupKind::Points(value))) = sim.registry.get(id).map(|e| e.kind) {
        sim.score += value;
        sim.play_sound(SoundId::Powerup, Channel::Any);
    }
}
