use space_shooter::entities::{Entity, Kind};
use space_shooter::registry::{EntityId, Registry};
use space_shooter::sprites;

fn rock(x: f32) -> Entity {
    let mut e = Entity::new(Kind::Asteroid, sprites::ASTEROIDS[0]);
    e.flags.alive = true;
    e.x = x;
    e
}

fn forward(reg: &Registry) -> Vec<EntityId> {
    reg.iter().map(|(id, _)| id).collect()
}

fn backward(reg: &Registry) -> Vec<EntityId> {
    let mut ids: Vec<EntityId> = reg.iter_rev().map(|(id, _)| id).collect();
    ids.reverse();
    ids
}

fn assert_links_consistent(reg: &Registry) {
    let fwd = forward(reg);
    assert_eq!(fwd, backward(reg));
    assert_eq!(fwd.len(), reg.len());
    assert_eq!(reg.head(), fwd.first().copied());
    assert_eq!(reg.tail(), fwd.last().copied());
    for pair in fwd.windows(2) {
        assert_eq!(reg.next_of(pair[0]), Some(pair[1]));
        assert_eq!(reg.prev_of(pair[1]), Some(pair[0]));
    }
}

// ── add ───────────────────────────────────────────────────────────────────────

#[test]
fn add_appends_at_tail() {
    let mut reg = Registry::new();
    assert!(reg.is_empty());
    let a = reg.add(rock(1.0));
    let b = reg.add(rock(2.0));
    let c = reg.add(rock(3.0));
    assert_eq!(forward(&reg), vec![a, b, c]);
    assert_eq!(reg.tail(), Some(c));
    assert_links_consistent(&reg);
}

// ── remove ────────────────────────────────────────────────────────────────────

#[test]
fn remove_head_middle_and_tail() {
    let mut reg = Registry::new();
    let ids: Vec<EntityId> = (0..5).map(|i| reg.add(rock(i as f32))).collect();

    assert_eq!(reg.remove(ids[2]).map(|e| e.x), Some(2.0));
    assert_links_consistent(&reg);
    assert!(reg.remove(ids[0]).is_some());
    assert_links_consistent(&reg);
    assert!(reg.remove(ids[4]).is_some());
    assert_links_consistent(&reg);

    assert_eq!(forward(&reg), vec![ids[1], ids[3]]);
}

#[test]
fn removing_missing_entity_is_not_found() {
    let mut reg = Registry::new();
    let a = reg.add(rock(0.0));
    assert!(reg.remove(a).is_some());
    assert!(reg.remove(a).is_none());
    assert!(reg.is_empty());
}

#[test]
fn stale_id_does_not_alias_reused_slot() {
    let mut reg = Registry::new();
    let old = reg.add(rock(1.0));
    reg.remove(old);
    let new = reg.add(rock(2.0));
    assert_ne!(old, new);
    assert!(reg.get(old).is_none());
    assert!(!reg.contains(old));
    assert_eq!(reg.get(new).map(|e| e.x), Some(2.0));
}

#[test]
fn len_tracks_adds_minus_removes() {
    let mut reg = Registry::new();
    let mut live = Vec::new();
    let mut adds = 0;
    let mut removes = 0;
    for round in 0..40u32 {
        live.push(reg.add(rock(round as f32)));
        adds += 1;
        if round % 3 == 0 {
            let id = live.remove(live.len() / 2);
            assert!(reg.remove(id).is_some());
            removes += 1;
        }
        assert_links_consistent(&reg);
    }
    assert_eq!(reg.len(), adds - removes);
    assert_eq!(forward(&reg), live);
}

// ── destroy_all / snapshots ───────────────────────────────────────────────────

#[test]
fn destroy_all_empties_and_invalidates() {
    let mut reg = Registry::new();
    let ids: Vec<EntityId> = (0..4).map(|i| reg.add(rock(i as f32))).collect();
    reg.destroy_all();
    assert!(reg.is_empty());
    assert_eq!(reg.head(), None);
    assert_eq!(reg.tail(), None);
    assert!(ids.iter().all(|id| reg.get(*id).is_none()));

    let fresh = reg.add(rock(9.0));
    assert_eq!(forward(&reg), vec![fresh]);
}

#[test]
fn ids_snapshot_ignores_later_adds() {
    let mut reg = Registry::new();
    reg.add(rock(0.0));
    let snapshot = reg.ids();
    reg.add(rock(1.0));
    assert_eq!(snapshot.len(), 1);
    assert_eq!(reg.len(), 2);
}

#[test]
fn find_player_skips_other_kinds() {
    let mut reg = Registry::new();
    reg.add(rock(0.0));
    assert_eq!(reg.find_player(), None);
    let ship = reg.add(Entity::new(Kind::Player, sprites::PLAYER_SHIP));
    assert_eq!(reg.find_player(), Some(ship));
}
