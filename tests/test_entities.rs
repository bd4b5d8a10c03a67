use space_shooter::entities::*;
use space_shooter::sprites;
use space_shooter::vec2f::{bezier, bezier_closed_form, lerp, lerp_vec2f, Vec2f};

// ── Rect::overlaps ────────────────────────────────────────────────────────────

#[test]
fn overlap_is_symmetric() {
    let rects = [
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Rect::new(5.0, 5.0, 10.0, 10.0),
        Rect::new(10.0, 0.0, 4.0, 4.0), // touches the first on its right edge
        Rect::new(30.0, 30.0, 2.0, 2.0),
        Rect::new(-8.0, 2.0, 9.0, 1.0),
        Rect::new(3.0, 3.0, 0.0, 0.0),
    ];
    for a in &rects {
        for b in &rects {
            assert_eq!(a.overlaps(b), b.overlaps(a), "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn rect_overlaps_itself() {
    let r = Rect::new(12.0, -4.0, 7.5, 3.0);
    assert!(r.overlaps(&r));
}

#[test]
fn touching_edges_count_as_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 10.0, 5.0, 5.0);
    assert!(a.overlaps(&b));
}

#[test]
fn separated_rects_never_overlap() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&Rect::new(10.5, 0.0, 10.0, 10.0)));
    assert!(!a.overlaps(&Rect::new(0.0, -20.0, 10.0, 10.0)));
    assert!(!a.overlaps(&Rect::new(100.0, 100.0, 1.0, 1.0)));
}

#[test]
fn zero_size_rect_never_overlaps() {
    let empty = Rect::new(5.0, 5.0, 0.0, 0.0);
    let big = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(!empty.overlaps(&big));
    assert!(!empty.overlaps(&empty));
}

#[test]
fn rect_centre() {
    let r = Rect::new(10.0, 20.0, 4.0, 8.0);
    assert_eq!(r.centre(), Vec2f::new(12.0, 24.0));
}

// ── Allegiance ────────────────────────────────────────────────────────────────

#[test]
fn only_player_and_enemy_oppose() {
    assert!(Allegiance::Player.opposes(Allegiance::Enemy));
    assert!(Allegiance::Enemy.opposes(Allegiance::Player));
    assert!(!Allegiance::Player.opposes(Allegiance::Player));
    assert!(!Allegiance::Enemy.opposes(Allegiance::Enemy));
    assert!(!Allegiance::Neutral.opposes(Allegiance::Player));
    assert!(!Allegiance::Neutral.opposes(Allegiance::Enemy));
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[test]
fn new_entity_is_blank() {
    let e = Entity::new(Kind::Asteroid, sprites::ASTEROIDS[0]);
    assert!(!e.is_alive());
    assert_eq!(e.flags, Flags::default());
    assert_eq!(e.rgba, [255; 4]);
    assert_eq!(e.spritescale, 1.0);
    assert_eq!((e.x, e.y, e.dx, e.dy, e.speed), (0.0, 0.0, 0.0, 0.0, 0.0));
    assert_eq!((e.cooldown, e.frame, e.health), (0, 0, 0));
    assert!(e.ai.is_none());
    assert!(e.text.is_none());
}

#[test]
fn hitbox_scales_with_sprite() {
    let mut e = Entity::new(Kind::Player, sprites::PLAYER_SHIP);
    e.x = 10.0;
    e.y = 20.0;
    e.spritescale = 0.5;
    let hb = e.hitbox();
    assert_eq!(hb, Rect::new(10.0, 20.0, 49.5, 37.5));
}

#[test]
fn advance_moves_by_direction_times_speed() {
    let mut e = Entity::new(Kind::Projectile, sprites::LASER_PLAYER);
    e.dx = 0.5;
    e.dy = -1.0;
    e.speed = 16.0;
    e.advance();
    assert_eq!(e.position(), Vec2f::new(8.0, -16.0));
}

#[test]
fn out_of_bounds_kill_is_marked() {
    let mut e = Entity::new(Kind::Pickup(PickupKind::Shield), sprites::PICKUP_SHIELD);
    e.flags.alive = true;
    e.kill();
    assert!(!e.is_alive());
    assert!(!e.flags.out_of_bounds);

    e.flags.alive = true;
    e.kill_out_of_bounds();
    assert!(!e.is_alive());
    assert!(e.flags.out_of_bounds);
}

#[test]
fn kind_queries() {
    let ship = Entity::new(Kind::Player, sprites::PLAYER_SHIP);
    let text = Entity::new(Kind::FloatingText, sprites::NONE);
    let pickup = Entity::new(Kind::Pickup(PickupKind::Points(50)), sprites::PICKUP_POINTS[0]);
    assert!(ship.is_player_ship() && !ship.is_projectile());
    assert!(text.is_floating_text());
    assert!(pickup.is_pickup());
    assert!(!text.hitbox().overlaps(&ship.hitbox()));

    // Allegiance, not kind, decides which side a shot is on.
    let mut shot = Entity::new(Kind::Projectile, sprites::LASER_ENEMY);
    shot.allegiance = Allegiance::Enemy;
    assert!(shot.is_enemy() && !shot.is_player() && !shot.is_player_ship());
    assert!(!ship.is_player());
}

// ── Vector / curve math ───────────────────────────────────────────────────────

#[test]
fn lerp_endpoints_and_midpoint() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    let v = lerp_vec2f(Vec2f::new(0.0, 10.0), Vec2f::new(10.0, 0.0), 0.25);
    assert_eq!(v, Vec2f::new(2.5, 7.5));
}

#[test]
fn vector_add_sub() {
    let a = Vec2f::new(1.0, 2.0);
    let b = Vec2f::new(3.0, -4.0);
    assert_eq!(a + b, Vec2f::new(4.0, -2.0));
    assert_eq!(a - b, Vec2f::new(-2.0, 6.0));
}

#[test]
fn bezier_hits_its_endpoints() {
    let controls = [
        (Vec2f::new(0.0, 0.0), Vec2f::new(50.0, 100.0), Vec2f::new(100.0, 0.0)),
        (Vec2f::new(-45.5, 0.0), Vec2f::new(512.0, 384.0), Vec2f::new(1069.5, 211.0)),
        (Vec2f::new(3.0, -7.0), Vec2f::new(3.0, -7.0), Vec2f::new(3.0, -7.0)),
    ];
    for (p0, p1, p2) in controls {
        assert_eq!(bezier(p0, p1, p2, 0.0), p0);
        assert_eq!(bezier(p0, p1, p2, 1.0), p2);
        assert!(bezier_closed_form(p0, p1, p2, 0.0).approx_eq(p0, 1e-4));
        assert!(bezier_closed_form(p0, p1, p2, 1.0).approx_eq(p2, 1e-4));
    }
}

#[test]
fn bezier_forms_agree() {
    let (p0, p1, p2) = (
        Vec2f::new(-45.5, 0.0),
        Vec2f::new(512.0, 384.0),
        Vec2f::new(1069.5, 300.0),
    );
    for step in 0..=100 {
        let t = step as f32 / 100.0;
        let nested = bezier(p0, p1, p2, t);
        let closed = bezier_closed_form(p0, p1, p2, t);
        assert!(nested.approx_eq(closed, 1e-3), "t={t}: {nested:?} vs {closed:?}");
    }
}
