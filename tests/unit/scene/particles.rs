use super::*;
use crate::scene::scene_rng;

#[test]
fn snow_respawns_at_top_instead_of_clamping() {
    let mut rng = scene_rng(3);
    let mut snow = SnowField::new(&mut rng, 1);
    snow.flakes[0].pos = Vec2::new(0.0, R - 0.1);
    snow.flakes[0].speed = 1.0;
    snow.flakes[0].wind = 0.0;
    snow.update(&mut rng);
    assert_eq!(snow.flakes[0].pos.y, -R);
    assert!(snow.flakes[0].pos.x.abs() <= R);
}

#[test]
fn ripples_removed_in_the_update_that_fades_them() {
    let mut pool = RipplePool::new(4, Rgba8::WHITE);
    assert!(pool.spawn(Vec2::ZERO, 8.0));
    pool.ripples[0].opacity = 0.04;
    pool.update();
    assert!(pool.ripples.is_empty());
}

#[test]
fn ripple_pool_honors_cap() {
    let mut pool = RipplePool::new(2, Rgba8::WHITE);
    assert!(pool.spawn(Vec2::ZERO, 5.0));
    assert!(pool.spawn(Vec2::ZERO, 5.0));
    assert!(!pool.spawn(Vec2::ZERO, 5.0));
    assert_eq!(pool.ripples.len(), 2);
}

#[test]
fn ripple_lives_twenty_ticks_at_most() {
    let mut pool = RipplePool::new(1, Rgba8::WHITE);
    pool.spawn(Vec2::ZERO, 10.0);
    let mut ticks = 0;
    while !pool.ripples.is_empty() {
        pool.update();
        ticks += 1;
        assert!(ticks <= 21);
    }
    assert!(ticks >= 20);
}

#[test]
fn rain_hitting_canopy_spawns_ripple_at_canopy_top() {
    let mut rng = scene_rng(5);
    let mut rain = RainField::new(&mut rng, 1);
    rain.drops[0] = RainDrop {
        pos: Vec2::new(10.0, -25.0),
        speed: 10.0,
        length: 5.0,
    };
    let canopy = Canopy {
        x: 12.0,
        top: -20.0,
        half_width: 20.0,
    };
    let mut pool = RipplePool::new(8, Rgba8::WHITE);
    rain.update(&mut rng, &[canopy], &mut pool);
    assert_eq!(pool.ripples.len(), 1);
    assert_eq!(pool.ripples[0].pos, Vec2::new(10.0, -20.0));
    assert!(rain.drops[0].pos.y <= -R);
}

#[test]
fn drops_start_above_the_ground() {
    let mut rng = scene_rng(1);
    let rain = RainField::new(&mut rng, 500);
    assert!(
        rain.drops
            .iter()
            .all(|d| d.pos.y >= -R && d.pos.y < GROUND_Y_OFFSET)
    );
}

#[test]
fn ground_ripple_sits_on_the_ground_line() {
    let mut rng = scene_rng(5);
    let mut rain = RainField::new(&mut rng, 1);
    rain.drops[0] = RainDrop {
        pos: Vec2::new(40.0, R - 5.0),
        speed: 15.0,
        length: 5.0,
    };
    let mut pool = RipplePool::new(8, Rgba8::WHITE);
    rain.update(&mut rng, &[], &mut pool);
    assert_eq!(pool.ripples.len(), 1);
    let y = pool.ripples[0].pos.y;
    assert!((GROUND_Y_OFFSET..GROUND_Y_OFFSET + 20.0).contains(&y), "ripple at {y}");
}

#[test]
fn petals_wrap_laterally() {
    let mut rng = scene_rng(9);
    let mut petals = PetalField::new(&mut rng, 1);
    petals.petals[0].pos = Vec2::new(R - 0.1, 0.0);
    petals.petals[0].velocity = Vec2::new(1.0, 0.5);
    petals.update(&mut rng);
    assert_eq!(petals.petals[0].pos.x, -R);
}

#[test]
fn bubbles_respawn_at_bottom() {
    let mut rng = scene_rng(1);
    let mut col = BubbleColumn::new(&mut rng, 1);
    col.bubbles[0].pos = Vec2::new(0.0, -R + 0.2);
    col.bubbles[0].speed = 1.0;
    col.update(&mut rng);
    assert_eq!(col.bubbles[0].pos.y, R + 10.0);
}
