use super::*;
use crate::scene::{census, containment_violations};

#[test]
fn restoring_pull_applies_beyond_soft_radius() {
    let mut rng = scene_rng(1);
    let rules = SwimRules {
        impulse_chance: 0.0,
        ..SwimRules::FISH
    };
    let mut pos = Vec2::new(290.0, 0.0);
    let mut velocity = Vec2::new(1.0, 0.0);
    rules.step(&mut rng, &mut pos, &mut velocity);
    assert_eq!(pos, Vec2::new(291.0, 0.0));
    assert!((velocity.x - (1.0 - 0.291)).abs() < 1e-9);
}

#[test]
fn speed_band_scales_velocity() {
    let mut rng = scene_rng(1);
    let rules = SwimRules {
        impulse_chance: 0.0,
        ..SwimRules::FISH
    };
    let mut pos = Vec2::ZERO;
    let mut fast = Vec2::new(3.0, 0.0);
    rules.step(&mut rng, &mut pos, &mut fast);
    assert!((fast.x - 2.7).abs() < 1e-9);

    let mut pos = Vec2::ZERO;
    let mut slow = Vec2::new(0.2, 0.0);
    rules.step(&mut rng, &mut pos, &mut slow);
    assert!((slow.x - 0.22).abs() < 1e-9);
}

#[test]
fn school_stays_near_the_sphere() {
    let mut scene = Aquarium::new(&SceneInit::seeded(9));
    assert_eq!(census(&scene)[&Population::Fish], FISH_COUNT);
    for _ in 0..3_000 {
        scene.update();
    }
    for f in &scene.school.fish {
        assert!(f.pos.hypot() < GLOBE_RADIUS + 60.0, "fish strayed to {:?}", f.pos);
        assert!(f.velocity.hypot() < 4.0);
    }
    assert!(containment_violations(&scene).is_empty());
}
