use super::*;
use crate::scene::{census, containment_violations};

#[test]
fn stalk_sway_is_bounded_by_amplitude() {
    let mut scene = BambooGrove::new(&SceneInit::seeded(4));
    for _ in 0..600 {
        scene.update();
        for s in &scene.stalks {
            assert!(s.tip_offset().abs() <= s.sway);
        }
    }
}

#[test]
fn leaf_fades_in_after_wrapping() {
    let mut rng = scene_rng(2);
    let mut fall = LeafFall::new(&mut rng, 1);
    fall.leaves[0].pos = Vec2::new(0.0, GLOBE_RADIUS - 0.1);
    fall.leaves[0].velocity = Vec2::new(0.0, 0.5);
    fall.leaves[0].opacity = MAX_LEAF_OPACITY;
    fall.update(&mut rng);
    assert_eq!(fall.leaves[0].pos.y, -GLOBE_RADIUS);
    assert_eq!(fall.leaves[0].opacity, 0.0);
    fall.update(&mut rng);
    assert!((fall.leaves[0].opacity - FADE_IN_STEP).abs() < 1e-12);
}

#[test]
fn grove_counts_and_bounds() {
    let mut scene = BambooGrove::new(&SceneInit::seeded(4));
    for _ in 0..2_000 {
        scene.update();
    }
    let counts = census(&scene);
    assert_eq!(counts[&Population::Stalk], STALK_COUNT);
    assert_eq!(counts[&Population::Leaf], LEAF_COUNT);
    assert!(containment_violations(&scene).is_empty());
}
