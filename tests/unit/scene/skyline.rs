use super::*;
use crate::scene::containment_violations;

#[test]
fn boats_wrap_to_the_far_edge() {
    let mut right = Boat {
        pos: Vec2::new(BOAT_WRAP - 0.1, 120.0),
        speed: 0.5,
        direction: 1.0,
        kind: BoatKind::Cruise,
    };
    right.update();
    assert_eq!(right.pos.x, -BOAT_WRAP);

    let mut left = Boat {
        pos: Vec2::new(-BOAT_WRAP + 0.1, 140.0),
        speed: 0.3,
        direction: -1.0,
        kind: BoatKind::Cargo,
    };
    left.update();
    assert_eq!(left.pos.x, BOAT_WRAP);
}

#[test]
fn windows_flicker_over_time() {
    let mut scene = Skyline::new(&SceneInit::seeded(6));
    let before: Vec<bool> = scene.windows.windows.iter().map(|w| w.lit).collect();
    for _ in 0..100 {
        scene.update();
    }
    let after: Vec<bool> = scene.windows.windows.iter().map(|w| w.lit).collect();
    assert_eq!(before.len(), after.len());
    assert_ne!(before, after);
}

#[test]
fn everything_stays_in_bounds() {
    let mut scene = Skyline::new(&SceneInit::seeded(6));
    for _ in 0..3_000 {
        scene.update();
    }
    assert!(containment_violations(&scene).is_empty());
    assert!(scene.stars.iter().all(|s| (0.0..1.0).contains(&s.opacity)));
}
