use super::*;
use crate::scene::containment_violations;

#[test]
fn swing_angle_is_bounded_and_advances_per_tick() {
    let mut swing = Swing::default();
    assert_eq!(swing.angle(), 0.0);
    assert_eq!(swing.seat(), swing.pivot() + Vec2::new(0.0, ROPE_LENGTH));
    let mut moved = false;
    for _ in 0..500 {
        swing.update();
        assert!(swing.angle().abs() <= SWING_AMPLITUDE);
        moved |= swing.angle() != 0.0;
    }
    assert!(moved);
}

#[test]
fn petals_wrap_and_never_escape() {
    let mut scene = SakuraSwing::new(&SceneInit::seeded(31));
    for _ in 0..1_500 {
        scene.update();
    }
    assert_eq!(scene.petals.petals.len(), PETAL_COUNT);
    assert!(containment_violations(&scene).is_empty());
}
