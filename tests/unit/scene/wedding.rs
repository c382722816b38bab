use super::*;
use crate::scene::containment_violations;

#[test]
fn confetti_sways_with_its_phase() {
    let mut rng = scene_rng(2);
    let mut shower = ConfettiShower::new(&mut rng, 1);
    let c = &mut shower.pieces[0];
    c.pos = Vec2::ZERO;
    c.phase = 0.0;
    c.sway = 0.5;
    c.speed_y = 1.0;
    shower.update(&mut rng);
    let c = &shower.pieces[0];
    assert_eq!(c.pos.y, 1.0);
    assert!((c.pos.x - SWAY_STEP.sin() * 0.5).abs() < 1e-12);
}

#[test]
fn confetti_wraps_at_the_bottom() {
    let mut rng = scene_rng(2);
    let mut shower = ConfettiShower::new(&mut rng, 1);
    shower.pieces[0].pos = Vec2::new(0.0, GLOBE_RADIUS - 0.1);
    shower.pieces[0].speed_y = 1.0;
    shower.update(&mut rng);
    assert_eq!(shower.pieces[0].pos.y, -GLOBE_RADIUS);
}

#[test]
fn long_run_stays_in_bounds() {
    let mut scene = WeddingArch::new(&SceneInit::seeded(14));
    for _ in 0..2_000 {
        scene.update();
    }
    assert_eq!(scene.confetti.pieces.len(), CONFETTI_COUNT);
    assert!(containment_violations(&scene).is_empty());
}
