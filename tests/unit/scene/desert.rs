use super::*;
use crate::scene::containment_violations;

#[test]
fn camel_wraps_to_the_left_edge() {
    let mut camel = Camel {
        pos: Vec2::new(CAMEL_WRAP - 0.1, GROUND_Y_OFFSET),
        speed: 0.5,
        stride_phase: 0.0,
        scale: 1.0,
    };
    camel.update();
    assert_eq!(camel.pos.x, -CAMEL_WRAP);
    assert!(camel.stride_phase > 0.0);
}

#[test]
fn caravan_keeps_walking_and_stays_in_bounds() {
    let mut scene = DesertCaravan::new(&SceneInit::seeded(19));
    let start: Vec<f64> = scene.camels.iter().map(|c| c.stride_phase).collect();
    for _ in 0..4_000 {
        scene.update();
    }
    for (camel, s) in scene.camels.iter().zip(start) {
        assert!(camel.stride_phase > s);
        assert!(camel.pos.x.abs() <= CAMEL_WRAP);
    }
    assert_eq!(scene.sand.motes.len(), SAND_COUNT);
    assert!(containment_violations(&scene).is_empty());
}
