use super::*;
use crate::scene::{census, containment_violations};

#[test]
fn lights_start_alternating_and_toggle_together() {
    let mut scene = Carousel::new(&SceneInit::seeded(2));
    assert!(scene.lights.iter().enumerate().all(|(i, l)| l.on == (i % 2 == 0)));
    for _ in 0..200 {
        scene.update();
        let first = scene.lights[0].on;
        assert!(scene
            .lights
            .iter()
            .enumerate()
            .all(|(i, l)| l.on == (first == (i % 2 == 0))));
    }
}

#[test]
fn rotation_and_bob_advance_once_per_tick() {
    let mut scene = Carousel::new(&SceneInit::seeded(2));
    for _ in 0..10 {
        scene.update();
    }
    assert!((scene.rotation - 10.0 * ROTATION_STEP).abs() < 1e-12);
    for (i, h) in scene.horses.iter().enumerate() {
        let expected = (10.0 * BOB_STEP + i as f64).sin() * BOB_HEIGHT;
        assert!((h.bob - expected).abs() < 1e-9);
    }
}

#[test]
fn horses_stay_on_the_platform() {
    let mut scene = Carousel::new(&SceneInit::seeded(4));
    for _ in 0..1_000 {
        scene.update();
    }
    let counts = census(&scene);
    assert_eq!(counts[&Population::Horse], HORSE_COUNT);
    assert_eq!(counts[&Population::RoofLight], LIGHT_COUNT);
    assert!(containment_violations(&scene).is_empty());
}
