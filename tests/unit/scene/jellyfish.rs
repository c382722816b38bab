use super::*;
use crate::scene::{census, containment_violations};

#[test]
fn glow_timer_rearms_on_expiry() {
    let mut rng = scene_rng(7);
    let mut bloom = Bloom::new(&mut rng, 1);
    let j = &mut bloom.jellies[0];
    j.glow_timer = 1;
    j.tick_glow(&mut rng);
    assert!((60..180).contains(&j.glow_timer));
}

#[test]
fn glow_only_changes_when_timer_expires() {
    let mut rng = scene_rng(7);
    let mut bloom = Bloom::new(&mut rng, 1);
    let j = &mut bloom.jellies[0];
    j.glow_timer = 50;
    let before = j.glowing;
    for _ in 0..49 {
        j.tick_glow(&mut rng);
        assert_eq!(j.glowing, before);
    }
    assert_eq!(j.glow_timer, 1);
}

#[test]
fn glow_toggles_eventually() {
    let mut scene = JellyfishTank::new(&SceneInit::seeded(21));
    let mut last: Vec<bool> = scene.bloom.jellies.iter().map(|j| j.glowing).collect();
    let mut toggles = 0;
    for _ in 0..2_000 {
        scene.update();
        let now: Vec<bool> = scene.bloom.jellies.iter().map(|j| j.glowing).collect();
        toggles += last.iter().zip(&now).filter(|(a, b)| a != b).count();
        last = now;
    }
    assert!(toggles > 0);
}

#[test]
fn bloom_stays_inside_the_tank() {
    let mut scene = JellyfishTank::new(&SceneInit::seeded(21));
    for _ in 0..3_000 {
        scene.update();
    }
    for j in &scene.bloom.jellies {
        assert!(j.pos.hypot() < GLOBE_RADIUS + 40.0);
        assert!((0.0..2.0 * PI).contains(&j.tentacle_phase));
    }
    let counts = census(&scene);
    assert_eq!(counts[&Population::Jellyfish], JELLYFISH_COUNT);
    assert_eq!(counts[&Population::Bubble], BUBBLE_COUNT);
    assert!(containment_violations(&scene).is_empty());
}
