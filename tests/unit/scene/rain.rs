use super::*;
use crate::scene::{census, containment_violations};

#[test]
fn forest_is_sorted_back_to_front() {
    let mut rng = scene_rng(12);
    let forest = Forest::new(&mut rng, TREE_COUNT, FLOWER_COUNT);
    assert_eq!(forest.plants.len(), TREE_COUNT + FLOWER_COUNT);
    assert!(forest.plants.windows(2).all(|w| w[0].pos.y <= w[1].pos.y));
}

#[test]
fn rain_makes_ripples_and_stays_bounded() {
    let mut scene = RainForest::new(&SceneInit::seeded(5));
    let mut saw_ripples = false;
    for _ in 0..300 {
        scene.update();
        saw_ripples |= !scene.shower.ripples.ripples.is_empty();
        assert!(scene.shower.ripples.ripples.len() <= MAX_RIPPLES);
        assert!(scene.shower.ripples.ripples.iter().all(|r| r.opacity > 0.0));
    }
    assert!(saw_ripples);
    assert!(containment_violations(&scene).is_empty());
    assert_eq!(census(&scene)[&Population::RainDrop], RAIN_COUNT);
}
