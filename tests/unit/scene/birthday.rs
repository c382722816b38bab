use super::*;
use crate::scene::{census, containment_violations};

#[test]
fn flicker_stays_in_range() {
    let mut scene = BirthdayCake::new(&SceneInit::seeded(8));
    for _ in 0..500 {
        scene.update();
        assert!(scene.candles.iter().all(|c| (0.8..1.2).contains(&c.flicker)));
    }
    assert_eq!(census(&scene)[&Population::Candle], 3);
    assert!(containment_violations(&scene).is_empty());
}

#[test]
fn spent_wishes_are_removed_in_the_same_update() {
    let mut rng = scene_rng(1);
    let mut cloud = WishCloud::default();
    assert!(cloud.spawn(&mut rng));
    cloud.wishes[0].life = 0.005;
    cloud.update(&mut rng, 0.0);
    assert!(cloud.wishes.is_empty());
}

#[test]
fn wish_cloud_is_capped() {
    let mut rng = scene_rng(1);
    let mut cloud = WishCloud::default();
    for _ in 0..MAX_WISHES {
        assert!(cloud.spawn(&mut rng));
    }
    assert!(!cloud.spawn(&mut rng));
    cloud.update(&mut rng, 1.0);
    assert_eq!(cloud.wishes.len(), MAX_WISHES);
}
