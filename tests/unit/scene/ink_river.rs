use super::*;
use crate::scene::{census, containment_violations};

#[test]
fn mountains_sorted_back_to_front() {
    let scene = InkRiver::new(&SceneInit::seeded(3));
    assert_eq!(scene.mountains.len(), MOUNTAIN_COUNT);
    assert!(scene.mountains.windows(2).all(|w| w[0].pos.y <= w[1].pos.y));
}

#[test]
fn boat_bobs_around_its_anchor() {
    let mut boat = FishingBoat::default();
    assert_eq!(boat.pos(), BOAT_ANCHOR);
    for _ in 0..400 {
        boat.update();
        assert!((boat.pos().y - BOAT_ANCHOR.y).abs() <= BOB_HEIGHT);
        assert_eq!(boat.pos().x, BOAT_ANCHOR.x);
    }
}

#[test]
fn fishing_ripples_appear_at_the_line_and_stay_capped() {
    let mut scene = InkRiver::new(&SceneInit::seeded(3));
    let mut seen = false;
    for _ in 0..2_000 {
        scene.update();
        assert!(scene.ripples.ripples.len() <= MAX_FISHING_RIPPLES);
        for r in &scene.ripples.ripples {
            assert_eq!(r.pos, scene.boat.line_tip());
            seen = true;
        }
    }
    assert!(seen);
    assert_eq!(census(&scene)[&Population::InkMote], MOTE_COUNT);
    assert!(containment_violations(&scene).is_empty());
}
