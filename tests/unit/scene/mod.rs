use super::*;

#[test]
fn wrap_admits_margin_band_only() {
    let c = Containment::Wrap { margin: 10.0 };
    assert!(c.admits(Vec2::new(309.0, -309.0)));
    assert!(!c.admits(Vec2::new(311.0, 0.0)));
    assert!(!c.admits(Vec2::new(f64::NAN, 0.0)));
}

#[test]
fn reflect_uses_radius() {
    let c = Containment::Reflect { radius: 300.0 };
    assert!(c.admits(Vec2::new(200.0, 200.0)));
    assert!(!c.admits(Vec2::new(250.0, 250.0)));
}

#[test]
fn depth_sort_is_stable_and_ascending() {
    let sorted = depth_sorted(vec![(3.0, 'c'), (1.0, 'a'), (3.0, 'd'), (-2.0, 'z')]);
    assert_eq!(sorted, vec!['z', 'a', 'c', 'd']);
}
