use super::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn floor_samples_stay_on_squashed_ellipse() {
    let mut rng = StdRng::seed_from_u64(7);
    let usable = GLOBE_RADIUS - 40.0;
    for _ in 0..2_000 {
        let p = random_pos_in_globe(&mut rng, GROUND_Y_OFFSET, 0.0);
        let nx = p.x / usable;
        let ny = (p.y - GROUND_Y_OFFSET) / (usable * FLOOR_SQUASH);
        assert!(nx * nx + ny * ny <= 1.0 + 1e-9);
    }
}

#[test]
fn disc_samples_are_area_uniform() {
    // Half the area of a disc lies within radius / sqrt(2).
    let mut rng = StdRng::seed_from_u64(11);
    let radius = GLOBE_RADIUS - 50.0;
    let n = 20_000;
    let inner = (0..n)
        .map(|_| random_pos_in_disc(&mut rng, 50.0))
        .filter(|p| p.hypot() < radius / 2f64.sqrt())
        .count();
    let frac = inner as f64 / n as f64;
    assert!((frac - 0.5).abs() < 0.03, "inner fraction {frac}");
}

#[test]
fn step_snaps_on_arrival() {
    let target = Vec2::new(10.0, 0.0);
    assert_eq!(
        step_toward(Vec2::new(0.0, 0.0), target, 0.8, 2.0),
        Step::Moving(Vec2::new(0.8, 0.0))
    );
    assert_eq!(
        step_toward(Vec2::new(8.5, 0.0), target, 0.8, 2.0),
        Step::Arrived(target)
    );
}

#[test]
fn bearing_points_at_target() {
    let a = Vec2::new(0.0, 0.0);
    let b = Vec2::new(0.0, 5.0);
    assert!((bearing(a, b) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    assert_eq!(distance(a, b), 5.0);
}

#[test]
fn wrap_jumps_to_opposite_edge() {
    assert_eq!(wrap_coord(301.0, 300.0), -300.0);
    assert_eq!(wrap_coord(-301.0, 300.0), 300.0);
    assert_eq!(wrap_coord(12.0, 300.0), 12.0);
}
