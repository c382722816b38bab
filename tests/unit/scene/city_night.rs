use super::*;
use crate::scene::{census, containment_violations};

#[test]
fn lanes_decide_direction() {
    let scene = CityNight::new(&SceneInit::seeded(5));
    for car in &scene.cars {
        assert_eq!(car.pos.y, LANES[car.lane]);
        let expected = if car.lane == 2 { -1.0 } else { 1.0 };
        assert_eq!(car.heading(), expected);
    }
    assert!(scene.cars.iter().any(|c| c.lane == 2));
}

#[test]
fn left_bound_car_wraps_to_the_right_edge() {
    let mut car = Car {
        pos: Vec2::new(-CAR_WRAP + 0.5, LANES[2]),
        lane: 2,
        speed: 1.0,
        color: Rgba8::WHITE,
    };
    car.update();
    assert_eq!(car.pos.x, CAR_WRAP);
}

#[test]
fn traffic_and_windows_stay_in_bounds() {
    let mut scene = CityNight::new(&SceneInit::seeded(5));
    for _ in 0..2_000 {
        scene.update();
    }
    let counts = census(&scene);
    assert_eq!(counts[&Population::Skyscraper], SKYSCRAPER_COUNT);
    assert_eq!(counts[&Population::Car], CAR_COUNT);
    assert!(counts[&Population::Window] > 0);
    assert!(containment_violations(&scene).is_empty());
}
