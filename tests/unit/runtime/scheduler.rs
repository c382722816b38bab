use super::*;

const SMALL: Canvas = Canvas {
    width: 96,
    height: 96,
};

fn quiet() -> Engraving {
    Engraving::new("")
}

#[test]
fn loop_publishes_frames_until_cancelled() {
    let tap = FrameTap::new();
    let scene = registry::build(SceneKind::Aquarium, &SceneInit::seeded(1));
    let handle = LoopHandle::spawn(scene, quiet(), SMALL, tap.clone(), 240.0).unwrap();
    assert!(tap.wait_newer(2, Duration::from_secs(10)).is_some());
    let ticks = handle.cancel().unwrap();
    assert!(ticks >= 3);
    let after = tap.seq();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(tap.seq(), after);
}

#[test]
fn dropping_the_handle_stops_the_loop() {
    let tap = FrameTap::new();
    let scene = registry::build(SceneKind::Rain, &SceneInit::seeded(1));
    let handle = LoopHandle::spawn(scene, quiet(), SMALL, tap.clone(), 240.0).unwrap();
    assert!(tap.wait_newer(0, Duration::from_secs(10)).is_some());
    drop(handle);
    let after = tap.seq();
    thread::sleep(Duration::from_millis(30));
    assert_eq!(tap.seq(), after);
}

#[test]
fn rejects_non_positive_rate() {
    let scene = registry::build(SceneKind::Winter, &SceneInit::seeded(1));
    assert!(LoopHandle::spawn(scene, quiet(), SMALL, FrameTap::new(), 0.0).is_err());
}

#[test]
fn show_replaces_the_live_scene() {
    let mut stage = Stage::new(SMALL, 240.0);
    assert_eq!(stage.current(), None);
    stage
        .show(SceneKind::Winter, &SceneInit::seeded(3), quiet())
        .unwrap();
    assert!(stage.tap().wait_newer(0, Duration::from_secs(10)).is_some());
    stage
        .show(SceneKind::Jellyfish, &SceneInit::seeded(3), quiet())
        .unwrap();
    assert_eq!(stage.current(), Some(SceneKind::Jellyfish));
    let seq = stage.tap().seq();
    assert!(stage.tap().wait_newer(seq, Duration::from_secs(10)).is_some());
    assert!(stage.is_running());
}

#[test]
fn commands_need_a_matching_live_loop() {
    let mut stage = Stage::new(SMALL, 240.0);
    let custom = CustomSceneConfig::default();
    assert!(!stage.reconfigure(&custom));
    assert!(!stage.set_engraving(quiet()));

    stage
        .show(SceneKind::Carousel, &SceneInit::seeded(2), quiet())
        .unwrap();
    assert!(!stage.reconfigure(&custom));
    assert!(stage.set_engraving(Engraving::new("Hi")));

    stage
        .show(SceneKind::Custom, &SceneInit::seeded(2), quiet())
        .unwrap();
    assert!(stage.reconfigure(&custom));
}

#[test]
fn stop_clears_the_tap() {
    let mut stage = Stage::new(SMALL, 240.0);
    stage
        .show(SceneKind::Desert, &SceneInit::seeded(5), quiet())
        .unwrap();
    assert!(stage.tap().wait_newer(0, Duration::from_secs(10)).is_some());
    let ticks = stage.stop().unwrap();
    assert!(ticks.is_some_and(|t| t > 0));
    assert!(stage.tap().latest().is_none());
    assert_eq!(stage.stop().unwrap(), None);
}

#[test]
fn bad_surface_is_rejected_before_the_loop_starts() {
    let mut stage = Stage::new(
        Canvas {
            width: 0,
            height: 96,
        },
        240.0,
    );
    let err = stage
        .show(SceneKind::Winter, &SceneInit::seeded(1), quiet())
        .unwrap_err();
    assert!(matches!(err, MicrocosmError::Validation(_)));
    assert!(!stage.is_running());
    assert_eq!(stage.current(), None);
}
