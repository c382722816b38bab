use super::*;
use crate::foundation::core::SURFACE_SIZE;
use crate::scene::census;

#[test]
fn tick_updates_then_renders() {
    let mut globe = Globe::from_config(&GlobeConfig::for_scene(SceneKind::Aquarium)).unwrap();
    let frame = globe.tick().unwrap().unwrap();
    assert_eq!((frame.width, frame.height), (SURFACE_SIZE, SURFACE_SIZE));
    assert!(frame.premultiplied);
    assert_eq!(globe.ticks(), 1);
    // Sphere center is covered by the scene backdrop.
    let center = frame.pixel(SURFACE_SIZE / 2, SURFACE_SIZE / 2).unwrap();
    assert_eq!(center[3], 255);
}

#[test]
fn unmounted_globe_does_not_advance() {
    let mut globe = Globe::from_config(&GlobeConfig::for_scene(SceneKind::CatMouse)).unwrap();
    globe.unmount();
    let before = census(globe.scene());
    assert!(globe.tick().unwrap().is_none());
    assert!(globe.render().unwrap().is_none());
    assert_eq!(globe.ticks(), 0);
    assert_eq!(census(globe.scene()), before);
}

#[test]
fn reconfigure_reaches_only_the_custom_scene() {
    let custom = CustomSceneConfig::default().with(crate::scene::Feature::Snow, true);
    let mut winter = Globe::from_config(&GlobeConfig::for_scene(SceneKind::Winter)).unwrap();
    assert!(!winter.reconfigure(&custom));

    let mut diy = Globe::from_config(&GlobeConfig::for_scene(SceneKind::Custom)).unwrap();
    assert!(census(diy.scene()).is_empty());
    assert!(diy.reconfigure(&custom));
    assert!(!census(diy.scene()).is_empty());
}

#[test]
fn engraving_defaults_to_the_scene_text() {
    let globe = Globe::from_config(&GlobeConfig::for_scene(SceneKind::Bamboo)).unwrap();
    assert_eq!(globe.engraving().as_str(), "Zen Garden");
}

#[test]
fn advance_updates_without_rendering() {
    let mut globe = Globe::from_config(&GlobeConfig::for_scene(SceneKind::Christmas)).unwrap();
    globe.advance(30);
    assert_eq!(globe.ticks(), 30);
    globe.unmount();
    globe.advance(30);
    assert_eq!(globe.ticks(), 30);
}
