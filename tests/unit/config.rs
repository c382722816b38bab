use super::*;
use crate::foundation::core::Rgba8;

#[test]
fn empty_object_gives_defaults() {
    let cfg = GlobeConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, GlobeConfig::default());
    assert_eq!(cfg.engraving().as_str(), "Magic World");
}

#[test]
fn parses_custom_scene() {
    let cfg = GlobeConfig::from_json_str(
        r##"{
            "scene": "custom",
            "engraving": "Hello there",
            "seed": 42,
            "custom": { "snow": true, "cat": true, "background_color": "#112233" }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.scene, SceneKind::Custom);
    assert_eq!(cfg.engraving().as_str(), "Hello there");
    let init = cfg.scene_init();
    assert_eq!(init.seed, 42);
    assert!(init.custom.snow && init.custom.cat && !init.custom.rain);
    assert_eq!(init.custom.background_color, Rgba8::hex(0x112233));
}

#[test]
fn scene_aliases_resolve() {
    let cfg = GlobeConfig::from_json_str(r#"{ "scene": "skyline" }"#).unwrap();
    assert_eq!(cfg.scene, SceneKind::Skyline);
    assert_eq!(cfg.engraving().as_str(), "I Love Shanghai");
}

#[test]
fn long_engraving_is_truncated() {
    let cfg = GlobeConfig::from_json_str(r#"{ "engraving": "abcdefghijklmnopqrstuvwxyz" }"#)
        .unwrap();
    assert_eq!(cfg.engraving().as_str(), "abcdefghijklmnopqrst");
}

#[test]
fn rejects_bad_values() {
    assert!(matches!(
        GlobeConfig::from_json_str(r#"{ "loop_hz": 0 }"#),
        Err(MicrocosmError::Validation(_))
    ));
    assert!(matches!(
        GlobeConfig::from_json_str(r#"{ "scene": "atlantis" }"#),
        Err(MicrocosmError::Serde(_))
    ));
    assert!(matches!(
        GlobeConfig::from_json_str(r#"{ "sceen": "winter" }"#),
        Err(MicrocosmError::Serde(_))
    ));
}
