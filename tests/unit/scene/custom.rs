use super::*;
use crate::scene::{census, containment_violations};

fn init(custom: CustomSceneConfig) -> SceneInit {
    SceneInit { seed: 99, custom }
}

fn drops(scene: &CustomScene) -> Vec<Vec2> {
    scene
        .rain
        .as_ref()
        .map(|l| l.state.drops.drops.iter().map(|d| d.pos).collect())
        .unwrap_or_default()
}

#[test]
fn empty_config_has_no_populations() {
    let scene = CustomScene::new(&SceneInit::seeded(1));
    assert!(census(&scene).is_empty());
    assert!(Feature::ALL.iter().all(|f| !scene.is_active(*f)));
}

#[test]
fn turning_snow_off_leaves_rain_untouched() {
    let config = CustomSceneConfig::default()
        .with(Feature::Snow, true)
        .with(Feature::Rain, true);
    let mut scene = CustomScene::new(&init(config.clone()));
    for _ in 0..20 {
        scene.update();
    }
    let before = drops(&scene);
    assert!(scene.reconfigure(&config.with(Feature::Snow, false)));
    assert!(scene.snow.is_none());
    assert_eq!(drops(&scene), before);
    assert!(!census(&scene).contains_key(&Population::Snowflake));
}

#[test]
fn layers_do_not_share_a_random_stream() {
    let rain_only = CustomSceneConfig::default().with(Feature::Rain, true);
    let mut a = CustomScene::new(&init(rain_only.clone()));
    let mut b = CustomScene::new(&init(
        rain_only.with(Feature::Snow, true).with(Feature::Sakura, true),
    ));
    for _ in 0..50 {
        a.update();
        b.update();
        assert_eq!(drops(&a), drops(&b));
    }
}

#[test]
fn toggling_on_spawns_a_fresh_population() {
    let mut scene = CustomScene::new(&SceneInit::seeded(3));
    let config = CustomSceneConfig::default()
        .with(Feature::People, true)
        .with(Feature::ChristmasTree, true);
    scene.reconfigure(&config);
    let counts = census(&scene);
    assert_eq!(counts[&Population::Person], PERSON_COUNT);
    assert!(counts[&Population::TreeLight] > 0);
    assert!(scene.is_active(Feature::People));
    assert_eq!(scene.config(), &config);
}

#[test]
fn colors_update_without_resetting_layers() {
    let config = CustomSceneConfig::default().with(Feature::Cat, true);
    let mut scene = CustomScene::new(&init(config.clone()));
    for _ in 0..10 {
        scene.update();
    }
    let cat = scene.cat.as_ref().map(|l| l.state.cat.clone());
    let mut recolored = config;
    recolored.base_color = Rgba8::hex(0x1e3a8a);
    recolored.text_color = Rgba8::WHITE;
    scene.reconfigure(&recolored);
    assert_eq!(scene.cat.as_ref().map(|l| l.state.cat.clone()), cat);
    assert_eq!(
        scene.chrome(),
        ChromeStyle::from_base(Rgba8::hex(0x1e3a8a), Rgba8::WHITE)
    );
}

#[test]
fn everything_on_stays_contained() {
    let mut config = CustomSceneConfig::default();
    for f in Feature::ALL {
        config.set(f, true);
    }
    let mut scene = CustomScene::new(&init(config));
    for _ in 0..1_000 {
        scene.update();
    }
    let counts = census(&scene);
    assert_eq!(counts[&Population::Snowflake], SNOW_COUNT);
    assert_eq!(counts[&Population::Plant], TREE_COUNT + FLOWER_COUNT);
    assert_eq!(counts[&Population::Cat], 1);
    assert!(containment_violations(&scene).is_empty());
}
