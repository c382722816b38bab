//! Scene construction, resolved once per switch through a table indexed by [`SceneKind`].

use crate::scene::{Scene, SceneInit, SceneKind, census};

type Constructor = fn(&SceneInit) -> Box<dyn Scene>;

fn boxed<S: Scene + 'static>(scene: S) -> Box<dyn Scene> {
    Box::new(scene)
}

/// Constructors in [`SceneKind::ALL`] order.
const CONSTRUCTORS: [Constructor; 16] = [
    |i| boxed(super::winter::WinterVillage::new(i)),
    |i| boxed(super::rain::RainForest::new(i)),
    |i| boxed(super::aquarium::Aquarium::new(i)),
    |i| boxed(super::sakura::SakuraSwing::new(i)),
    |i| boxed(super::carousel::Carousel::new(i)),
    |i| boxed(super::skyline::Skyline::new(i)),
    |i| boxed(super::cat_mouse::CatAndMouse::new(i)),
    |i| boxed(super::birthday::BirthdayCake::new(i)),
    |i| boxed(super::christmas::ChristmasNight::new(i)),
    |i| boxed(super::wedding::WeddingArch::new(i)),
    |i| boxed(super::desert::DesertCaravan::new(i)),
    |i| boxed(super::city_night::CityNight::new(i)),
    |i| boxed(super::ink_river::InkRiver::new(i)),
    |i| boxed(super::bamboo::BambooGrove::new(i)),
    |i| boxed(super::jellyfish::JellyfishTank::new(i)),
    |i| boxed(super::custom::CustomScene::new(i)),
];

/// Build fresh populations for `kind`.
#[tracing::instrument(skip(init), fields(seed = init.seed))]
pub fn build(kind: SceneKind, init: &SceneInit) -> Box<dyn Scene> {
    let scene = CONSTRUCTORS[kind.index()](init);
    tracing::debug!(census = ?census(scene.as_ref()), "scene initialized");
    scene
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
