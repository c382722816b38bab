//! User-composed diorama: every toggle of [`CustomSceneConfig`] owns one population layer.
//!
//! Each layer carries its own random stream, derived from the scene seed and the feature, so
//! switching one toggle never perturbs the trajectory of another.

use crate::foundation::core::{Rgba8, Vec2};
use crate::render::chrome::ChromeStyle;
use crate::render::painter::Painter;
use crate::scene::cat_mouse::Hunt;
use crate::scene::christmas::ChristmasTree;
use crate::scene::particles::{PetalField, SnowField};
use crate::scene::rain::{FLOWER_COUNT, Forest, Shower, TREE_COUNT};
use crate::scene::sakura::PETAL_COUNT;
use crate::scene::winter::{PERSON_COUNT, SNOW_COUNT, Village, draw_floor};
use crate::scene::{
    CustomSceneConfig, Feature, Population, Scene, SceneInit, SceneKind, draw_depth_sorted,
    scene_rng,
};
use rand::rngs::StdRng;

/// One toggled population and the random stream that drives it.
#[derive(Clone, Debug)]
pub struct Layer<T> {
    rng: StdRng,
    pub state: T,
}

impl<T> Layer<T> {
    fn new(seed: u64, feature: Feature, build: impl FnOnce(&mut StdRng) -> T) -> Self {
        let mut rng = scene_rng(layer_seed(seed, feature));
        let state = build(&mut rng);
        Self { rng, state }
    }
}

fn layer_seed(seed: u64, feature: Feature) -> u64 {
    seed ^ (feature as u64 + 1).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

pub struct CustomScene {
    seed: u64,
    config: CustomSceneConfig,
    pub snow: Option<Layer<SnowField>>,
    pub rain: Option<Layer<Shower>>,
    pub sakura: Option<Layer<PetalField>>,
    pub people: Option<Layer<Village>>,
    pub forest: Option<Layer<Forest>>,
    pub christmas_tree: Option<Layer<ChristmasTree>>,
    pub cat: Option<Layer<Hunt>>,
}

impl CustomScene {
    pub fn new(init: &SceneInit) -> Self {
        let mut scene = Self {
            seed: init.seed,
            config: CustomSceneConfig::default(),
            snow: None,
            rain: None,
            sakura: None,
            people: None,
            forest: None,
            christmas_tree: None,
            cat: None,
        };
        scene.apply(&init.custom);
        scene
    }

    pub fn config(&self) -> &CustomSceneConfig {
        &self.config
    }

    pub fn is_active(&self, feature: Feature) -> bool {
        match feature {
            Feature::Snow => self.snow.is_some(),
            Feature::Rain => self.rain.is_some(),
            Feature::Sakura => self.sakura.is_some(),
            Feature::People => self.people.is_some(),
            Feature::Forest => self.forest.is_some(),
            Feature::ChristmasTree => self.christmas_tree.is_some(),
            Feature::Cat => self.cat.is_some(),
        }
    }

    fn apply(&mut self, config: &CustomSceneConfig) {
        for feature in Feature::ALL {
            let on = config.enabled(feature);
            if on == self.is_active(feature) {
                continue;
            }
            tracing::debug!(?feature, on, "custom layer toggled");
            if on {
                self.spawn_layer(feature);
            } else {
                self.clear_layer(feature);
            }
        }
        self.config = config.clone();
    }

    fn spawn_layer(&mut self, feature: Feature) {
        let seed = self.seed;
        match feature {
            Feature::Snow => {
                self.snow = Some(Layer::new(seed, feature, |r| SnowField::new(r, SNOW_COUNT)));
            }
            Feature::Rain => self.rain = Some(Layer::new(seed, feature, |r| Shower::new(r))),
            Feature::Sakura => {
                self.sakura = Some(Layer::new(seed, feature, |r| PetalField::new(r, PETAL_COUNT)));
            }
            Feature::People => {
                self.people = Some(Layer::new(seed, feature, |r| Village::new(r, PERSON_COUNT)));
            }
            Feature::Forest => {
                self.forest = Some(Layer::new(seed, feature, |r| {
                    Forest::new(r, TREE_COUNT, FLOWER_COUNT)
                }));
            }
            Feature::ChristmasTree => {
                self.christmas_tree = Some(Layer::new(seed, feature, |r| ChristmasTree::new(r)));
            }
            Feature::Cat => self.cat = Some(Layer::new(seed, feature, |r| Hunt::new(r))),
        }
    }

    fn clear_layer(&mut self, feature: Feature) {
        match feature {
            Feature::Snow => self.snow = None,
            Feature::Rain => self.rain = None,
            Feature::Sakura => self.sakura = None,
            Feature::People => self.people = None,
            Feature::Forest => self.forest = None,
            Feature::ChristmasTree => self.christmas_tree = None,
            Feature::Cat => self.cat = None,
        }
    }

    fn has_ground(&self) -> bool {
        self.people.is_some()
            || self.forest.is_some()
            || self.cat.is_some()
            || self.christmas_tree.is_some()
    }
}

impl Scene for CustomScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Custom
    }

    fn update(&mut self) {
        if let Some(l) = &mut self.snow {
            l.state.update(&mut l.rng);
        }
        if let Some(l) = &mut self.rain {
            let canopies = self
                .forest
                .as_ref()
                .map(|f| f.state.canopies())
                .unwrap_or_default();
            l.state.update(&mut l.rng, &canopies);
        }
        if let Some(l) = &mut self.sakura {
            l.state.update(&mut l.rng);
        }
        if let Some(l) = &mut self.people {
            l.state.update(&mut l.rng);
        }
        if let Some(l) = &mut self.christmas_tree {
            l.state.update();
        }
        if let Some(l) = &mut self.cat {
            l.state.update(&mut l.rng);
        }
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop_flat(self.config.background_color);
        if self.has_ground() {
            let floor = if self.snow.is_some() {
                Rgba8::hex(0xf1f5f9)
            } else {
                Rgba8::hex(0x3f6212)
            };
            draw_floor(p, floor);
        }

        let mut sprites = Vec::new();
        if let Some(l) = &self.people {
            l.state.sprites(&mut sprites);
        }
        if let Some(l) = &self.forest {
            l.state.sprites(&mut sprites);
        }
        if let Some(l) = &self.cat {
            l.state.sprites(&mut sprites);
        }
        draw_depth_sorted(p, sprites);

        if let Some(l) = &self.christmas_tree {
            l.state.draw(p);
        }
        if let Some(l) = &self.rain {
            l.state.ripples.draw(p);
            l.state.drops.draw(p);
        }
        if let Some(l) = &self.snow {
            l.state.draw(p);
        }
        if let Some(l) = &self.sakura {
            l.state.draw(p, Rgba8::hex(0xfce7f3));
        }
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        if let Some(l) = &self.snow {
            l.state.visit(f);
        }
        if let Some(l) = &self.rain {
            l.state.visit(f);
        }
        if let Some(l) = &self.sakura {
            l.state.visit(f);
        }
        if let Some(l) = &self.people {
            l.state.visit(f);
        }
        if let Some(l) = &self.forest {
            l.state.visit(f);
        }
        if let Some(l) = &self.christmas_tree {
            l.state.visit(f);
        }
        if let Some(l) = &self.cat {
            l.state.visit(f);
        }
    }

    fn chrome(&self) -> ChromeStyle {
        ChromeStyle::from_base(self.config.base_color, self.config.text_color)
    }

    fn reconfigure(&mut self, config: &CustomSceneConfig) -> bool {
        self.apply(config);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/custom.rs"]
mod tests;
