//! Scene trait, population tags and the per-scene simulations.
//!
//! A scene owns its entity populations and its random stream. The scheduler calls
//! [`Scene::update`] once per tick, then the renderer calls [`Scene::draw`].

use crate::foundation::core::{GLOBE_RADIUS, Vec2};
use crate::render::chrome::ChromeStyle;
use crate::render::painter::Painter;
use std::collections::BTreeMap;

pub mod config;
pub mod kind;
pub mod particles;
pub mod registry;

pub mod aquarium;
pub mod bamboo;
pub mod birthday;
pub mod carousel;
pub mod cat_mouse;
pub mod christmas;
pub mod city_night;
pub mod custom;
pub mod desert;
pub mod ink_river;
pub mod jellyfish;
pub mod rain;
pub mod sakura;
pub mod skyline;
pub mod wedding;
pub mod winter;

pub use config::{CustomSceneConfig, Feature, SceneInit};
pub use kind::SceneKind;

/// One diorama: populations, update rule and draw rule.
pub trait Scene: Send {
    fn kind(&self) -> SceneKind;

    /// Advance every population by one tick.
    fn update(&mut self);

    /// Paint background, terrain, depth-sorted entities and weather, in that order.
    fn draw(&self, p: &mut Painter<'_>);

    /// Report every live entity's tag and scene-local position.
    fn visit(&self, f: &mut dyn FnMut(Population, Vec2));

    fn chrome(&self) -> ChromeStyle {
        ChromeStyle::default()
    }

    /// Apply a new custom configuration in place. Returns `false` for scenes that ignore it.
    fn reconfigure(&mut self, _config: &CustomSceneConfig) -> bool {
        false
    }
}

/// Stable identifier for spawn/despawn entities; never reused within a scene's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

/// Monotonic [`EntityId`] source.
#[derive(Clone, Debug, Default)]
pub struct IdCounter(u64);

impl IdCounter {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.0);
        self.0 += 1;
        id
    }
}

/// Tag for every entity population across all scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Population {
    Snowflake,
    Person,
    Snowman,
    RainDrop,
    Ripple,
    Plant,
    Fish,
    Bubble,
    Petal,
    Horse,
    RoofLight,
    Boat,
    Star,
    Window,
    Cat,
    Mouse,
    Candle,
    Wish,
    TreeLight,
    Gift,
    Confetti,
    Camel,
    Sand,
    Skyscraper,
    Car,
    Mountain,
    InkMote,
    Stalk,
    Leaf,
    Jellyfish,
}

/// Where an entity is allowed to be.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Containment {
    /// Wraps to the opposite edge; stays within `[-R - margin, R + margin]` on both axes.
    Wrap { margin: f64 },
    /// Reflected back inside the given radius from the sphere center.
    Reflect { radius: f64 },
    /// Free to roam; the disc mask trims it at render time.
    Clip,
}

impl Containment {
    pub fn admits(self, pos: Vec2) -> bool {
        if !pos.x.is_finite() || !pos.y.is_finite() {
            return false;
        }
        match self {
            Self::Wrap { margin } => {
                let limit = GLOBE_RADIUS + margin;
                pos.x.abs() <= limit && pos.y.abs() <= limit
            }
            Self::Reflect { radius } => pos.hypot() <= radius,
            Self::Clip => true,
        }
    }
}

impl Population {
    pub fn containment(self) -> Containment {
        use Population::*;
        match self {
            Snowflake | RainDrop | Petal | Bubble | Confetti | InkMote | Leaf | Sand | Star => {
                Containment::Wrap { margin: 60.0 }
            }
            Boat | Camel | Car => Containment::Wrap { margin: 60.0 },
            Cat | Mouse => Containment::Reflect {
                radius: GLOBE_RADIUS,
            },
            Person | Snowman | Plant | Gift | TreeLight | Horse | RoofLight | Window
            | Skyscraper | Mountain | Stalk | Candle | Wish | Ripple => Containment::Wrap {
                margin: 0.0,
            },
            Fish | Jellyfish => Containment::Clip,
        }
    }
}

/// Count of live entities per population.
pub fn census(scene: &dyn Scene) -> BTreeMap<Population, usize> {
    let mut out = BTreeMap::new();
    scene.visit(&mut |pop, _| *out.entry(pop).or_insert(0) += 1);
    out
}

/// Entities whose position violates their population's containment rule.
pub fn containment_violations(scene: &dyn Scene) -> Vec<(Population, Vec2)> {
    let mut out = Vec::new();
    scene.visit(&mut |pop, pos| {
        if !pop.containment().admits(pos) {
            out.push((pop, pos));
        }
    });
    out
}

/// Ground-plane entity that takes part in the shared depth sort.
pub(crate) enum Sprite<'a> {
    Person(&'a winter::Person),
    Snowman(&'a winter::Snowman),
    Plant(&'a rain::Plant),
    Cat(&'a cat_mouse::Cat),
    Mouse(&'a cat_mouse::Mouse),
}

impl Sprite<'_> {
    fn draw(&self, p: &mut Painter<'_>) {
        match self {
            Self::Person(x) => winter::draw_person(p, x),
            Self::Snowman(x) => winter::draw_snowman(p, x),
            Self::Plant(x) => rain::draw_plant(p, x),
            Self::Cat(x) => cat_mouse::draw_cat(p, x),
            Self::Mouse(x) => cat_mouse::draw_mouse(p, x),
        }
    }
}

/// Draw sprites back to front: smaller y (farther) first, so nearer ones occlude.
pub(crate) fn draw_depth_sorted(p: &mut Painter<'_>, sprites: Vec<(f64, Sprite<'_>)>) {
    for sprite in depth_sorted(sprites) {
        sprite.draw(p);
    }
}

/// Stable back-to-front ordering by depth key (ascending y is farther).
pub(crate) fn depth_sorted<T>(mut items: Vec<(f64, T)>) -> Vec<T> {
    items.sort_by(|a, b| a.0.total_cmp(&b.0));
    items.into_iter().map(|(_, t)| t).collect()
}

pub(crate) fn scene_rng(seed: u64) -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(seed)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/mod.rs"]
mod tests;
