use crate::foundation::core::{GLOBE_RADIUS, GROUND_Y_OFFSET, Rgba8, Vec2};
use crate::foundation::geometry::random_pos_in_globe;
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::particles::{Canopy, RainField, RipplePool};
use crate::scene::winter::draw_floor;
use crate::scene::{Population, Scene, SceneInit, SceneKind, Sprite, draw_depth_sorted, scene_rng};
use rand::Rng;
use rand::rngs::StdRng;

pub const RAIN_COUNT: usize = 400;
pub const TREE_COUNT: usize = 3;
pub const FLOWER_COUNT: usize = 6;
pub const MAX_RIPPLES: usize = 256;

const FLOWER_COLORS: [Rgba8; 3] = [
    Rgba8::hex(0xf472b6),
    Rgba8::hex(0xa78bfa),
    Rgba8::hex(0xfbbf24),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlantKind {
    Tree,
    Flower,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Plant {
    pub pos: Vec2,
    pub kind: PlantKind,
    pub color: Rgba8,
    pub height: f64,
    pub width: f64,
}

/// Static trees and flowers, sorted back to front.
#[derive(Clone, Debug, Default)]
pub struct Forest {
    pub plants: Vec<Plant>,
}

impl Forest {
    pub fn new(rng: &mut impl Rng, trees: usize, flowers: usize) -> Self {
        let mut plants = Vec::with_capacity(trees + flowers);
        for _ in 0..trees {
            plants.push(Plant {
                pos: random_pos_in_globe(rng, GROUND_Y_OFFSET, 20.0),
                kind: PlantKind::Tree,
                color: Rgba8::hex(0x166534),
                height: 80.0,
                width: 40.0,
            });
        }
        for i in 0..flowers {
            plants.push(Plant {
                pos: random_pos_in_globe(rng, GROUND_Y_OFFSET, 10.0),
                kind: PlantKind::Flower,
                color: FLOWER_COLORS[i % FLOWER_COLORS.len()],
                height: 15.0,
                width: 10.0,
            });
        }
        plants.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        Self { plants }
    }

    /// Rain-intercepting bands at the top of each plant.
    pub fn canopies(&self) -> Vec<Canopy> {
        self.plants
            .iter()
            .map(|p| Canopy {
                x: p.pos.x,
                top: p.pos.y - p.height,
                half_width: p.width / 2.0,
            })
            .collect()
    }

    pub(crate) fn sprites<'a>(&'a self, out: &mut Vec<(f64, Sprite<'a>)>) {
        out.extend(self.plants.iter().map(|p| (p.pos.y, Sprite::Plant(p))));
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for p in &self.plants {
            f(Population::Plant, p.pos);
        }
    }
}

pub(crate) fn draw_plant(p: &mut Painter<'_>, plant: &Plant) {
    let (x, y) = (plant.pos.x, plant.pos.y);
    p.ellipse(plant.pos, 15.0, 5.0, 0.0, Rgba8::BLACK.with_alpha(0.3));
    match plant.kind {
        PlantKind::Tree => {
            let top = y - plant.height;
            p.rect(x - 4.0, top, 8.0, plant.height, Rgba8::hex(0x451a03));
            p.circle(Vec2::new(x, top), 25.0, plant.color);
            p.circle(Vec2::new(x - 15.0, top + 10.0), 20.0, plant.color);
            p.circle(Vec2::new(x + 15.0, top + 10.0), 20.0, plant.color);
        }
        PlantKind::Flower => {
            let top = y - plant.height;
            p.line(plant.pos, Vec2::new(x, top), 2.0, Rgba8::hex(0x166534));
            p.circle(Vec2::new(x, top), 5.0, plant.color);
        }
    }
}

/// Drops plus the ripples they leave, optionally intercepted by a forest.
#[derive(Clone, Debug)]
pub struct Shower {
    pub drops: RainField,
    pub ripples: RipplePool,
}

impl Shower {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            drops: RainField::new(rng, RAIN_COUNT),
            ripples: RipplePool::new(MAX_RIPPLES, Rgba8::WHITE.with_alpha(0.4)),
        }
    }

    pub fn update(&mut self, rng: &mut impl Rng, canopies: &[Canopy]) {
        self.drops.update(rng, canopies, &mut self.ripples);
        self.ripples.update();
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        self.drops.visit(f);
        self.ripples.visit(f);
    }
}

pub struct RainForest {
    rng: StdRng,
    pub forest: Forest,
    pub shower: Shower,
    canopies: Vec<Canopy>,
}

impl RainForest {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let shower = Shower::new(&mut rng);
        let forest = Forest::new(&mut rng, TREE_COUNT, FLOWER_COUNT);
        let canopies = forest.canopies();
        Self {
            rng,
            forest,
            shower,
            canopies,
        }
    }
}

impl Scene for RainForest {
    fn kind(&self) -> SceneKind {
        SceneKind::Rain
    }

    fn update(&mut self) {
        self.shower.update(&mut self.rng, &self.canopies);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            GLOBE_RADIUS,
            Rgba8::hex(0x334155),
            Rgba8::hex(0x475569),
        ));
        draw_floor(p, Rgba8::hex(0x14532d));
        let pond = Vec2::new(80.0, GROUND_Y_OFFSET + 20.0);
        p.ellipse(pond, 80.0, 40.0, 0.0, Rgba8::hex(0x0f172a));
        p.ellipse(pond, 80.0, 40.0, 0.0, Rgba8::rgba(56, 189, 248, 0.2));

        let mut sprites = Vec::new();
        self.forest.sprites(&mut sprites);
        draw_depth_sorted(p, sprites);

        self.shower.ripples.draw(p);
        self.shower.drops.draw(p);
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        self.forest.visit(f);
        self.shower.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/rain.rs"]
mod tests;
