use crate::foundation::core::{GLOBE_RADIUS, GROUND_Y_OFFSET, Rgba8, Vec2};
use crate::foundation::geometry::spread;
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::particles::SnowField;
use crate::scene::winter::draw_floor;
use crate::scene::{Population, Scene, SceneInit, SceneKind, scene_rng};
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::{PI, TAU};

pub const LIGHT_COUNT: usize = 40;
pub const GIFT_COUNT: usize = 5;
pub const SNOW_COUNT: usize = 150;

const APEX: Vec2 = Vec2::new(0.0, -130.0);
const TREE_HEIGHT: f64 = 190.0;
const TREE_HALF_WIDTH: f64 = 100.0;

const LIGHT_COLORS: [Rgba8; 5] = [
    Rgba8::hex(0xef4444),
    Rgba8::hex(0xfbbf24),
    Rgba8::hex(0x3b82f6),
    Rgba8::hex(0x22c55e),
    Rgba8::hex(0xf472b6),
];

const GIFT_COLORS: [(Rgba8, Rgba8); 3] = [
    (Rgba8::hex(0xdc2626), Rgba8::hex(0xfde047)),
    (Rgba8::hex(0x2563eb), Rgba8::hex(0xf8fafc)),
    (Rgba8::hex(0x16a34a), Rgba8::hex(0xf87171)),
];

#[derive(Clone, Debug, PartialEq)]
pub struct TreeLight {
    pub pos: Vec2,
    pub color: Rgba8,
    pub phase: f64,
    /// Phase advance per tick.
    pub speed: f64,
}

impl TreeLight {
    /// Blink level in `[0, 1]`.
    pub fn brightness(&self) -> f64 {
        (self.phase.sin() + 1.0) / 2.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Gift {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgba8,
    pub ribbon: Rgba8,
}

/// Decorated tree with blinking lights and presents at its foot.
#[derive(Clone, Debug, Default)]
pub struct ChristmasTree {
    pub lights: Vec<TreeLight>,
    pub gifts: Vec<Gift>,
}

impl ChristmasTree {
    pub fn new(rng: &mut impl Rng) -> Self {
        let lights = (0..LIGHT_COUNT)
            .map(|i| {
                // sqrt keeps the density even over the widening triangle.
                let t = rng.gen_range(0.1f64..1.0).sqrt();
                let half = t * TREE_HALF_WIDTH * 0.85;
                TreeLight {
                    pos: APEX + Vec2::new(spread(rng, half), t * TREE_HEIGHT * 0.95),
                    color: LIGHT_COLORS[i % LIGHT_COLORS.len()],
                    phase: rng.gen_range(0.0..TAU),
                    speed: rng.gen_range(0.03..0.12),
                }
            })
            .collect();
        let mut gifts: Vec<Gift> = (0..GIFT_COUNT)
            .map(|i| {
                let side = if i % 2 == 0 { -1.0 } else { 1.0 };
                let (color, ribbon) = GIFT_COLORS[i % GIFT_COLORS.len()];
                Gift {
                    pos: Vec2::new(
                        side * rng.gen_range(30.0..130.0),
                        GROUND_Y_OFFSET + rng.gen_range(-5.0..25.0),
                    ),
                    size: Vec2::new(rng.gen_range(18.0..30.0), rng.gen_range(14.0..24.0)),
                    color,
                    ribbon,
                }
            })
            .collect();
        gifts.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        Self { lights, gifts }
    }

    pub fn update(&mut self) {
        for light in &mut self.lights {
            light.phase += light.speed;
        }
    }

    pub fn draw(&self, p: &mut Painter<'_>) {
        let base_y = APEX.y + TREE_HEIGHT;
        p.rect(-12.0, base_y, 24.0, GROUND_Y_OFFSET - base_y, Rgba8::hex(0x451a03));
        let greens = [Rgba8::hex(0x14532d), Rgba8::hex(0x166534), Rgba8::hex(0x15803d)];
        // Three stacked tiers, widest at the bottom.
        for (tier, green) in greens.iter().enumerate() {
            let k = tier as f64;
            let top = APEX.y + k * 45.0;
            let bottom = base_y - (2.0 - k) * 55.0;
            let half = TREE_HALF_WIDTH * (0.55 + 0.225 * k);
            p.polygon(
                &[
                    Vec2::new(0.0, top),
                    Vec2::new(half, bottom),
                    Vec2::new(-half, bottom),
                ],
                *green,
            );
        }
        draw_star(p, APEX + Vec2::new(0.0, -6.0), 14.0, Rgba8::hex(0xfde047));

        for light in &self.lights {
            let b = light.brightness();
            p.circle(light.pos, 6.0, light.color.with_alpha(0.3 * b));
            p.circle(light.pos, 3.0, light.color.lerp(Rgba8::hex(0x1f2937), 0.7 * (1.0 - b)));
        }
        for g in &self.gifts {
            let (w, h) = (g.size.x, g.size.y);
            p.rect(g.pos.x - w / 2.0, g.pos.y - h, w, h, g.color);
            p.rect(g.pos.x - 2.0, g.pos.y - h, 4.0, h, g.ribbon);
            p.rect(g.pos.x - w / 2.0, g.pos.y - h / 2.0 - 2.0, w, 4.0, g.ribbon);
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for light in &self.lights {
            f(Population::TreeLight, light.pos);
        }
        for g in &self.gifts {
            f(Population::Gift, g.pos);
        }
    }
}

fn draw_star(p: &mut Painter<'_>, center: Vec2, radius: f64, color: Rgba8) {
    let points: Vec<Vec2> = (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { radius * 0.45 };
            let a = -PI / 2.0 + i as f64 * PI / 5.0;
            center + Vec2::new(a.cos(), a.sin()) * r
        })
        .collect();
    p.polygon(&points, color);
}

pub struct ChristmasNight {
    rng: StdRng,
    pub tree: ChristmasTree,
    pub snow: SnowField,
}

impl ChristmasNight {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let tree = ChristmasTree::new(&mut rng);
        let snow = SnowField::new(&mut rng, SNOW_COUNT);
        Self { rng, tree, snow }
    }
}

impl Scene for ChristmasNight {
    fn kind(&self) -> SceneKind {
        SceneKind::Christmas
    }

    fn update(&mut self) {
        self.tree.update();
        self.snow.update(&mut self.rng);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            GLOBE_RADIUS,
            Rgba8::hex(0x0b1026),
            Rgba8::hex(0x1e3a5f),
        ));
        draw_floor(p, Rgba8::hex(0xe2e8f0));
        self.tree.draw(p);
        self.snow.draw(p);
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        self.tree.visit(f);
        self.snow.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/christmas.rs"]
mod tests;
