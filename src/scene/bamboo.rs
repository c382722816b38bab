use crate::foundation::core::{GLOBE_RADIUS, GROUND_Y_OFFSET, Rgba8, Vec2};
use crate::foundation::geometry::spread;
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::winter::draw_floor;
use crate::scene::{Population, Scene, SceneInit, SceneKind, scene_rng};
use kurbo::{Affine, Ellipse, Point};
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::{PI, TAU};

pub const STALK_COUNT: usize = 9;
pub const LEAF_COUNT: usize = 30;

const FADE_IN_STEP: f64 = 0.01;
const MAX_LEAF_OPACITY: f64 = 0.9;
const JOINT_SPACING: f64 = 38.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Stalk {
    /// Root on the ground.
    pub base: Vec2,
    pub height: f64,
    pub width: f64,
    /// Sideways displacement of the tip at full swing.
    pub sway: f64,
    pub sway_phase: f64,
    pub sway_step: f64,
    pub color: Rgba8,
}

impl Stalk {
    pub fn tip_offset(&self) -> f64 {
        self.sway_phase.sin() * self.sway
    }

    /// Point at fraction `t` of the height; the bend grows with the square of `t`.
    fn point_at(&self, t: f64) -> Vec2 {
        Vec2::new(
            self.base.x + self.tip_offset() * t * t,
            self.base.y - self.height * t,
        )
    }

    fn draw(&self, p: &mut Painter<'_>) {
        let segments = (self.height / JOINT_SPACING).ceil().max(1.0) as usize;
        let joint = self.color.lerp(Rgba8::hex(0x1a2e05), 0.4);
        for i in 0..segments {
            let t0 = i as f64 / segments as f64;
            let t1 = (i + 1) as f64 / segments as f64;
            let a = self.point_at(t0);
            let b = self.point_at(t1);
            p.line(a, b, self.width, self.color);
            p.line(
                b - Vec2::new(self.width * 0.6, 0.0),
                b + Vec2::new(self.width * 0.6, 0.0),
                2.0,
                joint,
            );
        }
        // A few leaves at the crown.
        let tip = self.point_at(1.0);
        for (k, angle) in [-0.6f64, 0.3, 0.9].into_iter().enumerate() {
            let len = 18.0 + k as f64 * 4.0;
            let xf = Affine::translate(tip) * Affine::rotate(angle + self.tip_offset() * 0.01);
            p.with_transform(xf, |p| {
                p.fill(
                    &Ellipse::new(Point::new(len / 2.0, 0.0), Vec2::new(len / 2.0, 3.0), 0.0),
                    Rgba8::hex(0x4d7c0f),
                );
            });
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub angle: f64,
    pub spin: f64,
    pub opacity: f64,
    pub size: f64,
}

#[derive(Clone, Debug, Default)]
pub struct LeafFall {
    pub leaves: Vec<Leaf>,
}

impl LeafFall {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let leaves = (0..count)
            .map(|_| Leaf {
                pos: Vec2::new(spread(rng, GLOBE_RADIUS), spread(rng, GLOBE_RADIUS)),
                velocity: Vec2::new(rng.gen_range(-0.3..0.3), rng.gen_range(0.3..0.9)),
                angle: rng.gen_range(0.0..PI),
                spin: rng.gen_range(-0.04..0.04),
                opacity: rng.gen_range(0.0..MAX_LEAF_OPACITY),
                size: rng.gen_range(5.0..9.0),
            })
            .collect();
        Self { leaves }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for leaf in &mut self.leaves {
            leaf.pos += leaf.velocity;
            leaf.angle += leaf.spin;
            leaf.opacity = (leaf.opacity + FADE_IN_STEP).min(MAX_LEAF_OPACITY);
            if leaf.pos.y > GLOBE_RADIUS {
                leaf.pos.y = -GLOBE_RADIUS;
                leaf.pos.x = spread(rng, GLOBE_RADIUS);
                leaf.opacity = 0.0;
            }
            if leaf.pos.x.abs() > GLOBE_RADIUS {
                leaf.pos.x = -GLOBE_RADIUS * leaf.pos.x.signum();
            }
        }
    }

    pub fn draw(&self, p: &mut Painter<'_>) {
        for leaf in &self.leaves {
            p.with_transform(
                Affine::translate(leaf.pos) * Affine::rotate(leaf.angle),
                |p| {
                    p.fill(
                        &Ellipse::new(Point::ZERO, Vec2::new(leaf.size, leaf.size * 0.3), 0.0),
                        Rgba8::hex(0x65a30d).with_alpha(leaf.opacity),
                    );
                },
            );
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for leaf in &self.leaves {
            f(Population::Leaf, leaf.pos);
        }
    }
}

pub struct BambooGrove {
    rng: StdRng,
    pub stalks: Vec<Stalk>,
    pub leaves: LeafFall,
}

impl BambooGrove {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let greens = [Rgba8::hex(0x65a30d), Rgba8::hex(0x4d7c0f), Rgba8::hex(0x84cc16)];
        let pitch = 2.0 * (GLOBE_RADIUS - 60.0) / (STALK_COUNT - 1) as f64;
        let mut stalks: Vec<Stalk> = (0..STALK_COUNT)
            .map(|i| Stalk {
                base: Vec2::new(
                    -(GLOBE_RADIUS - 60.0) + i as f64 * pitch + spread(&mut rng, 8.0),
                    GROUND_Y_OFFSET + rng.gen_range(-20.0..40.0),
                ),
                height: rng.gen_range(220.0..330.0),
                width: rng.gen_range(7.0..12.0),
                sway: rng.gen_range(6.0..16.0),
                sway_phase: rng.gen_range(0.0..TAU),
                sway_step: rng.gen_range(0.01..0.03),
                color: greens[i % greens.len()],
            })
            .collect();
        stalks.sort_by(|a, b| a.base.y.total_cmp(&b.base.y));
        let leaves = LeafFall::new(&mut rng, LEAF_COUNT);
        Self {
            rng,
            stalks,
            leaves,
        }
    }
}

impl Scene for BambooGrove {
    fn kind(&self) -> SceneKind {
        SceneKind::Bamboo
    }

    fn update(&mut self) {
        for s in &mut self.stalks {
            s.sway_phase += s.sway_step;
        }
        self.leaves.update(&mut self.rng);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            GLOBE_RADIUS,
            Rgba8::hex(0xecfccb),
            Rgba8::hex(0xd9f99d),
        ));
        draw_floor(p, Rgba8::hex(0x3f6212));
        for s in &self.stalks {
            s.draw(p);
        }
        self.leaves.draw(p);
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for s in &self.stalks {
            f(Population::Stalk, s.base);
        }
        self.leaves.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/bamboo.rs"]
mod tests;
