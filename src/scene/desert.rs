use crate::foundation::core::{BezPath, GLOBE_RADIUS, GROUND_Y_OFFSET, Rgba8, Vec2};
use crate::foundation::geometry::spread;
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::{Population, Scene, SceneInit, SceneKind, depth_sorted, scene_rng};
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::{PI, TAU};

pub const CAMEL_COUNT: usize = 4;
pub const SAND_COUNT: usize = 40;
pub const CAMEL_WRAP: f64 = GLOBE_RADIUS + 40.0;

const STRIDE_STEP: f64 = 0.12;

#[derive(Clone, Debug, PartialEq)]
pub struct Camel {
    pub pos: Vec2,
    pub speed: f64,
    pub stride_phase: f64,
    pub scale: f64,
}

impl Camel {
    pub fn update(&mut self) {
        self.pos.x += self.speed;
        self.stride_phase += STRIDE_STEP * self.speed;
        if self.pos.x > CAMEL_WRAP {
            self.pos.x = -CAMEL_WRAP;
        }
    }

    fn draw(&self, p: &mut Painter<'_>) {
        let hide = Rgba8::hex(0xb45309);
        let s = self.scale;
        let at = |x: f64, y: f64| self.pos + Vec2::new(x * s, y * s);
        p.ellipse(self.pos, 24.0 * s, 5.0 * s, 0.0, Rgba8::BLACK.with_alpha(0.15));
        // Legs swing in opposite pairs.
        let swing = self.stride_phase.sin() * 6.0;
        for (hip, dir) in [(-14.0, 1.0), (-8.0, -1.0), (10.0, 1.0), (16.0, -1.0)] {
            p.line(at(hip, -22.0), at(hip + swing * dir, 0.0), 3.0 * s, hide);
        }
        p.ellipse(at(0.0, -30.0), 22.0 * s, 11.0 * s, 0.0, hide);
        p.circle(at(-5.0, -40.0), 9.0 * s, hide);
        p.line(at(18.0, -32.0), at(26.0, -50.0), 5.0 * s, hide);
        p.ellipse(at(30.0, -52.0), 7.0 * s, 4.0 * s, 0.2, hide);
        p.rect(
            self.pos.x - 8.0 * s,
            self.pos.y - 44.0 * s,
            16.0 * s,
            6.0 * s,
            Rgba8::hex(0x7f1d1d),
        );
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SandMote {
    pub pos: Vec2,
    pub speed: f64,
    pub size: f64,
    pub phase: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Sandstorm {
    pub motes: Vec<SandMote>,
}

impl Sandstorm {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let motes = (0..count)
            .map(|_| SandMote {
                pos: Vec2::new(spread(rng, GLOBE_RADIUS), spread(rng, GLOBE_RADIUS * 0.8)),
                speed: rng.gen_range(1.0..3.0),
                size: rng.gen_range(0.5..1.8),
                phase: rng.gen_range(0.0..TAU),
            })
            .collect();
        Self { motes }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for m in &mut self.motes {
            m.phase += 0.05;
            m.pos.x += m.speed;
            m.pos.y += m.phase.sin() * 0.3;
            if m.pos.x > GLOBE_RADIUS {
                m.pos.x = -GLOBE_RADIUS;
                m.pos.y = spread(rng, GLOBE_RADIUS * 0.8);
            }
        }
    }

    pub fn draw(&self, p: &mut Painter<'_>) {
        let grain = Rgba8::rgba(254, 243, 199, 0.6);
        for m in &self.motes {
            p.line(m.pos, m.pos - Vec2::new(m.speed * 3.0, 0.0), m.size, grain);
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for m in &self.motes {
            f(Population::Sand, m.pos);
        }
    }
}

fn draw_pyramid(p: &mut Painter<'_>, base_center: Vec2, half: f64, height: f64) {
    let apex = base_center - Vec2::new(0.0, height);
    p.polygon(
        &[apex, base_center + Vec2::new(half, 0.0), base_center - Vec2::new(half, 0.0)],
        Rgba8::hex(0xd97706),
    );
    // Shaded face.
    p.polygon(
        &[apex, base_center + Vec2::new(half, 0.0), base_center + Vec2::new(half * 0.2, 0.0)],
        Rgba8::hex(0x92400e),
    );
}

fn draw_dune(p: &mut Painter<'_>, y: f64, amplitude: f64, phase: f64, color: Rgba8) {
    let r = GLOBE_RADIUS;
    let mut dune = BezPath::new();
    dune.move_to((-r, r));
    for i in 0..=24 {
        let x = -r + f64::from(i) / 24.0 * 2.0 * r;
        dune.line_to((x, y + (x / r * PI + phase).sin() * amplitude));
    }
    dune.line_to((r, r));
    dune.close_path();
    p.fill(&dune, color);
}

pub struct DesertCaravan {
    rng: StdRng,
    pub camels: Vec<Camel>,
    pub sand: Sandstorm,
}

impl DesertCaravan {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let camels = (0..CAMEL_COUNT)
            .map(|i| Camel {
                pos: Vec2::new(
                    -CAMEL_WRAP + i as f64 * (2.0 * CAMEL_WRAP / CAMEL_COUNT as f64),
                    GROUND_Y_OFFSET + rng.gen_range(-10.0..40.0),
                ),
                speed: rng.gen_range(0.3..0.7),
                stride_phase: rng.gen_range(0.0..TAU),
                scale: rng.gen_range(0.8..1.1),
            })
            .collect();
        let sand = Sandstorm::new(&mut rng, SAND_COUNT);
        Self { rng, camels, sand }
    }
}

impl Scene for DesertCaravan {
    fn kind(&self) -> SceneKind {
        SceneKind::Desert
    }

    fn update(&mut self) {
        for camel in &mut self.camels {
            camel.update();
        }
        self.sand.update(&mut self.rng);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            GROUND_Y_OFFSET,
            Rgba8::hex(0xfb923c),
            Rgba8::hex(0xfde68a),
        ));
        p.circle(Vec2::new(-110.0, -120.0), 40.0, Rgba8::hex(0xfef3c7).with_alpha(0.9));
        draw_pyramid(p, Vec2::new(60.0, 40.0), 110.0, 130.0);
        draw_pyramid(p, Vec2::new(-60.0, 50.0), 70.0, 85.0);
        draw_dune(p, 60.0, 12.0, 0.0, Rgba8::hex(0xf59e0b));
        draw_dune(p, 110.0, 10.0, 1.7, Rgba8::hex(0xfbbf24));

        let sorted = depth_sorted(self.camels.iter().map(|c| (c.pos.y, c)).collect());
        for camel in sorted {
            camel.draw(p);
        }
        self.sand.draw(p);
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for camel in &self.camels {
            f(Population::Camel, camel.pos);
        }
        self.sand.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/desert.rs"]
mod tests;
