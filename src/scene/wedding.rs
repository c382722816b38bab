use crate::foundation::core::{BezPath, GLOBE_RADIUS, GROUND_Y_OFFSET, Rgba8, Vec2};
use crate::foundation::geometry::spread;
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::winter::draw_floor;
use crate::scene::{Population, Scene, SceneInit, SceneKind, scene_rng};
use kurbo::Affine;
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::{PI, TAU};

pub const CONFETTI_COUNT: usize = 120;

const SWAY_STEP: f64 = 0.05;
const ARCH_BASE_Y: f64 = GROUND_Y_OFFSET - 10.0;
const ARCH_RADIUS: f64 = 90.0;
const ARCH_LEG: f64 = 80.0;

const CONFETTI_COLORS: [Rgba8; 5] = [
    Rgba8::hex(0xf9a8d4),
    Rgba8::hex(0xfde68a),
    Rgba8::hex(0xc4b5fd),
    Rgba8::hex(0xffffff),
    Rgba8::hex(0x99f6e4),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Confetti {
    pub pos: Vec2,
    pub speed_y: f64,
    pub sway: f64,
    pub phase: f64,
    pub angle: f64,
    pub color: Rgba8,
}

#[derive(Clone, Debug, Default)]
pub struct ConfettiShower {
    pub pieces: Vec<Confetti>,
}

impl ConfettiShower {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let pieces = (0..count)
            .map(|i| Confetti {
                pos: Vec2::new(spread(rng, GLOBE_RADIUS), spread(rng, GLOBE_RADIUS)),
                speed_y: rng.gen_range(0.4..1.2),
                sway: rng.gen_range(0.2..0.8),
                phase: rng.gen_range(0.0..TAU),
                angle: rng.gen_range(0.0..PI),
                color: CONFETTI_COLORS[i % CONFETTI_COLORS.len()],
            })
            .collect();
        Self { pieces }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for c in &mut self.pieces {
            c.phase += SWAY_STEP;
            c.pos.y += c.speed_y;
            c.pos.x += c.phase.sin() * c.sway;
            c.angle += 0.03;
            if c.pos.y > GLOBE_RADIUS {
                c.pos.y = -GLOBE_RADIUS;
                c.pos.x = spread(rng, GLOBE_RADIUS);
            }
            if c.pos.x.abs() > GLOBE_RADIUS {
                c.pos.x = -GLOBE_RADIUS * c.pos.x.signum();
            }
        }
    }

    pub fn draw(&self, p: &mut Painter<'_>) {
        for c in &self.pieces {
            p.with_transform(Affine::translate(c.pos) * Affine::rotate(c.angle), |p| {
                p.rect(-3.0, -1.5, 6.0, 3.0, c.color);
            });
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for c in &self.pieces {
            f(Population::Confetti, c.pos);
        }
    }
}

fn draw_arch(p: &mut Painter<'_>) {
    let wood = Rgba8::hex(0xf5f5f4);
    let mut frame = BezPath::new();
    let top = ARCH_BASE_Y - ARCH_LEG;
    frame.move_to((-ARCH_RADIUS, ARCH_BASE_Y));
    frame.line_to((-ARCH_RADIUS, top));
    for i in 1..=32 {
        let a = PI + f64::from(i) / 32.0 * PI;
        frame.line_to((a.cos() * ARCH_RADIUS, top + a.sin() * ARCH_RADIUS));
    }
    frame.line_to((ARCH_RADIUS, ARCH_BASE_Y));
    p.stroke(&frame, 8.0, wood);

    // Flowers climb both legs and crown the arc.
    let blooms = [Rgba8::hex(0xf472b6), Rgba8::hex(0xfda4af), Rgba8::hex(0xffffff)];
    for i in 0..9 {
        let t = i as f64 / 8.0;
        let a = PI + t * PI;
        let pos = Vec2::new(a.cos() * ARCH_RADIUS, top + a.sin() * ARCH_RADIUS);
        p.circle(pos, 9.0, blooms[i % blooms.len()]);
        p.circle(pos + Vec2::new(5.0, 4.0), 5.0, Rgba8::hex(0x4ade80));
    }
    for side in [-1.0, 1.0] {
        for j in 0..4 {
            let y = ARCH_BASE_Y - 15.0 - j as f64 * 18.0;
            p.circle(Vec2::new(side * ARCH_RADIUS, y), 6.0, blooms[j % blooms.len()]);
        }
    }
}

fn draw_couple(p: &mut Painter<'_>) {
    let feet = ARCH_BASE_Y + 5.0;
    let skin = Rgba8::hex(0xffedd5);
    // Groom
    p.rect(-30.0, feet - 45.0, 16.0, 45.0, Rgba8::hex(0x1f2937));
    p.polygon(
        &[
            Vec2::new(-22.0, feet - 45.0),
            Vec2::new(-25.0, feet - 35.0),
            Vec2::new(-19.0, feet - 35.0),
        ],
        Rgba8::WHITE,
    );
    p.circle(Vec2::new(-22.0, feet - 53.0), 8.0, skin);
    p.circle(Vec2::new(-22.0, feet - 58.0), 6.0, Rgba8::hex(0x3f2212));
    // Bride
    p.polygon(
        &[
            Vec2::new(22.0, feet - 45.0),
            Vec2::new(40.0, feet),
            Vec2::new(4.0, feet),
        ],
        Rgba8::hex(0xfafaf9),
    );
    p.circle(Vec2::new(22.0, feet - 53.0), 8.0, skin);
    p.polygon(
        &[
            Vec2::new(16.0, feet - 58.0),
            Vec2::new(36.0, feet - 20.0),
            Vec2::new(28.0, feet - 58.0),
        ],
        Rgba8::WHITE.with_alpha(0.6),
    );
    p.circle(Vec2::new(12.0, feet - 30.0), 4.0, Rgba8::hex(0xf472b6));
}

pub struct WeddingArch {
    rng: StdRng,
    pub confetti: ConfettiShower,
}

impl WeddingArch {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let confetti = ConfettiShower::new(&mut rng, CONFETTI_COUNT);
        Self { rng, confetti }
    }
}

impl Scene for WeddingArch {
    fn kind(&self) -> SceneKind {
        SceneKind::Wedding
    }

    fn update(&mut self) {
        self.confetti.update(&mut self.rng);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            GLOBE_RADIUS,
            Rgba8::hex(0xfdf2f8),
            Rgba8::hex(0xbae6fd),
        ));
        draw_floor(p, Rgba8::hex(0x86efac));
        draw_arch(p);
        draw_couple(p);
        self.confetti.draw(p);
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        self.confetti.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/wedding.rs"]
mod tests;
