use crate::foundation::core::{BezPath, GLOBE_RADIUS, Rgba8, Vec2};
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::particles::PetalField;
use crate::scene::{Population, Scene, SceneInit, SceneKind, scene_rng};
use rand::rngs::StdRng;

pub const PETAL_COUNT: usize = 150;

const SWING_STEP: f64 = 1.0 / 60.0;
const SWING_AMPLITUDE: f64 = 0.4;
const ROPE_LENGTH: f64 = 100.0;
const TREE_BASE: Vec2 = Vec2::new(0.0, 120.0);

/// Pendulum swing hanging from the blossom tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Swing {
    pub phase: f64,
}

impl Swing {
    pub fn update(&mut self) {
        self.phase += SWING_STEP;
    }

    pub fn angle(&self) -> f64 {
        self.phase.sin() * SWING_AMPLITUDE
    }

    pub fn pivot(&self) -> Vec2 {
        TREE_BASE + Vec2::new(40.0, -180.0)
    }

    pub fn seat(&self) -> Vec2 {
        let a = self.angle();
        self.pivot() + Vec2::new(a.sin(), a.cos()) * ROPE_LENGTH
    }

    fn draw(&self, p: &mut Painter<'_>) {
        let pivot = self.pivot();
        let seat = self.seat();
        let rope = Rgba8::hex(0x3f2212);
        let right = Vec2::new(10.0, 0.0);
        p.line(pivot, seat, 1.5, rope);
        p.line(pivot + right, seat + right, 1.5, rope);
        p.line(seat - Vec2::new(5.0, 0.0), seat + Vec2::new(15.0, 0.0), 3.0, rope);

        p.rect(seat.x, seat.y - 12.0, 4.0, 12.0, Rgba8::hex(0x1e3a8a));
        p.rect(seat.x + 6.0, seat.y - 12.0, 4.0, 12.0, Rgba8::hex(0xbe123c));
        let skin = Rgba8::hex(0xffe4c4);
        p.circle(seat + Vec2::new(2.0, -16.0), 3.0, skin);
        p.circle(seat + Vec2::new(8.0, -16.0), 3.0, skin);
    }
}

fn draw_tree(p: &mut Painter<'_>) {
    let b = TREE_BASE;
    let mut trunk = BezPath::new();
    trunk.move_to((b.x - 20.0, b.y));
    trunk.quad_to((b.x - 10.0, b.y - 100.0), (b.x - 30.0, b.y - 180.0));
    trunk.line_to((b.x + 30.0, b.y - 180.0));
    trunk.quad_to((b.x + 10.0, b.y - 100.0), (b.x + 20.0, b.y));
    trunk.close_path();
    p.fill(&trunk, Rgba8::hex(0x573318));

    let blossom = Rgba8::hex(0xfbcfe8);
    for (dx, dy, r) in [
        (0.0, -200.0, 60.0),
        (-50.0, -180.0, 50.0),
        (50.0, -180.0, 50.0),
        (-30.0, -240.0, 40.0),
        (30.0, -240.0, 40.0),
    ] {
        p.circle(b + Vec2::new(dx, dy), r, blossom);
    }
}

pub struct SakuraSwing {
    rng: StdRng,
    pub petals: PetalField,
    pub swing: Swing,
}

impl SakuraSwing {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let petals = PetalField::new(&mut rng, PETAL_COUNT);
        Self {
            rng,
            petals,
            swing: Swing::default(),
        }
    }
}

impl Scene for SakuraSwing {
    fn kind(&self) -> SceneKind {
        SceneKind::Sakura
    }

    fn update(&mut self) {
        self.swing.update();
        self.petals.update(&mut self.rng);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            GLOBE_RADIUS,
            Rgba8::hex(0xa5f3fc),
            Rgba8::hex(0x67e8f9),
        ));
        p.circle(
            Vec2::new(0.0, GLOBE_RADIUS + 200.0),
            GLOBE_RADIUS + 150.0,
            Rgba8::hex(0xbef264),
        );
        draw_tree(p);
        self.swing.draw(p);
        self.petals.draw(p, Rgba8::hex(0xfce7f3));
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        self.petals.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/sakura.rs"]
mod tests;
