use crate::foundation::core::{BezPath, GLOBE_RADIUS, Rgba8, Vec2};
use crate::foundation::geometry::{random_pos_in_disc, spread};
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::aquarium::SwimRules;
use crate::scene::particles::BubbleColumn;
use crate::scene::{Population, Scene, SceneInit, SceneKind, scene_rng};
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::{PI, TAU};

pub const JELLYFISH_COUNT: usize = 8;
pub const BUBBLE_COUNT: usize = 40;

pub const JELLY_SWIM: SwimRules = SwimRules {
    soft_radius: GLOBE_RADIUS - 40.0,
    ..SwimRules::FISH
};

const TENTACLE_STEP: f64 = 0.08;
const GLOW_CHANCE: f64 = 0.5;
const TENTACLES: usize = 5;

const PALETTE: [Rgba8; 4] = [
    Rgba8::hex(0xf0abfc),
    Rgba8::hex(0x67e8f9),
    Rgba8::hex(0xa5b4fc),
    Rgba8::hex(0xfda4af),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Jellyfish {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub size: f64,
    pub color: Rgba8,
    pub tentacle_phase: f64,
    pub glowing: bool,
    /// Ticks until the next glow decision.
    pub glow_timer: u32,
}

impl Jellyfish {
    /// Count down the glow timer; on expiry flip a coin to toggle and rearm.
    pub fn tick_glow(&mut self, rng: &mut impl Rng) {
        self.glow_timer = self.glow_timer.saturating_sub(1);
        if self.glow_timer == 0 {
            if rng.gen_bool(GLOW_CHANCE) {
                self.glowing = !self.glowing;
            }
            self.glow_timer = rng.gen_range(60..180);
        }
    }

    fn draw(&self, p: &mut Painter<'_>) {
        let (x, y) = (self.pos.x, self.pos.y);
        let s = self.size;
        if self.glowing {
            p.circle(self.pos, s * 2.2, self.color.with_alpha(0.18));
            p.circle(self.pos, s * 1.5, self.color.with_alpha(0.25));
        }
        for i in 0..TENTACLES {
            let k = i as f64 / (TENTACLES - 1) as f64;
            let root_x = x - s * 0.8 + k * s * 1.6;
            let mut t = BezPath::new();
            t.move_to((root_x, y));
            let wave = (self.tentacle_phase + i as f64).sin() * s * 0.4;
            t.quad_to((root_x + wave, y + s * 1.2), (root_x - wave * 0.5, y + s * 2.4));
            p.stroke(&t, 1.2, self.color.with_alpha(0.7));
        }
        let mut bell = BezPath::new();
        bell.move_to((x - s, y));
        bell.curve_to((x - s, y - s * 1.4), (x + s, y - s * 1.4), (x + s, y));
        let pulse = self.tentacle_phase.sin() * s * 0.1;
        bell.quad_to((x, y + s * 0.3 + pulse), (x - s, y));
        bell.close_path();
        p.fill(&bell, self.color.with_alpha(if self.glowing { 0.9 } else { 0.6 }));
    }
}

#[derive(Clone, Debug, Default)]
pub struct Bloom {
    pub jellies: Vec<Jellyfish>,
}

impl Bloom {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let jellies = (0..count)
            .map(|i| Jellyfish {
                pos: random_pos_in_disc(rng, 60.0),
                velocity: Vec2::new(spread(rng, 0.6), spread(rng, 0.6)),
                size: rng.gen_range(12.0..24.0),
                color: PALETTE[i % PALETTE.len()],
                tentacle_phase: rng.gen_range(0.0..TAU),
                glowing: rng.gen_bool(GLOW_CHANCE),
                glow_timer: rng.gen_range(60..180),
            })
            .collect();
        Self { jellies }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for j in &mut self.jellies {
            JELLY_SWIM.step(rng, &mut j.pos, &mut j.velocity);
            j.tentacle_phase = (j.tentacle_phase + TENTACLE_STEP) % (2.0 * PI);
            j.tick_glow(rng);
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for j in &self.jellies {
            f(Population::Jellyfish, j.pos);
        }
    }
}

pub struct JellyfishTank {
    rng: StdRng,
    pub bloom: Bloom,
    pub bubbles: BubbleColumn,
}

impl JellyfishTank {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let bloom = Bloom::new(&mut rng, JELLYFISH_COUNT);
        let bubbles = BubbleColumn::new(&mut rng, BUBBLE_COUNT);
        Self {
            rng,
            bloom,
            bubbles,
        }
    }
}

impl Scene for JellyfishTank {
    fn kind(&self) -> SceneKind {
        SceneKind::Jellyfish
    }

    fn update(&mut self) {
        self.bloom.update(&mut self.rng);
        self.bubbles.update(&mut self.rng);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            GLOBE_RADIUS,
            Rgba8::hex(0x0c4a6e),
            Rgba8::hex(0x020617),
        ));
        self.bubbles.draw(p);
        for j in &self.bloom.jellies {
            j.draw(p);
        }
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        self.bloom.visit(f);
        self.bubbles.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/jellyfish.rs"]
mod tests;
