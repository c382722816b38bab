use crate::foundation::core::{GLOBE_RADIUS, Rgba8, Vec2};
use crate::foundation::geometry::{random_pos_in_disc, spread};
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::particles::BubbleColumn;
use crate::scene::{Population, Scene, SceneInit, SceneKind, scene_rng};
use kurbo::{Affine, Ellipse, Point};
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::{FRAC_PI_2, PI};

pub const FISH_COUNT: usize = 15;
pub const BUBBLE_COUNT: usize = 50;

const SPAWN_MARGIN: f64 = 50.0;
const TAIL_STEP: f64 = 0.2;

const PALETTE: [Rgba8; 4] = [
    Rgba8::hex(0xfb923c),
    Rgba8::hex(0xfacc15),
    Rgba8::hex(0x60a5fa),
    Rgba8::hex(0xf87171),
];

/// Bounded free-swimming motion shared by fish and jellyfish.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwimRules {
    /// Beyond this distance from the center a restoring pull applies.
    pub soft_radius: f64,
    pub restoring: f64,
    pub impulse_chance: f64,
    /// Impulses are uniform in `[-impulse, impulse)` per axis.
    pub impulse: f64,
    pub max_speed: f64,
    pub min_speed: f64,
}

impl SwimRules {
    pub const FISH: Self = Self {
        soft_radius: GLOBE_RADIUS - 20.0,
        restoring: 0.001,
        impulse_chance: 0.02,
        impulse: 0.25,
        max_speed: 2.0,
        min_speed: 0.5,
    };

    /// Integrate one tick, then pull back, jitter and keep speed inside the band.
    pub fn step(&self, rng: &mut impl Rng, pos: &mut Vec2, velocity: &mut Vec2) {
        *pos += *velocity;
        if pos.hypot() > self.soft_radius {
            *velocity -= *pos * self.restoring;
        }
        if rng.gen_bool(self.impulse_chance) {
            velocity.x += spread(rng, self.impulse);
            velocity.y += spread(rng, self.impulse);
        }
        let speed = velocity.hypot();
        if speed > self.max_speed {
            *velocity *= 0.9;
        } else if speed < self.min_speed {
            *velocity *= 1.1;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FishKind {
    Fat,
    Long,
    Tiny,
}

impl FishKind {
    /// Body half-extents relative to the fish size.
    fn body(self) -> (f64, f64) {
        match self {
            Self::Fat => (1.3, 1.0),
            Self::Long => (1.9, 0.6),
            Self::Tiny => (1.5, 0.8),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fish {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub color: Rgba8,
    pub size: f64,
    pub tail_phase: f64,
    pub kind: FishKind,
}

#[derive(Clone, Debug, Default)]
pub struct School {
    pub fish: Vec<Fish>,
}

impl School {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let fish = (0..count)
            .map(|i| {
                let pos = random_pos_in_disc(rng, SPAWN_MARGIN);
                let velocity = Vec2::new(spread(rng, 1.0), spread(rng, 0.5));
                let size = rng.gen_range(5.0..15.0);
                let tail_phase = rng.gen_range(0.0..PI);
                let kind = if rng.gen_bool(0.3) {
                    FishKind::Fat
                } else if rng.gen_bool(0.6) {
                    FishKind::Long
                } else {
                    FishKind::Tiny
                };
                Fish {
                    pos,
                    velocity,
                    color: PALETTE[i % PALETTE.len()],
                    size,
                    tail_phase,
                    kind,
                }
            })
            .collect();
        Self { fish }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for f in &mut self.fish {
            SwimRules::FISH.step(rng, &mut f.pos, &mut f.velocity);
            f.tail_phase += TAIL_STEP;
        }
    }

    pub fn draw(&self, p: &mut Painter<'_>) {
        for f in &self.fish {
            let angle = f.velocity.y.atan2(f.velocity.x);
            let mut xf = Affine::translate(f.pos) * Affine::rotate(angle);
            // Keep the dorsal side up when swimming leftwards.
            if angle.abs() > FRAC_PI_2 {
                xf = xf * Affine::scale_non_uniform(1.0, -1.0);
            }
            p.with_transform(xf, |p| draw_fish(p, f));
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for fish in &self.fish {
            f(Population::Fish, fish.pos);
        }
    }
}

fn draw_fish(p: &mut Painter<'_>, f: &Fish) {
    let s = f.size;
    let (bx, by) = f.kind.body();
    p.fill(
        &Ellipse::new(Point::ZERO, Vec2::new(s * bx, s * by), 0.0),
        f.color,
    );
    let wag = f.tail_phase.sin() * 5.0;
    p.polygon(
        &[
            Vec2::new(-s, 0.0),
            Vec2::new(-s * 2.0, -s * 0.8 + wag),
            Vec2::new(-s * 2.0, s * 0.8 + wag),
        ],
        f.color,
    );
    p.circle(Vec2::new(s * 0.8, -s * 0.3), 1.5, Rgba8::BLACK);
}

pub struct Aquarium {
    rng: StdRng,
    pub school: School,
    pub bubbles: BubbleColumn,
}

impl Aquarium {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let school = School::new(&mut rng, FISH_COUNT);
        let bubbles = BubbleColumn::new(&mut rng, BUBBLE_COUNT);
        Self {
            rng,
            school,
            bubbles,
        }
    }
}

impl Scene for Aquarium {
    fn kind(&self) -> SceneKind {
        SceneKind::Aquarium
    }

    fn update(&mut self) {
        self.school.update(&mut self.rng);
        self.bubbles.update(&mut self.rng);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            GLOBE_RADIUS,
            Rgba8::hex(0x0ea5e9),
            Rgba8::hex(0x0c4a6e),
        ));
        p.ellipse(
            Vec2::new(0.0, GLOBE_RADIUS - 40.0),
            GLOBE_RADIUS - 40.0,
            40.0,
            0.0,
            Rgba8::hex(0xfde047),
        );
        self.bubbles.draw(p);
        self.school.draw(p);
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        self.school.visit(f);
        self.bubbles.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/aquarium.rs"]
mod tests;
