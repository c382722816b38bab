use crate::foundation::core::{GLOBE_RADIUS, Rgba8, Vec2};
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::{Population, Scene, SceneInit, SceneKind, depth_sorted, scene_rng};
use kurbo::Affine;
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::TAU;

pub const HORSE_COUNT: usize = 8;
pub const LIGHT_COUNT: usize = 16;

const ROTATION_STEP: f64 = 0.01;
const BOB_STEP: f64 = 1.0 / 18.0;
const BOB_HEIGHT: f64 = 10.0;
const TOGGLE_CHANCE: f64 = 0.1;

const BASE_Y: f64 = 100.0;
const PLATFORM_WIDTH: f64 = 180.0;
const PLATFORM_HEIGHT: f64 = 40.0;

const PALETTE: [Rgba8; 4] = [
    Rgba8::hex(0xfca5a5),
    Rgba8::hex(0x93c5fd),
    Rgba8::hex(0x86efac),
    Rgba8::hex(0xfde047),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Horse {
    /// Resting angle on the platform.
    pub angle: f64,
    pub bob: f64,
    pub color: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoofLight {
    pub angle: f64,
    pub on: bool,
}

#[derive(Clone, Debug)]
pub struct Carousel {
    rng: StdRng,
    pub horses: Vec<Horse>,
    pub lights: Vec<RoofLight>,
    pub rotation: f64,
    pub bob_phase: f64,
}

impl Carousel {
    pub fn new(init: &SceneInit) -> Self {
        let horses = (0..HORSE_COUNT)
            .map(|i| Horse {
                angle: i as f64 / HORSE_COUNT as f64 * TAU,
                bob: 0.0,
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();
        let lights = (0..LIGHT_COUNT)
            .map(|i| RoofLight {
                angle: i as f64 / LIGHT_COUNT as f64 * TAU,
                on: i % 2 == 0,
            })
            .collect();
        Self {
            rng: scene_rng(init.seed),
            horses,
            lights,
            rotation: 0.0,
            bob_phase: 0.0,
        }
    }

    fn display_angle(&self, h: &Horse) -> f64 {
        (h.angle + self.rotation).rem_euclid(TAU)
    }

    /// Platform position of a horse, including its bob.
    pub fn horse_pos(&self, h: &Horse) -> Vec2 {
        let a = self.display_angle(h);
        let orbit = PLATFORM_WIDTH - 20.0;
        Vec2::new(
            a.cos() * orbit,
            BASE_Y + a.sin() * (PLATFORM_HEIGHT - 10.0) - 20.0 + h.bob,
        )
    }

    fn light_pos(light: &RoofLight) -> Vec2 {
        Vec2::new(
            light.angle.cos() * (PLATFORM_WIDTH + 5.0),
            BASE_Y - 160.0 + light.angle.sin() * 10.0,
        )
    }

    fn draw_horse(&self, p: &mut Painter<'_>, h: &Horse) {
        let a = self.display_angle(h);
        let scale = 0.8 + (a.sin() + 1.0) * 0.2;
        let xf = Affine::translate(self.horse_pos(h)) * Affine::scale(scale);
        p.with_transform(xf, |p| {
            p.rect(-2.0, -60.0, 4.0, 100.0, Rgba8::hex(0xd4d4d4));
            p.ellipse(Vec2::ZERO, 20.0, 10.0, 0.0, h.color);
            p.ellipse(Vec2::new(15.0, -10.0), 8.0, 5.0, -0.5, h.color);
            p.line(Vec2::new(-10.0, 5.0), Vec2::new(-15.0, 15.0), 2.0, h.color);
            p.line(Vec2::new(10.0, 5.0), Vec2::new(15.0, 15.0), 2.0, h.color);
        });
    }
}

impl Scene for Carousel {
    fn kind(&self) -> SceneKind {
        SceneKind::Carousel
    }

    fn update(&mut self) {
        self.rotation += ROTATION_STEP;
        self.bob_phase += BOB_STEP;
        for (i, h) in self.horses.iter_mut().enumerate() {
            h.bob = (self.bob_phase + i as f64).sin() * BOB_HEIGHT;
        }
        if self.rng.gen_bool(TOGGLE_CHANCE) {
            for light in &mut self.lights {
                light.on = !light.on;
            }
        }
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::radial(
            Vec2::ZERO,
            50.0,
            GLOBE_RADIUS,
            &[(0.0, Rgba8::hex(0x4c1d95)), (1.0, Rgba8::hex(0x2e1065))],
        ));
        p.ellipse(
            Vec2::new(0.0, BASE_Y),
            PLATFORM_WIDTH,
            PLATFORM_HEIGHT,
            0.0,
            Rgba8::hex(0x7c2d12),
        );
        p.rect(-10.0, BASE_Y - 180.0, 20.0, 180.0, Rgba8::hex(0xfbbf24));

        // Farther horses (smaller sin) first.
        let sorted = depth_sorted(
            self.horses
                .iter()
                .map(|h| (self.display_angle(h).sin(), h))
                .collect(),
        );
        for h in sorted {
            self.draw_horse(p, h);
        }

        p.polygon(
            &[
                Vec2::new(-PLATFORM_WIDTH - 10.0, BASE_Y - 160.0),
                Vec2::new(PLATFORM_WIDTH + 10.0, BASE_Y - 160.0),
                Vec2::new(0.0, BASE_Y - 280.0),
            ],
            Rgba8::hex(0xbe185d),
        );
        for light in &self.lights {
            let pos = Self::light_pos(light);
            if light.on {
                p.circle(pos, 9.0, Rgba8::WHITE.with_alpha(0.25));
                p.circle(pos, 4.0, Rgba8::hex(0xfef08a));
            } else {
                p.circle(pos, 4.0, Rgba8::hex(0x713f12));
            }
        }
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for h in &self.horses {
            f(Population::Horse, self.horse_pos(h));
        }
        for light in &self.lights {
            f(Population::RoofLight, Self::light_pos(light));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/carousel.rs"]
mod tests;
