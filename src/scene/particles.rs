//! Ambient particle systems shared by several scenes.
//!
//! Every system respawns at the opposite edge instead of clamping, so motion never stalls.

use crate::foundation::core::{GLOBE_RADIUS, GROUND_Y_OFFSET, Rgba8, Vec2};
use crate::foundation::geometry::spread;
use crate::render::painter::Painter;
use crate::scene::Population;
use kurbo::{Affine, Ellipse, Point};
use rand::Rng;

const R: f64 = GLOBE_RADIUS;

#[derive(Clone, Debug, PartialEq)]
pub struct Snowflake {
    pub pos: Vec2,
    pub radius: f64,
    pub speed: f64,
    pub wind: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, Default)]
pub struct SnowField {
    pub flakes: Vec<Snowflake>,
}

impl SnowField {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let flakes = (0..count)
            .map(|_| Snowflake {
                pos: Vec2::new(spread(rng, R * 1.1), spread(rng, R * 1.1)),
                radius: rng.gen_range(1.0..3.0),
                speed: rng.gen_range(0.5..1.5),
                wind: rng.gen_range(-0.25..0.25),
                opacity: rng.gen_range(0.3..0.8),
            })
            .collect();
        Self { flakes }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for flake in &mut self.flakes {
            flake.pos.y += flake.speed;
            flake.pos.x += flake.wind;
            if flake.pos.y > R || flake.pos.x.abs() > R {
                flake.pos.y = -R;
                flake.pos.x = spread(rng, R);
            }
        }
    }

    pub fn draw(&self, p: &mut Painter<'_>) {
        for flake in &self.flakes {
            p.circle(
                flake.pos,
                flake.radius,
                Rgba8::WHITE.with_alpha(0.9 * flake.opacity),
            );
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for flake in &self.flakes {
            f(Population::Snowflake, flake.pos);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
    pub pos: Vec2,
    pub radius: f64,
    pub max_radius: f64,
    pub opacity: f64,
}

/// Capped pool of expanding, fading ripples.
#[derive(Clone, Debug)]
pub struct RipplePool {
    pub ripples: Vec<Ripple>,
    cap: usize,
    color: Rgba8,
}

impl RipplePool {
    pub fn new(cap: usize, color: Rgba8) -> Self {
        Self {
            ripples: Vec::new(),
            cap,
            color,
        }
    }

    /// Start a ripple at `pos`. Ignored once the pool is full.
    pub fn spawn(&mut self, pos: Vec2, max_radius: f64) -> bool {
        if self.ripples.len() >= self.cap {
            return false;
        }
        self.ripples.push(Ripple {
            pos,
            radius: 1.0,
            max_radius,
            opacity: 1.0,
        });
        true
    }

    /// Grow and fade every ripple; fully faded ones are dropped in the same call.
    pub fn update(&mut self) {
        for r in &mut self.ripples {
            r.radius = (r.radius + 0.5).min(r.max_radius.max(1.0));
            r.opacity -= 0.05;
        }
        self.ripples.retain(|r| r.opacity > 0.0);
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn draw(&self, p: &mut Painter<'_>) {
        for r in &self.ripples {
            p.stroke(
                &Ellipse::new(r.pos.to_point(), Vec2::new(r.radius, r.radius * 0.5), 0.0),
                1.0,
                self.color.fade(r.opacity),
            );
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for r in &self.ripples {
            f(Population::Ripple, r.pos);
        }
    }
}

/// Horizontal band of a plant that intercepts rain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canopy {
    pub x: f64,
    pub top: f64,
    pub half_width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RainDrop {
    pub pos: Vec2,
    pub speed: f64,
    pub length: f64,
}

#[derive(Clone, Debug, Default)]
pub struct RainField {
    pub drops: Vec<RainDrop>,
}

impl RainField {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let drops = (0..count)
            .map(|_| RainDrop {
                pos: Vec2::new(spread(rng, R), rng.gen_range(-R..GROUND_Y_OFFSET)),
                speed: rng.gen_range(10.0..20.0),
                length: rng.gen_range(5.0..15.0),
            })
            .collect();
        Self { drops }
    }

    /// Advance drops; a drop that lands on a canopy or the ground leaves a ripple and restarts
    /// above the sphere. Ground ripples sit on the ground line, however far the drop fell past it.
    pub fn update(&mut self, rng: &mut impl Rng, canopies: &[Canopy], ripples: &mut RipplePool) {
        for drop in &mut self.drops {
            drop.pos.y += drop.speed;
            let canopy_hit = canopies.iter().find_map(|c| {
                let over = (drop.pos.x - c.x).abs() < c.half_width;
                let inside = drop.pos.y >= c.top && drop.pos.y <= c.top + 10.0;
                (over && inside).then_some(c.top)
            });
            let hit_y = match canopy_hit {
                Some(top) => Some(top),
                None => {
                    let ground = GROUND_Y_OFFSET + rng.gen_range(0.0..20.0);
                    (drop.pos.y > ground).then_some(ground)
                }
            };
            if let Some(y) = hit_y {
                ripples.spawn(Vec2::new(drop.pos.x, y), rng.gen_range(5.0..10.0));
                drop.pos.y = -R - rng.gen_range(0.0..50.0);
                drop.pos.x = spread(rng, R * 0.9);
            }
        }
    }

    pub fn draw(&self, p: &mut Painter<'_>) {
        let color = Rgba8::rgba(200, 230, 255, 0.4);
        for drop in &self.drops {
            p.line(drop.pos, drop.pos + Vec2::new(0.0, drop.length), 1.0, color);
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for drop in &self.drops {
            f(Population::RainDrop, drop.pos);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Petal {
    pub pos: Vec2,
    pub size: f64,
    pub velocity: Vec2,
    pub angle: f64,
    pub spin: f64,
}

/// Drifting petals with a shared lateral gust.
#[derive(Clone, Debug, Default)]
pub struct PetalField {
    pub petals: Vec<Petal>,
    /// Gust oscillator, advanced once per update.
    pub gust_phase: f64,
}

const GUST_STEP: f64 = 1.0 / 30.0;

impl PetalField {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let petals = (0..count)
            .map(|_| Petal {
                pos: Vec2::new(spread(rng, R), spread(rng, R)),
                size: rng.gen_range(2.0..5.0),
                velocity: Vec2::new(rng.gen_range(-0.5..0.5), rng.gen_range(0.5..1.5)),
                angle: rng.gen_range(0.0..std::f64::consts::PI),
                spin: rng.gen_range(-0.05..0.05),
            })
            .collect();
        Self {
            petals,
            gust_phase: 0.0,
        }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        self.gust_phase += GUST_STEP;
        let gust = self.gust_phase.sin() * 0.5;
        for petal in &mut self.petals {
            petal.pos.x += petal.velocity.x + gust;
            petal.pos.y += petal.velocity.y;
            petal.angle += petal.spin;
            if petal.pos.y > R {
                petal.pos.y = -R;
                petal.pos.x = spread(rng, R);
            }
            if petal.pos.x.abs() > R {
                petal.pos.x = -R * petal.pos.x.signum();
            }
        }
    }

    pub fn draw(&self, p: &mut Painter<'_>, color: Rgba8) {
        for petal in &self.petals {
            p.with_transform(
                Affine::translate(petal.pos) * Affine::rotate(petal.angle),
                |p| {
                    p.fill(
                        &Ellipse::new(Point::ZERO, Vec2::new(petal.size, petal.size * 0.6), 0.0),
                        color,
                    );
                },
            );
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for petal in &self.petals {
            f(Population::Petal, petal.pos);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub pos: Vec2,
    pub size: f64,
    pub speed: f64,
}

#[derive(Clone, Debug, Default)]
pub struct BubbleColumn {
    pub bubbles: Vec<Bubble>,
}

impl BubbleColumn {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let bubbles = (0..count)
            .map(|_| Bubble {
                pos: Vec2::new(spread(rng, R * 0.9), R + rng.gen_range(0.0..50.0)),
                size: rng.gen_range(1.0..4.0),
                speed: rng.gen_range(0.5..1.5),
            })
            .collect();
        Self { bubbles }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for b in &mut self.bubbles {
            b.pos.y -= b.speed;
            b.pos.x += (b.pos.y * 0.05).sin() * 0.5;
            if b.pos.y < -R {
                b.pos.y = R + 10.0;
                b.pos.x = spread(rng, R * 0.5);
            }
        }
    }

    pub fn draw(&self, p: &mut Painter<'_>) {
        let color = Rgba8::WHITE.with_alpha(0.4);
        for b in &self.bubbles {
            p.stroke(&kurbo::Circle::new(b.pos.to_point(), b.size), 1.0, color);
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for b in &self.bubbles {
            f(Population::Bubble, b.pos);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/particles.rs"]
mod tests;
