use crate::foundation::core::{GLOBE_RADIUS, GROUND_Y_OFFSET, Rgba8, Vec2};
use crate::foundation::geometry::spread;
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::{Population, Scene, SceneInit, SceneKind, scene_rng};
use rand::Rng;
use rand::rngs::StdRng;

pub const STAR_COUNT: usize = 50;
pub const BOAT_WRAP: f64 = GLOBE_RADIUS + 50.0;

const STAR_TWINKLE_CHANCE: f64 = 0.05;
const WINDOW_TOGGLE_CHANCE: f64 = 0.02;
/// Waterline; buildings stand on it and the river fills below.
const SHORE_Y: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoatKind {
    Cruise,
    Cargo,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boat {
    pub pos: Vec2,
    pub speed: f64,
    /// `1.0` sails right, `-1.0` sails left.
    pub direction: f64,
    pub kind: BoatKind,
}

impl Boat {
    /// Sail one tick, re-entering from the far edge once past the wrap line.
    pub fn update(&mut self) {
        self.pos.x += self.speed * self.direction;
        if self.direction > 0.0 && self.pos.x > BOAT_WRAP {
            self.pos.x = -BOAT_WRAP;
        } else if self.direction < 0.0 && self.pos.x < -BOAT_WRAP {
            self.pos.x = BOAT_WRAP;
        }
    }

    fn draw(&self, p: &mut Painter<'_>) {
        let (x, y) = (self.pos.x, self.pos.y);
        let cruise = self.kind == BoatKind::Cruise;
        p.rect(x - 20.0, y + 5.0, 40.0, 10.0, Rgba8::WHITE.with_alpha(0.1));
        p.polygon(
            &[
                Vec2::new(x - 20.0, y),
                Vec2::new(x + 20.0, y),
                Vec2::new(x + 15.0, y + 10.0),
                Vec2::new(x - 15.0, y + 10.0),
            ],
            if cruise {
                Rgba8::hex(0xe2e8f0)
            } else {
                Rgba8::hex(0x78350f)
            },
        );
        p.rect(
            x - 10.0,
            y - 8.0,
            20.0,
            8.0,
            if cruise {
                Rgba8::hex(0x3b82f6)
            } else {
                Rgba8::hex(0xa16207)
            },
        );
        if cruise {
            p.circle(Vec2::new(x - 5.0, y - 4.0), 1.0, Rgba8::hex(0xfacc15));
            p.circle(Vec2::new(x + 5.0, y - 4.0), 1.0, Rgba8::hex(0xfacc15));
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub pos: Vec2,
    pub lit: bool,
}

/// Rows of small windows that switch on and off at random.
#[derive(Clone, Debug, Default)]
pub struct WindowGrid {
    pub windows: Vec<Window>,
}

impl WindowGrid {
    /// Lay out `cols x rows` windows starting at `origin` with the given pitch.
    pub fn add_block(
        &mut self,
        rng: &mut impl Rng,
        origin: Vec2,
        cols: usize,
        rows: usize,
        pitch: Vec2,
    ) {
        for row in 0..rows {
            for col in 0..cols {
                self.windows.push(Window {
                    pos: origin + Vec2::new(col as f64 * pitch.x, row as f64 * pitch.y),
                    lit: rng.gen_bool(0.5),
                });
            }
        }
    }

    pub fn update(&mut self, rng: &mut impl Rng, toggle_chance: f64) {
        for w in &mut self.windows {
            if rng.gen_bool(toggle_chance) {
                w.lit = !w.lit;
            }
        }
    }

    pub fn draw(&self, p: &mut Painter<'_>, size: f64, color: Rgba8) {
        for w in self.windows.iter().filter(|w| w.lit) {
            p.rect(w.pos.x, w.pos.y, size, size, color);
        }
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for w in &self.windows {
            f(Population::Window, w.pos);
        }
    }
}

pub struct Skyline {
    rng: StdRng,
    pub boats: Vec<Boat>,
    pub stars: Vec<Star>,
    pub windows: WindowGrid,
}

impl Skyline {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let boats = vec![
            Boat {
                pos: Vec2::new(-100.0, GROUND_Y_OFFSET + 20.0),
                speed: 0.5,
                direction: 1.0,
                kind: BoatKind::Cruise,
            },
            Boat {
                pos: Vec2::new(100.0, GROUND_Y_OFFSET + 40.0),
                speed: 0.3,
                direction: -1.0,
                kind: BoatKind::Cargo,
            },
        ];
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    spread(&mut rng, GLOBE_RADIUS * 0.9),
                    spread(&mut rng, GLOBE_RADIUS * 0.9) - 50.0,
                ),
                opacity: rng.gen_range(0.0..1.0),
            })
            .collect();
        let mut windows = WindowGrid::default();
        windows.add_block(&mut rng, Vec2::new(-95.0, SHORE_Y - 92.0), 3, 10, Vec2::new(10.0, 8.0));
        windows.add_block(&mut rng, Vec2::new(-35.0, SHORE_Y - 132.0), 3, 12, Vec2::new(10.0, 10.0));
        windows.add_block(&mut rng, Vec2::new(-135.0, SHORE_Y - 52.0), 2, 5, Vec2::new(10.0, 9.0));
        Self {
            rng,
            boats,
            stars,
            windows,
        }
    }
}

fn draw_skyline(p: &mut Painter<'_>) {
    let tower_x = 40.0;
    p.rect(tower_x - 5.0, SHORE_Y - 180.0, 10.0, 180.0, Rgba8::hex(0x020617));
    p.circle(Vec2::new(tower_x, SHORE_Y - 140.0), 15.0, Rgba8::hex(0xbe123c));
    p.circle(Vec2::new(tower_x, SHORE_Y - 60.0), 10.0, Rgba8::hex(0xbe123c));
    p.rect(tower_x - 1.0, SHORE_Y - 220.0, 2.0, 40.0, Rgba8::hex(0xe11d48));

    let building = Rgba8::hex(0x1e1b4b);
    p.rect(-100.0, SHORE_Y - 100.0, 40.0, 100.0, building);
    p.rect(-140.0, SHORE_Y - 60.0, 30.0, 60.0, building);
    p.rect(-40.0, SHORE_Y - 140.0, 35.0, 140.0, building);
}

impl Scene for Skyline {
    fn kind(&self) -> SceneKind {
        SceneKind::Skyline
    }

    fn update(&mut self) {
        for boat in &mut self.boats {
            boat.update();
        }
        for star in &mut self.stars {
            if self.rng.gen_bool(STAR_TWINKLE_CHANCE) {
                star.opacity = self.rng.gen_range(0.0..1.0);
            }
        }
        self.windows.update(&mut self.rng, WINDOW_TOGGLE_CHANCE);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            SHORE_Y,
            Rgba8::hex(0x0f172a),
            Rgba8::hex(0x312e81),
        ));
        for star in &self.stars {
            p.circle(star.pos, 1.0, Rgba8::WHITE.with_alpha(star.opacity));
        }
        draw_skyline(p);
        self.windows.draw(p, 2.0, Rgba8::hex(0xfef3c7));

        let river = Gradient::vertical(
            SHORE_Y,
            GLOBE_RADIUS,
            Rgba8::BLACK,
            Rgba8::hex(0x1e3a8a),
        );
        p.fill_gradient(
            &kurbo::Rect::new(-GLOBE_RADIUS, SHORE_Y, GLOBE_RADIUS, SHORE_Y + GLOBE_RADIUS),
            &river,
        );
        for boat in &self.boats {
            boat.draw(p);
        }
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for boat in &self.boats {
            f(Population::Boat, boat.pos);
        }
        for star in &self.stars {
            f(Population::Star, star.pos);
        }
        self.windows.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/skyline.rs"]
mod tests;
