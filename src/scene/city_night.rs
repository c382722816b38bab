use crate::foundation::core::{GLOBE_RADIUS, Rgba8, Vec2};
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::skyline::WindowGrid;
use crate::scene::{Population, Scene, SceneInit, SceneKind, scene_rng};
use rand::Rng;
use rand::rngs::StdRng;

pub const SKYSCRAPER_COUNT: usize = 7;
pub const CAR_COUNT: usize = 10;
pub const CAR_WRAP: f64 = GLOBE_RADIUS + 30.0;

const WINDOW_TOGGLE_CHANCE: f64 = 0.01;
const STREET_Y: f64 = 60.0;
/// Lane center lines; lanes 0 and 1 head right, lane 2 heads left.
const LANES: [f64; 3] = [STREET_Y + 22.0, STREET_Y + 42.0, STREET_Y + 66.0];

const CAR_COLORS: [Rgba8; 5] = [
    Rgba8::hex(0xef4444),
    Rgba8::hex(0x38bdf8),
    Rgba8::hex(0xfacc15),
    Rgba8::hex(0xe5e7eb),
    Rgba8::hex(0xa855f7),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Skyscraper {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgba8,
}

impl Skyscraper {
    fn roof(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, STREET_Y - self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Car {
    pub pos: Vec2,
    pub lane: usize,
    pub speed: f64,
    pub color: Rgba8,
}

impl Car {
    pub fn heading(&self) -> f64 {
        if self.lane == 2 { -1.0 } else { 1.0 }
    }

    pub fn update(&mut self) {
        self.pos.x += self.speed * self.heading();
        if self.pos.x > CAR_WRAP {
            self.pos.x = -CAR_WRAP;
        } else if self.pos.x < -CAR_WRAP {
            self.pos.x = CAR_WRAP;
        }
    }

    fn draw(&self, p: &mut Painter<'_>) {
        let (x, y) = (self.pos.x, self.pos.y);
        let dir = self.heading();
        p.rect(x - 14.0, y - 8.0, 28.0, 8.0, self.color);
        p.rect(x - 8.0, y - 14.0, 16.0, 6.0, self.color.lerp(Rgba8::BLACK, 0.3));
        p.circle(Vec2::new(x - 8.0, y), 3.0, Rgba8::hex(0x111827));
        p.circle(Vec2::new(x + 8.0, y), 3.0, Rgba8::hex(0x111827));
        if dir > 0.0 {
            // Seen from behind: tail lights.
            p.circle(Vec2::new(x - 14.0, y - 5.0), 2.0, Rgba8::hex(0xdc2626));
        } else {
            let lamp = Vec2::new(x - 14.0, y - 5.0);
            p.polygon(
                &[
                    lamp,
                    lamp + Vec2::new(-40.0, -8.0),
                    lamp + Vec2::new(-40.0, 8.0),
                ],
                Rgba8::rgba(254, 240, 138, 0.25),
            );
            p.circle(lamp, 2.0, Rgba8::hex(0xfef08a));
        }
    }
}

pub struct CityNight {
    rng: StdRng,
    pub skyscrapers: Vec<Skyscraper>,
    pub windows: WindowGrid,
    pub cars: Vec<Car>,
}

impl CityNight {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let span = 2.0 * (GLOBE_RADIUS - 40.0);
        let slot = span / SKYSCRAPER_COUNT as f64;
        let mut windows = WindowGrid::default();
        let skyscrapers = (0..SKYSCRAPER_COUNT)
            .map(|i| {
                let width = rng.gen_range(slot * 0.6..slot * 0.95);
                let height: f64 = rng.gen_range(90.0..230.0);
                let x = -span / 2.0 + i as f64 * slot + (slot - width) / 2.0;
                let cols = ((width - 8.0) / 10.0).floor().max(1.0) as usize;
                let rows = ((height - 12.0) / 14.0).floor().max(1.0) as usize;
                windows.add_block(
                    &mut rng,
                    Vec2::new(x + 6.0, STREET_Y - height + 8.0),
                    cols,
                    rows,
                    Vec2::new(10.0, 14.0),
                );
                Skyscraper {
                    x,
                    width,
                    height,
                    color: Rgba8::hex(0x1e293b).lerp(Rgba8::hex(0x334155), rng.gen_range(0.0..1.0)),
                }
            })
            .collect();
        let cars = (0..CAR_COUNT)
            .map(|i| {
                let lane = i % LANES.len();
                Car {
                    pos: Vec2::new(
                        rng.gen_range(-CAR_WRAP..CAR_WRAP),
                        LANES[lane],
                    ),
                    lane,
                    speed: rng.gen_range(1.0..2.5),
                    color: CAR_COLORS[i % CAR_COLORS.len()],
                }
            })
            .collect();
        Self {
            rng,
            skyscrapers,
            windows,
            cars,
        }
    }
}

impl Scene for CityNight {
    fn kind(&self) -> SceneKind {
        SceneKind::CityNight
    }

    fn update(&mut self) {
        self.windows.update(&mut self.rng, WINDOW_TOGGLE_CHANCE);
        for car in &mut self.cars {
            car.update();
        }
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            STREET_Y,
            Rgba8::hex(0x020617),
            Rgba8::hex(0x1e1b4b),
        ));
        p.circle(Vec2::new(120.0, -170.0), 28.0, Rgba8::hex(0xfefce8));
        p.circle(Vec2::new(132.0, -178.0), 24.0, Rgba8::hex(0x020617).with_alpha(0.85));

        for s in &self.skyscrapers {
            p.rect(s.x, STREET_Y - s.height, s.width, s.height, s.color);
        }
        self.windows.draw(p, 4.0, Rgba8::hex(0xfde68a));

        let r = GLOBE_RADIUS;
        p.rect(-r, STREET_Y, 2.0 * r, r, Rgba8::hex(0x18181b));
        for x in (-14..14).map(|i| f64::from(i) * 24.0) {
            p.rect(x, LANES[1] + 11.0, 12.0, 2.0, Rgba8::hex(0xfacc15).with_alpha(0.7));
        }
        for car in &self.cars {
            car.draw(p);
        }
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for s in &self.skyscrapers {
            f(Population::Skyscraper, s.roof());
        }
        self.windows.visit(f);
        for car in &self.cars {
            f(Population::Car, car.pos);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/city_night.rs"]
mod tests;
