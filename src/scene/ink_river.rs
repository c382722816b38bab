use crate::foundation::core::{BezPath, GLOBE_RADIUS, Rgba8, Vec2};
use crate::foundation::geometry::spread;
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::particles::RipplePool;
use crate::scene::{Population, Scene, SceneInit, SceneKind, scene_rng};
use rand::Rng;
use rand::rngs::StdRng;

pub const MOUNTAIN_COUNT: usize = 5;
pub const MOTE_COUNT: usize = 60;
pub const MAX_FISHING_RIPPLES: usize = 32;
pub const RIPPLE_CHANCE: f64 = 0.03;

const BOB_STEP: f64 = 0.03;
const BOB_HEIGHT: f64 = 3.0;
const RIVER_TOP: f64 = 30.0;
const BOAT_ANCHOR: Vec2 = Vec2::new(-50.0, 70.0);
/// Where the fishing line meets the water, relative to the boat.
const LINE_TIP: Vec2 = Vec2::new(95.0, 22.0);

#[derive(Clone, Debug, PartialEq)]
pub struct Mountain {
    /// Center of the base line.
    pub pos: Vec2,
    pub half_width: f64,
    pub height: f64,
    pub ink: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InkMote {
    pub pos: Vec2,
    pub speed: f64,
    pub size: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FishingBoat {
    pub phase: f64,
}

impl FishingBoat {
    pub fn update(&mut self) {
        self.phase += BOB_STEP;
    }

    pub fn pos(&self) -> Vec2 {
        BOAT_ANCHOR + Vec2::new(0.0, self.phase.sin() * BOB_HEIGHT)
    }

    /// Fishing line tip, on the water surface below the rod.
    pub fn line_tip(&self) -> Vec2 {
        BOAT_ANCHOR + LINE_TIP
    }

    fn draw(&self, p: &mut Painter<'_>) {
        let b = self.pos();
        let ink = Rgba8::hex(0x1c1917);
        let mut hull = BezPath::new();
        hull.move_to((b.x - 45.0, b.y - 6.0));
        hull.quad_to((b.x, b.y + 14.0), (b.x + 45.0, b.y - 6.0));
        hull.close_path();
        p.fill(&hull, ink);

        // Fisherman in a straw hat.
        p.rect(b.x - 4.0, b.y - 26.0, 8.0, 18.0, Rgba8::hex(0x44403c));
        p.polygon(
            &[
                b + Vec2::new(-14.0, -26.0),
                b + Vec2::new(14.0, -26.0),
                b + Vec2::new(0.0, -36.0),
            ],
            Rgba8::hex(0x57534e),
        );
        let rod_tip = b + Vec2::new(70.0, -55.0);
        p.line(b + Vec2::new(3.0, -18.0), rod_tip, 1.5, ink);
        p.line(rod_tip, self.line_tip(), 0.6, ink.with_alpha(0.6));
    }
}

pub struct InkRiver {
    rng: StdRng,
    pub mountains: Vec<Mountain>,
    pub motes: Vec<InkMote>,
    pub boat: FishingBoat,
    pub ripples: RipplePool,
}

impl InkRiver {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let mut mountains: Vec<Mountain> = (0..MOUNTAIN_COUNT)
            .map(|_| Mountain {
                pos: Vec2::new(spread(&mut rng, GLOBE_RADIUS * 0.7), rng.gen_range(-20.0..RIVER_TOP)),
                half_width: rng.gen_range(70.0..140.0),
                height: rng.gen_range(90.0..200.0),
                ink: rng.gen_range(0.25..0.8),
            })
            .collect();
        mountains.sort_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        let motes = (0..MOTE_COUNT)
            .map(|_| InkMote {
                pos: Vec2::new(spread(&mut rng, GLOBE_RADIUS), spread(&mut rng, GLOBE_RADIUS)),
                speed: rng.gen_range(0.1..0.4),
                size: rng.gen_range(0.8..2.5),
                opacity: rng.gen_range(0.1..0.4),
            })
            .collect();
        Self {
            rng,
            mountains,
            motes,
            boat: FishingBoat::default(),
            ripples: RipplePool::new(MAX_FISHING_RIPPLES, Rgba8::hex(0x292524).with_alpha(0.6)),
        }
    }
}

impl Scene for InkRiver {
    fn kind(&self) -> SceneKind {
        SceneKind::InkRiver
    }

    fn update(&mut self) {
        self.boat.update();
        if self.rng.gen_bool(RIPPLE_CHANCE) {
            let max_radius = self.rng.gen_range(8.0..16.0);
            self.ripples.spawn(self.boat.line_tip(), max_radius);
        }
        self.ripples.update();
        for m in &mut self.motes {
            m.pos.y -= m.speed;
            m.pos.x += (m.pos.y * 0.02).sin() * 0.1;
            if m.pos.y < -GLOBE_RADIUS {
                m.pos.y = GLOBE_RADIUS;
                m.pos.x = spread(&mut self.rng, GLOBE_RADIUS);
            }
        }
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            GLOBE_RADIUS,
            Rgba8::hex(0xf5f5f4),
            Rgba8::hex(0xe7e5e4),
        ));
        let ink = Rgba8::hex(0x292524);
        for m in &self.mountains {
            let base = m.pos;
            let mut ridge = BezPath::new();
            ridge.move_to((base.x - m.half_width, base.y));
            ridge.quad_to(
                (base.x - m.half_width * 0.3, base.y - m.height * 1.2),
                (base.x, base.y - m.height),
            );
            ridge.quad_to(
                (base.x + m.half_width * 0.4, base.y - m.height * 0.7),
                (base.x + m.half_width, base.y),
            );
            ridge.close_path();
            p.fill_gradient(
                &ridge,
                &Gradient::vertical(
                    base.y - m.height,
                    base.y,
                    ink.with_alpha(m.ink),
                    ink.with_alpha(m.ink * 0.15),
                ),
            );
        }

        let r = GLOBE_RADIUS;
        p.rect(-r, RIVER_TOP, 2.0 * r, r, Rgba8::hex(0xd6d3d1).with_alpha(0.6));
        for i in 0..6 {
            let y = RIVER_TOP + 20.0 + f64::from(i) * 30.0;
            p.line(
                Vec2::new(-r * 0.8, y),
                Vec2::new(r * 0.8, y),
                1.0,
                ink.with_alpha(0.08),
            );
        }
        self.boat.draw(p);
        self.ripples.draw(p);
        for m in &self.motes {
            p.circle(m.pos, m.size, ink.with_alpha(m.opacity));
        }
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for m in &self.mountains {
            f(Population::Mountain, m.pos);
        }
        for m in &self.motes {
            f(Population::InkMote, m.pos);
        }
        self.ripples.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/ink_river.rs"]
mod tests;
