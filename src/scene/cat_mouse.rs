//! A cat chasing mice across a wooden floor.
//!
//! The cat re-targets the nearest mouse every tick, so a mouse that vanished since the previous
//! tick is simply never found again. Mice flee once the cat is within [`HuntTuning::flee_radius`].

use crate::foundation::core::{BezPath, GLOBE_RADIUS, GROUND_Y_OFFSET, Rgba8, Vec2};
use crate::foundation::geometry::{bearing, distance, random_floor_pos, unit_from_angle};
use crate::render::painter::Painter;
use crate::scene::{
    EntityId, IdCounter, Population, Scene, SceneInit, SceneKind, Sprite, draw_depth_sorted,
    scene_rng,
};
use kurbo::Affine;
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::{FRAC_PI_2, TAU};

pub const MAX_MICE: usize = 5;
pub const INITIAL_MICE: usize = 3;

/// Entities beyond this distance from the center are pushed back in.
const ROAM_LIMIT: f64 = GLOBE_RADIUS - 30.0;
const PUSH_BACK: f64 = 0.95;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HuntTuning {
    pub cat_speed: f64,
    pub flee_speed: f64,
    pub wander_speed: f64,
    pub capture_radius: f64,
    pub flee_radius: f64,
    pub eat_ticks: u32,
    pub spawn_chance: f64,
    pub wander_chance: f64,
}

impl Default for HuntTuning {
    fn default() -> Self {
        Self {
            cat_speed: 1.5,
            flee_speed: 1.2,
            wander_speed: 0.5,
            capture_radius: 10.0,
            flee_radius: 80.0,
            eat_ticks: 100,
            spawn_chance: 0.01,
            wander_chance: 0.05,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatState {
    Idle,
    Hunting,
    Eating,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cat {
    pub pos: Vec2,
    pub state: CatState,
    pub timer: u32,
    pub target: Option<EntityId>,
    /// Heading of the last step; decides which way the cat faces.
    pub angle: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mouse {
    pub id: EntityId,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub color: Rgba8,
    pub panic: bool,
}

#[derive(Clone, Debug)]
pub struct Hunt {
    pub cat: Cat,
    pub mice: Vec<Mouse>,
    pub tuning: HuntTuning,
    ids: IdCounter,
}

impl Hunt {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_tuning(rng, HuntTuning::default(), INITIAL_MICE)
    }

    pub fn with_tuning(rng: &mut impl Rng, tuning: HuntTuning, initial_mice: usize) -> Self {
        let mut hunt = Self {
            cat: Cat {
                pos: Vec2::new(0.0, GROUND_Y_OFFSET - 20.0),
                state: CatState::Idle,
                timer: 0,
                target: None,
                angle: 0.0,
            },
            mice: Vec::new(),
            tuning,
            ids: IdCounter::default(),
        };
        for _ in 0..initial_mice {
            let pos = random_floor_pos(rng);
            hunt.spawn_mouse(pos);
        }
        hunt
    }

    /// Add a mouse at `pos`. Refused at the population cap.
    pub fn spawn_mouse(&mut self, pos: Vec2) -> Option<EntityId> {
        if self.mice.len() >= MAX_MICE {
            return None;
        }
        let id = self.ids.next_id();
        self.mice.push(Mouse {
            id,
            pos,
            velocity: Vec2::ZERO,
            color: Rgba8::hex(0xd4d4d8),
            panic: false,
        });
        Some(id)
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        if self.mice.len() < MAX_MICE && rng.gen_bool(self.tuning.spawn_chance) {
            let pos = random_floor_pos(rng);
            self.spawn_mouse(pos);
        }
        self.step_cat();
        self.step_mice(rng);
    }

    fn nearest_mouse(&self) -> Option<(EntityId, Vec2, f64)> {
        self.mice
            .iter()
            .map(|m| (m.id, m.pos, distance(self.cat.pos, m.pos)))
            .min_by(|a, b| a.2.total_cmp(&b.2))
    }

    fn step_cat(&mut self) {
        let t = self.tuning;
        if self.cat.state == CatState::Eating {
            self.cat.timer = self.cat.timer.saturating_sub(1);
            if self.cat.timer == 0 {
                self.cat.state = CatState::Idle;
            }
            return;
        }

        let Some((id, pos, dist)) = self.nearest_mouse() else {
            self.cat.state = CatState::Idle;
            self.cat.target = None;
            return;
        };

        if dist < t.capture_radius {
            self.mice.retain(|m| m.id != id);
            self.cat.state = CatState::Eating;
            self.cat.timer = t.eat_ticks;
            self.cat.target = None;
            tracing::trace!(mouse = id.0, "mouse caught");
            return;
        }

        self.cat.state = CatState::Hunting;
        self.cat.target = Some(id);
        self.cat.angle = bearing(self.cat.pos, pos);
        self.cat.pos += unit_from_angle(self.cat.angle) * t.cat_speed;
        if self.cat.pos.hypot() > ROAM_LIMIT {
            self.cat.pos *= PUSH_BACK;
        }
    }

    fn step_mice(&mut self, rng: &mut impl Rng) {
        let t = self.tuning;
        let cat = self.cat.pos;
        for m in &mut self.mice {
            if distance(m.pos, cat) < t.flee_radius {
                m.panic = true;
                m.velocity = unit_from_angle(bearing(cat, m.pos)) * t.flee_speed;
            } else {
                m.panic = false;
                if rng.gen_bool(t.wander_chance) {
                    m.velocity = unit_from_angle(rng.gen_range(0.0..TAU)) * t.wander_speed;
                }
            }
            m.pos += m.velocity;
            if m.pos.hypot() > ROAM_LIMIT {
                m.pos *= PUSH_BACK;
                m.velocity = -m.velocity;
            }
        }
    }

    pub(crate) fn sprites<'a>(&'a self, out: &mut Vec<(f64, Sprite<'a>)>) {
        out.push((self.cat.pos.y, Sprite::Cat(&self.cat)));
        out.extend(self.mice.iter().map(|m| (m.pos.y, Sprite::Mouse(m))));
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        f(Population::Cat, self.cat.pos);
        for m in &self.mice {
            f(Population::Mouse, m.pos);
        }
    }
}

pub(crate) fn draw_cat(p: &mut Painter<'_>, cat: &Cat) {
    let mut xf = Affine::translate(cat.pos);
    if cat.angle.abs() > FRAC_PI_2 {
        xf = xf * Affine::scale_non_uniform(-1.0, 1.0);
    }
    let fur = Rgba8::hex(0x1f2937);
    p.with_transform(xf, |p| {
        p.ellipse(Vec2::new(0.0, -10.0), 20.0, 15.0, 0.0, fur);
        p.circle(Vec2::new(15.0, -20.0), 12.0, fur);
        p.polygon(
            &[Vec2::new(8.0, -28.0), Vec2::new(12.0, -38.0), Vec2::new(18.0, -30.0)],
            fur,
        );
        p.polygon(
            &[Vec2::new(18.0, -30.0), Vec2::new(24.0, -38.0), Vec2::new(26.0, -26.0)],
            fur,
        );
        let mut tail = BezPath::new();
        tail.move_to((-18.0, -10.0));
        tail.quad_to((-30.0, -30.0), (-20.0, -40.0));
        p.stroke(&tail, 4.0, fur);
        p.circle(Vec2::new(18.0, -22.0), 2.0, Rgba8::hex(0xbef264));
    });
}

pub(crate) fn draw_mouse(p: &mut Painter<'_>, m: &Mouse) {
    let (x, y) = (m.pos.x, m.pos.y);
    p.ellipse(m.pos, 8.0, 5.0, 0.0, m.color);
    p.circle(Vec2::new(x - 3.0, y - 4.0), 3.0, m.color);
    p.circle(Vec2::new(x + 3.0, y - 4.0), 3.0, m.color);
    let mut tail = BezPath::new();
    tail.move_to((x - 8.0, y));
    tail.quad_to((x - 15.0, y - 5.0), (x - 18.0, y));
    p.stroke(&tail, 1.0, Rgba8::hex(0xffc0cb));
}

pub struct CatAndMouse {
    rng: StdRng,
    pub hunt: Hunt,
}

impl CatAndMouse {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let hunt = Hunt::new(&mut rng);
        Self { rng, hunt }
    }
}

impl Scene for CatAndMouse {
    fn kind(&self) -> SceneKind {
        SceneKind::CatMouse
    }

    fn update(&mut self) {
        self.hunt.update(&mut self.rng);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        let r = GLOBE_RADIUS;
        p.backdrop_flat(Rgba8::hex(0x92400e));
        p.rect(-r, -r, r * 2.0, r + 50.0, Rgba8::hex(0xfef3c7));
        p.ellipse(Vec2::new(0.0, 50.0), r - 20.0, r * 0.4, 0.0, Rgba8::hex(0xd97706));
        let mut sprites = Vec::new();
        self.hunt.sprites(&mut sprites);
        draw_depth_sorted(p, sprites);
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        self.hunt.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/cat_mouse.rs"]
mod tests;
