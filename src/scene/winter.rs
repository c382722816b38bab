use crate::foundation::core::{GLOBE_RADIUS, GROUND_Y_OFFSET, Rgba8, Vec2};
use crate::foundation::geometry::{FLOOR_SQUASH, Step, random_floor_pos, step_toward};
use crate::render::paint::Gradient;
use crate::render::painter::Painter;
use crate::scene::particles::SnowField;
use crate::scene::{
    EntityId, IdCounter, Population, Scene, SceneInit, SceneKind, Sprite, draw_depth_sorted,
    scene_rng,
};
use kurbo::{Ellipse, Point};
use rand::Rng;
use rand::rngs::StdRng;

pub const SNOW_COUNT: usize = 300;
pub const PERSON_COUNT: usize = 12;
pub const MAX_SNOWMEN: usize = 5;

const WALK_SPEED: f64 = 0.8;
const ARRIVAL_EPSILON: f64 = 2.0;
const BUILD_RATE: f64 = 0.005;
const DECAY_COMPLETE: f64 = 0.0005;
const DECAY_ABANDONED: f64 = 0.002;
const IDLE_TICKS: u32 = 60;
const FIGHT_TICKS: u32 = 60;
const BUILD_TICKS: u32 = 300;
/// Builders stand this far to the right of the snowman they work on.
const BUILD_OFFSET: f64 = 15.0;

const PALETTE: [Rgba8; 6] = [
    Rgba8::hex(0xef4444),
    Rgba8::hex(0x3b82f6),
    Rgba8::hex(0x10b981),
    Rgba8::hex(0xf59e0b),
    Rgba8::hex(0x8b5cf6),
    Rgba8::hex(0xec4899),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersonState {
    Idle,
    Walking,
    Building,
    Fighting,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id: EntityId,
    pub pos: Vec2,
    pub state: PersonState,
    /// Countdown in ticks.
    pub timer: u32,
    pub target: Option<Vec2>,
    pub target_snowman: Option<EntityId>,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snowman {
    pub id: EntityId,
    pub pos: Vec2,
    pub progress: f64,
    pub health: f64,
    pub complete: bool,
}

/// Villagers and the snowmen they build. Also used by the custom scene's `people` toggle.
#[derive(Clone, Debug, Default)]
pub struct Village {
    pub people: Vec<Person>,
    pub snowmen: Vec<Snowman>,
    ids: IdCounter,
}

impl Village {
    pub fn new(rng: &mut impl Rng, count: usize) -> Self {
        let mut ids = IdCounter::default();
        let people = (0..count)
            .map(|i| Person {
                id: ids.next_id(),
                pos: random_floor_pos(rng),
                state: PersonState::Idle,
                timer: rng.gen_range(50..150),
                target: None,
                target_snowman: None,
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();
        Self {
            people,
            snowmen: Vec::new(),
            ids,
        }
    }

    /// Place an incomplete snowman and return its id. Refused at the population cap.
    pub fn spawn_snowman(&mut self, pos: Vec2) -> Option<EntityId> {
        if self.snowmen.len() >= MAX_SNOWMEN {
            return None;
        }
        let id = self.ids.next_id();
        self.snowmen.push(Snowman {
            id,
            pos,
            progress: 0.0,
            health: 1.0,
            complete: false,
        });
        Some(id)
    }

    pub fn snowman(&self, id: EntityId) -> Option<&Snowman> {
        self.snowmen.iter().find(|s| s.id == id)
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        self.decay_snowmen();
        for i in 0..self.people.len() {
            self.step_person(i, rng);
        }
    }

    fn decay_snowmen(&mut self) {
        let people = &self.people;
        for s in &mut self.snowmen {
            if s.complete {
                s.health -= DECAY_COMPLETE;
            } else {
                let tended = people.iter().any(|p| {
                    p.state == PersonState::Building && p.target_snowman == Some(s.id)
                });
                if !tended {
                    s.health -= DECAY_ABANDONED;
                }
            }
        }
        self.snowmen.retain(|s| s.health > 0.0);
    }

    fn step_person(&mut self, i: usize, rng: &mut impl Rng) {
        {
            let person = &mut self.people[i];
            person.timer = person.timer.saturating_sub(1);
        }

        if self.people[i].state == PersonState::Idle && self.people[i].timer == 0 {
            self.choose_activity(i, rng);
        }

        let person = &mut self.people[i];
        match person.state {
            PersonState::Walking => match person.target {
                Some(target) => match step_toward(person.pos, target, WALK_SPEED, ARRIVAL_EPSILON) {
                    Step::Moving(pos) => person.pos = pos,
                    Step::Arrived(pos) => {
                        person.pos = pos;
                        person.target = None;
                        if person.target_snowman.is_some() {
                            person.state = PersonState::Building;
                            person.timer = BUILD_TICKS;
                        } else {
                            person.state = PersonState::Idle;
                            person.timer = IDLE_TICKS;
                        }
                    }
                },
                None => rest(person),
            },
            PersonState::Building => {
                let target = person.target_snowman;
                let snowman = target.and_then(|id| self.snowmen.iter_mut().find(|s| s.id == id));
                match snowman {
                    Some(s) if !s.complete && s.health > 0.0 => {
                        s.progress += BUILD_RATE;
                        if s.progress >= 1.0 {
                            s.progress = 1.0;
                            s.complete = true;
                            rest(person);
                        }
                    }
                    // Target vanished or was finished by someone else.
                    _ => rest(person),
                }
            }
            PersonState::Fighting if person.timer == 0 => rest(person),
            _ => {}
        }
    }

    /// One uniform draw against ordered thresholds: wander, build, or fight.
    fn choose_activity(&mut self, i: usize, rng: &mut impl Rng) {
        let u: f64 = rng.gen_range(0.0..1.0);
        if u < 0.6 {
            let target = random_floor_pos(rng);
            let person = &mut self.people[i];
            person.state = PersonState::Walking;
            person.target = Some(target);
            person.timer = 0;
            return;
        }
        if u < 0.85 && self.snowmen.len() < MAX_SNOWMEN {
            let existing = self
                .snowmen
                .iter()
                .find(|s| !s.complete && s.health > 0.0)
                .map(|s| (s.id, s.pos));
            let site = match existing {
                Some(site) => Some(site),
                None => {
                    let pos = random_floor_pos(rng);
                    self.spawn_snowman(pos).map(|id| (id, pos))
                }
            };
            if let Some((id, pos)) = site {
                let person = &mut self.people[i];
                person.state = PersonState::Walking;
                person.target = Some(Vec2::new(pos.x + BUILD_OFFSET, pos.y));
                person.target_snowman = Some(id);
                return;
            }
        }
        let person = &mut self.people[i];
        person.state = PersonState::Fighting;
        person.timer = FIGHT_TICKS;
    }

    pub(crate) fn sprites<'a>(&'a self, out: &mut Vec<(f64, Sprite<'a>)>) {
        out.extend(self.people.iter().map(|p| (p.pos.y, Sprite::Person(p))));
        out.extend(self.snowmen.iter().map(|s| (s.pos.y, Sprite::Snowman(s))));
    }

    pub fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for p in &self.people {
            f(Population::Person, p.pos);
        }
        for s in &self.snowmen {
            f(Population::Snowman, s.pos);
        }
    }
}

fn rest(person: &mut Person) {
    person.state = PersonState::Idle;
    person.target = None;
    person.target_snowman = None;
    person.timer = IDLE_TICKS;
}

pub(crate) fn draw_person(p: &mut Painter<'_>, person: &Person) {
    let (x, y) = (person.pos.x, person.pos.y);
    p.ellipse(person.pos, 6.0, 2.0, 0.0, Rgba8::BLACK.with_alpha(0.2));
    p.rect(x - 4.0, y - 12.0, 8.0, 12.0, person.color);
    p.circle(Vec2::new(x, y - 14.0), 4.0, Rgba8::hex(0xffedd5));
    match person.state {
        PersonState::Building => p.line(
            Vec2::new(x, y - 10.0),
            Vec2::new(x + 6.0, y - 8.0),
            2.0,
            person.color,
        ),
        PersonState::Fighting => {
            // Snowball in flight, looping every 20 ticks.
            let t = f64::from(person.timer % 20) / 20.0;
            let arc = Vec2::new(x + 6.0 + 24.0 * (1.0 - t), y - 14.0 - 10.0 * (t * std::f64::consts::PI).sin());
            p.circle(arc, 2.0, Rgba8::WHITE);
        }
        _ => {}
    }
}

pub(crate) fn draw_snowman(p: &mut Painter<'_>, s: &Snowman) {
    let (x, y) = (s.pos.x, s.pos.y);
    let k = s.progress;
    let snow = Rgba8::hex(0xf8fafc);
    p.ellipse(s.pos, 10.0 * k, 3.0 * k, 0.0, Rgba8::BLACK.with_alpha(0.1));
    if k > 0.1 {
        p.circle(Vec2::new(x, y - 8.0 * k), 8.0 * k, snow);
    }
    if k > 0.4 {
        p.circle(Vec2::new(x, y - 18.0 * k), 6.0 * k, snow);
    }
    if k > 0.7 {
        p.circle(Vec2::new(x, y - 26.0 * k), 4.0 * k, snow);
        if s.complete {
            let eye = Rgba8::hex(0x1e293b);
            p.circle(Vec2::new(x - 1.5, y - 27.0), 1.0, eye);
            p.circle(Vec2::new(x + 1.5, y - 27.0), 1.0, eye);
            p.polygon(
                &[
                    Vec2::new(x, y - 26.0),
                    Vec2::new(x + 4.0, y - 25.0),
                    Vec2::new(x, y - 24.0),
                ],
                Rgba8::hex(0xf97316),
            );
        }
    }
}

/// Snow-covered floor ellipse shared by the ground-based scenes.
pub(crate) fn draw_floor(p: &mut Painter<'_>, color: Rgba8) {
    p.fill(
        &Ellipse::new(
            Point::new(0.0, GROUND_Y_OFFSET),
            Vec2::new(GLOBE_RADIUS - 20.0, GLOBE_RADIUS * FLOOR_SQUASH),
            0.0,
        ),
        color,
    );
}

pub struct WinterVillage {
    rng: StdRng,
    pub snow: SnowField,
    pub village: Village,
}

impl WinterVillage {
    pub fn new(init: &SceneInit) -> Self {
        let mut rng = scene_rng(init.seed);
        let snow = SnowField::new(&mut rng, SNOW_COUNT);
        let village = Village::new(&mut rng, PERSON_COUNT);
        Self { rng, snow, village }
    }
}

impl Scene for WinterVillage {
    fn kind(&self) -> SceneKind {
        SceneKind::Winter
    }

    fn update(&mut self) {
        self.snow.update(&mut self.rng);
        self.village.update(&mut self.rng);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop(&Gradient::vertical(
            -GLOBE_RADIUS,
            GLOBE_RADIUS,
            Rgba8::hex(0x020617),
            Rgba8::hex(0x1e293b),
        ));
        draw_floor(p, Rgba8::hex(0xf1f5f9));
        let mut sprites = Vec::new();
        self.village.sprites(&mut sprites);
        draw_depth_sorted(p, sprites);
        self.snow.draw(p);
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        self.snow.visit(f);
        self.village.visit(f);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/winter.rs"]
mod tests;
