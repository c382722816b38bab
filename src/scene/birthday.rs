use crate::foundation::core::{Rgba8, Vec2};
use crate::foundation::geometry::spread;
use crate::render::painter::Painter;
use crate::scene::{Population, Scene, SceneInit, SceneKind, scene_rng};
use rand::Rng;
use rand::rngs::StdRng;

pub const MAX_WISHES: usize = 200;
pub const WISH_SPAWN_CHANCE: f64 = 0.2;

const LIFE_DECAY: f64 = 0.01;
const TABLE_Y: f64 = 80.0;
const CAKE: Vec2 = Vec2::new(0.0, TABLE_Y - 10.0);
/// Wishes rise from above the cake.
const WISH_ORIGIN: Vec2 = Vec2::new(0.0, TABLE_Y - 90.0);

#[derive(Clone, Debug, PartialEq)]
pub struct Candle {
    /// Offset from the top of the cake.
    pub offset: Vec2,
    pub flicker: f64,
    pub color: Rgba8,
}

impl Candle {
    fn tip(&self) -> Vec2 {
        CAKE + Vec2::new(0.0, -40.0) + self.offset
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Wish {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub life: f64,
}

/// Golden motes drifting up from the candles.
#[derive(Clone, Debug, Default)]
pub struct WishCloud {
    pub wishes: Vec<Wish>,
}

impl WishCloud {
    pub fn spawn(&mut self, rng: &mut impl Rng) -> bool {
        if self.wishes.len() >= MAX_WISHES {
            return false;
        }
        self.wishes.push(Wish {
            pos: WISH_ORIGIN + Vec2::new(spread(rng, 20.0), -40.0),
            velocity: Vec2::new(spread(rng, 0.25), -rng.gen_range(0.0..1.0)),
            life: 1.0,
        });
        true
    }

    pub fn update(&mut self, rng: &mut impl Rng, spawn_chance: f64) {
        if rng.gen_bool(spawn_chance) {
            self.spawn(rng);
        }
        for w in &mut self.wishes {
            w.pos += w.velocity;
            w.life -= LIFE_DECAY;
        }
        self.wishes.retain(|w| w.life > 0.0);
    }
}

pub struct BirthdayCake {
    rng: StdRng,
    pub candles: Vec<Candle>,
    pub wishes: WishCloud,
}

impl BirthdayCake {
    pub fn new(init: &SceneInit) -> Self {
        let candles = [
            (-10.0, Rgba8::hex(0xf87171)),
            (0.0, Rgba8::hex(0x60a5fa)),
            (10.0, Rgba8::hex(0xfbbf24)),
        ]
        .into_iter()
        .map(|(x, color)| Candle {
            offset: Vec2::new(x, -20.0),
            flicker: 1.0,
            color,
        })
        .collect();
        Self {
            rng: scene_rng(init.seed),
            candles,
            wishes: WishCloud::default(),
        }
    }
}

fn draw_table_and_girl(p: &mut Painter<'_>) {
    p.ellipse(Vec2::new(0.0, TABLE_Y), 120.0, 40.0, 0.0, Rgba8::hex(0x9f1239));
    p.rect(-120.0, TABLE_Y, 240.0, 100.0, Rgba8::hex(0x9f1239));

    let g = Vec2::new(0.0, TABLE_Y - 20.0);
    p.polygon(
        &[
            g + Vec2::new(0.0, -80.0),
            g + Vec2::new(30.0, 0.0),
            g + Vec2::new(-30.0, 0.0),
        ],
        Rgba8::hex(0xfce7f3),
    );
    p.circle(g + Vec2::new(0.0, -90.0), 20.0, Rgba8::hex(0xfde047));
    p.circle(g + Vec2::new(0.0, -85.0), 15.0, Rgba8::hex(0xffedd5));
    // Eyes closed while wishing.
    let lash = Rgba8::hex(0x4b5563);
    p.line(g + Vec2::new(-5.0, -85.0), g + Vec2::new(-2.0, -85.0), 1.0, lash);
    p.line(g + Vec2::new(2.0, -85.0), g + Vec2::new(5.0, -85.0), 1.0, lash);
}

fn draw_cake(p: &mut Painter<'_>) {
    let icing = Rgba8::hex(0xfff1f2);
    p.ellipse(CAKE, 50.0, 20.0, 0.0, icing);
    p.rect(CAKE.x - 50.0, CAKE.y - 40.0, 100.0, 40.0, icing);
    p.ellipse(CAKE + Vec2::new(0.0, -40.0), 50.0, 20.0, 0.0, icing);
    p.circle(CAKE + Vec2::new(0.0, -20.0), 10.0, Rgba8::hex(0xfda4af));
}

impl Scene for BirthdayCake {
    fn kind(&self) -> SceneKind {
        SceneKind::Birthday
    }

    fn update(&mut self) {
        for c in &mut self.candles {
            c.flicker = self.rng.gen_range(0.8..1.2);
        }
        self.wishes.update(&mut self.rng, WISH_SPAWN_CHANCE);
    }

    fn draw(&self, p: &mut Painter<'_>) {
        p.backdrop_flat(Rgba8::hex(0x270a15));
        draw_table_and_girl(p);
        draw_cake(p);
        for c in &self.candles {
            let tip = c.tip();
            p.rect(tip.x - 2.0, tip.y, 4.0, 15.0, c.color);
            p.ellipse(
                tip,
                4.0 * c.flicker,
                8.0 * c.flicker,
                0.0,
                Rgba8::rgba(255, 160, 0, c.flicker.min(1.0)),
            );
            p.ellipse(tip + Vec2::new(0.0, 2.0), 2.0, 4.0, 0.0, Rgba8::rgba(255, 255, 200, 0.8));
        }
        let gold = Rgba8::hex(0xfbbf24);
        for w in &self.wishes.wishes {
            p.circle(w.pos, 2.0, gold.with_alpha(w.life));
        }
    }

    fn visit(&self, f: &mut dyn FnMut(Population, Vec2)) {
        for c in &self.candles {
            f(Population::Candle, c.tip());
        }
        for w in &self.wishes.wishes {
            f(Population::Wish, w.pos);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/birthday.rs"]
mod tests;
