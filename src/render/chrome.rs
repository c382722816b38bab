//! Scene-independent glass sphere overlay: shine, specular, rim, pedestal and engraving.

use crate::foundation::core::{GLOBE_RADIUS, Point, Rgba8, Vec2};
use crate::render::engraving::{EngravedLabel, LABEL_BASELINE};
use crate::render::paint::Gradient;
use crate::render::painter::{Painter, polygon_path};
use kurbo::{Circle, Ellipse};
use std::f64::consts::FRAC_PI_4;

/// Pedestal colors; scenes may override them (the custom scene does).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChromeStyle {
    pub base_dark: Rgba8,
    pub base_light: Rgba8,
    pub text: Rgba8,
}

impl Default for ChromeStyle {
    fn default() -> Self {
        Self {
            base_dark: Rgba8::hex(0x78350f),
            base_light: Rgba8::hex(0xb45309),
            text: Rgba8::hex(0xfbbf24),
        }
    }
}

impl ChromeStyle {
    /// Style derived from a single structure color and a text color.
    pub fn from_base(base: Rgba8, text: Rgba8) -> Self {
        Self {
            base_dark: base,
            base_light: base.lerp(Rgba8::WHITE, 0.25),
            text,
        }
    }
}

/// Top edge of the pedestal in scene-local coordinates.
pub const BASE_TOP: f64 = GLOBE_RADIUS - 10.0;
const BASE_WIDTH: f64 = GLOBE_RADIUS * 1.4;
const BASE_HEIGHT: f64 = 60.0;
/// Text baseline offset below the pedestal top.
const TEXT_DROP: f64 = 35.0;

pub(crate) fn draw_chrome(p: &mut Painter<'_>, style: &ChromeStyle, label: Option<EngravedLabel>) {
    let r = GLOBE_RADIUS;
    let sphere = Circle::new(Point::ZERO, r);

    p.fill_gradient(
        &sphere,
        &Gradient::vertical(
            -r,
            0.0,
            Rgba8::WHITE.with_alpha(0.2),
            Rgba8::WHITE.with_alpha(0.0),
        ),
    );

    p.fill(
        &Ellipse::new(
            Point::new(-r * 0.4, -r * 0.4),
            Vec2::new(60.0, 30.0),
            FRAC_PI_4,
        ),
        Rgba8::WHITE.with_alpha(0.15),
    );

    p.stroke_gradient(
        &sphere,
        4.0,
        &Gradient::linear(
            Vec2::new(-r, -r),
            Vec2::new(r, r),
            &[
                (0.0, Rgba8::WHITE.with_alpha(0.6)),
                (0.5, Rgba8::WHITE.with_alpha(0.1)),
                (1.0, Rgba8::WHITE.with_alpha(0.4)),
            ],
        ),
    );

    let top = BASE_TOP;
    let pedestal = polygon_path(&[
        Vec2::new(-BASE_WIDTH * 0.4, top),
        Vec2::new(BASE_WIDTH * 0.4, top),
        Vec2::new(BASE_WIDTH * 0.5, top + BASE_HEIGHT),
        Vec2::new(-BASE_WIDTH * 0.5, top + BASE_HEIGHT),
    ]);
    p.fill_gradient(
        &pedestal,
        &Gradient::linear(
            Vec2::new(-BASE_WIDTH / 2.0, top),
            Vec2::new(BASE_WIDTH / 2.0, top),
            &[
                (0.0, style.base_dark),
                (0.5, style.base_light),
                (1.0, style.base_dark),
            ],
        ),
    );
    p.stroke(&pedestal, 2.0, Rgba8::WHITE.with_alpha(0.2));

    if let Some(label) = label {
        let top_left = Point::new(
            -f64::from(label.width) / 2.0,
            top + TEXT_DROP - LABEL_BASELINE,
        );
        p.image(label.image, top_left, label.width, label.height);
    }
}
