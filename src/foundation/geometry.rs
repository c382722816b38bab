//! Point sampling inside the sphere and small steering helpers shared by every scene.

use crate::foundation::core::{GLOBE_RADIUS, GROUND_Y_OFFSET, Vec2};
use rand::Rng;
use std::f64::consts::TAU;

/// Vertical squash applied to floor-plane samples to fake an oblique view.
pub const FLOOR_SQUASH: f64 = 0.35;

/// Inset from the rim used by floor sampling before `r_modifier` is applied.
const FLOOR_RIM_MARGIN: f64 = 40.0;

/// Uniform-area point on the squashed floor ellipse.
///
/// `ground` is the ellipse center on the y axis; `r_modifier` shrinks the usable radius further.
pub fn random_pos_in_globe(rng: &mut impl Rng, ground: f64, r_modifier: f64) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let r = rng.gen_range(0.0f64..1.0).sqrt() * (GLOBE_RADIUS - FLOOR_RIM_MARGIN - r_modifier);
    Vec2::new(angle.cos() * r, angle.sin() * r * FLOOR_SQUASH + ground)
}

/// [`random_pos_in_globe`] with the default ground line and no extra inset.
pub fn random_floor_pos(rng: &mut impl Rng) -> Vec2 {
    random_pos_in_globe(rng, GROUND_Y_OFFSET, 0.0)
}

/// Uniform-area point in the disc of radius `R - margin` centered on the sphere.
pub fn random_pos_in_disc(rng: &mut impl Rng, margin: f64) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let r = rng.gen_range(0.0f64..1.0).sqrt() * (GLOBE_RADIUS - margin).max(0.0);
    Vec2::new(angle.cos() * r, angle.sin() * r)
}

/// Uniform value in `[-half, half)`; degenerate spans return 0.
pub fn spread(rng: &mut impl Rng, half: f64) -> f64 {
    if half <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half..half)
}

pub fn distance(a: Vec2, b: Vec2) -> f64 {
    (b - a).hypot()
}

/// Angle of the direction from `from` to `to`.
pub fn bearing(from: Vec2, to: Vec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

pub fn unit_from_angle(angle: f64) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Outcome of a single [`step_toward`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Still travelling; the new position is returned.
    Moving(Vec2),
    /// Within `epsilon` of the target; position snapped onto it.
    Arrived(Vec2),
}

/// Move `pos` toward `target` by `speed`, snapping exactly onto the target once within `epsilon`.
pub fn step_toward(pos: Vec2, target: Vec2, speed: f64, epsilon: f64) -> Step {
    let d = target - pos;
    let dist = d.hypot();
    if dist < epsilon || dist <= speed {
        return Step::Arrived(target);
    }
    Step::Moving(pos + d * (speed / dist))
}

/// Wrap `v` into `[-limit, limit]` by jumping to the opposite edge.
pub fn wrap_coord(v: f64, limit: f64) -> f64 {
    if v > limit {
        -limit
    } else if v < -limit {
        limit
    } else {
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
