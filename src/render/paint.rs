use crate::foundation::core::{Rgba8, Vec2};
use crate::foundation::error::{MicrocosmError, MicrocosmResult};
use crate::foundation::math::premul_rgba8;
use std::sync::Arc;

/// Color ramp in scene-local coordinates (origin at the sphere center).
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<(f64, Rgba8)>,
    },
    Radial {
        center: Vec2,
        inner: f64,
        outer: f64,
        stops: Vec<(f64, Rgba8)>,
    },
}

impl Gradient {
    pub fn linear(from: Vec2, to: Vec2, stops: &[(f64, Rgba8)]) -> Self {
        Self::Linear {
            from,
            to,
            stops: stops.to_vec(),
        }
    }

    /// Top-to-bottom ramp across `[y0, y1]`.
    pub fn vertical(y0: f64, y1: f64, top: Rgba8, bottom: Rgba8) -> Self {
        Self::linear(
            Vec2::new(0.0, y0),
            Vec2::new(0.0, y1),
            &[(0.0, top), (1.0, bottom)],
        )
    }

    pub fn radial(center: Vec2, inner: f64, outer: f64, stops: &[(f64, Rgba8)]) -> Self {
        Self::Radial {
            center,
            inner,
            outer,
            stops: stops.to_vec(),
        }
    }

    /// Ramp parameter for the local point `p`, clamped to `[0, 1]`.
    pub(crate) fn param_at(&self, p: Vec2) -> f64 {
        let t = match self {
            Self::Linear { from, to, .. } => {
                let axis = *to - *from;
                let len2 = axis.hypot2();
                if len2 <= f64::EPSILON {
                    0.0
                } else {
                    (p - *from).dot(axis) / len2
                }
            }
            Self::Radial {
                center,
                inner,
                outer,
                ..
            } => {
                let span = outer - inner;
                if span <= f64::EPSILON {
                    0.0
                } else {
                    ((p - *center).hypot() - inner) / span
                }
            }
        };
        t.clamp(0.0, 1.0)
    }

    pub(crate) fn stops(&self) -> &[(f64, Rgba8)] {
        match self {
            Self::Linear { stops, .. } | Self::Radial { stops, .. } => stops,
        }
    }

    pub(crate) fn color_at(&self, p: Vec2) -> Rgba8 {
        sample_stops(self.stops(), self.param_at(p))
    }
}

pub(crate) fn sample_stops(stops: &[(f64, Rgba8)], t: f64) -> Rgba8 {
    let Some(&(first_t, first)) = stops.first() else {
        return Rgba8::BLACK.with_alpha(0.0);
    };
    if t <= first_t {
        return first;
    }
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let span = t1 - t0;
            let local = if span <= f64::EPSILON {
                1.0
            } else {
                (t - t0) / span
            };
            return c0.lerp(c1, local);
        }
    }
    stops.last().map(|&(_, c)| c).unwrap_or(first)
}

/// Rasterized gradients, keyed by the gradient itself.
///
/// Each entry covers the whole surface so any shape can be filled from it.
#[derive(Default)]
pub(crate) struct GradientCache {
    entries: Vec<(Gradient, vello_cpu::Image)>,
}

/// Gradients kept before the cache is flushed; scenes only use a handful each.
const GRADIENT_CACHE_CAP: usize = 32;

impl GradientCache {
    pub(crate) fn image_for(
        &mut self,
        gradient: &Gradient,
        width: u32,
        height: u32,
        origin: Vec2,
    ) -> MicrocosmResult<vello_cpu::Image> {
        if let Some((_, img)) = self.entries.iter().find(|(g, _)| g == gradient) {
            return Ok(img.clone());
        }
        if self.entries.len() >= GRADIENT_CACHE_CAP {
            self.entries.clear();
        }

        let mut bytes = vec![0u8; (width as usize) * (height as usize) * 4];
        for y in 0..height {
            for x in 0..width {
                let local = Vec2::new(
                    f64::from(x) + 0.5 - origin.x,
                    f64::from(y) + 0.5 - origin.y,
                );
                let c = premul_rgba8(gradient.color_at(local).to_array());
                let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&c);
            }
        }
        let img = premul_bytes_to_image(&bytes, width, height)?;
        self.entries.push((gradient.clone(), img.clone()));
        Ok(img)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> MicrocosmResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MicrocosmError::surface("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MicrocosmError::surface("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(MicrocosmError::surface("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

pub(crate) fn premul_bytes_to_image(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> MicrocosmResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
