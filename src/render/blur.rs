//! Separable gaussian blur over a single coverage channel, used for the engraving shadow.

use crate::foundation::error::{MicrocosmError, MicrocosmResult};

/// Blur an 8-bit coverage mask of `width * height` samples.
pub(crate) fn blur_mask(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> MicrocosmResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| MicrocosmError::surface("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(MicrocosmError::surface(
            "blur_mask expects src matching width*height",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    let w = width as usize;
    let h = height as usize;
    // Rows, then columns, with clamp-to-edge sampling.
    for y in 0..h {
        convolve_line(&src[y * w..(y + 1) * w], &mut tmp[y * w..(y + 1) * w], &kernel);
    }
    let mut column = vec![0u8; h];
    let mut blurred = vec![0u8; h];
    for x in 0..w {
        for y in 0..h {
            column[y] = tmp[y * w + x];
        }
        convolve_line(&column, &mut blurred, &kernel);
        for y in 0..h {
            out[y * w + x] = blurred[y];
        }
    }
    Ok(out)
}

fn convolve_line(src: &[u8], dst: &mut [u8], k: &[u32]) {
    let radius = (k.len() / 2) as isize;
    let last = src.len() as isize - 1;
    for (i, d) in dst.iter_mut().enumerate() {
        let mut acc = 0u64;
        for (ki, &kw) in k.iter().enumerate() {
            let si = (i as isize + ki as isize - radius).clamp(0, last) as usize;
            acc += u64::from(kw) * u64::from(src[si]);
        }
        *d = q16_to_u8(acc);
    }
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> MicrocosmResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(MicrocosmError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect::<Vec<_>>();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(MicrocosmError::surface("gaussian kernel sum is zero"));
    }

    let mut weights = weights_f
        .iter()
        .map(|&wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect::<Vec<_>>();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
