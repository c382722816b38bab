use crate::{
    foundation::{
        error::{MicrocosmError, MicrocosmResult},
        math::mul_div255_u16 as mul_div255,
    },
    render::backend::FrameRGBA,
};

/// Consumer of captured frames that finalizes into one encoded document.
pub trait FrameSink: Send {
    /// Encode or buffer one frame.
    fn push(&mut self, frame: &FrameRGBA) -> MicrocosmResult<()>;

    /// Frames accepted so far.
    fn frames(&self) -> usize;

    /// Finalize and return the encoded bytes. Resources are released on every exit path.
    fn finish(self: Box<Self>) -> MicrocosmResult<Vec<u8>>;
}

/// Composite RGBA8 pixels over an opaque background color.
pub fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> MicrocosmResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MicrocosmError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = bg_rgba[0] as u16;
    let bg_g = bg_rgba[1] as u16;
    let bg_b = bg_rgba[2] as u16;

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u16;
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        let (r, g, b) = if src_is_premul {
            (
                s[0] as u16 + mul_div255(bg_r, inv),
                s[1] as u16 + mul_div255(bg_g, inv),
                s[2] as u16 + mul_div255(bg_b, inv),
            )
        } else {
            (
                mul_div255(s[0] as u16, a) + mul_div255(bg_r, inv),
                mul_div255(s[1] as u16, a) + mul_div255(bg_g, inv),
                mul_div255(s[2] as u16, a) + mul_div255(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

pub(crate) fn check_frame(frame: &FrameRGBA, width: u32, height: u32) -> MicrocosmResult<()> {
    if frame.width != width || frame.height != height {
        return Err(MicrocosmError::encode(format!(
            "frame size mismatch: got {}x{}, expected {width}x{height}",
            frame.width, frame.height
        )));
    }
    if frame.data.len() != (width as usize) * (height as usize) * 4 {
        return Err(MicrocosmError::encode(
            "frame.data size mismatch with width*height*4",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
