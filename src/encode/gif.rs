use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

use crate::{
    encode::{
        quantize::{MAX_PALETTE, Palette},
        sink::{FrameSink, flatten_to_opaque_rgba8},
    },
    foundation::error::{MicrocosmError, MicrocosmResult},
    render::backend::FrameRGBA,
};

/// One captured frame after palette reduction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedFrame {
    pub width: u32,
    pub height: u32,
    pub palette: Palette,
    pub indices: Vec<u8>,
}

impl IndexedFrame {
    fn to_rgba(&self) -> MicrocosmResult<RgbaImage> {
        let colors = self.palette.colors();
        let mut data = Vec::with_capacity(self.indices.len() * 4);
        for &i in &self.indices {
            let [r, g, b] = colors.get(i as usize).copied().unwrap_or([0, 0, 0]);
            data.extend_from_slice(&[r, g, b, 255]);
        }
        RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| MicrocosmError::encode("indexed frame size mismatch"))
    }
}

/// Average each 2x2 block of an RGBA8 buffer into one pixel; odd edges are dropped.
pub fn downsample_2x(frame: &FrameRGBA) -> MicrocosmResult<FrameRGBA> {
    let (w, h) = (frame.width / 2, frame.height / 2);
    if w == 0 || h == 0 {
        return Err(MicrocosmError::validation(format!(
            "frame {}x{} is too small to downsample",
            frame.width, frame.height
        )));
    }
    let stride = frame.width as usize * 4;
    let mut data = vec![0u8; w as usize * h as usize * 4];
    for y in 0..h as usize {
        let row0 = 2 * y * stride;
        let row1 = row0 + stride;
        for x in 0..w as usize {
            let (c0, c1) = (row0 + 8 * x, row1 + 8 * x);
            for ch in 0..4 {
                let sum = u16::from(frame.data[c0 + ch])
                    + u16::from(frame.data[c0 + 4 + ch])
                    + u16::from(frame.data[c1 + ch])
                    + u16::from(frame.data[c1 + 4 + ch]);
                data[(y * w as usize + x) * 4 + ch] = ((sum + 2) / 4) as u8;
            }
        }
    }
    Ok(FrameRGBA {
        width: w,
        height: h,
        data,
        premultiplied: frame.premultiplied,
    })
}

/// Downsample, flatten and palette-reduce one surface frame.
pub fn index_frame(frame: &FrameRGBA, bg_rgba: [u8; 4]) -> MicrocosmResult<IndexedFrame> {
    if frame.data.len() != frame.width as usize * frame.height as usize * 4 {
        return Err(MicrocosmError::encode(
            "frame.data size mismatch with width*height*4",
        ));
    }
    let small = downsample_2x(frame)?;
    let mut opaque = vec![0u8; small.data.len()];
    flatten_to_opaque_rgba8(&mut opaque, &small.data, small.premultiplied, bg_rgba)?;
    let rgb: Vec<[u8; 3]> = opaque.chunks_exact(4).map(|p| [p[0], p[1], p[2]]).collect();
    let palette = Palette::median_cut(&rgb, MAX_PALETTE);
    let indices = palette.index(&rgb);
    Ok(IndexedFrame {
        width: small.width,
        height: small.height,
        palette,
        indices,
    })
}

/// Collects indexed frames and writes an infinitely looping GIF on finish.
pub struct GifSink {
    fps: u32,
    bg_rgba: [u8; 4],
    frames: Vec<IndexedFrame>,
}

impl GifSink {
    pub fn new(fps: u32, bg_rgba: [u8; 4]) -> MicrocosmResult<Self> {
        if fps == 0 {
            return Err(MicrocosmError::validation("gif fps must be non-zero"));
        }
        Ok(Self {
            fps,
            bg_rgba,
            frames: Vec::new(),
        })
    }

    pub fn indexed_frames(&self) -> &[IndexedFrame] {
        &self.frames
    }

    fn delay(&self) -> Delay {
        Delay::from_numer_denom_ms(1000, self.fps)
    }
}

impl FrameSink for GifSink {
    fn push(&mut self, frame: &FrameRGBA) -> MicrocosmResult<()> {
        if let Some(first) = self.frames.first()
            && (frame.width / 2 != first.width || frame.height / 2 != first.height)
        {
            return Err(MicrocosmError::encode(format!(
                "frame size changed mid-capture: {}x{}",
                frame.width, frame.height
            )));
        }
        self.frames.push(index_frame(frame, self.bg_rgba)?);
        Ok(())
    }

    fn frames(&self) -> usize {
        self.frames.len()
    }

    fn finish(self: Box<Self>) -> MicrocosmResult<Vec<u8>> {
        if self.frames.is_empty() {
            return Err(MicrocosmError::encode("gif has no frames"));
        }
        let delay = self.delay();
        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| MicrocosmError::encode(format!("gif header: {e}")))?;
            for f in &self.frames {
                encoder
                    .encode_frame(Frame::from_parts(f.to_rgba()?, 0, 0, delay))
                    .map_err(|e| MicrocosmError::encode(format!("gif frame: {e}")))?;
            }
        }
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
