use crate::foundation::core::{Canvas, GLOBE_RADIUS, Point};
use crate::foundation::error::{MicrocosmError, MicrocosmResult};
use crate::render::backend::FrameRGBA;
use crate::render::chrome::draw_chrome;
use crate::render::engraving::{Engraver, Engraving};
use crate::render::paint::GradientCache;
use crate::render::painter::Painter;
use crate::scene::Scene;
use kurbo::Circle;

/// Pixel dimensions `vello_cpu` can allocate for `canvas`.
pub(crate) fn surface_dims(canvas: Canvas) -> MicrocosmResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| MicrocosmError::validation("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| MicrocosmError::validation("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(MicrocosmError::validation("surface size must be non-zero"));
    }
    Ok((w, h))
}

/// CPU renderer for the sphere surface, powered by `vello_cpu`.
///
/// Every frame clears the surface, draws the scene inside the disc clip, then the chrome overlay
/// on the full surface, and reads back premultiplied RGBA8.
pub struct GlobeRenderer {
    canvas: Canvas,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
    gradients: GradientCache,
    engraver: Engraver,
}

impl GlobeRenderer {
    pub fn new(canvas: Canvas) -> MicrocosmResult<Self> {
        let (w, h) = surface_dims(canvas)?;
        Ok(Self {
            canvas,
            ctx: Some(vello_cpu::RenderContext::new(w, h)),
            pixmap: Some(vello_cpu::Pixmap::new(w, h)),
            gradients: GradientCache::default(),
            engraver: Engraver::new(),
        })
    }

    /// Renderer for the standard 700x700 sphere surface.
    pub fn globe() -> Self {
        let w = crate::foundation::core::SURFACE_SIZE as u16;
        Self {
            canvas: Canvas::globe(),
            ctx: Some(vello_cpu::RenderContext::new(w, w)),
            pixmap: Some(vello_cpu::Pixmap::new(w, w)),
            gradients: GradientCache::default(),
            engraver: Engraver::new(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn is_mounted(&self) -> bool {
        self.ctx.is_some() && self.pixmap.is_some()
    }

    /// Tear down the surface. Later [`GlobeRenderer::render`] calls no-op.
    pub fn shutdown(&mut self) {
        self.ctx = None;
        self.pixmap = None;
    }

    /// Draw one frame of `scene`. Returns `Ok(None)` once the surface is torn down.
    pub fn render(
        &mut self,
        scene: &dyn Scene,
        engraving: &Engraving,
    ) -> MicrocosmResult<Option<FrameRGBA>> {
        let (Some(ctx), Some(pixmap)) = (self.ctx.as_mut(), self.pixmap.as_mut()) else {
            return Ok(None);
        };
        let style = scene.chrome();
        let label = self.engraver.label(engraving, style.text);

        ctx.reset();
        {
            let mut p = Painter::new(ctx, &mut self.gradients, self.canvas.width, self.canvas.height);
            p.with_clip(&Circle::new(Point::ZERO, GLOBE_RADIUS), |p| scene.draw(p));
            draw_chrome(&mut p, &style, label);
        }
        ctx.flush();
        pixmap.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(pixmap);

        Ok(Some(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
