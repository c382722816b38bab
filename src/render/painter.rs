use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8, Vec2};
use crate::foundation::error::MicrocosmResult;
use crate::render::paint::{Gradient, GradientCache};
use kurbo::{Circle, Ellipse, Line, Shape};

const PATH_TOLERANCE: f64 = 0.1;

/// Drawing surface handed to scenes.
///
/// Coordinates are scene-local: the origin is the sphere center and +y points down. Every call
/// composes the caller's local transform on top of the surface placement.
pub struct Painter<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
    gradients: &'a mut GradientCache,
    origin: Vec2,
    width: u32,
    height: u32,
    local: Affine,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(
        ctx: &'a mut vello_cpu::RenderContext,
        gradients: &'a mut GradientCache,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            ctx,
            gradients,
            origin: Vec2::new(f64::from(width) / 2.0, f64::from(height) / 2.0),
            width,
            height,
            local: Affine::IDENTITY,
        }
    }

    fn surface_transform(&self) -> Affine {
        Affine::translate(self.origin) * self.local
    }

    fn apply_transform(&mut self) {
        let xf = affine_to_cpu(self.surface_transform());
        self.ctx.set_transform(xf);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn set_color(&mut self, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    fn set_gradient(&mut self, gradient: &Gradient) -> MicrocosmResult<()> {
        let img = self
            .gradients
            .image_for(gradient, self.width, self.height, self.origin)?;
        self.ctx.set_paint(img);
        // The gradient image spans the surface; map its pixel grid back to scene-local space.
        self.ctx
            .set_paint_transform(affine_to_cpu(Affine::translate(-self.origin)));
        Ok(())
    }

    pub fn fill(&mut self, shape: &impl Shape, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        self.apply_transform();
        self.set_color(color);
        self.ctx
            .fill_path(&bezpath_to_cpu(&shape.to_path(PATH_TOLERANCE)));
    }

    /// Fill with a gradient. A gradient that fails to rasterize leaves the shape unpainted.
    pub fn fill_gradient(&mut self, shape: &impl Shape, gradient: &Gradient) {
        self.apply_transform();
        if let Err(e) = self.set_gradient(gradient) {
            tracing::warn!(error = %e, "gradient fill skipped");
            return;
        }
        self.ctx
            .fill_path(&bezpath_to_cpu(&shape.to_path(PATH_TOLERANCE)));
    }

    pub fn stroke(&mut self, shape: &impl Shape, width: f64, color: Rgba8) {
        if color.a == 0 || width <= 0.0 {
            return;
        }
        self.apply_transform();
        self.set_color(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx
            .stroke_path(&bezpath_to_cpu(&shape.to_path(PATH_TOLERANCE)));
    }

    pub fn stroke_gradient(&mut self, shape: &impl Shape, width: f64, gradient: &Gradient) {
        self.apply_transform();
        if let Err(e) = self.set_gradient(gradient) {
            tracing::warn!(error = %e, "gradient stroke skipped");
            return;
        }
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx
            .stroke_path(&bezpath_to_cpu(&shape.to_path(PATH_TOLERANCE)));
    }

    pub fn circle(&mut self, center: Vec2, radius: f64, color: Rgba8) {
        if radius <= 0.0 {
            return;
        }
        self.fill(&Circle::new(center.to_point(), radius), color);
    }

    pub fn ellipse(&mut self, center: Vec2, rx: f64, ry: f64, rotation: f64, color: Rgba8) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        self.fill(
            &Ellipse::new(center.to_point(), Vec2::new(rx, ry), rotation),
            color,
        );
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba8) {
        self.fill(&Rect::new(x, y, x + w, y + h), color);
    }

    pub fn line(&mut self, a: Vec2, b: Vec2, width: f64, color: Rgba8) {
        self.stroke(&Line::new(a.to_point(), b.to_point()), width, color);
    }

    pub fn polygon(&mut self, points: &[Vec2], color: Rgba8) {
        self.fill(&polygon_path(points), color);
    }

    /// Fill the square that bounds the sphere (the clip trims it to the disc).
    pub fn backdrop(&mut self, gradient: &Gradient) {
        let r = crate::foundation::core::GLOBE_RADIUS;
        self.fill_gradient(&Rect::new(-r, -r, r, r), gradient);
    }

    pub fn backdrop_flat(&mut self, color: Rgba8) {
        let r = crate::foundation::core::GLOBE_RADIUS;
        self.fill(&Rect::new(-r, -r, r, r), color);
    }

    /// Run `f` with `xf` composed onto the current local transform.
    pub fn with_transform(&mut self, xf: Affine, f: impl FnOnce(&mut Self)) {
        let saved = self.local;
        self.local = saved * xf;
        f(self);
        self.local = saved;
    }

    /// Run `f` inside an opacity layer. Fully transparent groups are skipped.
    pub fn with_opacity(&mut self, opacity: f64, f: impl FnOnce(&mut Self)) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }
        if opacity >= 1.0 {
            f(self);
            return;
        }
        self.ctx.push_opacity_layer(opacity as f32);
        f(self);
        self.ctx.pop_layer();
    }

    /// Run `f` clipped to `shape` (scene-local, current transform applies).
    pub fn with_clip(&mut self, shape: &impl Shape, f: impl FnOnce(&mut Self)) {
        self.apply_transform();
        self.ctx
            .push_clip_layer(&bezpath_to_cpu(&shape.to_path(PATH_TOLERANCE)));
        f(self);
        self.ctx.pop_layer();
    }

    /// Blit a premultiplied image with its top-left corner at `top_left`.
    pub(crate) fn image(&mut self, img: vello_cpu::Image, top_left: Point, w: u32, h: u32) {
        self.apply_transform();
        let xf = self.surface_transform() * Affine::translate(top_left.to_vec2());
        self.ctx.set_transform(affine_to_cpu(xf));
        self.ctx.set_paint(img);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
    }
}

pub(crate) fn polygon_path(points: &[Vec2]) -> BezPath {
    let mut p = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        p.move_to(first.to_point());
        for pt in iter {
            p.line_to(pt.to_point());
        }
        p.close_path();
    }
    p
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
