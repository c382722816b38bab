use crate::foundation::core::Rgba8;
use crate::foundation::error::{MicrocosmError, MicrocosmResult};
use crate::render::blur::blur_mask;
use crate::render::paint::premul_bytes_to_image;
use std::collections::HashMap;
use std::sync::Arc;

/// Longest engraving accepted; extra characters are dropped.
pub const MAX_ENGRAVING_CHARS: usize = 20;

const LABEL_WIDTH: u32 = 360;
const LABEL_HEIGHT: u32 = 40;
/// Baseline inside the label raster.
pub(crate) const LABEL_BASELINE: f64 = 28.0;
const FONT_SIZE: f64 = 20.0;
const SHADOW_ALPHA: f64 = 0.5;
const SHADOW_OFFSET: usize = 1;

/// Pedestal label text, length-bounded on construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Engraving(String);

impl Engraving {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(text.as_ref().chars().take(MAX_ENGRAVING_CHARS).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for Engraving {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Engraving> for String {
    fn from(e: Engraving) -> Self {
        e.0
    }
}

/// Rasterized label with its drop shadow baked in.
#[derive(Clone)]
pub(crate) struct EngravedLabel {
    pub(crate) image: vello_cpu::Image,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Text rasterizer for pedestal labels, cached per (text, color).
pub(crate) struct Engraver {
    fontdb: Option<Arc<usvg::fontdb::Database>>,
    cache: HashMap<(Engraving, Rgba8), Option<EngravedLabel>>,
}

impl Engraver {
    pub(crate) fn new() -> Self {
        Self {
            fontdb: None,
            cache: HashMap::new(),
        }
    }

    fn fontdb(&mut self) -> Arc<usvg::fontdb::Database> {
        self.fontdb
            .get_or_insert_with(|| {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                tracing::debug!(faces = db.len(), "loaded system fonts for engraving");
                Arc::new(db)
            })
            .clone()
    }

    /// Label for `text`, or `None` when it is empty or no font could shape it.
    pub(crate) fn label(&mut self, text: &Engraving, color: Rgba8) -> Option<EngravedLabel> {
        if text.is_empty() {
            return None;
        }
        let key = (text.clone(), color);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }

        let label = match self.rasterize(text, color) {
            Ok(Some(label)) => Some(label),
            Ok(None) => {
                tracing::warn!(text = text.as_str(), "no usable font; engraving skipped");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, text = text.as_str(), "engraving skipped");
                None
            }
        };
        self.cache.insert(key, label.clone());
        label
    }

    fn rasterize(
        &mut self,
        text: &Engraving,
        color: Rgba8,
    ) -> MicrocosmResult<Option<EngravedLabel>> {
        let svg = label_svg(text.as_str(), color);
        let opts = usvg::Options {
            fontdb: self.fontdb(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| MicrocosmError::surface(format!("engraving svg: {e}")))?;
        // Text without a resolvable face is dropped during conversion.
        if !tree.root().has_children() {
            return Ok(None);
        }

        let mut pixmap = resvg::tiny_skia::Pixmap::new(LABEL_WIDTH, LABEL_HEIGHT)
            .ok_or_else(|| MicrocosmError::surface("failed to allocate label pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        let text_premul = pixmap.data().to_vec();
        if text_premul.chunks_exact(4).all(|px| px[3] == 0) {
            return Ok(None);
        }

        let composed = with_drop_shadow(&text_premul, LABEL_WIDTH, LABEL_HEIGHT)?;
        Ok(Some(EngravedLabel {
            image: premul_bytes_to_image(&composed, LABEL_WIDTH, LABEL_HEIGHT)?,
            width: LABEL_WIDTH,
            height: LABEL_HEIGHT,
        }))
    }
}

fn label_svg(text: &str, color: Rgba8) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
            r#"<text x="{x}" y="{y}" font-family="Times New Roman, serif" font-size="{size}" "#,
            r#"text-anchor="middle" fill="{fill}" fill-opacity="{opacity}">{text}</text></svg>"#
        ),
        w = LABEL_WIDTH,
        h = LABEL_HEIGHT,
        x = f64::from(LABEL_WIDTH) / 2.0,
        y = LABEL_BASELINE,
        size = FONT_SIZE,
        fill = Rgba8 { a: 255, ..color }.to_hex(),
        opacity = f64::from(color.a) / 255.0,
        text = escape_xml(text),
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Composite premultiplied text over a blurred, offset black copy of its coverage.
fn with_drop_shadow(text_premul: &[u8], width: u32, height: u32) -> MicrocosmResult<Vec<u8>> {
    let w = width as usize;
    let h = height as usize;
    let mut coverage = vec![0u8; w * h];
    for y in SHADOW_OFFSET..h {
        for x in SHADOW_OFFSET..w {
            let src = ((y - SHADOW_OFFSET) * w + (x - SHADOW_OFFSET)) * 4 + 3;
            coverage[y * w + x] = (f64::from(text_premul[src]) * SHADOW_ALPHA).round() as u8;
        }
    }
    let shadow = blur_mask(&coverage, width, height, 2, 1.0)?;

    let mut out = vec![0u8; w * h * 4];
    for (i, (dst, src)) in out
        .chunks_exact_mut(4)
        .zip(text_premul.chunks_exact(4))
        .enumerate()
    {
        let inv = 255u16 - u16::from(src[3]);
        let sa = crate::foundation::math::mul_div255_u8(u16::from(shadow[i]), inv);
        dst[0] = src[0];
        dst[1] = src[1];
        dst[2] = src[2];
        dst[3] = (u16::from(src[3]) + u16::from(sa)).min(255) as u8;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/engraving.rs"]
mod tests;
