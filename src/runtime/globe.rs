use crate::{
    config::GlobeConfig,
    foundation::error::MicrocosmResult,
    render::{backend::FrameRGBA, cpu::GlobeRenderer, engraving::Engraving},
    scene::{CustomSceneConfig, Scene, SceneKind, registry},
};

/// Active scene, its engraving and the surface it is drawn on.
///
/// Exclusively owned by whoever drives the ticks; capture only ever sees the frames.
pub struct Globe {
    scene: Box<dyn Scene>,
    engraving: Engraving,
    renderer: GlobeRenderer,
    ticks: u64,
}

impl Globe {
    pub fn new(scene: Box<dyn Scene>, engraving: Engraving, renderer: GlobeRenderer) -> Self {
        Self {
            scene,
            engraving,
            renderer,
            ticks: 0,
        }
    }

    /// Fresh populations for `cfg.scene` on a standard-size surface.
    pub fn from_config(cfg: &GlobeConfig) -> MicrocosmResult<Self> {
        cfg.validate()?;
        let scene = registry::build(cfg.scene, &cfg.scene_init());
        Ok(Self::new(scene, cfg.engraving(), GlobeRenderer::globe()))
    }

    pub fn kind(&self) -> SceneKind {
        self.scene.kind()
    }

    pub fn scene(&self) -> &dyn Scene {
        self.scene.as_ref()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn engraving(&self) -> &Engraving {
        &self.engraving
    }

    pub fn set_engraving(&mut self, engraving: Engraving) {
        self.engraving = engraving;
    }

    /// Forward a custom configuration to the scene. `false` when the scene ignores it.
    pub fn reconfigure(&mut self, config: &CustomSceneConfig) -> bool {
        self.scene.reconfigure(config)
    }

    pub fn renderer_mut(&mut self) -> &mut GlobeRenderer {
        &mut self.renderer
    }

    /// Update once, then render once. Without a mounted surface neither happens.
    pub fn tick(&mut self) -> MicrocosmResult<Option<FrameRGBA>> {
        if !self.renderer.is_mounted() {
            return Ok(None);
        }
        self.scene.update();
        self.ticks += 1;
        self.render()
    }

    /// Update `ticks` times without rendering. Without a mounted surface nothing happens.
    pub fn advance(&mut self, ticks: u64) {
        if !self.renderer.is_mounted() {
            return;
        }
        for _ in 0..ticks {
            self.scene.update();
        }
        self.ticks += ticks;
    }

    /// Render the current state without advancing it.
    pub fn render(&mut self) -> MicrocosmResult<Option<FrameRGBA>> {
        self.renderer.render(self.scene.as_ref(), &self.engraving)
    }

    /// Tear down the surface; later ticks no-op.
    pub fn unmount(&mut self) {
        self.renderer.shutdown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/globe.rs"]
mod tests;
