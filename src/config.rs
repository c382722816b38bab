use std::path::Path;

use crate::{
    foundation::error::{MicrocosmError, MicrocosmResult},
    render::engraving::Engraving,
    scene::{CustomSceneConfig, SceneInit, SceneKind},
};

pub const DEFAULT_LOOP_HZ: f64 = 60.0;

/// Everything needed to stand up one sphere: which scene, what it says, how it is seeded.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobeConfig {
    pub scene: SceneKind,
    /// Pedestal text; the scene's default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engraving: Option<Engraving>,
    pub seed: u64,
    pub custom: CustomSceneConfig,
    pub loop_hz: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            scene: SceneKind::Winter,
            engraving: None,
            seed: 0,
            custom: CustomSceneConfig::default(),
            loop_hz: DEFAULT_LOOP_HZ,
        }
    }
}

impl GlobeConfig {
    pub fn for_scene(scene: SceneKind) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> MicrocosmResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| MicrocosmError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> MicrocosmResult<Self> {
        use anyhow::Context as _;
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> MicrocosmResult<()> {
        if !self.loop_hz.is_finite() || self.loop_hz <= 0.0 || self.loop_hz > 240.0 {
            return Err(MicrocosmError::validation(format!(
                "loop_hz must be in (0, 240], got {}",
                self.loop_hz
            )));
        }
        Ok(())
    }

    /// The configured engraving, or the scene's default text.
    pub fn engraving(&self) -> Engraving {
        self.engraving
            .clone()
            .unwrap_or_else(|| Engraving::new(self.scene.default_engraving()))
    }

    pub fn scene_init(&self) -> SceneInit {
        SceneInit {
            seed: self.seed,
            custom: self.custom.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
