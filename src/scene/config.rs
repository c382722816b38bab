use crate::foundation::core::Rgba8;

/// Feature toggles and colors for the user-composed scene.
///
/// Toggles are orthogonal: each owns its population and never touches another's.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomSceneConfig {
    pub snow: bool,
    pub rain: bool,
    pub sakura: bool,
    pub people: bool,
    pub forest: bool,
    pub christmas_tree: bool,
    pub cat: bool,
    pub background_color: Rgba8,
    pub base_color: Rgba8,
    pub text_color: Rgba8,
}

impl Default for CustomSceneConfig {
    fn default() -> Self {
        Self {
            snow: false,
            rain: false,
            sakura: false,
            people: false,
            forest: false,
            christmas_tree: false,
            cat: false,
            background_color: Rgba8::hex(0x0f172a),
            base_color: Rgba8::hex(0x78350f),
            text_color: Rgba8::hex(0xfbbf24),
        }
    }
}

/// Identifies one toggle of [`CustomSceneConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    Snow,
    Rain,
    Sakura,
    People,
    Forest,
    ChristmasTree,
    Cat,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Self::Snow,
        Self::Rain,
        Self::Sakura,
        Self::People,
        Self::Forest,
        Self::ChristmasTree,
        Self::Cat,
    ];
}

impl CustomSceneConfig {
    pub fn enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Snow => self.snow,
            Feature::Rain => self.rain,
            Feature::Sakura => self.sakura,
            Feature::People => self.people,
            Feature::Forest => self.forest,
            Feature::ChristmasTree => self.christmas_tree,
            Feature::Cat => self.cat,
        }
    }

    pub fn set(&mut self, feature: Feature, on: bool) {
        let slot = match feature {
            Feature::Snow => &mut self.snow,
            Feature::Rain => &mut self.rain,
            Feature::Sakura => &mut self.sakura,
            Feature::People => &mut self.people,
            Feature::Forest => &mut self.forest,
            Feature::ChristmasTree => &mut self.christmas_tree,
            Feature::Cat => &mut self.cat,
        };
        *slot = on;
    }

    pub fn with(mut self, feature: Feature, on: bool) -> Self {
        self.set(feature, on);
        self
    }
}

/// Everything a scene constructor needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneInit {
    /// Seed for the scene's private random stream.
    pub seed: u64,
    /// Only read by the custom scene.
    pub custom: CustomSceneConfig,
}

impl SceneInit {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            custom: CustomSceneConfig::default(),
        }
    }
}
