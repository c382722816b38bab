use crate::foundation::error::{MicrocosmError, MicrocosmResult};
use std::fmt;
use std::str::FromStr;

/// Closed set of selectable dioramas.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum SceneKind {
    Winter,
    Rain,
    Aquarium,
    Sakura,
    Carousel,
    Skyline,
    CatMouse,
    Birthday,
    Christmas,
    Wedding,
    Desert,
    CityNight,
    InkRiver,
    Bamboo,
    Jellyfish,
    Custom,
}

impl SceneKind {
    pub const ALL: [SceneKind; 16] = [
        Self::Winter,
        Self::Rain,
        Self::Aquarium,
        Self::Sakura,
        Self::Carousel,
        Self::Skyline,
        Self::CatMouse,
        Self::Birthday,
        Self::Christmas,
        Self::Wedding,
        Self::Desert,
        Self::CityNight,
        Self::InkRiver,
        Self::Bamboo,
        Self::Jellyfish,
        Self::Custom,
    ];

    /// Stable identifier used in file names and configuration.
    pub fn id(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Rain => "rain",
            Self::Aquarium => "fish",
            Self::Sakura => "sakura",
            Self::Carousel => "carousel",
            Self::Skyline => "shanghai",
            Self::CatMouse => "cat_mouse",
            Self::Birthday => "birthday",
            Self::Christmas => "christmas",
            Self::Wedding => "wedding",
            Self::Desert => "egypt",
            Self::CityNight => "city_night",
            Self::InkRiver => "fisherman",
            Self::Bamboo => "bamboo",
            Self::Jellyfish => "jellyfish",
            Self::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Winter => "Winter Village",
            Self::Rain => "Rain Forest",
            Self::Aquarium => "Aquarium",
            Self::Sakura => "Sakura Swing",
            Self::Carousel => "Carousel",
            Self::Skyline => "River Skyline",
            Self::CatMouse => "Cat & Mouse",
            Self::Birthday => "Birthday Cake",
            Self::Christmas => "Christmas Tree",
            Self::Wedding => "Wedding Arch",
            Self::Desert => "Desert Caravan",
            Self::CityNight => "City at Night",
            Self::InkRiver => "Ink River",
            Self::Bamboo => "Bamboo Grove",
            Self::Jellyfish => "Jellyfish Tank",
            Self::Custom => "DIY",
        }
    }

    /// Engraving shown when the caller does not supply one.
    pub fn default_engraving(self) -> &'static str {
        match self {
            Self::Christmas => "Merry Christmas",
            Self::Birthday => "Happy Birthday",
            Self::Skyline => "I Love Shanghai",
            Self::Wedding => "Forever Love",
            Self::Desert => "Ancient Sands",
            Self::CityNight => "City of Stars",
            Self::Carousel => "Dreamland",
            Self::InkRiver => "Inner Peace",
            Self::Bamboo => "Zen Garden",
            Self::Jellyfish => "Deep Ocean",
            Self::Custom => "My World",
            _ => "Magic World",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SceneKind {
    type Err = MicrocosmError;

    fn from_str(s: &str) -> MicrocosmResult<Self> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        if let Some(kind) = Self::ALL.into_iter().find(|k| k.id() == norm) {
            return Ok(kind);
        }
        let alias = match norm.as_str() {
            "aquarium" => Self::Aquarium,
            "skyline" => Self::Skyline,
            "desert" => Self::Desert,
            "ink_river" => Self::InkRiver,
            "catmouse" => Self::CatMouse,
            "citynight" => Self::CityNight,
            _ => {
                return Err(MicrocosmError::validation(format!(
                    "unknown scene \"{s}\" (expected one of: {})",
                    Self::ALL.map(Self::id).join(", ")
                )));
            }
        };
        Ok(alias)
    }
}

impl TryFrom<String> for SceneKind {
    type Error = MicrocosmError;

    fn try_from(s: String) -> MicrocosmResult<Self> {
        s.parse()
    }
}

impl From<SceneKind> for String {
    fn from(k: SceneKind) -> Self {
        k.id().to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/kind.rs"]
mod tests;
