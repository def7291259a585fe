//! Knowledge-hub topic categories and their badge styling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Gradient family used for a category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Ocean,
    Forest,
}

/// Icon shown in a category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryIcon {
    Recycle,
    CloudRain,
    Sprout,
    Droplets,
    Factory,
    Home,
    Users,
}

/// Visual treatment of a category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeStyle {
    pub palette: Palette,
    pub icon: CategoryIcon,
}

/// Topic an article is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicCategory {
    WaterReuse,
    Rainwater,
    Irrigation,
    Greywater,
    Industrial,
    Residential,
    Community,
}

impl TopicCategory {
    pub const ALL: [TopicCategory; 7] = [
        TopicCategory::WaterReuse,
        TopicCategory::Rainwater,
        TopicCategory::Irrigation,
        TopicCategory::Greywater,
        TopicCategory::Industrial,
        TopicCategory::Residential,
        TopicCategory::Community,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            TopicCategory::WaterReuse => "water-reuse",
            TopicCategory::Rainwater => "rainwater",
            TopicCategory::Irrigation => "irrigation",
            TopicCategory::Greywater => "greywater",
            TopicCategory::Industrial => "industrial",
            TopicCategory::Residential => "residential",
            TopicCategory::Community => "community",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TopicCategory::WaterReuse => "Water Reuse",
            TopicCategory::Rainwater => "Rainwater Harvesting",
            TopicCategory::Irrigation => "Efficient Irrigation",
            TopicCategory::Greywater => "Greywater Recycling",
            TopicCategory::Industrial => "Industrial Solutions",
            TopicCategory::Residential => "Residential Systems",
            TopicCategory::Community => "Community Projects",
        }
    }

    pub fn style(&self) -> BadgeStyle {
        let (palette, icon) = match self {
            TopicCategory::WaterReuse => (Palette::Forest, CategoryIcon::Recycle),
            TopicCategory::Rainwater => (Palette::Ocean, CategoryIcon::CloudRain),
            TopicCategory::Irrigation => (Palette::Forest, CategoryIcon::Sprout),
            TopicCategory::Greywater => (Palette::Ocean, CategoryIcon::Droplets),
            TopicCategory::Industrial => (Palette::Forest, CategoryIcon::Factory),
            TopicCategory::Residential => (Palette::Ocean, CategoryIcon::Home),
            TopicCategory::Community => (Palette::Forest, CategoryIcon::Users),
        };
        BadgeStyle { palette, icon }
    }
}

impl fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for TopicCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TopicCategory::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| ValidationError::invalid_format("category", format!("unknown category '{}'", s)))
    }
}
