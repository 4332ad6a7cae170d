//! Category → display colour table, kept apart from the data model.

use medgraph_core::config::DisplayConfig;
use medgraph_core::graph::Category;
use std::collections::HashMap;

pub const SYMPTOM_COLOR: &str = "#FFD700";
pub const DISEASE_COLOR: &str = "#DC143C";
pub const TREATMENT_COLOR: &str = "#4682B4";
pub const SPECIALIST_COLOR: &str = "#32CD32";
/// Neutral grey for `unknown` nodes.
pub const DEFAULT_COLOR: &str = "#808080";

#[derive(Debug, Clone)]
pub struct Palette {
    colors: HashMap<Category, String>,
    default_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        let colors = [
            (Category::Symptom, SYMPTOM_COLOR),
            (Category::Disease, DISEASE_COLOR),
            (Category::Treatment, TREATMENT_COLOR),
            (Category::Specialist, SPECIALIST_COLOR),
        ]
        .into_iter()
        .map(|(c, hex)| (c, hex.to_string()))
        .collect();
        Self {
            colors,
            default_color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl Palette {
    /// Built-in palette with the configured overrides applied.
    ///
    /// Keys that do not name a concrete category are ignored; config loading
    /// has already rejected them.
    pub fn from_config(display: &DisplayConfig) -> Self {
        let mut palette = Self {
            default_color: display.default_color.clone(),
            ..Self::default()
        };
        for (key, color) in &display.colors {
            if let Ok(category) = key.parse::<Category>()
                && category.is_concrete()
            {
                palette.colors.insert(category, color.clone());
            }
        }
        palette
    }

    pub fn color(&self, category: Category) -> &str {
        self.colors
            .get(&category)
            .map_or(self.default_color.as_str(), String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.color(Category::Symptom), "#FFD700");
        assert_eq!(palette.color(Category::Disease), "#DC143C");
        assert_eq!(palette.color(Category::Treatment), "#4682B4");
        assert_eq!(palette.color(Category::Specialist), "#32CD32");
        assert_eq!(palette.color(Category::Unknown), "#808080");
    }

    #[test]
    fn test_config_overrides() {
        let mut display = DisplayConfig::default();
        display
            .colors
            .insert("disease".to_string(), "#B22222".to_string());
        display.default_color = "#000000".to_string();

        let palette = Palette::from_config(&display);
        assert_eq!(palette.color(Category::Disease), "#B22222");
        assert_eq!(palette.color(Category::Symptom), "#FFD700");
        assert_eq!(palette.color(Category::Unknown), "#000000");
    }
}
