//! Configuration for seeding, ingestion and display settings.
//!
//! Load order: `.medgraph/config.toml` → environment variables → defaults.

use crate::error::ValidationError;
use crate::graph::Category;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const CONFIG_DIR: &str = ".medgraph";
const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedGraphConfig {
    pub seed: SeedConfig,
    pub ingest: IngestConfig,
    pub display: DisplayConfig,
}

/// Startup seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Load the demonstration dataset into a fresh graph.
    pub demo: bool,
}

/// Bulk ingestion behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Skip malformed records and keep going (true) or stop at the first one.
    pub skip_malformed: bool,
}

/// Visualization colours.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colour for `unknown` nodes.
    pub default_color: String,
    /// Category name -> `#RRGGBB` overrides of the built-in palette.
    ///
    /// Example:
    /// [display.colors]
    /// disease = "#B22222"
    pub colors: BTreeMap<String, String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { demo: true }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            skip_malformed: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_color: "#808080".to_string(),
            colors: BTreeMap::new(),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

/// `#RRGGBB`
fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl MedGraphConfig {
    /// Load config from `.medgraph/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_DIR).join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("MEDGRAPH_SEED_DEMO", &mut config.seed.demo);
        env_override(
            "MEDGRAPH_SKIP_MALFORMED",
            &mut config.ingest.skip_malformed,
        );
        env_override(
            "MEDGRAPH_DEFAULT_COLOR",
            &mut config.display.default_color,
        );

        config.validate()?;
        Ok(config)
    }

    /// Normalize colour keys to lowercase and check every colour value.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let colors = std::mem::take(&mut self.display.colors);
        let mut normalized = BTreeMap::new();
        for (key, color) in colors {
            let key = key.trim().to_lowercase();
            let category: Category = key.parse().map_err(|_| {
                ValidationError::InvalidConfig(format!("unknown colour key `{key}`"))
            })?;
            if !category.is_concrete() {
                return Err(ValidationError::InvalidConfig(
                    "`unknown` nodes use display.default_color".to_string(),
                ));
            }
            if !is_hex_color(&color) {
                return Err(ValidationError::InvalidConfig(format!(
                    "colour for `{key}` must be #RRGGBB, got `{color}`"
                )));
            }
            normalized.insert(key, color);
        }
        self.display.colors = normalized;

        if !is_hex_color(&self.display.default_color) {
            return Err(ValidationError::InvalidConfig(format!(
                "display.default_color must be #RRGGBB, got `{}`",
                self.display.default_color
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MedGraphConfig::default();
        assert!(config.seed.demo);
        assert!(config.ingest.skip_malformed);
        assert_eq!(config.display.default_color, "#808080");
        assert!(config.display.colors.is_empty());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r##"
[seed]
demo = false

[display.colors]
disease = "#B22222"
"##;
        let config: MedGraphConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.seed.demo);
        assert_eq!(
            config.display.colors.get("disease"),
            Some(&"#B22222".to_string())
        );
        // Defaults for unspecified fields
        assert!(config.ingest.skip_malformed);
        assert_eq!(config.display.default_color, "#808080");
    }

    #[test]
    fn test_config_load_nonexistent() {
        let config = MedGraphConfig::load(Path::new("/nonexistent/path")).unwrap();
        assert!(config.ingest.skip_malformed);
    }

    #[test]
    fn test_load_normalizes_color_keys_to_lowercase() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(CONFIG_FILE),
            r##"
[display.colors]
Specialist = "#00FF00"
"##,
        )
        .unwrap();

        let config = MedGraphConfig::load(tmp.path()).unwrap();
        assert_eq!(
            config.display.colors.get("specialist"),
            Some(&"#00FF00".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_bad_colors() {
        let mut config = MedGraphConfig::default();
        config
            .display
            .colors
            .insert("organ".to_string(), "#000000".to_string());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidConfig(_))
        ));

        let mut config = MedGraphConfig::default();
        config
            .display
            .colors
            .insert("symptom".to_string(), "gold".to_string());
        assert!(config.validate().is_err());

        let mut config = MedGraphConfig::default();
        config
            .display
            .colors
            .insert("unknown".to_string(), "#000000".to_string());
        assert!(config.validate().is_err());
    }
}
