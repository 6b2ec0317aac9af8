use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Looked for in the working directory; absence is fine.
pub const DEFAULT_CONFIG_PATH: &str = "coffee-compass.json";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Optional JSON configuration. Every field has a default carrying the
/// original product values, so a partial (or missing) file always works.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset loaded at startup when the file exists.
    pub dataset_path: PathBuf,
    /// Appended to display names when building maps-search links.
    pub city_name: String,
    /// [latitude, longitude] the map stays anchored on.
    pub map_center: [f64; 2],
    /// Profile whose avatar decorates the sidebar.
    pub github_username: String,
    /// How many ranked shops the detail list shows.
    pub display_count: usize,
    pub min_rating_default: f64,
    pub min_reviews_default: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            dataset_path: PathBuf::from("data/coffee_shop_scores_final.csv"),
            city_name: "Yogyakarta".to_string(),
            map_center: [-7.7956, 110.3695],
            github_username: "ricardoaugusto31".to_string(),
            display_count: 10,
            min_rating_default: 4.5,
            min_reviews_default: 50,
        }
    }
}

impl AppConfig {
    /// Load the configuration, falling back to defaults when the file is
    /// missing or malformed. Never fatal.
    pub fn load(path: &Path) -> AppConfig {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return AppConfig::default();
        }
        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring config {}: {e:#}", path.display());
                AppConfig::default()
            }
        }
    }

    fn read(path: &Path) -> Result<AppConfig> {
        let text = std::fs::read_to_string(path).context("reading config file")?;
        serde_json::from_str(&text).context("parsing config JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load(Path::new("definitely/not/here.json"));
        assert_eq!(config.city_name, "Yogyakarta");
        assert_eq!(config.display_count, 10);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(br#"{"city_name": "Bandung", "display_count": 5}"#)
            .unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.city_name, "Bandung");
        assert_eq!(config.display_count, 5);
        assert_eq!(config.min_reviews_default, 50);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"{not json").unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.city_name, "Yogyakarta");
    }
}
