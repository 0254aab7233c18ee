//! Settings file.
//!
//! A TOML file passed with `--config`. Every section and key is optional;
//! missing values fall back to the library defaults and command-line flags
//! override whatever the file sets.
//!
//! ```toml
//! [normalization]
//! remove_legal = true
//! transliterate = true
//!
//! [matching]
//! reject_threshold = 60.0
//! sample_size = 500
//!
//! [ingest]
//! encodings = ["utf-8", "windows-1251"]
//!
//! [report]
//! filter = "needs-review"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use xmatch_ingest::IngestOptions;
use xmatch_map::MatchingConfig;
use xmatch_normalization::NormalizationOptions;
use xmatch_report::ExportFilter;

/// Everything a settings file can configure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub normalization: NormalizationOptions,
    pub matching: MatchingConfig,
    pub ingest: IngestOptions,
    pub report: ReportSettings,
}

/// Report defaults. Source labels come from the column selection, not the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub filter: ExportFilter,
    pub include_statistics: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            filter: ExportFilter::All,
            include_statistics: true,
        }
    }
}

/// Parse settings from TOML text.
pub fn parse_settings(text: &str) -> Result<Settings> {
    toml::from_str(text).context("invalid settings")
}

/// Read settings from `path`, or defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        debug!("no settings file, using defaults");
        return Ok(Settings::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read settings file {}", path.display()))?;
    let settings =
        parse_settings(&text).with_context(|| format!("parse settings file {}", path.display()))?;
    info!(path = %path.display(), "settings loaded");
    Ok(settings)
}

/// Write settings as pretty-printed TOML.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let text = toml::to_string_pretty(settings).context("serialize settings")?;
    fs::write(path, text).with_context(|| format!("write settings file {}", path.display()))?;
    info!(path = %path.display(), "settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.normalization.remove_punctuation);
        assert!(settings.report.include_statistics);
    }

    #[test]
    fn test_partial_sections() {
        let settings = parse_settings(
            r#"
            [normalization]
            remove_legal = true

            [matching]
            reject_threshold = 60.0

            [report]
            filter = "needs-review"
            "#,
        )
        .unwrap();

        assert!(settings.normalization.remove_legal);
        assert!(settings.normalization.remove_punctuation);
        assert_eq!(settings.matching.reject_threshold, 60.0);
        assert_eq!(settings.matching.sample_size, 200);
        assert_eq!(settings.report.filter, ExportFilter::NeedsReview);
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        let err = parse_settings("[report]\nfilter = \"sometimes\"").unwrap_err();
        assert!(err.to_string().contains("invalid settings"));
    }
}
