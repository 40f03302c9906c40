//! Configuration loading and management.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exclude patterns (glob).
    #[serde(rename = "exclude")]
    pub exclude_patterns: Vec<String>,
    /// Cognitive complexity thresholds.
    pub cognitive: CognitiveConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_patterns: Vec::new(),
            cognitive: CognitiveConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Use this for explicit `--config`
    /// flags. Env vars with `COGMET_` prefix override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(crate::core::Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file_exact(path))
            .merge(Env::prefixed("COGMET_").split("__"))
            .extract()
            .map_err(|e| crate::core::Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration from a directory, looking for cogmet.toml or
    /// .cogmet/cogmet.toml.
    ///
    /// Missing files are silently skipped (defaults are used). Env vars
    /// with `COGMET_` prefix override file/default values.
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.join("cogmet.toml")))
            .merge(Toml::file(dir.join(".cogmet/cogmet.toml")))
            .merge(Env::prefixed("COGMET_").split("__"))
            .extract()
            .map_err(|e| crate::core::Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Default config file content, used by `cogmet init`.
    pub fn default_toml() -> &'static str {
        include_str!("default_config.toml")
    }
}

/// Cognitive complexity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CognitiveConfig {
    /// Score above which a function is reported.
    pub threshold: u32,
    /// Treat functions over the threshold as errors instead of warnings.
    pub error_on_exceed: bool,
}

impl Default for CognitiveConfig {
    fn default() -> Self {
        Self {
            threshold: 10,
            error_on_exceed: false,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format, used when `--format` is not passed.
    pub format: OutputFormat,
    /// Color output.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// Markdown format.
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.exclude_patterns.is_empty());
        assert_eq!(config.cognitive.threshold, 10);
        assert!(!config.cognitive.error_on_exceed);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.output.color);
    }

    #[test]
    fn test_from_file_missing_is_error() {
        let err = Config::from_file("/does/not/exist/cogmet.toml").unwrap_err();
        assert!(matches!(err, crate::core::Error::Config(_)));
    }

    #[test]
    fn test_load_default_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("cogmet.toml"),
            "exclude = [\"generated/**\"]\n\n[cognitive]\nthreshold = 15\nerror_on_exceed = true\n",
        )
        .unwrap();

        let config = Config::load_default(dir.path()).unwrap();
        assert_eq!(config.exclude_patterns, vec!["generated/**"]);
        assert_eq!(config.cognitive.threshold, 15);
        assert!(config.cognitive.error_on_exceed);
    }

    #[test]
    fn test_output_section_parses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("cogmet.toml"),
            "[output]\nformat = \"markdown\"\ncolor = false\n",
        )
        .unwrap();

        let config = Config::load_default(dir.path()).unwrap();
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(!config.output.color);
    }

    #[test]
    fn test_load_default_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_default(dir.path()).unwrap();
        assert_eq!(config.cognitive.threshold, 10);
    }

    #[test]
    fn test_default_toml_parses_to_defaults() {
        let parsed: Config = toml::from_str(Config::default_toml()).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.cognitive.threshold, defaults.cognitive.threshold);
        assert_eq!(
            parsed.cognitive.error_on_exceed,
            defaults.cognitive.error_on_exceed
        );
        assert_eq!(parsed.exclude_patterns, defaults.exclude_patterns);
    }
}
