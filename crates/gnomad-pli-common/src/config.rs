//! Configuration loading for gnomad-pli.
//! Reads gnomad-pli.toml from the current directory or the path in the GNOMAD_PLI_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PliError, Result};

/// Env var naming an alternate config file.
pub const CONFIG_ENV: &str = "GNOMAD_PLI_CONFIG";

/// Env var naming an alternate values file.
pub const VALUES_ENV: &str = "GNOMAD_PLI_VALUES";

pub const DEFAULT_CONFIG_FILE: &str = "gnomad-pli.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PliConfig {
    /// Alternate gene constraint values file
    #[serde(default)]
    pub values_file: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_log_filter() -> String { "info".to_string() }

impl Default for PliConfig {
    fn default() -> Self {
        Self {
            values_file: None,
            log_filter: default_log_filter(),
            output_format: OutputFormat::default(),
        }
    }
}

/// How annotated transcripts are written by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per transcript
    #[default]
    Json,
    /// `transcript_id<TAB>key=value;key=value`
    Vep,
}

impl PliConfig {
    /// Load configuration from gnomad-pli.toml.
    /// Checks GNOMAD_PLI_CONFIG env var first, then current directory.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        if !Path::new(&path).exists() {
            debug!("No config file at {}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| PliError::ConfigFile(format!("{}: {}", path.display(), e)))
    }

    /// Pick the values file to load: an explicit parameter wins, then the
    /// config file, then the GNOMAD_PLI_VALUES env var.
    pub fn values_file_override(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.values_file.clone())
            .or_else(|| {
                std::env::var_os(VALUES_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PliConfig = toml::from_str("").unwrap();
        assert_eq!(config.values_file, None);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "values_file = \"/data/gnomADpLI_values.txt\"").unwrap();
        writeln!(file, "output_format = \"vep\"").unwrap();

        let config = PliConfig::load_from(file.path()).unwrap();
        assert_eq!(
            config.values_file,
            Some(PathBuf::from("/data/gnomADpLI_values.txt"))
        );
        assert_eq!(config.output_format, OutputFormat::Vep);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_format = \"xml\"").unwrap();

        let err = PliConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, PliError::ConfigFile(_)));
    }

    #[test]
    fn test_missing_config_named_by_env_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        std::env::set_var(CONFIG_ENV, &missing);

        let config = PliConfig::load();
        std::env::remove_var(CONFIG_ENV);

        let config = config.unwrap();
        assert_eq!(config.values_file, None);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_explicit_values_file_wins() {
        let config = PliConfig {
            values_file: Some(PathBuf::from("from_config.txt")),
            ..Default::default()
        };
        let picked = config.values_file_override(Some(Path::new("explicit.txt")));
        assert_eq!(picked, Some(PathBuf::from("explicit.txt")));

        let picked = config.values_file_override(None);
        assert_eq!(picked, Some(PathBuf::from("from_config.txt")));
    }
}
