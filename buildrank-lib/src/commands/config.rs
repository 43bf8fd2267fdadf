use crate::Result;
use crate::corpus::Layout;
use crate::coverage::CompletionWeights;
use crate::metrics::Detection;
use crate::scoring::WeightVector;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::sync::LazyLock;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the base directory
pub const CONFIG_FILE_NAME: &str = "buildrank.toml";

static DEFAULT_CONFIG: LazyLock<Config> = LazyLock::new(|| {
    toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
});

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Conventional names inside each entity folder
    #[serde(default)]
    pub layout: Layout,

    /// Weighted sum model parameters
    #[serde(default)]
    pub scoring: Scoring,

    /// Markers used to classify parameters
    #[serde(default)]
    pub detection: Detection,

    /// Completion weight per step type for the coverage table
    #[serde(default)]
    pub completion_weights: CompletionWeights,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Scoring {
    /// Smoothing term of the normalization, strictly positive
    pub epsilon: f64,

    /// Raw weight per metric key, normalized before use
    pub weights: IndexMap<String, f64>,
}

impl Default for Scoring {
    fn default() -> Self {
        DEFAULT_CONFIG.scoring.clone()
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading buildrank configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading buildrank configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// The normalized weight vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the weights table names an unknown metric, misses one, or holds invalid values
    pub fn weights(&self) -> Result<WeightVector> {
        WeightVector::from_table(&self.scoring.weights)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range
    pub fn validate(&self) -> Result<()> {
        if !self.scoring.epsilon.is_finite() || self.scoring.epsilon <= 0.0 {
            return Err(app_err!("scoring.epsilon must be a finite number greater than 0, got {}", self.scoring.epsilon));
        }

        let _ = self.weights()?;
        self.completion_weights.validate()?;

        let layout = [
            ("config_dir", &self.layout.config_dir),
            ("project_descriptor", &self.layout.project_descriptor),
            ("plugin_data_dir", &self.layout.plugin_data_dir),
            ("extension", &self.layout.extension),
        ];

        for (name, value) in layout {
            if value.trim().is_empty() {
                return Err(app_err!("layout.{name} must not be empty"));
            }
        }

        if self.detection.docker_image_param.trim().is_empty() {
            return Err(app_err!("detection.docker_image_param must not be empty"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}
