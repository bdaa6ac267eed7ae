use piiscrub_pii::DetectorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanStyle {
    /// `True` / `False`
    #[default]
    Title,
    /// `true` / `false`
    Lower,
}

impl BooleanStyle {
    pub fn render(self, value: bool) -> &'static str {
        match (self, value) {
            (BooleanStyle::Title, true) => "True",
            (BooleanStyle::Title, false) => "False",
            (BooleanStyle::Lower, true) => "true",
            (BooleanStyle::Lower, false) => "false",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output_format: OutputFormatConfig,

    #[serde(default)]
    pub detector: DetectorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFormatConfig {
    /// Escape non-ASCII characters in the JSON column as `\uXXXX`
    #[serde(default = "default_true")]
    pub ensure_ascii: bool,

    #[serde(default)]
    pub boolean_style: BooleanStyle,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            logging: LoggingConfig::default(),
            output_format: OutputFormatConfig::default(),
            detector: DetectorConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for OutputFormatConfig {
    fn default() -> Self {
        Self {
            ensure_ascii: true,
            boolean_style: BooleanStyle::default(),
        }
    }
}

impl ScanConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("PIISCRUB_INPUT") {
            self.input = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("PIISCRUB_OUTPUT") {
            self.output = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("PIISCRUB_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("PIISCRUB_ENSURE_ASCII") {
            match val.parse::<bool>() {
                Ok(enabled) => self.output_format.ensure_ascii = enabled,
                Err(_) => eprintln!(
                    "Warning: Invalid PIISCRUB_ENSURE_ASCII '{}', keeping {}",
                    val, self.output_format.ensure_ascii
                ),
            }
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("iscp_pii_dataset_-_Sheet1.csv")
}

fn default_output() -> PathBuf {
    PathBuf::from("redacted_output.csv")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
