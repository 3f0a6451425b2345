//! Settings loaded from an optional TOML file.
//!
//! ```toml
//! tolerance = 1e-6
//! epsilon = 1e-8
//! seed = 42
//! format = "json"
//! ```

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Convergence tolerance for `minimize`
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Pivot threshold for decompositions
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Iteration cap for `minimize`; the algorithm's own default when unset
    pub max_iterations: Option<u32>,

    /// Seed for randomized algorithms; entropy when unset
    pub seed: Option<u64>,

    /// Output format when `--format` is not given
    pub format: Option<OutputFormat>,
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_epsilon() -> f64 {
    1e-8
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            epsilon: default_epsilon(),
            max_iterations: None,
            seed: None,
            format: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> CliResult<()> {
        if !(self.tolerance > 0.0) {
            return Err(CliError::Config("tolerance must be positive".into()));
        }
        if !(self.epsilon > 0.0) {
            return Err(CliError::Config("epsilon must be positive".into()));
        }
        Ok(())
    }

    /// Random generator for this run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let settings: Settings = toml::from_str("seed = 7").unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tolerance, 1e-6);
        assert_eq!(settings.epsilon, 1e-8);
        assert_eq!(settings.format, None);
    }

    #[test]
    fn test_format_parsed() {
        let settings: Settings = toml::from_str("format = \"csv\"").unwrap();
        assert_eq!(settings.format, Some(OutputFormat::Csv));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<Settings>("colour = true").is_err());
    }

    #[test]
    fn test_validation() {
        let settings = Settings {
            tolerance: 0.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
