use std::path::Path;

use tracing::warn;

use crate::ai::Difficulty;
use crate::error::ConfigError;

/// Minimax plies per difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MinimaxTiers {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl Default for MinimaxTiers {
    fn default() -> Self {
        MinimaxTiers {
            easy: Difficulty::Easy.search_depth(),
            medium: Difficulty::Medium.search_depth(),
            hard: Difficulty::Hard.search_depth(),
        }
    }
}

impl MinimaxTiers {
    pub fn depth(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Total Monte Carlo rollouts per difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MonteCarloTiers {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl Default for MonteCarloTiers {
    fn default() -> Self {
        MonteCarloTiers {
            easy: Difficulty::Easy.simulation_budget(),
            medium: Difficulty::Medium.simulation_budget(),
            hard: Difficulty::Hard.simulation_budget(),
        }
    }
}

impl MonteCarloTiers {
    pub fn budget(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Engine configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seeds every Monte Carlo engine built by the factory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub minimax: MinimaxTiers,
    pub monte_carlo: MonteCarloTiers,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let depths = [
            ("easy", self.minimax.easy),
            ("medium", self.minimax.medium),
            ("hard", self.minimax.hard),
        ];
        for (tier, depth) in depths {
            if depth == 0 {
                return Err(ConfigError::Validation(format!(
                    "minimax.{tier} must be >= 1"
                )));
            }
        }

        let budgets = [
            ("easy", self.monte_carlo.easy),
            ("medium", self.monte_carlo.medium),
            ("hard", self.monte_carlo.hard),
        ];
        // One rollout per column on an empty board
        for (tier, budget) in budgets {
            if budget < crate::game::COLS {
                return Err(ConfigError::Validation(format!(
                    "monte_carlo.{tier} must be >= {}",
                    crate::game::COLS
                )));
            }
        }

        if !(self.minimax.easy <= self.minimax.medium && self.minimax.medium <= self.minimax.hard) {
            return Err(ConfigError::Validation(
                "minimax tiers must satisfy easy <= medium <= hard".into(),
            ));
        }
        if !(self.monte_carlo.easy <= self.monte_carlo.medium
            && self.monte_carlo.medium <= self.monte_carlo.hard)
        {
            return Err(ConfigError::Validation(
                "monte_carlo tiers must satisfy easy <= medium <= hard".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_defaults_match_difficulty_tiers() {
        let config = EngineConfig::default();
        for difficulty in Difficulty::ALL {
            assert_eq!(config.minimax.depth(difficulty), difficulty.search_depth());
            assert_eq!(config.monte_carlo.budget(difficulty), difficulty.simulation_budget());
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[minimax]
hard = 9
"#;
        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.minimax.hard, 9);
        // Other fields should be defaults
        assert_eq!(config.minimax.easy, 3);
        assert_eq!(config.monte_carlo.medium, 5_000);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = EngineConfig::default();
        config.minimax.easy = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_tiny_budget() {
        let mut config = EngineConfig::default();
        config.monte_carlo.easy = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_decreasing_tiers() {
        let mut config = EngineConfig::default();
        config.minimax.medium = 8;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.monte_carlo.hard = 2_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = EngineConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
seed = 42

[monte_carlo]
easy = 700
"#
        )
        .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.monte_carlo.easy, 700);
        // Others are defaults
        assert_eq!(config.minimax, MinimaxTiers::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "[minimax]\neasy = 0\n").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "seed = \"abc\"\n").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = EngineConfig::default_toml().unwrap();
        let config: EngineConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, EngineConfig::default());
    }
}
