//! Console configuration management.
//!
//! Layers a JSON config file, `SET_*` environment variables and command-line
//! overrides, in that order, on top of the game defaults.

use set_game::{GameConfig, GameError};
use std::path::{Path, PathBuf};

/// Command-line values taking precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub humans: Option<usize>,
    pub computers: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub seed: Option<u64>,
}

/// Complete console configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub game: GameConfig,
}

impl CliConfig {
    /// Load configuration from the config file, environment and overrides
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be read or parsed, or if the
    /// resulting game configuration is invalid
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let config_path = overrides
            .config_path
            .or_else(|| std::env::var("SET_CONFIG").ok().map(PathBuf::from));
        let mut game = match config_path {
            Some(path) => load_file(&path)?,
            None => GameConfig::default(),
        };

        // Grid and deck
        game.rows = parse_env_or("SET_ROWS", game.rows);
        game.columns = parse_env_or("SET_COLUMNS", game.columns);
        game.deck_size = parse_env_or("SET_DECK_SIZE", game.deck_size);
        game.features = parse_env_or("SET_FEATURES", game.features);
        game.feature_size = parse_env_or("SET_FEATURE_SIZE", game.feature_size);

        // Players
        game.human_players = overrides
            .humans
            .unwrap_or_else(|| parse_env_or("SET_HUMANS", game.human_players));
        game.computer_players = overrides
            .computers
            .unwrap_or_else(|| parse_env_or("SET_COMPUTERS", game.computer_players));
        game.computer_press_interval_ms =
            parse_env_or("SET_COMPUTER_INTERVAL_MS", game.computer_press_interval_ms);

        // Timing
        game.turn_timeout_ms = overrides
            .timeout_ms
            .unwrap_or_else(|| parse_env_or("SET_TIMEOUT_MS", game.turn_timeout_ms));
        game.turn_timeout_warning_ms = parse_env_or("SET_WARNING_MS", game.turn_timeout_warning_ms);
        game.point_freeze_ms = parse_env_or("SET_POINT_FREEZE_MS", game.point_freeze_ms);
        game.penalty_freeze_ms = parse_env_or("SET_PENALTY_FREEZE_MS", game.penalty_freeze_ms);

        game.seed = overrides.seed.or_else(|| {
            std::env::var("SET_SEED")
                .ok()
                .and_then(|v| v.parse().ok())
                .or(game.seed)
        });

        let config = CliConfig { game };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.player_count() == 0 {
            return Err(ConfigError::Invalid {
                var: "SET_HUMANS/SET_COMPUTERS".to_string(),
                reason: "At least one human or computer player is required".to_string(),
            });
        }

        self.game.validate()?;
        Ok(())
    }
}

fn load_file(path: &Path) -> Result<GameConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
