use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Slowest selectable step rate (steps per base interval)
pub const MIN_STEP_RATE: u32 = 1;
/// Fastest selectable step rate
pub const MAX_STEP_RATE: u32 = 10;
/// Largest grid accepted, in cells
pub const MAX_GRID_CELLS: usize = 1_000_000;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 2x2, got {rows}x{cols}")]
    GridTooSmall { rows: usize, cols: usize },
    #[error("grid of {rows}x{cols} exceeds the limit of 1000000 cells")]
    GridTooLarge { rows: usize, cols: usize },
    #[error("step rate must be within 1..=10, got {0}")]
    StepRateOutOfRange(u32),
    #[error("base step interval must be positive")]
    ZeroBaseInterval,
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Tick interval at step rate 1, in milliseconds
    pub base_step_millis: u64,
    /// Step rate; the tick interval is `base_step_millis / step_rate`
    pub step_rate: u32,
    /// Whether the grid edges wrap around
    pub wraparound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cols: 30,
            base_step_millis: 1000,
            step_rate: MIN_STEP_RATE,
            wraparound: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(ConfigError::GridTooSmall {
                rows: self.rows,
                cols: self.cols,
            });
        }
        // Also keeps each side well inside i32 for signed positions
        match self.rows.checked_mul(self.cols) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(ConfigError::GridTooLarge {
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        if !(MIN_STEP_RATE..=MAX_STEP_RATE).contains(&self.step_rate) {
            return Err(ConfigError::StepRateOutOfRange(self.step_rate));
        }
        if self.base_step_millis == 0 {
            return Err(ConfigError::ZeroBaseInterval);
        }
        Ok(())
    }

    /// Tick interval for the configured step rate (integer milliseconds)
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.base_step_millis / u64::from(self.step_rate.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.rows, 30);
        assert_eq!(config.cols, 30);
        assert_eq!(config.base_step_millis, 1000);
        assert_eq!(config.step_rate, 1);
        assert!(!config.wraparound);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_step_interval() {
        let mut config = GameConfig::default();
        assert_eq!(config.step_interval(), Duration::from_millis(1000));

        config.step_rate = 3;
        assert_eq!(config.step_interval(), Duration::from_millis(333));

        config.step_rate = 10;
        assert_eq!(config.step_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            GameConfig::new(1, 30).validate(),
            Err(ConfigError::GridTooSmall { rows: 1, cols: 30 })
        ));

        assert!(GameConfig::new(1000, 1000).validate().is_ok());
        assert!(matches!(
            GameConfig::new(1000, 1001).validate(),
            Err(ConfigError::GridTooLarge { rows: 1000, cols: 1001 })
        ));
        assert!(matches!(
            GameConfig::new(1 << 33, 1 << 33).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
        assert!(matches!(
            GameConfig::new(2, usize::MAX).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));

        let config = GameConfig {
            step_rate: 11,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StepRateOutOfRange(11))
        ));

        let config = GameConfig {
            base_step_millis: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroBaseInterval)
        ));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rows": 12, "wraparound": true }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 30);
        assert!(config.wraparound);
    }

    #[test]
    fn test_load_rejects_oversized_grid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rows": 100000, "cols": 100000 }}"#).unwrap();
        assert!(matches!(
            GameConfig::from_json_file(file.path()),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "step_rate": 0 }}"#).unwrap();
        assert!(matches!(
            GameConfig::from_json_file(file.path()),
            Err(ConfigError::StepRateOutOfRange(0))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            GameConfig::from_json_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
