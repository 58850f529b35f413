// Configuration module for reading Snake.toml
// Every tunable constant of the decision engine lives here

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub strategy: StrategyConfig,
    pub search: SearchConfig,
    pub hazard: HazardConfig,
    pub duel: DuelConfig,
    pub game_rules: GameRulesConfig,
    pub debug: DebugConfig,
}

/// Response time budget, used to flag slow decisions
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub response_time_budget_ms: u64,
    pub network_overhead_ms: u64,
}

impl TimingConfig {
    /// Computes the effective computation budget
    pub fn effective_budget_ms(&self) -> u64 {
        self.response_time_budget_ms.saturating_sub(self.network_overhead_ms)
    }
}

/// Strategy selection constants
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    /// Live snake count at which the duel solver replaces the heuristic chain
    pub duel_snake_count: usize,
}

/// Flood fill horizon and trap threshold
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub flood_fill_horizon: i32,
    pub min_free_spaces: usize,
}

/// Hazard escape and damage constants
#[derive(Debug, Deserialize, Clone)]
pub struct HazardConfig {
    pub health_threshold: i32,
    pub scan_radius: i32,
    pub damage_per_turn: i32,
}

/// Duel solver depth and evaluation weights
///
/// `length_advantage_bonus` plus the largest possible pressure reward must stay
/// below `cramped_space_penalty`.
#[derive(Debug, Deserialize, Clone)]
pub struct DuelConfig {
    pub search_depth: u8,
    pub terminal_score: i32,
    pub length_advantage_bonus: i32,
    pub length_deficit_penalty: i32,
    pub pressure_weight: i32,
    pub food_proximity_weight: i32,
    pub space_weight: i32,
    pub cramped_space_penalty: i32,
}

/// Game rules constants
#[derive(Debug, Deserialize, Clone)]
pub struct GameRulesConfig {
    pub health_max: i32,
    pub health_loss_per_turn: i32,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                response_time_budget_ms: 400,
                network_overhead_ms: 50,
            },
            strategy: StrategyConfig { duel_snake_count: 2 },
            search: SearchConfig {
                flood_fill_horizon: 5,
                min_free_spaces: 6,
            },
            hazard: HazardConfig {
                health_threshold: 60,
                scan_radius: 2,
                damage_per_turn: 15,
            },
            duel: DuelConfig {
                search_depth: 4,
                terminal_score: 999,
                length_advantage_bonus: 100,
                length_deficit_penalty: 100,
                pressure_weight: 5,
                food_proximity_weight: 5,
                space_weight: 2,
                cramped_space_penalty: 300,
            },
            game_rules: GameRulesConfig {
                health_max: 100,
                health_loss_per_turn: 1,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "ninemo_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
