//! Configuration file support.
//!
//! Reads optimizer defaults and revenue-adjustment settings from a
//! `tourcast.toml` file. Every field has a default, so an empty file (or no
//! file at all, via [`TourcastConfig::default`]) yields a working
//! configuration.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourcastConfig {
    #[serde(default)]
    pub optimizer: OptimizerSettings,
    #[serde(default)]
    pub adjuster: AdjusterSettings,
}

/// Default knobs for optimization requests that don't carry their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerSettings {
    #[serde(default = "default_cost_per_km")]
    pub cost_per_km: Decimal,
    #[serde(default = "default_weight")]
    pub distance_weight: f64,
    #[serde(default = "default_weight")]
    pub revenue_weight: f64,
    #[serde(default = "default_min_gap_days")]
    pub min_gap_days: i64,
    #[serde(default = "default_travel_speed")]
    pub travel_speed_km_per_day: f64,
}

/// Settings for the chat-completion revenue adjuster.
///
/// The API key itself never lives in the file — only the name of the
/// environment variable holding it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjusterSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_cost_per_km() -> Decimal {
    Decimal::new(200, 2)
}

fn default_weight() -> f64 {
    1.0
}

fn default_min_gap_days() -> i64 {
    1
}

fn default_travel_speed() -> f64 {
    500.0
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f64 {
    0.2
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            cost_per_km: default_cost_per_km(),
            distance_weight: default_weight(),
            revenue_weight: default_weight(),
            min_gap_days: default_min_gap_days(),
            travel_speed_km_per_day: default_travel_speed(),
        }
    }
}

impl Default for AdjusterSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl From<&OptimizerSettings> for crate::models::PlanConstraints {
    /// Turns configured defaults into plan constraints for a new plan.
    fn from(settings: &OptimizerSettings) -> Self {
        Self {
            start_venue_id: None,
            cost_per_km: settings.cost_per_km,
            distance_weight: settings.distance_weight,
            revenue_weight: settings.revenue_weight,
            min_gap_days: settings.min_gap_days,
            travel_speed_km_per_day: Some(settings.travel_speed_km_per_day),
        }
    }
}

impl TourcastConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.as_ref().display()))
    }

    /// Load configuration from the first `tourcast.toml` found in the
    /// current directory or its parent; defaults when neither exists.
    pub fn from_default_location() -> Result<Self> {
        let search_paths = [
            PathBuf::from("tourcast.toml"),
            PathBuf::from("../tourcast.toml"),
        ];
        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }
}
