use crate::error::{MilkbarError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 10.0;
const DEFAULT_CURRENCY: &str = "Ksh";

/// Configuration for milkbar, stored as config.json beside the data file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MilkbarConfig {
    /// Stock level below which a product shows up in the low-stock report
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: f64,

    /// Display label for monetary amounts (single local currency)
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_low_stock_threshold() -> f64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for MilkbarConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl MilkbarConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(MilkbarError::Io)?;
        let config: MilkbarConfig =
            serde_json::from_str(&content).map_err(MilkbarError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(MilkbarError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(MilkbarError::Serialization)?;
        fs::write(config_path, content).map_err(MilkbarError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "low-stock-threshold" => Some(format!("{}", self.low_stock_threshold)),
            "currency" => Some(self.currency.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "low-stock-threshold" => {
                let threshold: f64 = value
                    .parse()
                    .map_err(|_| format!("Invalid threshold: {}", value))?;
                if threshold < 0.0 {
                    return Err(format!("Threshold cannot be negative: {}", value));
                }
                self.low_stock_threshold = threshold;
                Ok(())
            }
            "currency" => {
                if value.trim().is_empty() {
                    return Err("Currency label cannot be empty".to_string());
                }
                self.currency = value.trim().to_string();
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}
