//! Configuration for the settlement engine

use serde::{Deserialize, Serialize};

use crate::quantize::MAX_DECIMAL_PLACES;

/// What to do when creditor and debtor totals differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImbalancePolicy {
    /// Settle what can be matched and report the residual
    #[default]
    Report,
    /// Refuse to settle
    Reject,
}

impl std::str::FromStr for ImbalancePolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "reject" => Ok(Self::Reject),
            other => Err(crate::Error::Config(format!(
                "Unknown imbalance policy: {}",
                other
            ))),
        }
    }
}

/// Settlement engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Decimal places of the currency (2 = cents)
    pub decimal_places: u32,

    /// Largest group accepted in one call
    pub max_members: usize,

    /// Handling of inputs that do not net to zero
    pub imbalance_policy: ImbalancePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            max_members: 100_000,
            imbalance_policy: ImbalancePolicy::Report,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(places) = std::env::var("SETTLEMENT_DECIMAL_PLACES") {
            config.decimal_places = places.parse().map_err(|e| {
                crate::Error::Config(format!("SETTLEMENT_DECIMAL_PLACES: {}", e))
            })?;
        }

        if let Ok(max) = std::env::var("SETTLEMENT_MAX_MEMBERS") {
            config.max_members = max
                .parse()
                .map_err(|e| crate::Error::Config(format!("SETTLEMENT_MAX_MEMBERS: {}", e)))?;
        }

        if let Ok(policy) = std::env::var("SETTLEMENT_IMBALANCE_POLICY") {
            config.imbalance_policy = policy.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> crate::Result<()> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(crate::Error::Config(format!(
                "decimal_places must be at most {}",
                MAX_DECIMAL_PLACES
            )));
        }

        if self.max_members == 0 {
            return Err(crate::Error::Config(
                "max_members must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
