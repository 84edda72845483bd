//! Configuration loading and representation.
//!
//! Values come from the environment; the CLI may override them afterwards.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use cambio_exchange::PostingSettings;

pub const DATA_DIR_VAR: &str = "CAMBIO_DATA_DIR";
pub const RATE_TOLERANCE_VAR: &str = "CAMBIO_RATE_TOLERANCE";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid decimal: {value}")]
    InvalidDecimal { var: &'static str, value: String },

    #[error("{var} cannot be negative: {value}")]
    Negative { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    /// Directory holding the persisted JSON documents.
    pub data_dir: PathBuf,
    /// See [`PostingSettings::rate_tolerance`].
    pub rate_tolerance: Decimal,
    pub log_filter: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            rate_tolerance: PostingSettings::default().rate_tolerance,
            log_filter: "info".to_string(),
        }
    }
}

impl DeskConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source (tests pass a closure over a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(RATE_TOLERANCE_VAR) {
            let value = Decimal::from_str(raw.trim()).map_err(|_| ConfigError::InvalidDecimal {
                var: RATE_TOLERANCE_VAR,
                value: raw.clone(),
            })?;
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ConfigError::Negative {
                    var: RATE_TOLERANCE_VAR,
                    value: raw,
                });
            }
            config.rate_tolerance = value;
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn posting_settings(&self) -> PostingSettings {
        PostingSettings {
            rate_tolerance: self.rate_tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = DeskConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DeskConfig::default());
        assert_eq!(config.rate_tolerance, dec!(0.01));
    }

    #[test]
    fn reads_every_variable() {
        let config = DeskConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/var/lib/cambio"),
            (RATE_TOLERANCE_VAR, "0.5"),
            (LOG_FILTER_VAR, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/cambio"));
        assert_eq!(config.posting_settings().rate_tolerance, dec!(0.5));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn bad_tolerance_is_reported() {
        let err = DeskConfig::from_lookup(lookup(&[(RATE_TOLERANCE_VAR, "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDecimal { .. }));

        let err = DeskConfig::from_lookup(lookup(&[(RATE_TOLERANCE_VAR, "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Negative { .. }));
    }
}
