//! Runtime configuration for the command-line front end.
//!
//! Values come from the environment (a `.env` file is loaded first by
//! `main.rs`); command-line flags override them.

use std::error::Error;
use std::str::FromStr;

/// Default log4rs config file.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";
/// Default cap on how many enumerated blocks are printed.
pub const MAX_ROWS: usize = 256;

const ENV_LOG_CONFIG: &str = "SUBNET_CALC_LOG_CONFIG";
const ENV_MAX_ROWS: &str = "SUBNET_CALC_MAX_ROWS";
const ENV_OUTPUT: &str = "SUBNET_CALC_OUTPUT";

/// How results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_config: String,
    pub max_rows: usize,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config: LOG_CONFIG_FILE.to_string(),
            max_rows: MAX_ROWS,
            output: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Build from the process environment.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        if let Some(path) = lookup(ENV_LOG_CONFIG) {
            config.log_config = path;
        }
        if let Some(rows) = lookup(ENV_MAX_ROWS) {
            config.max_rows = rows
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_MAX_ROWS}='{rows}': {e}"))?;
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            config.output = output
                .parse()
                .map_err(|e| format!("{ENV_OUTPUT}: {e}"))?;
        }
        log::debug!("config: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_rows, 256);
        assert_eq!(config.log_config, "log4rs.yml");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SUBNET_CALC_MAX_ROWS", "1000"),
            ("SUBNET_CALC_OUTPUT", "CSV"),
            ("SUBNET_CALC_LOG_CONFIG", "/etc/subnet-calc/log4rs.yml"),
        ]))
        .unwrap();
        assert_eq!(config.max_rows, 1000);
        assert_eq!(config.output, OutputFormat::Csv);
        assert_eq!(config.log_config, "/etc/subnet-calc/log4rs.yml");
    }

    #[test]
    fn test_bad_values() {
        let err = Config::from_lookup(lookup_from(&[("SUBNET_CALC_MAX_ROWS", "lots")]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("SUBNET_CALC_MAX_ROWS"));
        assert!(Config::from_lookup(lookup_from(&[("SUBNET_CALC_OUTPUT", "xml")])).is_err());
    }
}
