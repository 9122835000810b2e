//! Command-line configuration.
//!
//! Flags use the `--key=value` form:
//!   --mode=evaluate|find|endings|primes   What to run (default: evaluate)
//!   --sizes=100000,1000000                Comma-separated limits (default: 100000)
//!   --out-dir=<path>                      Report directory (default: results)
//!   --min-run=<N>                         Shortest ending-digit run (default: 3)
//!   --per-line=<N>                        Primes per line in `primes` mode (default: 12)

use std::path::PathBuf;
use std::str::FromStr;

use crate::endings::MIN_CONSECUTIVE_ENDINGS;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown mode '{0}' (expected evaluate, find, endings or primes)")]
    UnknownMode(String),

    #[error("invalid value '{value}' for --{flag}")]
    InvalidValue { flag: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Search and write the CSV/text/JSON reports per size.
    Evaluate,
    /// Search and print the records per size.
    Find,
    /// Print runs of consecutive primes sharing a last digit.
    Endings,
    /// Print the prime table.
    Primes,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evaluate" => Ok(Mode::Evaluate),
            "find" => Ok(Mode::Find),
            "endings" => Ok(Mode::Endings),
            "primes" => Ok(Mode::Primes),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// CLI configuration parsed from command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub mode: Mode,
    pub sizes: Vec<u64>,
    pub out_dir: PathBuf,
    pub min_run: usize,
    pub per_line: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            mode: Mode::Evaluate,
            sizes: vec![100_000],
            out_dir: PathBuf::from("results"),
            min_run: MIN_CONSECUTIVE_ENDINGS,
            per_line: 12,
        }
    }
}

fn parse_number<T: FromStr>(flag: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .replace('_', "")
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue {
            flag,
            value: value.to_string(),
        })
}

impl CliConfig {
    /// Parse flags, ignoring the program name and anything not recognised.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = CliConfig::default();
        for arg in args {
            if let Some(v) = arg.strip_prefix("--mode=") {
                config.mode = v.parse()?;
            } else if let Some(v) = arg.strip_prefix("--sizes=") {
                config.sizes = v
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| parse_number("sizes", s))
                    .collect::<Result<_, _>>()?;
            } else if let Some(v) = arg.strip_prefix("--out-dir=") {
                config.out_dir = PathBuf::from(v);
            } else if let Some(v) = arg.strip_prefix("--min-run=") {
                config.min_run = parse_number("min-run", v)?;
            } else if let Some(v) = arg.strip_prefix("--per-line=") {
                config.per_line = parse_number("per-line", v)?;
            }
        }
        if config.sizes.is_empty() {
            return Err(ConfigError::InvalidValue {
                flag: "sizes",
                value: String::new(),
            });
        }
        Ok(config)
    }
}
