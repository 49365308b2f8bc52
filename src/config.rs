//! Command-line and environment configuration.
//!
//! Every option can also be set through a `NETADDR_*` variable (a `.env` file
//! is loaded by the binary through `dotenv`); the command line wins.

use crate::models::Conversion;
use clap::{Parser, ValueEnum};

pub const ENV_LOG_CONFIG: &str = "NETADDR_LOG_CONFIG";
pub const ENV_OUTPUT: &str = "NETADDR_OUTPUT";
pub const ENV_CONVERSION: &str = "NETADDR_CONVERSION";

pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// How report rows are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    #[default]
    #[value(alias = "term")]
    Terminal,
    Json,
}

/// Parse a conversion mode: `strict`, `tolerant`, or a comma list of
/// `v4mapped`, `v4compat`, `unspecified`, `localhost`.
pub fn parse_conversion(s: &str) -> Result<Conversion, String> {
    let mut mode = Conversion::STRICT_CONVERSION;
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        mode |= match part.to_ascii_lowercase().as_str() {
            "strict" => Conversion::STRICT_CONVERSION,
            "tolerant" => Conversion::TOLERANT_CONVERSION,
            "v4mapped" => Conversion::CONVERT_V4_MAPPED_TO_IPV4,
            "v4compat" => Conversion::CONVERT_V4_COMPAT_TO_IPV4,
            "unspecified" => Conversion::CONVERT_UNSPECIFIED_ADDRESS,
            "localhost" => Conversion::CONVERT_LOCAL_HOST,
            other => return Err(format!("Unknown conversion: {other}")),
        };
    }
    Ok(mode)
}

/// Inverse of [`parse_conversion`].
pub fn describe_conversion(mode: Conversion) -> String {
    if mode.is_tolerant() {
        return "tolerant".to_string();
    }
    if mode.is_empty() {
        return "strict".to_string();
    }
    let names = [
        (Conversion::CONVERT_V4_MAPPED_TO_IPV4, "v4mapped"),
        (Conversion::CONVERT_V4_COMPAT_TO_IPV4, "v4compat"),
        (Conversion::CONVERT_UNSPECIFIED_ADDRESS, "unspecified"),
        (Conversion::CONVERT_LOCAL_HOST, "localhost"),
    ];
    names
        .iter()
        .filter(|(flag, _)| mode.contains(*flag))
        .map(|(_, name)| *name)
        .collect::<Vec<&str>>()
        .join(",")
}

/// Settings shared by the processing and output layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the log4rs YAML file.
    pub log_config: String,
    pub output: OutputFormat,
    /// Mode used by `--compare` and the equivalence check.
    pub conversion: Conversion,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_config: DEFAULT_LOG_CONFIG.to_string(),
            output: OutputFormat::default(),
            conversion: Conversion::default(),
        }
    }
}

/// Inspect, classify and compare IPv4/IPv6 addresses.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Output format.
    #[arg(short, long, value_enum, ignore_case = true, env = ENV_OUTPUT, default_value_t)]
    pub output: OutputFormat,

    /// Equivalence mode: strict, tolerant, or a comma list of
    /// v4mapped, v4compat, unspecified, localhost.
    #[arg(
        short,
        long,
        env = ENV_CONVERSION,
        value_parser = parse_conversion,
        default_value = "tolerant"
    )]
    pub conversion: Conversion,

    /// log4rs YAML file.
    #[arg(long, value_name = "PATH", env = ENV_LOG_CONFIG, default_value = DEFAULT_LOG_CONFIG)]
    pub log_config: String,

    /// JSON file of address records.
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Compare two addresses under every conversion.
    #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"])]
    pub compare: Option<Vec<String>>,

    /// Addresses, optionally with `/prefix` or `/mask`.
    #[arg(value_name = "ADDR")]
    pub inputs: Vec<String>,
}

impl Args {
    /// Settings for the processing and output layers.
    pub fn config(&self) -> Config {
        Config {
            log_config: self.log_config.clone(),
            output: self.output,
            conversion: self.conversion,
        }
    }

    /// The `--compare` pair, if given.
    pub fn compare_pair(&self) -> Option<(&str, &str)> {
        match self.compare.as_deref() {
            Some([left, right]) => Some((left.as_str(), right.as_str())),
            _ => None,
        }
    }
}
