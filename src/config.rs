use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{ArrivalProfile, SimConfig, WindowPolicy, MAX_CUSTOMERS, POOL_CAPACITY};

#[derive(Parser, Debug)]
#[command(name = "counter-sim", about = "Discrete-event service-counter simulator")]
pub struct Args {
    /// TOML or JSON config file; the flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of randomly generated customers
    #[arg(long)]
    pub customers: Option<usize>,
    /// Simulated duration in minutes
    #[arg(long)]
    pub duration: Option<f64>,
    #[arg(long)]
    pub initial_windows: Option<usize>,
    #[arg(long)]
    pub min_windows: Option<usize>,
    #[arg(long)]
    pub max_windows: Option<usize>,
    /// Combined queue length above which one extra window opens
    #[arg(long)]
    pub open_threshold: Option<usize>,
    /// Combined queue length below which one idle window closes
    #[arg(long)]
    pub close_threshold: Option<usize>,
    /// Probability of serving the priority queue when both queues hold customers
    #[arg(long)]
    pub priority_ratio: Option<f64>,
    /// Seed for customer generation and dispatch draws
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long, value_enum, default_value = "human")]
    pub format: FormatArg,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum FormatArg {
    Human,
    Summary,
    Json,
}

pub fn parse_args() -> Result<Args> {
    Args::try_parse().map_err(|e| Error::Cli(e.to_string()))
}

/// Stock parameter set: a mid-size counter running an eight-hour day.
pub fn default_config() -> SimConfig {
    SimConfig {
        windows: WindowPolicy {
            initial: 3,
            min: 2,
            max: 5,
            open_threshold: 5,
            close_threshold: 2,
        },
        priority_ratio: 0.7,
        duration_min: 480.0,
        arrivals: ArrivalProfile::Random {
            count: 50,
            arrival_rate_per_min: crate::models::default_arrival_rate(),
            mean_service_min: crate::models::default_mean_service(),
            priority_share: crate::models::default_priority_share(),
        },
        seed: None,
    }
}

/// Merges the config file (or defaults) with CLI overrides and validates the
/// outcome.
pub fn build_config(args: Args) -> Result<(SimConfig, FormatArg)> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };

    if let Some(duration) = args.duration {
        config.duration_min = duration;
    }
    if let Some(initial) = args.initial_windows {
        config.windows.initial = initial;
    }
    if let Some(min) = args.min_windows {
        config.windows.min = min;
    }
    if let Some(max) = args.max_windows {
        config.windows.max = max;
    }
    if let Some(open) = args.open_threshold {
        config.windows.open_threshold = open;
    }
    if let Some(close) = args.close_threshold {
        config.windows.close_threshold = close;
    }
    if let Some(ratio) = args.priority_ratio {
        config.priority_ratio = ratio;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(count) = args.customers {
        config.arrivals = match config.arrivals {
            ArrivalProfile::Random {
                arrival_rate_per_min,
                mean_service_min,
                priority_share,
                ..
            } => ArrivalProfile::Random {
                count,
                arrival_rate_per_min,
                mean_service_min,
                priority_share,
            },
            // A customer-count override replaces a manual list outright.
            ArrivalProfile::Manual(_) => ArrivalProfile::Random {
                count,
                arrival_rate_per_min: crate::models::default_arrival_rate(),
                mean_service_min: crate::models::default_mean_service(),
                priority_share: crate::models::default_priority_share(),
            },
        };
    }

    validate(&config)?;
    Ok((config, args.format))
}

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Bounds checking for the whole parameter set. The engine trusts a config
/// that passed here, so every caller-facing entry point funnels through this.
pub fn validate(config: &SimConfig) -> Result<()> {
    let windows = &config.windows;
    let bounds_ok = 1 <= windows.min
        && windows.min <= windows.initial
        && windows.initial <= windows.max
        && windows.max <= POOL_CAPACITY;
    if !bounds_ok {
        return Err(Error::InvalidWindowBounds {
            min: windows.min,
            initial: windows.initial,
            max: windows.max,
            capacity: POOL_CAPACITY,
        });
    }
    if !(0.0..=1.0).contains(&config.priority_ratio) {
        return Err(Error::InvalidPriorityRatio(config.priority_ratio));
    }
    if config.duration_min <= 0.0 {
        return Err(Error::InvalidDuration(config.duration_min));
    }
    match &config.arrivals {
        ArrivalProfile::Random {
            count,
            arrival_rate_per_min,
            mean_service_min,
            priority_share,
        } => {
            if *count == 0 {
                return Err(Error::CustomersZero);
            }
            if *count > MAX_CUSTOMERS {
                return Err(Error::CapacityExceeded {
                    capacity: MAX_CUSTOMERS,
                    got: *count,
                });
            }
            if *arrival_rate_per_min <= 0.0 {
                return Err(Error::InvalidArrivalRate(*arrival_rate_per_min));
            }
            if *mean_service_min <= 0.0 {
                return Err(Error::InvalidMeanService(*mean_service_min));
            }
            if !(0.0..=1.0).contains(priority_share) {
                return Err(Error::InvalidPriorityShare(*priority_share));
            }
        }
        ArrivalProfile::Manual(specs) => {
            if specs.is_empty() {
                return Err(Error::CustomersZero);
            }
            if specs.len() > MAX_CUSTOMERS {
                return Err(Error::CapacityExceeded {
                    capacity: MAX_CUSTOMERS,
                    got: specs.len(),
                });
            }
        }
    }
    Ok(())
}
