use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed number of window slots a pool may ever address.
pub const POOL_CAPACITY: usize = 20;
/// Upper bound on the customer list handed to a single run.
pub const MAX_CUSTOMERS: usize = 1000;
/// Times are tracked in minutes; throughput is reported per hour.
pub const THROUGHPUT_SCALE_PER_HOUR: f64 = 60.0;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimConfig {
    pub windows: WindowPolicy,
    #[serde(default = "default_priority_ratio")]
    pub priority_ratio: f64,
    pub duration_min: f64,
    pub arrivals: ArrivalProfile,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Window-count bounds plus the queue-length thresholds driving the scaler.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WindowPolicy {
    pub initial: usize,
    pub min: usize,
    pub max: usize,
    pub open_threshold: usize,
    pub close_threshold: usize,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ArrivalProfile {
    Manual(Vec<CustomerSpec>),
    Random {
        count: usize,
        #[serde(default = "default_arrival_rate")]
        arrival_rate_per_min: f64,
        #[serde(default = "default_mean_service")]
        mean_service_min: f64,
        #[serde(default = "default_priority_share")]
        priority_share: f64,
    },
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CustomerSpec {
    pub id: u32,
    pub class: CustomerClass,
    #[serde(default)]
    pub tier: u8,
    pub arrival_min: f64,
    pub service_min: f64,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CustomerClass {
    Normal,
    Priority,
}

impl fmt::Display for CustomerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerClass::Normal => write!(f, "normal"),
            CustomerClass::Priority => write!(f, "priority"),
        }
    }
}

fn default_priority_ratio() -> f64 {
    0.7
}

pub(crate) fn default_arrival_rate() -> f64 {
    2.0
}

pub(crate) fn default_mean_service() -> f64 {
    3.0
}

pub(crate) fn default_priority_share() -> f64 {
    0.3
}
