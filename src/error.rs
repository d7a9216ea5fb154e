use thiserror::Error;

use crate::models::CustomerClass;

#[derive(Error, Debug)]
pub enum Error {
    #[error("dequeue from empty {0} queue")]
    EmptyQueue(CustomerClass),
    #[error("window {id} is {state}, cannot {action}")]
    InvalidWindowState {
        id: usize,
        state: &'static str,
        action: &'static str,
    },
    #[error("customer list exceeds capacity of {capacity} (got {got})")]
    CapacityExceeded { capacity: usize, got: usize },
    #[error(
        "window bounds must satisfy 1 <= min <= initial <= max <= {capacity} \
         (min={min}, initial={initial}, max={max})"
    )]
    InvalidWindowBounds {
        min: usize,
        initial: usize,
        max: usize,
        capacity: usize,
    },
    #[error("priority ratio must be within 0.0..=1.0 (got {0})")]
    InvalidPriorityRatio(f64),
    #[error("priority share must be within 0.0..=1.0 (got {0})")]
    InvalidPriorityShare(f64),
    #[error("simulation duration must be > 0 minutes (got {0})")]
    InvalidDuration(f64),
    #[error("customer count must be greater than 0")]
    CustomersZero,
    #[error("customer ids must be positive")]
    InvalidCustomerId,
    #[error("duplicate customer id {0}")]
    DuplicateCustomerId(u32),
    #[error("customer {0}: service time must be > 0 minutes")]
    InvalidServiceTime(u32),
    #[error("customer {0}: arrival time must be >= 0 minutes")]
    InvalidArrivalTime(u32),
    #[error("arrival rate must be > 0 per minute (got {0})")]
    InvalidArrivalRate(f64),
    #[error("mean service time must be > 0 minutes (got {0})")]
    InvalidMeanService(f64),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
}

pub type Result<T> = std::result::Result<T, Error>;
