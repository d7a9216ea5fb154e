use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::{ArrivalProfile, CustomerClass, CustomerSpec, MAX_CUSTOMERS};
use crate::state::Customer;

/// Generated service times are clamped into this band of minutes.
pub const MIN_SERVICE_MIN: f64 = 0.5;
pub const MAX_SERVICE_MIN: f64 = 10.0;

/// Builds the customer list the engine will replay. This is the generator
/// collaborator: it rejects malformed input here so the engine can assume its
/// preconditions hold.
pub fn build_customers(profile: &ArrivalProfile, seed: Option<u64>) -> Result<Vec<Customer>> {
    match profile {
        ArrivalProfile::Manual(specs) => build_manual(specs),
        ArrivalProfile::Random {
            count,
            arrival_rate_per_min,
            mean_service_min,
            priority_share,
        } => build_random(
            *count,
            *arrival_rate_per_min,
            *mean_service_min,
            *priority_share,
            seed,
        ),
    }
}

fn build_manual(specs: &[CustomerSpec]) -> Result<Vec<Customer>> {
    if specs.is_empty() {
        return Err(Error::CustomersZero);
    }
    if specs.len() > MAX_CUSTOMERS {
        return Err(Error::CapacityExceeded {
            capacity: MAX_CUSTOMERS,
            got: specs.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut customers = Vec::with_capacity(specs.len());
    for spec in specs {
        if spec.id == 0 {
            return Err(Error::InvalidCustomerId);
        }
        if !seen.insert(spec.id) {
            return Err(Error::DuplicateCustomerId(spec.id));
        }
        if spec.service_min <= 0.0 {
            return Err(Error::InvalidServiceTime(spec.id));
        }
        if spec.arrival_min < 0.0 {
            return Err(Error::InvalidArrivalTime(spec.id));
        }
        customers.push(Customer::new(
            spec.id,
            spec.class,
            spec.tier,
            spec.arrival_min,
            spec.service_min,
        ));
    }
    Ok(customers)
}

fn build_random(
    count: usize,
    arrival_rate_per_min: f64,
    mean_service_min: f64,
    priority_share: f64,
    seed: Option<u64>,
) -> Result<Vec<Customer>> {
    if count == 0 {
        return Err(Error::CustomersZero);
    }
    if count > MAX_CUSTOMERS {
        return Err(Error::CapacityExceeded {
            capacity: MAX_CUSTOMERS,
            got: count,
        });
    }
    if arrival_rate_per_min <= 0.0 {
        return Err(Error::InvalidArrivalRate(arrival_rate_per_min));
    }
    if mean_service_min <= 0.0 {
        return Err(Error::InvalidMeanService(mean_service_min));
    }
    if !(0.0..=1.0).contains(&priority_share) {
        return Err(Error::InvalidPriorityShare(priority_share));
    }

    let mut rng = StdRng::seed_from_u64(seed.unwrap_or(0));
    let mut customers = Vec::with_capacity(count);
    let mut arrival_min = 0.0;
    for idx in 0..count {
        arrival_min += exponential(&mut rng, arrival_rate_per_min);
        let class = if rng.gen::<f64>() < priority_share {
            CustomerClass::Priority
        } else {
            CustomerClass::Normal
        };
        let tier = match class {
            CustomerClass::Priority => rng.gen_range(1..=3),
            CustomerClass::Normal => 0,
        };
        let service_min =
            exponential(&mut rng, 1.0 / mean_service_min).clamp(MIN_SERVICE_MIN, MAX_SERVICE_MIN);
        customers.push(Customer::new(
            idx as u32 + 1,
            class,
            tier,
            arrival_min,
            service_min,
        ));
    }
    Ok(customers)
}

fn exponential(rng: &mut StdRng, rate: f64) -> f64 {
    let mut u = rng.gen::<f64>();
    if u <= f64::MIN_POSITIVE {
        u = f64::MIN_POSITIVE;
    }
    -u.ln() / rate
}
