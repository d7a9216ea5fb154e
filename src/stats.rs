use serde::Serialize;

use crate::models::{CustomerClass, THROUGHPUT_SCALE_PER_HOUR};
use crate::state::{Customer, WindowState};

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ClassStats {
    pub served: u32,
    pub total_wait_min: f64,
    pub avg_wait_min: f64,
    pub max_wait_min: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WindowReport {
    pub window_id: usize,
    pub utilization_pct: f64,
    pub idle_pct: f64,
    pub served: u32,
    pub open_at_end: bool,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Statistics {
    pub normal: ClassStats,
    pub priority: ClassStats,
    pub windows: Vec<WindowReport>,
    pub total_served: u32,
    pub throughput_per_hour: f64,
}

/// Recomputes the full statistics snapshot from the final records. Pure:
/// running it twice over the same state yields identical results.
///
/// Customers without a recorded finish time (still queued or mid-service when
/// the clock ran out) are excluded from the waiting-time figures.
pub fn compute(customers: &[Customer], windows: &[WindowState], elapsed_min: f64) -> Statistics {
    let mut normal = ClassStats::default();
    let mut priority = ClassStats::default();

    for customer in customers.iter().filter(|c| c.finish_min.is_some()) {
        let entry = match customer.class {
            CustomerClass::Normal => &mut normal,
            CustomerClass::Priority => &mut priority,
        };
        entry.served += 1;
        entry.total_wait_min += customer.waiting_min;
        if customer.waiting_min > entry.max_wait_min {
            entry.max_wait_min = customer.waiting_min;
        }
    }
    for entry in [&mut normal, &mut priority] {
        if entry.served > 0 {
            entry.avg_wait_min = entry.total_wait_min / entry.served as f64;
        }
    }

    let window_reports = windows
        .iter()
        .filter(|w| was_ever_open(w))
        .map(|window| {
            let tracked_min = window.total_busy_min + window.total_idle_min;
            let utilization_pct = if tracked_min > 0.0 {
                round_to((window.total_busy_min / tracked_min) * 100.0, 2)
            } else {
                0.0
            };
            WindowReport {
                window_id: window.id,
                utilization_pct,
                idle_pct: round_to(100.0 - utilization_pct, 2),
                served: window.served_count,
                open_at_end: window.is_open,
            }
        })
        .collect();

    let total_served = normal.served + priority.served;
    let throughput_per_hour = if elapsed_min > 0.0 {
        round_to(
            (total_served as f64 / elapsed_min) * THROUGHPUT_SCALE_PER_HOUR,
            2,
        )
    } else {
        0.0
    };

    Statistics {
        normal,
        priority,
        windows: window_reports,
        total_served,
        throughput_per_hour,
    }
}

/// A window counts as ever open once it is open now or has tracked any time
/// or customers. Slots that never opened stay out of the report.
fn was_ever_open(window: &WindowState) -> bool {
    window.is_open
        || window.served_count > 0
        || window.total_busy_min > 0.0
        || window.total_idle_min > 0.0
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
