use serde::Serialize;

use crate::models::CustomerClass;

/// A customer record. The `start_min`/`finish_min`/`waiting_min`/`served_by`
/// fields start unset and are stamped exactly once each as the customer moves
/// through assignment and completion.
#[derive(Clone, Debug, Serialize)]
pub struct Customer {
    pub id: u32,
    pub class: CustomerClass,
    pub tier: u8,
    pub arrival_min: f64,
    pub service_min: f64,
    pub start_min: Option<f64>,
    pub finish_min: Option<f64>,
    pub waiting_min: f64,
    pub served_by: Option<usize>,
}

impl Customer {
    pub fn new(id: u32, class: CustomerClass, tier: u8, arrival_min: f64, service_min: f64) -> Self {
        Self {
            id,
            class,
            tier,
            arrival_min,
            service_min,
            start_min: None,
            finish_min: None,
            waiting_min: 0.0,
            served_by: None,
        }
    }
}

/// One service window. Closing is a logical state: the busy/idle counters keep
/// accumulating across open/close cycles.
#[derive(Clone, Debug, Serialize)]
pub struct WindowState {
    pub id: usize,
    pub is_open: bool,
    pub is_busy: bool,
    pub serving: Option<Customer>,
    pub busy_start_min: f64,
    pub total_busy_min: f64,
    pub total_idle_min: f64,
    pub served_count: u32,
}

impl WindowState {
    pub fn new(id: usize, is_open: bool) -> Self {
        Self {
            id,
            is_open,
            is_busy: false,
            serving: None,
            busy_start_min: 0.0,
            total_busy_min: 0.0,
            total_idle_min: 0.0,
            served_count: 0,
        }
    }

    /// A window only tracks time while open; busy implies open.
    pub fn is_idle(&self) -> bool {
        self.is_open && !self.is_busy
    }
}
