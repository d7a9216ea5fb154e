use serde::Serialize;
use std::cmp::Ordering;

use crate::models::CustomerClass;
use crate::state::Customer;

/// A pending occurrence on the simulation timeline.
#[derive(Clone, Debug)]
pub enum Event {
    Arrival(Customer),
    ServiceComplete { window_id: usize, customer_id: u32 },
}

#[derive(Clone, Debug)]
pub struct ScheduledEvent {
    pub time_min: f64,
    pub event: Event,
}

impl ScheduledEvent {
    pub fn new(time_min: f64, event: Event) -> Self {
        Self { time_min, event }
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time_min
            .total_cmp(&other.time_min)
            .then_with(|| self.event.priority().cmp(&other.event.priority()))
            .then_with(|| self.event.tiebreaker().cmp(&other.event.tiebreaker()))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl Event {
    /// On exact time ties a completion runs before an arrival, so the freed
    /// window can serve the arriving customer in the same instant.
    fn priority(&self) -> u8 {
        match self {
            Event::ServiceComplete { .. } => 0,
            Event::Arrival(_) => 1,
        }
    }

    fn tiebreaker(&self) -> u32 {
        match self {
            Event::ServiceComplete { customer_id, .. } => *customer_id,
            Event::Arrival(customer) => customer.id,
        }
    }
}

/// Structured event-log record handed to the presentation layer. The core
/// performs no I/O; formatters render these in whatever shape they want.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SimEvent {
    WindowOpened {
        at_min: f64,
        window_id: usize,
    },
    WindowClosed {
        at_min: f64,
        window_id: usize,
    },
    CustomerArrived {
        at_min: f64,
        customer_id: u32,
        class: CustomerClass,
        service_min: f64,
    },
    ServiceStarted {
        at_min: f64,
        customer_id: u32,
        class: CustomerClass,
        window_id: usize,
        waited_min: f64,
    },
    ServiceCompleted {
        at_min: f64,
        customer_id: u32,
        window_id: usize,
        service_min: f64,
    },
}

impl SimEvent {
    pub fn at_min(&self) -> f64 {
        match self {
            SimEvent::WindowOpened { at_min, .. }
            | SimEvent::WindowClosed { at_min, .. }
            | SimEvent::CustomerArrived { at_min, .. }
            | SimEvent::ServiceStarted { at_min, .. }
            | SimEvent::ServiceCompleted { at_min, .. } => *at_min,
        }
    }
}
