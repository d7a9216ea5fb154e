use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::arrivals::build_customers;
use crate::config;
use crate::dispatch::select_next_customer;
use crate::error::Result;
use crate::events::{Event, ScheduledEvent, SimEvent};
use crate::models::{CustomerClass, SimConfig};
use crate::queues::QueueStore;
use crate::state::{Customer, WindowState};
use crate::stats::{self, Statistics};
use crate::windows::WindowPool;

/// Everything a run produces: the finished customer records, the final window
/// records, the derived statistics, and the chronological event log.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    pub finished: Vec<Customer>,
    pub windows: Vec<WindowState>,
    pub stats: Statistics,
    pub events: Vec<SimEvent>,
    pub leftover_normal: usize,
    pub leftover_priority: usize,
    pub elapsed_min: f64,
}

/// Replays one bounded timeline. The engine owns the clock and all mutable
/// run state; queues and windows are touched only from here, in event order.
pub struct SimulationEngine {
    config: SimConfig,
    rng: StdRng,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or(0));
        Self { config, rng }
    }

    pub fn run(&mut self) -> Result<SimulationResult> {
        let customers = build_customers(&self.config.arrivals, self.config.seed)?;
        let duration_min = self.config.duration_min;

        let mut queues = QueueStore::new();
        let mut pool = WindowPool::new(&self.config.windows);
        let mut log: Vec<SimEvent> = Vec::new();
        let mut finished: Vec<Customer> = Vec::with_capacity(customers.len());

        let mut pending: BinaryHeap<Reverse<ScheduledEvent>> = BinaryHeap::new();
        for customer in customers {
            pending.push(Reverse(ScheduledEvent::new(
                customer.arrival_min,
                Event::Arrival(customer),
            )));
        }

        let mut now = 0.0_f64;
        while let Some(Reverse(scheduled)) = pending.pop() {
            if scheduled.time_min >= duration_min {
                // The clock never runs past the configured end; whatever the
                // event was, it no longer happens inside this run.
                break;
            }
            pool.credit_idle(scheduled.time_min - now);
            now = scheduled.time_min;

            match scheduled.event {
                Event::Arrival(customer) => {
                    log.push(SimEvent::CustomerArrived {
                        at_min: now,
                        customer_id: customer.id,
                        class: customer.class,
                        service_min: customer.service_min,
                    });
                    queues.enqueue(customer.class, customer);
                    if let Some(window_id) = pool.find_idle_window() {
                        self.try_assign(window_id, now, &mut queues, &mut pool, &mut pending, &mut log)?;
                    }
                    if let Some(event) = pool.adjust(queues.total_len(), now) {
                        log.push(event);
                    }
                }
                Event::ServiceComplete { window_id, .. } => {
                    if let Some(customer) = pool.complete_service(window_id, now) {
                        log.push(SimEvent::ServiceCompleted {
                            at_min: now,
                            customer_id: customer.id,
                            window_id,
                            service_min: customer.service_min,
                        });
                        finished.push(customer);
                    }
                    self.try_assign(window_id, now, &mut queues, &mut pool, &mut pending, &mut log)?;
                    if let Some(event) = pool.adjust(queues.total_len(), now) {
                        log.push(event);
                    }
                }
            }
        }

        // Drained: no event remains before the end of the run. Idle windows
        // are credited for the remaining span and the clock jumps to the end.
        pool.credit_idle(duration_min - now);

        let leftover_normal = queues.len(CustomerClass::Normal);
        let leftover_priority = queues.len(CustomerClass::Priority);
        let windows = pool.into_windows();
        let stats = stats::compute(&finished, &windows, duration_min);

        Ok(SimulationResult {
            finished,
            windows,
            stats,
            events: log,
            leftover_normal,
            leftover_priority,
            elapsed_min: duration_min,
        })
    }

    /// Dispatches the next eligible customer, if any, to an idle window.
    fn try_assign(
        &mut self,
        window_id: usize,
        now: f64,
        queues: &mut QueueStore,
        pool: &mut WindowPool,
        pending: &mut BinaryHeap<Reverse<ScheduledEvent>>,
        log: &mut Vec<SimEvent>,
    ) -> Result<()> {
        let picked = select_next_customer(queues, self.config.priority_ratio, &mut self.rng)?;
        if let Some(customer) = picked {
            log.push(SimEvent::ServiceStarted {
                at_min: now,
                customer_id: customer.id,
                class: customer.class,
                window_id,
                waited_min: now - customer.arrival_min,
            });
            pending.push(Reverse(ScheduledEvent::new(
                now + customer.service_min,
                Event::ServiceComplete {
                    window_id,
                    customer_id: customer.id,
                },
            )));
            pool.assign(window_id, customer, now)?;
        }
        Ok(())
    }
}

/// Validates the configuration and runs a full simulation. The engine itself
/// trusts its inputs; this is the entry point external callers should use.
pub fn run_simulation(config: &SimConfig) -> Result<SimulationResult> {
    config::validate(config)?;
    let mut engine = SimulationEngine::new(config.clone());
    engine.run()
}
