use crate::error::{Error, Result};
use crate::events::SimEvent;
use crate::models::WindowPolicy;
use crate::state::{Customer, WindowState};

/// The pool owns every window slot for the run and enforces the min/max
/// active-count bounds. Open/close are opportunistic: callers may always ask,
/// and a refused transition is a quiet `None`, never an error.
#[derive(Debug)]
pub struct WindowPool {
    windows: Vec<WindowState>,
    active: usize,
    policy: WindowPolicy,
}

impl WindowPool {
    pub fn new(policy: &WindowPolicy) -> Self {
        let windows = (0..policy.max)
            .map(|id| WindowState::new(id, id < policy.initial))
            .collect();
        Self {
            windows,
            active: policy.initial,
            policy: policy.clone(),
        }
    }

    pub fn open_window(&mut self, id: usize, at_min: f64) -> Option<SimEvent> {
        let can_open = self.active < self.policy.max;
        match self.windows.get_mut(id) {
            Some(window) if !window.is_open && can_open => {
                window.is_open = true;
                self.active += 1;
                Some(SimEvent::WindowOpened { at_min, window_id: id })
            }
            _ => None,
        }
    }

    pub fn close_window(&mut self, id: usize, at_min: f64) -> Option<SimEvent> {
        let can_close = self.active > self.policy.min;
        match self.windows.get_mut(id) {
            Some(window) if window.is_idle() && can_close => {
                window.is_open = false;
                self.active -= 1;
                Some(SimEvent::WindowClosed { at_min, window_id: id })
            }
            _ => None,
        }
    }

    /// Lowest-indexed open-and-idle window.
    pub fn find_idle_window(&self) -> Option<usize> {
        self.windows.iter().find(|w| w.is_idle()).map(|w| w.id)
    }

    /// Single-step hysteresis: at most one window toggles per call, so one
    /// event can never swing the pool by more than one slot.
    pub fn adjust(&mut self, total_queue_len: usize, at_min: f64) -> Option<SimEvent> {
        if total_queue_len > self.policy.open_threshold {
            let id = self.windows.iter().find(|w| !w.is_open).map(|w| w.id)?;
            self.open_window(id, at_min)
        } else if total_queue_len < self.policy.close_threshold {
            let id = self.find_idle_window()?;
            self.close_window(id, at_min)
        } else {
            None
        }
    }

    /// Starts service at an open, idle window. Stamps the customer's start and
    /// waiting times; the caller must already have removed it from its queue.
    pub fn assign(&mut self, id: usize, mut customer: Customer, at_min: f64) -> Result<()> {
        let window = self
            .windows
            .get_mut(id)
            .ok_or(Error::InvalidWindowState {
                id,
                state: "out of range",
                action: "assign",
            })?;
        if !window.is_open || window.is_busy {
            return Err(Error::InvalidWindowState {
                id,
                state: if window.is_busy { "busy" } else { "closed" },
                action: "assign",
            });
        }
        customer.start_min = Some(at_min);
        customer.waiting_min = at_min - customer.arrival_min;
        customer.served_by = Some(id);
        window.is_busy = true;
        window.busy_start_min = at_min;
        window.served_count += 1;
        window.serving = Some(customer);
        Ok(())
    }

    /// Ends the in-progress service and returns the finished customer with its
    /// finish time stamped. A completion on an idle window is a quiet no-op.
    pub fn complete_service(&mut self, id: usize, at_min: f64) -> Option<Customer> {
        let window = self.windows.get_mut(id)?;
        if !window.is_busy {
            return None;
        }
        window.is_busy = false;
        window.total_busy_min += at_min - window.busy_start_min;
        let mut customer = window.serving.take()?;
        customer.finish_min = Some(at_min);
        Some(customer)
    }

    /// Credits `span_min` of idle time to every open-idle window.
    pub fn credit_idle(&mut self, span_min: f64) {
        for window in &mut self.windows {
            if window.is_idle() {
                window.total_idle_min += span_min;
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn windows(&self) -> &[WindowState] {
        &self.windows
    }

    pub fn into_windows(self) -> Vec<WindowState> {
        self.windows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomerClass;

    fn policy(initial: usize, min: usize, max: usize, open: usize, close: usize) -> WindowPolicy {
        WindowPolicy {
            initial,
            min,
            max,
            open_threshold: open,
            close_threshold: close,
        }
    }

    fn customer(id: u32, arrival: f64) -> Customer {
        Customer::new(id, CustomerClass::Normal, 0, arrival, 2.0)
    }

    #[test]
    fn pool_opens_initial_windows() {
        let pool = WindowPool::new(&policy(2, 1, 4, 5, 2));
        assert_eq!(pool.active_count(), 2);
        assert!(pool.windows()[0].is_open);
        assert!(pool.windows()[1].is_open);
        assert!(!pool.windows()[2].is_open);
    }

    #[test]
    fn open_window_respects_max_bound() {
        let mut pool = WindowPool::new(&policy(2, 1, 2, 5, 2));
        assert!(pool.open_window(1, 0.0).is_none());
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn open_window_is_noop_on_already_open() {
        let mut pool = WindowPool::new(&policy(1, 1, 3, 5, 2));
        assert!(pool.open_window(0, 0.0).is_none());
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn close_window_respects_min_bound() {
        let mut pool = WindowPool::new(&policy(1, 1, 3, 5, 2));
        assert!(pool.close_window(0, 0.0).is_none());
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn close_window_refuses_busy_window() {
        let mut pool = WindowPool::new(&policy(2, 1, 3, 5, 2));
        pool.assign(0, customer(1, 0.0), 0.0).unwrap();
        assert!(pool.close_window(0, 1.0).is_none());
        let event = pool.close_window(1, 1.0);
        assert_eq!(
            event,
            Some(SimEvent::WindowClosed {
                at_min: 1.0,
                window_id: 1
            })
        );
    }

    #[test]
    fn find_idle_prefers_lowest_id() {
        let mut pool = WindowPool::new(&policy(3, 1, 3, 5, 2));
        assert_eq!(pool.find_idle_window(), Some(0));
        pool.assign(0, customer(1, 0.0), 0.0).unwrap();
        assert_eq!(pool.find_idle_window(), Some(1));
    }

    #[test]
    fn adjust_opens_exactly_one_window_above_threshold() {
        // Queue length 4 with room for two more windows still opens only one.
        let mut pool = WindowPool::new(&policy(1, 1, 3, 3, 1));
        let event = pool.adjust(4, 10.0);
        assert_eq!(
            event,
            Some(SimEvent::WindowOpened {
                at_min: 10.0,
                window_id: 1
            })
        );
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn adjust_closes_exactly_one_idle_window_below_threshold() {
        let mut pool = WindowPool::new(&policy(3, 1, 3, 5, 2));
        let event = pool.adjust(0, 7.0);
        assert_eq!(
            event,
            Some(SimEvent::WindowClosed {
                at_min: 7.0,
                window_id: 0
            })
        );
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn adjust_is_inert_between_thresholds() {
        let mut pool = WindowPool::new(&policy(2, 1, 3, 5, 2));
        assert!(pool.adjust(3, 0.0).is_none());
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn assign_rejects_busy_window() {
        let mut pool = WindowPool::new(&policy(1, 1, 1, 5, 0));
        pool.assign(0, customer(1, 0.0), 0.0).unwrap();
        let err = pool.assign(0, customer(2, 0.0), 0.0).unwrap_err();
        assert_eq!(err.to_string(), "window 0 is busy, cannot assign");
    }

    #[test]
    fn assign_rejects_closed_window() {
        let mut pool = WindowPool::new(&policy(1, 1, 2, 5, 0));
        let err = pool.assign(1, customer(1, 0.0), 0.0).unwrap_err();
        assert_eq!(err.to_string(), "window 1 is closed, cannot assign");
    }

    #[test]
    fn assign_stamps_customer_and_window() {
        let mut pool = WindowPool::new(&policy(1, 1, 1, 5, 0));
        pool.assign(0, customer(1, 2.0), 5.0).unwrap();
        let window = &pool.windows()[0];
        assert!(window.is_busy);
        assert_eq!(window.busy_start_min, 5.0);
        assert_eq!(window.served_count, 1);
        let serving = window.serving.as_ref().unwrap();
        assert_eq!(serving.start_min, Some(5.0));
        assert_eq!(serving.waiting_min, 3.0);
        assert_eq!(serving.served_by, Some(0));
    }

    #[test]
    fn complete_service_accumulates_busy_time_and_returns_customer() {
        let mut pool = WindowPool::new(&policy(1, 1, 1, 5, 0));
        pool.assign(0, customer(1, 0.0), 1.0).unwrap();
        let finished = pool.complete_service(0, 4.5).unwrap();
        assert_eq!(finished.finish_min, Some(4.5));
        let window = &pool.windows()[0];
        assert!(!window.is_busy);
        assert_eq!(window.total_busy_min, 3.5);
    }

    #[test]
    fn complete_service_on_idle_window_is_noop() {
        let mut pool = WindowPool::new(&policy(1, 1, 1, 5, 0));
        assert!(pool.complete_service(0, 1.0).is_none());
    }

    #[test]
    fn credit_idle_skips_busy_and_closed_windows() {
        let mut pool = WindowPool::new(&policy(2, 1, 3, 5, 0));
        pool.assign(0, customer(1, 0.0), 0.0).unwrap();
        pool.credit_idle(4.0);
        assert_eq!(pool.windows()[0].total_idle_min, 0.0);
        assert_eq!(pool.windows()[1].total_idle_min, 4.0);
        assert_eq!(pool.windows()[2].total_idle_min, 0.0);
    }

    #[test]
    fn counters_survive_reopen() {
        let mut pool = WindowPool::new(&policy(2, 1, 2, 5, 1));
        pool.credit_idle(3.0);
        pool.close_window(1, 3.0).unwrap();
        pool.open_window(1, 8.0).unwrap();
        pool.credit_idle(2.0);
        assert_eq!(pool.windows()[1].total_idle_min, 5.0);
    }
}
