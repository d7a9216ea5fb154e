use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::models::CustomerClass;
use crate::state::Customer;

/// Two strict-FIFO waiting lines, one per customer class. A customer sits in
/// at most one queue, and in none once handed to a window.
#[derive(Debug, Default)]
pub struct QueueStore {
    normal: VecDeque<Customer>,
    priority: VecDeque<Customer>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, class: CustomerClass, customer: Customer) {
        self.line_mut(class).push_back(customer);
    }

    pub fn dequeue_front(&mut self, class: CustomerClass) -> Result<Customer> {
        self.line_mut(class)
            .pop_front()
            .ok_or(Error::EmptyQueue(class))
    }

    pub fn peek(&self, class: CustomerClass) -> Option<&Customer> {
        self.line(class).front()
    }

    pub fn len(&self, class: CustomerClass) -> usize {
        self.line(class).len()
    }

    pub fn is_empty(&self, class: CustomerClass) -> bool {
        self.line(class).is_empty()
    }

    pub fn total_len(&self) -> usize {
        self.normal.len() + self.priority.len()
    }

    fn line(&self, class: CustomerClass) -> &VecDeque<Customer> {
        match class {
            CustomerClass::Normal => &self.normal,
            CustomerClass::Priority => &self.priority,
        }
    }

    fn line_mut(&mut self, class: CustomerClass) -> &mut VecDeque<Customer> {
        match class {
            CustomerClass::Normal => &mut self.normal,
            CustomerClass::Priority => &mut self.priority,
        }
    }
}
