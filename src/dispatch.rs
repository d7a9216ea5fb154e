use rand::rngs::StdRng;
use rand::Rng;

use crate::error::Result;
use crate::models::CustomerClass;
use crate::queues::QueueStore;
use crate::state::Customer;

/// Picks the next customer to serve, or `None` when both queues are empty.
///
/// When both queues hold customers, a uniform draw in [0, 1) below
/// `priority_ratio` selects the priority queue. The ratio is the probability
/// of favoring priority work under contention, not a preemption rule: a lone
/// non-empty queue is always served regardless of the ratio.
pub fn select_next_customer(
    queues: &mut QueueStore,
    priority_ratio: f64,
    rng: &mut StdRng,
) -> Result<Option<Customer>> {
    let priority_empty = queues.is_empty(CustomerClass::Priority);
    let normal_empty = queues.is_empty(CustomerClass::Normal);

    let class = match (priority_empty, normal_empty) {
        (true, true) => return Ok(None),
        (false, true) => CustomerClass::Priority,
        (true, false) => CustomerClass::Normal,
        (false, false) => {
            if rng.gen::<f64>() < priority_ratio {
                CustomerClass::Priority
            } else {
                CustomerClass::Normal
            }
        }
    };

    queues.dequeue_front(class).map(Some)
}
