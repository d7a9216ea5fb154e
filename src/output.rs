use std::fmt::Write as _;

use crate::engine::SimulationResult;
use crate::events::SimEvent;

/// Renders a finished run. The engine emits structured records only; these
/// formatters own every byte that reaches stdout.
pub trait Formatter {
    fn write(&self, result: &SimulationResult) -> String;
}

/// Chronological event log followed by the summary block.
pub struct HumanFormatter;

/// Summary block only.
pub struct SummaryFormatter;

/// The whole result as pretty JSON.
pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let mut out = String::new();
        for event in &result.events {
            out.push_str(&render_event(event));
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&summary(result));
        out
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        summary(result)
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let mut out = serde_json::to_string_pretty(result)
            .expect("simulation result should serialize to JSON");
        out.push('\n');
        out
    }
}

fn render_event(event: &SimEvent) -> String {
    match event {
        SimEvent::WindowOpened { at_min, window_id } => {
            format!("time {:.2}: window {} opened", at_min, window_id)
        }
        SimEvent::WindowClosed { at_min, window_id } => {
            format!("time {:.2}: window {} closed", at_min, window_id)
        }
        SimEvent::CustomerArrived {
            at_min,
            customer_id,
            class,
            service_min,
        } => format!(
            "time {:.2}: customer {} ({}) arrived, estimated service {:.2} min",
            at_min, customer_id, class, service_min
        ),
        SimEvent::ServiceStarted {
            at_min,
            customer_id,
            class,
            window_id,
            waited_min,
        } => format!(
            "time {:.2}: customer {} ({}) started at window {}, waited {:.2} min",
            at_min, customer_id, class, window_id, waited_min
        ),
        SimEvent::ServiceCompleted {
            at_min,
            customer_id,
            window_id,
            service_min,
        } => format!(
            "time {:.2}: customer {} finished at window {}, service {:.2} min",
            at_min, customer_id, window_id, service_min
        ),
    }
}

fn summary(result: &SimulationResult) -> String {
    let stats = &result.stats;
    let mut out = String::new();
    let _ = writeln!(out, "Simulation time: {:.2} min", result.elapsed_min);
    let _ = writeln!(out, "Total served: {}", stats.total_served);
    let _ = writeln!(
        out,
        "Throughput: {:.2} customers/hour",
        stats.throughput_per_hour
    );
    let _ = writeln!(
        out,
        "normal: served {}, avg wait {:.2} min, max wait {:.2} min",
        stats.normal.served, stats.normal.avg_wait_min, stats.normal.max_wait_min
    );
    let _ = writeln!(
        out,
        "priority: served {}, avg wait {:.2} min, max wait {:.2} min",
        stats.priority.served, stats.priority.avg_wait_min, stats.priority.max_wait_min
    );
    for window in &stats.windows {
        let _ = writeln!(
            out,
            "window {}: utilization {:.2}%, idle {:.2}%, served {}, {}",
            window.window_id,
            window.utilization_pct,
            window.idle_pct,
            window.served,
            if window.open_at_end { "open" } else { "closed" }
        );
    }
    let _ = writeln!(
        out,
        "Leftover: normal {}, priority {}",
        result.leftover_normal, result.leftover_priority
    );
    out
}
