use rustc_hash::FxHashMap;
use std::fmt::Write;

use crate::core::driver::SchedCore;
use crate::core::event::SchedEvent;
use crate::core::state::{Pid, Process};
use crate::scheduler::Policy;

/// Per-process metrics table, one row per process in table order.
pub fn metrics_table(processes: &[Process]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5} {:>10} {:>8} {:>6} {:>6} {:>8} {:>11} {:>9}",
        "PID", "Name", "Arrival", "Burst", "Start", "Waiting", "Turnaround", "Response"
    );
    let _ = writeln!(out, "{}", "-".repeat(70));

    for p in processes {
        let start = p
            .start_time
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        let _ = writeln!(
            out,
            "{:>5} {:>10} {:>8} {:>6} {:>6} {:>8} {:>11} {:>9}",
            p.pid, p.name, p.arrival, p.burst, start, p.waiting, p.turnaround, p.response
        );
    }

    out
}

/// Aggregate averages and total execution time for a completed run.
pub fn summary<P: Policy>(core: &SchedCore<P>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "-".repeat(70));
    let _ = writeln!(
        out,
        "Average waiting time:    {:.2} ticks",
        core.avg_waiting_time()
    );
    let _ = writeln!(
        out,
        "Average turnaround time: {:.2} ticks",
        core.avg_turnaround_time()
    );
    let _ = writeln!(
        out,
        "Average response time:   {:.2} ticks",
        core.avg_response_time()
    );
    let _ = writeln!(
        out,
        "Total execution time:    {} ticks",
        core.total_execution_time()
    );
    out
}

/// Render the event trace as Gantt-style dispatch episodes, e.g.
/// `| P1 0-3 | P2 3-6 | P1 6-8 |`.
pub fn gantt(processes: &[Process], events: &[SchedEvent]) -> String {
    let names: FxHashMap<Pid, &str> = processes
        .iter()
        .map(|p| (p.pid, p.name.as_str()))
        .collect();

    let mut out = String::new();
    let mut open: Option<(Pid, u64)> = None;

    for ev in events {
        match *ev {
            SchedEvent::Started { pid, at } => open = Some((pid, at)),
            SchedEvent::Preempted { pid, at } | SchedEvent::Completed { pid, at } => {
                if let Some((open_pid, since)) = open.take() {
                    debug_assert_eq!(open_pid, pid, "episode closed by a different process");
                    let name = names.get(&pid).copied().unwrap_or("?");
                    let _ = write!(out, "| {name} {since}-{at} ");
                }
            }
        }
    }

    out.push('|');
    out
}
