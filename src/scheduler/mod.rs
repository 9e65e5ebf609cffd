pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;

use crate::core::state::{SimCtx, Ticks};

pub use fcfs::Fcfs;
pub use priority::Priority;
pub use round_robin::RoundRobin;
pub use sjf::Sjf;

/// Default Round-Robin time quantum.
pub const DEFAULT_QUANTUM: Ticks = 4;

/// A dispatch discipline. The driver owns the shared per-tick cycle (arrival
/// admission, execution, completion, waiting-time accrual, clock); a policy
/// only decides what runs, via `select`, plus two optional hooks.
pub trait Policy {
    /// Construct the policy and configure the context's ready-queue
    /// discipline.
    fn init(ctx: &mut SimCtx) -> Self
    where
        Self: Sized;

    fn name(&self) -> &'static str;

    fn preemptive(&self) -> bool {
        false
    }

    /// Called once after state reset, before the first tick.
    fn prepare(&mut self, _ctx: &mut SimCtx) {}

    /// Per-tick dispatch decision: continue, switch, or stay idle.
    fn select(&mut self, ctx: &mut SimCtx);

    /// Called after the current process has executed one time unit.
    fn tick(&mut self, _ctx: &mut SimCtx) {}
}
