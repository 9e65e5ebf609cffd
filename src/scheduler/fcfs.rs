use super::Policy;
use crate::core::state::{ReadyQueue, SimCtx};

/// First-Come-First-Served: processes run in arrival order, each to
/// completion. Ties in arrival time keep their submission order.
pub struct Fcfs;

impl Policy for Fcfs {
    fn init(ctx: &mut SimCtx) -> Self {
        ctx.ready = ReadyQueue::new_fifo();
        Self
    }

    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn prepare(&mut self, ctx: &mut SimCtx) {
        // Arrivals are admitted in process-list order, so a stable sort by
        // arrival time makes the FIFO queue the dispatch order.
        ctx.sort_by_arrival();
    }

    fn select(&mut self, ctx: &mut SimCtx) {
        if ctx.current.is_none() {
            if let Some(pid) = ctx.ready.pop() {
                ctx.dispatch(pid);
            }
        }
    }
}
