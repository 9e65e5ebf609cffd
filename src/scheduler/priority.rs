use super::Policy;
use crate::core::state::{RankBy, ReadyQueue, SimCtx};

/// Non-preemptive priority scheduling: at every idle dispatch point the
/// ready process with the lowest priority ordinal runs to completion. A
/// higher-priority arrival waits for the running process to finish.
pub struct Priority;

impl Policy for Priority {
    fn init(ctx: &mut SimCtx) -> Self {
        ctx.ready = ReadyQueue::new_ranked(RankBy::Priority);
        Self
    }

    fn name(&self) -> &'static str {
        "Priority"
    }

    fn select(&mut self, ctx: &mut SimCtx) {
        if ctx.current.is_none() {
            if let Some(pid) = ctx.ready.pop() {
                ctx.dispatch(pid);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Process, SchedCore, SchedEvent};

    fn start_order<P: Policy>(core: &SchedCore<P>) -> Vec<u32> {
        core.events()
            .iter()
            .filter_map(|ev| match *ev {
                SchedEvent::Started { pid, .. } => Some(pid),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_lowest_ordinal_dispatched_first() {
        let mut core = SchedCore::<Priority>::new();
        let low = core.add_process(Process::new("low", 0, 2, 5)).unwrap();
        let high = core.add_process(Process::new("high", 0, 2, 1)).unwrap();
        let mid = core.add_process(Process::new("mid", 0, 2, 3)).unwrap();
        core.run(false).unwrap();

        assert_eq!(start_order(&core), vec![high, mid, low]);
    }

    #[test]
    fn test_equal_priorities_fall_back_to_submission_order() {
        let mut core = SchedCore::<Priority>::new();
        let a = core.add_process(Process::new("a", 0, 2, 2)).unwrap();
        let b = core.add_process(Process::new("b", 0, 2, 2)).unwrap();
        core.run(false).unwrap();

        assert_eq!(start_order(&core), vec![a, b]);
    }

    #[test]
    fn test_high_priority_arrival_does_not_preempt() {
        let mut core = SchedCore::<Priority>::new();
        let slow = core.add_process(Process::new("slow", 0, 6, 9)).unwrap();
        let urgent = core.add_process(Process::new("urgent", 1, 2, 0)).unwrap();
        core.run(false).unwrap();

        assert!(core
            .events()
            .iter()
            .all(|ev| !matches!(ev, SchedEvent::Preempted { .. })));

        // "urgent" waits for "slow" to finish at t=6.
        assert_eq!(core.ctx.process(slow).start_time, Some(0));
        assert_eq!(core.ctx.process(urgent).start_time, Some(6));
        assert_eq!(core.ctx.process(urgent).waiting, 5);
    }
}
