use super::Policy;
use crate::core::state::{RankBy, ReadyQueue, SimCtx};

/// Shortest-Job-First, non-preemptive: at every idle dispatch point the
/// ready process with the smallest burst time runs to completion. A shorter
/// job arriving mid-execution never interrupts the running one, so the
/// schedule is optimal only among the non-preempting choices available at
/// each dispatch.
pub struct Sjf;

impl Policy for Sjf {
    fn init(ctx: &mut SimCtx) -> Self {
        ctx.ready = ReadyQueue::new_ranked(RankBy::Burst);
        Self
    }

    fn name(&self) -> &'static str {
        "SJF"
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

    #[test]
    fn test_shortest_ready_job_runs_after_first_completion() {
        let mut core = SchedCore::<Sjf>::new();
        let p1 = core.add_process(Process::new("P1", 0, 8, 0)).unwrap();
        let p2 = core.add_process(Process::new("P2", 1, 4, 0)).unwrap();
        let p3 = core.add_process(Process::new("P3", 2, 9, 0)).unwrap();
        let p4 = core.add_process(Process::new("P4", 3, 5, 0)).unwrap();
        core.run(false).unwrap();

        // P1 is alone at t=0 and, being non-preemptible, runs to t=8 even
        // though shorter jobs arrive meanwhile. Then burst order decides.
        let starts: Vec<_> = core
            .events()
            .iter()
            .filter_map(|ev| match *ev {
                SchedEvent::Started { pid, at } => Some((pid, at)),
                _ => None,
            })
            .collect();
        assert_eq!(
            starts,
            vec![(p1, 0), (p2, 8), (p4, 12), (p3, 17)]
        );
        assert_eq!(core.total_execution_time(), 26);
    }

    #[test]
    fn test_never_preempts() {
        let mut core = SchedCore::<Sjf>::new();
        core.add_process(Process::new("long", 0, 10, 0)).unwrap();
        core.add_process(Process::new("tiny", 1, 1, 0)).unwrap();
        core.run(false).unwrap();

        // Once a process starts, no other start is recorded until it
        // completes.
        let mut running = None;
        for ev in core.events() {
            match *ev {
                SchedEvent::Started { pid, .. } => {
                    assert_eq!(running, None, "dispatch while another process runs");
                    running = Some(pid);
                }
                SchedEvent::Completed { pid, .. } => {
                    assert_eq!(running, Some(pid));
                    running = None;
                }
                SchedEvent::Preempted { .. } => panic!("SJF must never preempt"),
            }
        }
    }

    #[test]
    fn test_equal_bursts_fall_back_to_submission_order() {
        let mut core = SchedCore::<Sjf>::new();
        let a = core.add_process(Process::new("a", 0, 3, 0)).unwrap();
        let b = core.add_process(Process::new("b", 0, 3, 0)).unwrap();
        let c = core.add_process(Process::new("c", 0, 3, 0)).unwrap();
        core.run(false).unwrap();

        let starts: Vec<_> = core
            .events()
            .iter()
            .filter_map(|ev| match *ev {
                SchedEvent::Started { pid, .. } => Some(pid),
                _ => None,
            })
            .collect();
        assert_eq!(starts, vec![a, b, c]);
    }
}
