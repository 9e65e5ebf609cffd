use super::state::{ProcessState, SimCtx};

/// Invariant sweep run once per tick in debug builds.
#[derive(Debug)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        if let Some(pid) = ctx.current {
            let p = ctx.process(pid);
            debug_assert_eq!(
                p.state,
                ProcessState::Running,
                "current process {pid} must be Running"
            );
            debug_assert!(
                !ctx.ready.contains(pid),
                "running process {pid} must not sit in the ready queue"
            );
        }

        for p in &ctx.processes {
            debug_assert!(
                p.remaining <= p.burst,
                "process {} remaining time {} exceeds burst {}",
                p.pid,
                p.remaining,
                p.burst
            );

            match p.state {
                ProcessState::New => debug_assert!(
                    p.arrival >= ctx.now,
                    "process {} arrived at {} but was never admitted by tick {}",
                    p.pid,
                    p.arrival,
                    ctx.now
                ),
                ProcessState::Ready => debug_assert!(
                    ctx.ready.contains(p.pid),
                    "ready process {} missing from the ready queue",
                    p.pid
                ),
                ProcessState::Running => debug_assert_eq!(
                    ctx.current,
                    Some(p.pid),
                    "running process {} is not the current process",
                    p.pid
                ),
                ProcessState::Terminated => {
                    debug_assert_eq!(
                        p.remaining, 0,
                        "terminated process {} still has remaining time",
                        p.pid
                    );
                    debug_assert!(
                        !ctx.ready.contains(p.pid),
                        "terminated process {} still present in the ready queue",
                        p.pid
                    );
                }
            }
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}
