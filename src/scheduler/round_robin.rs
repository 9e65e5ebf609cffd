use log::warn;

use super::{Policy, DEFAULT_QUANTUM};
use crate::core::driver::SchedCore;
use crate::core::state::{ReadyQueue, SimCtx, Ticks};

/// Round-Robin: preemptive time slicing with a fixed quantum. A process
/// whose quantum expires while a rival is ready goes to the back of the
/// queue; with no rival waiting it simply keeps the CPU on a fresh quantum.
pub struct RoundRobin {
    quantum: Ticks,
    quantum_left: Ticks,
}

impl RoundRobin {
    pub fn with_quantum(quantum: Ticks) -> Self {
        let quantum = if quantum == 0 {
            warn!("time quantum 0 clamped to 1");
            1
        } else {
            quantum
        };

        Self {
            quantum,
            quantum_left: quantum,
        }
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Policy for RoundRobin {
    fn init(ctx: &mut SimCtx) -> Self {
        ctx.ready = ReadyQueue::new_fifo();
        Self::with_quantum(DEFAULT_QUANTUM)
    }

    fn name(&self) -> &'static str {
        "Round Robin"
    }

    fn preemptive(&self) -> bool {
        true
    }

    fn prepare(&mut self, _ctx: &mut SimCtx) {
        self.quantum_left = self.quantum;
    }

    fn select(&mut self, ctx: &mut SimCtx) {
        if ctx.current.is_some() && self.quantum_left > 0 {
            return;
        }

        if ctx.ready.is_empty() {
            // Quantum expired with no rival: the running process keeps the
            // CPU on a fresh quantum rather than being idled.
            if ctx.current.is_some() {
                self.quantum_left = self.quantum;
            }
            return;
        }

        ctx.preempt_current();
        if let Some(pid) = ctx.ready.pop() {
            ctx.dispatch(pid);
            self.quantum_left = self.quantum;
        }
    }

    fn tick(&mut self, _ctx: &mut SimCtx) {
        self.quantum_left -= 1;
    }
}

impl SchedCore<RoundRobin> {
    /// Driver with an explicit time quantum (the default is
    /// `DEFAULT_QUANTUM`).
    pub fn with_quantum(quantum: Ticks) -> Self {
        let mut core = Self::new();
        core.policy = RoundRobin::with_quantum(quantum);
        core
    }
}
