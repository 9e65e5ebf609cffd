use average::Estimate;
use log::{info, warn};

use super::error::SchedError;
use super::event::SchedEvent;
use super::observer::Observer;
use super::state::{Pid, Process, SimCtx, Ticks};
use crate::scheduler::Policy;

/// Simulation driver: owns the run state and executes the policy-agnostic
/// per-tick cycle, delegating only the dispatch decision to `P`.
pub struct SchedCore<P: Policy> {
    pub ctx: SimCtx,
    pub policy: P,
    observer: Observer,
}

impl<P: Policy> SchedCore<P> {
    pub fn new() -> Self {
        let mut ctx = SimCtx::new();
        let policy = P::init(&mut ctx);
        Self {
            ctx,
            policy,
            observer: Observer::new(),
        }
    }

    /// Register a process for the next run. Rejected if its pid collides
    /// with an already-registered process.
    pub fn add_process(&mut self, p: Process) -> Result<Pid, SchedError> {
        if self.ctx.pid_index.contains_key(&p.pid) {
            return Err(SchedError::DuplicatePid(p.pid));
        }

        let pid = p.pid;
        self.ctx.pid_index.insert(pid, self.ctx.processes.len());
        self.ctx.processes.push(p);
        Ok(pid)
    }

    /// Add a batch of processes, returning how many were accepted.
    pub fn add_processes(&mut self, procs: impl IntoIterator<Item = Process>) -> usize {
        let mut added = 0;
        for p in procs {
            match self.add_process(p) {
                Ok(_) => added += 1,
                Err(err) => warn!("skipping process: {err}"),
            }
        }
        added
    }

    /// Run the simulation to completion. The process set is validated first;
    /// an invalid set fails the run with no partial results. State is reset
    /// before the loop, so re-running the same driver yields identical
    /// metrics.
    pub fn run(&mut self, verbose: bool) -> Result<(), SchedError> {
        self.validate()?;

        self.ctx.reset();
        self.ctx.trace = verbose;

        if verbose {
            info!(
                "starting {} simulation ({}, {} processes)",
                self.policy.name(),
                if self.policy.preemptive() {
                    "preemptive"
                } else {
                    "non-preemptive"
                },
                self.ctx.processes.len()
            );
        }

        self.policy.prepare(&mut self.ctx);

        while !self.ctx.all_terminated() {
            self.tick();
        }

        if verbose {
            info!(
                "{} simulation completed in {} ticks",
                self.policy.name(),
                self.ctx.now
            );
        }

        Ok(())
    }

    // One logical time unit. The step order is load-bearing: waiting time
    // accrues after completion handling and before the clock advances, so a
    // process is charged exactly once per tick it is ready-but-not-running.
    fn tick(&mut self) {
        self.ctx.admit_arrivals();
        self.policy.select(&mut self.ctx);

        if let Some(pid) = self.ctx.current {
            self.ctx.process_mut(pid).remaining -= 1;
            self.policy.tick(&mut self.ctx);

            if self.ctx.process(pid).remaining == 0 {
                self.ctx.complete_current();
            }
        }

        self.ctx.accrue_waiting();
        self.ctx.advance_time(1);
        self.observer.observe(&self.ctx);
    }

    fn validate(&self) -> Result<(), SchedError> {
        if self.ctx.processes.is_empty() {
            return Err(SchedError::EmptyProcessSet);
        }

        for p in &self.ctx.processes {
            if p.burst == 0 {
                return Err(SchedError::InvalidBurstTime {
                    name: p.name.clone(),
                    burst: p.burst,
                });
            }
        }

        Ok(())
    }

    /// Prepare for a fresh run: clock, CPU, queue and per-process metrics
    /// are all cleared. Process records (and their pids) are kept.
    pub fn reset(&mut self) {
        self.ctx.reset();
    }

    pub fn processes(&self) -> &[Process] {
        &self.ctx.processes
    }

    pub fn events(&self) -> &[SchedEvent] {
        &self.ctx.events
    }

    pub fn process_count(&self) -> usize {
        self.ctx.processes.len()
    }

    pub fn total_execution_time(&self) -> Ticks {
        self.ctx.now
    }

    pub fn avg_waiting_time(&self) -> f64 {
        avg(self.ctx.processes.iter().map(|p| p.waiting as f64))
    }

    pub fn avg_turnaround_time(&self) -> f64 {
        avg(self.ctx.processes.iter().map(|p| p.turnaround as f64))
    }

    pub fn avg_response_time(&self) -> f64 {
        avg(self.ctx.processes.iter().map(|p| p.response as f64))
    }
}

impl<P: Policy> Default for SchedCore<P> {
    fn default() -> Self {
        Self::new()
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Fcfs;

    #[test]
    fn test_duplicate_pid_rejected() {
        let mut core = SchedCore::<Fcfs>::new();
        let p = Process::new("p", 0, 3, 0);
        let mut dup = p.clone();
        dup.pid = p.pid;

        core.add_process(p).unwrap();
        assert!(matches!(
            core.add_process(dup),
            Err(SchedError::DuplicatePid(_))
        ));
        assert_eq!(core.process_count(), 1);
    }

    #[test]
    fn test_empty_process_set_fails_run() {
        let mut core = SchedCore::<Fcfs>::new();
        assert_eq!(core.run(false), Err(SchedError::EmptyProcessSet));
    }

    #[test]
    fn test_invalid_burst_fails_run_without_side_effects() {
        let mut core = SchedCore::<Fcfs>::new();
        core.add_process(Process::new("ok", 0, 3, 0)).unwrap();
        core.ctx.processes[0].burst = 0;

        assert!(matches!(
            core.run(false),
            Err(SchedError::InvalidBurstTime { .. })
        ));
        assert_eq!(core.process_count(), 1);
        assert!(core.events().is_empty());
        assert_eq!(core.total_execution_time(), 0);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut core = SchedCore::<Fcfs>::new();
        core.add_process(Process::new("a", 0, 4, 0)).unwrap();
        core.add_process(Process::new("b", 2, 3, 0)).unwrap();

        core.run(false).unwrap();
        let first = (
            core.avg_waiting_time(),
            core.avg_turnaround_time(),
            core.avg_response_time(),
            core.total_execution_time(),
        );

        core.reset();
        core.run(false).unwrap();
        let second = (
            core.avg_waiting_time(),
            core.avg_turnaround_time(),
            core.avg_response_time(),
            core.total_execution_time(),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_accrued_waiting_matches_final_metrics() {
        let mut core = SchedCore::<Fcfs>::new();
        core.add_process(Process::new("a", 0, 8, 0)).unwrap();
        core.add_process(Process::new("b", 1, 4, 0)).unwrap();
        core.run(false).unwrap();

        // The per-tick accrual and the turnaround - burst identity must
        // agree for every process.
        for p in core.processes() {
            assert_eq!(p.waiting, p.turnaround - p.burst);
        }
    }

    #[test]
    fn test_averages_are_zero_for_empty_set() {
        let core = SchedCore::<Fcfs>::new();
        assert_eq!(core.avg_waiting_time(), 0.0);
        assert_eq!(core.avg_turnaround_time(), 0.0);
        assert_eq!(core.avg_response_time(), 0.0);
    }
}
