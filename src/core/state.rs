use keyed_priority_queue::KeyedPriorityQueue;
use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use super::event::SchedEvent;

pub type Pid = u32;
pub type Ticks = u64;

// Pids are unique for the lifetime of the program, even across clones.
static NEXT_PID: AtomicU32 = AtomicU32::new(1);

fn alloc_pid() -> Pid {
    NEXT_PID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Terminated,
}

/// One simulated task. Static parameters are set at construction; the
/// scheduling fields are mutated by the simulation and cleared by `reset`.
#[derive(Debug)]
pub struct Process {
    pub pid: Pid,
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    /// Lower ordinal = higher priority.
    pub priority: u8,
    pub state: ProcessState,
    pub remaining: Ticks,
    pub waiting: Ticks,
    pub turnaround: Ticks,
    pub response: Ticks,
    pub start_time: Option<Ticks>,
}

impl Process {
    /// Build a process, clamping out-of-range inputs instead of failing:
    /// negative arrival becomes 0, non-positive burst becomes 1.
    pub fn new(name: impl Into<String>, arrival: i64, burst: i64, priority: u8) -> Self {
        let name = name.into();

        let arrival = if arrival < 0 {
            warn!("process {name:?}: negative arrival time {arrival} clamped to 0");
            0
        } else {
            arrival as Ticks
        };

        let burst = if burst < 1 {
            warn!("process {name:?}: non-positive burst time {burst} clamped to 1");
            1
        } else {
            burst as Ticks
        };

        Self {
            pid: alloc_pid(),
            name,
            arrival,
            burst,
            priority,
            state: ProcessState::New,
            remaining: burst,
            waiting: 0,
            turnaround: 0,
            response: 0,
            start_time: None,
        }
    }

    /// Return to the New state with all metrics cleared. The pid is kept so
    /// the same record can be re-run under a different policy.
    pub fn reset(&mut self) {
        self.state = ProcessState::New;
        self.remaining = self.burst;
        self.waiting = 0;
        self.turnaround = 0;
        self.response = 0;
        self.start_time = None;
    }

    pub fn is_complete(&self) -> bool {
        self.state == ProcessState::Terminated || self.remaining == 0
    }

    /// Finalize metrics at completion. Turnaround and waiting are never
    /// mutated again once the process is Terminated.
    pub fn finalize(&mut self, completion: Ticks) {
        self.turnaround = completion - self.arrival;
        self.waiting = self.turnaround.saturating_sub(self.burst);
        self.remaining = 0;
        self.state = ProcessState::Terminated;
    }
}

// A clone is a distinct process and gets a fresh pid, never the source's.
impl Clone for Process {
    fn clone(&self) -> Self {
        Self {
            pid: alloc_pid(),
            name: self.name.clone(),
            arrival: self.arrival,
            burst: self.burst,
            priority: self.priority,
            state: self.state,
            remaining: self.remaining,
            waiting: self.waiting,
            turnaround: self.turnaround,
            response: self.response,
            start_time: self.start_time,
        }
    }
}

/// Selection key for ranked ready queues: smallest value wins, ties go to the
/// earliest enqueued pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub value: u64,
    pub seq: u64,
}

// KeyedPriorityQueue is a max-heap, so we need to flip Rank's Ord
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .value
            .cmp(&self.value)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Which process field a ranked queue orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Burst,
    Priority,
}

impl RankBy {
    fn value_of(self, p: &Process) -> u64 {
        match self {
            Self::Burst => p.burst,
            Self::Priority => p.priority as u64,
        }
    }
}

/// Ready queue of dispatchable pids. FIFO for arrival-ordered policies,
/// ranked for SJF/Priority selection. Ranked pops are tie-break-equivalent
/// to a stable scan of a FIFO queue: the enqueue sequence number breaks ties.
#[derive(Debug)]
pub enum ReadyQueue {
    Fifo {
        procs: VecDeque<Pid>,
    },
    Ranked {
        procs: KeyedPriorityQueue<Pid, Rank>,
        by: RankBy,
        seq: u64,
    },
}

impl ReadyQueue {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            procs: VecDeque::new(),
        }
    }

    pub fn new_ranked(by: RankBy) -> Self {
        Self::Ranked {
            procs: KeyedPriorityQueue::new(),
            by,
            seq: 0,
        }
    }

    pub fn push(&mut self, p: &Process) {
        debug_assert!(
            !self.contains(p.pid),
            "process {} already present in the ready queue",
            p.pid
        );

        match self {
            Self::Fifo { procs } => procs.push_back(p.pid),
            Self::Ranked { procs, by, seq } => {
                *seq += 1;
                procs.push(
                    p.pid,
                    Rank {
                        value: by.value_of(p),
                        seq: *seq,
                    },
                );
            }
        }
    }

    pub fn pop(&mut self) -> Option<Pid> {
        match self {
            Self::Fifo { procs } => procs.pop_front(),
            Self::Ranked { procs, .. } => procs.pop().map(|(pid, _)| pid),
        }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        match self {
            Self::Fifo { procs } => procs.contains(&pid),
            Self::Ranked { procs, .. } => procs.iter().any(|(p, _)| *p == pid),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { procs } => procs.len(),
            Self::Ranked { procs, .. } => procs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        match self {
            Self::Fifo { procs } => procs.clear(),
            Self::Ranked { procs, seq, .. } => {
                *procs = KeyedPriorityQueue::new();
                *seq = 0;
            }
        }
    }
}

/// Mutable state of one simulation run: the process table, ready queue,
/// current-process slot, logical clock and event trace. Policies drive it
/// through the primitives below; nothing else mutates it mid-run.
#[derive(Debug)]
pub struct SimCtx {
    pub processes: Vec<Process>,
    pub pid_index: FxHashMap<Pid, usize>,
    pub ready: ReadyQueue,
    pub current: Option<Pid>,
    pub now: Ticks,
    pub events: Vec<SchedEvent>,
    pub trace: bool,
}

impl SimCtx {
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            pid_index: FxHashMap::default(),
            ready: ReadyQueue::new_fifo(),
            current: None,
            now: 0,
            events: Vec::new(),
            trace: false,
        }
    }

    pub fn process(&self, pid: Pid) -> &Process {
        &self.processes[self.pid_index[&pid]]
    }

    pub fn process_mut(&mut self, pid: Pid) -> &mut Process {
        let idx = self.pid_index[&pid];
        &mut self.processes[idx]
    }

    /// Move every New process whose arrival time has been reached into the
    /// ready queue, in process-list order.
    pub fn admit_arrivals(&mut self) {
        for i in 0..self.processes.len() {
            if self.processes[i].state == ProcessState::New
                && self.processes[i].arrival <= self.now
            {
                self.processes[i].state = ProcessState::Ready;
                self.ready.push(&self.processes[i]);
            }
        }
    }

    /// Start (or resume) a process on the CPU. Start and response times are
    /// recorded at most once, on the first dispatch.
    pub fn dispatch(&mut self, pid: Pid) {
        debug_assert!(self.current.is_none(), "CPU already running a process");

        self.current = Some(pid);
        let now = self.now;
        let p = self.process_mut(pid);
        p.state = ProcessState::Running;
        if p.start_time.is_none() {
            p.start_time = Some(now);
            p.response = now - p.arrival;
        }
        self.emit(SchedEvent::Started { pid, at: now });
    }

    /// Return the running process to the back of the ready queue. No-op when
    /// the CPU is idle; a finished process is never requeued.
    pub fn preempt_current(&mut self) {
        let Some(pid) = self.current.take() else {
            return;
        };

        let idx = self.pid_index[&pid];
        if self.processes[idx].remaining > 0 {
            self.processes[idx].state = ProcessState::Ready;
            self.ready.push(&self.processes[idx]);
            self.emit(SchedEvent::Preempted { pid, at: self.now });
        }
    }

    /// Terminate the running process. Completion happens at the end of the
    /// current time unit, so the completion time is `now + 1`.
    pub fn complete_current(&mut self) {
        let Some(pid) = self.current.take() else {
            return;
        };

        let completion = self.now + 1;
        self.process_mut(pid).finalize(completion);
        self.emit(SchedEvent::Completed { pid, at: completion });
    }

    /// One waiting-time unit for every process sitting in the ready queue.
    pub fn accrue_waiting(&mut self) {
        for p in &mut self.processes {
            if p.state == ProcessState::Ready {
                p.waiting += 1;
            }
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn all_terminated(&self) -> bool {
        self.processes
            .iter()
            .all(|p| p.state == ProcessState::Terminated)
    }

    /// Stable sort of the process list by arrival time; submission order
    /// breaks ties.
    pub fn sort_by_arrival(&mut self) {
        self.processes.sort_by_key(|p| p.arrival);
        self.reindex();
    }

    /// Clear clock, queue, CPU and trace, and return every process to New.
    pub fn reset(&mut self) {
        self.now = 0;
        self.current = None;
        self.ready.clear();
        self.events.clear();
        for p in &mut self.processes {
            p.reset();
        }
    }

    fn reindex(&mut self) {
        self.pid_index = self
            .processes
            .iter()
            .enumerate()
            .map(|(i, p)| (p.pid, i))
            .collect();
    }

    fn emit(&mut self, event: SchedEvent) {
        if self.trace {
            info!("{event:?}");
        } else {
            debug!("{event:?}");
        }
        self.events.push(event);
    }
}

impl Default for SimCtx {
    fn default() -> Self {
        Self::new()
    }
}
