use super::state::{Pid, Ticks};

/// Discrete scheduling event, tagged with the tick at which it occurred.
/// The full trace of a run is enough to rebuild a Gantt-style display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedEvent {
    Started { pid: Pid, at: Ticks },
    // Quantum expired with a rival waiting (Round-Robin only)
    Preempted { pid: Pid, at: Ticks },
    Completed { pid: Pid, at: Ticks },
}

impl SchedEvent {
    pub fn pid(&self) -> Pid {
        match *self {
            Self::Started { pid, .. } | Self::Preempted { pid, .. } | Self::Completed { pid, .. } => {
                pid
            }
        }
    }

    pub fn at(&self) -> Ticks {
        match *self {
            Self::Started { at, .. } | Self::Preempted { at, .. } | Self::Completed { at, .. } => at
        }
    }
}
