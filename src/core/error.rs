use thiserror::Error;

use super::state::{Pid, Ticks};

/// Scheduling-setup failures. All of them are reported before the run loop
/// starts; once validation passes, a simulation runs to completion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedError {
    #[error("no processes to schedule")]
    EmptyProcessSet,

    #[error("process {0} is already registered with this scheduler")]
    DuplicatePid(Pid),

    #[error("process {name:?} has invalid burst time {burst}")]
    InvalidBurstTime { name: String, burst: Ticks },
}
