pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Process, ProcessState, SchedCore, SchedError, SchedEvent};
pub use scheduler::{Fcfs, Policy, Priority, RoundRobin, Sjf};
