pub mod driver;
pub mod error;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use error::SchedError;
pub use event::SchedEvent;
pub use state::{Pid, Process, ProcessState, Rank, RankBy, ReadyQueue, SimCtx, Ticks};
