pub mod report;
pub mod workload;

pub use workload::{classroom_workload, random_workload};
