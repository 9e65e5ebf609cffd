use rand::prelude::*;

use crate::core::state::{Process, Ticks};

/// Fixed four-process workload used by the demo driver: staggered arrivals,
/// mixed bursts, priorities deliberately uncorrelated with burst length.
pub fn classroom_workload() -> Vec<Process> {
    vec![
        Process::new("P1", 0, 8, 3),
        Process::new("P2", 1, 4, 1),
        Process::new("P3", 2, 9, 4),
        Process::new("P4", 3, 5, 2),
    ]
}

/// Seeded random workload: at each tick a process arrives with probability
/// `p_arrival`, short with probability `p_short`. Deterministic per seed.
pub fn random_workload(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_burst: i64,
    long_burst: i64,
    seed: u64,
) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut procs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_burst
            } else {
                long_burst
            };
            let priority = rng.random_range(0u8..10);

            procs.push(Process::new(
                format!("T{}", procs.len() + 1),
                t as i64,
                burst,
                priority,
            ));
        }
    }

    procs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_workload() {
        let a = random_workload(50, 0.3, 0.5, 2, 7, 7);
        let b = random_workload(50, 0.3, 0.5, 2, 7, 7);

        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            // Pids differ (every record is distinct); the parameters match.
            assert_eq!(x.name, y.name);
            assert_eq!(x.arrival, y.arrival);
            assert_eq!(x.burst, y.burst);
            assert_eq!(x.priority, y.priority);
        }
    }

    #[test]
    fn test_bursts_come_from_the_two_classes() {
        let procs = random_workload(200, 0.4, 0.5, 2, 7, 1);
        assert!(!procs.is_empty());
        assert!(procs.iter().all(|p| p.burst == 2 || p.burst == 7));
    }
}
