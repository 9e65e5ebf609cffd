use sched_sim::scheduler::Policy;
use sched_sim::sim::{classroom_workload, random_workload, report};
use sched_sim::{Fcfs, Priority, Process, RoundRobin, SchedCore, Sjf};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let workload = classroom_workload();
    println!("Comparing policies on a {}-process workload", workload.len());

    run_and_report(SchedCore::<Fcfs>::new(), &workload);
    run_and_report(SchedCore::<Sjf>::new(), &workload);
    run_and_report(SchedCore::<Priority>::new(), &workload);
    run_and_report(SchedCore::<RoundRobin>::with_quantum(3), &workload);

    let random = random_workload(40, 0.3, 0.5, 3, 7, 42);
    println!(
        "\nAverage waiting time on a random workload ({} processes, seed 42):",
        random.len()
    );
    print_avg_waiting(SchedCore::<Fcfs>::new(), &random);
    print_avg_waiting(SchedCore::<Sjf>::new(), &random);
    print_avg_waiting(SchedCore::<Priority>::new(), &random);
    print_avg_waiting(SchedCore::<RoundRobin>::with_quantum(3), &random);
}

fn run_and_report<P: Policy>(mut core: SchedCore<P>, workload: &[Process]) {
    core.add_processes(workload.iter().cloned());

    match core.run(false) {
        Ok(()) => {
            println!("\n=== {} ===", core.policy.name());
            print!("{}", report::metrics_table(core.processes()));
            print!("{}", report::summary(&core));
            println!("{}", report::gantt(core.processes(), core.events()));
        }
        Err(err) => eprintln!("{} simulation failed: {err}", core.policy.name()),
    }
}

fn print_avg_waiting<P: Policy>(mut core: SchedCore<P>, workload: &[Process]) {
    core.add_processes(workload.iter().cloned());

    match core.run(false) {
        Ok(()) => println!(
            "  {:<12} {:>6.2} ticks",
            core.policy.name(),
            core.avg_waiting_time()
        ),
        Err(err) => eprintln!("{} simulation failed: {err}", core.policy.name()),
    }
}
