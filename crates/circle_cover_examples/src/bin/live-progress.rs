//! Poll estimate and progress from the main thread while the parallel
//! simulator runs on a worker.
use std::thread;
use std::time::{Duration, Instant};

use circle_cover::prelude::*;
use circle_cover_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let sim = ParallelSimulator::with_random_circles(40, 5_000_000, 100.0, 7);
    let started = Instant::now();

    thread::scope(|scope| {
        scope.spawn(|| sim.run());

        loop {
            let cycle = sim.current_cycle();
            let percent = 100.0 * cycle as f64 / sim.num_cycles() as f64;
            let produced = sim.points().count();
            println!(
                "[{:6.2}s] {:6.2}% ({cycle} cycles, {produced} points) estimate: {:.3}",
                started.elapsed().as_secs_f64(),
                percent,
                sim.current_estim()
            );

            if cycle == sim.num_cycles() {
                break;
            }
            thread::sleep(Duration::from_millis(100));
        }
    });

    println!(
        "final estimate after {:.2}s: {:.4}",
        started.elapsed().as_secs_f64(),
        sim.current_estim()
    );

    Ok(())
}
