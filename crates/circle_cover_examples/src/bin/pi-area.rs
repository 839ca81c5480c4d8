//! Estimate pi by covering a 2x2 field with one unit circle, with both
//! strategies.
use std::f64::consts::PI;

use circle_cover::prelude::*;
use circle_cover_examples::init_tracing;
use glam::Vec2;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let circles = vec![Circle::new(Vec2::new(1.0, 1.0), 1.0)];
    let num_cycles = 2_000_000;
    let size = 2.0;
    let seed = 42;

    let sequential = SequentialSimulator::try_new(circles.clone(), num_cycles, size, seed)?;
    sequential.run();
    println!("sequential estimate: {:.5}", sequential.current_estim());

    let parallel = ParallelSimulator::try_new(circles, num_cycles, size, seed)?;
    parallel.run();
    println!("parallel estimate:   {:.5}", parallel.current_estim());

    println!("pi:                  {PI:.5}");

    Ok(())
}
