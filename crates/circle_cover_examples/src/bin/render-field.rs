//! Render a sampled field to a PNG: circle disks plus every generated point,
//! colored by classification.
use circle_cover::prelude::*;
use circle_cover_examples::{init_tracing, render_simulation_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let sim = ParallelSimulator::with_random_circles(40, 200_000, 100.0, 2025);
    sim.run();

    println!(
        "estimated covered area: {:.1} of {:.1}",
        sim.current_estim(),
        sim.size() * sim.size()
    );

    let config = RenderConfig::new(1000).with_background([18, 18, 18]);
    let out = "render-field.png";
    render_simulation_to_png(&sim, &config, out)?;
    println!("wrote {out}");

    Ok(())
}
