#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_simulation_to_png, RenderConfig};
