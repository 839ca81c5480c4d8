//! Shared helpers for the example binaries: tracing setup and PNG rendering
//! of a simulated field.
use anyhow::Result;
use circle_cover::prelude::*;
use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

/// Initialize a compact tracing subscriber for the examples.
///
/// Respects `RUST_LOG`; defaults to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();
}

/// Configuration for rendering a simulation to a PNG.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image edge length in pixels (the field is square).
    pub image_size: u32,
    /// Background color.
    pub background: [u8; 3],
    /// Fill color for the circle disks.
    pub circle_color: [u8; 3],
    /// Color for points classified inside.
    pub inside_color: [u8; 3],
    /// Color for points classified outside.
    pub outside_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_size: 800,
            background: [26, 26, 26],
            circle_color: [90, 90, 90],
            inside_color: [240, 110, 60],
            outside_color: [70, 130, 220],
        }
    }
}

impl RenderConfig {
    /// Create a config with the given output image size.
    pub fn new(image_size: u32) -> Self {
        Self {
            image_size,
            ..Default::default()
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    /// Set the circle fill color.
    pub fn with_circle_color(mut self, circle_color: [u8; 3]) -> Self {
        self.circle_color = circle_color;
        self
    }

    /// Set the colors used for inside/outside points.
    pub fn with_point_colors(mut self, inside: [u8; 3], outside: [u8; 3]) -> Self {
        self.inside_color = inside;
        self.outside_color = outside;
        self
    }
}

/// Render the simulator's circles and currently committed points to a PNG.
///
/// Safe to call while the simulation is still running; only committed points
/// are drawn.
pub fn render_simulation_to_png(
    sim: &dyn Simulator,
    config: &RenderConfig,
    path: &str,
) -> Result<()> {
    let px = config.image_size;
    let scale = px as f32 / sim.size();
    let mut image = RgbImage::from_pixel(px, px, Rgb(config.background));

    // Circle disks first, points on top.
    for circle in sim.circles() {
        fill_disk(&mut image, circle, scale, Rgb(config.circle_color));
    }

    for point in sim.points() {
        let x = (point.x() * scale) as i64;
        let y = (point.y() * scale) as i64;
        let color = if point.is_inside() {
            Rgb(config.inside_color)
        } else {
            Rgb(config.outside_color)
        };
        put_pixel_checked(&mut image, x, y, color);
    }

    image.save(path)?;
    Ok(())
}

fn fill_disk(image: &mut RgbImage, circle: &Circle, scale: f32, color: Rgb<u8>) {
    let center = circle.center() * scale;
    let radius = circle.radius() * scale;
    let radius_squared = radius * radius;

    let min_x = (center.x - radius).floor() as i64;
    let max_x = (center.x + radius).ceil() as i64;
    let min_y = (center.y - radius).floor() as i64;
    let max_y = (center.y + radius).ceil() as i64;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= radius_squared {
                put_pixel_checked(image, x, y, color);
            }
        }
    }
}

fn put_pixel_checked(image: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, color);
    }
}
