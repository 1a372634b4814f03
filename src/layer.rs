//! One painting pass at a fixed brush radius.
//!
//! The pass blurs the source into a reference, measures where the canvas
//! still diverges from it, seeds one stroke per poorly-matched grid cell,
//! and rasterizes the strokes in shuffled order.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::{
    buffer::{PixelBuffer, ScalarField},
    canvas::{Canvas, to_device_space},
    config::COARSEST_RADIUS,
    error::ImpastoResult,
    ops::{gaussian_blur, image_distance, luminance, sobel_gradients},
    stroke::build_stroke,
};

/// A grid cell only seeds a stroke once its truncated mean error exceeds
/// this, except at the coarsest radius where every cell paints.
pub const THRESHOLD: i64 = 10;
/// Grid cell side as a multiple of the brush radius.
pub const GRID_SIZE: u32 = 1;

/// Picks one stroke seed per grid cell whose error warrants repainting.
///
/// Cells are `GRID_SIZE * radius` on a side (clamped to the image so the
/// coarsest layer can still cover images smaller than one cell), aligned
/// to the origin; partial cells at the right/bottom edges are dropped.
/// The seed is the cell's first maximum of `diff` in row-major order.
pub fn select_seeds(diff: &ScalarField, radius: u32) -> Vec<(u32, u32)> {
    let (width, height) = (diff.width(), diff.height());
    let grid = (GRID_SIZE * radius).min(width).min(height);
    if grid == 0 {
        return Vec::new();
    }

    let mut seeds = Vec::new();
    for cx in 0..width / grid {
        for cy in 0..height / grid {
            let (x, y) = (cx * grid, cy * grid);

            let mut sum = 0.0f64;
            let mut best = (x, y);
            let mut best_v = f32::NEG_INFINITY;
            for dy in 0..grid {
                for dx in 0..grid {
                    let v = diff.get(x + dx, y + dy);
                    sum += f64::from(v);
                    if v > best_v {
                        best_v = v;
                        best = (x + dx, y + dy);
                    }
                }
            }

            // Truncated mean; quantization deliberately suppresses
            // low-magnitude noise.
            let total_error = (sum / f64::from(grid * grid)).floor() as i64;
            if total_error > THRESHOLD || radius == COARSEST_RADIUS {
                seeds.push(best);
            }
        }
    }
    seeds
}

/// Paints one layer onto `canvas` and returns the number of strokes.
///
/// Error analysis and stroke-growth termination both read a canvas
/// snapshot frozen at layer start; only rasterization sees (and produces)
/// the incrementally updated surface. Later strokes in the same layer
/// therefore occlude earlier ones without influencing their growth.
#[tracing::instrument(skip(canvas, source, rng))]
pub fn render_layer(
    canvas: &mut Canvas,
    source: &PixelBuffer,
    radius: u32,
    rng: &mut impl Rng,
) -> ImpastoResult<usize> {
    let reference = gaussian_blur(source, radius)?;
    let start = canvas.snapshot();
    let diff = image_distance(&reference, &start)?;

    let mut seeds = select_seeds(&diff, radius);
    debug!(seeds = seeds.len(), "selected stroke seeds");

    let grads = sobel_gradients(&luminance(&reference));
    seeds.shuffle(rng);

    let (w, h) = (canvas.width(), canvas.height());
    for &seed in &seeds {
        let mut stroke = build_stroke(seed, &reference, &start, &grads, radius);
        for p in &mut stroke.points {
            *p = to_device_space(*p, w, h);
        }
        canvas.paint_stroke(&stroke, radius);
    }

    Ok(seeds.len())
}
