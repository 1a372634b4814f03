use kurbo::{Point, Vec2};

use crate::{
    buffer::{PixelBuffer, Rgb8},
    ops::{Gradients, color_distance},
};

/// Growth stops early once the canvas already matches the reference better
/// than the stroke's fixed color would, but only after this many points.
pub const MIN_STROKE_LEN: usize = 4;
pub const MAX_STROKE_LEN: usize = 16;

/// A single brush mark: an ordered polyline plus one flat fill color.
///
/// The color is sampled once from the reference image at the seed pixel and
/// never changes during growth. Points are in pixel space until the layer
/// pass maps them through [`crate::canvas::to_device_space`].
#[derive(Clone, Debug)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub color: Rgb8,
}

/// Grows a stroke from `seed`, following the isophote (the direction
/// perpendicular to the local luminance gradient) so strokes trace image
/// contours instead of crossing them.
///
/// `canvas` is the canvas snapshot taken at layer start, not the live
/// surface; see the layer pass for why.
pub fn build_stroke(
    seed: (u32, u32),
    reference: &PixelBuffer,
    canvas: &PixelBuffer,
    grads: &Gradients,
    radius: u32,
) -> Stroke {
    let (mut x, mut y) = seed;
    let color = reference.get(x, y);
    let mut points = vec![Point::new(f64::from(x), f64::from(y))];
    let mut last_dir = Vec2::ZERO;

    for step in 1..MAX_STROKE_LEN {
        if step > MIN_STROKE_LEN {
            let here = reference.get(x, y);
            if color_distance(here, canvas.get(x, y)).abs()
                < color_distance(here, color).abs()
            {
                break;
            }
        }

        // Flat region: no preferred direction to follow.
        if grads.mag.get(x, y) == 0.0 {
            break;
        }

        let mut dir = Vec2::new(
            -f64::from(grads.gy.get(x, y)),
            f64::from(grads.gx.get(x, y)),
        );

        // Keep consecutive steps from doubling back on themselves.
        if last_dir.dot(dir) < 0.0 {
            dir = -dir;
        }
        let dir = dir / dir.hypot();

        let nx = (f64::from(x) + f64::from(radius) * dir.x).floor().abs();
        let ny = (f64::from(y) + f64::from(radius) * dir.y).floor().abs();
        if nx > f64::from(canvas.width()) - 1.0 || ny > f64::from(canvas.height()) - 1.0 {
            break;
        }

        x = nx as u32;
        y = ny as u32;
        last_dir = dir;
        points.push(Point::new(nx, ny));
    }

    Stroke { points, color }
}
