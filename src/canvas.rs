use kurbo::Point;

use crate::{
    buffer::{PixelBuffer, Rgb8},
    config::COARSEST_RADIUS,
    stroke::Stroke,
};

/// Maps a pixel-space point into the canvas's normalized drawing space.
/// All growth and seed-selection logic stays in pixel-index space; this is
/// applied exactly once, right before rasterization.
pub fn to_device_space(p: Point, width: u32, height: u32) -> Point {
    Point::new(p.x / f64::from(width), p.y / f64::from(height))
}

/// Mutable raster surface that accumulates rendered strokes. Owns its own
/// pixels, independent from the source and reference images, and persists
/// across layers: layer N's canvas is layer N+1's starting canvas.
#[derive(Clone, Debug)]
pub struct Canvas {
    pixels: PixelBuffer,
}

impl Canvas {
    /// Fresh black canvas, matching the original background.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: PixelBuffer::new(width, height),
        }
    }

    pub fn from_pixels(pixels: PixelBuffer) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Copy of the current pixels; the layer pass freezes one of these at
    /// layer start for error analysis while rasterization mutates `self`.
    pub fn snapshot(&self) -> PixelBuffer {
        self.pixels.clone()
    }

    /// Draws the stroke's polyline (or a single dot) with round caps and a
    /// solid fill, `radius` device pixels of half-width. Drawing is opaque:
    /// later strokes fully replace the pixels they cover.
    ///
    /// A one-point stroke at the coarsest radius gets a 5x wider pen so the
    /// first layer is guaranteed to cover the background.
    pub fn paint_stroke(&mut self, stroke: &Stroke, radius: u32) {
        if stroke.points.is_empty() || self.width() == 0 || self.height() == 0 {
            return;
        }
        let (w, h) = (f64::from(self.width()), f64::from(self.height()));
        let device: Vec<Point> = stroke
            .points
            .iter()
            .map(|p| Point::new(p.x * w, p.y * h))
            .collect();

        if device.len() == 1 {
            let half = if radius == COARSEST_RADIUS {
                f64::from(5 * radius)
            } else {
                f64::from(radius)
            };
            self.fill_disc(device[0], half, stroke.color);
            return;
        }

        for seg in device.windows(2) {
            self.fill_capsule(seg[0], seg[1], f64::from(radius), stroke.color);
        }
    }

    fn fill_disc(&mut self, center: Point, half: f64, color: Rgb8) {
        let (x0, x1, y0, y1) = self.clip_box(
            center.x - half,
            center.x + half,
            center.y - half,
            center.y + half,
        );
        for y in y0..=y1 {
            for x in x0..=x1 {
                let c = pixel_center(x, y);
                if (c - center).hypot() <= half {
                    self.pixels.set(x, y, color);
                }
            }
        }
    }

    fn fill_capsule(&mut self, a: Point, b: Point, half: f64, color: Rgb8) {
        let (x0, x1, y0, y1) = self.clip_box(
            a.x.min(b.x) - half,
            a.x.max(b.x) + half,
            a.y.min(b.y) - half,
            a.y.max(b.y) + half,
        );
        for y in y0..=y1 {
            for x in x0..=x1 {
                if dist_to_segment(pixel_center(x, y), a, b) <= half {
                    self.pixels.set(x, y, color);
                }
            }
        }
    }

    /// Clamps a fractional bounding box to valid pixel indices. The x1/y1
    /// bounds are inclusive.
    fn clip_box(&self, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> (u32, u32, u32, u32) {
        let w = f64::from(self.width() - 1);
        let h = f64::from(self.height() - 1);
        (
            x_min.floor().clamp(0.0, w) as u32,
            x_max.ceil().clamp(0.0, w) as u32,
            y_min.floor().clamp(0.0, h) as u32,
            y_max.ceil().clamp(0.0, h) as u32,
        )
    }
}

fn pixel_center(x: u32, y: u32) -> Point {
    Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)
}

fn dist_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 == 0.0 {
        return (p - a).hypot();
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).hypot()
}
