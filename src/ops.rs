//! Stateless numeric operations over pixel buffers and scalar fields.
//!
//! Everything here is a pure function of its inputs; the layer pass
//! recomputes what it needs each layer and never mutates a field in place.

use crate::{
    buffer::{PixelBuffer, Rgb8, ScalarField},
    error::{ImpastoError, ImpastoResult},
};

/// Euclidean distance between two colors in RGB space.
pub fn color_distance(a: Rgb8, b: Rgb8) -> f32 {
    let dr = f32::from(a[0]) - f32::from(b[0]);
    let dg = f32::from(a[1]) - f32::from(b[1]);
    let db = f32::from(a[2]) - f32::from(b[2]);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Per-pixel [`color_distance`] between two same-sized images.
pub fn image_distance(a: &PixelBuffer, b: &PixelBuffer) -> ImpastoResult<ScalarField> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(ImpastoError::evaluation(
            "image_distance expects equal dimensions",
        ));
    }
    let mut diff = ScalarField::new(a.width(), a.height());
    for y in 0..a.height() {
        for x in 0..a.width() {
            diff.set(x, y, color_distance(a.get(x, y), b.get(x, y)));
        }
    }
    Ok(diff)
}

/// Integer ITU-R 601 luminance, truncated: `floor((299r + 587g + 114b) / 1000)`.
pub fn luminance(img: &PixelBuffer) -> ScalarField {
    let mut lum = ScalarField::new(img.width(), img.height());
    for y in 0..img.height() {
        for x in 0..img.width() {
            let [r, g, b] = img.get(x, y);
            let l = (299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000;
            lum.set(x, y, l as f32);
        }
    }
    lum
}

/// Separable Gaussian blur with `sigma == radius` and clamp-to-edge
/// sampling. Radius 0 is the identity.
pub fn gaussian_blur(src: &PixelBuffer, radius: u32) -> ImpastoResult<PixelBuffer> {
    if radius == 0 {
        return Ok(src.clone());
    }
    // Three sigmas of support captures essentially all of the kernel mass.
    let kernel = gaussian_kernel_q16(3 * radius, radius as f32)?;

    let (width, height) = (src.width(), src.height());
    let len = src.as_raw().len();
    let mut tmp = vec![0u8; len];
    let mut out = vec![0u8; len];

    horizontal_pass(src.as_raw(), &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    PixelBuffer::from_raw(width, height, out)
}

/// Sobel derivative pair plus edge magnitude `hypot(gx, gy)` of a
/// luminance field. `gx` is the derivative along x, `gy` along y;
/// borders are handled by replicating the edge sample.
pub struct Gradients {
    pub gx: ScalarField,
    pub gy: ScalarField,
    pub mag: ScalarField,
}

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

pub fn sobel_gradients(lum: &ScalarField) -> Gradients {
    let (w, h) = (lum.width(), lum.height());
    let mut gx = ScalarField::new(w, h);
    let mut gy = ScalarField::new(w, h);
    let mut mag = ScalarField::new(w, h);

    if w == 0 || h == 0 {
        return Gradients { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, &yy) in y_idx.iter().enumerate() {
                for (kx, &xx) in x_idx.iter().enumerate() {
                    let sample = lum.get(xx, yy);
                    sum_x += sample * SOBEL_KERNEL_X[ky][kx];
                    sum_y += sample * SOBEL_KERNEL_Y[ky][kx];
                }
            }

            gx.set(x, y, sum_x);
            gy.set(x, y, sum_y);
            mag.set(x, y, sum_x.hypot(sum_y));
        }
    }

    Gradients { gx, gy, mag }
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ImpastoResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ImpastoError::evaluation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(ImpastoError::evaluation("gaussian kernel sum is zero"));
    }

    // Quantize to Q16 and push any rounding residue into the center tap so
    // the weights sum to exactly 1.0, keeping constant images constant.
    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let mid_val = i64::from(weights[mid]);
        weights[mid] = (mid_val + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 3];
            for (ki, &kw) in k.iter().enumerate() {
                let dx = ki as i32 - radius;
                let sx = (x + dx).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 3;
                for c in 0..3 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 3;
            for c in 0..3 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 3];
            for (ki, &kw) in k.iter().enumerate() {
                let dy = ki as i32 - radius;
                let sy = (y + dy).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 3;
                for c in 0..3 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 3;
            for c in 0..3 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_distance_is_symmetric_and_nonnegative() {
        let a = [10, 200, 30];
        let b = [250, 0, 99];
        assert_eq!(color_distance(a, b), color_distance(b, a));
        assert!(color_distance(a, b) >= 0.0);
        assert_eq!(color_distance(a, a), 0.0);
    }

    #[test]
    fn color_distance_matches_euclidean() {
        let d = color_distance([0, 0, 0], [3, 4, 0]);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn image_distance_rejects_mismatched_dimensions() {
        let a = PixelBuffer::new(2, 2);
        let b = PixelBuffer::new(2, 3);
        assert!(image_distance(&a, &b).is_err());
    }

    #[test]
    fn image_distance_of_identical_images_is_zero() {
        let a = PixelBuffer::filled(3, 3, [7, 7, 7]);
        let diff = image_distance(&a, &a).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(diff.get(x, y), 0.0);
            }
        }
    }

    #[test]
    fn luminance_uses_truncated_601_weights() {
        let img = PixelBuffer::filled(1, 1, [255, 0, 0]);
        // 299 * 255 / 1000 = 76.245 -> 76
        assert_eq!(luminance(&img).get(0, 0), 76.0);
    }

    #[test]
    fn blur_radius_0_is_identity() {
        let mut src = PixelBuffer::new(2, 2);
        src.set(1, 0, [5, 6, 7]);
        assert_eq!(gaussian_blur(&src, 0).unwrap(), src);
    }

    #[test]
    fn blur_constant_image_is_identity() {
        let src = PixelBuffer::filled(5, 4, [10, 20, 30]);
        assert_eq!(gaussian_blur(&src, 3).unwrap(), src);
    }

    #[test]
    fn blur_spreads_energy_from_single_pixel() {
        let mut src = PixelBuffer::new(7, 7);
        src.set(3, 3, [255, 255, 255]);
        let out = gaussian_blur(&src, 1).unwrap();
        let lit = out
            .as_raw()
            .chunks_exact(3)
            .filter(|px| px[0] != 0)
            .count();
        assert!(lit > 1);
        assert!(out.get(3, 3)[0] < 255);
    }

    #[test]
    fn sobel_flat_field_has_zero_magnitude() {
        let mut lum = ScalarField::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                lum.set(x, y, 42.0);
            }
        }
        let g = sobel_gradients(&lum);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(g.mag.get(x, y), 0.0);
            }
        }
    }

    #[test]
    fn sobel_vertical_edge_yields_x_gradient() {
        // Left half 0, right half 100: gradient points along +x at the seam.
        let mut lum = ScalarField::new(6, 6);
        for y in 0..6 {
            for x in 3..6 {
                lum.set(x, y, 100.0);
            }
        }
        let g = sobel_gradients(&lum);
        assert!(g.gx.get(3, 3) > 0.0);
        assert_eq!(g.gy.get(3, 3), 0.0);
        assert!(g.mag.get(3, 3) > 0.0);
    }
}
