//! Top-level driver: runs the layer pass over a descending radius list.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::{
    buffer::PixelBuffer,
    canvas::Canvas,
    config::RenderOpts,
    error::ImpastoResult,
    layer::render_layer,
};

/// Paints every radius in `radii`, in the given order, onto `canvas`.
/// After each completed layer, `emit` receives the layer index and the
/// canvas so the caller can persist intermediate snapshots. An empty
/// radius list leaves the canvas untouched and emits nothing.
pub fn render_with<F>(
    canvas: &mut Canvas,
    source: &PixelBuffer,
    radii: &[u32],
    opts: &RenderOpts,
    mut emit: F,
) -> ImpastoResult<()>
where
    F: FnMut(usize, &Canvas) -> ImpastoResult<()>,
{
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for (layer, &radius) in radii.iter().enumerate() {
        info!(layer, radius, "painting layer");
        let t = Instant::now();
        let strokes = render_layer(canvas, source, radius, &mut rng)?;
        info!(
            strokes,
            elapsed_ms = t.elapsed().as_millis() as u64,
            "layer complete"
        );
        emit(layer, canvas)?;
    }
    Ok(())
}

/// [`render_with`] without an emission hook.
pub fn render(
    canvas: &mut Canvas,
    source: &PixelBuffer,
    radii: &[u32],
    opts: &RenderOpts,
) -> ImpastoResult<()> {
    render_with(canvas, source, radii, opts, |_, _| Ok(()))
}
