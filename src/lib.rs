#![forbid(unsafe_code)]

pub mod buffer;
pub mod canvas;
pub mod config;
pub mod error;
pub mod io;
pub mod layer;
pub mod ops;
pub mod render;
pub mod stroke;

pub use buffer::{PixelBuffer, Rgb8, ScalarField};
pub use canvas::{Canvas, to_device_space};
pub use config::{COARSEST_RADIUS, Quality, RenderOpts, validate_radii};
pub use error::{ImpastoError, ImpastoResult};
pub use render::{render, render_with};
pub use stroke::{MAX_STROKE_LEN, MIN_STROKE_LEN, Stroke};
