use std::str::FromStr;

use crate::error::{ImpastoError, ImpastoResult};

/// Radius of the coarsest layer. A pass at this radius paints every grid
/// cell regardless of error, establishing the base color field.
pub const COARSEST_RADIUS: u32 = 64;

/// Quality preset mapping to a fixed descending brush-radius list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
    Low,
    Medium,
    High,
}

impl Quality {
    pub fn radii(self) -> &'static [u32] {
        match self {
            Quality::Low => &[64, 32, 16, 8],
            Quality::Medium => &[64, 16, 8, 4],
            Quality::High => &[64, 8, 4, 2],
        }
    }
}

impl FromStr for Quality {
    type Err = ImpastoError;

    fn from_str(s: &str) -> ImpastoResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Quality::Low),
            "medium" => Ok(Quality::Medium),
            "high" => Ok(Quality::High),
            other => Err(ImpastoError::config(format!(
                "unknown quality preset '{other}' (expected low, medium, or high)"
            ))),
        }
    }
}

/// Caller-supplied radius lists must be validated before rendering starts;
/// the preset lists always pass.
pub fn validate_radii(radii: &[u32]) -> ImpastoResult<()> {
    if radii.is_empty() {
        return Err(ImpastoError::config("radius list must not be empty"));
    }
    if radii.contains(&0) {
        return Err(ImpastoError::config("brush radius must be > 0"));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOpts {
    /// Seed for the stroke-shuffle RNG. `None` draws from entropy, which
    /// varies stroke occlusion order (but never seed placement) run to run.
    pub seed: Option<u64>,
}
