use crate::error::{ImpastoError, ImpastoResult};

pub type Rgb8 = [u8; 3];

/// Row-major RGB8 pixel grid. Built once, then read-only except through
/// [`crate::canvas::Canvas`], which owns a mutable one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// All-black buffer of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 3],
        }
    }

    pub fn filled(width: u32, height: u32, color: Rgb8) -> Self {
        let mut buf = Self::new(width, height);
        for px in buf.data.chunks_exact_mut(3) {
            px.copy_from_slice(&color);
        }
        buf
    }

    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> ImpastoResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| ImpastoError::evaluation("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(ImpastoError::evaluation(
                "from_raw expects data matching width*height*3",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Rgb8 {
        let idx = self.index(x, y);
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Rgb8) {
        let idx = self.index(x, y);
        self.data[idx..idx + 3].copy_from_slice(&color);
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        ((y as usize) * (self.width as usize) + (x as usize)) * 3
    }
}

/// Row-major f32 grid, same footprint as the images it is derived from.
/// Used for the difference map, the Sobel derivatives, and edge magnitude.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl ScalarField {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, v: f32) {
        let idx = self.index(x, y);
        self.data[idx] = v;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize) * (self.width as usize) + (x as usize)
    }
}
