use crate::foundation::error::{LutfxError, LutfxResult};

/// Alpha byte fixed at full opacity in every word this crate emits.
pub const OPAQUE_ALPHA: u32 = 0xff00_0000;

/// Pack 8-bit channels into an opaque `0xAARRGGBB` word.
pub fn pack_argb(r: u32, g: u32, b: u32) -> u32 {
    OPAQUE_ALPHA | ((r & 255) << 16) | ((g & 255) << 8) | (b & 255)
}

pub(crate) fn channel_r(argb: u32) -> u32 {
    (argb >> 16) & 255
}

pub(crate) fn channel_g(argb: u32) -> u32 {
    (argb >> 8) & 255
}

pub(crate) fn channel_b(argb: u32) -> u32 {
    argb & 255
}

/// Output dimensions in pixels. Both sides must be > 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> LutfxResult<Self> {
        if width == 0 {
            return Err(LutfxError::validation("Canvas width must be > 0"));
        }
        if height == 0 {
            return Err(LutfxError::validation("Canvas height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// An owned frame of packed `0xAARRGGBB` words, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameArgb {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u32>,
}

impl FrameArgb {
    /// Translate to byte-order RGBA8 (r, g, b, a per pixel) for consumers
    /// such as image encoders. Alpha is always 255.
    pub fn to_rgba8_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for &px in &self.data {
            out.push(channel_r(px) as u8);
            out.push(channel_g(px) as u8);
            out.push(channel_b(px) as u8);
            out.push(255);
        }
        out
    }
}
