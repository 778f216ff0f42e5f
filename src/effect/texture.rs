use crate::foundation::core::pack_argb;
use crate::foundation::error::LutfxResult;
use crate::host::FrameAllocator;

/// Side length of the procedural texture, in texels.
pub const TEXTURE_SIDE: u32 = 256;

/// A 256×256 procedural XOR pattern, packed `0xAARRGGBB`, generated once and
/// read-only afterwards.
#[derive(Clone, Debug)]
pub struct XorTexture {
    texels: Vec<u32>,
}

impl XorTexture {
    /// Generate the pattern. The only failure is the allocator's.
    pub fn generate(alloc: &dyn FrameAllocator) -> LutfxResult<Self> {
        let side = TEXTURE_SIDE;
        let mut texels = alloc.alloc_u32((side * side) as usize)?;
        for j in 0..side {
            for i in 0..side {
                let r = i ^ (j >> 1);
                let g = (i >> 1) ^ j;
                let b = i ^ j;
                texels[(side * j + i) as usize] = pack_argb(r, g, b);
            }
        }
        Ok(Self { texels })
    }

    /// Nearest-neighbor fetch. `u` and `v` must already be in [0, 256).
    pub fn texel(&self, u: u32, v: u32) -> u32 {
        debug_assert!(u < TEXTURE_SIDE && v < TEXTURE_SIDE);
        self.texels[((v << 8) + u) as usize]
    }
}
