use crate::effect::lut::{COORD_RANGE, DistortionMap, decode_u, decode_v, decode_w};
use crate::effect::texture::XorTexture;
use crate::foundation::core::{Canvas, FrameArgb, channel_b, channel_g, channel_r, pack_argb};
use crate::foundation::error::{LutfxError, LutfxResult};
use crate::host::FrameAllocator;

/// Shift renormalizing `channel * w * fade` (8 + 10 + 8 bits) back to 8 bits.
const WEIGHT_SHIFT: u32 = 18;

/// Animation parameters. The defaults reproduce the classic effect: the LUT's
/// vertical coordinate scrolls at 400 fixed-point units per second and the
/// image fades in from black over the first two seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectParams {
    /// Vertical scroll speed, in LUT coordinate units per second.
    pub scroll_rate: f32,
    /// Duration of the linear fade-in from black, in seconds.
    pub fade_in_secs: f32,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            scroll_rate: 400.0,
            fade_in_secs: 2.0,
        }
    }
}

/// Owner of the effect's immutable inputs; renders one frame per call.
///
/// Construction builds the texture and the distortion map; dropping the
/// renderer releases both. Rendering is a pure read of the two buffers plus
/// the elapsed time, so a `&Renderer` may render from several threads at once
/// as long as each call targets a distinct output buffer.
pub struct Renderer {
    canvas: Canvas,
    params: EffectParams,
    texture: XorTexture,
    lut: DistortionMap,
}

impl Renderer {
    /// Build both one-time buffers for `canvas`. Fails only if the allocator
    /// does; anything already built is released on the way out.
    #[tracing::instrument(skip(alloc))]
    pub fn new(
        canvas: Canvas,
        params: EffectParams,
        alloc: &dyn FrameAllocator,
    ) -> LutfxResult<Self> {
        if params.fade_in_secs <= 0.0 {
            return Err(LutfxError::validation("fade_in_secs must be > 0"));
        }
        let texture = XorTexture::generate(alloc)?;
        let lut = DistortionMap::build(canvas, alloc)?;
        Ok(Self {
            canvas,
            params,
            texture,
            lut,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn params(&self) -> EffectParams {
        self.params
    }

    /// Composite one frame into `out` for an absolute elapsed time.
    ///
    /// The scroll offset and fade weight are derived fresh from
    /// `elapsed_secs` on every call, so stepping time non-monotonically or
    /// re-rendering the same timestamp is bit-reproducible. Negative elapsed
    /// time is treated as zero. `out` must hold exactly one word per canvas
    /// pixel; every word is written.
    pub fn render_into(&self, out: &mut [u32], elapsed_secs: f32) -> LutfxResult<()> {
        if out.len() != self.canvas.pixel_count() {
            return Err(LutfxError::validation(format!(
                "output buffer holds {} words, canvas needs {}",
                out.len(),
                self.canvas.pixel_count()
            )));
        }

        let t = elapsed_secs.max(0.0);
        // Reduced modulo the coordinate range up front so the per-pixel add
        // cannot overflow even for very large elapsed times.
        let scroll = ((self.params.scroll_rate * t).floor() as u64 % u64::from(COORD_RANGE)) as u32;
        let fade = ((255.0 * t / self.params.fade_in_secs).floor() as u32).min(255);

        for (dst, &entry) in out.iter_mut().zip(self.lut.entries()) {
            let u = decode_u(entry);
            let v = (decode_v(entry) + scroll) & (COORD_RANGE - 1);
            let w = decode_w(entry);

            // 10-bit coordinates >> 2 index the 256-wide texture; this is
            // nearest-neighbor sampling, no interpolation.
            let texel = self.texture.texel(u >> 2, v >> 2);

            let weighted = w * fade;
            let r = (channel_r(texel) * weighted) >> WEIGHT_SHIFT;
            let g = (channel_g(texel) * weighted) >> WEIGHT_SHIFT;
            let b = (channel_b(texel) * weighted) >> WEIGHT_SHIFT;

            *dst = pack_argb(r, g, b);
        }
        Ok(())
    }

    /// Allocate a frame through `alloc` and composite into it.
    pub fn render_frame(
        &self,
        elapsed_secs: f32,
        alloc: &dyn FrameAllocator,
    ) -> LutfxResult<FrameArgb> {
        let mut data = alloc.alloc_u32(self.canvas.pixel_count())?;
        self.render_into(&mut data, elapsed_secs)?;
        Ok(FrameArgb {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
        })
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("canvas", &self.canvas)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeapAlloc;

    #[test]
    fn params_default_matches_classic_constants() {
        let p = EffectParams::default();
        assert_eq!(p.scroll_rate, 400.0);
        assert_eq!(p.fade_in_secs, 2.0);
    }

    #[test]
    fn rejects_nonpositive_fade_duration() {
        let canvas = Canvas::new(4, 4).unwrap();
        let params = EffectParams {
            fade_in_secs: 0.0,
            ..EffectParams::default()
        };
        assert!(Renderer::new(canvas, params, &HeapAlloc).is_err());
    }

    #[test]
    fn rejects_wrong_buffer_length() {
        let canvas = Canvas::new(4, 4).unwrap();
        let r = Renderer::new(canvas, EffectParams::default(), &HeapAlloc).unwrap();
        let mut short = vec![0u32; 15];
        assert!(r.render_into(&mut short, 0.0).is_err());
    }

    #[test]
    fn negative_elapsed_renders_like_zero() {
        let canvas = Canvas::new(6, 4).unwrap();
        let r = Renderer::new(canvas, EffectParams::default(), &HeapAlloc).unwrap();
        let a = r.render_frame(-5.0, &HeapAlloc).unwrap();
        let b = r.render_frame(0.0, &HeapAlloc).unwrap();
        assert_eq!(a, b);
    }
}
