use crate::foundation::core::Canvas;
use crate::foundation::error::LutfxResult;
use crate::host::FrameAllocator;

/// Size of the fixed-point coordinate space each LUT field lives in.
pub const COORD_RANGE: u32 = 1024;

const COORD_MASK: u32 = COORD_RANGE - 1;
const V_SHIFT: u32 = 10;
const W_SHIFT: u32 = 20;

/// Squared-radius floor applied before the inversion divide. The exact
/// center of an even-dimension canvas lands on r2 = 0; clamping maps it to
/// u = v = 0 with zero radial weight instead of dividing by zero.
const MIN_R2: f32 = 1e-12;

pub(crate) fn pack_entry(iu: u32, iv: u32, iw: u32) -> u32 {
    debug_assert!(iu < COORD_RANGE && iv < COORD_RANGE && iw < COORD_RANGE);
    (iw << W_SHIFT) | (iv << V_SHIFT) | iu
}

/// Pre-scale horizontal texture coordinate, in [0, 1024).
pub(crate) fn decode_u(entry: u32) -> u32 {
    entry & COORD_MASK
}

/// Pre-scale vertical texture coordinate, in [0, 1024).
pub(crate) fn decode_v(entry: u32) -> u32 {
    (entry >> V_SHIFT) & COORD_MASK
}

/// Radial falloff weight, in [0, 1024). Saturates with distance from the
/// center rather than wrapping.
pub(crate) fn decode_w(entry: u32) -> u32 {
    entry >> W_SHIFT
}

/// Wrapping quantizer for the angular-like coordinates: floor to the 1024
/// grid, then euclidean modulo so the periodic wrap survives negative input.
fn quantize_wrap(c: f32) -> u32 {
    ((COORD_RANGE as f32 * c).floor() as i64).rem_euclid(i64::from(COORD_RANGE)) as u32
}

/// Saturating quantizer for the radial weight.
fn quantize_sat(r2: f32) -> u32 {
    ((512.0 * r2).floor() as i64).clamp(0, i64::from(COORD_MASK)) as u32
}

/// Dense per-pixel distortion map: one packed 32-bit entry per output pixel,
/// row-major, built once per [`Canvas`] and never mutated. Animation is
/// applied at consumption time, not baked in here.
#[derive(Clone, Debug)]
pub struct DistortionMap {
    canvas: Canvas,
    entries: Vec<u32>,
}

impl DistortionMap {
    /// Build the map by pushing every pixel through the inversion transform
    /// `(x, y) -> (x/r2, y/r2)` in centered, aspect-corrected coordinates.
    ///
    /// This is the only place the crate touches floating point on buffers;
    /// it runs once per resolution. The only failure is the allocator's.
    pub fn build(canvas: Canvas, alloc: &dyn FrameAllocator) -> LutfxResult<Self> {
        let mut entries = alloc.alloc_u32(canvas.pixel_count())?;
        let (w, h) = (canvas.width as i64, canvas.height as i64);
        for j in 0..h {
            for i in 0..w {
                let x = (2 * i - w) as f32 / h as f32;
                let y = (2 * j - h) as f32 / h as f32;

                let r2 = (x * x + y * y).max(MIN_R2);
                let u = x / r2;
                let v = y / r2;

                let iu = quantize_wrap(u);
                let iv = quantize_wrap(v);
                let iw = quantize_sat(r2);
                entries[(w * j + i) as usize] = pack_entry(iu, iv, iw);
            }
        }
        Ok(Self { canvas, entries })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Decoded `(u, v, w)` fields for linear pixel index `k`.
    pub fn decoded(&self, k: usize) -> Option<(u32, u32, u32)> {
        self.entries
            .get(k)
            .map(|&e| (decode_u(e), decode_v(e), decode_w(e)))
    }

    pub(crate) fn entries(&self) -> &[u32] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeapAlloc;

    #[test]
    fn pack_decode_roundtrip() {
        let entry = pack_entry(3, 700, 1023);
        assert_eq!(decode_u(entry), 3);
        assert_eq!(decode_v(entry), 700);
        assert_eq!(decode_w(entry), 1023);
    }

    #[test]
    fn quantize_wrap_is_periodic() {
        assert_eq!(quantize_wrap(0.0), 0);
        assert_eq!(quantize_wrap(1.0), 0);
        assert_eq!(quantize_wrap(0.5), 512);
        assert_eq!(quantize_wrap(-0.25), 768);
        // Far outside the unit interval still wraps instead of clamping.
        assert_eq!(quantize_wrap(3.5), 512);
    }

    #[test]
    fn quantize_sat_clamps_instead_of_wrapping() {
        assert_eq!(quantize_sat(0.0), 0);
        assert_eq!(quantize_sat(1.0), 512);
        assert_eq!(quantize_sat(100.0), 1023);
    }

    #[test]
    fn all_fields_stay_in_range() {
        let canvas = Canvas::new(33, 17).unwrap();
        let map = DistortionMap::build(canvas, &HeapAlloc).unwrap();
        assert_eq!(map.entries().len(), canvas.pixel_count());
        for &entry in map.entries() {
            assert!(decode_u(entry) < COORD_RANGE);
            assert!(decode_v(entry) < COORD_RANGE);
            assert!(decode_w(entry) < COORD_RANGE);
        }
    }

    #[test]
    fn build_is_idempotent() {
        let canvas = Canvas::new(64, 48).unwrap();
        let a = DistortionMap::build(canvas, &HeapAlloc).unwrap();
        let b = DistortionMap::build(canvas, &HeapAlloc).unwrap();
        assert_eq!(a.entries(), b.entries());
    }

    #[test]
    fn even_grid_center_pixel_is_defined_and_dark() {
        // 2i = width and 2j = height puts (i, j) exactly on the singularity.
        let canvas = Canvas::new(8, 8).unwrap();
        let map = DistortionMap::build(canvas, &HeapAlloc).unwrap();
        let center = map.entries()[(4 * 8 + 4) as usize];
        assert_eq!(decode_u(center), 0);
        assert_eq!(decode_v(center), 0);
        assert_eq!(decode_w(center), 0);
    }
}
