//! Lutfx renders a classic full-screen distortion effect on the CPU.
//!
//! The effect combines three ingredients, all built once and immutable
//! afterwards except the last:
//!
//! 1. **Texture**: a 256×256 procedural XOR pattern ([`XorTexture`])
//! 2. **LUT**: a per-pixel packed fixed-point distortion map encoding an
//!    inversion transform ([`DistortionMap`])
//! 3. **Compositing**: a per-frame integer-only pass that decodes the LUT,
//!    scrolls it by elapsed time, samples the texture nearest-neighbor and
//!    applies a radial weight plus a fade-in ([`Renderer::render_into`])
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: rendering is a pure function of
//!   `(canvas, params, elapsed_secs)`; re-rendering a timestamp is
//!   bit-reproducible.
//! - **No allocation in the hot path**: buffers are obtained once through an
//!   explicit [`FrameAllocator`] capability; [`Renderer::render_into`] writes
//!   into a caller-owned slice and never allocates.
//! - **No floating point in the hot path**: f32 appears only in the one-time
//!   LUT build and in deriving the two per-frame scalars.
#![forbid(unsafe_code)]

mod effect;
mod foundation;
mod host;
mod pipeline;

pub use effect::lut::{COORD_RANGE, DistortionMap};
pub use effect::renderer::{EffectParams, Renderer};
pub use effect::texture::{TEXTURE_SIDE, XorTexture};
pub use foundation::core::{Canvas, FrameArgb, OPAQUE_ALPHA, pack_argb};
pub use foundation::error::{LutfxError, LutfxResult};
pub use host::{FrameAllocator, HeapAlloc};
pub use pipeline::{RenderThreading, render_frames};
