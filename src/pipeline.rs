use std::ops::Range;

use rayon::prelude::*;

use crate::effect::renderer::Renderer;
use crate::foundation::core::FrameArgb;
use crate::foundation::error::{LutfxError, LutfxResult};
use crate::host::HeapAlloc;

/// Threading knobs for multi-frame rendering.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }
}

/// Render a sequence of frames at `elapsed = frame / fps`.
///
/// The parallel path is bit-identical to the sequential one: each frame is a
/// pure function of its timestamp over the renderer's immutable buffers, and
/// every call writes a distinct output buffer.
#[tracing::instrument(skip(renderer))]
pub fn render_frames(
    renderer: &Renderer,
    fps: f64,
    frames: Range<u64>,
    threading: &RenderThreading,
) -> LutfxResult<Vec<FrameArgb>> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(LutfxError::validation("fps must be finite and > 0"));
    }
    if frames.is_empty() {
        return Err(LutfxError::validation("frame range must be non-empty"));
    }

    let render_one = |frame: u64| {
        let elapsed = (frame as f64 / fps) as f32;
        renderer.render_frame(elapsed, &HeapAlloc)
    };

    if !threading.parallel {
        return frames.map(render_one).collect();
    }

    let run = || frames.clone().into_par_iter().map(render_one).collect();
    match threading.threads {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map_err(|e| LutfxError::validation(format!("thread pool: {e}")))?
            .install(run),
        None => run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::renderer::EffectParams;
    use crate::foundation::core::Canvas;
    use crate::host::HeapAlloc;

    fn small_renderer() -> Renderer {
        let canvas = Canvas::new(16, 12).unwrap();
        Renderer::new(canvas, EffectParams::default(), &HeapAlloc).unwrap()
    }

    #[test]
    fn rejects_empty_range_and_bad_fps() {
        let r = small_renderer();
        assert!(render_frames(&r, 30.0, 5..5, &RenderThreading::default()).is_err());
        assert!(render_frames(&r, 0.0, 0..3, &RenderThreading::default()).is_err());
    }

    #[test]
    fn parallel_matches_sequential() {
        let r = small_renderer();
        let seq = render_frames(&r, 30.0, 0..8, &RenderThreading::default()).unwrap();
        let par = render_frames(
            &r,
            30.0,
            0..8,
            &RenderThreading {
                parallel: true,
                threads: Some(2),
            },
        )
        .unwrap();
        assert_eq!(seq, par);
    }
}
