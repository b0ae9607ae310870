use crate::renderer::Renderer;
use townwalk_common::RenderView;
use townwalk_scene::Scene;

/// Largest time step handed to update callbacks, in seconds. A stalled
/// frame (tab switch, debugger pause) never produces a huge jump.
pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

type UpdateFn<C> = Box<dyn FnMut(&mut C, f32)>;

/// Per-frame dispatcher. Callbacks receive the shared context and the
/// capped delta, in registration order, then the frame is rendered.
pub struct FrameDriver<C> {
    callbacks: Vec<UpdateFn<C>>,
    running: bool,
    frames: u64,
}

impl<C> Default for FrameDriver<C> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
            running: true,
            frames: 0,
        }
    }
}

impl<C> FrameDriver<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_update(&mut self, callback: impl FnMut(&mut C, f32) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames dispatched so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Stop dispatching and drop every callback.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(frames = self.frames, "frame driver stopped");
        }
        self.running = false;
        self.callbacks.clear();
    }

    /// Run every callback with `raw_dt` capped to [`MAX_FRAME_DT`]. Returns
    /// the delta dispatched, or `None` once stopped.
    pub fn tick(&mut self, ctx: &mut C, raw_dt: f32) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = raw_dt.clamp(0.0, MAX_FRAME_DT);
        for cb in &mut self.callbacks {
            cb(ctx, dt);
        }
        self.frames += 1;
        Some(dt)
    }

    /// [`tick`](Self::tick), then render the scene the context exposes.
    pub fn frame<R, F>(&mut self, ctx: &mut C, raw_dt: f32, renderer: &R, view_of: F) -> Option<R::Output>
    where
        R: Renderer,
        F: FnOnce(&C) -> (&Scene, RenderView),
    {
        self.tick(ctx, raw_dt)?;
        let (scene, view) = view_of(ctx);
        Some(renderer.render(scene, &view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DebugTextRenderer;

    #[derive(Default)]
    struct Ctx {
        seen: Vec<(u8, f32)>,
        scene: Scene,
    }

    #[test]
    fn large_delta_is_capped() {
        let mut driver = FrameDriver::<Ctx>::new();
        driver.on_update(|c, dt| c.seen.push((0, dt)));
        let mut ctx = Ctx::default();
        let dt = driver.tick(&mut ctx, 2.0).unwrap();
        assert!(dt <= 1.0 / 30.0);
        assert_eq!(ctx.seen, vec![(0, MAX_FRAME_DT)]);
    }

    #[test]
    fn small_delta_passes_through() {
        let mut driver = FrameDriver::<Ctx>::new();
        let mut ctx = Ctx::default();
        assert_eq!(driver.tick(&mut ctx, 0.01), Some(0.01));
        assert_eq!(driver.tick(&mut ctx, -1.0), Some(0.0));
        assert_eq!(driver.frames(), 2);
    }

    #[test]
    fn callbacks_run_in_registration_order() {
        let mut driver = FrameDriver::<Ctx>::new();
        for tag in [3, 1, 2] {
            driver.on_update(move |c, dt| c.seen.push((tag, dt)));
        }
        let mut ctx = Ctx::default();
        driver.tick(&mut ctx, 0.016);
        let tags: Vec<u8> = ctx.seen.iter().map(|(t, _)| *t).collect();
        assert_eq!(tags, vec![3, 1, 2]);
    }

    #[test]
    fn stopped_driver_dispatches_nothing() {
        let mut driver = FrameDriver::<Ctx>::new();
        driver.on_update(|c, dt| c.seen.push((0, dt)));
        driver.stop();
        let mut ctx = Ctx::default();
        assert_eq!(driver.tick(&mut ctx, 0.016), None);
        assert!(ctx.seen.is_empty());
        assert!(!driver.is_running());
        assert_eq!(driver.callback_count(), 0);
    }

    #[test]
    fn frame_renders_after_updates() {
        let mut driver = FrameDriver::<Ctx>::new();
        driver.on_update(|c, _| {
            c.scene.create_node("spawned", None, Default::default()).unwrap();
        });
        let mut ctx = Ctx::default();
        let out = driver
            .frame(&mut ctx, 0.016, &DebugTextRenderer::new(), |c| (&c.scene, RenderView::default()))
            .unwrap();
        assert!(out.contains("nodes=1"));
    }
}
