//! The fixed-cadence animation loop.
//!
//! [`AnimationLoop`] is a winit application handler. It acquires the overlay
//! window and GPU surface on resume, then runs Tick -> Draw -> Present once
//! per frame interval until the window closes. Between frames it parks the
//! event loop with `ControlFlow::WaitUntil`, so a close event is handled
//! within one frame period.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::RainConfig;
use crate::error::OverlayError;
use crate::gpu::GpuState;
use crate::scene::RainScene;
use crate::time::FrameTimer;
use crate::window::create_overlay_window;

/// Lifecycle of the loop. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Frame deadlines at a fixed interval.
///
/// The next deadline is measured from the start of the current frame, so a
/// slow frame shortens the following wait. Late frames are never skipped or
/// made up.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    interval: Duration,
    next_frame: Instant,
}

impl FramePacer {
    /// First frame is due immediately.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_frame: now,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Mark a frame as started at `now`.
    pub fn begin_frame(&mut self, now: Instant) {
        self.next_frame = now + self.interval;
    }

    pub fn next_frame(&self) -> Instant {
        self.next_frame
    }
}

/// Window, surface and device, released together.
struct Overlay {
    // Dropped before the window it renders to.
    gpu: GpuState,
    window: Arc<Window>,
}

pub struct AnimationLoop {
    config: RainConfig,
    state: LoopState,
    overlay: Option<Overlay>,
    scene: Option<RainScene>,
    pacer: FramePacer,
    timer: FrameTimer,
    redraw_pending: bool,
    error: Option<OverlayError>,
}

impl AnimationLoop {
    pub fn new(config: RainConfig) -> Self {
        let now = Instant::now();
        Self {
            pacer: FramePacer::new(config.frame_interval(), now),
            config,
            state: LoopState::Running,
            overlay: None,
            scene: None,
            timer: FrameTimer::new(),
            redraw_pending: false,
            error: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Consume the loop, returning the setup error that stopped it, if any.
    pub fn into_result(self) -> Result<(), OverlayError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<(), OverlayError> {
        let window = create_overlay_window(event_loop)?;
        let gpu = pollster::block_on(GpuState::new(window.clone()))?;

        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let scene = RainScene::new(&self.config, gpu.viewport(), &mut rng)?;

        log::info!(
            "Setup complete, {} drops in {:?} mode at {} fps, starting animation...",
            scene.simulator().drops().len(),
            scene.simulator().mode(),
            self.config.frame_rate
        );
        self.scene = Some(scene);
        self.overlay = Some(Overlay { gpu, window });
        Ok(())
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        if self.state == LoopState::Running {
            self.state = LoopState::Stopped;
            event_loop.exit();
        }
    }

    /// Tick, draw, present.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(overlay), Some(scene)) = (&mut self.overlay, &mut self.scene) else {
            return;
        };

        let now = Instant::now();
        self.pacer.begin_frame(now);

        let frame = scene.on_frame(overlay.gpu.viewport());
        match overlay.gpu.render(&frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                overlay.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, stopping");
                self.stop(event_loop);
                return;
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        if let Some(fps) = self.timer.update(now) {
            log::debug!(
                "FPS: {:.1} (frame {}, last interval {:?})",
                fps,
                self.timer.frame(),
                self.timer.delta()
            );
        }
    }
}

impl ApplicationHandler for AnimationLoop {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.overlay.is_some() || self.state == LoopState::Stopped {
            return;
        }
        if let Err(e) = self.setup(event_loop) {
            self.error = Some(e);
            self.stop(event_loop);
            return;
        }
        self.pacer = FramePacer::new(self.config.frame_interval(), Instant::now());
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("Close requested");
                self.stop(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(overlay) = &mut self.overlay {
                    overlay.gpu.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw_pending = false;
                if self.state == LoopState::Running {
                    self.frame(event_loop);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state == LoopState::Stopped {
            return;
        }
        let Some(overlay) = &self.overlay else {
            return;
        };

        if self.redraw_pending {
            event_loop.set_control_flow(ControlFlow::Wait);
        } else if self.pacer.is_due(Instant::now()) {
            overlay.window.request_redraw();
            self.redraw_pending = true;
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.next_frame()));
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.state = LoopState::Stopped;
        self.scene = None;
        if self.overlay.take().is_some() {
            log::info!("Released overlay window and GPU resources");
        }
    }
}

/// Run the overlay until its window is closed.
///
/// Returns an error if the configuration is invalid or the window or GPU
/// could not be acquired. Everything acquired is released before returning.
pub fn run(config: RainConfig) -> Result<(), OverlayError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    let mut app = AnimationLoop::new(config);
    event_loop.run_app(&mut app)?;
    app.into_result()
}
