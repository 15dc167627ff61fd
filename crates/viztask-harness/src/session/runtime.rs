use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::gpu::{GpuContext, SurfaceErrorAction};
use crate::input::DragTracker;
use crate::task::{Task, TaskFactory, TaskFrame};
use crate::time::FrameClock;
use crate::viewport::{RenderSurface, ViewportManager};

use super::config::HarnessConfig;
use super::stop::StopToken;

/// Entry point for a harness run.
///
/// Owns the stop token; hand a clone to anything that should be able to end
/// the session. `run` consumes the session, drives the event loop until the
/// window closes or the token is signaled, and propagates any fatal setup
/// error (shader failure, unavailable surface) to the caller.
pub struct HarnessSession {
    config: HarnessConfig,
    stop: StopToken,
}

impl HarnessSession {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            stop: StopToken::new(),
        }
    }

    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// Runs the session with the given task factory.
    ///
    /// The factory is invoked exactly once, after the window (and GPU
    /// context, when requested) are ready. If setup fails, the loop exits
    /// before any frame is rendered and the error is returned here.
    pub fn run(self, factory: TaskFactory) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = SessionState::new(self.config, self.stop, factory);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct SessionState {
    config: HarnessConfig,
    stop: StopToken,
    factory: Option<TaskFactory>,

    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    task: Option<Box<dyn Task>>,

    viewport: ViewportManager,
    surface: RenderSurface,

    drag: DragTracker,
    cursor_pos: (f32, f32),

    clock: FrameClock,

    /// Setup error carried out of the event loop back to `run`.
    fatal: Option<anyhow::Error>,
}

impl SessionState {
    fn new(config: HarnessConfig, stop: StopToken, factory: TaskFactory) -> Self {
        let viewport = ViewportManager::new(config.layout);
        Self {
            config,
            stop,
            factory: Some(factory),
            window: None,
            gpu: None,
            task: None,
            viewport,
            surface: RenderSurface::default(),
            drag: DragTracker::new(),
            cursor_pos: (0.0, 0.0),
            clock: FrameClock::new(),
            fatal: None,
        }
    }

    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = if self.config.needs_gpu {
            Some(pollster::block_on(GpuContext::new(window.clone()))?)
        } else {
            None
        };

        // Commit drawable dimensions synchronously, before the first frame.
        self.viewport
            .apply(&mut self.surface, window.inner_size().width);

        let factory = self
            .factory
            .take()
            .context("task factory already consumed")?;
        let task = factory(&self.surface, gpu.as_ref()).context("task construction failed")?;

        self.window = Some(window);
        self.gpu = gpu;
        self.task = Some(task);
        self.clock = FrameClock::new();

        log::info!(
            "session '{}' ready ({}x{} drawable)",
            self.config.title,
            self.surface.width,
            self.surface.height
        );
        Ok(())
    }

    /// Applies a window-size change: reconfigures the swapchain, recomputes
    /// the drawable rect, and schedules a fresh frame.
    fn apply_layout(&mut self, new_size: PhysicalSize<u32>) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(new_size);
        }
        self.viewport.apply(&mut self.surface, new_size.width);
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    /// Primary-button press at the last known cursor position.
    ///
    /// Only a press over the drawable rect starts a drag; the window can be
    /// taller or wider than the aspect-clamped surface.
    fn pointer_pressed(&mut self) {
        let (x, y) = self.cursor_pos;
        if self.surface.contains(x, y) {
            self.drag.press(y);
        }
    }

    fn render_frame(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let Some(task) = self.task.as_mut() else {
            return;
        };

        let time = self.clock.tick();

        match self.gpu.as_mut() {
            None => task.render(&self.surface, None),

            Some(gpu) => {
                let mut frame = match gpu.begin_frame() {
                    Ok(f) => f,
                    Err(err) => {
                        if gpu.handle_surface_error(err) == SurfaceErrorAction::Fatal {
                            log::error!("fatal surface error; stopping session");
                            self.stop.stop();
                        }
                        return;
                    }
                };

                // TaskFrame borrows the encoder; dropped before submit()
                // takes the frame.
                {
                    let target = gpu.size();
                    let mut task_frame = TaskFrame {
                        device: gpu.device(),
                        queue: gpu.queue(),
                        encoder: &mut frame.encoder,
                        view: &frame.view,
                        target_width: target.width,
                        target_height: target.height,
                        time,
                    };
                    task.render(&self.surface, Some(&mut task_frame));
                }

                window.pre_present_notify();
                gpu.submit(frame);
            }
        }
    }
}

impl ApplicationHandler for SessionState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.setup(event_loop) {
            // Fail-fast: the run aborts before the render loop starts and no
            // frames are ever produced.
            log::error!("session setup failed: {e:#}");
            self.fatal = Some(e);
            self.stop.stop();
            event_loop.exit();
            return;
        }

        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.stop.is_stopped() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: one frame per compositor refresh, re-armed each
        // turn of the loop.
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.stop.is_stopped() {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.stop.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => self.apply_layout(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let Some(new_size) = self.window.as_ref().map(|w| w.inner_size()) else {
                    return;
                };
                self.apply_layout(new_size);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let y = position.y as f32;
                self.cursor_pos = (position.x as f32, y);
                if let Some(delta) = self.drag.motion(y) {
                    if let Some(task) = self.task.as_mut() {
                        task.drag_camera(delta);
                    }
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => self.pointer_pressed(),
                // winit delivers the release to the focused window even when
                // the cursor has left it, so a drag that wanders off the
                // surface still terminates here.
                ElementState::Released => {
                    self.drag.release();
                }
            },

            WindowEvent::RedrawRequested => self.render_frame(),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> SessionState {
        SessionState::new(
            HarnessConfig::default(),
            StopToken::new(),
            Box::new(|_, _| anyhow::bail!("not constructed in tests")),
        )
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn layout_change_recomputes_the_drawable_rect() {
        let mut s = state();
        s.apply_layout(PhysicalSize::new(500, 400));
        assert_eq!(s.surface, RenderSurface { width: 480, height: 270 });

        // Scale-factor changes go through the same path as plain resizes,
        // so both leave the surface consistent.
        s.apply_layout(PhysicalSize::new(840, 600));
        assert_eq!(s.surface, RenderSurface { width: 820, height: 461 });
    }

    // ── pointer press gating ──────────────────────────────────────────────

    #[test]
    fn press_over_the_drawable_rect_starts_a_drag() {
        let mut s = state();
        s.apply_layout(PhysicalSize::new(840, 600));
        s.cursor_pos = (400.0, 300.0);
        s.pointer_pressed();
        assert!(s.drag.is_dragging());
    }

    #[test]
    fn press_outside_the_drawable_rect_is_ignored() {
        let mut s = state();
        s.apply_layout(PhysicalSize::new(840, 600));

        // Below the 461px-tall drawable rect.
        s.cursor_pos = (400.0, 500.0);
        s.pointer_pressed();
        assert!(!s.drag.is_dragging());

        // Right of the 820px-wide drawable rect.
        s.cursor_pos = (830.0, 100.0);
        s.pointer_pressed();
        assert!(!s.drag.is_dragging());
    }
}
