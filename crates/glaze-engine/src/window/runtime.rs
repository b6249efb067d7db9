use anyhow::{Context, Result};
use ouroboros::self_referencing;
use std::collections::HashMap;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::coords::Viewport;
use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Defaults to [`Viewport::DEFAULT`].
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let [w, h] = Viewport::DEFAULT.size();
        Self {
            title: "glaze".to_string(),
            initial_size: LogicalSize::new(w as f64, h as f64),
        }
    }
}

impl RuntimeConfig {
    fn window_attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size)
    }
}

/// Loop control reachable from inside a frame, e.g. from a `FrameCtx::render` closure.
///
/// Takes effect once the current `on_frame` returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    exit: bool,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.exit = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window described by `config` and drives `app` until it exits or the
    /// window closes. A window or GPU that fails to come up is returned as the error.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host::new(config, gpu_init, app);

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        host.startup_error.map_or(Ok(()), Err)
    }
}

/// A window and the surface/device that draw into it.
#[self_referencing]
struct HostedWindow {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// A zero-sized surface cannot be configured or drawn into.
fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

struct Host<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    windows: HashMap<WindowId, HostedWindow>,
    exiting: bool,
    startup_error: Option<anyhow::Error>,
}

impl<A> Host<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            windows: HashMap::new(),
            exiting: false,
            startup_error: None,
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(self.config.window_attributes())
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let hosted = HostedWindowTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let viewport = hosted.borrow_gpu().viewport();
        log::info!(
            "window {id:?} opened, viewport {}x{}",
            viewport.width,
            viewport.height
        );

        hosted.borrow_window().request_redraw();
        self.windows.insert(id, hosted);
        Ok(())
    }

    fn close(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_some() {
            log::info!("window {id:?} closed");
        }
        if self.windows.is_empty() {
            self.exiting = true;
        }
    }

    /// Reconfigures the surface to the window's current inner size.
    fn reconfigure(&mut self, id: WindowId, size: PhysicalSize<u32>) {
        if let Some(hosted) = self.windows.get_mut(&id) {
            hosted.with_gpu_mut(|gpu| gpu.resize(size));
            hosted.borrow_window().request_redraw();
        }
    }

    fn redraw(&mut self, id: WindowId) {
        let mut runtime = RuntimeCtx::default();
        let mut control = AppControl::Continue;

        let (app, windows) = (&mut self.app, &mut self.windows);
        let Some(hosted) = windows.get_mut(&id) else { return };

        hosted.with_mut(|fields| {
            if !is_drawable(fields.gpu.size()) {
                return;
            }

            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                runtime: &mut runtime,
            };
            control = app.on_frame(&mut ctx);
        });

        if control == AppControl::Exit || runtime.exit_requested() {
            log::info!("exit requested from frame");
            self.exiting = true;
        }
    }
}

impl<A> ApplicationHandler for Host<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.windows.is_empty() {
            return;
        }

        if let Err(e) = self.open(event_loop) {
            log::error!("failed to create initial window: {e:#}");
            self.startup_error = Some(e);
            self.exiting = true;
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        // UI meshes are rebuilt every frame, so keep redrawing.
        event_loop.set_control_flow(ControlFlow::Wait);
        for hosted in self.windows.values() {
            hosted.borrow_window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exiting || !self.windows.contains_key(&window_id) {
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.exiting = true;
        } else {
            match event {
                WindowEvent::CloseRequested => self.close(window_id),
                WindowEvent::Resized(size) => self.reconfigure(window_id, size),
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = self.windows[&window_id].borrow_window().inner_size();
                    self.reconfigure(window_id, size);
                }
                WindowEvent::RedrawRequested => self.redraw(window_id),
                _ => {}
            }
        }

        if self.exiting {
            event_loop.exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_matches_default_viewport() {
        let c = RuntimeConfig::default();
        assert_eq!(c.initial_size, LogicalSize::new(1360.0, 768.0));
        assert_eq!(c.title, "glaze");
    }

    #[test]
    fn runtime_ctx_starts_running_and_latches_exit() {
        let mut ctx = RuntimeCtx::default();
        assert!(!ctx.exit_requested());
        ctx.exit();
        ctx.exit();
        assert!(ctx.exit_requested());
    }

    #[test]
    fn minimized_window_is_not_drawable() {
        assert!(!is_drawable(PhysicalSize::new(0, 0)));
        assert!(!is_drawable(PhysicalSize::new(1360, 0)));
        assert!(!is_drawable(PhysicalSize::new(0, 768)));
        assert!(is_drawable(PhysicalSize::new(1, 1)));
        assert!(is_drawable(PhysicalSize::new(1360, 768)));
    }
}
