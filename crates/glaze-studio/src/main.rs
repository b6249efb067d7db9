use anyhow::Result;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use glaze_engine::coords::Viewport;
use glaze_engine::core::{App, AppControl, FrameCtx};
use glaze_engine::device::GpuInit;
use glaze_engine::logging::{init_logging, LoggingConfig};
use glaze_engine::mesh::Mesh;
use glaze_engine::render::{UiRenderer, UiRendererConfig};
use glaze_engine::shading::{LinearRgba, PackedColor};
use glaze_engine::window::{Runtime, RuntimeConfig};

const CLEAR: LinearRgba = LinearRgba::new(0.1, 0.2, 0.3, 1.0);

const PANEL: PackedColor = PackedColor::from_rgb(38, 42, 52);
const HEADER: PackedColor = PackedColor::from_rgb(58, 64, 80);
const ACCENT: PackedColor = PackedColor::from_rgb(86, 156, 214);
const BUTTON: PackedColor = PackedColor::from_rgb(70, 76, 94);

/// Premultiplies straight RGBA8, which is what the blend state expects.
const fn premul(r: u8, g: u8, b: u8, a: u8) -> PackedColor {
    PackedColor::from_rgba(mul_alpha(r, a), mul_alpha(g, a), mul_alpha(b, a), a)
}

const fn mul_alpha(c: u8, a: u8) -> u8 {
    ((c as u16 * a as u16 + 127) / 255) as u8
}

struct Studio {
    renderer: UiRenderer,
    meshes: Vec<Mesh>,
}

impl Studio {
    fn new() -> Self {
        Self {
            renderer: UiRenderer::new(UiRendererConfig::default()),
            meshes: Vec::new(),
        }
    }

    /// Lays the scene out against the current target so resizes reflow it.
    fn build_scene(&mut self, viewport: Viewport) {
        let [w, h] = viewport.size();
        self.meshes.clear();

        let mut chrome = Mesh::with_capacity(64, 96);
        chrome.add_colored_rect([0.0, 0.0], [w, 48.0], HEADER);
        chrome.add_colored_rect([0.0, 48.0], [240.0, h], PANEL);
        chrome.add_colored_rect([0.0, 48.0], [4.0, h], ACCENT);
        for i in 0..6 {
            let y = 72.0 + i as f32 * 44.0;
            chrome.add_colored_rect([16.0, y], [224.0, y + 32.0], BUTTON);
        }
        self.meshes.push(chrome);

        // Corner colors are blended across the quad by the rasterizer.
        let mut swatch = Mesh::new();
        let (cx, cy) = (240.0 + (w - 240.0) * 0.5, 48.0 + (h - 48.0) * 0.5);
        swatch.add_rect_corners(
            [cx - 200.0, cy - 140.0],
            [cx + 200.0, cy + 140.0],
            [
                PackedColor::from_rgb(255, 0, 0),
                PackedColor::from_rgb(0, 255, 0),
                PackedColor::from_rgb(0, 0, 255),
                PackedColor::WHITE,
            ],
        );
        self.meshes.push(swatch);

        let mut overlay = Mesh::new();
        overlay.add_colored_rect([w - 320.0, h - 120.0], [w - 20.0, h - 20.0], premul(0, 0, 0, 160));
        overlay.add_colored_rect([w - 304.0, h - 104.0], [w - 36.0, h - 92.0], premul(255, 255, 255, 96));
        self.meshes.push(overlay);
    }
}

impl App for Studio {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("escape pressed, exiting");
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.build_scene(ctx.gpu.viewport());

        let (renderer, meshes) = (&mut self.renderer, &self.meshes);
        ctx.render(CLEAR, |rctx, target| renderer.render(rctx, target, meshes))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "glaze studio".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), Studio::new())
}
