use crate::mesh::{Mesh, MeshBatch};
use crate::render::{RenderCtx, RenderTarget};
use crate::shading::{ScreenUniform, Vertex, FRAGMENT_ENTRY, UI_SHADER_SRC, VERTEX_ENTRY};

use super::buffer::GrowableBuffer;

/// How fragment output is combined with the target.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum BlendMode {
    /// `src + dst * (1 - src.a)`. UI vertex colors are premultiplied.
    #[default]
    PremultipliedAlpha,
    /// Overwrite the target.
    Replace,
}

impl BlendMode {
    pub fn state(self) -> wgpu::BlendState {
        match self {
            BlendMode::PremultipliedAlpha => wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING,
            BlendMode::Replace => wgpu::BlendState::REPLACE,
        }
    }
}

/// UI renderer configuration.
#[derive(Debug, Clone)]
pub struct UiRendererConfig {
    pub blend: BlendMode,

    /// Vertex buffer size allocated on first use, in vertices.
    pub initial_vertices: usize,

    /// Index buffer size allocated on first use, in indices.
    pub initial_indices: usize,
}

impl Default for UiRendererConfig {
    fn default() -> Self {
        Self {
            blend: BlendMode::default(),
            initial_vertices: 1024,
            initial_indices: 1024 * 3,
        }
    }
}

/// Draws UI meshes with the shading stage in `shaders/ui.wgsl`.
///
/// Geometry is in pixels and converted to clip space in the vertex shader using
/// the screen uniform, which is rewritten from `RenderCtx::viewport` every frame.
pub struct UiRenderer {
    config: UiRendererConfig,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    screen_ubo: Option<wgpu::Buffer>,
    last_viewport: Option<[f32; 2]>,

    vertex_buffer: GrowableBuffer,
    index_buffer: GrowableBuffer,

    batch: MeshBatch,
    last_frame: Option<u64>,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new(UiRendererConfig::default())
    }
}

impl UiRenderer {
    pub fn new(config: UiRendererConfig) -> Self {
        let vertex_buffer = GrowableBuffer::new(
            "glaze ui vbo",
            wgpu::BufferUsages::VERTEX,
            config.initial_vertices as u64 * Vertex::STRIDE,
        );
        let index_buffer = GrowableBuffer::new(
            "glaze ui ibo",
            wgpu::BufferUsages::INDEX,
            (config.initial_indices * std::mem::size_of::<u32>()) as u64,
        );

        Self {
            config,
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            bind_group: None,
            screen_ubo: None,
            last_viewport: None,
            vertex_buffer,
            index_buffer,
            batch: MeshBatch::new(),
            last_frame: None,
        }
    }

    /// Renders `meshes` in order into `target`, on top of its current contents.
    ///
    /// Call at most once per frame per renderer. Geometry and the screen uniform
    /// are uploaded through `Queue::write_buffer`, which lands before any pass of
    /// the submission runs, so a second call would make both passes draw the
    /// second call's meshes. Pass everything in one slice, or use one renderer
    /// per layer. Debug builds panic on a repeated call.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, meshes: &[Mesh]) {
        let first_call = self.claim_frame(ctx.frame);
        debug_assert!(
            first_call,
            "UiRenderer::render called twice in frame {}",
            ctx.frame
        );

        if !ctx.viewport.is_valid() {
            return;
        }

        self.batch.pack(meshes);
        if self.batch.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.write_screen_uniform(ctx);
        self.vertex_buffer.write(ctx.device, ctx.queue, self.batch.vertex_bytes());
        self.index_buffer.write(ctx.device, ctx.queue, self.batch.index_bytes());

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vbo) = self.vertex_buffer.buffer() else { return };
        let Some(ibo) = self.index_buffer.buffer() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glaze ui pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);

        for range in self.batch.ranges() {
            rpass.draw_indexed(range.index_range.clone(), range.base_vertex, 0..1);
        }
    }

    /// Records `frame` as drawn. Returns false if it already was.
    fn claim_frame(&mut self, frame: u64) -> bool {
        if self.last_frame == Some(frame) {
            return false;
        }
        self.last_frame = Some(frame);
        true
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        log::debug!("building ui pipeline for {:?}", ctx.surface_format);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glaze ui shader"),
            source: wgpu::ShaderSource::Wgsl(UI_SHADER_SRC.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("glaze ui bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(ScreenUniform::min_binding_size()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("glaze ui pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glaze ui pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(self.config.blend.state()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // UI tessellation does not guarantee winding.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.screen_ubo = None;
        self.last_viewport = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.screen_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let screen_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("glaze ui screen ubo"),
            size: std::mem::size_of::<ScreenUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glaze ui bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_ubo.as_entire_binding(),
            }],
        });

        self.screen_ubo = Some(screen_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_screen_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.screen_ubo.as_ref() else { return };
        let u = ScreenUniform::from_viewport(ctx.viewport);

        if self.last_viewport != Some(u.screen_size) {
            log::debug!("ui viewport {}x{}", u.screen_size[0], u.screen_size[1]);
            self.last_viewport = Some(u.screen_size);
        }

        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_sizes() {
        let c = UiRendererConfig::default();
        assert_eq!(c.initial_vertices, 1024);
        assert_eq!(c.initial_indices, 3072);
        assert_eq!(c.blend, BlendMode::PremultipliedAlpha);
    }

    #[test]
    fn blend_modes_map_to_wgpu_states() {
        assert_eq!(
            BlendMode::PremultipliedAlpha.state(),
            wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING
        );
        assert_eq!(BlendMode::Replace.state(), wgpu::BlendState::REPLACE);
    }

    #[test]
    fn new_renderer_allocates_nothing_up_front() {
        let r = UiRenderer::default();
        assert_eq!(r.vertex_buffer.capacity(), 0);
        assert!(r.vertex_buffer.buffer().is_none());
        assert!(r.pipeline.is_none());
        assert!(r.last_frame.is_none());
    }

    #[test]
    fn second_render_in_same_frame_is_rejected() {
        let mut r = UiRenderer::default();
        assert!(r.claim_frame(0));
        assert!(!r.claim_frame(0));
        assert!(r.claim_frame(1));
        assert!(!r.claim_frame(1));
    }

    #[test]
    fn skipped_frames_are_accepted() {
        let mut r = UiRenderer::default();
        assert!(r.claim_frame(3));
        assert!(r.claim_frame(7));
        assert_eq!(r.last_frame, Some(7));
    }
}
