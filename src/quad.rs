use squares::draw::PanelCommand;

/// One rounded rectangle. The quad corners are generated in the vertex
/// shader from `vertex_index`, so each command uploads a single instance.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadInstance {
    /// x, y, width, height in pixels.
    pub rect: [f32; 4],
    pub bg_color: [f32; 4],
    pub border_color: [f32; 4],
    /// border width, corner radius.
    pub style: [f32; 2],
}

impl QuadInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x4,
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x2,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// `None` for commands with no visible area.
    pub fn from_command(cmd: &PanelCommand) -> Option<Self> {
        if cmd.width <= 0.0 || cmd.height <= 0.0 {
            return None;
        }
        Some(Self {
            rect: [cmd.x, cmd.y, cmd.width, cmd.height],
            bg_color: cmd.bg_color,
            border_color: cmd.border_color,
            style: [cmd.border_width, cmd.corner_radius],
        })
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ScreenUniforms {
    projection: [[f32; 4]; 4],
}

/// Draws a frame's `DrawList` as instanced rounded quads.
pub struct QuadRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<QuadInstance>,
}

impl QuadRenderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("quad_uniforms"),
            size: std::mem::size_of::<ScreenUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Catalog tiles, link tile, frame and info panel fit comfortably.
        let instance_capacity = 64;
        let instance_buffer = create_instance_buffer(device, instance_capacity);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("quad_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("quad_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quad_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("quad.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quad_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quad_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[QuadInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            instance_buffer,
            instance_capacity,
            instances: Vec::new(),
        }
    }

    /// Rebuild the instance list from `commands` and upload it together
    /// with the pixel-space projection. Returns the instance count.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        (screen_w, screen_h): (u32, u32),
        commands: &[PanelCommand],
    ) -> u32 {
        let uniforms = ScreenUniforms {
            projection: ortho(screen_w as f32, screen_h as f32),
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        self.instances.clear();
        self.instances
            .extend(commands.iter().filter_map(QuadInstance::from_command));
        if self.instances.is_empty() {
            return 0;
        }

        if self.instances.len() > self.instance_capacity {
            self.instance_capacity = self.instances.len().next_power_of_two();
            log::debug!("quad instance buffer grown to {}", self.instance_capacity);
            self.instance_buffer = create_instance_buffer(device, self.instance_capacity);
        }
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.instances));

        self.instances.len() as u32
    }

    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, instance_count: u32) {
        if instance_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        render_pass.draw(0..4, 0..instance_count);
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("quad_instances"),
        size: (capacity * std::mem::size_of::<QuadInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Pixel coordinates (origin top-left, y down) to clip space.
#[rustfmt::skip]
fn ortho(w: f32, h: f32) -> [[f32; 4]; 4] {
    [
        [2.0 / w,  0.0,      0.0, 0.0],
        [0.0,     -2.0 / h,  0.0, 0.0],
        [0.0,      0.0,      1.0, 0.0],
        [-1.0,     1.0,      0.0, 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(width: f32, height: f32) -> PanelCommand {
        PanelCommand {
            x: 10.0,
            y: 20.0,
            width,
            height,
            bg_color: [1.0, 0.0, 0.0, 1.0],
            border_color: [1.0; 4],
            border_width: 2.0,
            corner_radius: 6.0,
        }
    }

    #[test]
    fn instance_packs_rect_and_style() {
        let inst = QuadInstance::from_command(&cmd(30.0, 40.0)).expect("visible");
        assert_eq!(inst.rect, [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(inst.style, [2.0, 6.0]);
    }

    #[test]
    fn empty_commands_are_skipped() {
        assert!(QuadInstance::from_command(&cmd(0.0, 40.0)).is_none());
        assert!(QuadInstance::from_command(&cmd(30.0, -1.0)).is_none());
    }

    #[test]
    fn instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 14 * 4);
    }

    #[test]
    fn ortho_maps_corners_to_clip_space() {
        let m = ortho(800.0, 600.0);
        let apply = |x: f32, y: f32| {
            (
                m[0][0] * x + m[3][0],
                m[1][1] * y + m[3][1],
            )
        };
        let close = |a: (f32, f32), b: (f32, f32)| {
            (a.0 - b.0).abs() < 1e-6 && (a.1 - b.1).abs() < 1e-6
        };
        assert!(close(apply(0.0, 0.0), (-1.0, 1.0)));
        assert!(close(apply(800.0, 600.0), (1.0, -1.0)));
    }
}
