use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

mod quad;

use squares::components::{Canvas, TileRecord, Vec2};
use squares::config::EngineConfig;
use squares::draw::DrawList;
use squares::engine::{EngineState, run_frame};
use squares::info_panel::InfoPanel;
use squares::loading::{load_catalog, load_config};
use squares::render::build_draw_list;
use squares::systems::selection::{PressOutcome, handle_press};

/// Convert sRGB component (0-1) to linear for use as wgpu clear color.
fn srgb_to_linear(s: f64) -> f64 {
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

const BG_SRGB: [f32; 3] = [125.0 / 255.0, 125.0 / 255.0, 125.0 / 255.0]; // #7d7d7d

const DEFAULT_TILES: &str = "data/tiles.kdl";
const DEFAULT_CONFIG: &str = "data/config.ron";

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    window: Arc<Window>,
}

impl GpuState {
    fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("failed to find a suitable GPU adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("squares_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
            None,
        ))
        .expect("failed to create GPU device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Self {
            surface,
            device,
            queue,
            config,
            window,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    fn render(&self, quads: &quad::QuadRenderer, quad_count: u32) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory");
                return;
            }
            Err(e) => {
                log::warn!("surface error: {e:?}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tile_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: srgb_to_linear(BG_SRGB[0] as f64),
                            g: srgb_to_linear(BG_SRGB[1] as f64),
                            b: srgb_to_linear(BG_SRGB[2] as f64),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            quads.render(&mut render_pass, quad_count);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

struct App {
    gpu: Option<GpuState>,
    quads: Option<quad::QuadRenderer>,
    config: EngineConfig,
    records: Vec<TileRecord>,
    // Built once the window size is known; layout is fixed afterwards.
    engine: Option<EngineState>,
    info: Option<InfoPanel>,
    cursor_pos: Vec2,
    draw_list: DrawList,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Squares")
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 800.0));

        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));
        let gpu = GpuState::new(window.clone());
        let quads = quad::QuadRenderer::new(&gpu.device, gpu.surface_format());

        let canvas = Canvas::new(gpu.config.width as f32, gpu.config.height as f32);
        let Some(engine) =
            EngineState::new(self.records.clone(), canvas, self.config.clone())
        else {
            log::error!(
                "cannot lay out {} tiles on a {}x{} canvas",
                self.records.len(),
                canvas.width,
                canvas.height
            );
            event_loop.exit();
            return;
        };
        self.cursor_pos = canvas.center();
        self.info = Some(InfoPanel::new(canvas, &self.config));
        self.engine = Some(engine);
        self.gpu = Some(gpu);
        self.quads = Some(quads);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_pos = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(new_size) => {
                // Surface only; tile layout stays fixed for the session.
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (Some(engine), Some(info)) = (self.engine.as_mut(), self.info.as_mut()) else {
                    return;
                };
                if let PressOutcome::OpenLink(url) = handle_press(engine, self.cursor_pos, info) {
                    // Launching a browser belongs to the host shell.
                    log::info!("link requested: {}", url);
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(gpu), Some(quads), Some(engine), Some(info)) = (
                    self.gpu.as_ref(),
                    self.quads.as_mut(),
                    self.engine.as_mut(),
                    self.info.as_mut(),
                ) else {
                    return;
                };

                run_frame(engine, self.cursor_pos);
                info.update();
                build_draw_list(engine, info, &mut self.draw_list);

                let quad_count = quads.prepare(
                    &gpu.device,
                    &gpu.queue,
                    (gpu.config.width, gpu.config.height),
                    &self.draw_list.panels,
                );
                gpu.render(quads, quad_count);
                gpu.window.request_redraw();
            }
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let tiles_path = args.get(1).map_or(DEFAULT_TILES, String::as_str);
    let config_path = args.get(2).map_or(DEFAULT_CONFIG, String::as_str);

    let config = load_config(config_path);
    let records = load_catalog(tiles_path);
    if records.is_empty() {
        log::error!("no tiles in {}, nothing to show", tiles_path);
        return;
    }

    let event_loop = EventLoop::new().expect("create event loop");
    let mut app = App {
        gpu: None,
        quads: None,
        config,
        records,
        engine: None,
        info: None,
        cursor_pos: Vec2::default(),
        draw_list: DrawList::new(),
    };
    event_loop.run_app(&mut app).expect("run event loop");
}
