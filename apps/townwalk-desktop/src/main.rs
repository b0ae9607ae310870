mod overlay;

use anyhow::{Context as _, Result};
use clap::Parser;
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use townwalk_game::{GameConfig, Session};
use townwalk_input::{InputEvent, PointerButton};
use townwalk_render_wgpu::WgpuRenderer;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Orbit radius change per wheel notch.
const ZOOM_PER_LINE: f32 = 1.5;
/// Orbit radius change per pixel of trackpad scroll.
const ZOOM_PER_PIXEL: f32 = 0.05;

#[derive(Parser)]
#[command(name = "townwalk-desktop", about = "Walk around a small procedural town")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML game configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Everything that exists only once a window and device are up.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Townwalk")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone()).context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("townwalk_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(backend = adapter.get_info().backend.to_str(), "GPU initialized");
        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, self.config.width, self.config.height);
    }
}

struct GpuApp {
    session: Session,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    cursor: PhysicalPosition<f64>,
    last_frame: Instant,
}

impl GpuApp {
    fn new(session: Session) -> Self {
        Self {
            session,
            gpu: None,
            egui_ctx: EguiContext::default(),
            cursor: PhysicalPosition::new(0.0, 0.0),
            last_frame: Instant::now(),
        }
    }

    fn toggle_view(&mut self) {
        match self.session.toggle_view() {
            Ok(true) => tracing::info!(to = self.session.mode().other().label(), "switching view"),
            Ok(false) => {}
            Err(e) => tracing::error!("view toggle failed: {e}"),
        }
    }

    /// Translate a window event into tracker input. Returns false for
    /// events that are not pointer input.
    fn route_pointer(&mut self, event: &WindowEvent) -> bool {
        let input = match *event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = position;
                InputEvent::MouseMove {
                    x: position.x as f32,
                    y: position.y as f32,
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    _ => return true,
                };
                match state {
                    ElementState::Pressed => InputEvent::MouseDown {
                        x: self.cursor.x as f32,
                        y: self.cursor.y as f32,
                        button,
                    },
                    ElementState::Released => InputEvent::MouseUp { button },
                }
            }
            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => InputEvent::TouchStart { id: touch.id, x, y },
                    TouchPhase::Moved => InputEvent::TouchMove { id: touch.id, x, y },
                    TouchPhase::Ended | TouchPhase::Cancelled => InputEvent::TouchEnd { id: touch.id },
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * ZOOM_PER_LINE,
                    MouseScrollDelta::PixelDelta(p) => -(p.y as f32) * ZOOM_PER_PIXEL,
                };
                self.session.zoom(amount);
                return true;
            }
            _ => return false,
        };
        if let Some(door) = self.session.handle_input(input) {
            tracing::info!(door, "door toggled");
        }
        true
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.session.frame(raw_dt);

        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = gpu.aspect();
        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            self.session.state().scene(),
            &self.session.view(),
            aspect,
        );

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let mode = self.session.mode();
        let joystick = self.session.joystick_view();
        let mut toggle_clicked = false;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            toggle_clicked = overlay::draw(ctx, mode, joystick);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();

        if toggle_clicked {
            self.toggle_view();
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx) {
            Ok(gpu) => {
                let size = gpu.window.inner_size();
                self.session.handle_input(InputEvent::Resize {
                    width: size.width as f32,
                    height: size.height as f32,
                });
                self.gpu = Some(gpu);
                self.last_frame = Instant::now();
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        if self.route_pointer(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.session.dispose();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size);
                }
                self.session.handle_input(InputEvent::Resize {
                    width: new_size.width as f32,
                    height: new_size.height as f32,
                });
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match key {
                KeyCode::KeyV => self.toggle_view(),
                KeyCode::Escape => {
                    self.session.dispose();
                    event_loop.exit();
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("townwalk-desktop starting");

    let config = match &cli.config {
        Some(path) => GameConfig::load(path).with_context(|| format!("load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let session = Session::new(config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(session);
    event_loop.run_app(&mut app)?;

    Ok(())
}
