mod buffer;
mod pipeline;
mod shader;
mod vertex;

use anyhow::{Context, Result};
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

const SHADER_ID: &str = "triangle";

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.2,
    b: 0.3,
    a: 1.0,
};

struct Application {
    window: Window,
    window_surface: wgpu::Surface,
    device: wgpu::Device,
    command_queue: wgpu::Queue,
    size: winit::dpi::PhysicalSize<u32>,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
}

impl Application {
    // The whole setup is one forward pass: instance, window, surface, adapter,
    // device, shader, pipeline, vertex buffer. Any failure aborts it.
    async fn new(event_loop: &EventLoop<()>) -> Result<Application> {
        // Instance - Handle to the GPU. Use this to get adapter and surface
        let wgpu_instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let window = WindowBuilder::new()
            .with_title("Triangle")
            .with_resizable(true)
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600))
            .build(event_loop)
            .context("failed to create window")?;

        let size = window.inner_size();

        // --SAFETY--
        // The surface needs to live as long as the window that created it.
        // Application owns the window, so this should be safe.
        let window_surface = unsafe { wgpu_instance.create_surface(&window) }
            .context("failed to create window surface")?;

        // Handle for the actual graphics card
        let adapter = wgpu_instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&window_surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible graphics adapter found")?;
        log::info!("using adapter: {}", adapter.get_info().name);

        // Create device and command queue from adapter
        let (device, command_queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("main device"),
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to acquire device")?;

        let surface_caps = window_surface.get_capabilities(&adapter);
        // The shader assumes an sRGB surface; fall back to whatever the
        // surface reports first if none is available.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        window_surface.configure(&device, &config);

        let shader_source =
            shader::load_source(SHADER_ID).context("failed to load triangle shader")?;
        let render_pipeline = pipeline::create_render_pipeline(
            &device,
            config.format,
            &[vertex::Vertex::desc()],
            &shader_source,
        );

        let vertex_buffer =
            buffer::create_vertex_buffer(&device, "Vertex Buffer", vertex::TRIANGLE);

        Ok(Application {
            window,
            window_surface,
            device,
            command_queue,
            size,
            config,
            render_pipeline,
            vertex_buffer,
        })
    }

    fn run(mut self, event_loop: EventLoop<()>) {
        event_loop.set_control_flow(ControlFlow::Wait);
        let _ = event_loop.run(move |event, elwt| match event {
            Event::WindowEvent {
                window_id,
                ref event,
            } if window_id == self.window.id() => {
                match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                logical_key: Key::Named(NamedKey::Escape),
                                ..
                            },
                        ..
                    } => {
                        elwt.exit();
                    }

                    WindowEvent::Resized(physical_size) => {
                        self.resize(*physical_size);
                    }

                    WindowEvent::RedrawRequested => {
                        match self.render() {
                            Ok(_) => {}
                            // Reconfigure the surface if lost
                            Err(wgpu::SurfaceError::Lost) => self.resize(self.size),
                            // The system is out of memory, we should probably quit
                            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                            // All other errors (Outdated, Timeout) should be resolved by the next frame
                            Err(e) => log::warn!("surface error: {:?}", e),
                        }
                    }

                    _ => (),
                }
            }
            _ => (),
        });
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.window_surface.configure(&self.device, &self.config);
        }

        self.window.request_redraw();
    }

    // ===================================================================== //
    // ============================= RENDER ================================ //
    // ===================================================================== //
    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.window_surface.get_current_texture()?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // begin_render_pass borrows the encoder mutably, so the pass is
        // scoped to release the borrow before encoder.finish()
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..vertex::TRIANGLE.len() as u32, 0..1);
        }

        self.command_queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let application = pollster::block_on(Application::new(&event_loop))?;
    application.run(event_loop);

    Ok(())
}
