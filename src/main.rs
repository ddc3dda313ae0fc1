//! Parallax Stage - procedural landscape backdrop with spring-animated objects
//!
//! `render` bakes the landscape texture to PNG, `simulate` prints a
//! controller timeline as CSV, `preview` opens the interactive scene.

use std::error::Error;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::{Vec2, Vec3};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorIcon, Window, WindowId},
};

use parallax_stage::camera::{normalize_pointer, PreviewCamera};
use parallax_stage::cli::{Args, Command, PreviewArgs, RenderArgs, SimulateArgs};
use parallax_stage::error::StageResult;
use parallax_stage::interaction::{CursorStyle, InteractiveController};
use parallax_stage::landscape::{
    deliver, Disposable, LandscapeGenerator, LandscapeTexture, LoadTicket, TextureOrigin,
};
use parallax_stage::params::{InteractionTuning, LandscapeStyle, RenderConfig, SceneLayout};
use parallax_stage::rendering::RenderSystem;
use parallax_stage::timeline::{run_timeline, FrameSample};

/// Hover radius relative to the cube's half extent
const HOVER_RADIUS_FACTOR: f32 = 1.2;

/// Landscape load in flight on a worker thread
struct PendingLandscape {
    ticket: LoadTicket,
    receiver: Receiver<StageResult<LandscapeTexture>>,
}

/// Preview window state
struct PreviewApp {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    pending: Option<PendingLandscape>,

    // Scene
    camera: PreviewCamera,
    controllers: Vec<InteractiveController>,
    cursor: Option<Vec2>,

    // Configuration
    render_config: RenderConfig,
    layout: SceneLayout,
    style: LandscapeStyle,

    // Time tracking
    start_time: Instant,
    last_frame: Instant,
}

impl PreviewApp {
    fn new(style: LandscapeStyle) -> Self {
        let render_config = RenderConfig::default();
        let layout = SceneLayout::default();
        let camera = PreviewCamera::new(&render_config);
        let controllers = layout
            .objects
            .iter()
            .map(|&p| InteractiveController::new(Vec3::from_array(p)))
            .collect();

        Self {
            window: None,
            render_system: None,
            pending: None,
            camera,
            controllers,
            cursor: None,
            render_config,
            layout,
            style,
            start_time: Instant::now(),
            last_frame: Instant::now(),
        }
    }

    /// Start generating the landscape off the event loop thread
    fn spawn_landscape(&mut self, ticket: LoadTicket) {
        let (sender, receiver) = mpsc::channel();
        let style = self.style.clone();
        std::thread::spawn(move || {
            let generator = LandscapeGenerator::new(style);
            // Receiver gone means the window closed first
            deliver(&sender, pollster::block_on(generator.generate_default()));
        });
        self.pending = Some(PendingLandscape { ticket, receiver });
    }

    /// Upload the landscape if the worker has finished
    fn poll_landscape(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let result = match pending.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                log::error!("Landscape worker exited without a result");
                self.pending = None;
                return;
            }
        };
        let Some(PendingLandscape { ticket, .. }) = self.pending.take() else {
            return;
        };

        match result {
            Ok(texture) => {
                let Some(texture) = ticket.admit(texture) else {
                    return;
                };
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.install_landscape(&texture);
                }
                texture.dispose();
            }
            // Scene keeps running on the untextured backdrop
            Err(e) => log::warn!("Continuing without landscape texture: {}", e),
        }
    }

    fn screen_size(&self) -> Vec2 {
        let (width, height) = self
            .render_system
            .as_ref()
            .map(|r| r.size())
            .unwrap_or((self.render_config.window_width, self.render_config.window_height));
        Vec2::new(width as f32, height as f32)
    }

    /// Re-run hit tests after the cursor moved and forward enter/leave
    fn update_hover(&mut self) {
        let screen = self.screen_size();
        let mut signal = None;

        for controller in &mut self.controllers {
            let transform = controller.transform();
            let radius = self.layout.object_half_extent * transform.scale * HOVER_RADIUS_FACTOR;
            let hit = self
                .cursor
                .is_some_and(|c| self.camera.hit_test(c, transform.position, radius, screen));
            if hit == controller.is_hovered() {
                continue;
            }
            let style = if hit {
                controller.on_pointer_enter()
            } else {
                controller.on_pointer_leave()
            };
            if signal != Some(CursorStyle::Pointer) {
                signal = Some(style);
            }
        }

        if let (Some(style), Some(window)) = (signal, &self.window) {
            let hovering = self.controllers.iter().any(|c| c.is_hovered());
            let icon = match style {
                CursorStyle::Pointer => CursorIcon::Pointer,
                CursorStyle::Default if hovering => CursorIcon::Pointer,
                CursorStyle::Default => CursorIcon::Default,
            };
            window.set_cursor(icon);
        }
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        let elapsed_s = (now - self.start_time).as_secs_f32();

        let screen = self.screen_size();
        let aspect = screen.x / screen.y.max(1.0);
        let pointer = self
            .cursor
            .map(|c| normalize_pointer(c, screen))
            .unwrap_or(Vec2::ZERO);
        let viewport = self.camera.viewport(aspect);

        let transforms: Vec<_> = self
            .controllers
            .iter_mut()
            .map(|c| c.advance(dt, elapsed_s, pointer, viewport))
            .collect();

        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };
        match render_system.render(self.camera.view_proj(aspect), &transforms) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for PreviewApp {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.poll_landscape();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Parallax Stage")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.render_config,
            self.layout.clone(),
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let ticket = render_system.landscape_ticket();
        self.window = Some(window);
        self.render_system = Some(render_system);
        self.spawn_landscape(ticket);

        println!("\nParallax Stage is running!");
        println!("Hover and click the cubes, press ESC to quit\n");
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(Vec2::new(position.x as f32, position.y as f32));
                self.update_hover();
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.update_hover();
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                for controller in self.controllers.iter_mut().filter(|c| c.is_hovered()) {
                    controller.on_click();
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

fn run_render(args: &RenderArgs) -> Result<(), Box<dyn Error>> {
    let style = args.style();
    let (width, height) = (style.width, style.height);
    let generator = LandscapeGenerator::new(style);

    let start = Instant::now();
    let texture = pollster::block_on(generator.generate(width, height))?;
    texture.save(&args.output)?;

    let provenance = match &texture.origin {
        TextureOrigin::Procedural { layers } => format!("procedural, {} layers", layers),
        TextureOrigin::Fallback { path } => format!("fallback {}", path.display()),
    };
    println!(
        "Wrote {}x{} texture ({}) to {} in {:.1?}",
        texture.width(),
        texture.height(),
        provenance,
        args.output.display(),
        start.elapsed()
    );
    texture.dispose();
    Ok(())
}

fn run_simulate(args: &SimulateArgs) {
    let samples = run_timeline(
        &args.timeline_config(),
        &args.events(),
        InteractionTuning::default(),
    );
    println!("{}", FrameSample::CSV_HEADER);
    for sample in &samples {
        println!("{}", sample.to_csv_row());
    }
}

fn run_preview(args: &PreviewArgs) -> Result<(), Box<dyn Error>> {
    let mut app = PreviewApp::new(args.style());
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("parallax_stage=info"))
        .init();

    let args = Args::parse();
    match &args.command {
        Command::Render(render) => run_render(render),
        Command::Simulate(simulate) => {
            run_simulate(simulate);
            Ok(())
        }
        Command::Preview(preview) => run_preview(preview),
    }
}
