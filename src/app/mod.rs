//! Application Loop
//!
//! winit 0.30 `ApplicationHandler` wiring: window creation on resume,
//! event handling (resize, fly-camera input, render-mode toggles) and
//! redraw-driven rendering with an FPS readout in the window title.
//!
//! Keys: `WASD` move, mouse looks, scroll zooms, `F11` cycles the G-buffer
//! debug overlay, `F5` returns to the default render mode, `Esc` quits.

pub mod input;

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::errors::{RenderError, Result};
use crate::renderer::{DebugChannel, RenderSettings, Renderer};
use crate::scene::camera::{Camera, MoveDirection};
use crate::utils::time::Timer;
use input::InputState;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

/// Startup description of the demo application.
pub struct AppDesc {
    pub title: String,
    pub asset_root: PathBuf,
    pub settings: RenderSettings,
}

impl Default for AppDesc {
    fn default() -> Self {
        Self {
            title: "glimmer".to_string(),
            asset_root: PathBuf::from("demos/assets"),
            settings: RenderSettings::default(),
        }
    }
}

struct App {
    desc: AppDesc,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    camera: Camera,
    timer: Timer,
    input: InputState,
    /// Seconds since the last title refresh.
    title_accumulator: f32,
    title_frames: u32,
}

impl App {
    fn new(desc: AppDesc) -> Self {
        Self {
            desc,
            window: None,
            renderer: None,
            camera: Camera::default(),
            timer: Timer::new(),
            input: InputState::new(),
            title_accumulator: 0.0,
            title_frames: 0,
        }
    }

    fn apply_input(&mut self, dt: f32) {
        for (key, direction) in [
            (KeyCode::KeyW, MoveDirection::Forward),
            (KeyCode::KeyS, MoveDirection::Backward),
            (KeyCode::KeyA, MoveDirection::Left),
            (KeyCode::KeyD, MoveDirection::Right),
        ] {
            if self.input.is_pressed(key) {
                self.camera.advance(direction, dt);
            }
        }

        let (dx, dy) = self.input.take_mouse_delta();
        self.camera.rotate(dx, dy);
        self.camera.zoom(self.input.take_scroll_delta());
    }

    fn update_title(&mut self, dt: f32) {
        self.title_accumulator += dt;
        self.title_frames += 1;
        if self.title_accumulator >= 1.0 {
            let fps = self.title_frames as f32 / self.title_accumulator;
            if let Some(window) = &self.window {
                window.set_title(&format!("{} — {fps:.0} FPS", self.desc.title));
            }
            self.title_accumulator = 0.0;
            self.title_frames = 0;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.timer.tick();
        let dt = self.timer.dt_seconds();
        self.apply_input(dt);
        self.update_title(dt);

        if let Some(renderer) = &mut self.renderer {
            match renderer.render(&self.camera, self.timer.elapsed_seconds()) {
                Ok(()) | Err(RenderError::FrameSkip(_)) => {}
                Err(err) => {
                    log::error!("Rendering failed: {err}");
                    event_loop.exit();
                }
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(&self.desc.title)
            .with_inner_size(LogicalSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Window creation failed: {err}");
                event_loop.exit();
                return;
            }
        };

        if let Err(err) = window.set_cursor_grab(winit::window::CursorGrabMode::Confined) {
            log::debug!("Cursor grab unavailable: {err}");
        }
        window.set_cursor_visible(false);

        let size = window.inner_size();
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            self.desc.settings.clone(),
            &self.desc.asset_root,
            size.width.max(1),
            size.height.max(1),
        ));
        match renderer {
            Ok(renderer) => {
                self.renderer = Some(renderer);
                self.window = Some(window);
            }
            Err(err) => {
                log::error!("Renderer initialization failed: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(err) = renderer.resize(size.width, size.height) {
                        log::error!("Resize failed: {err}");
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    // Mode toggles are applied between frames, on key press.
                    if event.state == ElementState::Pressed && !event.repeat {
                        if let Some(renderer) = &mut self.renderer {
                            match key {
                                KeyCode::F11 => {
                                    let settings = renderer.settings_mut();
                                    settings.debug_channel = Some(
                                        settings
                                            .debug_channel
                                            .map_or(DebugChannel::Position, DebugChannel::next),
                                    );
                                    log::info!(
                                        "Debug overlay: {:?}",
                                        renderer.settings().debug_channel
                                    );
                                }
                                KeyCode::F5 => {
                                    renderer.settings_mut().debug_channel = None;
                                    log::info!("Debug overlay: off");
                                }
                                KeyCode::Escape => event_loop.exit(),
                                _ => {}
                            }
                        }
                    }
                    self.input.process_key(key, event.state);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / 20.0,
                };
                self.input.accumulate_scroll(amount);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.input.accumulate_mouse(dx as f32, dy as f32);
        }
    }
}

/// Runs the demo application until the window closes.
pub fn run(desc: AppDesc) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new(desc);
    event_loop.run_app(&mut app)?;
    Ok(())
}
