use crate::carousel::host::{DragCursor, FrameHandle, FrameScheduler, SystemClock};
use crate::carousel::Carousel;
use crate::config::Config;
use crate::input::{PointerEvent, PointerTracker};
use crate::renderer::{Rect, Renderer};
use crate::stage::Stage;
use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{CursorIcon, Window, WindowAttributes, WindowId};

/// Frame slot shared between the carousel's scheduler and the event loop.
type PendingFrame = Rc<Cell<Option<FrameHandle>>>;

/// Schedules carousel frames onto winit redraws. `about_to_wait` paces the
/// redraw; the pending handle goes back to the carousel on `RedrawRequested`.
struct RedrawScheduler {
    pending: PendingFrame,
    next_id: u64,
}

impl FrameScheduler for RedrawScheduler {
    fn schedule_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.set(Some(handle));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.get() == Some(handle) {
            self.pending.set(None);
        }
    }
}

struct WindowState {
    window: Arc<Window>,
    renderer: Renderer,
    carousel: Carousel<Stage>,
    pending_frame: PendingFrame,
    pointer: PointerTracker,
    cursor: DragCursor,
    config_rx: Option<Receiver<()>>,
    _config_watcher: Option<RecommendedWatcher>,
    last_frame: Instant,
}

impl WindowState {
    fn scale(&self) -> f64 {
        self.window.scale_factor()
    }

    /// Carousel area in logical pixels.
    fn content_size(window: &Window, config: &Config) -> (f64, f64) {
        let scale = window.scale_factor();
        let size = window.inner_size();
        let pad = config.window.padding as f64;
        let w = (size.width as f64 / scale - 2.0 * pad).max(1.0);
        let h = (size.height as f64 / scale - 2.0 * pad).max(1.0);
        (w, h)
    }

    /// Carousel area in physical pixels.
    fn content_rect(&self, config: &Config) -> Rect {
        let scale = self.scale() as f32;
        let pad = config.window.padding * scale;
        let size = self.window.inner_size();
        Rect::new(
            pad,
            pad,
            (size.width as f32 - 2.0 * pad).max(1.0),
            (size.height as f32 - 2.0 * pad).max(1.0),
        )
    }

    fn build_carousel(window: &Arc<Window>, config: &Config) -> (Carousel<Stage>, PendingFrame) {
        let (w, h) = Self::content_size(window, config);
        let stage = Stage::new(&config.slides, w, h);
        let pending_frame: PendingFrame = Rc::new(Cell::new(None));
        let scheduler = RedrawScheduler {
            pending: pending_frame.clone(),
            next_id: 0,
        };
        let carousel = Carousel::new(
            stage,
            config.carousel.clone(),
            Box::new(SystemClock::new()),
            Box::new(scheduler),
        );
        (carousel, pending_frame)
    }

    /// Tear the carousel down and build a fresh one from `config`.
    fn rebuild(&mut self, config: &Config) {
        let (carousel, pending_frame) = Self::build_carousel(&self.window, config);
        self.carousel = carousel;
        self.pending_frame = pending_frame;
        self.sync_cursor();
    }

    fn resize_stage(&mut self, config: &Config) {
        let (w, h) = Self::content_size(&self.window, config);
        self.carousel.container_mut().set_size(w, h);
        self.carousel.measure();
    }

    fn dispatch(&mut self, event: PointerEvent) {
        let response = self.carousel.handle_pointer(event);
        if response.prevent_default {
            log::trace!("touch move consumed by drag");
        }
        self.sync_cursor();
    }

    fn sync_cursor(&mut self) {
        let cursor = self.carousel.container().cursor;
        if cursor != self.cursor {
            self.cursor = cursor;
            self.window.set_cursor(match cursor {
                DragCursor::Grab => CursorIcon::Grab,
                DragCursor::Grabbing => CursorIcon::Grabbing,
            });
        }
    }
}

fn watch_config() -> (Option<Receiver<()>>, Option<RecommendedWatcher>) {
    let config_path = Config::config_path();
    let (tx, rx) = crossbeam_channel::bounded::<()>(1);
    let watch_path = config_path.clone();
    let mut watcher =
        notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            if let Ok(event) = res {
                if (event.kind.is_modify() || event.kind.is_create())
                    && event.paths.iter().any(|p| p == &watch_path)
                {
                    let _ = tx.try_send(());
                }
            }
        })
        .map_err(|e| log::warn!("Config hot-reload disabled: {}", e))
        .ok();
    if let Some(ref mut w) = watcher {
        if let Some(dir) = config_path.parent() {
            if let Err(e) = w.watch(dir, RecursiveMode::NonRecursive) {
                log::warn!("Failed to watch {:?}: {}", dir, e);
            }
        }
    }
    (Some(rx), watcher)
}

pub struct App {
    state: Option<WindowState>,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { state: None, config }
    }

    fn create_window_state(event_loop: &ActiveEventLoop, config: &Config) -> Result<WindowState> {
        let attrs = WindowAttributes::default()
            .with_title("smooth carousel")
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);
        let renderer = Renderer::new(window.clone(), config.clone())?;
        let (carousel, pending_frame) = WindowState::build_carousel(&window, config);
        let (config_rx, watcher) = watch_config();

        let mut state = WindowState {
            window,
            renderer,
            carousel,
            pending_frame,
            pointer: PointerTracker::new(),
            cursor: DragCursor::Grabbing,
            config_rx,
            _config_watcher: watcher,
            last_frame: Instant::now(),
        };
        state.sync_cursor();
        Ok(state)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match Self::create_window_state(event_loop, &self.config) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Failed to start: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let fps = self.config.animation.target_fps.max(1) as u64;
        let frame_interval = Duration::from_millis(1000 / fps);
        if let Some(state) = &self.state {
            if state.pending_frame.get().is_some()
                && state.last_frame.elapsed() >= frame_interval
            {
                state.window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                // Dropping the carousel stops its frame loop
                self.state = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                state.renderer.resize(new_size.width, new_size.height);
                state.resize_stage(&self.config);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                state.renderer.apply_config(self.config.clone(), scale_factor as f32);
                state.resize_stage(&self.config);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let scale = state.scale();
                let event = state.pointer.cursor_moved(position, scale);
                state.dispatch(event);
            }

            WindowEvent::CursorLeft { .. } => {
                let event = state.pointer.cursor_left();
                state.dispatch(event);
            }

            WindowEvent::MouseInput { state: button_state, button, .. } => {
                if let Some(event) = state.pointer.mouse_input(button_state, button) {
                    state.dispatch(event);
                }
            }

            WindowEvent::Touch(touch) => {
                let scale = state.scale();
                if let Some(event) = state.pointer.touch(&touch, scale) {
                    state.dispatch(event);
                }
            }

            WindowEvent::RedrawRequested => {
                state.last_frame = Instant::now();

                // Hot-reload config if file changed
                if state
                    .config_rx
                    .as_ref()
                    .is_some_and(|rx| rx.try_recv().is_ok())
                {
                    self.config = Config::load_or_default();
                    log::info!("config reloaded");
                    let scale = state.scale() as f32;
                    state.renderer.apply_config(self.config.clone(), scale);
                    state.rebuild(&self.config);
                }

                if let Some(handle) = state.pending_frame.take() {
                    state.carousel.frame(handle);
                }

                let content = state.content_rect(&self.config);
                let force = state.carousel.snapshot().force;
                match state.renderer.render(state.carousel.container(), content, force) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let s = state.window.inner_size();
                        state.renderer.resize(s.width, s.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory");
                        event_loop.exit();
                    }
                    Err(e) => {
                        log::warn!("Surface error: {:?}", e);
                    }
                }
            }

            _ => {}
        }
    }
}
