//! Window backend
//!
//! The winit event loop owns the main thread, so the game loop runs on a
//! worker thread. The two share the presented frame and a key queue.

use log::{error, info};
use pixels::{Pixels, SurfaceTexture};
use snake_core::{ClockTimer, GameConfig, GameError, GameSummary, InputSource, Key};
use snake_gfx::{Color, Display, GfxError, MemoryDisplay, Rect};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

/// How long an empty input poll sleeps on the game thread
const POLL_TIMEOUT: Duration = Duration::from_millis(1);

/// How often the event loop wakes up to look for a new frame
const FRAME_INTERVAL: Duration = Duration::from_millis(8);

/// Arrows, Escape and Enter drive the game; the rest only count for
/// "press any key"
const KEYS: [(VirtualKeyCode, Key); 43] = [
    (VirtualKeyCode::Up, Key::Up),
    (VirtualKeyCode::Down, Key::Down),
    (VirtualKeyCode::Left, Key::Left),
    (VirtualKeyCode::Right, Key::Right),
    (VirtualKeyCode::Escape, Key::Escape),
    (VirtualKeyCode::Return, Key::Enter),
    (VirtualKeyCode::Space, Key::Char(' ')),
    (VirtualKeyCode::A, Key::Char('a')),
    (VirtualKeyCode::B, Key::Char('b')),
    (VirtualKeyCode::C, Key::Char('c')),
    (VirtualKeyCode::D, Key::Char('d')),
    (VirtualKeyCode::E, Key::Char('e')),
    (VirtualKeyCode::F, Key::Char('f')),
    (VirtualKeyCode::G, Key::Char('g')),
    (VirtualKeyCode::H, Key::Char('h')),
    (VirtualKeyCode::I, Key::Char('i')),
    (VirtualKeyCode::J, Key::Char('j')),
    (VirtualKeyCode::K, Key::Char('k')),
    (VirtualKeyCode::L, Key::Char('l')),
    (VirtualKeyCode::M, Key::Char('m')),
    (VirtualKeyCode::N, Key::Char('n')),
    (VirtualKeyCode::O, Key::Char('o')),
    (VirtualKeyCode::P, Key::Char('p')),
    (VirtualKeyCode::Q, Key::Char('q')),
    (VirtualKeyCode::R, Key::Char('r')),
    (VirtualKeyCode::S, Key::Char('s')),
    (VirtualKeyCode::T, Key::Char('t')),
    (VirtualKeyCode::U, Key::Char('u')),
    (VirtualKeyCode::V, Key::Char('v')),
    (VirtualKeyCode::W, Key::Char('w')),
    (VirtualKeyCode::X, Key::Char('x')),
    (VirtualKeyCode::Y, Key::Char('y')),
    (VirtualKeyCode::Z, Key::Char('z')),
    (VirtualKeyCode::Key0, Key::Char('0')),
    (VirtualKeyCode::Key1, Key::Char('1')),
    (VirtualKeyCode::Key2, Key::Char('2')),
    (VirtualKeyCode::Key3, Key::Char('3')),
    (VirtualKeyCode::Key4, Key::Char('4')),
    (VirtualKeyCode::Key5, Key::Char('5')),
    (VirtualKeyCode::Key6, Key::Char('6')),
    (VirtualKeyCode::Key7, Key::Char('7')),
    (VirtualKeyCode::Key8, Key::Char('8')),
    (VirtualKeyCode::Key9, Key::Char('9')),
];

/// Shared between the game thread and the event loop
struct WindowState {
    screen: MemoryDisplay,
    keys: VecDeque<Key>,
    /// New pixels since the last redraw
    dirty: bool,
    /// The window is gone, the game should wind down
    closed: bool,
    /// The game thread has returned
    finished: bool,
}

impl WindowState {
    fn new(width: u32, height: u32) -> Self {
        Self {
            screen: MemoryDisplay::new(width, height),
            keys: VecDeque::new(),
            dirty: true,
            closed: false,
            finished: false,
        }
    }
}

type SharedState = Arc<Mutex<WindowState>>;

/// A panic on one side must not wedge the other, so poisoning is ignored
fn lock(state: &Mutex<WindowState>) -> MutexGuard<'_, WindowState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The game thread's view of the window
struct WindowDisplay {
    state: SharedState,
    resolution: (u32, u32),
}

impl Display for WindowDisplay {
    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn blit(&mut self, buffer: &[Color], stride: u32, region: Rect) -> Result<(), GfxError> {
        let mut state = lock(&self.state);
        state.screen.blit(buffer, stride, region)?;
        state.screen.take_blits();
        state.dirty = true;
        Ok(())
    }
}

struct WindowInput {
    state: SharedState,
}

impl InputSource for WindowInput {
    fn read_key(&mut self) -> Result<Option<Key>, GameError> {
        {
            let mut state = lock(&self.state);
            if state.closed {
                return Ok(Some(Key::Escape));
            }
            if let Some(key) = state.keys.pop_front() {
                return Ok(Some(key));
            }
        }
        thread::sleep(POLL_TIMEOUT);
        Ok(None)
    }
}

/// Play one game in a `width` x `height` window
pub fn play(
    config: &GameConfig,
    width: u32,
    height: u32,
) -> Result<GameSummary, Box<dyn std::error::Error>> {
    let mut event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Snake")
        .with_inner_size(LogicalSize::new(width, height))
        .with_resizable(false)
        .build(&event_loop)?;
    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut pixels = Pixels::new(width, height, surface_texture)?;
    info!("Window backend at {width}x{height} pixels");

    let state: SharedState = Arc::new(Mutex::new(WindowState::new(width, height)));
    let worker = {
        let state = Arc::clone(&state);
        let config = config.clone();
        thread::spawn(move || {
            let mut display = WindowDisplay {
                state: Arc::clone(&state),
                resolution: (width, height),
            };
            let mut input = WindowInput {
                state: Arc::clone(&state),
            };
            let result = snake_core::run(
                &config,
                &mut display,
                &mut input,
                &mut ClockTimer::new(),
                &mut ClockTimer::new(),
            );
            lock(&state).finished = true;
            result
        })
    };

    let mut input = WinitInputHelper::new();
    let mut render_error = None;
    event_loop.run_return(|event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(Instant::now() + FRAME_INTERVAL);

        if let Event::RedrawRequested(_) = event {
            {
                let mut state = lock(&state);
                let frame = pixels.frame_mut();
                for (dst, color) in frame.chunks_exact_mut(4).zip(state.screen.front()) {
                    dst.copy_from_slice(&color.to_rgba());
                }
                state.dirty = false;
            }
            if let Err(e) = pixels.render() {
                error!("Render failed: {e}");
                render_error = Some(e);
                lock(&state).closed = true;
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if let Some(size) = input.window_resized() {
                if let Err(e) = pixels.resize_surface(size.width, size.height) {
                    error!("Resizing the window surface failed: {e}");
                }
            }
            let mut state = lock(&state);
            if input.close_requested() || input.destroyed() {
                state.closed = true;
            }
            for (code, key) in KEYS {
                if input.key_pressed(code) {
                    state.keys.push_back(key);
                }
            }
            if state.closed || state.finished {
                *control_flow = ControlFlow::Exit;
                return;
            }
            if state.dirty {
                window.request_redraw();
            }
        }
    });

    // the game thread may still be waiting for a key
    lock(&state).closed = true;
    let summary = worker.join().map_err(|_| "game thread panicked")?;
    if let Some(e) = render_error {
        return Err(e.into());
    }
    Ok(summary?)
}
