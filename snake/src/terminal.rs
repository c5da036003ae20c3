//! Terminal backend
//!
//! Every character cell shows two stacked pixels with the upper half block:
//! the foreground paints the top pixel and the background the bottom one.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::{self, Colors, Print, ResetColor, SetColors},
    terminal::{self, ClearType},
    ExecutableCommand,
};
use log::{debug, info};
use snake_core::{ClockTimer, GameConfig, GameError, GameSummary, InputSource, Key};
use snake_gfx::{Color, Display, GfxError, MemoryDisplay, Rect};
use std::io::{self, Write};
use std::process;
use std::time::Duration;

const HALF_BLOCK: char = '\u{2580}';

/// How long one input poll may wait for a key
const POLL_TIMEOUT: Duration = Duration::from_millis(1);

/// Put the terminal back the way we found it
pub fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let mut out = io::stdout();
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = out.flush();
}

/// Install a panic hook to ensure terminal cleanup
pub fn install_terminal_cleanup_hook() {
    use std::panic;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

/// Install signal handlers to ensure terminal cleanup on exit
pub fn install_signal_handlers() {
    use signal_hook::{consts::SIGINT, consts::SIGTERM, iterator::Signals};
    use std::thread;

    // Not fatal if unavailable, the guard still restores on a normal exit
    if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM]) {
        thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                restore_terminal();
                process::exit(128 + signal);
            }
        });
    }
}

/// Alternate screen, hidden cursor and raw mode for as long as it lives
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        terminal::enable_raw_mode()?;
        out.execute(terminal::Clear(ClearType::All))?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.red,
        g: color.green,
        b: color.blue,
    }
}

/// A [`Display`] drawn with half-block characters on `out`
pub struct TerminalDisplay<W: Write> {
    out: W,
    front: MemoryDisplay,
}

impl TerminalDisplay<io::Stdout> {
    /// Sized to the current terminal: one pixel column per character
    /// column, two pixel rows per character row
    pub fn stdout() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(io::stdout(), cols, rows))
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        debug!("Terminal display {cols}x{rows} characters");
        Self {
            out,
            front: MemoryDisplay::new(u32::from(cols), u32::from(rows) * 2),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    /// Repaint the character rows covering `region` from the front buffer
    fn draw(&mut self, region: Rect) -> io::Result<()> {
        let first = region.y / 2;
        let last = (region.y + region.height - 1) / 2;
        for row in first..=last {
            queue!(self.out, cursor::MoveTo(region.x as u16, row as u16))?;
            let mut current = None;
            for x in region.x..region.x + region.width {
                let top = self.front.pixel(x, row * 2).unwrap_or_default();
                let bottom = self.front.pixel(x, row * 2 + 1).unwrap_or_default();
                if current != Some((top, bottom)) {
                    queue!(
                        self.out,
                        SetColors(Colors::new(term_color(top), term_color(bottom)))
                    )?;
                    current = Some((top, bottom));
                }
                queue!(self.out, Print(HALF_BLOCK))?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn resolution(&self) -> (u32, u32) {
        self.front.resolution()
    }

    fn blit(&mut self, buffer: &[Color], stride: u32, region: Rect) -> Result<(), GfxError> {
        self.front.blit(buffer, stride, region)?;
        for region in self.front.take_blits() {
            self.draw(region)
                .map_err(|e| GfxError::display(format!("terminal write failed: {e}")))?;
        }
        Ok(())
    }
}

/// Keys from crossterm events. Ctrl-C arrives as a key in raw mode and is
/// treated as Escape.
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn read_key(&mut self) -> Result<Option<Key>, GameError> {
        let ready = event::poll(POLL_TIMEOUT)
            .map_err(|e| GameError::platform(format!("input poll failed: {e}")))?;
        if !ready {
            return Ok(None);
        }
        let event =
            event::read().map_err(|e| GameError::platform(format!("input read failed: {e}")))?;
        let Event::Key(key_event) = event else {
            return Ok(None);
        };
        if key_event.kind != KeyEventKind::Press {
            return Ok(None);
        }
        let key = match key_event.code {
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Esc => Key::Escape,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Key::Escape
            }
            KeyCode::Enter => Key::Enter,
            KeyCode::Char(c) => Key::Char(c),
            _ => return Ok(None),
        };
        Ok(Some(key))
    }
}

/// Play one game in the current terminal
pub fn play(config: &GameConfig) -> Result<GameSummary, Box<dyn std::error::Error>> {
    install_terminal_cleanup_hook();
    install_signal_handlers();

    let guard = TerminalGuard::enter()?;
    let mut display = TerminalDisplay::stdout()?;
    let (width, height) = display.resolution();
    info!("Terminal backend at {width}x{height} pixels");

    let summary = snake_core::run(
        config,
        &mut display,
        &mut TerminalInput,
        &mut ClockTimer::new(),
        &mut ClockTimer::new(),
    );
    drop(guard);
    Ok(summary?)
}
