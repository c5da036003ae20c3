//! The game loop
//!
//! Start screen, play, game-over screen. Input is polled on every pass;
//! the simulation only steps when the frame timer fires, so direction
//! changes between ticks collapse into the last one pressed.

use log::info;
use snake_gfx::{font, Color, Display, Surface};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::platform::{InputSource, Key, TickSource};
use crate::session::{GameSession, TickOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The head ran into the body
    Collided,
    /// The snake filled the grid
    BoardFull,
    /// Escape was pressed
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub length: usize,
    pub ticks: u64,
    pub ending: Ending,
}

/// Play one round on `display`. `frame_timer` paces the simulation and
/// `fps_timer` paces the FPS counter; both get their periods from
/// `config`.
pub fn run(
    config: &GameConfig,
    display: &mut dyn Display,
    input: &mut dyn InputSource,
    frame_timer: &mut dyn TickSource,
    fps_timer: &mut dyn TickSource,
) -> Result<GameSummary, GameError> {
    let mut surface = Surface::for_display(display)?;
    let mut session = GameSession::new(config, (surface.width(), surface.height()))?;
    let config = session.config().clone();
    info!(
        "Starting {}x{} game on a {}x{} display at {} ticks/s",
        config.cols,
        config.rows,
        surface.width(),
        surface.height(),
        config.tick_rate
    );

    show_start_screen(&mut surface, display, &config)?;
    if wait_for_key(input)? == Key::Escape {
        info!("Quit from the start screen");
        return finish(&mut surface, display, summarize(&session, Ending::Quit));
    }

    session.draw_board(&mut surface, display)?;
    session.draw_fps(&mut surface, display, 0)?;
    frame_timer.set_period(config.tick_period())?;
    fps_timer.set_period(config.fps_period())?;

    let mut frames: u32 = 0;
    let ending = loop {
        session.handle_key(input.read_key()?);
        if session.quit_requested() {
            break Ending::Quit;
        }
        if fps_timer.check()? {
            session.draw_fps(&mut surface, display, frames / config.fps_period_seconds)?;
            frames = 0;
        }
        if !frame_timer.check()? {
            continue;
        }
        frames = frames.saturating_add(1);

        match session.tick()? {
            TickOutcome::GameOver => break Ending::Collided,
            TickOutcome::BoardFull => {
                session.render(&mut surface, display)?;
                break Ending::BoardFull;
            }
            TickOutcome::Idle | TickOutcome::Moved | TickOutcome::Ate => {}
        }
        session.render(&mut surface, display)?;
    };

    let summary = summarize(&session, ending);
    info!(
        "Game ended ({:?}) after {} ticks, score {}, length {}",
        summary.ending, summary.ticks, summary.score, summary.length
    );
    if ending != Ending::Quit {
        show_game_over(&mut surface, display, &config, summary.score)?;
        wait_for_key(input)?;
    }
    finish(&mut surface, display, summary)
}

fn summarize(session: &GameSession, ending: Ending) -> GameSummary {
    GameSummary {
        score: session.score(),
        length: session.snake().len(),
        ticks: session.ticks(),
        ending,
    }
}

/// Leave a blank display behind
fn finish(
    surface: &mut Surface,
    display: &mut dyn Display,
    summary: GameSummary,
) -> Result<GameSummary, GameError> {
    surface.clear();
    surface.present(display)?;
    Ok(summary)
}

fn wait_for_key(input: &mut dyn InputSource) -> Result<Key, GameError> {
    loop {
        if let Some(key) = input.read_key()? {
            return Ok(key);
        }
    }
}

/// Draw `text` horizontally centered with its top at `y`
fn centered(
    surface: &mut Surface,
    y: u32,
    text: &str,
    fg: Color,
    bg: Color,
    scale: u32,
) -> Result<(), GameError> {
    let x = surface.width().saturating_sub(font::text_width(text, scale)) / 2;
    font::draw_text(surface, x, y, text, fg, bg, scale)?;
    Ok(())
}

fn show_start_screen(
    surface: &mut Surface,
    display: &mut dyn Display,
    config: &GameConfig,
) -> Result<(), GameError> {
    let scale = config.text_scale;
    let (fg, bg) = (config.palette.text(), config.palette.background());
    let middle = surface.height() / 2;

    surface.clear();
    centered(surface, middle.saturating_sub(16 * scale), "Welcome to Snake!", fg, bg, 2 * scale)?;
    centered(surface, middle + 8 * scale, "Use arrow keys to move", fg, bg, scale)?;
    centered(surface, middle + 24 * scale, "Press any key to start...", fg, bg, scale)?;
    surface.present(display)?;
    Ok(())
}

fn show_game_over(
    surface: &mut Surface,
    display: &mut dyn Display,
    config: &GameConfig,
    score: u32,
) -> Result<(), GameError> {
    let scale = config.text_scale;
    let (fg, bg) = (config.palette.text(), config.palette.background());
    let middle = surface.height() / 2;

    surface.clear();
    centered(
        surface,
        middle.saturating_sub(16 * scale),
        "Game Over!",
        config.palette.game_over(),
        bg,
        2 * scale,
    )?;
    centered(surface, middle + 8 * scale, &format!("Score: {score}"), fg, bg, scale)?;
    centered(surface, middle + 24 * scale, "Press any key to continue...", fg, bg, scale)?;
    surface.present(display)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Duration;

    use snake_gfx::MemoryDisplay;

    /// Pops one scripted poll per call. An exhausted script presses Escape.
    struct Script(VecDeque<Option<Key>>);

    impl InputSource for Script {
        fn read_key(&mut self) -> Result<Option<Key>, GameError> {
            Ok(self.0.pop_front().unwrap_or(Some(Key::Escape)))
        }
    }

    struct Fixed(bool);

    impl TickSource for Fixed {
        fn set_period(&mut self, _period: Duration) -> Result<(), GameError> {
            Ok(())
        }

        fn check(&mut self) -> Result<bool, GameError> {
            Ok(self.0)
        }
    }

    fn config() -> GameConfig {
        GameConfig {
            cols: 10,
            rows: 10,
            text_scale: 1,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_start_screen_is_shown() {
        let mut display = MemoryDisplay::new(200, 116);
        let mut input = Script(VecDeque::from([Some(Key::Escape)]));
        let summary = run(
            &config(),
            &mut display,
            &mut input,
            &mut Fixed(true),
            &mut Fixed(false),
        )
        .unwrap();
        assert_eq!(summary.ending, Ending::Quit);
        assert_eq!(summary.ticks, 0);
        // start screen, then the final clear
        let blits = display.take_blits();
        assert_eq!(blits.len(), 2);
        assert!(display.front().iter().all(|&p| p == Color::BLACK));
    }

    #[test]
    fn test_no_tick_without_timer() {
        let mut display = MemoryDisplay::new(100, 116);
        let mut input = Script(VecDeque::from([
            Some(Key::Enter),
            Some(Key::Right),
            None,
            None,
            Some(Key::Escape),
        ]));
        let summary = run(
            &config(),
            &mut display,
            &mut input,
            &mut Fixed(false),
            &mut Fixed(false),
        )
        .unwrap();
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.ending, Ending::Quit);
    }

    #[test]
    fn test_tiny_display_is_an_error() {
        let mut display = MemoryDisplay::new(100, 10);
        let mut input = Script(VecDeque::new());
        let result = run(
            &config(),
            &mut display,
            &mut input,
            &mut Fixed(true),
            &mut Fixed(false),
        );
        assert!(matches!(result, Err(GameError::InvalidConfig { .. })));
    }
}
