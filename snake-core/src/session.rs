//! One game in progress
//!
//! Everything a round needs lives here and is passed by reference to the
//! loop: the grid, the snake, the generator, the food, the score and the
//! poll counter that feeds the generator.

use log::{debug, warn};
use snake_gfx::{font, Display, Grid, Rect, Surface};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::food::place_food;
use crate::platform::Key;
use crate::point::Point;
use crate::rng::Lcg;
use crate::snake::{Snake, SnakeState};

/// What a single simulation step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No direction chosen yet
    Idle,
    Moved,
    Ate,
    /// The head ran into the body
    GameOver,
    /// The snake covers every cell, there is nowhere to put food
    BoardFull,
}

pub struct GameSession {
    config: GameConfig,
    width: u32,
    height: u32,
    hud_height: u32,
    grid: Grid<'static>,
    snake: Snake,
    rng: Lcg,
    food: Point,
    score: u32,
    polls: u32,
    ticks: u64,
    quit: bool,
    score_changed: bool,
}

impl GameSession {
    /// Lay out a game on a display of `resolution`. The grid sits below a
    /// HUD strip and is clamped so every cell is at least one pixel.
    pub fn new(config: &GameConfig, resolution: (u32, u32)) -> Result<Self, GameError> {
        config.validate()?;
        let (width, height) = resolution;
        let hud_height = config.hud_height();
        if width == 0 || height <= hud_height {
            return Err(GameError::config(format!(
                "display {width}x{height} leaves no room for the grid below a {hud_height} pixel HUD"
            )));
        }
        let grid_height = height - hud_height;

        let cols = config.cols.min(width);
        let rows = config.rows.min(grid_height);
        if (cols, rows) != (config.cols, config.rows) {
            warn!(
                "Grid {}x{} does not fit {width}x{grid_height} pixels, using {cols}x{rows}",
                config.cols, config.rows
            );
        }
        let mut config = config.clone();
        config.cols = cols;
        config.rows = rows;
        config.validate()?;

        let grid = Grid::create(width, grid_height, cols, rows, None)?;
        let snake = Snake::new(Point::new(0, 0), config.initial_length, cols, rows)?;
        let mut rng = Lcg::new(config.seed);
        let food = place_food(&mut rng, &snake, cols, rows, 0)?;

        let mut session = Self {
            config,
            width,
            height,
            hud_height,
            grid,
            snake,
            rng,
            food,
            score: 0,
            polls: 0,
            ticks: 0,
            quit: false,
            score_changed: true,
        };
        session.paint_snake()?;
        session.paint_food()?;
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn grid(&self) -> &Grid<'static> {
        &self.grid
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Top edge of the grid on the surface
    pub fn grid_origin(&self) -> (u32, u32) {
        (0, self.hud_height)
    }

    /// Feed one input poll into the session. Every poll counts, key or
    /// not, since the count seeds food placement.
    pub fn handle_key(&mut self, key: Option<Key>) {
        self.polls = self.polls.wrapping_add(1);
        let Some(key) = key else {
            return;
        };
        if key == Key::Escape {
            debug!("Quit requested");
            self.quit = true;
        } else if let Some(direction) = key.direction() {
            self.snake.set_pending_direction(direction);
        }
    }

    /// Advance the simulation one step and update the grid colors
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        self.ticks += 1;
        let direction = self.snake.resolve_direction();
        self.snake.advance(direction);
        match self.snake.state() {
            SnakeState::Idle => return Ok(TickOutcome::Idle),
            SnakeState::Collided => return Ok(TickOutcome::GameOver),
            SnakeState::Moving => {}
        }

        if let Some(vacated) = self.snake.vacated() {
            self.grid
                .fill_cell(vacated.x, vacated.y, self.config.palette.background())?;
        }
        self.paint_snake()?;

        if !self.snake.check_ate_food(self.food) {
            return Ok(TickOutcome::Moved);
        }
        self.snake.grow();
        self.score = self.score.saturating_add(self.config.score_per_food);
        self.score_changed = true;
        debug!("Ate food at {:?}, score {}", self.food, self.score);

        let (cols, rows) = (self.grid.cols(), self.grid.rows());
        match place_food(&mut self.rng, &self.snake, cols, rows, self.polls) {
            Ok(food) => self.food = food,
            Err(GameError::NoSpace { .. }) => return Ok(TickOutcome::BoardFull),
            Err(e) => return Err(e),
        }
        self.paint_food()?;
        Ok(TickOutcome::Ate)
    }

    /// Paint the whole board: HUD, separator and every grid cell, then
    /// present the full surface.
    pub fn draw_board(
        &mut self,
        surface: &mut Surface,
        display: &mut dyn Display,
    ) -> Result<(), GameError> {
        surface.clear();
        self.grid.clear_all();
        let color = self.config.palette.snake();
        for point in self.snake.segments() {
            self.grid.fill_cell(point.x, point.y, color)?;
        }
        self.paint_food()?;
        self.draw_score(surface)?;
        surface.fill_rect(
            0,
            self.hud_height - 1,
            self.width,
            1,
            self.config.palette.text(),
        )?;
        let (x, y) = self.grid_origin();
        self.grid.draw(surface, x, y)?;
        surface.present(display)?;
        self.score_changed = false;
        Ok(())
    }

    /// Redraw what the last tick changed. Only the food, head and vacated
    /// cells are copied to the display, plus the score when it moved.
    pub fn render(
        &mut self,
        surface: &mut Surface,
        display: &mut dyn Display,
    ) -> Result<(), GameError> {
        let (ox, oy) = self.grid_origin();
        self.grid.draw(surface, ox, oy)?;

        let head = self.snake.head();
        let cells = [Some(self.food), Some(head), self.snake.vacated()];
        for cell in cells.into_iter().flatten() {
            self.grid.present_cell(surface, display, ox, oy, cell.x, cell.y)?;
        }

        if self.score_changed {
            let area = self.draw_score(surface)?;
            surface.present_region(display, area.x, area.y, area.width, area.height)?;
            self.score_changed = false;
        }
        Ok(())
    }

    /// Draw the FPS counter at the right of the HUD and present it
    pub fn draw_fps(
        &self,
        surface: &mut Surface,
        display: &mut dyn Display,
        fps: u32,
    ) -> Result<(), GameError> {
        let scale = self.config.text_scale;
        let text = format!("FPS: {fps:<3}");
        let text_width = font::text_width(&text, scale);
        let x = self.width.saturating_sub(text_width + 4 * scale);
        let y = self.text_top();
        let palette = &self.config.palette;
        font::draw_text(surface, x, y, &text, palette.text(), palette.background(), scale)?;
        surface.present_region(display, x, y, text_width, font::text_height(scale))?;
        Ok(())
    }

    /// Draws "Score: n" at the left of the HUD and returns the painted area
    fn draw_score(&self, surface: &mut Surface) -> Result<Rect, GameError> {
        let scale = self.config.text_scale;
        let text = format!("Score: {}", self.score);
        let y = self.text_top();
        let palette = &self.config.palette;
        font::draw_text(surface, 0, y, &text, palette.text(), palette.background(), scale)?;
        Ok(Rect::new(0, y, font::text_width(&text, scale), font::text_height(scale)))
    }

    fn text_top(&self) -> u32 {
        4 * self.config.text_scale
    }

    fn paint_snake(&mut self) -> Result<(), GameError> {
        let color = self.config.palette.snake();
        for point in [self.snake.head(), self.snake.tail()] {
            self.grid.fill_cell(point.x, point.y, color)?;
        }
        Ok(())
    }

    fn paint_food(&mut self) -> Result<(), GameError> {
        self.grid
            .fill_cell(self.food.x, self.food.y, self.config.palette.food())?;
        Ok(())
    }
}
