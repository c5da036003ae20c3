//! Food placement

use log::{debug, warn};

use crate::error::GameError;
use crate::point::Point;
use crate::rng::Lcg;
use crate::snake::Snake;

/// Random draws per free cell before falling back to a scan
const ATTEMPTS_PER_CELL: usize = 4;
const MIN_ATTEMPTS: usize = 64;

/// Pick a cell not covered by the snake. Draws x then y from `rng` until a
/// free cell turns up; after a bounded number of misses the first free
/// cell in row-major order is taken instead. Fails only when the snake
/// fills the grid.
pub fn place_food(
    rng: &mut Lcg,
    snake: &Snake,
    cols: u32,
    rows: u32,
    increment: u32,
) -> Result<Point, GameError> {
    let cells = cols as usize * rows as usize;
    if snake.len() >= cells {
        return Err(GameError::NoSpace { cols, rows });
    }

    let attempts = (cells * ATTEMPTS_PER_CELL).max(MIN_ATTEMPTS);
    for attempt in 0..attempts {
        let x = rng.next(increment, 0, cols - 1);
        let y = rng.next(increment, 0, rows - 1);
        let point = Point::new(x, y);
        if !snake.contains(point) {
            debug!("Placed food at ({x}, {y}) after {} draws", attempt + 1);
            return Ok(point);
        }
    }

    warn!("No free cell after {attempts} random draws, scanning the grid");
    (0..rows)
        .flat_map(|y| (0..cols).map(move |x| Point::new(x, y)))
        .find(|&p| !snake.contains(p))
        .ok_or(GameError::NoSpace { cols, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Direction;

    #[test]
    fn test_food_avoids_snake() {
        let mut snake = Snake::new(Point::new(0, 0), 1, 4, 4).unwrap();
        for _ in 0..3 {
            snake.advance(Direction::Right);
            snake.grow();
        }
        let mut rng = Lcg::default();
        for increment in 0..200 {
            let food = place_food(&mut rng, &snake, 4, 4, increment).unwrap();
            assert!(food.x < 4 && food.y < 4);
            assert!(!snake.contains(food), "food landed on the snake at {food:?}");
        }
    }

    #[test]
    fn test_same_seed_same_food() {
        let snake = Snake::new(Point::new(3, 3), 1, 60, 50).unwrap();
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for increment in [0, 12, 7, 3000] {
            assert_eq!(
                place_food(&mut a, &snake, 60, 50, increment).unwrap(),
                place_food(&mut b, &snake, 60, 50, increment).unwrap()
            );
        }
    }

    #[test]
    fn test_first_draw_matches_generator() {
        let snake = Snake::new(Point::new(0, 0), 1, 60, 50).unwrap();
        let mut rng = Lcg::default();
        let food = place_food(&mut rng, &snake, 60, 50, 0).unwrap();
        // state 1015568748 % 60 == 48, then 1586005467 % 50 == 17
        assert_eq!(food, Point::new(48, 17));
    }

    #[test]
    fn test_last_free_cell_is_found() {
        // 2x2 grid with three cells taken leaves only (0, 0)
        let mut snake = Snake::new(Point::new(0, 0), 1, 2, 2).unwrap();
        snake.advance(Direction::Right);
        snake.grow();
        snake.advance(Direction::Down);
        snake.grow();
        snake.advance(Direction::Left);
        assert_eq!(snake.len(), 3);
        let mut rng = Lcg::default();
        assert_eq!(place_food(&mut rng, &snake, 2, 2, 0), Ok(Point::new(0, 0)));
    }

    #[test]
    fn test_full_grid_reports_no_space() {
        let snake = Snake::new(Point::new(0, 0), 4, 2, 2).unwrap();
        let mut rng = Lcg::default();
        assert_eq!(
            place_food(&mut rng, &snake, 2, 2, 0),
            Err(GameError::NoSpace { cols: 2, rows: 2 })
        );
    }
}
