//! The snake state machine
//!
//! The body lives in a buffer preallocated to the whole grid (the snake can
//! never be longer than the number of cells) plus an explicit logical
//! length. Index 0 is the head. Each tick shifts every segment onto its
//! predecessor, tail first, and then moves the head one cell.

use log::debug;

use crate::error::GameError;
use crate::point::{Direction, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeState {
    /// No move made yet. Stacked start segments do not count as a collision.
    Idle,
    Moving,
    Collided,
}

#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Point>,
    len: usize,
    cols: u32,
    rows: u32,
    direction: Direction,
    pending: Direction,
    state: SnakeState,
    just_grew: bool,
    vacated: Option<Point>,
}

impl Snake {
    /// A snake of `len` segments, all stacked on `start`
    pub fn new(start: Point, len: usize, cols: u32, rows: u32) -> Result<Self, GameError> {
        if cols == 0 || rows == 0 {
            return Err(GameError::config(format!("grid {cols}x{rows} has no cells")));
        }
        let capacity = cols as usize * rows as usize;
        if len == 0 || len > capacity {
            return Err(GameError::config(format!(
                "snake length {len} must be between 1 and {capacity}"
            )));
        }
        if start.x >= cols || start.y >= rows {
            return Err(GameError::config(format!(
                "start cell ({}, {}) outside {cols}x{rows} grid",
                start.x, start.y
            )));
        }
        Ok(Self {
            body: vec![start; capacity],
            len,
            cols,
            rows,
            direction: Direction::None,
            pending: Direction::None,
            state: SnakeState::Idle,
            just_grew: false,
            vacated: None,
        })
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn tail(&self) -> Point {
        self.body[self.len - 1]
    }

    pub fn segments(&self) -> &[Point] {
        &self.body[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.body.len()
    }

    pub fn is_full(&self) -> bool {
        self.len == self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn state(&self) -> SnakeState {
        self.state
    }

    /// The cell the tail left on the last advance, if it has to be erased.
    /// `None` after the snake has just eaten, since the tail stayed put.
    pub fn vacated(&self) -> Option<Point> {
        self.vacated
    }

    pub fn contains(&self, point: Point) -> bool {
        self.segments().contains(&point)
    }

    /// Queue a direction for the next tick. A 180 degree turn against the
    /// active direction is dropped, it would run the head into the neck.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if direction == Direction::None || direction.is_opposite(self.direction) {
            return;
        }
        self.pending = direction;
    }

    /// Make the pending direction the active one and return it
    pub fn resolve_direction(&mut self) -> Direction {
        if self.pending != Direction::None && self.pending != self.direction {
            debug!("Snake turns {:?} -> {:?}", self.direction, self.pending);
            self.direction = self.pending;
        }
        self.direction
    }

    /// Move one cell in `direction`. Returns the new head.
    ///
    /// The first move out of `Idle` never collides: on a grid one cell wide
    /// it can wrap the head straight back onto the stacked start.
    pub fn advance(&mut self, direction: Direction) -> Point {
        if direction == Direction::None || self.state == SnakeState::Collided {
            self.vacated = None;
            return self.head();
        }
        let first_move = self.state == SnakeState::Idle;
        self.direction = direction;
        self.vacated = if self.just_grew {
            None
        } else {
            Some(self.tail())
        };
        self.just_grew = false;

        for i in (1..self.len).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = self.body[0].step(direction, self.cols, self.rows);

        self.state = SnakeState::Moving;
        if !first_move && self.check_self_collision() {
            debug!("Snake head ran into its body at {:?}", self.head());
            self.state = SnakeState::Collided;
        }
        self.head()
    }

    /// Resolve the pending direction and advance in it
    pub fn step(&mut self) -> Point {
        let direction = self.resolve_direction();
        self.advance(direction)
    }

    /// True when the head shares a cell with any other segment. Never true
    /// before the first move. Right after [`grow`](Self::grow) the new tail
    /// slot duplicates the old tail and is skipped.
    pub fn check_self_collision(&self) -> bool {
        if self.state == SnakeState::Idle {
            return false;
        }
        let end = if self.just_grew { self.len - 1 } else { self.len };
        let head = self.head();
        self.body[1..end.max(1)].contains(&head)
    }

    pub fn check_ate_food(&self, food: Point) -> bool {
        self.head() == food
    }

    /// Add one segment. The new tail slot starts as a copy of the current
    /// tail, so the body never holds a stale cell; the next advance leaves
    /// it in place while the rest moves on.
    pub fn grow(&mut self) {
        if self.is_full() {
            return;
        }
        self.body[self.len] = self.body[self.len - 1];
        self.len += 1;
        self.just_grew = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snake_at(x: u32, y: u32, len: usize) -> Snake {
        Snake::new(Point::new(x, y), len, 10, 8).unwrap()
    }

    #[test]
    fn test_new_validates() {
        assert!(Snake::new(Point::new(0, 0), 0, 3, 3).is_err());
        assert!(Snake::new(Point::new(0, 0), 10, 3, 3).is_err());
        assert!(Snake::new(Point::new(3, 0), 1, 3, 3).is_err());
        let snake = Snake::new(Point::new(1, 1), 9, 3, 3).unwrap();
        assert_eq!(snake.capacity(), 9);
        assert!(snake.is_full());
    }

    #[test]
    fn test_idle_until_a_direction_is_given() {
        let mut snake = snake_at(4, 4, 3);
        assert_eq!(snake.step(), Point::new(4, 4));
        assert_eq!(snake.state(), SnakeState::Idle);
        assert!(!snake.check_self_collision());
        assert_eq!(snake.vacated(), None);
    }

    #[test]
    fn test_advance_shifts_body() {
        let mut snake = snake_at(2, 2, 3);
        snake.advance(Direction::Right);
        snake.advance(Direction::Right);
        snake.advance(Direction::Down);
        assert_eq!(
            snake.segments(),
            &[Point::new(4, 3), Point::new(4, 2), Point::new(3, 2)]
        );
        assert_eq!(snake.vacated(), Some(Point::new(2, 2)));
    }

    #[test]
    fn test_wraps_around_edges() {
        let mut snake = snake_at(0, 5, 1);
        assert_eq!(snake.advance(Direction::Left), Point::new(9, 5));
        assert_eq!(snake.advance(Direction::Right), Point::new(0, 5));

        let mut snake = snake_at(3, 0, 1);
        assert_eq!(snake.advance(Direction::Up), Point::new(3, 7));
        assert_eq!(snake.advance(Direction::Down), Point::new(3, 0));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut snake = snake_at(5, 5, 2);
        snake.set_pending_direction(Direction::Right);
        snake.step();
        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), Direction::Right);
        assert_eq!(snake.step(), Point::new(7, 5));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_last_accepted_direction_wins() {
        let mut snake = snake_at(5, 5, 1);
        snake.set_pending_direction(Direction::Right);
        snake.step();
        snake.set_pending_direction(Direction::Up);
        snake.set_pending_direction(Direction::Down);
        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.step(), Point::new(6, 6));
    }

    #[test]
    fn test_self_collision() {
        // a square turn with five segments bites the body
        let mut snake = snake_at(5, 5, 5);
        for direction in [Direction::Right, Direction::Right, Direction::Right, Direction::Right] {
            snake.advance(direction);
        }
        snake.advance(Direction::Down);
        snake.advance(Direction::Left);
        assert_eq!(snake.state(), SnakeState::Moving);
        snake.advance(Direction::Up);
        assert!(snake.check_self_collision());
        assert_eq!(snake.state(), SnakeState::Collided);

        // nothing moves once collided
        let head = snake.head();
        assert_eq!(snake.advance(Direction::Up), head);
    }

    #[test]
    fn test_length_one_never_collides() {
        let mut snake = snake_at(0, 0, 1);
        for _ in 0..25 {
            snake.advance(Direction::Right);
            assert!(!snake.check_self_collision());
        }
    }

    #[test]
    fn test_first_move_from_stacked_start_is_safe() {
        let mut snake = snake_at(0, 0, 4);
        assert!(!snake.check_self_collision());
        snake.advance(Direction::Down);
        assert!(!snake.check_self_collision());
        assert_eq!(snake.state(), SnakeState::Moving);
    }

    #[test]
    fn test_first_move_wrapping_onto_stack_is_safe() {
        let mut snake = Snake::new(Point::new(0, 0), 3, 10, 1).unwrap();
        assert_eq!(snake.advance(Direction::Up), Point::new(0, 0));
        assert_eq!(snake.state(), SnakeState::Moving);

        // only the first move is exempt
        snake.advance(Direction::Up);
        assert_eq!(snake.state(), SnakeState::Collided);
    }

    #[test]
    fn test_grown_tail_is_not_a_collision() {
        let mut snake = snake_at(3, 3, 1);
        snake.advance(Direction::Right);
        snake.grow();
        assert_eq!(snake.segments(), &[Point::new(4, 3), Point::new(4, 3)]);
        assert!(!snake.check_self_collision());

        snake.advance(Direction::Right);
        assert_eq!(snake.segments(), &[Point::new(5, 3), Point::new(4, 3)]);
        assert!(!snake.check_self_collision());
    }

    #[test]
    fn test_grow_keeps_tail_in_place() {
        let mut snake = snake_at(1, 1, 2);
        snake.advance(Direction::Right);
        assert_eq!(snake.segments(), &[Point::new(2, 1), Point::new(1, 1)]);

        snake.grow();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Point::new(1, 1));

        snake.advance(Direction::Right);
        assert_eq!(snake.vacated(), None);
        assert_eq!(
            snake.segments(),
            &[Point::new(3, 1), Point::new(2, 1), Point::new(1, 1)]
        );

        snake.advance(Direction::Right);
        assert_eq!(snake.vacated(), Some(Point::new(1, 1)));
    }

    #[test]
    fn test_grow_stops_at_capacity() {
        let mut snake = Snake::new(Point::new(0, 0), 3, 2, 2).unwrap();
        snake.grow();
        snake.grow();
        assert_eq!(snake.len(), 4);
        assert!(snake.is_full());
    }

    #[test]
    fn test_ate_food() {
        let mut snake = snake_at(1, 1, 1);
        snake.advance(Direction::Right);
        assert!(snake.check_ate_food(Point::new(2, 1)));
        assert!(!snake.check_ate_food(Point::new(1, 1)));
    }
}
