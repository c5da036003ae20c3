/// A grid cell: `x` is the column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// One step in `direction` on a `cols x rows` torus: leaving an edge
    /// re-enters on the opposite one.
    pub fn step(self, direction: Direction, cols: u32, rows: u32) -> Point {
        let Point { x, y } = self;
        match direction {
            Direction::Up => Point::new(x, if y == 0 { rows - 1 } else { y - 1 }),
            Direction::Down => Point::new(x, if y + 1 >= rows { 0 } else { y + 1 }),
            Direction::Left => Point::new(if x == 0 { cols - 1 } else { x - 1 }, y),
            Direction::Right => Point::new(if x + 1 >= cols { 0 } else { x + 1 }, y),
            Direction::None => self,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    /// True for the four 180 degree pairs; `None` is opposite to nothing
    pub fn is_opposite(self, other: Direction) -> bool {
        self != Direction::None && self.opposite() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wraps_horizontally() {
        assert_eq!(Point::new(0, 3).step(Direction::Left, 10, 5), Point::new(9, 3));
        assert_eq!(Point::new(9, 3).step(Direction::Right, 10, 5), Point::new(0, 3));
    }

    #[test]
    fn test_step_wraps_vertically() {
        assert_eq!(Point::new(4, 0).step(Direction::Up, 10, 5), Point::new(4, 4));
        assert_eq!(Point::new(4, 4).step(Direction::Down, 10, 5), Point::new(4, 0));
    }

    #[test]
    fn test_step_inside() {
        let p = Point::new(2, 2);
        assert_eq!(p.step(Direction::Up, 5, 5), Point::new(2, 1));
        assert_eq!(p.step(Direction::Down, 5, 5), Point::new(2, 3));
        assert_eq!(p.step(Direction::Left, 5, 5), Point::new(1, 2));
        assert_eq!(p.step(Direction::Right, 5, 5), Point::new(3, 2));
        assert_eq!(p.step(Direction::None, 5, 5), p);
    }

    #[test]
    fn test_single_cell_axis_wraps_onto_itself() {
        assert_eq!(Point::new(0, 0).step(Direction::Right, 1, 1), Point::new(0, 0));
    }

    #[test]
    fn test_opposites() {
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::None.is_opposite(Direction::None));
        assert!(!Direction::Up.is_opposite(Direction::None));
    }
}
