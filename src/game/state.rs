use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
///
/// Never empty: every constructor places at least the head.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a new snake laid out behind `head`, facing `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body }
    }

    /// Build a snake from explicit cells, head first. `None` if `cells` is empty.
    pub fn from_cells(cells: Vec<Position>) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        Some(Self { body: cells })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if any segment, head and tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend `new_head`, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }
}

/// Movement direction applied this tick plus the one queued for the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steering {
    current: Direction,
    pending: Direction,
}

impl Steering {
    pub fn new(direction: Direction) -> Self {
        Self {
            current: direction,
            pending: direction,
        }
    }

    pub fn current(&self) -> Direction {
        self.current
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Queue a direction for the next tick
    ///
    /// A request opposite to the current direction is dropped and `false`
    /// is returned. Later requests overwrite earlier ones.
    pub fn request(&mut self, direction: Direction) -> bool {
        if self.current.is_opposite(direction) {
            return false;
        }
        self.pending = direction;
        true
    }

    /// Promote the pending direction and return it
    pub fn apply(&mut self) -> Direction {
        self.current = self.pending;
        self.current
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Entities of one game: rebuilt on every new game, frozen while paused or over
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub steering: Steering,
    pub food: Option<Position>,
    pub score: u32,
    pub steps: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, direction: Direction, food: Option<Position>) -> Self {
        Self {
            snake,
            steering: Steering::new(direction),
            food,
            score: 0,
            steps: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 9), Direction::Right, 3);
        assert_eq!(snake.body.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 9));
        assert_eq!(snake.body[1], Position::new(4, 9));
        assert_eq!(snake.body.last().copied(), Some(Position::new(3, 9)));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.body.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.body.last().copied(), Some(Position::new(4, 5)));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.body.len(), 4);
        assert_eq!(snake.body.last().copied(), Some(Position::new(4, 5)));
    }

    #[test]
    fn test_occupies_includes_head_and_tail() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_steering_rejects_reversal() {
        let mut steering = Steering::new(Direction::Right);

        assert!(!steering.request(Direction::Left));
        assert_eq!(steering.pending(), Direction::Right);

        assert!(steering.request(Direction::Up));
        assert_eq!(steering.pending(), Direction::Up);

        // Still compared against the applied direction, not the queued one
        assert!(!steering.request(Direction::Left));
        assert_eq!(steering.pending(), Direction::Up);
        assert!(steering.request(Direction::Down));
        assert_eq!(steering.pending(), Direction::Down);

        assert_eq!(steering.apply(), Direction::Down);
        assert_eq!(steering.current(), Direction::Down);
    }
}
