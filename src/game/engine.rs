use rand::{SeedableRng, rngs::StdRng};

use super::{
    action::Direction,
    config::GameConfig,
    food::place_food,
    grid::Grid,
    state::{CollisionType, GameState, Position, Snake},
};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred; the game is over when set
    pub collision_type: Option<CollisionType>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let grid = config.grid();
        Self { config, grid, rng }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the entities of a fresh game
    ///
    /// The snake is shortened and shifted as needed so every segment starts
    /// on the grid.
    pub fn new_game(&mut self) -> GameState {
        let width = self.grid.width().max(1);
        let length = self.config.initial_snake_length.clamp(1, width);
        let head_x = self.config.start_column.max(length - 1).min(width - 1) as i32;
        let head_y = (self.grid.height() / 2) as i32;

        let snake = Snake::new(Position::new(head_x, head_y), Direction::Right, length);
        let food = place_food(&self.grid, &snake, &mut self.rng);

        GameState::new(snake, Direction::Right, food)
    }

    /// Execute one tick of the game
    ///
    /// On a collision the snake is left untouched.
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        let direction = state.steering.apply();
        let new_head = state.snake.head().moved_in_direction(direction);

        if let Some(collision_type) = self.check_collision(state, new_head) {
            return StepResult {
                ate_food: false,
                collision_type: Some(collision_type),
            };
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);

        if ate_food {
            state.score += self.config.food_reward;
            state.food = place_food(&self.grid, &state.snake, &mut self.rng);
        }

        state.steps += 1;

        StepResult {
            ate_food,
            collision_type: None,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !self.grid.contains(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
