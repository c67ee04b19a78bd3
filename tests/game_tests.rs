//! Tests for the snake simulation core
//!
//! Test categories:
//! - Geometry and bounds
//! - Validity checking
//! - Movement, growth and anti-reversal
//! - Food placement
//! - Initial layout
//! - Session configuration

use rand::Rng;
use snake::config::{SessionConfig, DEFAULT_INITIAL_LENGTH, FLASH_FRAMES, MAX_BOARD_SIDE, MIN_BOARD_SIDE};
use snake::food::place_food;
use snake::game::test_helpers::*;
use snake::geometry::{step, Board, Cell, Direction};
use snake::init::{init_snake, TURN_CYCLE};
use snake::movement::{advance, resolve_direction, step_snake};
use snake::validity::is_valid;
use snake::{ConfigError, Error};

const BOARD: Board = Board::new(10, 10);

fn cells(pairs: &[(i32, i32)]) -> Vec<Cell> {
    pairs.iter().copied().map(Cell::from).collect()
}

// ============================================================================
// Geometry Tests
// ============================================================================

mod geometry {
    use super::*;

    #[test]
    fn step_moves_one_cell() {
        let origin = Cell::new(5, 5);

        assert_eq!(step(Direction::Up, origin), Cell::new(4, 5));
        assert_eq!(step(Direction::Down, origin), Cell::new(6, 5));
        assert_eq!(step(Direction::Left, origin), Cell::new(5, 4));
        assert_eq!(step(Direction::Right, origin), Cell::new(5, 6));
    }

    #[test]
    fn step_leaves_the_board_without_complaint() {
        assert_eq!(step(Direction::Up, Cell::new(0, 0)), Cell::new(-1, 0));
        assert_eq!(step(Direction::Left, Cell::new(0, 0)), Cell::new(0, -1));
    }

    #[test]
    fn opposite_undoes_a_step() {
        let origin = Cell::new(3, 7);
        for direction in Direction::ALL {
            assert_eq!(step(direction.opposite(), step(direction, origin)), origin);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn board_contains_only_cells_in_range() {
        assert!(BOARD.contains(Cell::new(0, 0)));
        assert!(BOARD.contains(Cell::new(9, 9)));
        assert!(!BOARD.contains(Cell::new(10, 0)));
        assert!(!BOARD.contains(Cell::new(0, 10)));
        assert!(!BOARD.contains(Cell::new(-1, 5)));
        assert_eq!(BOARD.area(), 100);
    }
}

// ============================================================================
// Validity Tests
// ============================================================================

mod validity {
    use super::*;

    #[test]
    fn snake_inside_board_is_valid() {
        assert!(is_valid(&snake(&[(5, 5), (5, 4), (5, 3)]), BOARD));
        assert!(is_valid(&snake(&[(0, 0)]), BOARD));
        assert!(is_valid(&snake(&[(9, 9), (9, 8)]), BOARD));
    }

    #[test]
    fn head_past_any_wall_is_invalid() {
        assert!(!is_valid(&snake(&[(-1, 0), (0, 0)]), BOARD));
        assert!(!is_valid(&snake(&[(10, 3), (9, 3)]), BOARD));
        assert!(!is_valid(&snake(&[(4, -1), (4, 0)]), BOARD));
        assert!(!is_valid(&snake(&[(4, 10), (4, 9)]), BOARD));
    }

    #[test]
    fn head_on_own_body_is_invalid() {
        let looped = snake(&[(4, 4), (4, 5), (5, 5), (5, 4), (4, 4)]);
        assert!(!is_valid(&looped, BOARD));
    }

    #[test]
    fn only_the_head_is_checked() {
        // Overlap further down the body is not the head's problem.
        assert!(is_valid(&snake(&[(1, 1), (2, 2), (2, 2)]), BOARD));
    }
}

// ============================================================================
// Movement Tests
// ============================================================================

mod movement {
    use super::*;

    #[test]
    fn eating_keeps_the_tail() {
        let start = snake(&[(5, 5), (5, 4), (5, 3)]);
        let mut rng = seeded_rng(1);

        let (advanced, food) = step_snake(Direction::Right, &start, Cell::new(5, 6), BOARD, &mut rng).unwrap();

        assert!(advanced.ate_food);
        assert_eq!(advanced.snake.cells(), cells(&[(5, 6), (5, 5), (5, 4), (5, 3)]).as_slice());
        assert!(BOARD.contains(food));
        assert!(!advanced.snake.contains(food));
    }

    #[test]
    fn plain_move_drops_the_tail() {
        let start = snake(&[(5, 5), (5, 4), (5, 3)]);
        let food = Cell::new(0, 0);
        let mut rng = seeded_rng(1);

        let (advanced, next_food) = step_snake(Direction::Right, &start, food, BOARD, &mut rng).unwrap();

        assert!(!advanced.ate_food);
        assert_eq!(advanced.snake.cells(), cells(&[(5, 6), (5, 5), (5, 4)]).as_slice());
        assert_eq!(next_food, food);
    }

    #[test]
    fn turning_moves_the_head_sideways() {
        let start = snake(&[(5, 5), (5, 4), (5, 3)]);

        let advanced = advance(Direction::Down, &start, Cell::new(0, 0));

        assert_eq!(advanced.direction, Direction::Down);
        assert_eq!(advanced.snake.head(), Cell::new(6, 5));
        assert_eq!(advanced.snake.tail(), Cell::new(5, 4));
    }

    #[test]
    fn reversal_continues_forward() {
        let start = snake(&[(5, 5), (5, 4), (5, 3)]);
        let mut rng = seeded_rng(1);

        assert_eq!(resolve_direction(Direction::Left, &start), Direction::Right);

        let (advanced, food) = step_snake(Direction::Left, &start, Cell::new(5, 6), BOARD, &mut rng).unwrap();

        assert_eq!(advanced.direction, Direction::Right);
        assert_eq!(advanced.snake.head(), Cell::new(5, 6));
        assert_eq!(advanced.snake.len(), 4);
        assert!(!advanced.snake.contains(food));
    }

    #[test]
    fn reversal_is_corrected_in_every_direction() {
        let head = Cell::new(5, 5);
        for travel in Direction::ALL {
            let behind = step(travel.opposite(), head);
            let start = snake(&[(head.row, head.col), (behind.row, behind.col)]);

            let advanced = advance(travel.opposite(), &start, Cell::new(0, 0));

            assert_eq!(advanced.direction, travel);
            assert_eq!(advanced.snake.head(), step(travel, head));
        }
    }

    #[test]
    fn single_segment_snake_can_turn_around() {
        let start = snake(&[(5, 5)]);

        let advanced = advance(Direction::Left, &start, Cell::new(0, 0));

        assert_eq!(advanced.direction, Direction::Left);
        assert_eq!(advanced.snake.cells(), cells(&[(5, 4)]).as_slice());
    }

    #[test]
    fn deeper_segments_are_not_predicted() {
        // Turning up runs into the fourth segment; only the second is guarded.
        let start = snake(&[(5, 5), (5, 4), (4, 4), (4, 5), (4, 6)]);

        let advanced = advance(Direction::Up, &start, Cell::new(0, 0));

        assert_eq!(advanced.direction, Direction::Up);
        assert_eq!(advanced.snake.head(), Cell::new(4, 5));
        assert!(!is_valid(&advanced.snake, BOARD));
    }

    #[test]
    fn moving_into_the_wall_is_left_to_the_validity_check() {
        let start = snake(&[(0, 0), (0, 1)]);

        let advanced = advance(Direction::Up, &start, Cell::new(5, 5));

        assert_eq!(advanced.snake.head(), Cell::new(-1, 0));
        assert!(!is_valid(&advanced.snake, BOARD));
    }

    #[test]
    fn length_grows_by_one_only_when_eating() {
        let board = Board::new(20, 20);
        let mut rng = seeded_rng(42);
        let mut current = snake(&[(10, 10), (10, 9), (10, 8)]);
        let mut food = place_food(&current, board, &mut rng).unwrap();

        for _ in 0..500 {
            let requested = Direction::ALL[rng.gen_range(0..4)];
            let (advanced, next_food) = step_snake(requested, &current, food, board, &mut rng).unwrap();

            let ate = advanced.snake.head() == food;
            assert_eq!(advanced.ate_food, ate);
            if ate {
                assert_eq!(advanced.snake.len(), current.len() + 1);
                assert!(!advanced.snake.contains(next_food));
            } else {
                assert_eq!(advanced.snake.len(), current.len());
                assert_eq!(next_food, food);
            }

            if !is_valid(&advanced.snake, board) {
                break;
            }
            current = advanced.snake;
            food = next_food;
        }
    }
}

// ============================================================================
// Food Placement Tests
// ============================================================================

mod food_placement {
    use super::*;

    #[test]
    fn food_lands_on_a_free_cell() {
        let board = Board::new(8, 8);
        // Everything but the last row is occupied.
        let body: Vec<(i32, i32)> = (0..7)
            .flat_map(|row| {
                let cols: Vec<i32> = if row % 2 == 0 { (0..8).collect() } else { (0..8).rev().collect() };
                cols.into_iter().map(move |col| (row, col))
            })
            .collect();
        let occupied = snake(&body);
        let mut rng = seeded_rng(3);

        for _ in 0..200 {
            let food = place_food(&occupied, board, &mut rng).unwrap();
            assert_eq!(food.row, 7);
            assert!(board.contains(food));
            assert!(!occupied.contains(food));
        }
    }

    #[test]
    fn food_covers_the_whole_board_over_time() {
        let board = Board::new(8, 8);
        let occupied = snake(&[(0, 0)]);
        let mut rng = seeded_rng(11);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..5000 {
            seen.insert(place_food(&occupied, board, &mut rng).unwrap());
        }

        assert_eq!(seen.len(), board.area() - 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no free cell")]
    fn full_board_trips_the_debug_assertion() {
        let board = Board::new(1, 2);
        let occupied = snake(&[(0, 0), (0, 1)]);
        let _ = place_food(&occupied, board, &mut seeded_rng(0));
    }
}

// ============================================================================
// Initial Layout Tests
// ============================================================================

mod initial_layout {
    use super::*;

    fn assert_well_formed(body: &[Cell], board: Board) {
        for (i, cell) in body.iter().enumerate() {
            assert!(board.contains(*cell), "cell {:?} is off the board", cell);
            assert!(!body[i + 1..].contains(cell), "cell {:?} appears twice", cell);
        }
        for pair in body.windows(2) {
            let distance = (pair[0].row - pair[1].row).abs() + (pair[0].col - pair[1].col).abs();
            assert_eq!(distance, 1, "{:?} and {:?} are not adjacent", pair[0], pair[1]);
        }
    }

    #[test]
    fn produces_exact_length_within_bounds() {
        let board = Board::new(45, 40);
        for seed in 0..200 {
            let (snake, direction) = init_snake(board, DEFAULT_INITIAL_LENGTH, &mut seeded_rng(seed)).unwrap();

            assert_eq!(snake.len(), DEFAULT_INITIAL_LENGTH);
            assert_well_formed(snake.cells(), board);
            assert!(TURN_CYCLE.contains(&direction));
        }
    }

    #[test]
    fn long_snakes_on_small_boards_stay_well_formed() {
        let board = Board::new(12, 12);
        for seed in 0..200 {
            let (snake, _) = init_snake(board, 25, &mut seeded_rng(seed)).unwrap();

            assert_eq!(snake.len(), 25);
            assert_well_formed(snake.cells(), board);
        }
    }

    #[test]
    fn start_cell_keeps_its_margin() {
        let board = Board::new(20, 30);
        for seed in 0..100 {
            let (snake, direction) = init_snake(board, 1, &mut seeded_rng(seed)).unwrap();
            let start = snake.head();

            assert_eq!(direction, Direction::Right);
            assert!((2..board.height / 2 + 2).contains(&start.row));
            assert!((2..board.width / 2 + 2).contains(&start.col));
        }
    }

    #[test]
    fn head_faces_the_returned_direction() {
        let board = Board::new(30, 30);
        for seed in 0..100 {
            let (snake, direction) = init_snake(board, 10, &mut seeded_rng(seed)).unwrap();

            // The returned direction never points back into the body.
            assert_ne!(Some(step(direction, snake.head())), snake.second());
        }
    }

    #[test]
    fn returned_direction_leads_onto_a_free_cell() {
        for (board, length) in [(Board::new(8, 8), 20), (Board::new(10, 10), 20), (Board::new(12, 12), 25)] {
            for seed in 0..200 {
                let (snake, direction) = init_snake(board, length, &mut seeded_rng(seed)).unwrap();
                let next = step(direction, snake.head());

                assert!(board.contains(next), "seed {} faces the wall at {:?}", seed, next);
                assert!(!snake.contains(next), "seed {} faces its own body at {:?}", seed, next);
            }
        }
    }

    #[test]
    fn rejects_zero_length() {
        let err = init_snake(Board::new(20, 20), 0, &mut seeded_rng(0)).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ZeroLength)));
    }

    #[test]
    fn rejects_tiny_board() {
        let err = init_snake(Board::new(MIN_BOARD_SIDE - 1, 20), 3, &mut seeded_rng(0)).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::BoardTooSmall { .. })));
    }

    #[test]
    fn rejects_length_larger_than_board() {
        let err = init_snake(Board::new(8, 8), 65, &mut seeded_rng(0)).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::LengthExceedsBoard { length: 65, area: 64 })
        ));
    }

    #[test]
    fn filling_the_whole_board_stalls() {
        let err = init_snake(Board::new(8, 8), 64, &mut seeded_rng(0)).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InitializerStalled { length: 64, .. })
        ));
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

mod configuration {
    use super::*;
    use std::time::Duration;

    #[test]
    fn terminal_size_maps_to_double_width_cells() {
        let config = SessionConfig::for_terminal(83, 48);

        assert_eq!(config.board, Board::new(45, 40));
        assert_eq!(config.initial_length, DEFAULT_INITIAL_LENGTH);
        assert_eq!(config.tick, Duration::from_millis(50));
        assert_eq!(config.flash_frames, FLASH_FRAMES);
        assert_eq!(config.flash_delay, Duration::from_millis(400));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn tiny_terminal_is_rejected() {
        let config = SessionConfig::for_terminal(10, 5);

        assert!(matches!(config.validate(), Err(ConfigError::BoardTooSmall { .. })));
    }

    #[test]
    fn bad_lengths_are_rejected() {
        let mut config = SessionConfig::new(Board::new(10, 10));

        config.initial_length = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroLength));

        config.initial_length = 101;
        assert_eq!(
            config.validate(),
            Err(ConfigError::LengthExceedsBoard { length: 101, area: 100 })
        );
    }

    #[test]
    fn huge_boards_are_rejected() {
        let config = SessionConfig::new(Board::new(10, 40000));
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooLarge {
                height: 10,
                width: 40000,
                max: MAX_BOARD_SIDE,
            })
        );

        let largest = SessionConfig::new(Board::new(MAX_BOARD_SIDE, MAX_BOARD_SIDE));
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn zero_tick_is_rejected() {
        let mut config = SessionConfig::new(Board::new(10, 10));
        config.tick = Duration::ZERO;

        assert_eq!(config.validate(), Err(ConfigError::ZeroTickPeriod));
    }
}
