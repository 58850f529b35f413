//! Board simulator and duel evaluation properties
//!
//! Checks the transition function through the public API the way the duel
//! solver uses it: one snake at a time, input boards never modified.

use ninemo_snake::config::Config;
use ninemo_snake::duel::{evaluate, minimax};
use ninemo_snake::floodfill::free_space_count;
use ninemo_snake::simulator::{apply_move, apply_reply};
use ninemo_snake::threat::is_legal;
use ninemo_snake::types::{Battlesnake, Board, Coord, Direction};

fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

fn two_snake_board() -> Board {
    Board {
        width: 11,
        height: 11,
        food: vec![Coord { x: 6, y: 6 }, Coord { x: 2, y: 9 }],
        snakes: vec![
            snake("a", 70, &[(5, 6), (5, 5), (5, 4), (5, 3)]),
            snake("b", 70, &[(8, 6), (9, 6), (10, 6)]),
        ],
        hazards: vec![Coord { x: 4, y: 6 }],
    }
}

#[test]
fn test_simulation_is_deterministic_and_pure() {
    let config = Config::default_hardcoded();
    let board = two_snake_board();
    let before = board.clone();

    for id in ["a", "b"].iter() {
        for dir in Direction::all().iter() {
            let first = apply_move(&board, id, *dir, &config);
            let second = apply_move(&board, id, *dir, &config);
            assert_eq!(first, second, "{} {:?}", id, dir);
        }
    }
    assert_eq!(board, before);
}

#[test]
fn test_eating_grows_resets_health_and_removes_food() {
    let config = Config::default_hardcoded();
    let board = two_snake_board();

    let next = apply_move(&board, "a", Direction::Right, &config);
    let a = next.snake("a").unwrap();

    assert_eq!(a.length, 5);
    assert_eq!(a.health, config.game_rules.health_max);
    assert_eq!(next.food, vec![Coord { x: 2, y: 9 }]);
    assert_eq!(a.body.len(), 5);
}

#[test]
fn test_hazard_move_costs_extra_health() {
    let config = Config::default_hardcoded();
    let board = two_snake_board();

    let next = apply_move(&board, "a", Direction::Left, &config);
    assert_eq!(next.snake("a").unwrap().health, 70 - 1 - 15);
}

#[test]
fn test_longer_snake_wins_simultaneous_collision() {
    let config = Config::default_hardcoded();
    let mut board = two_snake_board();
    board.food.clear();
    board.hazards.clear();

    // Both heads step onto (7,6)
    let after_a = apply_move(&board, "a", Direction::Right, &config);
    let after_a = apply_move(&after_a, "a", Direction::Right, &config);
    let board_b = apply_reply(&after_a, "b", Direction::Left, &config);

    assert_eq!(after_a.snake("a").unwrap().head, Coord { x: 7, y: 6 });
    assert_eq!(board_b.snake("b").unwrap().health, 0);
    assert_eq!(board_b.snake("a").unwrap().health, 68);
}

#[test]
fn test_evaluate_terminal_values() {
    let config = Config::default_hardcoded();
    let mut board = two_snake_board();

    board.snakes[0].health = 0;
    assert_eq!(evaluate(&board, "a", &config), -999);

    board.snakes[0].health = 70;
    board.snakes[1].health = 0;
    assert_eq!(evaluate(&board, "a", &config), 999);
    assert_eq!(minimax(&board, 4, true, "a", &config), 999);
}

#[test]
fn test_legality_agrees_with_occupancy_everywhere() {
    let board = two_snake_board();
    for x in -1..=board.width {
        for y in -1..=board.height {
            let head = Coord { x, y };
            for dir in Direction::all().iter() {
                let dest = dir.apply(&head);
                let expected = board.in_bounds(&dest) && !board.is_occupied(&dest);
                assert_eq!(is_legal(&board, &head, *dir), expected);
            }
        }
    }
}

#[test]
fn test_reachability_never_shrinks_with_horizon() {
    let board = two_snake_board();
    for origin in [Coord { x: 6, y: 5 }, Coord { x: 0, y: 0 }, Coord { x: 9, y: 7 }].iter() {
        let counts: Vec<usize> = (0..15).map(|d| free_space_count(&board, *origin, d)).collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{:?}", counts);
    }
}
