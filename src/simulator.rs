// Board state transition for a single snake's move
//
// Neither entry point touches its input; both clone the board and return the
// successor. Moves are applied one snake at a time, so a simultaneous turn is
// an opening move followed by replies. A snake opening the round runs into the
// other heads where they stand now; a reply meets heads that have already
// moved, which is where head-to-head collisions resolve. Identical inputs
// always produce identical boards.

use crate::config::Config;
use crate::types::{Board, Coord, Direction};

/// Moves `snake_id` first in its round; other heads still count as body
///
/// Order: shift body, health decay, hazard damage, collision or dead end,
/// then food. An unknown or dead snake yields an unchanged copy.
pub fn apply_move(
    board: &Board,
    snake_id: &str,
    direction: Direction,
    config: &Config,
) -> Board {
    step(board, snake_id, direction, config, false)
}

/// Moves `snake_id` after every other snake has moved this round
///
/// Same order as `apply_move`, with a head-to-head against a head already on
/// the destination resolved by length before food.
pub fn apply_reply(
    board: &Board,
    snake_id: &str,
    direction: Direction,
    config: &Config,
) -> Board {
    step(board, snake_id, direction, config, true)
}

fn step(
    board: &Board,
    snake_id: &str,
    direction: Direction,
    config: &Config,
    others_moved: bool,
) -> Board {
    let mut next = board.clone();
    let idx = match next.snakes.iter().position(|s| s.id == snake_id && s.is_alive()) {
        Some(idx) => idx,
        None => return next,
    };

    let dest = direction.apply(&board.snakes[idx].head);
    let collided = !board.in_bounds(&dest) || hits_body(board, snake_id, &dest, others_moved);

    {
        let snake = &mut next.snakes[idx];
        snake.body.insert(0, dest);
        snake.body.truncate(snake.length.max(1) as usize);
        snake.head = dest;
        snake.health -= config.game_rules.health_loss_per_turn;
        if board.is_hazard(&dest) {
            snake.health -= config.hazard.damage_per_turn;
        }
    }

    if collided || !has_exit(&next, &dest) {
        next.snakes[idx].health = 0;
        return next;
    }

    if others_moved {
        let mover_length = next.snakes[idx].length;
        for other in 0..next.snakes.len() {
            let rival = &next.snakes[other];
            if other == idx || !rival.is_alive() || rival.head != dest {
                continue;
            }
            let other_length = next.snakes[other].length;
            if mover_length > other_length {
                next.snakes[other].health = 0;
            } else {
                next.snakes[idx].health = 0;
                if mover_length == other_length {
                    next.snakes[other].health = 0;
                }
                return next;
            }
        }
    }

    if let Some(food_idx) = next.food.iter().position(|f| *f == dest) {
        next.food.remove(food_idx);
        let snake = &mut next.snakes[idx];
        snake.health = config.game_rules.health_max;
        snake.length += 1;
        if let Some(tail) = snake.body.last().copied() {
            snake.body.push(tail);
        }
    }

    if next.snakes[idx].health < 0 {
        next.snakes[idx].health = 0;
    }

    next
}

/// Our whole pre-move body, or another snake's body
///
/// Another snake's head only stops counting once that snake has moved this
/// round, since it then sits on a tile both heads can contest.
fn hits_body(board: &Board, snake_id: &str, dest: &Coord, others_moved: bool) -> bool {
    board.snakes.iter().filter(|s| s.is_alive()).any(|s| {
        let skip = if s.id != snake_id && others_moved { 1 } else { 0 };
        s.body.iter().skip(skip).any(|c| c == dest)
    })
}

fn has_exit(board: &Board, head: &Coord) -> bool {
    head.neighbors().iter().any(|n| !board.is_blocked(n))
}
