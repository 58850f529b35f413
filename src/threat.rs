// Move legality and head-to-head threat classification
//
// Legality here is purely physical: bounds and occupied tiles. Two heads
// arriving on the same tile in the same turn is a separate event, handled by
// `detect_head_to_head`, because both snakes commit simultaneously.

use log::debug;

use crate::types::{Battlesnake, Board, Coord, Direction};

/// Squared distances from which two heads can meet on one tile next turn
const DIAGONAL_DISTANCE_SQUARED: i32 = 2;
const AXIS_DISTANCE_SQUARED: i32 = 4;

/// False if the destination is out of bounds or covered by any snake
pub fn is_legal(board: &Board, head: &Coord, direction: Direction) -> bool {
    !board.is_blocked(&direction.apply(head))
}

/// All legal directions from `head`, in priority order
pub fn legal_moves(board: &Board, head: &Coord) -> Vec<Direction> {
    Direction::all()
        .iter()
        .copied()
        .filter(|&dir| is_legal(board, head, dir))
        .collect()
}

/// First legal direction whose destination holds food
pub fn adjacent_food(board: &Board, head: &Coord) -> Option<Direction> {
    Direction::all()
        .iter()
        .copied()
        .find(|&dir| board.is_food(&dir.apply(head)) && is_legal(board, head, dir))
}

/// First opposing head from which a head-to-head can happen next turn
///
/// Only one candidate is ever considered, even when several heads qualify.
pub fn head_to_head_candidate<'a>(
    you: &Battlesnake,
    board: &'a Board,
) -> Option<&'a Battlesnake> {
    let us = you.head;
    board
        .snakes
        .iter()
        .filter(|s| s.id != you.id && s.is_alive())
        .find(|s| match us.distance_squared(&s.head) {
            DIAGONAL_DISTANCE_SQUARED => true,
            AXIS_DISTANCE_SQUARED => {
                let between = Coord {
                    x: (us.x + s.head.x) / 2,
                    y: (us.y + s.head.y) / 2,
                };
                !board.is_blocked(&between)
            }
            _ => false,
        })
}

/// Attack or evade an imminent head-to-head, or `None` if there is nothing to decide
pub fn detect_head_to_head(you: &Battlesnake, board: &Board) -> Option<Direction> {
    let enemy = head_to_head_candidate(you, board)?;
    let enemy_reach = enemy.head.neighbors();
    let head = you.head;

    if you.length > enemy.length {
        debug!("Head-to-head with {}: we are longer, attacking", enemy.id);
        if let Some(dir) = adjacent_food(board, &head) {
            return Some(dir);
        }
        return Direction::all()
            .iter()
            .copied()
            .find(|&dir| is_legal(board, &head, dir) && enemy_reach.contains(&dir.apply(&head)));
    }

    if you.length == enemy.length {
        debug!("Head-to-head with {}: equal length", enemy.id);
        if let Some(dir) = adjacent_food(board, &head) {
            return Some(dir);
        }
    } else {
        debug!("Head-to-head with {}: we are shorter, evading", enemy.id);
    }

    Direction::all()
        .iter()
        .copied()
        .find(|&dir| is_legal(board, &head, dir) && !enemy_reach.contains(&dir.apply(&head)))
}
