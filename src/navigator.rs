// Greedy navigation toward targets and space-maximizing fallback

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::Config;
use crate::floodfill::{free_space_count, is_trap};
use crate::threat::{adjacent_food, is_legal, legal_moves};
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Steps one tile toward `target` if an axis-aligned step is legal and not a trap
///
/// Candidates are tried horizontal first, then vertical: right, left, up, down,
/// each only when the offset to the target points that way.
pub fn move_toward(
    head: &Coord,
    target: &Coord,
    board: &Board,
    config: &Config,
) -> Option<Direction> {
    let dx = target.x - head.x;
    let dy = target.y - head.y;

    let candidates = [
        (dx > 0, Direction::Right),
        (dx < 0, Direction::Left),
        (dy > 0, Direction::Up),
        (dy < 0, Direction::Down),
    ];

    candidates
        .iter()
        .filter(|(wanted, _)| *wanted)
        .map(|(_, dir)| *dir)
        .find(|&dir| {
            is_legal(board, head, dir)
                && !is_trap(
                    board,
                    head,
                    dir,
                    config.search.flood_fill_horizon,
                    config.search.min_free_spaces,
                )
        })
}

/// Nearest food by squared distance, first listed wins ties
pub fn nearest_food(head: &Coord, board: &Board) -> Option<Coord> {
    board
        .food
        .iter()
        .min_by_key(|food| head.distance_squared(food))
        .copied()
}

/// Leaves a hazard when health is low
///
/// Only active while our head sits on a hazard tile and health is at or below
/// the configured threshold. Adjacent food is taken first; otherwise we head
/// for the nearest non-hazard tile within the scan window around the head.
pub fn handle_hazard(you: &Battlesnake, board: &Board, config: &Config) -> Option<Direction> {
    let head = you.head;
    if !board.is_hazard(&head) || you.health > config.hazard.health_threshold {
        return None;
    }

    if let Some(dir) = adjacent_food(board, &head) {
        return Some(dir);
    }

    let radius = config.hazard.scan_radius;
    let mut safe: Option<(Coord, i32)> = None;
    for x in (head.x - radius)..=(head.x + radius) {
        for y in (head.y - radius)..=(head.y + radius) {
            let tile = Coord { x, y };
            if !board.in_bounds(&tile) || board.is_hazard(&tile) {
                continue;
            }
            let d = head.distance_squared(&tile);
            if safe.map_or(true, |(_, best)| d < best) {
                safe = Some((tile, d));
            }
        }
    }

    let (target, _) = safe?;
    debug!("In hazard at health {}, heading for {:?}", you.health, target);
    move_toward(&head, &target, board, config)
}

/// Picks the legal, non-trap direction with the most reachable space
///
/// Ties go to the earlier direction in priority order. When every legal move
/// is a trap we pick randomly among legal moves; when nothing is legal we
/// pick randomly among in-bounds moves, then among all four.
pub fn default_move<R: Rng + ?Sized>(
    head: &Coord,
    board: &Board,
    max_steps: i32,
    min_spaces: usize,
    rng: &mut R,
) -> Direction {
    let mut best: Option<(Direction, usize)> = None;
    for dir in Direction::all().iter().copied() {
        if !is_legal(board, head, dir) {
            continue;
        }
        let spaces = free_space_count(board, dir.apply(head), max_steps);
        if spaces < min_spaces {
            continue;
        }
        if best.map_or(true, |(_, most)| spaces > most) {
            best = Some((dir, spaces));
        }
    }

    if let Some((dir, spaces)) = best {
        debug!("Default move {} with {} free tiles", dir.as_str(), spaces);
        return dir;
    }

    let legal = legal_moves(board, head);
    if let Some(dir) = legal.choose(rng) {
        debug!("All legal moves are traps, picked {}", dir.as_str());
        return *dir;
    }

    let in_bounds: Vec<Direction> = Direction::all()
        .iter()
        .copied()
        .filter(|dir| board.in_bounds(&dir.apply(head)))
        .collect();
    random_direction(&in_bounds, rng)
}

/// Uniform choice among `options`, or among all four when `options` is empty
pub fn random_direction<R: Rng + ?Sized>(options: &[Direction], rng: &mut R) -> Direction {
    match options.choose(rng) {
        Some(dir) => *dir,
        None => *Direction::all().choose(rng).unwrap_or(&Direction::Up),
    }
}
