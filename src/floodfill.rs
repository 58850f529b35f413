// Reachability analysis
//
// Bounded breadth-first flood fill used to size the pocket of free space a
// move leads into. The traversal is confined to the Manhattan diamond of
// radius `max_steps` around the origin, so cost stays O(max_steps^2).

use std::collections::{HashSet, VecDeque};

use crate::types::{Board, Coord, Direction};

/// Counts distinct free tiles reachable from `origin` within `max_steps`
///
/// The origin itself is not counted; it is where the head will sit. Each tile
/// is counted at most once.
pub fn free_space_count(board: &Board, origin: Coord, max_steps: i32) -> usize {
    if !board.in_bounds(&origin) || max_steps <= 0 {
        return 0;
    }

    let mut visited: HashSet<Coord> = HashSet::new();
    let mut queue: VecDeque<Coord> = VecDeque::new();
    visited.insert(origin);
    queue.push_back(origin);

    let mut count = 0;
    while let Some(current) = queue.pop_front() {
        for next in current.neighbors().iter() {
            if origin.manhattan(next) > max_steps || visited.contains(next) {
                continue;
            }
            if board.is_blocked(next) {
                continue;
            }
            visited.insert(*next);
            queue.push_back(*next);
            count += 1;
        }
    }

    count
}

/// True iff moving `direction` from `head` leads into fewer than `min_spaces` free tiles
pub fn is_trap(
    board: &Board,
    head: &Coord,
    direction: Direction,
    max_steps: i32,
    min_spaces: usize,
) -> bool {
    free_space_count(board, direction.apply(head), max_steps) < min_spaces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::*;

    #[test]
    fn test_open_board_counts_full_diamond() {
        // Radius 2 diamond has 13 tiles, minus the origin
        let b = board(11, 11, vec![]);
        assert_eq!(free_space_count(&b, Coord { x: 5, y: 5 }, 2), 12);
    }

    #[test]
    fn test_clipped_by_walls() {
        // Corner origin: (1,0), (0,1), (2,0), (1,1), (0,2)
        let b = board(11, 11, vec![]);
        assert_eq!(free_space_count(&b, Coord { x: 0, y: 0 }, 2), 5);
    }

    #[test]
    fn test_cycles_do_not_double_count() {
        // A 3x3 board with a ring around the center: every tile reachable once
        let b = board(3, 3, vec![]);
        assert_eq!(free_space_count(&b, Coord { x: 1, y: 1 }, 10), 8);
    }

    #[test]
    fn test_bodies_block_traversal() {
        // Wall of body splits a 5-wide corridor
        let b = board(5, 1, vec![snake("a", 90, &[(2, 0)])]);
        assert_eq!(free_space_count(&b, Coord { x: 0, y: 0 }, 5), 1);
    }

    #[test]
    fn test_monotone_in_horizon() {
        let b = board(
            9,
            9,
            vec![snake("a", 90, &[(4, 4), (4, 3), (3, 3), (2, 3), (2, 4)])],
        );
        let origin = Coord { x: 3, y: 4 };
        let mut last = 0;
        for steps in 0..12 {
            let n = free_space_count(&b, origin, steps);
            assert!(n >= last, "horizon {} shrank count {} -> {}", steps, last, n);
            last = n;
        }
    }

    #[test]
    fn test_trap_threshold_is_strict() {
        // Dead-end pocket: from (0,0), moving right to (1,0) reaches only (2,0)
        let b = board(
            3,
            2,
            vec![snake("a", 90, &[(0, 0), (0, 1), (1, 1), (2, 1)])],
        );
        let head = Coord { x: 0, y: 0 };
        assert!(is_trap(&b, &head, Direction::Right, 5, 2));
        assert!(!is_trap(&b, &head, Direction::Right, 5, 1));
    }
}
