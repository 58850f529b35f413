// Two-snake endgame search
//
// Fixed-depth minimax over the simulator. Plies alternate between us and the
// opponent, so depth 4 covers two full turns. We always open a round with
// `apply_move` and the opponent answers with `apply_reply`, so a head-to-head
// only resolves once both heads have moved. All four directions are expanded
// at every node; illegal moves resolve to a dead snake in the simulator and
// are scored by `evaluate` like any other leaf.

use log::debug;
use rayon::prelude::*;

use crate::config::Config;
use crate::floodfill::free_space_count;
use crate::navigator::nearest_food;
use crate::simulator::{apply_move, apply_reply};
use crate::types::{Board, Direction};

/// Static evaluation from our point of view
///
/// Terminal positions score `±terminal_score`; every other score is clamped
/// strictly inside that range.
pub fn evaluate(board: &Board, self_id: &str, config: &Config) -> i32 {
    let duel = &config.duel;
    let terminal = duel.terminal_score;

    let me = match board.snake(self_id) {
        Some(s) if s.is_alive() => s,
        _ => return -terminal,
    };
    let opponent = match board.opponent_of(self_id) {
        Some(s) if s.is_alive() => s,
        _ => return terminal,
    };

    let span = board.width + board.height;
    let mut score = 0;

    let space = free_space_count(board, me.head, config.search.flood_fill_horizon);
    score += space as i32 * duel.space_weight;
    if space < config.search.min_free_spaces {
        score -= duel.cramped_space_penalty;
    }

    if me.length > opponent.length {
        let gap = me.head.manhattan(&opponent.head);
        score += duel.length_advantage_bonus + duel.pressure_weight * (span - gap).max(0);
    } else {
        score -= duel.length_deficit_penalty;
        if let Some(food) = nearest_food(&me.head, board) {
            let gap = me.head.manhattan(&food);
            score += duel.food_proximity_weight * (span - gap).max(0);
        }
    }

    score.clamp(-(terminal - 1), terminal - 1)
}

/// Minimax value of `board` with `depth` plies left
///
/// A maximizing node opens a round with our move; a minimizing node is the
/// opponent's reply within that round.
pub fn minimax(
    board: &Board,
    depth: u8,
    maximizing: bool,
    self_id: &str,
    config: &Config,
) -> i32 {
    let me_alive = board.snake(self_id).map_or(false, |s| s.is_alive());
    let opponent = board.opponent_of(self_id).filter(|s| s.is_alive());

    let opponent = match opponent {
        Some(o) if depth > 0 && me_alive => o,
        _ => return evaluate(board, self_id, config),
    };

    let directions = Direction::all();
    let scores = directions.iter().map(|&dir| {
        let child = if maximizing {
            apply_move(board, self_id, dir, config)
        } else {
            apply_reply(board, &opponent.id, dir, config)
        };
        minimax(&child, depth - 1, !maximizing, self_id, config)
    });

    if maximizing {
        scores.max().unwrap_or(-config.duel.terminal_score)
    } else {
        scores.min().unwrap_or(config.duel.terminal_score)
    }
}

/// Root of the duel search: our best direction and its score
///
/// The four root children are searched in parallel. Ties go to the earlier
/// direction in priority order.
pub fn best_move(board: &Board, self_id: &str, config: &Config) -> (Direction, i32) {
    let depth = config.duel.search_depth;
    let directions = Direction::all();

    let scores: Vec<i32> = directions
        .par_iter()
        .map(|&dir| {
            let child = apply_move(board, self_id, dir, config);
            minimax(&child, depth.saturating_sub(1), false, self_id, config)
        })
        .collect();

    debug!(
        "Duel scores at depth {}: up={} down={} left={} right={}",
        depth, scores[0], scores[1], scores[2], scores[3]
    );

    let mut best = (directions[0], scores[0]);
    for (dir, score) in directions.iter().zip(scores.iter()).skip(1) {
        if *score > best.1 {
            best = (*dir, *score);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::*;

    fn duel_board() -> Board {
        board(
            11,
            11,
            vec![
                snake("me", 80, &[(2, 2), (2, 1), (2, 0)]),
                snake("them", 80, &[(8, 8), (8, 9), (8, 10)]),
            ],
        )
    }

    #[test]
    fn test_evaluate_terminal_scores() {
        let config = Config::default_hardcoded();
        let mut b = duel_board();
        b.food = coords(&[(3, 3)]);

        b.snakes[0].health = 0;
        assert_eq!(evaluate(&b, "me", &config), -999);

        b.snakes[0].health = 80;
        b.snakes[1].health = 0;
        assert_eq!(evaluate(&b, "me", &config), 999);
    }

    #[test]
    fn test_evaluate_stays_inside_terminal_range() {
        let config = Config::default_hardcoded();
        let mut b = duel_board();
        b.food = coords(&[(2, 3)]);
        let score = evaluate(&b, "me", &config);
        assert!(score > -999 && score < 999);
    }

    #[test]
    fn test_longer_snake_scores_above_shorter() {
        let config = Config::default_hardcoded();
        let b = duel_board();
        let mut longer = b.clone();
        longer.snakes[0].length = 5;
        assert!(evaluate(&longer, "me", &config) > evaluate(&b, "me", &config));
    }

    #[test]
    fn test_depth_zero_is_static_evaluation() {
        let config = Config::default_hardcoded();
        let b = duel_board();
        assert_eq!(minimax(&b, 0, true, "me", &config), evaluate(&b, "me", &config));
    }

    #[test]
    fn test_dead_self_is_terminal_at_any_depth() {
        let config = Config::default_hardcoded();
        let mut b = duel_board();
        b.snakes[0].health = 0;
        assert_eq!(minimax(&b, 3, true, "me", &config), -999);
        assert_eq!(minimax(&b, 3, false, "me", &config), -999);
    }

    #[test]
    fn test_avoids_losing_head_to_head() {
        let config = Config::default_hardcoded();
        let b = board(
            11,
            11,
            vec![
                snake("me", 80, &[(4, 5), (3, 5), (2, 5)]),
                snake("them", 80, &[(6, 5), (7, 5), (8, 5), (9, 5), (10, 5)]),
            ],
        );
        let (dir, _) = best_move(&b, "me", &config);
        assert!(dir == Direction::Up || dir == Direction::Down, "chose {:?}", dir);
    }

    #[test]
    fn test_never_walks_off_the_board() {
        let config = Config::default_hardcoded();
        let b = board(
            11,
            11,
            vec![
                snake("me", 80, &[(0, 5), (1, 5), (2, 5)]),
                snake("them", 80, &[(9, 9), (9, 8), (9, 7)]),
            ],
        );
        let (dir, score) = best_move(&b, "me", &config);
        assert_ne!(dir, Direction::Left);
        assert_ne!(dir, Direction::Right);
        assert!(score > -999);
    }

    #[test]
    fn test_takes_winning_head_to_head() {
        let mut config = Config::default_hardcoded();
        config.duel.search_depth = 2;
        // Opponent is pinned in the corner: its only exit is (1,0), which we reach first
        let b = board(
            11,
            11,
            vec![
                snake("me", 80, &[(2, 0), (3, 0), (4, 0), (5, 0)]),
                snake("them", 80, &[(0, 0), (0, 1), (0, 2)]),
            ],
        );
        let (dir, score) = best_move(&b, "me", &config);
        assert_eq!(dir, Direction::Left);
        assert_eq!(score, 999);
    }

    #[test]
    fn test_does_not_ram_a_standing_head() {
        let config = Config::default_hardcoded();
        // Longer, but their head moves off (5,5) before ours arrives
        let b = board(
            11,
            11,
            vec![
                snake("me", 80, &[(4, 5), (3, 5), (2, 5), (1, 5), (0, 5)]),
                snake("them", 80, &[(5, 5), (5, 4), (5, 3)]),
            ],
        );
        let (dir, score) = best_move(&b, "me", &config);
        assert_ne!(dir, Direction::Right);
        assert!(score > -999);
    }
}
