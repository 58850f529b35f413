// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Decision orchestration. With more or fewer than two snakes on the board we
// run a priority chain of heuristics; with exactly two we hand over to the
// duel solver.

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use fxhash::FxHasher64;
use std::hash::Hasher;
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::duel;
use crate::floodfill::is_trap;
use crate::navigator::{default_move, handle_hazard, move_toward, nearest_food, random_direction};
use crate::threat::{detect_head_to_head, is_legal};
use crate::types::{Battlesnake, Board, Direction, Game};

/// Which decision path runs for this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecutionStrategy {
    /// Head-to-head, hazard, food, space, in that order
    Heuristic,
    /// Minimax search against the single remaining opponent
    Duel,
}

/// The stage of the pipeline that produced a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    HeadToHead,
    Hazard,
    Food,
    Space,
    Duel,
    Fallback,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::HeadToHead => "head_to_head",
            Stage::Hazard => "hazard",
            Stage::Food => "food",
            Stage::Space => "space",
            Stage::Duel => "duel",
            Stage::Fallback => "fallback",
        }
    }
}

/// A chosen direction and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub stage: Stage,
}

impl Decision {
    fn new(direction: Direction, stage: Stage) -> Self {
        Decision { direction, stage }
    }
}

fn determine_strategy(board: &Board, config: &Config) -> ExecutionStrategy {
    if board.alive_count() == config.strategy.duel_snake_count {
        ExecutionStrategy::Duel
    } else {
        ExecutionStrategy::Heuristic
    }
}

/// Picks exactly one direction for `you` on `board`
///
/// Always returns a direction, even from a lost position. `rng` is the only
/// source of randomness, so a fixed seed gives a fixed decision.
pub fn decide<R: Rng + ?Sized>(
    board: &Board,
    you: &Battlesnake,
    config: &Config,
    rng: &mut R,
) -> Decision {
    match determine_strategy(board, config) {
        ExecutionStrategy::Duel => {
            let (direction, score) = duel::best_move(board, &you.id, config);
            debug!("Duel solver picked {} (score {})", direction.as_str(), score);
            Decision::new(direction, Stage::Duel)
        }
        ExecutionStrategy::Heuristic => heuristic_chain(board, you, config, rng),
    }
}

fn heuristic_chain<R: Rng + ?Sized>(
    board: &Board,
    you: &Battlesnake,
    config: &Config,
    rng: &mut R,
) -> Decision {
    let head = you.head;

    if let Some(dir) = detect_head_to_head(you, board) {
        return Decision::new(dir, Stage::HeadToHead);
    }

    if let Some(dir) = handle_hazard(you, board, config) {
        return Decision::new(dir, Stage::Hazard);
    }

    if let Some(food) = nearest_food(&head, board) {
        if let Some(dir) = move_toward(&head, &food, board, config) {
            return Decision::new(dir, Stage::Food);
        }
        debug!("No safe axis step toward food at {:?}", food);
    }

    let horizon = config.search.flood_fill_horizon;
    let min_spaces = config.search.min_free_spaces;
    let dir = default_move(&head, board, horizon, min_spaces, rng);
    let stage = if is_legal(board, &head, dir) && !is_trap(board, &head, dir, horizon, min_spaces)
    {
        Stage::Space
    } else {
        Stage::Fallback
    };
    Decision::new(dir, stage)
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration and no turn log
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            logger: DebugLogger::disabled(),
        }
    }

    /// Creates a Bot that appends every decision to `logger`
    pub fn with_logger(config: Config, logger: DebugLogger) -> Self {
        Bot { config, logger }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "tenmo",
            "color": "#4287f5",
            "head": "evil",
            "tail": "default",
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, _you: &Battlesnake) {
        info!(
            "GAME START {} ({}x{}, {} snakes)",
            game.id,
            board.width,
            board.height,
            board.snakes.len()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Seed for a turn's random fallback, stable for a given game and turn
    ///
    /// Fx hashing has a fixed algorithm and no per-process key, so logged
    /// turns replay with the same seed on any toolchain.
    pub fn seed_for(game_id: &str, turn: i32) -> u64 {
        let mut hasher = FxHasher64::default();
        hasher.write(game_id.as_bytes());
        hasher.write_u32(turn as u32);
        hasher.finish()
    }

    /// Synchronous decision for one turn, seeded from game id and turn
    pub fn decide_turn(
        &self,
        game_id: &str,
        turn: i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Decision {
        let mut rng = StdRng::seed_from_u64(Self::seed_for(game_id, turn));
        decide(board, you, &self.config, &mut rng)
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The engine is CPU-bound and has no suspension points, so it runs on the
    /// blocking pool while the request task awaits it.
    ///
    /// # Arguments
    /// * `game` - Current game metadata
    /// * `turn` - Current turn number
    /// * `board` - Current board state
    /// * `you` - Your snake's current state
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub async fn get_move(
        &self,
        game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> Value {
        let start_time = Instant::now();
        let turn = *turn;

        info!("Turn {}: Computing move", turn);

        let seed = Self::seed_for(&game.id, turn);
        let board_clone = board.clone();
        let you_clone = you.clone();
        let config = self.config.clone();

        let handle = tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::seed_from_u64(seed);
            decide(&board_clone, &you_clone, &config, &mut rng)
        });

        let decision = match handle.await {
            Ok(decision) => decision,
            Err(e) => {
                error!("Turn {}: decision task failed: {}", turn, e);
                let mut rng = StdRng::seed_from_u64(seed);
                Decision::new(random_direction(&[], &mut rng), Stage::Fallback)
            }
        };

        let elapsed = start_time.elapsed().as_millis() as u64;
        info!(
            "Turn {}: Chose {} via {} ({}ms)",
            turn,
            decision.direction.as_str(),
            decision.stage.as_str(),
            elapsed
        );
        if elapsed > self.config.timing.effective_budget_ms() {
            warn!(
                "Turn {}: decision took {}ms, over the {}ms budget",
                turn,
                elapsed,
                self.config.timing.effective_budget_ms()
            );
        }

        self.logger.log_move(&game.id, &you.id, turn, board.clone(), decision);

        json!({
            "move": decision.direction.as_str(),
            "shout": decision.stage.as_str(),
        })
    }
}
