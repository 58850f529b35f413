// Tests for the JSONL turn log and the replay engine
//
// The logger writes real files in the system temp directory; the replay
// engine then reads them back and re-decides every logged turn.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use ninemo_snake::bot::Bot;
use ninemo_snake::config::Config;
use ninemo_snake::debug_logger::DebugLogger;
use ninemo_snake::replay::ReplayEngine;
use ninemo_snake::types::{Battlesnake, Board, Coord, Direction, Game};

fn temp_log(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("ninemo_{}_{}.jsonl", name, std::process::id()))
}

fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
    let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health: 75,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

fn game() -> Game {
    Game {
        id: "replay-game".to_string(),
        ruleset: HashMap::new(),
        timeout: 500,
        source: "test".to_string(),
    }
}

/// Our snake is listed second so replay has to honor the logged self id
fn board() -> Board {
    Board {
        width: 11,
        height: 11,
        food: vec![Coord { x: 8, y: 5 }],
        snakes: vec![
            snake("other", &[(1, 9), (1, 10)]),
            snake("me", &[(5, 5), (5, 4), (5, 3)]),
            snake("third", &[(9, 1), (10, 1)]),
        ],
        hazards: vec![],
    }
}

#[tokio::test]
async fn test_logged_turns_replay_to_the_same_moves() {
    let path = temp_log("roundtrip");
    let logger = DebugLogger::new(true, path.to_str().unwrap()).await;
    assert!(logger.is_enabled());

    let bot = Bot::with_logger(Config::default_hardcoded(), logger);
    let board = board();
    let you = board.snakes[1].clone();

    for turn in 0..3 {
        let response = bot.get_move(&game(), &turn, &board, &you).await;
        assert_eq!(response["move"].as_str(), Some("right"));
        // Let the fire-and-forget write land before the next turn
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    tokio::time::sleep(Duration::from_millis(200)).await;

    let engine = ReplayEngine::new(Config::default_hardcoded(), true);
    let entries = engine.load_log_file(&path).expect("log should load");
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.you_id == "me" && e.stage == "food"));
    assert_eq!(entries[2].turn, 2);

    let results = engine.replay_all(&entries);
    let stats = engine.generate_stats(&results);
    assert_eq!(stats.total_turns, 3);
    assert_eq!(stats.matches, 3);
    assert!(engine
        .validate_expected_moves(&entries, &[(1, vec![Direction::Right])])
        .is_ok());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_load_rejects_malformed_lines() {
    let path = temp_log("malformed");
    std::fs::write(&path, "{\"turn\": 0}\nnot json\n").unwrap();

    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    let err = engine.load_log_file(&path).unwrap_err();
    assert!(err.contains("line 1"), "{}", err);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_log_file_is_an_error() {
    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    assert!(engine.load_log_file("does/not/exist.jsonl").is_err());
}

#[test]
fn test_disabled_logger_does_nothing() {
    let logger = DebugLogger::disabled();
    assert!(!logger.is_enabled());
}
