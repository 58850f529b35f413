// Library exports for the ninemo Battlesnake
// The HTTP shell and the replay tool both drive the engine through these modules

pub mod board;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod duel;
pub mod floodfill;
pub mod navigator;
pub mod replay;
pub mod simulator;
pub mod threat;
pub mod types;
