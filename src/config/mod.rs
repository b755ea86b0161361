//! Configuration management
//!
//! Protocol parameters that every node must share live in `params`.
//! Per-process settings (miner address, logging, validation policy)
//! are loaded by `settings`.

pub mod params;
pub mod settings;

pub use params::{
    INITIAL_DIFFICULTY, MINE_RATE, MINING_REWARD, REWARD_INPUT_ADDRESS, STARTING_BALANCE,
};
pub use settings::{Config, LoggingConfig, MinerConfig, ValidationConfig};
