use crate::config::params::{INITIAL_DIFFICULTY, MINE_RATE};
use crate::core::{Block, Payload};

/// Smallest difficulty a retarget will produce
const MIN_DIFFICULTY: u32 = 1;

/// Per-block difficulty retarget.
///
/// Each block looks only at its predecessor: slower than `MINE_RATE`
/// eases by one, anything else tightens by one. There is no ceiling.
pub struct DifficultyAdjustment;

impl DifficultyAdjustment {
    /// Difficulty for a block proposed at `timestamp` on top of `previous`
    pub fn adjust_difficulty<P: Payload>(previous: &Block<P>, timestamp: u64) -> u32 {
        Self::next_difficulty(previous.get_difficulty(), previous.get_timestamp(), timestamp)
    }

    pub fn next_difficulty(
        previous_difficulty: u32,
        previous_timestamp: u64,
        timestamp: u64,
    ) -> u32 {
        if previous_difficulty < MIN_DIFFICULTY {
            return MIN_DIFFICULTY;
        }

        if timestamp.saturating_sub(previous_timestamp) > MINE_RATE {
            return (previous_difficulty - 1).max(MIN_DIFFICULTY);
        }

        previous_difficulty + 1
    }

    /// Get the initial difficulty for genesis block
    pub fn get_initial_difficulty() -> u32 {
        INITIAL_DIFFICULTY
    }

    /// Get the target block time in milliseconds
    pub fn get_target_block_time() -> u64 {
        MINE_RATE
    }
}
