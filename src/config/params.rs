//! Protocol parameters
//!
//! These values are part of consensus: every node has to agree on them or
//! chains stop validating across nodes.

/// Difficulty of the genesis block (leading zero bits)
pub const INITIAL_DIFFICULTY: u32 = 3;

/// Target time between blocks in milliseconds
pub const MINE_RATE: u64 = 1_000;

/// Balance every address starts with before any history exists
pub const STARTING_BALANCE: u64 = 1_000;

/// Amount credited by a reward transaction
pub const MINING_REWARD: u64 = 50;

/// Sender identity carried by reward transactions
pub const REWARD_INPUT_ADDRESS: &str = "*authorized-reward*";

/// Genesis block constants
pub mod genesis {
    pub const TIMESTAMP: u64 = 1;
    pub const PREVIOUS_HASH: &str = "------";
    pub const HASH: &str = "f1r57-h45z";
    pub const NONCE: u64 = 0;
}
