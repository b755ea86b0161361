use crate::config::params::{genesis, INITIAL_DIFFICULTY};
use crate::core::{Payload, ProofOfWork};
use crate::error::Result;
use crate::utils::crypto_hash;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block<P> {
    timestamp: u64,
    previous_hash: String,
    hash: String,
    payload: P,
    nonce: u64,
    difficulty: u32,
}

impl<P: Payload> Block<P> {
    /// Assemble a block from already known fields. Nothing is checked here;
    /// blocks received from elsewhere go through chain validation instead.
    pub fn new(
        timestamp: u64,
        previous_hash: String,
        hash: String,
        payload: P,
        nonce: u64,
        difficulty: u32,
    ) -> Block<P> {
        Block {
            timestamp,
            previous_hash,
            hash,
            payload,
            nonce,
            difficulty,
        }
    }

    pub fn genesis() -> Block<P> {
        Block::new(
            genesis::TIMESTAMP,
            genesis::PREVIOUS_HASH.to_string(),
            genesis::HASH.to_string(),
            P::default(),
            genesis::NONCE,
            INITIAL_DIFFICULTY,
        )
    }

    /// Mine a successor of `previous` carrying `payload`.
    pub fn mine_block(previous: &Block<P>, payload: P) -> Result<Block<P>> {
        ProofOfWork::mine(previous, payload)
    }

    pub fn hash_fields(
        timestamp: u64,
        previous_hash: &str,
        payload: &P,
        nonce: u64,
        difficulty: u32,
    ) -> Result<String> {
        crypto_hash(&(timestamp, previous_hash, payload, nonce, difficulty))
    }

    /// Hash recomputed from the block's own fields
    pub fn compute_hash(&self) -> Result<String> {
        Self::hash_fields(
            self.timestamp,
            &self.previous_hash,
            &self.payload,
            self.nonce,
            self.difficulty,
        )
    }

    pub fn get_timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn get_previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }

    pub fn get_hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn get_payload(&self) -> &P {
        &self.payload
    }

    pub fn get_nonce(&self) -> u64 {
        self.nonce
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }
}

fn short(hash: &str) -> &str {
    hash.get(..10).unwrap_or(hash)
}

impl<P: Payload> fmt::Display for Block<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Block -")?;
        writeln!(f, "    Timestamp:     {}", self.timestamp)?;
        writeln!(f, "    Previous Hash: {}", short(&self.previous_hash))?;
        writeln!(f, "    Hash:          {}", short(&self.hash))?;
        writeln!(f, "    Nonce:         {}", self.nonce)?;
        writeln!(f, "    Difficulty:    {}", self.difficulty)?;
        write!(f, "    Data:          {:?}", self.payload)
    }
}
