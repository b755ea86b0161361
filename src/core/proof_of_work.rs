use crate::core::{Block, DifficultyAdjustment, Payload};
use crate::error::Result;
use crate::utils::{current_timestamp, hex_decode};
use log::info;
use num_bigint::BigUint;
use std::ops::ShlAssign;

const HASH_BITS: u32 = 256;

/// Leading-zero-bit target for a difficulty.
///
/// A hash has at least `difficulty` leading zero bits exactly when, read as
/// a big-endian integer, it is below `2^(256 - difficulty)`.
pub struct ProofOfWork {
    target: BigUint,
    difficulty: u32,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> ProofOfWork {
        let mut target = BigUint::from(1u32);
        target.shl_assign(HASH_BITS.saturating_sub(difficulty));
        ProofOfWork { target, difficulty }
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn is_met_by(&self, hash: &[u8]) -> bool {
        BigUint::from_bytes_be(hash) < self.target
    }

    /// Check that a hex hash has at least `difficulty` leading zero bits.
    /// Anything that is not hex never qualifies.
    pub fn hash_meets_difficulty(hash: &str, difficulty: u32) -> bool {
        match hex_decode(hash) {
            Ok(bytes) => ProofOfWork::new(difficulty).is_met_by(&bytes),
            Err(_) => false,
        }
    }

    /// Validate proof-of-work for a block
    pub fn validate<P: Payload>(block: &Block<P>) -> bool {
        Self::hash_meets_difficulty(block.get_hash(), block.get_difficulty())
    }

    /// Search nonces until a successor of `previous` meets its own difficulty.
    ///
    /// The nonce only ever increases. Timestamp and difficulty are refreshed
    /// on every attempt, so the accepted block carries the difficulty that
    /// applied at the moment it was found. The only failure is a payload
    /// without a JSON encoding.
    pub fn mine<P: Payload>(previous: &Block<P>, payload: P) -> Result<Block<P>> {
        let previous_hash = previous.get_hash();
        let mut pow = ProofOfWork::new(previous.get_difficulty());
        let mut nonce: u64 = 0;

        loop {
            nonce = nonce.wrapping_add(1);
            let timestamp = current_timestamp();
            let difficulty = DifficultyAdjustment::adjust_difficulty(previous, timestamp);
            if difficulty != pow.difficulty {
                pow = ProofOfWork::new(difficulty);
            }

            let hash = Block::hash_fields(timestamp, previous_hash, &payload, nonce, difficulty)?;
            let met = hex_decode(&hash)
                .map(|bytes| pow.is_met_by(&bytes))
                .unwrap_or(false);

            if met {
                info!("Mined block {hash} (difficulty: {difficulty}, nonce: {nonce})");
                return Ok(Block::new(
                    timestamp,
                    previous_hash.to_string(),
                    hash,
                    payload,
                    nonce,
                    difficulty,
                ));
            }
        }
    }
}

/// Number of leading zero bits in a hash
pub fn count_leading_zero_bits(hash: &[u8]) -> u32 {
    let mut total = 0u32;
    for b in hash {
        if *b == 0 {
            total += 8;
        } else {
            total += b.leading_zeros();
            break;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zero_bits_examples() {
        let mut h = [0u8; 32];
        assert_eq!(count_leading_zero_bits(&h), 256);
        h[0] = 0x0F; // 00001111
        assert_eq!(count_leading_zero_bits(&h), 4);
        h = [0u8; 32];
        h[1] = 0x80; // 00000000 10000000
        assert_eq!(count_leading_zero_bits(&h), 8);
        h[1] = 0x40; // 01000000
        assert_eq!(count_leading_zero_bits(&h), 9);
    }

    #[test]
    fn test_target_matches_leading_zero_count() {
        let mut h = [0xFFu8; 32];
        h[0] = 0x0F;
        assert!(ProofOfWork::new(4).is_met_by(&h));
        assert!(!ProofOfWork::new(5).is_met_by(&h));

        h[0] = 0x00;
        h[1] = 0x40;
        assert!(ProofOfWork::new(9).is_met_by(&h));
        assert!(!ProofOfWork::new(10).is_met_by(&h));
    }

    #[test]
    fn test_zero_difficulty_accepts_anything() {
        assert!(ProofOfWork::new(0).is_met_by(&[0xFFu8; 32]));
    }

    #[test]
    fn test_hash_meets_difficulty_hex() {
        let hash = format!("0f{}", "ff".repeat(31));
        assert!(ProofOfWork::hash_meets_difficulty(&hash, 4));
        assert!(!ProofOfWork::hash_meets_difficulty(&hash, 5));
        assert!(!ProofOfWork::hash_meets_difficulty("f1r57-h45z", 1));
    }

    #[test]
    fn test_higher_difficulty_has_smaller_target() {
        let easy = ProofOfWork::new(1);
        let hard = ProofOfWork::new(2);
        assert!(hard.target < easy.target);
        assert_eq!(hard.get_difficulty(), 2);
    }

    #[test]
    fn test_mined_block_leading_bits() {
        let genesis: Block<String> = Block::genesis();
        let block = ProofOfWork::mine(&genesis, "foo".to_string()).unwrap();
        let bytes = hex_decode(block.get_hash()).unwrap();
        assert!(count_leading_zero_bits(&bytes) >= block.get_difficulty());
        assert!(ProofOfWork::validate(&block));
    }
}
