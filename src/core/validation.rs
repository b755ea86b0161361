use crate::core::{Block, Payload, ProofOfWork};
use crate::error::ValidationError;

/// Structural validation of a candidate chain.
///
/// Checks that the chain starts at the canonical genesis block, that each
/// block points at its predecessor's hash, that each stored hash recomputes
/// from the block's fields, and that difficulty moves by at most one per
/// block. It does NOT check that hashes satisfy their difficulty; use
/// [`validate_chain_with_work`] for that.
pub fn validate_chain<P: Payload>(chain: &[Block<P>]) -> Result<(), ValidationError> {
    let genesis = chain.first().ok_or(ValidationError::EmptyChain)?;
    if *genesis != Block::genesis() {
        return Err(ValidationError::GenesisMismatch);
    }

    for (index, pair) in chain.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        let index = index + 1;

        if current.get_previous_hash() != previous.get_hash() {
            return Err(ValidationError::BrokenLink { index });
        }

        if current.compute_hash().ok().as_deref() != Some(current.get_hash()) {
            return Err(ValidationError::HashMismatch { index });
        }

        if previous.get_difficulty().abs_diff(current.get_difficulty()) > 1 {
            return Err(ValidationError::DifficultyJump {
                index,
                previous: previous.get_difficulty(),
                current: current.get_difficulty(),
            });
        }
    }

    Ok(())
}

pub fn is_valid_chain<P: Payload>(chain: &[Block<P>]) -> bool {
    validate_chain(chain).is_ok()
}

/// [`validate_chain`] plus a leading-zero-bit check on every non-genesis block
pub fn validate_chain_with_work<P: Payload>(chain: &[Block<P>]) -> Result<(), ValidationError> {
    validate_chain(chain)?;

    for (index, block) in chain.iter().enumerate().skip(1) {
        if !ProofOfWork::validate(block) {
            return Err(ValidationError::InsufficientWork { index });
        }
    }

    Ok(())
}
