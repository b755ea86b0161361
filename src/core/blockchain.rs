// The live chain owned by one ledger instance. New blocks are mined onto the
// tip; a competing chain is adopted only through `replace_chain`, which swaps
// the whole sequence and never edits blocks in place.

use crate::core::validation::{validate_chain, validate_chain_with_work};
use crate::core::{ledger, Block, Payload, Transaction};
use crate::error::{LedgerError, ValidationError};
use log::{error, info, warn};
use std::fmt;

/// Why a candidate chain was not adopted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    NotLonger { current: usize, candidate: usize },
    InvalidChain(ValidationError),
    InvalidTransactionData(ValidationError),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotLonger { current, candidate } => write!(
                f,
                "received chain ({candidate} blocks) is not longer than the current chain ({current} blocks)"
            ),
            RejectReason::InvalidChain(e) => write!(f, "received chain is not valid: {e}"),
            RejectReason::InvalidTransactionData(e) => {
                write!(f, "received chain has invalid transaction data: {e}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    Replaced,
    Rejected(RejectReason),
}

impl ReplaceOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, ReplaceOutcome::Replaced)
    }
}

#[derive(Debug, Clone)]
pub struct Blockchain<P = Vec<Transaction>> {
    chain: Vec<Block<P>>,
    enforce_work: bool,
}

impl<P: Payload> Default for Blockchain<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload> Blockchain<P> {
    /// A chain holding only the genesis block
    pub fn new() -> Blockchain<P> {
        Blockchain {
            chain: vec![Block::genesis()],
            enforce_work: false,
        }
    }

    /// Also require proof-of-work on every block of a candidate chain
    pub fn with_work_enforcement(mut self, enforce: bool) -> Blockchain<P> {
        self.enforce_work = enforce;
        self
    }

    pub fn blocks(&self) -> &[Block<P>] {
        self.chain.as_slice()
    }

    pub fn last_block(&self) -> &Block<P> {
        // the genesis block is never removed
        &self.chain[self.chain.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Mine `payload` onto the tip and append the block
    pub fn add_block(&mut self, payload: P) -> Result<&Block<P>, LedgerError> {
        let block = Block::mine_block(self.last_block(), payload)?;
        self.chain.push(block);
        Ok(self.last_block())
    }

    /// Structural check honoring this chain's work policy
    pub fn check_chain(&self, chain: &[Block<P>]) -> Result<(), ValidationError> {
        if self.enforce_work {
            validate_chain_with_work(chain)
        } else {
            validate_chain(chain)
        }
    }

    /// Longest-valid-chain rule. See [`Blockchain::replace_chain_with`].
    pub fn replace_chain(&mut self, candidate: &[Block<P>], validate_ledger: bool) -> ReplaceOutcome {
        self.try_replace(candidate, validate_ledger, None::<fn()>)
    }

    /// Adopt `candidate` if it is longer, structurally valid and, when
    /// `validate_ledger` is set, carries sound transaction data. The checks
    /// run in that order and stop at the first failure. `on_success` runs
    /// just before the swap.
    pub fn replace_chain_with<F: FnOnce()>(
        &mut self,
        candidate: &[Block<P>],
        validate_ledger: bool,
        on_success: F,
    ) -> ReplaceOutcome {
        self.try_replace(candidate, validate_ledger, Some(on_success))
    }

    fn try_replace<F: FnOnce()>(
        &mut self,
        candidate: &[Block<P>],
        validate_ledger: bool,
        on_success: Option<F>,
    ) -> ReplaceOutcome {
        if candidate.len() <= self.chain.len() {
            let reason = RejectReason::NotLonger {
                current: self.chain.len(),
                candidate: candidate.len(),
            };
            info!("{reason}");
            return ReplaceOutcome::Rejected(reason);
        }

        if let Err(e) = self.check_chain(candidate) {
            let reason = RejectReason::InvalidChain(e);
            warn!("{reason}");
            return ReplaceOutcome::Rejected(reason);
        }

        if validate_ledger {
            if let Err(e) = P::validate_ledger(candidate) {
                let reason = RejectReason::InvalidTransactionData(e);
                error!("{reason}");
                return ReplaceOutcome::Rejected(reason);
            }
        }

        if let Some(callback) = on_success {
            callback();
        }

        info!(
            "Replacing chain of {} blocks with the received chain of {} blocks",
            self.chain.len(),
            candidate.len()
        );
        self.chain = candidate.to_vec();
        ReplaceOutcome::Replaced
    }
}

impl Blockchain<Vec<Transaction>> {
    pub fn balance_of(&self, address: &str) -> u64 {
        ledger::balance_of(&self.chain, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::is_valid_chain;
    use crate::error::ValidationErrorKind;
    use crate::wallet::Wallet;
    use std::cell::Cell;

    #[test]
    fn test_starts_with_genesis() {
        let blockchain: Blockchain<String> = Blockchain::new();
        assert_eq!(blockchain.len(), 1);
        assert_eq!(blockchain.blocks()[0], Block::genesis());
    }

    #[test]
    fn test_add_block() {
        let mut blockchain: Blockchain<String> = Blockchain::new();
        blockchain.add_block("foo".to_string()).unwrap();

        assert_eq!(blockchain.len(), 2);
        assert_eq!(blockchain.last_block().get_payload(), "foo");
        assert!(is_valid_chain(blockchain.blocks()));
    }

    #[test]
    fn test_replaces_with_longer_valid_chain() {
        let mut current: Blockchain<String> = Blockchain::new();
        let mut candidate: Blockchain<String> = Blockchain::new();
        candidate.add_block("goo".to_string()).unwrap();

        let outcome = current.replace_chain(candidate.blocks(), false);
        assert_eq!(outcome, ReplaceOutcome::Replaced);
        assert_eq!(current.blocks(), candidate.blocks());
    }

    #[test]
    fn test_does_not_replace_with_shorter_or_equal_chain() {
        let mut current: Blockchain<String> = Blockchain::new();
        current.add_block("foo".to_string()).unwrap();
        let original = current.blocks().to_vec();

        let shorter: Blockchain<String> = Blockchain::new();
        let outcome = current.replace_chain(shorter.blocks(), false);
        assert!(matches!(
            outcome,
            ReplaceOutcome::Rejected(RejectReason::NotLonger { .. })
        ));

        let mut equal: Blockchain<String> = Blockchain::new();
        equal.add_block("bar".to_string()).unwrap();
        let outcome = current.replace_chain(equal.blocks(), false);
        assert_eq!(
            outcome,
            ReplaceOutcome::Rejected(RejectReason::NotLonger {
                current: 2,
                candidate: 2
            })
        );
        assert_eq!(current.blocks(), original.as_slice());
    }

    #[test]
    fn test_does_not_replace_with_invalid_chain() {
        let mut current: Blockchain<String> = Blockchain::new();
        let mut candidate: Blockchain<String> = Blockchain::new();
        candidate.add_block("one".to_string()).unwrap();
        candidate.add_block("two".to_string()).unwrap();

        let mut blocks = candidate.blocks().to_vec();
        let b = &blocks[1];
        blocks[1] = Block::new(
            b.get_timestamp(),
            b.get_previous_hash().to_string(),
            b.get_hash().to_string(),
            "evil".to_string(),
            b.get_nonce(),
            b.get_difficulty(),
        );

        match current.replace_chain(&blocks, false) {
            ReplaceOutcome::Rejected(RejectReason::InvalidChain(e)) => {
                assert_eq!(e.kind(), ValidationErrorKind::Structural)
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(current.len(), 1);
    }

    #[test]
    fn test_success_callback_runs_only_on_replacement() {
        let called = Cell::new(0);
        let mut current: Blockchain<String> = Blockchain::new();
        let mut candidate: Blockchain<String> = Blockchain::new();

        let outcome = current.replace_chain_with(candidate.blocks(), false, || {
            called.set(called.get() + 1)
        });
        assert!(!outcome.is_replaced());
        assert_eq!(called.get(), 0);

        candidate.add_block("foo".to_string()).unwrap();
        let outcome = current.replace_chain_with(candidate.blocks(), false, || {
            called.set(called.get() + 1)
        });
        assert!(outcome.is_replaced());
        assert_eq!(called.get(), 1);
    }

    #[test]
    fn test_rejects_invalid_transaction_data_when_asked() {
        let wallet = Wallet::new().unwrap();
        let tx = Transaction::new(&wallet, "foo-address", 65).unwrap();
        let reward = Transaction::reward(&wallet.get_address());

        let mut candidate: Blockchain = Blockchain::new();
        candidate.add_block(vec![tx, reward.clone(), reward]).unwrap();

        let mut current: Blockchain = Blockchain::new();
        let outcome = current.replace_chain(candidate.blocks(), true);
        assert!(matches!(
            outcome,
            ReplaceOutcome::Rejected(RejectReason::InvalidTransactionData(_))
        ));
        assert_eq!(current.len(), 1);

        // the same chain passes when ledger checks are skipped
        let outcome = current.replace_chain(candidate.blocks(), false);
        assert!(outcome.is_replaced());
    }

    #[test]
    fn test_replaces_with_valid_transaction_data() {
        let wallet = Wallet::new().unwrap();
        let tx = Transaction::new(&wallet, "foo-address", 65).unwrap();

        let mut candidate: Blockchain = Blockchain::new();
        candidate.add_block(vec![tx, Transaction::reward(&wallet.get_address())]).unwrap();

        let mut current: Blockchain = Blockchain::new();
        assert!(current.replace_chain(candidate.blocks(), true).is_replaced());
        assert_eq!(current.balance_of("foo-address"), 1_000 + 65);
    }

    #[test]
    fn test_opaque_payload_skips_ledger_checks() {
        let mut candidate: Blockchain<serde_json::Value> = Blockchain::new();
        candidate.add_block(serde_json::json!({ "anything": [1, 2, 3] })).unwrap();

        let mut current: Blockchain<serde_json::Value> = Blockchain::new();
        assert!(current.replace_chain(candidate.blocks(), true).is_replaced());
    }

    #[test]
    fn test_work_enforcement_policy() {
        let mut candidate: Blockchain<String> = Blockchain::new();
        candidate.add_block("mined".to_string()).unwrap();
        let mut blocks = candidate.blocks().to_vec();

        let last = blocks.last().unwrap().clone();
        let difficulty = last.get_difficulty() + 1;
        let timestamp = last.get_timestamp() + 1;
        let payload = "unmined".to_string();
        let (nonce, hash) = (0u64..)
            .map(|n| {
                let hash = Block::hash_fields(timestamp, last.get_hash(), &payload, n, difficulty);
                (n, hash.unwrap())
            })
            .find(|(_, h)| !crate::core::ProofOfWork::hash_meets_difficulty(h, difficulty))
            .unwrap();
        blocks.push(Block::new(
            timestamp,
            last.get_hash().to_string(),
            hash,
            payload,
            nonce,
            difficulty,
        ));

        let mut strict: Blockchain<String> = Blockchain::new().with_work_enforcement(true);
        assert!(matches!(
            strict.replace_chain(&blocks, false),
            ReplaceOutcome::Rejected(RejectReason::InvalidChain(
                ValidationError::InsufficientWork { index: 2 }
            ))
        ));

        let mut lenient: Blockchain<String> = Blockchain::new();
        assert!(lenient.replace_chain(&blocks, false).is_replaced());
    }
}
