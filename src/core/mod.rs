//! Core ledger functionality
//!
//! Blocks and proof-of-work mining, difficulty retargeting, chain
//! validation with the longest-valid-chain replacement rule, and the
//! transaction rules with balance reconstruction.

pub mod block;
pub mod blockchain;
pub mod difficulty;
pub mod ledger;
pub mod payload;
pub mod proof_of_work;
pub mod transaction;
pub mod validation;

pub use block::Block;
pub use blockchain::{Blockchain, RejectReason, ReplaceOutcome};
pub use difficulty::DifficultyAdjustment;
pub use ledger::{balance_of, validate_ledger_data};
pub use payload::Payload;
pub use proof_of_work::{count_leading_zero_bits, ProofOfWork};
pub use transaction::{OutputMap, Transaction, TransactionInput};
pub use validation::{is_valid_chain, validate_chain, validate_chain_with_work};
